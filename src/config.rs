use crate::game::Timer;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// How long each delayed transition waits.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Timings {
    pub role_assignment: Duration,
    pub president_selection: Duration,
    pub policy_phase: Duration,
    /// How long a disconnected player keeps their seat.
    pub reconnect_grace: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            role_assignment: Duration::from_millis(1000),
            president_selection: Duration::from_millis(5000),
            policy_phase: Duration::from_millis(3000),
            reconnect_grace: Duration::from_secs(20),
        }
    }
}

impl Timings {
    pub fn delay(&self, timer: Timer) -> Duration {
        match timer {
            Timer::AssignRoles => self.role_assignment,
            Timer::NextPresident => self.president_selection,
            Timer::LegislativeSession => self.policy_phase,
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT is unspecified")]
    MissingPort,
    #[error("PORT is invalid: {0}")]
    InvalidPort(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
    pub timings: Timings,
}

impl ServerConfig {
    /// Reads the configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = lookup("PORT").ok_or(ConfigError::MissingPort)?;
        let port = port.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort(port))?;

        let defaults = Timings::default();
        let millis = |key: &str, default: Duration| {
            Duration::from_millis(parse_or(key, lookup(key), default.as_millis() as u64))
        };
        let timings = Timings {
            role_assignment: millis("ROLE_ASSIGNMENT_DELAY_MS", defaults.role_assignment),
            president_selection: millis("PRESIDENT_SELECTION_DELAY_MS", defaults.president_selection),
            policy_phase: millis("POLICY_PHASE_DELAY_MS", defaults.policy_phase),
            reconnect_grace: Duration::from_secs(parse_or(
                "RECONNECT_GRACE_SECS",
                lookup("RECONNECT_GRACE_SECS"),
                defaults.reconnect_grace.as_secs(),
            )),
        };

        Ok(Self {
            bind_addr: parse_or("BIND_ADDR", lookup("BIND_ADDR"), IpAddr::V4(Ipv4Addr::LOCALHOST)),
            port,
            timings,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

/// Parses an optional setting, falling back to the default if it is absent or malformed.
fn parse_or<T: FromStr>(key: &str, value: Option<String>, default: T) -> T {
    let Some(value) = value else {
        return default;
    };
    match value.trim().parse() {
        Ok(parsed) => parsed,
        Err(_) => {
            log::warn!("Ignoring invalid value for {}: {:?}", key, value);
            default
        }
    }
}
