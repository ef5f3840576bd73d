use crate::error::GameError;
use rand::prelude::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::{once, repeat};

pub const MIN_PLAYERS: usize = 5;
pub const MAX_PLAYERS: usize = 10;

/// The stable key identifying a player's seat for the lifetime of a match.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A game player.
#[derive(Clone, Debug)]
pub struct Player {
    pub id: SessionId,
    pub nickname: String,
    pub connected: bool,
    pub ready: bool,
    /// `None` until roles are dealt at the start of the game.
    pub role: Option<Role>,
    pub eliminated: bool,
}

#[derive(Clone, Copy, Serialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Liberal,
    Fascist,
    Hitler,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Liberal => "liberal",
            Role::Fascist => "fascist",
            Role::Hitler => "hitler",
        })
    }
}

impl Player {
    pub fn new(id: SessionId, nickname: String) -> Self {
        Self {
            id,
            nickname,
            connected: true,
            ready: false,
            role: None,
            eliminated: false,
        }
    }

    /// Whether the player may still hold office, vote or be targeted.
    pub fn is_active(&self) -> bool {
        !self.eliminated
    }
}

/// The number of liberals and ordinary fascists for a given player count.
/// There is always exactly one Hitler on top of these.
pub fn role_distribution(num_players: usize) -> Result<(usize, usize), GameError> {
    match num_players {
        0..=4 => Err(GameError::TooFewPlayers),
        5 => Ok((3, 1)),
        6 => Ok((4, 1)),
        7 => Ok((4, 2)),
        8 => Ok((5, 2)),
        9 => Ok((5, 3)),
        10 => Ok((6, 3)),
        _ => Err(GameError::TooManyPlayers),
    }
}

/// Deals a shuffled set of roles, one per seat.
pub fn assign_roles(num_players: usize, rng: &mut impl Rng) -> Result<Vec<Role>, GameError> {
    let (liberals, fascists) = role_distribution(num_players)?;
    let mut roles = repeat(Role::Liberal)
        .take(liberals)
        .chain(repeat(Role::Fascist).take(fascists))
        .chain(once(Role::Hitler))
        .collect::<Vec<_>>();
    roles.shuffle(rng);
    Ok(roles)
}
