use crate::config::ServerConfig;
use crate::session::SessionManager;
use crate::ws::accept_connection;
use anyhow::Context;
use tokio::net::TcpListener;

mod client;
mod config;
mod error;
mod game;
mod session;
mod ws;

// FIXME: Implement TLS support

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::try_init().ok();

    let config = ServerConfig::from_env()?;
    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("could not bind to address {}", addr))?;
    log::info!("Listening on: {}", addr);

    let manager: &'static SessionManager = Box::leak(Box::new(SessionManager::new(config.timings)));

    while let Ok((stream, _)) = listener.accept().await {
        tokio::spawn(accept_connection(stream, manager));
    }
    Ok(())
}
