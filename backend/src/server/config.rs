//! Gateway process configuration.

use std::net::SocketAddr;

use clap::Parser;

/// Command-line configuration for the HTTP gateway process.
#[derive(Debug, Clone, Parser)]
#[command(name = "roster-backend", about = "User directory HTTP/JSON gateway")]
pub struct ServerConfig {
    /// Socket address the HTTP server binds to.
    #[arg(long, default_value = "0.0.0.0:8080")]
    pub bind_addr: SocketAddr,
}
