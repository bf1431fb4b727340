//! Server configuration, read from the command line with environment fallbacks.

use crate::search::ranking::MatchOptions;

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "voter-lookup", about = "Ranked search over a read-only voter register")]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    #[arg(long, env = "VOTER_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// SQLite file holding the `voters` table. Opened read-only.
    #[arg(long, env = "VOTER_DB", default_value = "public/db/voters-list.db")]
    pub database: PathBuf,

    /// Size of the read connection pool.
    #[arg(long, env = "VOTER_DB_CONNECTIONS", default_value_t = 4)]
    pub max_connections: u32,

    /// Match `%` and `_` in queries literally instead of as LIKE wildcards.
    #[arg(long, env = "VOTER_LITERAL_WILDCARDS")]
    pub literal_wildcards: bool,
}

impl ServerConfig {
    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            literal_wildcards: self.literal_wildcards,
        }
    }
}

/// Installs the fmt subscriber. `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
