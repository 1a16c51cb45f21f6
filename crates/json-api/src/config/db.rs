//! Database Config

use clap::Args;

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `SQLite` connection string; the file is created when missing
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://products.db")]
    pub database_url: String,

    /// Maximum pooled connections to the store
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 5_u32)]
    pub database_max_connections: u32,
}
