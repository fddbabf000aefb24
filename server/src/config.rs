//! Startup configuration, read from flags with environment fallbacks.

use std::path::PathBuf;

use clap::Parser;

use crate::error::StoreError;
use crate::store::SqliteStore;

#[derive(Debug, Clone, Parser)]
#[command(name = "todo-server", version, about = "REST backend for the todo list")]
pub struct Config {
    /// Interface to bind.
    #[arg(long, env = "BIND_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// SQLite database file; `:memory:` keeps everything in RAM.
    #[arg(long, env = "DATABASE_PATH", default_value = "todos.db")]
    pub database: PathBuf,

    /// Emit logs as JSON lines.
    #[arg(long, env = "LOG_JSON")]
    pub log_json: bool,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn open_store(&self) -> Result<SqliteStore, StoreError> {
        SqliteStore::open(&self.database)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::try_parse_from(["todo-server"]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.database, PathBuf::from("todos.db"));
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "todo-server",
            "--port",
            "8080",
            "--host",
            "0.0.0.0",
            "--database",
            ":memory:",
            "--log-json",
        ])
        .unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert!(config.log_json);
        assert!(config.open_store().is_ok());
    }

    #[test]
    fn rejects_non_numeric_port() {
        assert!(Config::try_parse_from(["todo-server", "--port", "http"]).is_err());
    }
}
