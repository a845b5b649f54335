//! Configuration module
//!
//! Layers the optional `config.toml` file, `SERVER`-prefixed environment
//! variables and coded defaults, then applies command-line overrides.

use clap::Parser;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "userdir", about = "Small user directory web service")]
pub struct Cli {
    /// Port for the server
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,

    /// Configuration file name (without extension)
    #[arg(short = 'c', long = "config", default_value = "config")]
    pub config: String,

    /// SQLite database path
    #[arg(long = "db")]
    pub db: Option<String>,
}

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub resources: ResourcesConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub workers: Option<usize>,
}

/// Database configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

/// Page and template file locations
#[derive(Debug, Deserialize, Clone)]
pub struct ResourcesConfig {
    pub static_dir: String,
    pub index_page: String,
    pub register_page: String,
    pub template_dir: String,
    pub users_template: String,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    pub show_headers: bool,
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub max_body_size: u64,
}

impl Config {
    /// Load configuration and apply command-line overrides. The port
    /// given via `-p`/`--port` is the one the listener binds.
    pub fn load(cli: &Cli) -> Result<Self, config::ConfigError> {
        let mut cfg = Self::load_from(&cli.config)?;
        if let Some(port) = cli.port {
            cfg.server.port = port;
        }
        if let Some(ref db) = cli.db {
            cfg.database.path.clone_from(db);
        }
        Ok(cfg)
    }

    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SERVER"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("database.path", "./users.db")?
            .set_default("resources.static_dir", "static")?
            .set_default("resources.index_page", "index.html")?
            .set_default("resources.register_page", "register_user.html")?
            .set_default("resources.template_dir", "templates")?
            .set_default("resources.users_template", "users.html")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.show_headers", false)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    pub fn index_page_path(&self) -> PathBuf {
        Path::new(&self.resources.static_dir).join(&self.resources.index_page)
    }

    pub fn register_page_path(&self) -> PathBuf {
        Path::new(&self.resources.static_dir).join(&self.resources.register_page)
    }

    pub fn users_template_path(&self) -> PathBuf {
        Path::new(&self.resources.template_dir).join(&self.resources.users_template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::load_from("no-such-config-file").unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.database.path, "./users.db");
        assert_eq!(cfg.resources.static_dir, "static");
        assert!(cfg.logging.access_log);
    }

    #[test]
    fn test_port_flag_short_form_is_honored() {
        let cli = Cli::parse_from(["userdir", "-p", "9090"]);
        let cfg = Config::load(&cli).unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(
            cfg.get_socket_addr().unwrap(),
            "127.0.0.1:9090".parse().unwrap()
        );
    }

    #[test]
    fn test_port_flag_long_form_is_honored() {
        let cli = Cli::parse_from(["userdir", "--port", "9091"]);
        let cfg = Config::load(&cli).unwrap();
        assert_eq!(cfg.server.port, 9091);
    }

    #[test]
    fn test_db_flag_overrides_database_path() {
        let cli = Cli::parse_from(["userdir", "--db", "/tmp/other.db"]);
        let cfg = Config::load(&cli).unwrap();
        assert_eq!(cfg.database.path, "/tmp/other.db");
    }

    #[test]
    fn test_resource_paths() {
        let cfg = Config::load_from("no-such-config-file").unwrap();
        assert_eq!(cfg.index_page_path(), Path::new("static/index.html"));
        assert_eq!(
            cfg.register_page_path(),
            Path::new("static/register_user.html")
        );
        assert_eq!(
            cfg.users_template_path(),
            Path::new("templates/users.html")
        );
    }
}
