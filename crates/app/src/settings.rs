//! Application settings.
//!
//! Sources, later ones winning: `config/expense_tracker.toml` (or the file
//! given with `--config`), `EXPENSE_TRACKER_*` environment variables with
//! `__` between section and key (`EXPENSE_TRACKER_SERVER__PORT=8080`), then
//! command line flags.

use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "config/expense_tracker.toml";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: String,
    pub port: u16,
    /// IANA name used to compute "today".
    pub timezone: String,
    /// `YYYY-MM-DD`; pins "today" to a date, for demos on the mock data.
    pub fixed_date: Option<String>,
    /// JSON file of expenses. The built-in mock data is used when unset.
    pub dataset: Option<String>,
    pub protected_paths: Vec<String>,
    /// Login page; never guarded, even when `/` is protected.
    pub login_path: String,
    /// Where a logged-in visitor of the login page is sent.
    pub landing_path: String,
    /// Cookie lifetime, `1..=400` days.
    pub token_ttl_days: i64,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 3000,
            timezone: "UTC".to_string(),
            fixed_date: None,
            dataset: None,
            protected_paths: server::PROTECTED_PATHS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            login_path: server::LOGIN_PATH.to_string(),
            landing_path: server::LANDING_PATH.to_string(),
            token_ttl_days: server::session::DEFAULT_TTL_DAYS,
        }
    }
}

fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//")
}

impl Server {
    fn validate(&self) -> Result<(), ConfigError> {
        let login = self.login_path.as_str();
        if !is_local_path(login)
            || login == "/"
            || login.contains(['{', '}', '*'])
            || server::PAGE_PATHS.iter().any(|page| *page == login)
        {
            return Err(ConfigError::Message(format!(
                "server.login_path \"{login}\" must be a free local path"
            )));
        }
        if !is_local_path(&self.landing_path) {
            return Err(ConfigError::Message(format!(
                "server.landing_path \"{}\" must be a local path",
                self.landing_path
            )));
        }
        let max_ttl = server::session::MAX_TTL_DAYS;
        if !(1..=max_ttl).contains(&self.token_ttl_days) {
            return Err(ConfigError::Message(format!(
                "server.token_ttl_days must be between 1 and {max_ttl}, got {}",
                self.token_ttl_days
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Auth {
    pub base_url: String,
}

impl Default for Auth {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub auth: Auth,
}

#[derive(Debug, Parser)]
#[command(name = "expense_tracker", version)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long, env = "EXPENSE_TRACKER_CONFIG")]
    config: Option<String>,
    /// Override the bind address.
    #[arg(long)]
    bind: Option<String>,
    /// Override the listening port.
    #[arg(long)]
    port: Option<u16>,
    /// Override the authentication backend URL.
    #[arg(long)]
    auth_url: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_args(Args::parse())
    }

    fn from_args(args: Args) -> Result<Self, ConfigError> {
        let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
        let mut settings: Settings = Config::builder()
            .add_source(File::with_name(config_path).required(false))
            .add_source(
                Environment::with_prefix("EXPENSE_TRACKER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.protected_paths"),
            )
            .build()?
            .try_deserialize()?;

        if let Some(bind) = args.bind {
            settings.server.bind = bind;
        }
        if let Some(port) = args.port {
            settings.server.port = port;
        }
        if let Some(auth_url) = args.auth_url {
            settings.auth.base_url = auth_url;
        }

        settings.server.validate()?;
        Ok(settings)
    }
}
