use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;
use std::path::{Path, PathBuf};

/// Default Zube API base URL used when `ZUBE_API_BASE_URL` is not set.
pub const DEFAULT_API_BASE_URL: &str = "https://zube.io/api/";

/// Default path of the PEM encoded API key downloaded from Zube.
pub const DEFAULT_KEY_FILE: &str = "zube_api_key.pem";

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// The Zube API client id. Takes precedence over `--client-id` when given.
    #[arg(value_name = "CLIENT_ID")]
    client_id_arg: Option<String>,

    /// The Zube API client id the private key was issued for.
    #[arg(short, long, env = "ZUBE_CLIENT_ID")]
    client_id: Option<String>,

    /// Path to the PEM encoded Zube API private key.
    #[arg(short, long, env = "ZUBE_KEY_FILE", default_value = DEFAULT_KEY_FILE)]
    key_file: PathBuf,

    /// Disable every enabled email notification channel.
    #[arg(short = 'E', long, default_value_t = false)]
    pub disable_email: bool,

    /// Disable every enabled in-app notification channel.
    #[arg(short = 'I', long, default_value_t = false)]
    pub disable_in_app: bool,

    /// Enable debugging output (requests and response bodies).
    #[arg(short = 'D', long, default_value_t = false)]
    pub debug: bool,

    /// The base URL of the Zube API.
    /// Override in tests to point at a mock server.
    #[arg(long, env = "ZUBE_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    api_base_url: String,

    /// Seconds an exchanged access token is treated as valid.
    #[arg(long, env, default_value_t = 60)]
    pub access_token_ttl_secs: i64,

    /// Timeout in seconds for a single API request.
    #[arg(long, env, default_value_t = 30)]
    pub http_timeout_secs: u64,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    /// Returns the client id, preferring the positional argument over the flag.
    pub fn client_id(&self) -> Option<&str> {
        self.client_id_arg
            .as_deref()
            .or(self.client_id.as_deref())
            .filter(|id| !id.trim().is_empty())
    }

    pub fn key_file(&self) -> &Path {
        &self.key_file
    }

    /// Returns the API base URL, always ending in a slash so relative paths join onto it.
    pub fn api_base_url(&self) -> String {
        if self.api_base_url.ends_with('/') {
            self.api_base_url.clone()
        } else {
            format!("{}/", self.api_base_url)
        }
    }

    /// The level to log at: the configured filter, raised to DEBUG by `--debug`.
    pub fn effective_log_level(&self) -> LevelFilter {
        if self.debug {
            self.log_level_filter.max(LevelFilter::Debug)
        } else {
            self.log_level_filter
        }
    }
}
