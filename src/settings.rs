use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use std::{env, fmt, path::PathBuf, str::FromStr, time::Duration};
use url::Url;

use crate::constants::DEFAULT_DISPOSABLE_DOMAINS;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    /// Use `X-Forwarded-For` / `X-Real-IP` as the rate-limit origin.
    #[serde(default)]
    pub trust_forwarded_headers: bool,

    #[serde(default = "default_messages_file")]
    pub messages_file: PathBuf,

    #[serde(default = "default_rate_limit_max")]
    pub rate_limit_max_requests: u32,

    #[serde(default = "default_rate_limit_window")]
    pub rate_limit_window_secs: u64,

    #[serde(default = "default_disposable_domains")]
    pub disposable_domains: Vec<String>,

    #[serde(default)]
    pub admin_token: Option<String>,

    #[serde(default)]
    pub email_api_key: Option<String>,

    #[serde(default = "default_email_api_url")]
    pub email_api_url: Url,

    #[serde(default)]
    pub email_from: String,

    #[serde(default)]
    pub email_to: String,

    #[serde(default = "default_email_timeout")]
    pub email_timeout_secs: u64,

    /// Fail submissions with 500 when no relay is configured.
    #[serde(default)]
    pub require_delivery: bool,

    #[serde(default = "default_site_url")]
    pub site_url: String,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Portfolio-Contact".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_messages_file() -> PathBuf {
    PathBuf::from("messages.json")
}
fn default_rate_limit_max() -> u32 {
    3
}
fn default_rate_limit_window() -> u64 {
    60
}
fn default_disposable_domains() -> Vec<String> {
    DEFAULT_DISPOSABLE_DOMAINS.iter().map(|d| d.to_string()).collect()
}
fn default_email_api_url() -> Url {
    Url::parse("https://api.resend.com").expect("static URL is valid")
}
fn default_email_timeout() -> u64 {
    10
}
fn default_site_url() -> String {
    "http://localhost:3000".to_string()
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name)).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors_allowed_origins")
                    .with_list_parse_key("disposable_domains"),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        config.validate()?;
        Ok(config)
    }

    /// Defaults for every key, in the given environment. Used by tests and as
    /// a base for programmatic setups.
    pub fn with_env(env: AppEnvironment) -> Self {
        AppConfig {
            env,
            name: default_name(),
            port: default_port(),
            host: default_host(),
            worker_count: default_worker_count(),
            cors_allowed_origins: default_cors_origins(),
            trust_forwarded_headers: false,
            messages_file: default_messages_file(),
            rate_limit_max_requests: default_rate_limit_max(),
            rate_limit_window_secs: default_rate_limit_window(),
            disposable_domains: default_disposable_domains(),
            admin_token: None,
            email_api_key: None,
            email_api_url: default_email_api_url(),
            email_from: String::new(),
            email_to: String::new(),
            email_timeout_secs: default_email_timeout(),
            require_delivery: false,
            site_url: default_site_url(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.rate_limit_max_requests == 0 {
            errors.push("RATE_LIMIT_MAX_REQUESTS must be at least 1");
        }
        if self.rate_limit_window_secs == 0 {
            errors.push("RATE_LIMIT_WINDOW_SECS must be at least 1");
        }
        if self.messages_file.as_os_str().is_empty() {
            errors.push("MESSAGES_FILE cannot be empty");
        }
        if self.email_relay_enabled() {
            if self.email_from.trim().is_empty() {
                errors.push("EMAIL_FROM must be set when EMAIL_API_KEY is set");
            }
            if self.email_to.trim().is_empty() {
                errors.push("EMAIL_TO must be set when EMAIL_API_KEY is set");
            }
        }
        if self.is_production() {
            if self.cors_origins().iter().any(|o| o == "*") {
                errors.push("Wildcard CORS (*) is not allowed in production");
            }
            if self.admin_token.as_deref().is_none_or(|t| t.len() < 16) {
                errors.push("ADMIN_TOKEN must be at least 16 characters in production");
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn is_development(&self) -> bool {
        self.env == AppEnvironment::Development
    }

    pub fn email_relay_enabled(&self) -> bool {
        self.email_api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.is_empty() {
            "[MISSING]"
        } else if self.len() < 16 {
            "[TOO_SHORT]"
        } else {
            "[REDACTED]"
        }
    }
}

impl Redact for Option<String> {
    fn redact(&self) -> &str {
        match self {
            Some(secret) => secret.as_str().redact(),
            None => "[NOT_SET]",
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("trust_forwarded_headers", &self.trust_forwarded_headers)
            .field("messages_file", &self.messages_file)
            .field("rate_limit_max_requests", &self.rate_limit_max_requests)
            .field("rate_limit_window_secs", &self.rate_limit_window_secs)
            .field("disposable_domains", &self.disposable_domains.len())
            .field("admin_token", &self.admin_token.redact())
            .field("email_api_key", &self.email_api_key.redact())
            .field("email_api_url", &self.email_api_url.as_str())
            .field("email_from", &self.email_from)
            .field("email_to", &self.email_to)
            .field("email_timeout_secs", &self.email_timeout_secs)
            .field("require_delivery", &self.require_delivery)
            .field("site_url", &self.site_url)
            .finish()
    }
}
