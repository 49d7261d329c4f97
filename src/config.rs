use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

pub const ENV_PREFIX: &str = "SHELTER_";

pub const DEFAULT_DOG_API_URL: &str = "https://dog.ceo/api/breeds/image/random";
pub const DEFAULT_SLACK_API_URL: &str = "https://slack.com/api/";

/// Credentials are taken verbatim; `Env` would otherwise read `"007"` as the number 7.
const SECRET_KEYS: &[&str] = &["slack_access_token", "slack_verification_token", "admin_key"];

/// Process configuration, assembled once at startup from `SHELTER_*` variables.
#[derive(Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,
    #[serde(default = "default_db_connect_timeout_secs")]
    pub db_connect_timeout_secs: u64,

    pub slack_access_token: String,
    #[serde(default)]
    pub slack_verification_token: Option<String>,
    pub slack_api_url: Url,

    pub dog_api_url: Url,

    #[serde(default)]
    pub admin_key: Option<String>,
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    #[serde(default = "default_dispatch_concurrency")]
    pub dispatch_concurrency: usize,
    #[serde(default = "default_event_queue_capacity")]
    pub event_queue_capacity: usize,

    #[serde(default = "default_loglevel")]
    pub loglevel: String,
    #[serde(default)]
    pub proxy: Option<Url>,
}

/// Connection settings for the record store.
#[derive(Debug, Clone)]
pub struct ShelterConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub connect_timeout: Duration,
}

impl Config {
    pub fn figment() -> Figment {
        let env = Env::prefixed(ENV_PREFIX);
        let base = Figment::new()
            .merge(Serialized::default("slack_api_url", DEFAULT_SLACK_API_URL))
            .merge(Serialized::default("dog_api_url", DEFAULT_DOG_API_URL))
            .merge(env.clone());
        env.only(SECRET_KEYS)
            .iter()
            .fold(base, |figment, (key, value)| {
                figment.merge(Serialized::default(key.as_str(), value))
            })
    }

    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    pub fn shelter(&self) -> ShelterConfig {
        ShelterConfig {
            database_url: self.database_url.clone(),
            max_connections: self.db_max_connections.max(1),
            connect_timeout: Duration::from_secs(self.db_connect_timeout_secs),
        }
    }
}

fn default_database_url() -> String {
    "sqlite://shelter.sqlite".to_string()
}

fn default_db_max_connections() -> u32 {
    8
}

fn default_db_connect_timeout_secs() -> u64 {
    60
}

fn default_listen_addr() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_dispatch_concurrency() -> usize {
    32
}

fn default_event_queue_capacity() -> usize {
    256
}

fn default_loglevel() -> String {
    "info".to_string()
}
