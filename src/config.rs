//! read configuration from a file or the environment

use std::time::Duration;

use serde::Deserialize;

use crate::errors::Error;
use crate::push::{JitterStrategy, ReconnectPlan};

pub enum ConfigLocation {
    File(String),
    Env,
}

/// User-facing wording for the failure and login notifications.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub generic: String,
    pub network: String,
    pub session_expired: String,
    pub login_success: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            generic: "Something went wrong, please try again".to_string(),
            network: "Cannot reach the server, please check your connection".to_string(),
            session_expired: "Your session has expired, please log in again".to_string(),
            login_success: "Logged in".to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ReconnectSettings {
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    pub multiplier: f32,
    pub max_delay_ms: u64,
    pub jitter: String,
}

impl Default for ReconnectSettings {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            initial_delay_ms: 1_000,
            multiplier: 2.0,
            max_delay_ms: 30_000,
            jitter: "full".to_string(),
        }
    }
}

impl ReconnectSettings {
    pub fn plan(&self) -> Result<ReconnectPlan, Error> {
        let jitter: JitterStrategy = self.jitter.parse()?;
        ReconnectPlan::new(
            self.max_attempts,
            Duration::from_millis(self.initial_delay_ms),
            self.multiplier,
            Duration::from_millis(self.max_delay_ms),
            jitter,
        )
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub base_url: String,
    #[serde(default)]
    pub push_url: Option<String>,
    #[serde(default)]
    pub session_path: Option<String>,
    #[serde(default = "default_login_route")]
    pub login_route: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_true")]
    pub promote_embedded_failures: bool,
    #[serde(default)]
    pub messages: Messages,
    #[serde(default)]
    pub reconnect: ReconnectSettings,
}

fn default_login_route() -> String {
    "/".to_string()
}

fn default_user_agent() -> String {
    format!("shrimp-farm-client/{}", env!("CARGO_PKG_VERSION"))
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Programmatic configuration with defaults for everything but the API base.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            push_url: None,
            session_path: None,
            login_route: default_login_route(),
            user_agent: default_user_agent(),
            promote_embedded_failures: true,
            messages: Messages::default(),
            reconnect: ReconnectSettings::default(),
        }
    }

    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        config.validated()
    }

    /// # ENV Vars
    /// * `FARM_API_BASE_URL` - base address of the REST backend (required)
    /// * `FARM_PUSH_URL` - push-notification endpoint
    /// * `FARM_SESSION_PATH` - file used to persist the session credential
    /// * `FARM_LOGIN_ROUTE` - route to navigate to when the session expires
    pub fn from_env() -> Result<Self, Error> {
        let base_url = std::env::var("FARM_API_BASE_URL")
            .map_err(|_| Error::Config("Missing FARM_API_BASE_URL env var".to_string()))?;
        let mut config = Config::new(base_url);
        config.push_url = std::env::var("FARM_PUSH_URL").ok();
        config.session_path = std::env::var("FARM_SESSION_PATH").ok();
        if let Ok(route) = std::env::var("FARM_LOGIN_ROUTE") {
            config.login_route = route;
        }
        config.validated()
    }

    pub fn with_push_url(mut self, url: impl Into<String>) -> Self {
        self.push_url = Some(url.into());
        self
    }

    pub fn with_session_path(mut self, path: impl Into<String>) -> Self {
        self.session_path = Some(path.into());
        self
    }

    /// Checks the URLs parse before anything touches the network.
    pub fn validated(self) -> Result<Self, Error> {
        reqwest::Url::parse(&self.base_url).map_err(|e| {
            Error::Config(format!("Invalid API base URL '{}': {}", self.base_url, e))
        })?;
        if let Some(push_url) = &self.push_url {
            reqwest::Url::parse(push_url).map_err(|e| {
                Error::Config(format!("Invalid push URL '{}': {}", push_url, e))
            })?;
        }
        if !self.login_route.starts_with('/') {
            return Err(Error::Config(format!(
                "Login route must be an absolute path, got '{}'",
                self.login_route
            )));
        }
        self.reconnect.plan()?;
        Ok(self)
    }
}

pub fn read_config(loc: ConfigLocation) -> Result<Config, Error> {
    match loc {
        ConfigLocation::File(path) => Config::from_file(path),
        ConfigLocation::Env => Config::from_env(),
    }
}
