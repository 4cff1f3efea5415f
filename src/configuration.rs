use std::{path::PathBuf, time::Duration};

use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::domain::{SelectorCatalog, DEFAULT_PAGE_BUDGET};

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub webdriver: WebDriverSettings,
    pub account: AccountSettings,
    pub scraper: ScraperSettings,
    #[serde(default)]
    pub selectors: SelectorCatalog,
}

#[derive(Deserialize, Clone)]
pub struct WebDriverSettings {
    pub server_url: String,
    pub headless: bool,
    /// Empty means pick a random desktop Chrome user agent.
    #[serde(default)]
    pub user_agent: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub window_width: u32,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub window_height: u32,
}

#[derive(Deserialize, Clone)]
pub struct AccountSettings {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Clone)]
pub struct ScraperSettings {
    pub search_url: String,
    pub login_url: String,
    pub session_dir: PathBuf,
    #[serde(
        default = "default_page_budget",
        deserialize_with = "deserialize_number_from_string"
    )]
    pub default_page_budget: usize,
    pub timeouts: TimeoutSettings,
}

fn default_page_budget() -> usize {
    DEFAULT_PAGE_BUDGET
}

#[derive(Deserialize, Clone)]
pub struct TimeoutSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub login_secs: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub search_secs: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub next_page_secs: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub settle_millis: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub poll_millis: u64,
}

/// Bounded waits used while driving the site.
#[derive(Debug, Clone, Copy)]
pub struct Timeouts {
    pub login: Duration,
    pub search: Duration,
    pub next_page: Duration,
    pub settle: Duration,
    pub poll: Duration,
}

impl From<&TimeoutSettings> for Timeouts {
    fn from(settings: &TimeoutSettings) -> Self {
        Timeouts {
            login: Duration::from_secs(settings.login_secs),
            search: Duration::from_secs(settings.search_secs),
            next_page: Duration::from_secs(settings.next_page_secs),
            settle: Duration::from_millis(settings.settle_millis),
            poll: Duration::from_millis(settings.poll_millis),
        }
    }
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Message(format!("no current directory: {e}")))?;
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(
            configuration_directory.join("base.yaml"),
        ))
        .add_source(
            config::File::from(configuration_directory.join(environment_filename))
                .required(false),
        )
        // APP_ACCOUNT__PASSWORD=... sets Settings.account.password
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
