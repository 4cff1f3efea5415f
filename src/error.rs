use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("timed out after {after:?} waiting for {what}")]
    NavigationTimeout { what: String, after: Duration },

    #[error("invalid search query: {0}")]
    InvalidQuery(String),

    #[error("selector for `{field}` does not parse: {selector}")]
    InvalidSelector { field: &'static str, selector: String },

    #[error("webdriver error: {0}")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),

    #[error("session file error: {0}")]
    SessionStore(#[from] std::io::Error),

    #[error("session file is not valid json: {0}")]
    SessionFormat(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Configuration(#[from] config::ConfigError),
}

impl ScrapeError {
    pub fn timeout(what: impl Into<String>, after: Duration) -> Self {
        ScrapeError::NavigationTimeout {
            what: what.into(),
            after,
        }
    }
}
