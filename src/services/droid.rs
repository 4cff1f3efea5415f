use std::time::Duration;

use async_trait::async_trait;
use thirtyfour::{prelude::*, ChromiumLikeCapabilities, Cookie};

use crate::{configuration::WebDriverSettings, domain::SessionCookie, error::ScrapeError};

const SCRIPT_CLICK: &str = "arguments[0].click();";

/// The handful of browser capabilities the scraper relies on.
///
/// Every call acts on one browsing context. Callers never issue two calls
/// against the same context at once.
#[async_trait]
pub trait Browser: Send + Sync {
    async fn navigate(&self, url: &str) -> Result<(), ScrapeError>;
    async fn current_url(&self) -> Result<String, ScrapeError>;

    /// Fails with `ScrapeError::NavigationTimeout` if `css` never matches.
    async fn wait_for_present(&self, css: &str, timeout: Duration) -> Result<(), ScrapeError>;
    async fn wait_for_clickable(&self, css: &str, timeout: Duration) -> Result<(), ScrapeError>;

    async fn send_keys(&self, css: &str, text: &str) -> Result<(), ScrapeError>;
    async fn click(&self, css: &str) -> Result<(), ScrapeError>;
    /// Clicks through javascript, which ignores overlays covering the element.
    async fn script_click(&self, css: &str) -> Result<(), ScrapeError>;
    /// Script-clicks every element matching `css`, one result per element.
    async fn script_click_all(&self, css: &str) -> Result<Vec<Result<(), ScrapeError>>, ScrapeError>;

    async fn page_source(&self) -> Result<String, ScrapeError>;
    async fn cookies(&self) -> Result<Vec<SessionCookie>, ScrapeError>;
    async fn add_cookie(&self, cookie: SessionCookie) -> Result<(), ScrapeError>;

    async fn quit(self) -> Result<(), ScrapeError>
    where
        Self: Sized;
}

pub struct Droid {
    pub driver: WebDriver,
    poll: Duration,
}

impl Droid {
    pub async fn new(settings: &WebDriverSettings, poll: Duration) -> Result<Self, ScrapeError> {
        let mut caps = DesiredCapabilities::chrome();

        if settings.headless {
            caps.set_headless()?;
            caps.set_disable_gpu()?;
        }
        caps.set_no_sandbox()?;
        caps.set_disable_dev_shm_usage()?;

        let user_agent = match settings.user_agent.as_str() {
            "" => fake_user_agent::get_chrome_rua().to_string(),
            ua => ua.to_string(),
        };
        caps.add_arg(&format!("--user-agent={}", user_agent))?;
        caps.add_arg(&format!(
            "--window-size={},{}",
            settings.window_width, settings.window_height
        ))?;

        let driver = WebDriver::new(&settings.server_url, caps).await?;
        log::info!("Connected to webdriver at {}", settings.server_url);

        Ok(Droid { driver, poll })
    }

    async fn click_element(&self, element: WebElement) -> Result<(), ScrapeError> {
        self.driver
            .execute(SCRIPT_CLICK, vec![element.to_json()?])
            .await?;
        Ok(())
    }
}

#[async_trait]
impl Browser for Droid {
    async fn navigate(&self, url: &str) -> Result<(), ScrapeError> {
        self.driver.goto(url).await?;
        Ok(())
    }

    async fn current_url(&self) -> Result<String, ScrapeError> {
        Ok(self.driver.current_url().await?.to_string())
    }

    async fn wait_for_present(&self, css: &str, timeout: Duration) -> Result<(), ScrapeError> {
        self.driver
            .query(By::Css(css))
            .wait(timeout, self.poll)
            .first()
            .await
            .map(|_| ())
            .map_err(|e| {
                log::debug!("Waiting for {} failed: {:?}", css, e);
                ScrapeError::timeout(css, timeout)
            })
    }

    async fn wait_for_clickable(&self, css: &str, timeout: Duration) -> Result<(), ScrapeError> {
        self.driver
            .query(By::Css(css))
            .and_clickable()
            .wait(timeout, self.poll)
            .first()
            .await
            .map(|_| ())
            .map_err(|e| {
                log::debug!("Waiting for clickable {} failed: {:?}", css, e);
                ScrapeError::timeout(format!("clickable {}", css), timeout)
            })
    }

    async fn send_keys(&self, css: &str, text: &str) -> Result<(), ScrapeError> {
        self.driver.find(By::Css(css)).await?.send_keys(text).await?;
        Ok(())
    }

    async fn click(&self, css: &str) -> Result<(), ScrapeError> {
        self.driver.find(By::Css(css)).await?.click().await?;
        Ok(())
    }

    async fn script_click(&self, css: &str) -> Result<(), ScrapeError> {
        let element = self.driver.find(By::Css(css)).await?;
        self.click_element(element).await
    }

    async fn script_click_all(&self, css: &str) -> Result<Vec<Result<(), ScrapeError>>, ScrapeError> {
        let mut results = vec![];
        for element in self.driver.find_all(By::Css(css)).await? {
            results.push(self.click_element(element).await);
        }
        Ok(results)
    }

    async fn page_source(&self) -> Result<String, ScrapeError> {
        Ok(self.driver.source().await?)
    }

    async fn cookies(&self) -> Result<Vec<SessionCookie>, ScrapeError> {
        self.driver
            .get_all_cookies()
            .await?
            .iter()
            .map(from_driver_cookie)
            .collect()
    }

    async fn add_cookie(&self, cookie: SessionCookie) -> Result<(), ScrapeError> {
        self.driver.add_cookie(to_driver_cookie(&cookie)?).await?;
        Ok(())
    }

    async fn quit(self) -> Result<(), ScrapeError> {
        self.driver.quit().await?;
        Ok(())
    }
}

// Both types speak the W3C cookie JSON, so serde does the field mapping.
fn from_driver_cookie(cookie: &Cookie) -> Result<SessionCookie, ScrapeError> {
    Ok(serde_json::from_value(serde_json::to_value(cookie)?)?)
}

fn to_driver_cookie(cookie: &SessionCookie) -> Result<Cookie, ScrapeError> {
    Ok(serde_json::from_value(serde_json::to_value(cookie)?)?)
}
