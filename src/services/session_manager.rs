use tokio::time::{sleep, Instant};
use url::Url;

use crate::{
    configuration::{AccountSettings, Timeouts},
    domain::{SelectorCatalog, Session, SessionStatus},
    error::ScrapeError,
    services::{Browser, SessionStore},
};

/// Keeps the browser logged in, reusing saved cookies when they still work.
pub struct SessionManager {
    store: SessionStore,
    account: AccountSettings,
    search_url: String,
    login_url: String,
    selectors: SelectorCatalog,
    timeouts: Timeouts,
}

impl SessionManager {
    pub fn new(
        store: SessionStore,
        account: AccountSettings,
        search_url: &str,
        login_url: &str,
        selectors: SelectorCatalog,
        timeouts: Timeouts,
    ) -> Self {
        SessionManager {
            store,
            account,
            search_url: search_url.to_string(),
            login_url: login_url.to_string(),
            selectors,
            timeouts,
        }
    }

    pub async fn ensure_session<B: Browser>(
        &self,
        browser: &B,
    ) -> Result<SessionStatus, ScrapeError> {
        browser.navigate(&self.search_url).await?;

        match self.load_session() {
            Some(session) => {
                self.inject(browser, session).await;
                browser.navigate(&self.search_url).await?;

                if !self.on_login_page(browser).await? {
                    log::info!("Resumed saved session for {}", self.account.email);
                    return Ok(SessionStatus::Resumed);
                }
                log::info!("Saved session for {} has expired", self.account.email);
            }
            None => log::info!("No saved session for {}", self.account.email),
        }

        self.login(browser).await?;
        browser.navigate(&self.search_url).await?;

        Ok(SessionStatus::FreshlyAuthenticated)
    }

    fn load_session(&self) -> Option<Session> {
        match self.store.load(&self.account.email) {
            Ok(session) => session,
            Err(e) => {
                log::warn!(
                    "Ignoring unreadable session file {}: {}",
                    self.store.path_for(&self.account.email).display(),
                    e
                );
                None
            }
        }
    }

    async fn inject<B: Browser>(&self, browser: &B, session: Session) {
        for cookie in session.cookies {
            let name = cookie.name.clone();
            if let Err(e) = browser.add_cookie(cookie).await {
                log::warn!("Could not restore cookie {}: {}", name, e);
            }
        }
    }

    async fn login<B: Browser>(&self, browser: &B) -> Result<(), ScrapeError> {
        log::info!("Logging in...");

        self.submit_credentials(browser).await.map_err(|e| match e {
            ScrapeError::Authentication(_) => e,
            other => ScrapeError::Authentication(other.to_string()),
        })?;

        let session = Session {
            cookies: browser.cookies().await?,
        };
        // A failed write only costs a login on the next run.
        if let Err(e) = self.store.save(&self.account.email, &session) {
            log::warn!("Failed to persist session for {}: {}", self.account.email, e);
        }

        Ok(())
    }

    async fn submit_credentials<B: Browser>(&self, browser: &B) -> Result<(), ScrapeError> {
        let s = &self.selectors;

        browser
            .wait_for_clickable(&s.email_input, self.timeouts.login)
            .await?;
        browser.send_keys(&s.email_input, &self.account.email).await?;
        browser
            .send_keys(&s.password_input, &self.account.password)
            .await?;
        browser.script_click(&s.submit_button).await?;

        let deadline = Instant::now() + self.timeouts.login;
        while self.on_login_page(browser).await? {
            if Instant::now() >= deadline {
                return Err(ScrapeError::Authentication(
                    "still on the login page after submitting credentials".to_string(),
                ));
            }
            sleep(self.timeouts.poll).await;
        }

        Ok(())
    }

    async fn on_login_page<B: Browser>(&self, browser: &B) -> Result<bool, ScrapeError> {
        let current = browser.current_url().await?;
        Ok(same_page(&current, &self.login_url))
    }
}

/// Compares host and path only; the site appends tracking queries to redirects.
fn same_page(current: &str, expected: &str) -> bool {
    match (Url::parse(current), Url::parse(expected)) {
        (Ok(current), Ok(expected)) => {
            current.host_str() == expected.host_str()
                && current.path().trim_end_matches('/') == expected.path().trim_end_matches('/')
        }
        _ => current == expected,
    }
}
