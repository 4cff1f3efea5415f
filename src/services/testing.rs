//! A scripted stand-in for the browser, plus fixture markup.

use std::{
    sync::{Mutex, MutexGuard},
    time::Duration,
};

use async_trait::async_trait;

use crate::{
    configuration::{AccountSettings, Timeouts},
    domain::{SelectorCatalog, SessionCookie},
    error::ScrapeError,
    services::Browser,
};

pub const SEARCH_URL: &str = "https://contactout.com/search?login=success";
pub const LOGIN_URL: &str = "https://contactout.com/login";
pub const EMAIL: &str = "jane@example.com";
pub const PASSWORD: &str = "hunter2";
pub const SESSION_COOKIE: &str = "contactout_session";
pub const VALID_SESSION: &str = "valid";

pub fn account() -> AccountSettings {
    AccountSettings {
        email: EMAIL.to_string(),
        password: PASSWORD.to_string(),
    }
}

pub fn fast_timeouts() -> Timeouts {
    Timeouts {
        login: Duration::from_millis(50),
        search: Duration::from_millis(50),
        next_page: Duration::from_millis(20),
        settle: Duration::from_millis(1),
        poll: Duration::from_millis(5),
    }
}

pub fn catalog() -> SelectorCatalog {
    SelectorCatalog {
        result_container: "div.result".to_string(),
        result_indicator: "div.result".to_string(),
        load_more: "button.more".to_string(),
        next_page: "button.next".to_string(),
        profile_pic: "img.avatar".to_string(),
        name: "span.name".to_string(),
        location: "div.location".to_string(),
        linkedin_profile_url: "div.socials > a:nth-child(1)".to_string(),
        github_profile_url: "div.socials > a:nth-child(2)".to_string(),
        twitter_profile_url: "div.socials > a:nth-child(3)".to_string(),
        facebook_profile_url: "div.socials > a:nth-child(4)".to_string(),
        snippet_region: "div.snippet".to_string(),
        snippet_line: "div".to_string(),
        ..SelectorCatalog::default()
    }
}

pub fn page(cards: &[String]) -> String {
    format!(
        r#"<html><body><div class="results">{}</div><button class="next">Next</button></body></html>"#,
        cards.concat()
    )
}

pub fn card(name: &str) -> String {
    card_with(name, true, true)
}

pub fn card_without_location(name: &str) -> String {
    card_with(name, false, true)
}

pub fn card_without_snippet(name: &str) -> String {
    card_with(name, true, false)
}

fn card_with(name: &str, location: bool, snippet: bool) -> String {
    let slug = name.to_lowercase().replace(' ', "-");
    let location = match location {
        true => r#"<div class="location"> Berlin, Germany </div>"#,
        false => "",
    };
    let snippet = match snippet {
        true => r#"<div class="snippet"><div>Experience</div><div> Engineer at Acme </div><div>Speaker at RustConf</div></div>"#,
        false => "",
    };

    format!(
        r#"<div class="result">
            <img class="avatar" src="https://img.example/{slug}.png">
            <span class="name"> {name} </span>
            {location}
            <div class="socials"><a href="https://linkedin.com/in/{slug}">in</a><a href="https://github.com/{slug}">gh</a><a href="https://twitter.com/{slug}">tw</a><a href="https://facebook.com/{slug}">fb</a></div>
            {snippet}
        </div>"#
    )
}

/// Browser state the fake mutates and tests inspect.
pub struct FakeState {
    pub url: String,
    pub cookies: Vec<SessionCookie>,
    pub logged_in: bool,
    pub login_form_ready: bool,
    pub accept_login: bool,
    /// Every `(selector, text)` pair typed into the page.
    pub typed: Vec<(String, String)>,
    pub searched: bool,
    pub pages: Vec<String>,
    pub page: usize,
    /// Zero-based attempts of the "next" click that fail.
    pub fail_next_on: Vec<usize>,
    pub next_attempts: usize,
    /// Zero-based attempts of reading the page source that fail.
    pub fail_capture_on: Vec<usize>,
    pub capture_attempts: usize,
    /// One entry per load more button; `false` makes its click fail.
    pub load_more: Vec<bool>,
    pub load_more_clicks: usize,
    /// Zero-based attempts of looking up the load more buttons that fail.
    pub fail_load_more_lookup_on: Vec<usize>,
    pub load_more_lookups: usize,
}

pub struct FakeBrowser {
    catalog: SelectorCatalog,
    state: Mutex<FakeState>,
}

impl FakeBrowser {
    /// A fresh browser with no cookies, facing a working login form.
    pub fn new() -> Self {
        FakeBrowser {
            catalog: catalog(),
            state: Mutex::new(FakeState {
                url: "about:blank".to_string(),
                cookies: vec![],
                logged_in: false,
                login_form_ready: true,
                accept_login: true,
                typed: vec![],
                searched: false,
                pages: vec![],
                page: 0,
                fail_next_on: vec![],
                next_attempts: 0,
                fail_capture_on: vec![],
                capture_attempts: 0,
                load_more: vec![],
                load_more_clicks: 0,
                fail_load_more_lookup_on: vec![],
                load_more_lookups: 0,
            }),
        }
    }

    pub fn with_pages(pages: Vec<String>) -> Self {
        let browser = FakeBrowser::new();
        browser.state().pages = pages;
        browser
    }

    /// Already authenticated and sitting on the search page.
    pub fn logged_in(pages: Vec<String>) -> Self {
        let browser = FakeBrowser::with_pages(pages);
        {
            let mut state = browser.state();
            state.logged_in = true;
            state.url = SEARCH_URL.to_string();
        }
        browser
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }
}

fn has_valid_cookie(state: &FakeState) -> bool {
    state
        .cookies
        .iter()
        .any(|c| c.name == SESSION_COOKIE && c.value == VALID_SESSION)
}

#[async_trait]
impl Browser for FakeBrowser {
    async fn navigate(&self, url: &str) -> Result<(), ScrapeError> {
        let mut state = self.state();
        state.url = match url == SEARCH_URL && !state.logged_in && !has_valid_cookie(&state) {
            true => LOGIN_URL.to_string(),
            false => url.to_string(),
        };
        Ok(())
    }

    async fn current_url(&self) -> Result<String, ScrapeError> {
        Ok(self.state().url.clone())
    }

    async fn wait_for_present(&self, css: &str, timeout: Duration) -> Result<(), ScrapeError> {
        let state = self.state();
        let present = if css == self.catalog.search_input {
            state.url == SEARCH_URL
        } else if css == self.catalog.first_result_indicator() || css == self.catalog.result_indicator {
            state.searched && !state.pages.is_empty()
        } else {
            false
        };

        match present {
            true => Ok(()),
            false => Err(ScrapeError::timeout(css, timeout)),
        }
    }

    async fn wait_for_clickable(&self, css: &str, timeout: Duration) -> Result<(), ScrapeError> {
        let state = self.state();
        match css == self.catalog.email_input && state.url == LOGIN_URL && state.login_form_ready {
            true => Ok(()),
            false => Err(ScrapeError::timeout(css, timeout)),
        }
    }

    async fn send_keys(&self, css: &str, text: &str) -> Result<(), ScrapeError> {
        self.state().typed.push((css.to_string(), text.to_string()));
        Ok(())
    }

    async fn click(&self, css: &str) -> Result<(), ScrapeError> {
        let mut state = self.state();
        if css != self.catalog.next_page {
            return Err(ScrapeError::timeout(css, Duration::ZERO));
        }

        let attempt = state.next_attempts;
        state.next_attempts += 1;
        if state.fail_next_on.contains(&attempt) || state.page + 1 >= state.pages.len() {
            return Err(ScrapeError::timeout("next page", Duration::ZERO));
        }
        state.page += 1;
        Ok(())
    }

    async fn script_click(&self, css: &str) -> Result<(), ScrapeError> {
        let mut state = self.state();
        if css != self.catalog.submit_button {
            return Err(ScrapeError::timeout(css, Duration::ZERO));
        }

        if state.url == LOGIN_URL {
            let typed_email = (self.catalog.email_input.clone(), EMAIL.to_string());
            let typed_password = (self.catalog.password_input.clone(), PASSWORD.to_string());
            if state.accept_login
                && state.typed.contains(&typed_email)
                && state.typed.contains(&typed_password)
            {
                state.logged_in = true;
                state.cookies = vec![SessionCookie::new(SESSION_COOKIE, VALID_SESSION)];
                state.url = SEARCH_URL.to_string();
            }
        } else if state.url == SEARCH_URL {
            state.searched = true;
        }
        Ok(())
    }

    async fn script_click_all(&self, css: &str) -> Result<Vec<Result<(), ScrapeError>>, ScrapeError> {
        let mut state = self.state();
        if css != self.catalog.load_more {
            return Ok(vec![]);
        }

        let attempt = state.load_more_lookups;
        state.load_more_lookups += 1;
        if state.fail_load_more_lookup_on.contains(&attempt) {
            return Err(ScrapeError::timeout("load more buttons", Duration::ZERO));
        }

        let buttons = state.load_more.clone();
        let mut results = vec![];
        for works in buttons {
            match works {
                true => {
                    state.load_more_clicks += 1;
                    results.push(Ok(()));
                }
                false => results.push(Err(ScrapeError::timeout("stale button", Duration::ZERO))),
            }
        }
        Ok(results)
    }

    async fn page_source(&self) -> Result<String, ScrapeError> {
        let mut state = self.state();
        let attempt = state.capture_attempts;
        state.capture_attempts += 1;
        if state.fail_capture_on.contains(&attempt) {
            return Err(ScrapeError::timeout("page source", Duration::ZERO));
        }

        match state.searched {
            true => Ok(state.pages.get(state.page).cloned().unwrap_or_default()),
            false => Ok("<html><body></body></html>".to_string()),
        }
    }

    async fn cookies(&self) -> Result<Vec<SessionCookie>, ScrapeError> {
        Ok(self.state().cookies.clone())
    }

    async fn add_cookie(&self, cookie: SessionCookie) -> Result<(), ScrapeError> {
        self.state().cookies.push(cookie);
        Ok(())
    }

    async fn quit(self) -> Result<(), ScrapeError> {
        Ok(())
    }
}
