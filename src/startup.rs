use crate::{
    configuration::{Settings, Timeouts},
    domain::ResultRecord,
    error::ScrapeError,
    services::{ContactScraper, Droid, Extractor, Pager, SessionManager, SessionStore},
};

/// Connects to the webdriver and wires up a scraper for the configured account.
pub async fn launch(settings: &Settings) -> Result<ContactScraper<Droid>, ScrapeError> {
    let timeouts = Timeouts::from(&settings.scraper.timeouts);
    let selectors = settings.selectors.clone();

    // Everything fallible that does not need a browser goes first, so a bad
    // catalog never leaves a webdriver session behind.
    let extractor = Extractor::new(&selectors)?;
    let pager = Pager::new(selectors.clone(), timeouts);
    let session_manager = SessionManager::new(
        SessionStore::new(&settings.scraper.session_dir),
        settings.account.clone(),
        &settings.scraper.search_url,
        &settings.scraper.login_url,
        selectors,
        timeouts,
    );

    let droid = Droid::new(&settings.webdriver, timeouts.poll).await?;

    Ok(ContactScraper::new(droid, session_manager, pager, extractor))
}

/// Runs one search in a browser that is always shut down before returning.
pub async fn run_search(
    settings: &Settings,
    name: &str,
    page_budget: usize,
) -> Result<Vec<ResultRecord>, ScrapeError> {
    let scraper = launch(settings).await?;

    let records = scraper.search(name, page_budget).await;

    if let Err(e) = scraper.quit().await {
        log::warn!("Failed to close webdriver session: {}", e);
    }

    Ok(records)
}
