use tokio::time::sleep;

use crate::{
    configuration::Timeouts,
    domain::{PageOutcome, PageSnapshot, PageStep, SearchQuery, SelectorCatalog},
    error::ScrapeError,
    services::Browser,
};

#[derive(Debug, Default)]
pub struct PagedResults {
    pub snapshots: Vec<PageSnapshot>,
    pub outcomes: Vec<PageOutcome>,
}

/// Runs one search and walks its result pages.
pub struct Pager {
    selectors: SelectorCatalog,
    timeouts: Timeouts,
}

impl Pager {
    pub fn new(selectors: SelectorCatalog, timeouts: Timeouts) -> Self {
        Pager {
            selectors,
            timeouts,
        }
    }

    /// Returns at most `query.page_budget()` snapshots. A failure on one page
    /// is recorded in that page's outcome and the walk carries on, so fewer
    /// (or repeated) pages can come back.
    pub async fn collect_pages<B: Browser>(
        &self,
        browser: &B,
        query: &SearchQuery,
    ) -> Result<PagedResults, ScrapeError> {
        self.submit(browser, query).await?;

        log::info!("Scraping pages...");
        let mut results = PagedResults::default();

        for index in 0..query.page_budget() {
            let (outcome, snapshot) = self.work_page(browser, query, index).await;
            if let Some(snapshot) = snapshot {
                results.snapshots.push(snapshot);
            }
            results.outcomes.push(outcome);
        }

        log::info!(
            "Finished scraping pages: {} of {} captured",
            results.snapshots.len(),
            query.page_budget()
        );
        Ok(results)
    }

    async fn submit<B: Browser>(&self, browser: &B, query: &SearchQuery) -> Result<(), ScrapeError> {
        let s = &self.selectors;
        log::info!("Searching for {}...", query.name());

        browser
            .wait_for_present(&s.search_input, self.timeouts.search)
            .await?;
        // The search box is rendered before its handlers are attached.
        sleep(self.timeouts.settle).await;

        browser.send_keys(&s.search_input, query.name()).await?;
        browser.script_click(&s.submit_button).await?;
        browser
            .wait_for_present(s.first_result_indicator(), self.timeouts.search)
            .await
    }

    async fn work_page<B: Browser>(
        &self,
        browser: &B,
        query: &SearchQuery,
        index: usize,
    ) -> (PageOutcome, Option<PageSnapshot>) {
        let page_number = index + 1;
        let mut outcome = PageOutcome::new(page_number);

        if let Err(e) = self.expand(browser, &mut outcome).await {
            log::warn!("Error occurred while scraping page {}: {}", page_number, e);
            outcome.failed(PageStep::Expand, e);
            return (outcome, None);
        }

        let page_source = match browser.page_source().await {
            Ok(page_source) => page_source,
            Err(e) => {
                log::warn!("Error occurred while scraping page {}: {}", page_number, e);
                outcome.failed(PageStep::Capture, e);
                return (outcome, None);
            }
        };
        outcome.done(PageStep::Capture);
        log::info!("Scraped page {}", page_number);

        if !query.is_last_page(index) {
            match self.advance(browser).await {
                Ok(()) => outcome.done(PageStep::Advance),
                Err(e) => {
                    log::warn!("Error occurred while leaving page {}: {}", page_number, e);
                    outcome.failed(PageStep::Advance, e);
                }
            }
        }

        let snapshot = PageSnapshot {
            page_number,
            page_source,
        };
        (outcome, Some(snapshot))
    }

    /// Opens every collapsed card. Only failing to look the buttons up is an
    /// error; individual clicks may fail once a card has already expanded.
    async fn expand<B: Browser>(
        &self,
        browser: &B,
        outcome: &mut PageOutcome,
    ) -> Result<(), ScrapeError> {
        for click in browser.script_click_all(&self.selectors.load_more).await? {
            match click {
                Ok(()) => outcome.done(PageStep::Expand),
                Err(e) => {
                    log::debug!("Skipping load more button: {}", e);
                    outcome.failed(PageStep::Expand, e);
                }
            }
        }
        Ok(())
    }

    async fn advance<B: Browser>(&self, browser: &B) -> Result<(), ScrapeError> {
        browser.click(&self.selectors.next_page).await?;
        browser
            .wait_for_present(&self.selectors.result_indicator, self.timeouts.next_page)
            .await
    }
}
