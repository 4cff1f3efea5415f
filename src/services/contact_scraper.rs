use crate::{
    domain::{PageOutcome, ResultRecord, SearchQuery, SessionStatus},
    error::ScrapeError,
    services::{Browser, Extractor, Pager, SessionManager},
};

#[derive(Debug)]
pub struct SearchReport {
    pub session: SessionStatus,
    pub records: Vec<ResultRecord>,
    pub pages: Vec<PageOutcome>,
}

/// Logs in, runs a people search and scrapes every result page it reaches.
///
/// Owns exactly one browsing context; do not share it between concurrent
/// searches.
pub struct ContactScraper<B: Browser> {
    browser: B,
    session_manager: SessionManager,
    pager: Pager,
    extractor: Extractor,
}

impl<B: Browser> ContactScraper<B> {
    pub fn new(
        browser: B,
        session_manager: SessionManager,
        pager: Pager,
        extractor: Extractor,
    ) -> Self {
        ContactScraper {
            browser,
            session_manager,
            pager,
            extractor,
        }
    }

    /// Best effort: any failure is logged and yields an empty list.
    pub async fn search(&self, name: &str, page_budget: usize) -> Vec<ResultRecord> {
        let result = match SearchQuery::new(name, page_budget) {
            Ok(query) => self.search_report(&query).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(report) => report.records,
            Err(e) => {
                log::error!("Error occurred while searching for {}: {}", name, e);
                vec![]
            }
        }
    }

    pub async fn search_report(&self, query: &SearchQuery) -> Result<SearchReport, ScrapeError> {
        let session = self.session_manager.ensure_session(&self.browser).await?;
        let paged = self.pager.collect_pages(&self.browser, query).await?;

        log::info!("Extracting search results...");
        let records: Vec<ResultRecord> = paged
            .snapshots
            .iter()
            .flat_map(|snapshot| self.extractor.extract(&snapshot.page_source))
            .collect();
        log::info!(
            "Extracted {} results from {} pages",
            records.len(),
            paged.snapshots.len()
        );

        Ok(SearchReport {
            session,
            records,
            pages: paged.outcomes,
        })
    }

    pub async fn quit(self) -> Result<(), ScrapeError> {
        self.browser.quit().await
    }
}
