use crate::error::ScrapeError;

/// Pages walked when neither the command line nor the config names a budget.
pub const DEFAULT_PAGE_BUDGET: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    name: String,
    page_budget: usize,
}

impl SearchQuery {
    pub fn new(name: &str, page_budget: usize) -> Result<Self, ScrapeError> {
        if page_budget == 0 {
            return Err(ScrapeError::InvalidQuery(
                "page budget must be at least 1".to_string(),
            ));
        }

        Ok(SearchQuery {
            name: name.to_string(),
            page_budget,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn page_budget(&self) -> usize {
        self.page_budget
    }

    pub fn is_last_page(&self, index: usize) -> bool {
        index + 1 >= self.page_budget
    }
}
