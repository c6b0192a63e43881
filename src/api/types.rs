use crate::models::{Filters, PageState};
use serde::{Deserialize, Serialize};

/// Parameters of a single list request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListQuery {
    /// Zero-based page index
    pub page: u32,
    /// Records per page
    pub size: u32,
    /// Sort expression understood by the server (`field,dir`)
    pub sort: String,
    /// Filters that were non-empty when the request was built
    pub filters: Filters,
}

impl ListQuery {
    pub fn new(state: &PageState, filters: Filters) -> Self {
        Self {
            page: state.page,
            size: state.size,
            sort: state.sort.clone(),
            filters,
        }
    }

    /// Query-string pairs: paging first, then whichever filters are set
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("size", self.size.to_string()),
            ("sort", self.sort.clone()),
        ];
        pairs.extend(self.filters.pairs());
        pairs
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(&PageState::default(), Filters::default())
    }
}
