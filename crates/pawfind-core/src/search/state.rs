//! Search controller state.

use pawfind_types::{Dog, SearchQuery, Sort};

use crate::common::LatestOnly;

/// Page sizes the user can pick from.
pub const PAGE_SIZES: [u32; 4] = [10, 25, 50, 100];
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Number of pages needed for `total` results; never less than 1.
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    let page_size = u64::from(page_size.max(1));
    let pages = total.div_ceil(page_size).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// User-controlled search parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub breed: Option<String>,
    pub sort: Sort,
    /// 1-based.
    pub page: u32,
    pub page_size: u32,
}

impl SearchParams {
    pub fn new(page_size: u32) -> Self {
        Self {
            breed: None,
            sort: Sort::default(),
            page: 1,
            page_size,
        }
    }

    /// Zero-based offset of the first result on the current page.
    pub fn offset(&self) -> u32 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    pub fn to_query(&self) -> SearchQuery {
        SearchQuery {
            breeds: self.breed.iter().cloned().collect(),
            size: self.page_size,
            from: self.offset(),
            sort: self.sort,
        }
    }
}

/// Photo selected for the zoom view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoView {
    pub name: String,
    pub img: String,
}

/// Search controller state: parameters, pipeline bookkeeping, and results.
#[derive(Debug)]
pub struct SearchState {
    pub params: SearchParams,
    /// Stage 1 output. Empty means filtering and searching are unavailable.
    pub breeds: Vec<String>,
    /// Stage 2 output, in the order the service sorted them.
    pub result_ids: Vec<String>,
    pub total: u64,
    pub total_pages: u32,
    /// Stage 3 output from the most recently completed hydration.
    pub dogs: Vec<Dog>,
    /// True once any search has completed.
    pub searched: bool,
    pub photo: Option<PhotoView>,
    pub breeds_request: LatestOnly,
    pub search_request: LatestOnly,
    pub hydrate_request: LatestOnly,
}

impl SearchState {
    pub fn new(page_size: u32) -> Self {
        Self {
            params: SearchParams::new(page_size),
            breeds: Vec::new(),
            result_ids: Vec::new(),
            total: 0,
            total_pages: 1,
            dogs: Vec::new(),
            searched: false,
            photo: None,
            breeds_request: LatestOnly::default(),
            search_request: LatestOnly::default(),
            hydrate_request: LatestOnly::default(),
        }
    }

    /// True while a search or its hydration is in flight.
    pub fn is_loading(&self) -> bool {
        self.search_request.has_active() || self.hydrate_request.has_active()
    }

    pub fn has_pending(&self) -> bool {
        self.breeds_request.has_active() || self.is_loading()
    }

    /// Breed filtering (and therefore searching) needs a loaded breed list.
    pub fn filtering_available(&self) -> bool {
        !self.breeds.is_empty()
    }

    /// The last completed search matched nothing.
    pub fn has_no_results(&self) -> bool {
        self.searched && self.result_ids.is_empty()
    }

    pub fn recompute_total_pages(&mut self) {
        self.total_pages = total_pages(self.total, self.params.page_size);
    }

    /// Returns the controller to its initial state. In-flight requests are
    /// cancelled; id counters keep running so their results are dropped.
    pub fn reset(&mut self) {
        self.params = SearchParams::new(self.params.page_size);
        self.breeds.clear();
        self.result_ids.clear();
        self.total = 0;
        self.total_pages = 1;
        self.dogs.clear();
        self.searched = false;
        self.photo = None;
        self.breeds_request.cancel();
        self.search_request.cancel();
        self.hydrate_request.cancel();
    }

    /// Ids of the dogs currently displayed.
    pub fn displayed_ids(&self) -> impl Iterator<Item = &str> {
        self.dogs.iter().map(|dog| dog.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pawfind_types::{SortDirection, SortField};

    use super::*;

    #[test]
    fn total_pages_rounds_up_and_never_hits_zero() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(100, 25), 4);
        assert_eq!(total_pages(101, 100), 2);
    }

    #[test]
    fn total_pages_matches_ceiling_for_all_allowed_sizes() {
        for &size in &PAGE_SIZES {
            for total in 0..=500u64 {
                let expected = if total == 0 {
                    1
                } else {
                    (total + u64::from(size) - 1) / u64::from(size)
                };
                assert_eq!(u64::from(total_pages(total, size)), expected);
            }
        }
    }

    #[test]
    fn offset_is_zero_based() {
        let mut params = SearchParams::new(25);
        assert_eq!(params.offset(), 0);
        params.page = 3;
        assert_eq!(params.offset(), 50);
    }

    #[test]
    fn query_carries_breed_sort_and_offset() {
        let params = SearchParams {
            breed: Some("Poodle".to_string()),
            sort: Sort::new(SortField::Name, SortDirection::Desc),
            page: 2,
            page_size: 10,
        };
        let query = params.to_query();
        assert_eq!(query.breeds, vec!["Poodle"]);
        assert_eq!(query.size, 10);
        assert_eq!(query.from, 10);
        assert_eq!(query.sort.to_string(), "name:desc");
    }

    #[test]
    fn reset_keeps_page_size_and_cancels_requests() {
        let mut state = SearchState::new(50);
        state.breeds = vec!["Beagle".to_string()];
        state.params.page = 4;
        let req = state.search_request.begin();

        state.reset();

        assert_eq!(state.params, SearchParams::new(50));
        assert!(state.breeds.is_empty());
        assert!(!state.has_pending());
        assert!(!state.search_request.finish_if_active(req));
    }
}
