//! Search controller reducer.
//!
//! Drives the three-stage pipeline: breeds, then candidate ids, then dog
//! details. Parameter changes re-run stage 2; each stage applies only the
//! result of its latest request.

use std::collections::HashMap;

use pawfind_client::ApiError;
use pawfind_types::{Dog, SearchResults, SortField};

use super::state::{PAGE_SIZES, PhotoView, SearchState};
use crate::common::{Notices, RequestId};
use crate::effects::AppEffect;

/// Enters the search view: loads breeds on first use, otherwise runs the
/// first search if none has completed yet.
pub fn start(state: &mut SearchState) -> Vec<AppEffect> {
    if !state.filtering_available() {
        if state.breeds_request.has_active() {
            return vec![];
        }
        return refresh_breeds(state);
    }
    if !state.searched && !state.is_loading() {
        return dispatch_search(state);
    }
    vec![]
}

pub fn refresh_breeds(state: &mut SearchState) -> Vec<AppEffect> {
    let req = state.breeds_request.begin();
    tracing::debug!(req = req.value(), "fetching breeds");
    vec![AppEffect::FetchBreeds { req }]
}

/// Issues stage 2 for the current parameters, superseding any in-flight
/// search or hydration.
fn dispatch_search(state: &mut SearchState) -> Vec<AppEffect> {
    if !state.filtering_available() {
        tracing::debug!("search skipped: breed list not loaded");
        return vec![];
    }
    let req = state.search_request.begin();
    state.hydrate_request.cancel();
    let query = state.params.to_query();
    tracing::debug!(
        req = req.value(),
        from = query.from,
        size = query.size,
        sort = %query.sort,
        "dispatching search"
    );
    vec![AppEffect::Search { req, query }]
}

pub fn select_breed(
    state: &mut SearchState,
    notices: &mut Notices,
    breed: Option<&str>,
) -> Vec<AppEffect> {
    if !state.filtering_available() {
        notices.warn("Breed filtering is unavailable until the breed list loads.");
        return vec![];
    }
    let resolved = match breed.map(str::trim).filter(|b| !b.is_empty()) {
        None => None,
        Some(wanted) => match state
            .breeds
            .iter()
            .find(|known| known.eq_ignore_ascii_case(wanted))
        {
            Some(known) => Some(known.clone()),
            None => {
                notices.warn(format!("Unknown breed '{wanted}'."));
                return vec![];
            }
        },
    };
    if resolved == state.params.breed {
        return vec![];
    }
    state.params.breed = resolved;
    state.params.page = 1;
    dispatch_search(state)
}

pub fn set_page(state: &mut SearchState, notices: &mut Notices, page: u32) -> Vec<AppEffect> {
    let clamped = page.clamp(1, state.total_pages);
    if clamped != page {
        notices.info(format!(
            "Page {page} is out of range; showing page {clamped} of {}.",
            state.total_pages
        ));
    }
    if clamped == state.params.page {
        return vec![];
    }
    state.params.page = clamped;
    dispatch_search(state)
}

pub fn next_page(state: &mut SearchState, notices: &mut Notices) -> Vec<AppEffect> {
    if state.params.page >= state.total_pages {
        notices.info("Already on the last page.");
        return vec![];
    }
    let page = state.params.page + 1;
    set_page(state, notices, page)
}

pub fn prev_page(state: &mut SearchState, notices: &mut Notices) -> Vec<AppEffect> {
    if state.params.page <= 1 {
        notices.info("Already on the first page.");
        return vec![];
    }
    let page = state.params.page - 1;
    set_page(state, notices, page)
}

pub fn set_page_size(state: &mut SearchState, notices: &mut Notices, size: u32) -> Vec<AppEffect> {
    if !PAGE_SIZES.contains(&size) {
        notices.warn(format!(
            "Page size {size} is not available (choose one of {PAGE_SIZES:?})."
        ));
        return vec![];
    }
    if size == state.params.page_size {
        return vec![];
    }
    state.params.page_size = size;
    state.params.page = 1;
    state.recompute_total_pages();
    dispatch_search(state)
}

pub fn toggle_sort(state: &mut SearchState) -> Vec<AppEffect> {
    state.params.sort.direction = state.params.sort.direction.flipped();
    state.params.page = 1;
    dispatch_search(state)
}

pub fn set_sort_field(state: &mut SearchState, field: SortField) -> Vec<AppEffect> {
    if field == state.params.sort.field {
        return vec![];
    }
    state.params.sort.field = field;
    state.params.page = 1;
    dispatch_search(state)
}

pub fn show_photo(state: &mut SearchState, notices: &mut Notices, index: usize) -> Vec<AppEffect> {
    let Some(dog) = index.checked_sub(1).and_then(|i| state.dogs.get(i)) else {
        notices.warn(format!("No dog at position {index}."));
        return vec![];
    };
    if dog.img.is_empty() {
        notices.info(format!("{} has no photo yet.", dog.name));
        return vec![];
    }
    state.photo = Some(PhotoView {
        name: dog.name.clone(),
        img: dog.img.clone(),
    });
    vec![]
}

pub fn close_photo(state: &mut SearchState) -> Vec<AppEffect> {
    state.photo = None;
    vec![]
}

/// Stage 1 completion.
pub fn handle_breeds(
    state: &mut SearchState,
    notices: &mut Notices,
    req: RequestId,
    result: Result<Vec<String>, ApiError>,
) -> Vec<AppEffect> {
    if !state.breeds_request.finish_if_active(req) {
        tracing::debug!(req = req.value(), "dropping stale breeds result");
        return vec![];
    }
    match result {
        Ok(breeds) if breeds.is_empty() => {
            notices.warn("The catalog returned no breeds; searching is unavailable.");
            vec![]
        }
        Ok(breeds) => {
            state.breeds = breeds;
            if state.searched {
                vec![]
            } else {
                dispatch_search(state)
            }
        }
        Err(err) => {
            if !err.is_unauthorized() {
                notices.warn(format!("Could not load breeds: {err}"));
            }
            vec![]
        }
    }
}

/// Stage 2 completion.
pub fn handle_search(
    state: &mut SearchState,
    notices: &mut Notices,
    req: RequestId,
    result: Result<SearchResults, ApiError>,
) -> Vec<AppEffect> {
    if !state.search_request.finish_if_active(req) {
        tracing::debug!(req = req.value(), "dropping stale search result");
        return vec![];
    }
    let results = match result {
        Ok(results) => results,
        Err(err) => {
            if !err.is_unauthorized() {
                notices.warn(format!("Search failed: {err}"));
            }
            return vec![];
        }
    };

    state.result_ids = results.result_ids;
    state.total = results.total;
    state.searched = true;
    state.recompute_total_pages();

    if state.result_ids.is_empty() {
        state.dogs.clear();
        return vec![];
    }
    if state.displayed_ids().eq(state.result_ids.iter().map(String::as_str)) {
        return vec![];
    }

    let req = state.hydrate_request.begin();
    tracing::debug!(req = req.value(), count = state.result_ids.len(), "hydrating dogs");
    vec![AppEffect::FetchDogs {
        req,
        ids: state.result_ids.clone(),
    }]
}

/// Stage 3 completion.
pub fn handle_dogs(
    state: &mut SearchState,
    notices: &mut Notices,
    req: RequestId,
    ids: &[String],
    result: Result<Vec<Dog>, ApiError>,
) -> Vec<AppEffect> {
    if !state.hydrate_request.finish_if_active(req) {
        tracing::debug!(req = req.value(), "dropping stale hydration result");
        return vec![];
    }
    match result {
        Ok(dogs) => {
            let received = dogs.len();
            state.dogs = order_by_ids(ids, dogs);
            if state.dogs.len() != ids.len() {
                tracing::warn!(
                    requested = ids.len(),
                    received,
                    "hydration returned a partial result"
                );
            }
            state.recompute_total_pages();
        }
        Err(err) => {
            if !err.is_unauthorized() {
                notices.warn(format!("Could not load dog details: {err}"));
            }
        }
    }
    vec![]
}

/// Arranges `dogs` in `ids` order. Ids the service did not return are
/// skipped, as are records nobody asked for.
fn order_by_ids(ids: &[String], dogs: Vec<Dog>) -> Vec<Dog> {
    let mut by_id: HashMap<String, Dog> = dogs
        .into_iter()
        .map(|dog| (dog.id.clone(), dog))
        .collect();
    ids.iter().filter_map(|id| by_id.remove(id)).collect()
}
