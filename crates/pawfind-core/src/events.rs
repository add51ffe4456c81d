//! Events consumed by the reducer.
//!
//! User intents come from the presentation layer; `*Finished`/`*Loaded`
//! events come back from tasks spawned by the runtime.

use pawfind_client::ApiError;
use pawfind_types::{Dog, SearchResults, SortField};

use crate::common::RequestId;
use crate::route::Route;

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Application start: enters the search view if already authenticated.
    Init,
    Navigate(Route),

    SubmitLogin { name: String, email: String },
    Logout,

    /// Selects a breed filter, or clears it with `None`.
    SelectBreed(Option<String>),
    /// Jumps to a 1-based page.
    SetPage(u32),
    NextPage,
    PrevPage,
    SetPageSize(u32),
    ToggleSort,
    SetSortField(SortField),
    RefreshBreeds,
    /// Opens the photo of the n-th (1-based) displayed dog.
    ShowPhoto(usize),
    ClosePhoto,

    LoginFinished {
        req: RequestId,
        result: Result<(), ApiError>,
    },
    LogoutFinished {
        req: RequestId,
        result: Result<(), ApiError>,
    },
    BreedsLoaded {
        req: RequestId,
        result: Result<Vec<String>, ApiError>,
    },
    SearchLoaded {
        req: RequestId,
        result: Result<SearchResults, ApiError>,
    },
    DogsLoaded {
        req: RequestId,
        ids: Vec<String>,
        result: Result<Vec<Dog>, ApiError>,
    },
}
