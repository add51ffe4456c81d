//! Effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! Each one is a single remote call tagged with the request id its result
//! must carry back, so the reducer stays pure and never performs I/O.

use pawfind_types::SearchQuery;

use crate::common::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEffect {
    /// `POST /auth/login`.
    Login {
        req: RequestId,
        name: String,
        email: String,
    },

    /// `POST /auth/logout`.
    Logout { req: RequestId },

    /// Stage 1: `GET /dogs/breeds`.
    FetchBreeds { req: RequestId },

    /// Stage 2: `GET /dogs/search`.
    Search { req: RequestId, query: SearchQuery },

    /// Stage 3: `POST /dogs/` for exactly these ids.
    FetchDogs { req: RequestId, ids: Vec<String> },
}
