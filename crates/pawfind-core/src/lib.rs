//! Dog search controller.
//!
//! Elm-style core: `update` is a pure reducer over [`AppState`], returning
//! [`AppEffect`]s that the [`Runtime`] executes against the catalog service.
//!
//! - `search`: the breeds, ids, details fetch pipeline
//! - `login` / `route`: login form and the route guard
//! - `config` / `logging`: ambient setup shared by front-ends

pub mod common;
pub mod config;
pub mod effects;
pub mod events;
pub mod logging;
pub mod login;
pub mod route;
pub mod runtime;
pub mod search;
pub mod state;
pub mod update;

pub use config::Config;
pub use effects::AppEffect;
pub use events::AppEvent;
pub use route::Route;
pub use runtime::Runtime;
pub use state::AppState;
