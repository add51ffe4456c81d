//! Effect handlers.
//!
//! Pure async functions: each performs one remote call and returns the
//! event carrying its outcome. They never touch state; the runtime spawns
//! them and routes the result to the inbox.

use pawfind_client::ApiClient;
use pawfind_types::SearchQuery;

use crate::common::RequestId;
use crate::events::AppEvent;

pub async fn login(client: ApiClient, req: RequestId, name: String, email: String) -> AppEvent {
    let result = client.login(&name, &email).await;
    AppEvent::LoginFinished { req, result }
}

pub async fn logout(client: ApiClient, req: RequestId) -> AppEvent {
    let result = client.logout().await;
    AppEvent::LogoutFinished { req, result }
}

pub async fn fetch_breeds(client: ApiClient, req: RequestId) -> AppEvent {
    let result = client.breeds().await;
    if let Err(e) = &result {
        tracing::warn!(req = req.value(), error = %e, "breed list request failed");
    }
    AppEvent::BreedsLoaded { req, result }
}

pub async fn search(client: ApiClient, req: RequestId, query: SearchQuery) -> AppEvent {
    let result = client.search(&query).await;
    if let Err(e) = &result {
        tracing::warn!(req = req.value(), error = %e, "search request failed");
    }
    AppEvent::SearchLoaded { req, result }
}

pub async fn fetch_dogs(client: ApiClient, req: RequestId, ids: Vec<String>) -> AppEvent {
    let result = client.dogs(&ids).await;
    if let Err(e) = &result {
        tracing::warn!(req = req.value(), error = %e, "dog details request failed");
    }
    AppEvent::DogsLoaded { req, ids, result }
}
