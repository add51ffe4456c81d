//! Runtime: owns the state, executes effects, and feeds results back.
//!
//! This is the only place side effects happen. The reducer returns
//! effects; each one is spawned as a task whose result event lands in the
//! inbox. Results are applied in arrival order, and the reducer decides
//! whether each is still current.

mod handlers;
mod inbox;

use std::future::Future;

use inbox::{AppEventReceiver, AppEventSender};
use pawfind_client::{ApiClient, ApiError, ApiErrorKind};

use crate::effects::AppEffect;
use crate::events::AppEvent;
use crate::state::AppState;
use crate::update;

pub struct Runtime {
    client: ApiClient,
    pub state: AppState,
    inbox_tx: AppEventSender,
    inbox_rx: AppEventReceiver,
    /// Spawned tasks whose result has not been applied yet.
    outstanding: usize,
}

impl Runtime {
    /// Creates a runtime sharing the client's session flag.
    pub fn new(client: ApiClient, page_size: u32) -> Self {
        let state = AppState::new(client.session().clone(), page_size);
        let (inbox_tx, inbox_rx) = inbox::channel();
        Self {
            client,
            state,
            inbox_tx,
            inbox_rx,
            outstanding: 0,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Number of spawned tasks still running or waiting in the inbox.
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Runs one event through the reducer and spawns its effects.
    pub fn dispatch(&mut self, event: AppEvent) {
        let effects = update::update(&mut self.state, event);
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Applies results until every spawned task, including the ones spawned
    /// while settling, has reported back.
    pub async fn settle(&mut self) {
        while self.outstanding > 0 {
            let Some(event) = self.inbox_rx.recv().await else {
                break;
            };
            self.apply(event);
        }
    }

    /// Applies results that have already arrived without waiting for more,
    /// so a caller can interleave new intents with in-flight requests.
    pub fn drain_ready(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.inbox_rx.try_recv() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    fn apply(&mut self, event: AppEvent) {
        self.outstanding = self.outstanding.saturating_sub(1);
        self.dispatch(event);
    }

    fn execute_effect(&mut self, effect: AppEffect) {
        let client = self.client.clone();
        match effect {
            AppEffect::Login { req, name, email } => {
                let aborted = AppEvent::LoginFinished {
                    req,
                    result: Err(task_aborted()),
                };
                self.spawn_effect(move || handlers::login(client, req, name, email), aborted);
            }
            AppEffect::Logout { req } => {
                let aborted = AppEvent::LogoutFinished {
                    req,
                    result: Err(task_aborted()),
                };
                self.spawn_effect(move || handlers::logout(client, req), aborted);
            }
            AppEffect::FetchBreeds { req } => {
                let aborted = AppEvent::BreedsLoaded {
                    req,
                    result: Err(task_aborted()),
                };
                self.spawn_effect(move || handlers::fetch_breeds(client, req), aborted);
            }
            AppEffect::Search { req, query } => {
                let aborted = AppEvent::SearchLoaded {
                    req,
                    result: Err(task_aborted()),
                };
                self.spawn_effect(move || handlers::search(client, req, query), aborted);
            }
            AppEffect::FetchDogs { req, ids } => {
                let aborted = AppEvent::DogsLoaded {
                    req,
                    ids: ids.clone(),
                    result: Err(task_aborted()),
                };
                self.spawn_effect(move || handlers::fetch_dogs(client, req, ids), aborted);
            }
        }
    }

    /// Spawns a handler. If the handler task dies before producing its
    /// event, `aborted` is delivered instead so the stage still completes
    /// and `settle` is not left waiting.
    fn spawn_effect<F, Fut>(&mut self, f: F, aborted: AppEvent)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = AppEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        self.outstanding += 1;
        let task = tokio::spawn(f());
        tokio::spawn(async move {
            let event = match task.await {
                Ok(event) => event,
                Err(err) => {
                    tracing::error!(error = %err, "effect task failed");
                    aborted
                }
            };
            if tx.send(event).is_err() {
                tracing::debug!("runtime dropped before effect result arrived");
            }
        });
    }
}

fn task_aborted() -> ApiError {
    ApiError::new(ApiErrorKind::Network, "request task aborted")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use pawfind_client::{AuthSession, SessionCookies};
    use url::Url;

    use super::*;

    fn runtime() -> Runtime {
        let client = ApiClient::new(
            Url::parse("http://127.0.0.1:9").unwrap(),
            Arc::new(SessionCookies::new()),
            AuthSession::new(),
        )
        .unwrap();
        Runtime::new(client, 25)
    }

    #[tokio::test]
    async fn panicking_handler_still_settles() {
        let mut runtime = runtime();
        let req = runtime.state.search.breeds_request.begin();

        runtime.spawn_effect(
            || async { panic!("handler blew up") },
            AppEvent::BreedsLoaded {
                req,
                result: Err(task_aborted()),
            },
        );
        assert_eq!(runtime.outstanding(), 1);

        tokio::time::timeout(Duration::from_secs(5), runtime.settle())
            .await
            .expect("settle returned");

        assert_eq!(runtime.outstanding(), 0);
        assert!(!runtime.state.search.breeds_request.has_active());
        assert!(!runtime.state.notices.is_empty());
    }
}
