//! Inbox channel types.
//!
//! Spawned effect handlers send their result events here; the runtime
//! drains the receiver and feeds each event back through the reducer.

use tokio::sync::mpsc;

use crate::events::AppEvent;

pub type AppEventSender = mpsc::UnboundedSender<AppEvent>;
pub type AppEventReceiver = mpsc::UnboundedReceiver<AppEvent>;

pub fn channel() -> (AppEventSender, AppEventReceiver) {
    mpsc::unbounded_channel()
}
