//! Request identifiers for latest-only async results.
//!
//! Each stage of the fetch pipeline owns one `LatestOnly`. Starting a request
//! supersedes whatever was in flight for that stage; a result is applied only
//! if its id is still the active one, so completion order never matters.

/// Opaque, monotonically increasing request id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Tracks the latest issued request for one stage.
#[derive(Debug, Default)]
pub struct LatestOnly {
    next: u64,
    active: Option<RequestId>,
}

impl LatestOnly {
    /// Issues a new id and makes it the only one whose result is accepted.
    pub fn begin(&mut self) -> RequestId {
        let id = RequestId(self.next);
        self.next += 1;
        self.active = Some(id);
        id
    }

    /// Forgets the active request. Its result will be dropped; the counter
    /// keeps going so ids are never reused.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    pub fn is_active(&self, id: RequestId) -> bool {
        self.active == Some(id)
    }

    pub fn has_active(&self) -> bool {
        self.active.is_some()
    }

    /// Marks `id` finished and returns true if it was the active request.
    /// A false return means the result is stale and must be discarded.
    pub fn finish_if_active(&mut self, id: RequestId) -> bool {
        if self.is_active(id) {
            self.active = None;
            true
        } else {
            false
        }
    }
}
