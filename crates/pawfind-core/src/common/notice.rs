//! Non-blocking user notifications.
//!
//! The reducer queues notices; the presentation layer drains and shows them.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            NoticeLevel::Info => write!(f, "{}", self.message),
            NoticeLevel::Warning => write!(f, "warning: {}", self.message),
        }
    }
}

#[derive(Debug, Default)]
pub struct Notices {
    queue: Vec<Notice>,
}

impl Notices {
    pub fn info(&mut self, message: impl Into<String>) {
        self.queue.push(Notice {
            level: NoticeLevel::Info,
            message: message.into(),
        });
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.queue.push(Notice {
            level: NoticeLevel::Warning,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn last(&self) -> Option<&Notice> {
        self.queue.last()
    }

    /// Takes every queued notice, oldest first.
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.queue)
    }
}
