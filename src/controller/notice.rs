//! User-visible notices (the error banner above the list)

use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// What a notice is about, so a later success can clear a stale failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeOrigin {
    Search,
    Update,
    Selection,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
    pub origin: NoticeOrigin,
    pub timestamp: Instant,
}

impl Notice {
    pub fn new(message: String, level: NoticeLevel, origin: NoticeOrigin) -> Self {
        Self {
            message,
            level,
            origin,
            timestamp: Instant::now(),
        }
    }

    pub fn info(message: impl Into<String>, origin: NoticeOrigin) -> Self {
        Self::new(message.into(), NoticeLevel::Info, origin)
    }

    pub fn warning(message: impl Into<String>, origin: NoticeOrigin) -> Self {
        Self::new(message.into(), NoticeLevel::Warning, origin)
    }

    pub fn error(message: impl Into<String>, origin: NoticeOrigin) -> Self {
        Self::new(message.into(), NoticeLevel::Error, origin)
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}
