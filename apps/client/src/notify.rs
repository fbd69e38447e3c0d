use std::sync::Mutex;

use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A user-visible notification (toast).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Collects toasts in order until the view drains them.
#[derive(Default)]
pub struct Toasts {
    pending: Mutex<Vec<Notice>>,
}

impl Toasts {
    fn pending(&self) -> std::sync::MutexGuard<'_, Vec<Notice>> {
        self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.pending())
    }

    #[cfg(test)]
    pub fn peek(&self) -> Vec<Notice> {
        self.pending().clone()
    }
}

impl Notifier for Toasts {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => info!("toast: {}", notice.message),
            NoticeLevel::Error => warn!("toast: {}", notice.message),
        }
        self.pending().push(notice);
    }
}
