use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// How long a toast stays up unless told otherwise
pub const DEFAULT_TOAST_MS: i64 = 2000;

/// A short-lived notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toast {
    pub message: String,
    pub shown_at: DateTime<Utc>,
    pub timeout_ms: i64,
}

impl Toast {
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_timeout(message, DEFAULT_TOAST_MS)
    }

    pub fn with_timeout(message: impl Into<String>, timeout_ms: i64) -> Self {
        Self {
            message: message.into(),
            shown_at: Utc::now(),
            timeout_ms,
        }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.shown_at + Duration::milliseconds(self.timeout_ms)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }
}
