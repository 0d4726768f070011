//! Platform notification capability.
//!
//! Desktop notifications go through [`NotificationPlatform`], an abstraction
//! over whatever the host provides (a desktop toast API, mobile push, or
//! nothing at all). Permission is tri-state: until the user answers the
//! platform's dialog it is [`Undetermined`](NotificationPermission::Undetermined).

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Platform notification permission state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPermission {
    /// The user has granted desktop notifications.
    Granted,
    /// The user has denied desktop notifications.
    Denied,
    /// The user has not been asked yet.
    Undetermined,
}

impl std::fmt::Display for NotificationPermission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Granted => "granted",
            Self::Denied => "denied",
            Self::Undetermined => "undetermined",
        };
        f.write_str(s)
    }
}

/// Capability interface for the platform notification surface.
///
/// Implementations must be cheap to query: [`permission`](Self::permission)
/// is consulted on every dispatch.
#[async_trait]
pub trait NotificationPlatform: Send + Sync {
    /// Current permission state.
    fn permission(&self) -> NotificationPermission;

    /// Ask the user for permission. Resolves to the state the user chose;
    /// implementations update their own [`permission`](Self::permission)
    /// state as a side effect.
    async fn request_permission(&self) -> Result<NotificationPermission>;

    /// Show a desktop notification. `tag` is the occurrence dedupe tag; a
    /// platform that coalesces by tag suppresses duplicate pop-ups.
    async fn show(&self, title: &str, body: &str, tag: &str) -> Result<()>;
}

/// Headless implementation: fixed permission state, `show` is a no-op.
///
/// Useful for servers, tests, and hosts without a notification surface.
#[derive(Debug, Clone)]
pub struct NoopPlatform {
    permission: NotificationPermission,
}

impl NoopPlatform {
    /// A no-op platform that reports the given permission state.
    pub fn new(permission: NotificationPermission) -> Self {
        Self { permission }
    }

    /// A no-op platform with notifications "granted" (shows nothing anyway).
    pub fn granted() -> Self {
        Self::new(NotificationPermission::Granted)
    }

    /// A no-op platform with notifications denied.
    pub fn denied() -> Self {
        Self::new(NotificationPermission::Denied)
    }
}

#[async_trait]
impl NotificationPlatform for NoopPlatform {
    fn permission(&self) -> NotificationPermission {
        self.permission
    }

    async fn request_permission(&self) -> Result<NotificationPermission> {
        Ok(self.permission)
    }

    async fn show(&self, _title: &str, body: &str, tag: &str) -> Result<()> {
        tracing::debug!(tag, "noop platform dropping notification: {body}");
        Ok(())
    }
}
