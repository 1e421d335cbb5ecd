//! Microphone permission seam
//!
//! The overlay never talks to a platform permission API directly; the host
//! supplies an implementation of [`MicPermission`] and the controller asks
//! it before starting recognition.

use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    /// The user has not been asked yet
    Undetermined,
}

/// Host-platform adapter for microphone access.
pub trait MicPermission {
    /// Current status without prompting the user.
    fn status(&self) -> PermissionStatus;

    /// Prompt the user if the platform supports it, returning the new
    /// status. May block on platforms with modal permission dialogs.
    fn request(&mut self) -> PermissionStatus;
}

/// Fixed-answer implementation. Desktop builds where the process already
/// owns the microphone use `StaticPermission::granted()`; tests use the
/// other constructors.
#[derive(Debug, Clone)]
pub struct StaticPermission {
    status: PermissionStatus,
    /// What `request` resolves an undetermined status to
    on_request: PermissionStatus,
}

impl StaticPermission {
    pub fn granted() -> Self {
        Self {
            status: PermissionStatus::Granted,
            on_request: PermissionStatus::Granted,
        }
    }

    pub fn denied() -> Self {
        Self {
            status: PermissionStatus::Denied,
            on_request: PermissionStatus::Denied,
        }
    }

    /// Undetermined until asked, then resolves to `outcome`.
    pub fn undetermined(outcome: PermissionStatus) -> Self {
        Self {
            status: PermissionStatus::Undetermined,
            on_request: outcome,
        }
    }
}

impl MicPermission for StaticPermission {
    fn status(&self) -> PermissionStatus {
        self.status
    }

    fn request(&mut self) -> PermissionStatus {
        if self.status == PermissionStatus::Undetermined {
            info!(outcome = ?self.on_request, "microphone permission resolved");
            self.status = self.on_request;
        }
        self.status
    }
}
