use std::io;

use thiserror::Error;

use crate::window::{WindowId, WindowMode};

/// Failures raised by the registry, the mode state machine and the scaler.
///
/// None of these are fatal: the registry stays usable after any of them and
/// nothing is retried automatically.
#[derive(Debug, Error)]
pub enum WindowError {
    #[error("`{0}` is not a registered window kind")]
    InvalidType(String),
    #[error("resources for window kind `{key}` could not be loaded: {reason}")]
    ResourceMissing { key: String, reason: String },
    #[error("window {0} is not resizable")]
    NotResizable(WindowId),
    #[error("window mode `{0}` is undefined")]
    UndefinedMode(String),
    #[error("window {id} cannot go from {from} to {to}")]
    IllegalTransition {
        id: WindowId,
        from: WindowMode,
        to: WindowMode,
    },
    #[error("window {0} is not managed by this registry")]
    UnknownWindow(WindowId),
    #[error("window {0} is closed")]
    NotOpen(WindowId),
    #[error("dpi {0} must be a positive, finite value")]
    InvalidDpi(f32),
    #[error("screen resolution {width}x{height} is invalid")]
    InvalidResolution { width: u32, height: u32 },
    #[error("{width}x{height} is below the minimum resolution {min_width}x{min_height}")]
    ResolutionTooSmall {
        width: u32,
        height: u32,
        min_width: u32,
        min_height: u32,
    },
    #[error("window registry is not initialized")]
    Uninitialized,
    #[error("window registry is already in use further up the stack")]
    Busy,
    #[error("preference store failed: {0}")]
    Preference(#[from] PreferenceError),
}

impl WindowError {
    /// Whether this failure is logged at error (rather than warning) severity.
    pub fn is_severe(&self) -> bool {
        matches!(
            self,
            WindowError::InvalidType(_)
                | WindowError::ResourceMissing { .. }
                | WindowError::UndefinedMode(_)
                | WindowError::Preference(_)
        )
    }

    /// Emit this error through `tracing` at the severity of its kind.
    pub fn report(&self) {
        if self.is_severe() {
            tracing::error!(error = %self, "window operation failed");
        } else {
            tracing::warn!(error = %self, "window operation rejected");
        }
    }
}

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed preferences: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = WindowError> = std::result::Result<T, E>;
