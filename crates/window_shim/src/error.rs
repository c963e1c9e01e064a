//! Error types for the window shim
//!
//! Recoverable failures come back as `Result`s from [`App::run`](crate::App::run)
//! and [`App::create_surface`](crate::App::create_surface). Lifecycle misuse
//! ([`UsageError`]) has no safe recovery and panics.

use ash::vk;
use thiserror::Error;

use crate::events::WindowId;

/// Errors returned from [`App::run`](crate::App::run)
#[derive(Error, Debug)]
pub enum WindowError {
    /// Requested geometry cannot be used
    #[error("Invalid window configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    /// The native window layer failed
    #[error("Native window system error: {0}")]
    Native(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl WindowError {
    pub(crate) fn native<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Native(Box::new(err))
    }
}

/// Invalid window geometry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Width of zero pixels
    #[error("window width must be non-zero")]
    ZeroWidth,

    /// Height of zero pixels
    #[error("window height must be non-zero")]
    ZeroHeight,
}

/// Errors returned from [`App::create_surface`](crate::App::create_surface)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCreationError {
    /// `run()` has not created the native window yet
    #[error("Native window has not been created yet")]
    WindowNotCreated,

    /// The close handshake has completed and the native window is gone
    #[error("Native window has been closed")]
    WindowClosed,

    /// The native handle kind has no surface path on this host
    #[error("Unsupported native handle for this platform: {0}")]
    UnsupportedHandle(String),

    /// The graphics API rejected the surface descriptor
    #[error("Vulkan surface creation failed: {0}")]
    Rejected(vk::Result),
}

/// Lifecycle misuse by the application
///
/// These are programming errors; the driver panics with the message rather
/// than returning them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    /// `run()` was entered a second time
    #[error("run() may only be called once per driver")]
    RunCalledTwice,

    /// `run()` was entered from a thread other than the designated UI thread
    #[error("run() must be called on {expected}, called from {actual}")]
    WrongThread {
        /// Designated UI thread
        expected: String,
        /// Calling thread
        actual: String,
    },

    /// `acknowledge_close()` without a matching pending close request
    #[error("acknowledge_close({window}) without a matching close request (state: {state})")]
    UnexpectedAcknowledge {
        /// Window passed by the caller
        window: WindowId,
        /// Lifecycle state at the time of the call
        state: String,
    },
}

/// Fail loudly on lifecycle misuse
#[track_caller]
pub(crate) fn usage_violation(err: UsageError) -> ! {
    log::error!("Usage error: {}", err);
    panic!("{}", err)
}
