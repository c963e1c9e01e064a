//! Window lifecycle and the close handshake
//!
//! ```text
//! Uninitialized → Created → CloseRequested → Closing → Destroyed
//! ```
//!
//! `CloseRequested → Closing` only happens through an explicit
//! acknowledgement from the application. The pump thread parks in
//! [`Lifecycle::wait_for_acknowledgement`] until then, so the native window
//! cannot be torn down under an in-flight frame.

use std::fmt;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use crate::error::UsageError;
use crate::events::WindowId;

/// Lifetime state of the driver's window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    /// `run()` has not created the window yet
    Uninitialized,
    /// Window exists and events are flowing
    Created(WindowId),
    /// Close requested, waiting for the application to acknowledge
    CloseRequested(WindowId),
    /// Acknowledged, teardown in progress
    Closing(WindowId),
    /// Native window freed
    Destroyed,
}

impl fmt::Display for WindowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "uninitialized"),
            Self::Created(id) => write!(f, "created({id})"),
            Self::CloseRequested(id) => write!(f, "close-requested({id})"),
            Self::Closing(id) => write!(f, "closing({id})"),
            Self::Destroyed => write!(f, "destroyed"),
        }
    }
}

/// Shared lifecycle state with a wake-up for the pump thread
#[derive(Debug)]
pub(crate) struct Lifecycle {
    state: Mutex<WindowState>,
    acknowledged: Condvar,
}

impl Lifecycle {
    pub(crate) const fn new() -> Self {
        Self {
            state: Mutex::new(WindowState::Uninitialized),
            acknowledged: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, WindowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn state(&self) -> WindowState {
        *self.lock()
    }

    pub(crate) fn mark_created(&self, window: WindowId) {
        let mut state = self.lock();
        debug_assert_eq!(*state, WindowState::Uninitialized);
        *state = WindowState::Created(window);
        log::info!("Window {} created", window);
    }

    pub(crate) fn mark_close_requested(&self) -> Option<WindowId> {
        let mut state = self.lock();
        match *state {
            WindowState::Created(window) => {
                *state = WindowState::CloseRequested(window);
                log::info!("Close requested for {}, waiting for acknowledgement", window);
                Some(window)
            }
            other => {
                log::warn!("Close request ignored in state {}", other);
                None
            }
        }
    }

    /// Application side of the handshake
    pub(crate) fn acknowledge(&self, window: WindowId) -> Result<(), UsageError> {
        let mut state = self.lock();
        match *state {
            WindowState::CloseRequested(pending) if pending == window => {
                *state = WindowState::Closing(window);
                log::info!("Close of {} acknowledged", window);
                self.acknowledged.notify_all();
                Ok(())
            }
            other => Err(UsageError::UnexpectedAcknowledge {
                window,
                state: other.to_string(),
            }),
        }
    }

    /// Park the pump thread until the application acknowledges the close
    pub(crate) fn wait_for_acknowledgement(&self) {
        let state = self.lock();
        let _closing = self
            .acknowledged
            .wait_while(state, |state| matches!(state, WindowState::CloseRequested(_)))
            .unwrap_or_else(PoisonError::into_inner);
    }

    pub(crate) fn mark_destroyed(&self) {
        *self.lock() = WindowState::Destroyed;
        log::info!("Window destroyed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    const WINDOW: WindowId = WindowId::from_raw(42);

    #[test]
    fn test_full_transition_sequence() {
        let lifecycle = Lifecycle::new();
        assert_eq!(lifecycle.state(), WindowState::Uninitialized);

        lifecycle.mark_created(WINDOW);
        assert_eq!(lifecycle.state(), WindowState::Created(WINDOW));

        assert_eq!(lifecycle.mark_close_requested(), Some(WINDOW));
        assert_eq!(lifecycle.state(), WindowState::CloseRequested(WINDOW));

        lifecycle.acknowledge(WINDOW).unwrap();
        assert_eq!(lifecycle.state(), WindowState::Closing(WINDOW));

        lifecycle.mark_destroyed();
        assert_eq!(lifecycle.state(), WindowState::Destroyed);
    }

    #[test]
    fn test_acknowledge_without_close_request_is_rejected() {
        let lifecycle = Lifecycle::new();
        lifecycle.mark_created(WINDOW);

        let err = lifecycle.acknowledge(WINDOW).unwrap_err();
        assert!(matches!(err, UsageError::UnexpectedAcknowledge { .. }));
        assert_eq!(lifecycle.state(), WindowState::Created(WINDOW));
    }

    #[test]
    fn test_acknowledge_with_wrong_window_is_rejected() {
        let lifecycle = Lifecycle::new();
        lifecycle.mark_created(WINDOW);
        lifecycle.mark_close_requested();

        assert!(lifecycle.acknowledge(WindowId::from_raw(7)).is_err());
        assert_eq!(lifecycle.state(), WindowState::CloseRequested(WINDOW));
    }

    #[test]
    fn test_second_acknowledge_is_rejected() {
        let lifecycle = Lifecycle::new();
        lifecycle.mark_created(WINDOW);
        lifecycle.mark_close_requested();
        lifecycle.acknowledge(WINDOW).unwrap();

        assert!(lifecycle.acknowledge(WINDOW).is_err());
    }

    #[test]
    fn test_close_request_before_creation_is_ignored() {
        let lifecycle = Lifecycle::new();
        assert_eq!(lifecycle.mark_close_requested(), None);
        assert_eq!(lifecycle.state(), WindowState::Uninitialized);
    }

    #[test]
    fn test_wait_returns_after_acknowledgement() {
        let lifecycle = Arc::new(Lifecycle::new());
        lifecycle.mark_created(WINDOW);
        lifecycle.mark_close_requested();

        let acknowledger = {
            let lifecycle = Arc::clone(&lifecycle);
            thread::spawn(move || lifecycle.acknowledge(WINDOW))
        };

        lifecycle.wait_for_acknowledgement();
        assert_eq!(lifecycle.state(), WindowState::Closing(WINDOW));
        acknowledger.join().unwrap().unwrap();
    }
}
