//! Window and input events delivered to the application
//!
//! Every native message the platform layer cares about becomes exactly one
//! [`Event`]. Payloads live inside the variant, so a consumer can only read a
//! payload after matching on the kind that carries it.

pub mod channel;

pub use channel::{EventChannel, EventPublisher, EventReceiver, EVENT_CHANNEL_CAPACITY};

use std::fmt;

/// Opaque identifier of a native window
///
/// Carried by [`Event::SystemClosed`] and handed back to
/// [`App::acknowledge_close`](crate::App::acknowledge_close) to complete the
/// close handshake. The value is derived from the native object (window
/// pointer, HWND, layer pointer) and means nothing to application code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(u64);

impl WindowId {
    /// Wrap a raw native identifier
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw native identifier
    pub const fn into_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{:#x}", self.0)
    }
}

/// Event type identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Native window was created
    SystemCreated,
    /// User or OS asked to close the window
    SystemClosed,
    /// The window system failed and no close request will follow
    SystemFailed,
    /// Pointer moved inside the window
    PointerMove,
    /// Pointer button pressed or released
    PointerButton,
    /// Scroll wheel or trackpad scroll
    Scroll,
    /// Keyboard key pressed, repeated or released
    Key,
    /// Drawable area changed size
    Resized,
    /// Window gained or lost input focus
    Focus,
}

/// A single window-system event
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The native window exists and a surface may now be created.
    ///
    /// Always the first event published by a driver.
    SystemCreated,

    /// The window was asked to close.
    ///
    /// The native window stays alive until the application passes `window`
    /// to [`App::acknowledge_close`](crate::App::acknowledge_close).
    SystemClosed {
        /// Window to acknowledge
        window: WindowId,
    },

    /// `run` failed; the window, if it was created, is already destroyed.
    ///
    /// Always the last event published by a driver when it is published.
    /// No acknowledgement is expected.
    SystemFailed {
        /// Rendered error returned by `run`
        reason: String,
    },

    /// Pointer position in window coordinates
    PointerMove {
        /// Horizontal position
        x: f64,
        /// Vertical position
        y: f64,
    },

    /// Pointer button state change
    PointerButton {
        /// Zero-based button index (0 = primary)
        button: u8,
        /// True on press, false on release
        pressed: bool,
    },

    /// Scroll offset
    Scroll {
        /// Horizontal offset
        dx: f64,
        /// Vertical offset
        dy: f64,
    },

    /// Keyboard key state change
    Key {
        /// Platform key code
        key: i32,
        /// Hardware scancode
        scancode: i32,
        /// True on press and repeat
        pressed: bool,
        /// True when generated by key repeat
        repeat: bool,
    },

    /// New drawable size in pixels
    Resized {
        /// Width in pixels
        width: u32,
        /// Height in pixels
        height: u32,
    },

    /// Focus state
    Focus(bool),
}

impl Event {
    /// The kind of this event
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::SystemCreated => EventKind::SystemCreated,
            Self::SystemClosed { .. } => EventKind::SystemClosed,
            Self::SystemFailed { .. } => EventKind::SystemFailed,
            Self::PointerMove { .. } => EventKind::PointerMove,
            Self::PointerButton { .. } => EventKind::PointerButton,
            Self::Scroll { .. } => EventKind::Scroll,
            Self::Key { .. } => EventKind::Key,
            Self::Resized { .. } => EventKind::Resized,
            Self::Focus(_) => EventKind::Focus,
        }
    }
}
