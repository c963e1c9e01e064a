//! Native window layer abstraction
//!
//! The driver's lifecycle and channel discipline are written once against
//! [`NativeWindowSystem`]; everything OS-specific sits behind it.
//!
//! ```text
//! ┌─────────────────────────────────┐
//! │     Application threads         │
//! └─────────────┬───────────────────┘
//!               │ App trait / EventReceiver
//!         ┌─────▼─────┐
//!         │  Driver   │ ← lifecycle + close handshake (app.rs)
//!         └─────┬─────┘
//!               │ NativeWindowSystem
//!   ┌───────────▼───────────┐
//!   │ glfw_backend          │ ← desktop pump and event translation
//!   │ host::{win32,metal,   │ ← per-OS surface descriptors
//!   │        xlib}          │
//!   └───────────────────────┘
//! ```

pub mod glfw_backend;
#[allow(unsafe_code)]
pub mod host;

#[cfg(test)]
pub(crate) mod mock;

use raw_window_handle::{RawDisplayHandle, RawWindowHandle};
use std::ffi::CStr;

use crate::config::Geometry;
use crate::events::{EventPublisher, WindowId};

/// Outcome of one pump iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpStatus {
    /// Keep pumping
    Continue,
    /// The user or OS asked to close the window
    CloseRequested,
}

/// Native handles identifying a created window
///
/// Owned by the driver. Applications only reach it indirectly, through
/// [`App::create_surface`](crate::App::create_surface), which lends it to the
/// [`SurfaceFactory`](crate::surface::SurfaceFactory) for the duration of one
/// call. It is neither `Clone` nor `Copy`, and building one takes the unsafe
/// [`NativeHandle::new`], so safe code cannot forge or keep a handle.
///
/// ```compile_fail
/// use raw_window_handle::{RawDisplayHandle, RawWindowHandle, XlibDisplayHandle, XlibWindowHandle};
/// use window_shim::platform::NativeHandle;
/// use window_shim::WindowId;
///
/// let forged = NativeHandle::new(
///     WindowId::from_raw(1),
///     RawWindowHandle::Xlib(XlibWindowHandle::empty()),
///     RawDisplayHandle::Xlib(XlibDisplayHandle::empty()),
/// );
/// ```
#[derive(Debug)]
pub struct NativeHandle {
    id: WindowId,
    window: RawWindowHandle,
    display: RawDisplayHandle,
}

// SAFETY: the raw handles are plain identifiers. They are only dereferenced by
// the graphics API during surface creation, which the platform allows from
// any thread while the window is alive; the driver's lifecycle guarantees the
// window outlives every such call.
#[allow(unsafe_code)]
unsafe impl Send for NativeHandle {}
#[allow(unsafe_code)]
unsafe impl Sync for NativeHandle {}

impl NativeHandle {
    /// Bundle the identifier and raw handles of a native window
    ///
    /// # Safety
    /// `window` and `display` must identify a live native window that stays
    /// alive until the handle is returned to the driver and
    /// [`NativeWindowSystem::destroy_window`] runs.
    #[allow(unsafe_code)]
    pub const unsafe fn new(id: WindowId, window: RawWindowHandle, display: RawDisplayHandle) -> Self {
        Self { id, window, display }
    }

    /// Identifier carried by close events
    pub const fn id(&self) -> WindowId {
        self.id
    }

    /// Raw window handle
    pub const fn window(&self) -> RawWindowHandle {
        self.window
    }

    /// Raw display handle
    pub const fn display(&self) -> RawDisplayHandle {
        self.display
    }
}

/// Capability set a native window layer provides to the driver
///
/// The implementing value is shared between threads; the [`Window`] it
/// creates is not, and lives on the pump thread from `create_window` until
/// `destroy_window`.
///
/// [`Window`]: NativeWindowSystem::Window
pub trait NativeWindowSystem: Send + Sync + 'static {
    /// Native window object, confined to the pump thread
    type Window;

    /// Failure reported by the native layer
    type Error: std::error::Error + Send + Sync + 'static;

    /// Create the window. Called exactly once per driver.
    fn create_window(
        &self,
        title: &str,
        geometry: &Geometry,
    ) -> Result<(Self::Window, NativeHandle), Self::Error>;

    /// Handle pending native messages, blocking until at least one arrives
    ///
    /// Every message of interest is translated into exactly one event and
    /// published, in the order the OS delivered them. No application logic
    /// runs here.
    fn pump(&self, window: &mut Self::Window, events: &EventPublisher)
        -> Result<PumpStatus, Self::Error>;

    /// Destroy the window. Called exactly once, after the close handshake.
    fn destroy_window(&self, window: Self::Window);

    /// Vulkan instance extensions needed to present to this layer's windows
    ///
    /// Pure: same list every call, no native calls.
    fn required_surface_extensions(&self) -> Vec<&'static CStr>;
}
