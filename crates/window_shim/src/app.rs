//! Application-facing window facade
//!
//! Applications hold an `Arc<dyn App>` and never name a concrete driver. The
//! expected shape of a program is:
//!
//! 1. build the app with [`new_app`] on the main thread and [`configure`](App::configure) it;
//! 2. spawn a consumer thread that reads [`event_channel`](App::event_channel),
//!    creates the surface after `SystemCreated` and renders between drains;
//! 3. call [`run`](App::run) on the main thread, which blocks while the OS pump runs;
//! 4. on `SystemClosed` the consumer finishes its frame, cleans up and calls
//!    [`acknowledge_close`](App::acknowledge_close), after which `run` returns.

use ash::vk;
use std::ffi::CStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::thread::{self, Thread, ThreadId};

use crate::config::{WindowConfig, WindowSettings};
use crate::error::{usage_violation, SurfaceCreationError, UsageError, WindowError};
use crate::events::{Event, EventChannel, EventPublisher, EventReceiver, WindowId};
use crate::lifecycle::{Lifecycle, WindowState};
use crate::platform::glfw_backend::GlfwPlatform;
use crate::platform::{NativeHandle, NativeWindowSystem, PumpStatus};
use crate::surface::SurfaceFactory;

/// Platform-independent window contract
pub trait App: Send + Sync {
    /// Request window geometry before [`run`](App::run)
    ///
    /// Negative values select the platform default (640x480, OS placement);
    /// each value defaults on its own. Calls after `run` has started are ignored.
    fn configure(&self, width: i32, height: i32, left: i32, top: i32);

    /// Read handle for the event stream
    fn event_channel(&self) -> EventReceiver;

    /// Create the window and run the OS message pump
    ///
    /// Must be called once, from the process main thread. Blocks until the
    /// close handshake completes.
    ///
    /// On error an [`Event::SystemFailed`] is published before returning, so a
    /// consumer waiting on the channel always sees a terminal event.
    ///
    /// # Panics
    /// On a second call or a call from any other thread.
    fn run(&self) -> Result<(), WindowError>;

    /// Allow the native window named by a `SystemClosed` event to be destroyed
    ///
    /// Call once all rendering tied to the window has finished. Until this is
    /// called the pump stays parked and `run` does not return.
    ///
    /// # Panics
    /// If no close request for `window` is pending.
    fn acknowledge_close(&self, window: WindowId);

    /// Vulkan instance extensions this platform needs, in a fixed order
    fn required_surface_extensions(&self) -> Vec<&'static CStr>;

    /// Create a presentation surface for the window
    ///
    /// Fails with [`SurfaceCreationError::WindowNotCreated`] before the
    /// window exists and [`SurfaceCreationError::WindowClosed`] after the
    /// close has been acknowledged. Never retries.
    fn create_surface(&self, factory: &dyn SurfaceFactory) -> Result<vk::SurfaceKHR, SurfaceCreationError>;
}

/// Create the host platform's app, bound to the global event channel
pub fn new_app(title: impl Into<String>) -> Arc<dyn App> {
    Arc::new(Driver::new(GlfwPlatform, title))
}

/// Create the host platform's app from file-backed settings
pub fn new_app_with_settings(settings: &WindowSettings) -> Arc<dyn App> {
    let app = new_app(settings.title.clone());
    let geometry = settings.geometry();
    app.configure(geometry.width, geometry.height, geometry.left, geometry.top);
    app
}

/// OS-independent state composed into every driver
#[derive(Debug)]
pub struct SharedAppState {
    title: String,
    config: Mutex<WindowConfig>,
    channel: EventChannel,
}

impl SharedAppState {
    fn new(title: String, channel: EventChannel) -> Self {
        Self {
            title,
            config: Mutex::new(WindowConfig::default()),
            channel,
        }
    }

    /// Window title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Requested geometry
    pub fn config(&self) -> WindowConfig {
        *self.config.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_config(&self, config: WindowConfig) {
        *self.config.lock().unwrap_or_else(PoisonError::into_inner) = config;
    }

    /// Read handle for the event stream
    pub fn event_channel(&self) -> EventReceiver {
        self.channel.receiver()
    }
}

/// Thread allowed to enter [`App::run`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UiThread {
    /// The process main thread
    Main,
    /// A fixed thread, for drivers run under the test harness
    Pinned(ThreadId),
}

impl UiThread {
    fn admits(self, thread: &Thread) -> bool {
        match self {
            Self::Main => thread.name() == Some("main"),
            Self::Pinned(id) => thread.id() == id,
        }
    }

    fn describe(self) -> String {
        match self {
            Self::Main => "the main thread".to_string(),
            Self::Pinned(id) => format!("the thread that created the driver ({:?})", id),
        }
    }
}

/// Platform window driver, generic over the native layer
///
/// Owns the lifecycle state machine and the close handshake. Native state
/// is created inside [`App::run`] and never leaves that thread.
pub struct Driver<N: NativeWindowSystem> {
    platform: N,
    shared: SharedAppState,
    publisher: EventPublisher,
    lifecycle: Lifecycle,
    handle: RwLock<Option<NativeHandle>>,
    started: AtomicBool,
    ui_thread: UiThread,
}

impl<N: NativeWindowSystem> Driver<N> {
    /// Driver bound to the global event channel
    ///
    /// Only the process main thread may call `run`; the driver itself can be
    /// built anywhere.
    pub fn new(platform: N, title: impl Into<String>) -> Self {
        Self::on_thread(platform, title, EventChannel::global().clone(), UiThread::Main)
    }

    /// Driver on a private channel, runnable from the calling thread
    pub(crate) fn with_channel(platform: N, title: impl Into<String>, channel: EventChannel) -> Self {
        Self::on_thread(platform, title, channel, UiThread::Pinned(thread::current().id()))
    }

    fn on_thread(platform: N, title: impl Into<String>, channel: EventChannel, ui_thread: UiThread) -> Self {
        let publisher = channel.publisher();
        Self {
            platform,
            shared: SharedAppState::new(title.into(), channel),
            publisher,
            lifecycle: Lifecycle::new(),
            handle: RwLock::new(None),
            started: AtomicBool::new(false),
            ui_thread,
        }
    }

    /// Shared configuration and channel access
    pub const fn shared(&self) -> &SharedAppState {
        &self.shared
    }

    /// The native layer
    pub const fn platform(&self) -> &N {
        &self.platform
    }

    /// Current lifecycle state
    pub fn state(&self) -> WindowState {
        self.lifecycle.state()
    }

    fn assert_ui_thread(&self) {
        let current = thread::current();
        if !self.ui_thread.admits(&current) {
            usage_violation(UsageError::WrongThread {
                expected: self.ui_thread.describe(),
                actual: format!("{:?} ({})", current.id(), current.name().unwrap_or("unnamed")),
            });
        }
    }

    fn set_handle(&self, handle: Option<NativeHandle>) {
        *self.handle.write().unwrap_or_else(PoisonError::into_inner) = handle;
    }

    fn pump_until_close(&self, window: &mut N::Window) -> Result<(), WindowError> {
        loop {
            match self.platform.pump(window, &self.publisher) {
                Ok(PumpStatus::Continue) => {}
                Ok(PumpStatus::CloseRequested) => return Ok(()),
                Err(err) => return Err(WindowError::native(err)),
            }
        }
    }

    fn open_and_pump(&self) -> Result<(), WindowError> {
        let geometry = self.shared.config().resolve()?;
        log::info!(
            "Opening \"{}\" at {}x{} (left {:?}, top {:?})",
            self.shared.title(),
            geometry.width,
            geometry.height,
            geometry.left,
            geometry.top
        );

        let (mut window, handle) = self
            .platform
            .create_window(self.shared.title(), &geometry)
            .map_err(WindowError::native)?;
        let id = handle.id();
        self.set_handle(Some(handle));
        self.lifecycle.mark_created(id);
        self.publisher.publish(Event::SystemCreated);

        if let Err(err) = self.pump_until_close(&mut window) {
            log::error!("Message pump failed: {}", err);
            self.teardown(window);
            return Err(err);
        }

        if let Some(id) = self.lifecycle.mark_close_requested() {
            self.publisher.publish(Event::SystemClosed { window: id });
            self.lifecycle.wait_for_acknowledgement();
        }

        self.teardown(window);
        Ok(())
    }

    fn teardown(&self, window: N::Window) {
        self.set_handle(None);
        self.platform.destroy_window(window);
        self.lifecycle.mark_destroyed();
    }
}

impl<N: NativeWindowSystem> App for Driver<N> {
    fn configure(&self, width: i32, height: i32, left: i32, top: i32) {
        if self.started.load(Ordering::SeqCst) {
            log::warn!("configure({}, {}, {}, {}) ignored: window already running", width, height, left, top);
            return;
        }
        self.shared.set_config(WindowConfig::new(width, height, left, top));
    }

    fn event_channel(&self) -> EventReceiver {
        self.shared.event_channel()
    }

    fn run(&self) -> Result<(), WindowError> {
        self.assert_ui_thread();
        if self.started.swap(true, Ordering::SeqCst) {
            usage_violation(UsageError::RunCalledTwice);
        }

        let result = self.open_and_pump();
        if let Err(err) = &result {
            // Terminal event: the consumer will never see SystemClosed
            self.publisher.publish(Event::SystemFailed { reason: err.to_string() });
        }
        result
    }

    fn acknowledge_close(&self, window: WindowId) {
        if let Err(err) = self.lifecycle.acknowledge(window) {
            usage_violation(err);
        }
    }

    fn required_surface_extensions(&self) -> Vec<&'static CStr> {
        self.platform.required_surface_extensions()
    }

    fn create_surface(&self, factory: &dyn SurfaceFactory) -> Result<vk::SurfaceKHR, SurfaceCreationError> {
        // Held for the whole call so teardown cannot free the window under it
        let handle = self.handle.read().unwrap_or_else(PoisonError::into_inner);
        match (handle.as_ref(), self.lifecycle.state()) {
            (_, WindowState::Uninitialized) => Err(SurfaceCreationError::WindowNotCreated),
            (Some(handle), WindowState::Created(_) | WindowState::CloseRequested(_)) => {
                factory.create_surface(handle)
            }
            _ => Err(SurfaceCreationError::WindowClosed),
        }
    }
}
