//! # Window Shim
//!
//! A minimal cross-platform window layer for Vulkan applications.
//!
//! The OS message pump runs on the main thread inside [`App::run`] and
//! translates native callbacks into [`Event`]s on one bounded channel.
//! Application threads drain that channel between frames, create a Vulkan
//! surface once the window exists, and acknowledge the close request only
//! after their last frame, so the native window is never destroyed mid-draw.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::thread;
//! use window_shim::prelude::*;
//!
//! fn main() -> Result<(), WindowError> {
//!     let app = window_shim::new_app("Hello Vulkan");
//!     app.configure(800, 600, 20, 20);
//!
//!     let consumer = {
//!         let app = app.clone();
//!         thread::spawn(move || {
//!             let events = app.event_channel();
//!             while let Some(event) = events.recv_blocking() {
//!                 if let Event::SystemClosed { window } = event {
//!                     // Destroy Vulkan objects here
//!                     app.acknowledge_close(window);
//!                     break;
//!                 }
//!             }
//!         })
//!     };
//!
//!     app.run()?;
//!     consumer.join().expect("consumer thread panicked");
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod config;
pub mod error;
pub mod events;
pub mod lifecycle;
pub mod logging;
pub mod platform;
pub mod surface;

mod app;
mod application;

pub use app::{new_app, new_app_with_settings, App, Driver, SharedAppState};
pub use application::{run_application, AppError, Application};
pub use error::{ConfigurationError, SurfaceCreationError, UsageError, WindowError};
pub use events::{Event, EventKind, EventReceiver, WindowId};

/// Common imports for shim users
pub mod prelude {
    pub use crate::{
        config::{Config, WindowConfig, WindowSettings},
        events::{Event, EventKind, EventReceiver, WindowId},
        lifecycle::WindowState,
        surface::{SurfaceFactory, VulkanSurfaceFactory},
        run_application, App, AppError, Application, SurfaceCreationError, WindowError,
    };
}
