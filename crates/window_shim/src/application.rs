//! Application trait and the consumer-side frame loop

use std::time::Instant;
use thiserror::Error;

use crate::app::App;
use crate::error::SurfaceCreationError;
use crate::events::{Event, WindowId};

/// Application lifecycle trait
///
/// Implement this to let [`run_application`] drive the consumer side of the
/// window: it waits for the window, drains events, renders frames and
/// completes the close handshake.
pub trait Application {
    /// Initialize the application
    ///
    /// Called once after `SystemCreated`. Create the graphics instance and
    /// surface here.
    fn initialize(&mut self, app: &dyn App) -> Result<(), AppError>;

    /// Handle one forwarded window or input event
    fn handle_event(&mut self, _event: &Event) -> Result<(), AppError> {
        Ok(())
    }

    /// Render one frame after the event queue has been drained
    ///
    /// # Arguments
    /// * `delta_time` - Time since the previous frame in seconds
    fn render_frame(&mut self, delta_time: f32) -> Result<(), AppError>;

    /// Cleanup the application
    ///
    /// Called when the window is closing, before the close is acknowledged.
    /// Destroy every graphics object tied to the window here.
    fn cleanup(&mut self);
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Surface could not be created
    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceCreationError),

    /// Graphics API failure
    #[error("Graphics error: {0}")]
    Graphics(String),

    /// First event on the channel was not `SystemCreated`
    #[error("Expected SystemCreated to start the event loop, got {0:?}")]
    UnexpectedFirstEvent(Event),

    /// The window system failed instead of closing normally
    #[error("Window system failed: {0}")]
    WindowFailed(String),

    /// Event channel closed before the window did
    #[error("Event channel disconnected")]
    ChannelClosed,

    /// Custom application error
    #[error("Application error: {0}")]
    Custom(String),
}

/// Run the consumer loop until the window closes
///
/// Blocks for the first event, which must be `SystemCreated`, then repeats:
/// drain all pending events, render one frame. On `SystemClosed` it calls
/// [`Application::cleanup`], acknowledges the close and returns. On
/// `SystemFailed` it calls `cleanup` and returns [`AppError::WindowFailed`].
///
/// If the application fails after the window was created, rendering stops
/// but the loop keeps waiting for the close request so the handshake still
/// completes; the error is returned afterwards.
pub fn run_application<A: Application + ?Sized>(app: &dyn App, application: &mut A) -> Result<(), AppError> {
    let events = app.event_channel();

    match events.recv_blocking() {
        Some(Event::SystemCreated) => {}
        Some(Event::SystemFailed { reason }) => return Err(AppError::WindowFailed(reason)),
        Some(other) => return Err(AppError::UnexpectedFirstEvent(other)),
        None => return Err(AppError::ChannelClosed),
    }

    if let Err(err) = application.initialize(app) {
        log::error!("Application initialization failed: {}", err);
        return finish_after_failure(app, application, err);
    }

    let mut last_frame = Instant::now();
    loop {
        for event in events.drain() {
            match event {
                Event::SystemClosed { window } => {
                    close(app, application, window);
                    return Ok(());
                }
                Event::SystemFailed { reason } => {
                    log::error!("Window system failed: {}", reason);
                    application.cleanup();
                    return Err(AppError::WindowFailed(reason));
                }
                _ => {}
            }
            if let Err(err) = application.handle_event(&event) {
                log::error!("Event handling failed: {}", err);
                return finish_after_failure(app, application, err);
            }
        }

        let now = Instant::now();
        let delta_time = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;

        if let Err(err) = application.render_frame(delta_time) {
            log::error!("Frame rendering failed: {}", err);
            return finish_after_failure(app, application, err);
        }
    }
}

fn close<A: Application + ?Sized>(app: &dyn App, application: &mut A, window: WindowId) {
    log::info!("Cleaning up before closing {}", window);
    application.cleanup();
    app.acknowledge_close(window);
}

fn finish_after_failure<A: Application + ?Sized>(
    app: &dyn App,
    application: &mut A,
    err: AppError,
) -> Result<(), AppError> {
    log::warn!("Rendering stopped, waiting for the window to close");
    let events = app.event_channel();
    while let Some(event) = events.recv_blocking() {
        match event {
            Event::SystemClosed { window } => {
                close(app, application, window);
                break;
            }
            Event::SystemFailed { .. } => {
                application.cleanup();
                break;
            }
            _ => {}
        }
    }
    Err(err)
}
