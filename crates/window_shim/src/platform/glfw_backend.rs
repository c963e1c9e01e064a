//! Desktop window layer using GLFW
//!
//! GLFW owns the OS message pump on Windows, macOS and X11. This module
//! creates the window without a GL context, blocks in `wait_events` and
//! translates each GLFW event into an [`Event`].

use glfw::{Action, Context, WindowEvent};
use raw_window_handle::{HasRawDisplayHandle, HasRawWindowHandle};
use std::ffi::CStr;
use thiserror::Error;

use super::{host, NativeHandle, NativeWindowSystem, PumpStatus};
use crate::config::Geometry;
use crate::events::{Event, EventPublisher, WindowId};

/// GLFW window layer errors
#[derive(Error, Debug)]
pub enum GlfwError {
    /// GLFW could not be initialised
    #[error("GLFW initialization failed: {0}")]
    InitializationFailed(#[from] glfw::InitError),

    /// GLFW refused to create the window
    #[error("Window creation failed")]
    CreationFailed,
}

/// GLFW-backed native window layer
#[derive(Debug, Default, Clone, Copy)]
pub struct GlfwPlatform;

/// GLFW window with its library handle and event receiver
pub struct GlfwWindow {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, WindowEvent)>,
}

impl NativeWindowSystem for GlfwPlatform {
    type Window = GlfwWindow;
    type Error = GlfwError;

    fn create_window(
        &self,
        title: &str,
        geometry: &Geometry,
    ) -> Result<(GlfwWindow, NativeHandle), GlfwError> {
        let mut glfw = glfw::init(glfw::fail_on_errors)?;

        // Vulkan presents through its own surface, no GL context
        glfw.window_hint(glfw::WindowHint::ClientApi(glfw::ClientApiHint::NoApi));
        glfw.window_hint(glfw::WindowHint::Resizable(true));

        let (mut window, events) = glfw
            .create_window(geometry.width, geometry.height, title, glfw::WindowMode::Windowed)
            .ok_or(GlfwError::CreationFailed)?;

        if geometry.left.is_some() || geometry.top.is_some() {
            let (x, y) = window.get_pos();
            window.set_pos(geometry.left.unwrap_or(x), geometry.top.unwrap_or(y));
        }

        window.set_close_polling(true);
        window.set_cursor_pos_polling(true);
        window.set_mouse_button_polling(true);
        window.set_scroll_polling(true);
        window.set_key_polling(true);
        window.set_framebuffer_size_polling(true);
        window.set_focus_polling(true);

        let id = WindowId::from_raw(window.window_ptr() as usize as u64);
        // SAFETY: the handles come from the window just created; it is only
        // dropped in `destroy_window`, after the driver has released the handle.
        #[allow(unsafe_code)]
        let handle = unsafe {
            NativeHandle::new(id, window.raw_window_handle(), window.raw_display_handle())
        };
        log::debug!("GLFW window {} created ({}x{})", id, geometry.width, geometry.height);

        Ok((GlfwWindow { glfw, window, events }, handle))
    }

    fn pump(&self, native: &mut GlfwWindow, events: &EventPublisher) -> Result<PumpStatus, GlfwError> {
        native.glfw.wait_events();

        for (_, event) in glfw::flush_messages(&native.events) {
            if let Some(event) = translate(event) {
                events.publish(event);
            }
        }

        if native.window.should_close() {
            Ok(PumpStatus::CloseRequested)
        } else {
            Ok(PumpStatus::Continue)
        }
    }

    fn destroy_window(&self, native: GlfwWindow) {
        log::debug!("Destroying GLFW window");
        drop(native);
    }

    fn required_surface_extensions(&self) -> Vec<&'static CStr> {
        host::required_extensions()
    }
}

/// Map a GLFW event to a shim event
///
/// Close requests are not forwarded here; the pump reports them through
/// [`PumpStatus::CloseRequested`] so the driver can run the close handshake.
fn translate(event: WindowEvent) -> Option<Event> {
    match event {
        WindowEvent::CursorPos(x, y) => Some(Event::PointerMove { x, y }),
        WindowEvent::MouseButton(button, action, _) => Some(Event::PointerButton {
            button: u8::try_from(button as i32).unwrap_or(u8::MAX),
            pressed: action != Action::Release,
        }),
        WindowEvent::Scroll(dx, dy) => Some(Event::Scroll { dx, dy }),
        WindowEvent::Key(key, scancode, action, _) => Some(Event::Key {
            key: key as i32,
            scancode,
            pressed: action != Action::Release,
            repeat: action == Action::Repeat,
        }),
        WindowEvent::FramebufferSize(width, height) => Some(Event::Resized {
            width: u32::try_from(width).unwrap_or(0),
            height: u32::try_from(height).unwrap_or(0),
        }),
        WindowEvent::Focus(focused) => Some(Event::Focus(focused)),
        _ => None,
    }
}
