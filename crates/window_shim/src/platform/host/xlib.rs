//! X11 surfaces

use ash::extensions::khr;
use ash::vk;
use raw_window_handle::{RawDisplayHandle, RawWindowHandle};
use std::ffi::CStr;

use super::unsupported;
use crate::error::SurfaceCreationError;
use crate::platform::NativeHandle;

pub(super) fn platform_extensions() -> [&'static CStr; 1] {
    [khr::XlibSurface::name()]
}

pub(super) unsafe fn create_surface(
    entry: &ash::Entry,
    instance: &ash::Instance,
    handle: &NativeHandle,
) -> Result<vk::SurfaceKHR, SurfaceCreationError> {
    let (RawDisplayHandle::Xlib(display), RawWindowHandle::Xlib(window)) =
        (handle.display(), handle.window())
    else {
        return Err(unsupported(handle));
    };

    let create_info = vk::XlibSurfaceCreateInfoKHR::builder()
        .dpy(display.display.cast())
        .window(window.window);

    khr::XlibSurface::new(entry, instance)
        .create_xlib_surface(&create_info, None)
        .map_err(SurfaceCreationError::Rejected)
}
