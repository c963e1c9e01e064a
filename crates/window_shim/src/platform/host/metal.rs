//! Metal surfaces
//!
//! Vulkan on macOS presents through a `CAMetalLayer`. ash-window attaches the
//! layer to the window's content view and fills in the Metal descriptor.

use ash::extensions::ext;
use ash::vk;
use raw_window_handle::RawWindowHandle;
use std::ffi::CStr;

use super::unsupported;
use crate::error::SurfaceCreationError;
use crate::platform::NativeHandle;

pub(super) fn platform_extensions() -> [&'static CStr; 1] {
    [ext::MetalSurface::name()]
}

pub(super) unsafe fn create_surface(
    entry: &ash::Entry,
    instance: &ash::Instance,
    handle: &NativeHandle,
) -> Result<vk::SurfaceKHR, SurfaceCreationError> {
    if !matches!(handle.window(), RawWindowHandle::AppKit(_)) {
        return Err(unsupported(handle));
    }

    ash_window::create_surface(entry, instance, handle.display(), handle.window(), None)
        .map_err(SurfaceCreationError::Rejected)
}
