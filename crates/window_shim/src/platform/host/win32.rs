//! Win32 surfaces

use ash::extensions::khr;
use ash::vk;
use raw_window_handle::RawWindowHandle;
use std::ffi::CStr;

use super::unsupported;
use crate::error::SurfaceCreationError;
use crate::platform::NativeHandle;

pub(super) fn platform_extensions() -> [&'static CStr; 1] {
    [khr::Win32Surface::name()]
}

pub(super) unsafe fn create_surface(
    entry: &ash::Entry,
    instance: &ash::Instance,
    handle: &NativeHandle,
) -> Result<vk::SurfaceKHR, SurfaceCreationError> {
    let RawWindowHandle::Win32(window) = handle.window() else {
        return Err(unsupported(handle));
    };

    let create_info = vk::Win32SurfaceCreateInfoKHR::builder()
        .hinstance(window.hinstance as vk::HINSTANCE)
        .hwnd(window.hwnd as vk::HWND);

    khr::Win32Surface::new(entry, instance)
        .create_win32_surface(&create_info, None)
        .map_err(SurfaceCreationError::Rejected)
}
