//! Per-OS surface support
//!
//! Each target OS gets one variant exposing the same two functions:
//! the fixed instance extension list and the construction of that OS's
//! surface descriptor from a [`NativeHandle`].

use ash::extensions::khr;
use std::ffi::CStr;

use super::NativeHandle;
use crate::error::SurfaceCreationError;

#[cfg(target_os = "windows")]
#[path = "win32.rs"]
mod imp;

#[cfg(target_os = "macos")]
#[path = "metal.rs"]
mod imp;

#[cfg(all(unix, not(target_os = "macos")))]
#[path = "xlib.rs"]
mod imp;

#[cfg(not(any(unix, target_os = "windows")))]
#[path = "unsupported.rs"]
mod imp;

/// Instance extensions needed to present on this OS
///
/// Always the generic surface extension first, then the platform one.
pub fn required_extensions() -> Vec<&'static CStr> {
    let mut extensions = vec![khr::Surface::name()];
    extensions.extend(imp::platform_extensions());
    extensions
}

/// Build this OS's surface descriptor and hand it to Vulkan
///
/// # Safety
/// `instance` must have been created with [`required_extensions`] enabled,
/// and the window behind `handle` must stay alive for the duration of the call.
pub unsafe fn create_surface(
    entry: &ash::Entry,
    instance: &ash::Instance,
    handle: &NativeHandle,
) -> Result<ash::vk::SurfaceKHR, SurfaceCreationError> {
    imp::create_surface(entry, instance, handle)
}

fn unsupported(handle: &NativeHandle) -> SurfaceCreationError {
    SurfaceCreationError::UnsupportedHandle(format!("{:?}", handle.window()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_extensions_are_stable() {
        let first = required_extensions();
        let second = required_extensions();
        assert!(!first.is_empty());
        assert_eq!(first, second);
        assert_eq!(first[0].to_str().unwrap(), "VK_KHR_surface");
    }

    #[cfg(target_os = "windows")]
    #[test]
    fn test_windows_requests_win32_surface() {
        let names: Vec<&str> = required_extensions().iter().map(|e| e.to_str().unwrap()).collect();
        assert_eq!(names, ["VK_KHR_surface", "VK_KHR_win32_surface"]);
    }

    #[cfg(target_os = "macos")]
    #[test]
    fn test_macos_requests_metal_surface() {
        let names: Vec<&str> = required_extensions().iter().map(|e| e.to_str().unwrap()).collect();
        assert_eq!(names, ["VK_KHR_surface", "VK_EXT_metal_surface"]);
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    #[test]
    fn test_linux_requests_xlib_surface() {
        let names: Vec<&str> = required_extensions().iter().map(|e| e.to_str().unwrap()).collect();
        assert_eq!(names, ["VK_KHR_surface", "VK_KHR_xlib_surface"]);
    }
}
