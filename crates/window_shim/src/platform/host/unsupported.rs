//! Targets without a presentation path

use ash::vk;
use std::ffi::CStr;

use super::unsupported;
use crate::error::SurfaceCreationError;
use crate::platform::NativeHandle;

pub(super) fn platform_extensions() -> [&'static CStr; 0] {
    []
}

pub(super) unsafe fn create_surface(
    _entry: &ash::Entry,
    _instance: &ash::Instance,
    handle: &NativeHandle,
) -> Result<vk::SurfaceKHR, SurfaceCreationError> {
    Err(unsupported(handle))
}
