//! Vulkan surface creation from native window handles

use ash::vk;

use crate::error::SurfaceCreationError;
use crate::platform::{host, NativeHandle};

/// Graphics-API side of surface creation
///
/// The driver validates that a live native window exists and then lends its
/// handle to this collaborator; the borrow ends when the call returns and the
/// window cannot be destroyed while it lasts. The returned surface belongs
/// to the caller; the shim never inspects or destroys it.
pub trait SurfaceFactory {
    /// Create a presentation surface for `handle`
    fn create_surface(&self, handle: &NativeHandle) -> Result<vk::SurfaceKHR, SurfaceCreationError>;
}

/// Surface factory backed by a live Vulkan instance
///
/// The instance must have been created with the extensions reported by
/// [`App::required_surface_extensions`](crate::App::required_surface_extensions).
pub struct VulkanSurfaceFactory<'a> {
    entry: &'a ash::Entry,
    instance: &'a ash::Instance,
}

impl<'a> VulkanSurfaceFactory<'a> {
    /// Wrap a loaded entry and an instance created from it
    pub const fn new(entry: &'a ash::Entry, instance: &'a ash::Instance) -> Self {
        Self { entry, instance }
    }
}

impl SurfaceFactory for VulkanSurfaceFactory<'_> {
    #[allow(unsafe_code)]
    fn create_surface(&self, handle: &NativeHandle) -> Result<vk::SurfaceKHR, SurfaceCreationError> {
        // SAFETY: a `NativeHandle` is either lent by the driver while the read
        // guard keeps its window alive, or built through the unsafe constructor
        // whose contract requires a live window. The instance was built with
        // the host extensions.
        let surface = unsafe { host::create_surface(self.entry, self.instance, handle)? };
        log::info!("Created Vulkan surface for {}", handle.id());
        Ok(surface)
    }
}
