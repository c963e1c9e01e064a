//! Surface demo: opens a window, builds a Vulkan surface for it and closes cleanly

use ash::extensions::khr;
use ash::vk;
use std::ffi::CString;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use window_shim::prelude::*;

const FRAME_TIME: Duration = Duration::from_millis(16);
const SETTINGS_PATH: &str = "window.toml";

/// Vulkan objects tied to the window
struct VulkanState {
    _entry: ash::Entry,
    instance: ash::Instance,
    surface_loader: khr::Surface,
    surface: vk::SurfaceKHR,
}

impl VulkanState {
    fn new(app: &dyn App) -> Result<Self, AppError> {
        let entry = unsafe { ash::Entry::load() }
            .map_err(|e| AppError::Graphics(format!("Failed to load Vulkan: {}", e)))?;

        let app_name = CString::new("surface_demo").map_err(|e| AppError::Custom(e.to_string()))?;
        let app_info = vk::ApplicationInfo::builder()
            .application_name(&app_name)
            .application_version(vk::make_api_version(0, 0, 1, 0))
            .api_version(vk::API_VERSION_1_0);

        let extensions = app.required_surface_extensions();
        log::info!("Enabling instance extensions: {:?}", extensions);
        let extension_ptrs: Vec<_> = extensions.iter().map(|name| name.as_ptr()).collect();

        let create_info = vk::InstanceCreateInfo::builder()
            .application_info(&app_info)
            .enabled_extension_names(&extension_ptrs);

        let instance = unsafe { entry.create_instance(&create_info, None) }
            .map_err(|e| AppError::Graphics(format!("Failed to create instance: {:?}", e)))?;

        let surface = match app.create_surface(&VulkanSurfaceFactory::new(&entry, &instance)) {
            Ok(surface) => surface,
            Err(err) => {
                unsafe { instance.destroy_instance(None) };
                return Err(err.into());
            }
        };
        let surface_loader = khr::Surface::new(&entry, &instance);

        Ok(Self {
            _entry: entry,
            instance,
            surface_loader,
            surface,
        })
    }
}

impl Drop for VulkanState {
    fn drop(&mut self) {
        unsafe {
            self.surface_loader.destroy_surface(self.surface, None);
            self.instance.destroy_instance(None);
        }
        log::info!("Vulkan surface and instance destroyed");
    }
}

#[derive(Default)]
struct SurfaceDemo {
    vulkan: Option<VulkanState>,
    frames: u64,
    elapsed: f32,
}

impl Application for SurfaceDemo {
    fn initialize(&mut self, app: &dyn App) -> Result<(), AppError> {
        self.vulkan = Some(VulkanState::new(app)?);
        Ok(())
    }

    fn handle_event(&mut self, event: &Event) -> Result<(), AppError> {
        match event {
            Event::Resized { width, height } => log::info!("Surface resized to {}x{}", width, height),
            Event::Focus(focused) => log::info!("Focus {}", if *focused { "gained" } else { "lost" }),
            other => log::trace!("{:?}", other),
        }
        Ok(())
    }

    fn render_frame(&mut self, delta_time: f32) -> Result<(), AppError> {
        self.frames += 1;
        self.elapsed += delta_time;
        if self.elapsed >= 5.0 {
            log::info!("{} frames, {:.1} fps", self.frames, self.frames as f32 / self.elapsed);
            self.frames = 0;
            self.elapsed = 0.0;
        }
        thread::sleep(FRAME_TIME);
        Ok(())
    }

    fn cleanup(&mut self) {
        self.vulkan = None;
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    window_shim::logging::init_with_level(log::LevelFilter::Info);

    log::info!("Starting surface demo");
    let settings = WindowSettings::load_or_default(SETTINGS_PATH)?;
    let app = window_shim::new_app_with_settings(&settings);

    let render_thread = {
        let app = Arc::clone(&app);
        thread::Builder::new()
            .name("render".to_string())
            .spawn(move || run_application(app.as_ref(), &mut SurfaceDemo::default()))?
    };

    app.run()?;

    match render_thread.join() {
        Ok(result) => result?,
        Err(_) => return Err("render thread panicked".into()),
    }

    log::info!("Surface demo finished");
    Ok(())
}
