//! Window geometry and settings
//!
//! Geometry is requested with plain integers where any negative value means
//! "let the platform decide". Substitution happens in [`WindowConfig::resolve`],
//! which the driver calls once, right before the native window is created.

use serde::{Deserialize, Serialize};

use super::Config;
use crate::error::ConfigurationError;

/// Width used when none is requested
pub const DEFAULT_WIDTH: u32 = 640;
/// Height used when none is requested
pub const DEFAULT_HEIGHT: u32 = 480;

/// Requested window geometry
///
/// For example `(800, 600, 20, 20)` asks for an 800x600 window placed 20 pixels
/// from the left and top edges of the screen. The drawable area may be
/// smaller depending on window decorations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowConfig {
    /// Requested width, negative for default
    pub width: i32,
    /// Requested height, negative for default
    pub height: i32,
    /// Offset from the left screen edge, negative for OS placement
    pub left: i32,
    /// Offset from the top screen edge, negative for OS placement
    pub top: i32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: -1,
            height: -1,
            left: -1,
            top: -1,
        }
    }
}

impl WindowConfig {
    /// Create a configuration from explicit values
    pub const fn new(width: i32, height: i32, left: i32, top: i32) -> Self {
        Self { width, height, left, top }
    }

    /// Substitute defaults for every negative value
    ///
    /// Each value defaults on its own: a valid width with a negative height
    /// keeps the width and takes the default height.
    pub fn resolve(&self) -> Result<Geometry, ConfigurationError> {
        let width = match self.width {
            0 => return Err(ConfigurationError::ZeroWidth),
            w if w < 0 => DEFAULT_WIDTH,
            w => w.unsigned_abs(),
        };
        let height = match self.height {
            0 => return Err(ConfigurationError::ZeroHeight),
            h if h < 0 => DEFAULT_HEIGHT,
            h => h.unsigned_abs(),
        };

        Ok(Geometry {
            width,
            height,
            left: (self.left >= 0).then_some(self.left),
            top: (self.top >= 0).then_some(self.top),
        })
    }
}

/// Geometry with defaults applied, consumed by the native layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    /// Width in screen coordinates
    pub width: u32,
    /// Height in screen coordinates
    pub height: u32,
    /// Left offset, `None` for OS placement
    pub left: Option<i32>,
    /// Top offset, `None` for OS placement
    pub top: Option<i32>,
}

/// File-backed window settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    /// Window title
    pub title: String,
    /// Requested width, negative for default
    pub width: i32,
    /// Requested height, negative for default
    pub height: i32,
    /// Left offset, negative for OS placement
    pub left: i32,
    /// Top offset, negative for OS placement
    pub top: i32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        let geometry = WindowConfig::default();
        Self {
            title: String::from("Vulkan Window"),
            width: geometry.width,
            height: geometry.height,
            left: geometry.left,
            top: geometry.top,
        }
    }
}

impl WindowSettings {
    /// The geometry part of these settings
    pub const fn geometry(&self) -> WindowConfig {
        WindowConfig::new(self.width, self.height, self.left, self.top)
    }
}

impl Config for WindowSettings {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;

    #[test]
    fn test_negative_values_resolve_to_defaults() {
        let geometry = WindowConfig::new(-1, -1, -1, -1).resolve().unwrap();
        assert_eq!(geometry.width, 640);
        assert_eq!(geometry.height, 480);
        assert_eq!(geometry.left, None);
        assert_eq!(geometry.top, None);
    }

    #[test]
    fn test_explicit_values_are_kept() {
        let geometry = WindowConfig::new(800, 600, 20, 20).resolve().unwrap();
        assert_eq!(
            geometry,
            Geometry { width: 800, height: 600, left: Some(20), top: Some(20) }
        );
    }

    #[test]
    fn test_each_dimension_defaults_independently() {
        let geometry = WindowConfig::new(1024, -5, 0, -1).resolve().unwrap();
        assert_eq!(geometry.width, 1024);
        assert_eq!(geometry.height, DEFAULT_HEIGHT);
        assert_eq!(geometry.left, Some(0));
        assert_eq!(geometry.top, None);
    }

    #[test]
    fn test_zero_size_is_rejected() {
        assert_eq!(
            WindowConfig::new(0, 600, -1, -1).resolve(),
            Err(ConfigurationError::ZeroWidth)
        );
        assert_eq!(
            WindowConfig::new(800, 0, -1, -1).resolve(),
            Err(ConfigurationError::ZeroHeight)
        );
    }

    #[test]
    fn test_settings_parse_partial_toml() {
        let settings = WindowSettings::parse("window.toml", "title = \"Demo\"\nwidth = 1280\n").unwrap();
        assert_eq!(settings.title, "Demo");
        assert_eq!(settings.geometry(), WindowConfig::new(1280, -1, -1, -1));
    }

    #[test]
    fn test_settings_parse_ron() {
        let settings = WindowSettings::parse("window.ron", "(height: 720, top: 40)").unwrap();
        assert_eq!(settings.geometry(), WindowConfig::new(-1, 720, -1, 40));
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let result = WindowSettings::parse("window.json", "{}");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let settings = WindowSettings::load_or_default("does/not/exist/window.toml").unwrap();
        assert_eq!(settings, WindowSettings::default());
    }

    #[test]
    fn test_saved_settings_load_back() {
        let settings = WindowSettings {
            title: String::from("Saved"),
            width: 1280,
            height: -1,
            left: 16,
            top: -1,
        };
        let dir = std::env::temp_dir();
        for extension in ["toml", "ron"] {
            let path = dir.join(format!("window_shim_settings_{}.{}", std::process::id(), extension));
            let path = path.to_str().unwrap();

            settings.save_to_file(path).unwrap();
            let loaded = WindowSettings::load_from_file(path);
            std::fs::remove_file(path).unwrap();
            assert_eq!(loaded.unwrap(), settings, "{}", extension);
        }
    }

    #[test]
    fn test_save_rejects_unknown_extension() {
        let path = std::env::temp_dir().join("window_shim_settings.json");
        let result = WindowSettings::default().save_to_file(path.to_str().unwrap());
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
        assert!(!path.exists());
    }
}
