//! Persisted viewer settings.

use serde::{Deserialize, Serialize};

use crate::state::Theme;

/// All viewer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerSettings {
    /// Viewport background theme
    pub theme: Theme,
    /// Start auto-rotation when a part finishes loading
    pub auto_rotate: bool,
    /// UI font size in points
    pub font_size: f32,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            auto_rotate: true,
            font_size: 14.0,
        }
    }
}

impl ViewerSettings {
    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        if let Some(dirs) = directories::ProjectDirs::from("com", "whiplab", "whiplab") {
            let config_path = dirs.config_dir().join("viewer.json");
            if let Ok(json) = std::fs::read_to_string(&config_path) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    return settings;
                }
            }
        }
        Self::default()
    }

    /// Save settings to file
    pub fn save(&self) {
        if let Some(dirs) = directories::ProjectDirs::from("com", "whiplab", "whiplab") {
            let config_dir = dirs.config_dir();
            if std::fs::create_dir_all(config_dir).is_ok() {
                let config_path = config_dir.join("viewer.json");
                if let Ok(json) = serde_json::to_string_pretty(self) {
                    let _ = std::fs::write(config_path, json);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_json_roundtrip() {
        let settings = ViewerSettings {
            theme: Theme::Light,
            auto_rotate: false,
            font_size: 16.0,
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: ViewerSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.theme, Theme::Light);
        assert!(!back.auto_rotate);
        assert_eq!(back.font_size, 16.0);
    }
}
