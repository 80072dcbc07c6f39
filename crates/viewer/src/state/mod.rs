pub mod settings;

use serde::{Deserialize, Serialize};

pub use settings::ViewerSettings;

/// Load lifecycle of the currently selected part.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    /// No part selected yet
    #[default]
    Idle,
    /// Bytes are being fetched or were just handed to the decoder
    Loading,
    /// Mesh is in the scene and rendering
    Ready,
    /// Fetch or decode failed; the message is shown with a retry affordance
    Error(String),
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, LoadStatus::Ready)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadStatus::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Viewport background theme. Switching only swaps the clear color and the
/// egui visuals; mesh, camera, and rotation state are untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Fixed viewport clear color for this theme.
    pub fn background(&self) -> [u8; 3] {
        match self {
            Theme::Dark => [24, 26, 31],
            Theme::Light => [235, 236, 240],
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Summary of a decoded part shown in the status bar, captured before the
/// geometry is normalized into view space.
#[derive(Debug, Clone, Copy)]
pub struct PartInfo {
    pub triangles: usize,
    /// Bounding-box extent in the file's native units (millimeters by convention)
    pub size: [f32; 3],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accessors() {
        assert!(LoadStatus::Loading.is_loading());
        assert!(LoadStatus::Ready.is_ready());
        assert_eq!(
            LoadStatus::Error("boom".to_string()).error(),
            Some("boom")
        );
        assert_eq!(LoadStatus::Idle.error(), None);
    }

    #[test]
    fn test_theme_toggle_swaps_background() {
        let dark = Theme::Dark;
        assert_eq!(dark.toggled(), Theme::Light);
        assert_eq!(dark.toggled().toggled(), Theme::Dark);
        assert_ne!(dark.background(), Theme::Light.background());
    }
}
