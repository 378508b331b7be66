//! Palette appearance settings
//!
//! Stored under the `settings` key. Missing fields take their defaults, so a
//! partially written object still loads.

use serde::{Deserialize, Deserializer, Serialize};

const BASE_WIDTH: f64 = 600.0;
const BASE_HEIGHT: f64 = 400.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    #[default]
    Comfortable,
    Compact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteSettings {
    pub theme: String,
    pub accent: String,
    pub density: Density,
    #[serde(deserialize_with = "lenient_f64")]
    pub opacity: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub scale: f64,
}

impl Default for PaletteSettings {
    fn default() -> Self {
        Self {
            theme: "chrome-dark".to_string(),
            accent: "#fe8017".to_string(),
            density: Density::Comfortable,
            opacity: 1.0,
            scale: 1.0,
        }
    }
}

/// Overlay frame size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl PaletteSettings {
    /// Scale factor, with unusable values treated as 1.0
    pub fn effective_scale(&self) -> f64 {
        if self.scale.is_finite() && self.scale > 0.0 {
            self.scale
        } else {
            1.0
        }
    }

    pub fn frame_size(&self) -> FrameSize {
        let scale = self.effective_scale();
        FrameSize {
            width: (BASE_WIDTH * scale).round() as u32,
            height: (BASE_HEIGHT * scale).round() as u32,
        }
    }
}

/// Accepts `1.25` as well as `"1.25"`
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => Ok(n),
        NumberOrText::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
