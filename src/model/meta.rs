//! Per-radargram metadata supplied by the backend.

use serde::{Deserialize, Serialize};

/// Subjective difficulty of interpreting a radargram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// All difficulty levels, in display order.
    pub fn all() -> &'static [Difficulty] {
        &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }

    /// Display label for this level.
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Constants of the radargram under annotation.
///
/// Fetched from the backend at session start. The metadata endpoint also
/// carries tile, track and bounds data for the map display; those fields are
/// consumed elsewhere and simply ignored here. `difficulty` and `comment`
/// are the only fields the session may edit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadargramMeta {
    /// Unique identifier of the radargram.
    pub radar_key: String,
    /// Canonical pixel width.
    pub width: u32,
    /// Canonical pixel height.
    pub height: u32,
    /// Display-to-canonical horizontal stretch. Radargrams recorded with
    /// slow trace rates are stretched horizontally for display; stored
    /// coordinates stay in canonical space.
    #[serde(default = "default_xscale")]
    pub xscale: f64,
    /// Difficulty chosen by the annotator, if any.
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    /// Free-form annotator comment, if any.
    #[serde(default)]
    pub comment: Option<String>,
}

fn default_xscale() -> f64 {
    1.0
}

impl RadargramMeta {
    /// Create metadata with the default `xscale` of 1.
    pub fn new(radar_key: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            radar_key: radar_key.into(),
            width,
            height,
            xscale: 1.0,
            difficulty: None,
            comment: None,
        }
    }

    /// Set the horizontal display stretch.
    pub fn with_xscale(mut self, xscale: f64) -> Self {
        self.xscale = xscale;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xscale_defaults_to_one() {
        let json = r#"{"radar_key": "dronbreen-20220329-DAT_0236_A1_2", "width": 4096, "height": 900}"#;
        let meta: RadargramMeta = serde_json::from_str(json).unwrap();
        assert_eq!(meta.xscale, 1.0);
        assert!(meta.difficulty.is_none());
    }

    #[test]
    fn test_extended_backend_fields_are_ignored() {
        // The meta endpoint response carries map-display fields the engine
        // does not model.
        let json = r#"{
            "radar_key": "amenfonna-20240510-DAT_0044_A1_1",
            "width": 2000,
            "height": 700,
            "xscale": 3.0,
            "antenna": "50MHz",
            "bounds": {"minlat": 78.1, "maxlat": 78.2, "minlon": 16.0, "maxlon": 16.4},
            "tiles": []
        }"#;
        let meta: RadargramMeta = serde_json::from_str(json).unwrap();
        assert_eq!(meta.xscale, 3.0);
        assert_eq!(meta.width, 2000);
    }

    #[test]
    fn test_difficulty_wire_values() {
        assert_eq!(serde_json::to_string(&Difficulty::Easy).unwrap(), "\"easy\"");
        let level: Difficulty = serde_json::from_str("\"hard\"").unwrap();
        assert_eq!(level, Difficulty::Hard);
    }
}
