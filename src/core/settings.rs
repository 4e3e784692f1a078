//! User-adjustable settings and the two-valued UI theme.
//!
//! Settings persist as one JSON object. Container-level serde defaults give
//! the load-time merge: keys present in the stored blob win, missing keys
//! keep the built-in defaults.

use serde::{Deserialize, Serialize};

pub const MEMORY_LIMIT_MIN: u32 = 1;
pub const MEMORY_LIMIT_MAX: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub auto_scroll: bool,
    pub show_timestamps: bool,
    pub sound_notifications: bool,
    pub memory_limit: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_scroll: true,
            show_timestamps: true,
            sound_notifications: false,
            memory_limit: 3,
        }
    }
}

impl Settings {
    /// Coerce an arbitrary memory-limit value into the accepted range.
    /// The control value is validated here, at the settings boundary, so
    /// nothing unbounded ever reaches the wire.
    pub fn clamp_memory_limit(value: u32) -> u32 {
        value.clamp(MEMORY_LIMIT_MIN, MEMORY_LIMIT_MAX)
    }
}

/// UI theme. Drives the whole palette, including the code-highlight theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Raw form used for persistence.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Anything other than "dark" falls back to light.
    pub fn parse(raw: &str) -> Theme {
        match raw.trim() {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.auto_scroll);
        assert!(settings.show_timestamps);
        assert!(!settings.sound_notifications);
        assert_eq!(settings.memory_limit, 3);
    }

    #[test]
    fn test_partial_blob_merges_over_defaults() {
        // Only two keys stored; the rest must keep built-in defaults.
        let settings: Settings =
            serde_json::from_str(r#"{"auto_scroll": false, "memory_limit": 5}"#).unwrap();
        assert!(!settings.auto_scroll);
        assert_eq!(settings.memory_limit, 5);
        assert!(settings.show_timestamps);
        assert!(!settings.sound_notifications);
    }

    #[test]
    fn test_empty_blob_is_all_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            auto_scroll: false,
            show_timestamps: false,
            sound_notifications: true,
            memory_limit: 7,
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_memory_limit_clamped_at_both_ends() {
        assert_eq!(Settings::clamp_memory_limit(0), MEMORY_LIMIT_MIN);
        assert_eq!(Settings::clamp_memory_limit(3), 3);
        assert_eq!(Settings::clamp_memory_limit(999), MEMORY_LIMIT_MAX);
    }

    #[test]
    fn test_theme_toggle_is_involutive() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
    }

    #[test]
    fn test_theme_parse() {
        assert_eq!(Theme::parse("dark"), Theme::Dark);
        assert_eq!(Theme::parse(" dark\n"), Theme::Dark);
        assert_eq!(Theme::parse("light"), Theme::Light);
        assert_eq!(Theme::parse("solarized"), Theme::Light);
        assert_eq!(Theme::parse(""), Theme::Light);
    }
}
