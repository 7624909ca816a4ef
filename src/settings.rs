//! Player preferences
//!
//! Persisted separately from the best score in LocalStorage. Currently
//! just the player color, stored as the CSS hex string the color input
//! produces.

use serde::{Deserialize, Serialize};

use crate::consts::PLAYER_DEFAULT_COLOR;

/// Player preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Player color as a CSS hex string, e.g. "#00ff88"
    pub player_color: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_color: format!("#{:06x}", PLAYER_DEFAULT_COLOR),
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "bullet_dodger_settings";

    /// Player color as packed RGB, falling back to the default on a
    /// malformed string.
    pub fn player_color_rgb(&self) -> u32 {
        parse_hex_color(&self.player_color).unwrap_or(PLAYER_DEFAULT_COLOR)
    }

    pub fn set_player_color(&mut self, css: &str) {
        if parse_hex_color(css).is_some() {
            self.player_color = css.to_lowercase();
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

/// Parse "#rrggbb" (leading '#' optional) into packed RGB.
pub fn parse_hex_color(css: &str) -> Option<u32> {
    let hex = css.strip_prefix('#').unwrap_or(css);
    if hex.len() != 6 {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_css_hex_colors() {
        assert_eq!(parse_hex_color("#00ff88"), Some(0x00ff88));
        assert_eq!(parse_hex_color("FF0066"), Some(0xff0066));
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
    }

    #[test]
    fn default_color_round_trips() {
        let settings = Settings::default();
        assert_eq!(settings.player_color_rgb(), PLAYER_DEFAULT_COLOR);
    }

    #[test]
    fn malformed_color_is_rejected() {
        let mut settings = Settings::default();
        settings.set_player_color("not-a-color");
        assert_eq!(settings.player_color_rgb(), PLAYER_DEFAULT_COLOR);
        settings.set_player_color("#AA00FF");
        assert_eq!(settings.player_color_rgb(), 0xaa00ff);
        assert_eq!(settings.player_color, "#aa00ff");
    }
}
