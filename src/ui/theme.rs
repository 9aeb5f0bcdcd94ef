use std::fs;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub header_bg: String,
    pub header_fg: String,
    pub category_fg: String,
    pub tile_bg: String,
    pub tile_visited_bg: String,
    pub tile_value: String,
    pub cursor: String,
    pub overlay_bg: String,
    pub overlay_fg: String,
    pub confirm_button: String,
    pub dismiss_button: String,
    pub text_muted: String,
    pub error: String,
}

impl Theme {
    pub fn load(name: &str) -> Option<Self> {
        // User themes shadow bundled ones
        if let Some(config_dir) = dirs::config_dir() {
            let user_theme_path = config_dir
                .join("trivia-board")
                .join("themes")
                .join(format!("{name}.toml"));
            if let Ok(content) = fs::read_to_string(&user_theme_path) {
                if let Ok(theme) = toml::from_str::<Theme>(&content) {
                    return Some(theme);
                }
            }
        }

        let filename = format!("{name}.toml");
        let file = ThemeAssets::get(&filename)?;
        let content = std::str::from_utf8(file.data.as_ref()).ok()?;
        toml::from_str::<Theme>(content).ok()
    }

    pub fn available_themes() -> Vec<String> {
        ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load("classic").unwrap_or_else(|| Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#0c0c0c".to_string(),
            fg: "#ffffff".to_string(),
            header_bg: "#051282".to_string(),
            header_fg: "#ffffff".to_string(),
            category_fg: "#ffffff".to_string(),
            tile_bg: "#0321b3".to_string(),
            tile_visited_bg: "#5f678e".to_string(),
            tile_value: "#f5ab00".to_string(),
            cursor: "#f5ab00".to_string(),
            overlay_bg: "#051282".to_string(),
            overlay_fg: "#ffffff".to_string(),
            confirm_button: "#f5ab00".to_string(),
            dismiss_button: "#f56500".to_string(),
            text_muted: "#8a8fa8".to_string(),
            error: "#f56500".to_string(),
        }
    }
}

impl ThemeColors {
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Color::Rgb(r, g, b);
            }
        }
        Color::White
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn header_bg(&self) -> Color { Self::parse_color(&self.header_bg) }
    pub fn header_fg(&self) -> Color { Self::parse_color(&self.header_fg) }
    pub fn category_fg(&self) -> Color { Self::parse_color(&self.category_fg) }
    pub fn tile_bg(&self) -> Color { Self::parse_color(&self.tile_bg) }
    pub fn tile_visited_bg(&self) -> Color { Self::parse_color(&self.tile_visited_bg) }
    pub fn tile_value(&self) -> Color { Self::parse_color(&self.tile_value) }
    pub fn cursor(&self) -> Color { Self::parse_color(&self.cursor) }
    pub fn overlay_bg(&self) -> Color { Self::parse_color(&self.overlay_bg) }
    pub fn overlay_fg(&self) -> Color { Self::parse_color(&self.overlay_fg) }
    pub fn confirm_button(&self) -> Color { Self::parse_color(&self.confirm_button) }
    pub fn dismiss_button(&self) -> Color { Self::parse_color(&self.dismiss_button) }
    pub fn text_muted(&self) -> Color { Self::parse_color(&self.text_muted) }
    pub fn error(&self) -> Color { Self::parse_color(&self.error) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_themes_parse() {
        let names = Theme::available_themes();
        assert!(names.contains(&"classic".to_string()));
        for name in names {
            assert!(Theme::load(&name).is_some(), "theme {name} failed to parse");
        }
    }

    #[test]
    fn test_parse_color_falls_back_to_white() {
        assert_eq!(ThemeColors::parse_color("#0321b3"), Color::Rgb(3, 33, 179));
        assert_eq!(ThemeColors::parse_color("nope"), Color::White);
    }
}
