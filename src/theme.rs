//! Theme colors for the visualizer, loaded from the user's kitty terminal
//! theme when one is available so the bars match the rest of the terminal.

use ratatui::style::Color;
use std::collections::HashMap;
use std::fs;

use crate::session::Highlight;

/// Theme colors for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    pub accent: Color,       // Active borders, highlights
    pub danger: Color,       // Errors, swap highlight
    pub success: Color,      // Finished sessions, place highlight
    pub warning: Color,      // Compare highlight, status messages
    pub text: Color,         // Primary text
    pub text_dim: Color,     // Dimmed text, idle bars' labels
    pub bg_selected: Color,  // Selection background
    pub inactive: Color,     // Inactive borders
    pub header: Color,       // Table/section headers, pivot highlight
}

impl Default for Theme {
    fn default() -> Self {
        // Catppuccin-inspired fallback when no terminal theme can be read
        Self {
            accent: Color::Rgb(137, 180, 250),
            danger: Color::Rgb(243, 139, 168),
            success: Color::Rgb(166, 218, 149),
            warning: Color::Rgb(249, 226, 175),
            text: Color::Rgb(205, 214, 244),
            text_dim: Color::Rgb(147, 153, 178),
            bg_selected: Color::Rgb(69, 71, 90),
            inactive: Color::Rgb(88, 91, 112),
            header: Color::Rgb(203, 166, 247),
        }
    }
}

impl Theme {
    /// Load theme from the terminal's kitty config, falling back to defaults.
    pub fn load() -> Self {
        Self::load_kitty_theme().unwrap_or_default()
    }

    /// Color for a bar carrying the given transient highlight.
    pub fn bar_color(&self, highlight: Highlight) -> Color {
        match highlight {
            Highlight::None => self.accent,
            Highlight::Compare => self.warning,
            Highlight::Swap => self.danger,
            Highlight::Divide => self.text_dim,
            Highlight::Merge => self.header,
            Highlight::Pivot => self.header,
            Highlight::Partition => self.warning,
            Highlight::Place => self.success,
            Highlight::MergeComplete => self.success,
        }
    }

    fn load_kitty_theme() -> Option<Self> {
        let home = dirs::home_dir()?;
        // Omarchy symlinks the active theme; plain kitty keeps its own conf
        let candidates = [
            home.join(".config/omarchy/current/theme/kitty.conf"),
            home.join(".config/kitty/kitty.conf"),
        ];

        let content = candidates
            .iter()
            .find_map(|path| fs::read_to_string(path).ok())?;
        let colors = Self::parse_kitty_conf(&content);

        if colors.is_empty() {
            return None;
        }

        let fallback = Theme::default();
        let pick = |keys: &[&str], fallback: Color| {
            keys.iter()
                .find_map(|k| colors.get(*k))
                .copied()
                .unwrap_or(fallback)
        };

        Some(Self {
            accent: pick(&["color4", "color12"], fallback.accent),
            danger: pick(&["color1", "color9"], fallback.danger),
            success: pick(&["color2", "color10"], fallback.success),
            warning: pick(&["color3", "color11"], fallback.warning),
            text: pick(&["foreground"], fallback.text),
            text_dim: pick(&["color8"], fallback.text_dim),
            bg_selected: pick(&["selection_background", "color0"], fallback.bg_selected),
            inactive: pick(&["inactive_border_color", "color8"], fallback.inactive),
            header: pick(&["color5", "color13"], fallback.header),
        })
    }

    /// Parse kitty.conf format: `key value` or `key #hexcolor`
    fn parse_kitty_conf(content: &str) -> HashMap<String, Color> {
        let mut colors = HashMap::new();

        for line in content.lines() {
            let line = line.trim();

            // Skip comments and empty lines
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.splitn(2, char::is_whitespace).collect();
            if parts.len() == 2 {
                if let Some(color) = Self::parse_hex_color(parts[1].trim()) {
                    colors.insert(parts[0].trim().to_string(), color);
                }
            }
        }

        colors
    }

    /// Parse a hex color string (#RRGGBB or #RGB)
    fn parse_hex_color(s: &str) -> Option<Color> {
        let s = s.trim().trim_start_matches('#');

        if s.len() == 6 {
            let r = u8::from_str_radix(&s[0..2], 16).ok()?;
            let g = u8::from_str_radix(&s[2..4], 16).ok()?;
            let b = u8::from_str_radix(&s[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        } else if s.len() == 3 {
            let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        } else {
            None
        }
    }
}
