use std::str::FromStr;

use ratatui::style::Color;

use crate::calendar::category::{category_color, DEFAULT_MARKER_COLOR};

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub title: Color,
    pub border: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub today: Color,
    pub active_day: Color,
    pub empty_day: Color,
    pub weekday_header: Color,
    pub map_outline: Color,
    pub status_bar: Color,
    pub command_mode: Color,
    pub error: Color,
    pub success: Color,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            name: "default".to_string(),
            title: Color::Cyan,
            border: Color::Gray,
            selected_bg: Color::Blue,
            selected_fg: Color::White,
            today: Color::Green,
            active_day: Color::Cyan,
            empty_day: Color::DarkGray,
            weekday_header: Color::Yellow,
            map_outline: Color::DarkGray,
            status_bar: Color::White,
            command_mode: Color::White,
            error: Color::Red,
            success: Color::Green,
        }
    }

    pub fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            title: Color::Rgb(251, 184, 108),
            border: Color::Rgb(146, 131, 116),
            selected_bg: Color::Rgb(60, 56, 54),
            selected_fg: Color::Rgb(235, 219, 178),
            today: Color::Rgb(184, 187, 38),
            active_day: Color::Rgb(142, 192, 124),
            empty_day: Color::Rgb(102, 92, 84),
            weekday_header: Color::Rgb(254, 128, 25),
            map_outline: Color::Rgb(124, 111, 100),
            status_bar: Color::Rgb(235, 219, 178),
            command_mode: Color::Rgb(235, 219, 178),
            error: Color::Rgb(251, 73, 52),
            success: Color::Rgb(184, 187, 38),
        }
    }

    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            title: Color::Rgb(136, 192, 208),
            border: Color::Rgb(76, 86, 106),
            selected_bg: Color::Rgb(59, 66, 82),
            selected_fg: Color::Rgb(236, 239, 244),
            today: Color::Rgb(163, 190, 140),
            active_day: Color::Rgb(129, 161, 193),
            empty_day: Color::Rgb(76, 86, 106),
            weekday_header: Color::Rgb(235, 203, 139),
            map_outline: Color::Rgb(67, 76, 94),
            status_bar: Color::Rgb(216, 222, 233),
            command_mode: Color::Rgb(216, 222, 233),
            error: Color::Rgb(191, 97, 106),
            success: Color::Rgb(163, 190, 140),
        }
    }

    pub fn get_by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "gruvbox" => Self::gruvbox(),
            "nord" => Self::nord(),
            _ => Self::default_theme(),
        }
    }

    pub fn available_themes() -> Vec<&'static str> {
        vec!["default", "gruvbox", "nord"]
    }

    /// Terminal color for a category's marker.
    pub fn category_color(&self, category: &str) -> Color {
        parse_hex_color(category_color(category))
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}

pub fn parse_hex_color(hex: &str) -> Color {
    Color::from_str(hex)
        .or_else(|_| Color::from_str(DEFAULT_MARKER_COLOR))
        .unwrap_or(Color::Blue)
}
