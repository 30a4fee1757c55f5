use ratatui::style::Color;

use crate::model::config::ThemeName;
use crate::model::task::Priority;
use crate::ops::stats::DueBucket;

/// Color palette for the dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub cyan: Color,
    pub selection_bg: Color,
    pub border: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Theme {
            background: Color::Rgb(0x0E, 0x11, 0x17),
            text: Color::Rgb(0xD0, 0xD4, 0xDC),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7D, 0x80, 0x8A),
            red: Color::Rgb(0xFF, 0x2B, 0x2B),
            yellow: Color::Rgb(0xF0, 0xC8, 0x08),
            green: Color::Rgb(0x2B, 0xA8, 0x4A),
            cyan: Color::Rgb(0x44, 0xDD, 0xFF),
            selection_bg: Color::Rgb(0x26, 0x27, 0x30),
            border: Color::Rgb(0x3A, 0x3B, 0x45),
        }
    }

    pub fn light() -> Self {
        Theme {
            background: Color::Rgb(0xFF, 0xFF, 0xFF),
            text: Color::Rgb(0x31, 0x33, 0x3F),
            text_bright: Color::Rgb(0x00, 0x00, 0x00),
            highlight: Color::Rgb(0xD6, 0x1F, 0x69),
            dim: Color::Rgb(0x8A, 0x8D, 0x96),
            red: Color::Rgb(0xFF, 0x2B, 0x2B),
            yellow: Color::Rgb(0xC9, 0x9A, 0x00),
            green: Color::Rgb(0x2B, 0xA8, 0x4A),
            cyan: Color::Rgb(0x00, 0x7A, 0x99),
            selection_bg: Color::Rgb(0xE6, 0xE8, 0xF0),
            border: Color::Rgb(0xC8, 0xCA, 0xD2),
        }
    }

    pub fn for_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Light => Theme::light(),
            ThemeName::Dark => Theme::dark(),
        }
    }

    /// High red, Medium yellow, Low green
    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::High => self.red,
            Priority::Medium => self.yellow,
            Priority::Low => self.green,
        }
    }

    pub fn bucket_color(&self, bucket: DueBucket) -> Color {
        match bucket {
            DueBucket::Overdue => self.red,
            DueBucket::DueSoon => self.yellow,
            DueBucket::Future => self.cyan,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::light()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn themes_differ_in_background_only_for_presentation() {
        let light = Theme::for_name(ThemeName::Light);
        let dark = Theme::for_name(ThemeName::Dark);
        assert_ne!(light.background, dark.background);
        assert_eq!(light.priority_color(Priority::High), dark.priority_color(Priority::High));
    }
}
