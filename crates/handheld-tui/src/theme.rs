//! Color theme for the TUI.
//!
//! A semantic palette built on Tailwind CSS slate colors.

use ratatui::style::{Color, Modifier, Style};

use crate::app::StatusKind;

/// Color theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,

    // Selection
    pub selected: Style,
    pub selected_inactive: Style,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    // UI elements
    pub border: Style,
    pub border_active: Style,
    pub title: Style,
    pub help_key: Style,
    pub help_desc: Style,

    // Entries
    pub directory: Style,
    pub file: Style,
    pub drive: Style,

    // Progress
    pub progress_bar: Style,

    // Header/Footer
    pub header: Style,
    pub footer: Style,
}

impl Theme {
    /// Dark theme using a slate-based palette.
    pub fn dark() -> Self {
        // Slate palette (Tailwind CSS)
        let slate_50 = Color::Rgb(248, 250, 252);
        let slate_100 = Color::Rgb(241, 245, 249);
        let slate_300 = Color::Rgb(203, 213, 225);
        let slate_400 = Color::Rgb(148, 163, 184);
        let slate_500 = Color::Rgb(100, 116, 139);
        let slate_600 = Color::Rgb(71, 85, 105);
        let slate_700 = Color::Rgb(51, 65, 85);
        let slate_800 = Color::Rgb(30, 41, 59);
        let slate_900 = Color::Rgb(15, 23, 42);

        // Accent colors (Tailwind CSS)
        let blue_400 = Color::Rgb(96, 165, 250);
        let blue_500 = Color::Rgb(59, 130, 246);
        let green_500 = Color::Rgb(34, 197, 94);
        let yellow_500 = Color::Rgb(234, 179, 8);
        let red_500 = Color::Rgb(239, 68, 68);
        let amber_500 = Color::Rgb(245, 158, 11);

        Self {
            background: slate_900,
            foreground: slate_100,
            muted: slate_500,

            selected: Style::new().bg(slate_700).fg(slate_50).add_modifier(Modifier::BOLD),
            selected_inactive: Style::new().bg(slate_800).fg(slate_300),

            success: green_500,
            warning: yellow_500,
            error: red_500,
            info: blue_400,

            border: Style::new().fg(slate_600),
            border_active: Style::new().fg(blue_400),
            title: Style::new().fg(blue_400).add_modifier(Modifier::BOLD),
            help_key: Style::new().fg(blue_400).add_modifier(Modifier::BOLD),
            help_desc: Style::new().fg(slate_400),

            directory: Style::new().fg(blue_500).add_modifier(Modifier::BOLD),
            file: Style::new().fg(slate_300),
            drive: Style::new().fg(amber_500).add_modifier(Modifier::BOLD),

            progress_bar: Style::new().fg(blue_500),

            header: Style::new().bg(slate_800).fg(slate_100),
            footer: Style::new().bg(slate_800).fg(slate_400),
        }
    }

    /// Color for a status line message.
    pub fn status_color(&self, kind: StatusKind) -> Color {
        match kind {
            StatusKind::Info => self.info,
            StatusKind::Success => self.success,
            StatusKind::Error => self.error,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
