//! # Theme
//!
//! Colors used by the launcher, grouped by semantic role. Rendering code
//! references theme fields instead of hardcoding `ratatui::style::Color`
//! values.

use ratatui::style::{Color, Modifier, Style};

/// All colors used by the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Primary text color (list names, output text).
    pub fg: Color,
    /// Muted/secondary text (categories, hints, footer).
    pub fg_dim: Color,

    /// Focused borders and the selected-item background.
    pub accent: Color,
    /// Text drawn on top of `accent`.
    pub on_accent: Color,
    /// Headers and the filter prompt.
    pub secondary: Color,

    /// Error text under the output panel.
    pub error: Color,
}

impl Theme {
    /// The palette the launcher ships with (Catppuccin Mocha).
    pub fn default_theme() -> &'static Theme {
        &DEFAULT_THEME
    }

    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.on_accent)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn hint(&self) -> Style {
        Style::default().fg(self.fg_dim)
    }

    pub fn error_text(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }
}

impl Default for Theme {
    fn default() -> Self {
        DEFAULT_THEME.clone()
    }
}

static DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),        // text
    fg_dim: Color::Rgb(108, 112, 134),    // overlay0
    accent: Color::Rgb(137, 180, 250),    // blue
    on_accent: Color::Rgb(30, 30, 46),    // base
    secondary: Color::Rgb(249, 226, 175), // yellow
    error: Color::Rgb(243, 139, 168),     // red
};
