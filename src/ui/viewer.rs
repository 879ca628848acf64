//! # Output Viewer
//!
//! A fixed-size, rounded-border text region showing the output of the last
//! run. Content is never wrapped: long lines scroll horizontally and long
//! output scrolls vertically. ANSI color codes in the output are rendered as
//! styles, and all sizes are measured on the visible text.

use crate::ui::ansi;
use crate::ui::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Text},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// Outer width of the output frame, borders included.
pub const VIEWPORT_WIDTH: u16 = 80;
/// Outer height of the output frame, borders included.
pub const VIEWPORT_HEIGHT: u16 = 16;

const HORIZONTAL_STEP: u16 = 4;

pub struct OutputViewer {
    content: String,
    text: Text<'static>,
    line_count: usize,
    max_line_width: usize,
    scroll: u16,
    h_scroll: u16,
    /// Inner size of the frame at the last render.
    height: u16,
    width: u16,
}

impl Default for OutputViewer {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputViewer {
    pub fn new() -> Self {
        Self {
            content: String::new(),
            text: Text::default(),
            line_count: 0,
            max_line_width: 0,
            scroll: 0,
            h_scroll: 0,
            height: VIEWPORT_HEIGHT - 2,
            width: VIEWPORT_WIDTH - 2,
        }
    }

    /// Replace the displayed text and jump back to the top-left corner.
    pub fn set_content(&mut self, text: impl Into<String>) {
        self.content = text.into();
        self.text = ansi::to_text(&self.content);
        self.line_count = self.text.lines.len();
        self.max_line_width = self.text.lines.iter().map(Line::width).max().unwrap_or(0);
        self.scroll = 0;
        self.h_scroll = 0;
    }

    /// The text as it was set, escape sequences included.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Current `(vertical, horizontal)` scroll offsets.
    pub fn scroll(&self) -> (u16, u16) {
        (self.scroll, self.h_scroll)
    }

    fn max_scroll(&self) -> u16 {
        let max = self.line_count.saturating_sub(usize::from(self.height));
        u16::try_from(max).unwrap_or(u16::MAX)
    }

    fn max_h_scroll(&self) -> u16 {
        let max = self.max_line_width.saturating_sub(usize::from(self.width));
        u16::try_from(max).unwrap_or(u16::MAX)
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines).min(self.max_scroll());
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }

    pub fn scroll_right(&mut self) {
        self.h_scroll = self
            .h_scroll
            .saturating_add(HORIZONTAL_STEP)
            .min(self.max_h_scroll());
    }

    pub fn scroll_left(&mut self) {
        self.h_scroll = self.h_scroll.saturating_sub(HORIZONTAL_STEP);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let has_ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let half_page = (self.height / 2).max(1);

        match key.code {
            KeyCode::Char('d') if has_ctrl => self.scroll_down(half_page),
            KeyCode::Char('u') if has_ctrl => self.scroll_up(half_page),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_down(1),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_up(1),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_down(self.height.max(1)),
            KeyCode::PageUp => self.scroll_up(self.height.max(1)),
            KeyCode::Home | KeyCode::Char('g') => self.scroll_to_top(),
            KeyCode::End | KeyCode::Char('G') => self.scroll_to_bottom(),
            KeyCode::Right | KeyCode::Char('l') => self.scroll_right(),
            KeyCode::Left | KeyCode::Char('h') => self.scroll_left(),
            _ => {}
        }
    }

    /// The frame occupies at most `VIEWPORT_WIDTH` x `VIEWPORT_HEIGHT` of `area`.
    pub fn frame_area(area: Rect) -> Rect {
        Rect {
            x: area.x,
            y: area.y,
            width: VIEWPORT_WIDTH.min(area.width),
            height: VIEWPORT_HEIGHT.min(area.height),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let rect = Self::frame_area(area);
        self.height = rect.height.saturating_sub(2);
        self.width = rect.width.saturating_sub(2);
        self.scroll = self.scroll.min(self.max_scroll());
        self.h_scroll = self.h_scroll.min(self.max_h_scroll());

        let paragraph = Paragraph::new(self.text.clone())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(theme.accent)),
            )
            .style(Style::default().fg(theme.fg))
            .scroll((self.scroll, self.h_scroll));

        frame.render_widget(paragraph, rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, style::Color, Terminal};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn numbered_lines(count: usize) -> String {
        (1..=count)
            .map(|i| format!("line {}", i))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_set_content_resets_scroll() {
        let mut viewer = OutputViewer::new();
        viewer.set_content(numbered_lines(100));
        viewer.scroll_down(10);
        assert_eq!(viewer.scroll(), (10, 0));

        viewer.set_content("fresh");
        assert_eq!(viewer.scroll(), (0, 0));
        assert_eq!(viewer.content(), "fresh");
    }

    #[test]
    fn test_scroll_is_clamped_to_content() {
        let mut viewer = OutputViewer::new();
        viewer.set_content(numbered_lines(20));
        viewer.handle_key(key(KeyCode::End));
        // 20 lines in a 14-row viewport
        assert_eq!(viewer.scroll().0, 6);
        viewer.handle_key(key(KeyCode::Down));
        assert_eq!(viewer.scroll().0, 6);
        viewer.handle_key(key(KeyCode::Home));
        assert_eq!(viewer.scroll().0, 0);
        viewer.handle_key(key(KeyCode::Up));
        assert_eq!(viewer.scroll().0, 0);
    }

    #[test]
    fn test_short_content_does_not_scroll() {
        let mut viewer = OutputViewer::new();
        viewer.set_content("only one line");
        viewer.handle_key(key(KeyCode::PageDown));
        viewer.handle_key(key(KeyCode::Right));
        assert_eq!(viewer.scroll(), (0, 0));
    }

    #[test]
    fn test_half_page_scrolling() {
        let mut viewer = OutputViewer::new();
        viewer.set_content(numbered_lines(100));
        viewer.handle_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL));
        assert_eq!(viewer.scroll().0, 7);
        viewer.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(viewer.scroll().0, 0);
    }

    #[test]
    fn test_horizontal_scroll_for_long_lines() {
        let mut viewer = OutputViewer::new();
        viewer.set_content("x".repeat(100));
        viewer.handle_key(key(KeyCode::Right));
        assert_eq!(viewer.scroll(), (0, HORIZONTAL_STEP));
        for _ in 0..20 {
            viewer.handle_key(key(KeyCode::Right));
        }
        // 100 columns in a 78-column viewport
        assert_eq!(viewer.scroll().1, 22);
        viewer.handle_key(key(KeyCode::Left));
        assert_eq!(viewer.scroll().1, 22 - HORIZONTAL_STEP);
    }

    #[test]
    fn test_frame_area_is_clamped() {
        let small = OutputViewer::frame_area(Rect::new(0, 0, 40, 10));
        assert_eq!((small.width, small.height), (40, 10));
        let large = OutputViewer::frame_area(Rect::new(2, 3, 200, 60));
        assert_eq!(
            (large.x, large.y, large.width, large.height),
            (2, 3, VIEWPORT_WIDTH, VIEWPORT_HEIGHT)
        );
    }

    #[test]
    fn test_ansi_colors_render_as_styles() {
        let mut viewer = OutputViewer::new();
        viewer.set_content("\x1b[31mred\x1b[0m done");
        assert_eq!(viewer.max_line_width, "red done".len());

        let mut terminal = Terminal::new(TestBackend::new(80, 16)).expect("terminal");
        let theme = Theme::default();
        terminal
            .draw(|f| {
                let area = f.area();
                viewer.render(f, area, &theme);
            })
            .expect("draw");

        let buffer = terminal.backend().buffer();
        let row: String = (0..buffer.area.width)
            .map(|x| buffer[(x, 1)].symbol())
            .collect();
        assert!(!row.contains("[31m"));
        assert!(row.contains("red done"));
        assert_eq!(buffer[(1, 1)].fg, Color::Indexed(1));
        assert_eq!(buffer[(5, 1)].fg, theme.fg);
    }

    #[test]
    fn test_escape_codes_do_not_widen_lines() {
        let mut viewer = OutputViewer::new();
        let colored = format!("\x1b[32m{}\x1b[0m", "x".repeat(78));
        viewer.set_content(colored);
        viewer.handle_key(key(KeyCode::Right));
        assert_eq!(viewer.scroll(), (0, 0));
    }
}
