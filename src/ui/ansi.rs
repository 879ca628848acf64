//! # ANSI Output
//!
//! Programs often color their output. Captured text is fed through a vt100
//! screen one line at a time and read back as styled ratatui [`Text`], so
//! escape sequences are interpreted instead of shown. Graphic attributes set
//! on one line carry over to the next, as they would in a terminal.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
};

const TAB: &str = "    ";

/// Convert a vt100 color to a ratatui Color
fn vt100_color_to_ratatui(color: vt100::Color) -> Option<Color> {
    match color {
        vt100::Color::Default => None,
        vt100::Color::Idx(idx) => Some(Color::Indexed(idx)),
        vt100::Color::Rgb(r, g, b) => Some(Color::Rgb(r, g, b)),
    }
}

fn cell_style(cell: &vt100::Cell) -> Style {
    let mut style = Style::default();
    if let Some(fg) = vt100_color_to_ratatui(cell.fgcolor()) {
        style = style.fg(fg);
    }
    if let Some(bg) = vt100_color_to_ratatui(cell.bgcolor()) {
        style = style.bg(bg);
    }
    if cell.bold() {
        style = style.add_modifier(Modifier::BOLD);
    }
    if cell.italic() {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if cell.underline() {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    if cell.inverse() {
        style = style.add_modifier(Modifier::REVERSED);
    }
    style
}

/// Styled, escape-free lines for `content`. Tabs become four spaces.
pub fn to_text(content: &str) -> Text<'static> {
    let raw_lines: Vec<String> = content.lines().map(|line| line.replace('\t', TAB)).collect();

    // Wide characters take two cells, so twice the longest raw line always fits
    let widest = raw_lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    let cols = u16::try_from(widest.saturating_mul(2))
        .unwrap_or(u16::MAX)
        .max(1);

    let mut parser = vt100::Parser::new(1, cols, 0);
    let mut lines = Vec::with_capacity(raw_lines.len());
    for raw in &raw_lines {
        parser.process(raw.as_bytes());
        lines.push(row_to_line(parser.screen(), cols));
        // Scrolls the single row away; attributes stay with the parser
        parser.process(b"\r\n");
    }

    Text::from(lines)
}

fn row_to_line(screen: &vt100::Screen, cols: u16) -> Line<'static> {
    let mut cells = Vec::new();
    for col in 0..cols {
        let Some(cell) = screen.cell(0, col) else {
            break;
        };
        if cell.is_wide_continuation() {
            continue;
        }
        cells.push((cell.contents(), cell_style(cell)));
    }
    while cells.last().is_some_and(|(contents, _)| contents.is_empty()) {
        cells.pop();
    }

    let mut spans = Vec::new();
    let mut run = String::new();
    let mut run_style = Style::default();
    for (contents, style) in cells {
        if style != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = style;
        run.push_str(if contents.is_empty() { " " } else { contents });
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }

    Line::from(spans)
}
