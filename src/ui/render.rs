//! # Rendering
//!
//! Draws the current [`App`] state: the command list with its key hint while
//! selecting (or waiting on a run), and the output screen with a header, the
//! viewer, an optional error line and the return hint afterwards.

use crate::ui::app::{App, Mode};
use crate::ui::viewer::VIEWPORT_HEIGHT;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

pub const SELECT_HINT: &str = "[enter] run  [/] filter  [q] quit";
pub const RETURN_HINT: &str = "[enter/esc to return]";

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    if app.is_viewing_output() {
        render_output_screen(frame, app, area);
    } else {
        render_selection_screen(frame, app, area);
    }
}

fn render_selection_screen(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // List
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Footer
        ])
        .split(area);

    app.selection.render(frame, chunks[0], &app.theme);

    let footer = match app.mode() {
        Mode::Running { command } => Line::from(Span::styled(
            format!("Running {}…", command),
            Style::default()
                .fg(app.theme.secondary)
                .add_modifier(Modifier::BOLD),
        )),
        _ => Line::from(Span::styled(SELECT_HINT, app.theme.hint())),
    };
    frame.render_widget(Paragraph::new(footer), chunks[2]);
}

fn render_output_screen(frame: &mut Frame, app: &mut App, area: Rect) {
    let (command, error) = match app.mode() {
        Mode::ViewingOutput { command, error } => {
            (command.clone(), error.as_ref().map(ToString::to_string))
        }
        _ => return,
    };

    let error_height = if error.is_some() { 2 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),               // Header
            Constraint::Length(VIEWPORT_HEIGHT), // Output
            Constraint::Length(error_height),    // Error
            Constraint::Length(1),               // Spacer
            Constraint::Length(1),               // Footer
        ])
        .split(area);

    let header = Line::from(vec![
        Span::styled(
            "Output: ",
            Style::default()
                .fg(app.theme.secondary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(command),
    ]);
    frame.render_widget(Paragraph::new(header), chunks[0]);

    app.viewer.render(frame, chunks[1], &app.theme);

    if let Some(error) = error {
        let error = Paragraph::new(Span::styled(error, app.theme.error_text()))
            .wrap(Wrap { trim: true });
        frame.render_widget(error, chunks[2]);
    }

    frame.render_widget(
        Paragraph::new(Span::styled(RETURN_HINT, app.theme.hint())),
        chunks[4],
    );
}
