//! # Selection List
//!
//! A filterable, navigable list of [`Command`]s drawn with the ratatui
//! [`List`] widget.
//!
//! The full command list never changes after construction. Filtering only
//! changes which entries are *visible*; the visible entries always keep the
//! order of the config file.
//!
//! ## Keys
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k`, `↓` / `j` | Move the highlight (wraps around) |
//! | `Home` / `g`, `End` / `G` | First / last entry |
//! | `PgUp`, `PgDn` | Move by one page |
//! | `/` | Start typing a filter |
//!
//! While the filter input is open, characters extend the query, `Backspace`
//! deletes, `Enter` keeps the filter and closes the input, `Esc` clears it.

use crate::command::Command;
use crate::ui::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub struct SelectionList {
    commands: Vec<Command>,
    /// Indexes into `commands` that match the current filter, in file order.
    visible: Vec<usize>,
    state: ListState,
    filter: String,
    filter_input: bool,
    /// Entries per page, refreshed on every render.
    page_size: usize,
}

impl SelectionList {
    pub fn new(commands: Vec<Command>) -> Self {
        let visible = (0..commands.len()).collect();
        let mut list = Self {
            commands,
            visible,
            state: ListState::default(),
            filter: String::new(),
            filter_input: false,
            page_size: 5,
        };
        list.select_first();
        list
    }

    /// Every command, in config order, regardless of the filter.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Commands matching the current filter, in config order.
    pub fn visible(&self) -> Vec<&Command> {
        self.visible.iter().map(|&i| &self.commands[i]).collect()
    }

    /// The highlighted command, or `None` when nothing is visible.
    pub fn selected(&self) -> Option<&Command> {
        self.state
            .selected()
            .and_then(|pos| self.visible.get(pos))
            .map(|&i| &self.commands[i])
    }

    /// Position of the highlight within the visible entries.
    pub fn selected_position(&self) -> Option<usize> {
        self.state.selected()
    }

    /// True while the user is typing a filter query.
    pub fn is_filtering(&self) -> bool {
        self.filter_input
    }

    /// True when a non-empty filter narrows the list.
    pub fn has_filter(&self) -> bool {
        !self.filter.is_empty()
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn clear_filter(&mut self) {
        self.filter_input = false;
        self.filter.clear();
        self.refilter();
    }

    /// Handle a key; returns `true` when the list consumed it.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.filter_input {
            self.handle_filter_key(key);
            return true;
        }

        match key.code {
            KeyCode::Char('/') => self.filter_input = true,
            KeyCode::Down | KeyCode::Char('j') => self.next(),
            KeyCode::Up | KeyCode::Char('k') => self.previous(),
            KeyCode::Home | KeyCode::Char('g') => self.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.select_last(),
            KeyCode::PageDown => self.page_down(),
            KeyCode::PageUp => self.page_up(),
            _ => return false,
        }
        true
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.clear_filter(),
            KeyCode::Enter => self.filter_input = false,
            KeyCode::Backspace => {
                self.filter.pop();
                self.refilter();
            }
            KeyCode::Down => self.next(),
            KeyCode::Up => self.previous(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.filter.push(c);
                self.refilter();
            }
            _ => {}
        }
    }

    fn refilter(&mut self) {
        if self.filter.is_empty() {
            self.visible = (0..self.commands.len()).collect();
        } else {
            let matcher = SkimMatcherV2::default();
            self.visible = self
                .commands
                .iter()
                .enumerate()
                .filter(|(_, command)| {
                    matcher
                        .fuzzy_match(command.filter_value(), &self.filter)
                        .is_some()
                })
                .map(|(i, _)| i)
                .collect();
        }
        // Reset selection when the query changes
        self.select_first();
    }

    pub fn next(&mut self) {
        let count = self.visible.len();
        if count > 0 {
            let pos = self.state.selected().map_or(0, |pos| (pos + 1) % count);
            self.state.select(Some(pos));
        }
    }

    pub fn previous(&mut self) {
        let count = self.visible.len();
        if count > 0 {
            let pos = match self.state.selected() {
                Some(pos) if pos > 0 => pos - 1,
                _ => count - 1,
            };
            self.state.select(Some(pos));
        }
    }

    fn select_first(&mut self) {
        *self.state.offset_mut() = 0;
        self.state
            .select(if self.visible.is_empty() { None } else { Some(0) });
    }

    fn select_last(&mut self) {
        self.state.select(self.visible.len().checked_sub(1));
    }

    fn page_down(&mut self) {
        if let Some(last) = self.visible.len().checked_sub(1) {
            let pos = self.state.selected().unwrap_or(0);
            self.state.select(Some((pos + self.page_size).min(last)));
        }
    }

    fn page_up(&mut self) {
        if !self.visible.is_empty() {
            let pos = self.state.selected().unwrap_or(0);
            self.state.select(Some(pos.saturating_sub(self.page_size)));
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let show_filter = self.filter_input || self.has_filter();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(if show_filter { 1 } else { 0 }),
            ])
            .split(area);

        // Each entry takes two rows: name and category
        self.page_size = (usize::from(chunks[0].height.saturating_sub(2)) / 2).max(1);

        let items: Vec<ListItem> = self
            .visible
            .iter()
            .map(|&i| {
                let command = &self.commands[i];
                ListItem::new(vec![
                    Line::from(command.name.clone()),
                    Line::from(Span::styled(
                        format!("  {}", command.description()),
                        Style::default().fg(theme.fg_dim),
                    )),
                ])
            })
            .collect();

        let title = format!(
            " Select a command to run ({}/{}) ",
            self.visible.len(),
            self.commands.len()
        );

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(Style::default().fg(theme.accent)),
            )
            .style(Style::default().fg(theme.fg))
            .highlight_style(theme.highlight())
            .highlight_symbol("> ");

        frame.render_stateful_widget(list, chunks[0], &mut self.state);

        if show_filter {
            let cursor = if self.filter_input { "_" } else { "" };
            let filter = Paragraph::new(Line::from(vec![
                Span::styled("Filter: ", Style::default().fg(theme.secondary)),
                Span::raw(format!("{}{}", self.filter, cursor)),
            ]));
            frame.render_widget(filter, chunks[1]);
        }
    }
}
