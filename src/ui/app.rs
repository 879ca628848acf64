//! # Controller
//!
//! The launcher's state machine. [`App`] owns the selection list and the
//! output viewer, turns key presses into a [`Transition`] for the event loop,
//! and moves between [`Mode`]s when a run's result is applied.

use crate::command::{Command, ExecutionError, ExecutionResult};
use crate::ui::selection::SelectionList;
use crate::ui::theme::Theme;
use crate::ui::viewer::OutputViewer;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;

/// Which screen the controller is on.
#[derive(Debug)]
pub enum Mode {
    /// The command list has focus.
    Selecting,
    /// Still showing the list, but a run is in flight; input is paused.
    Running { command: String },
    /// The viewer shows the output of `command`.
    ViewingOutput {
        command: String,
        error: Option<ExecutionError>,
    },
}

/// What the event loop should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    None,
    /// Run this command in the background and deliver its result.
    Launch(Command),
    Quit,
}

pub struct App {
    mode: Mode,
    pub selection: SelectionList,
    pub viewer: OutputViewer,
    pub theme: Theme,
    pub should_quit: bool,
}

impl App {
    pub fn new(commands: Vec<Command>) -> Self {
        Self::with_theme(commands, Theme::default_theme().clone())
    }

    pub fn with_theme(commands: Vec<Command>, theme: Theme) -> Self {
        Self {
            mode: Mode::Selecting,
            selection: SelectionList::new(commands),
            viewer: OutputViewer::new(),
            theme,
            should_quit: false,
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_running(&self) -> bool {
        matches!(self.mode, Mode::Running { .. })
    }

    pub fn is_viewing_output(&self) -> bool {
        matches!(self.mode, Mode::ViewingOutput { .. })
    }

    /// Error of the run being viewed, if it failed.
    pub fn output_error(&self) -> Option<&ExecutionError> {
        match &self.mode {
            Mode::ViewingOutput { error, .. } => error.as_ref(),
            _ => None,
        }
    }

    /// Route a key press according to the current mode.
    ///
    /// While selecting, `Ctrl+C` always quits. `q` and `Esc` quit too, with
    /// two exceptions: while the filter prompt is open `q` is typed into the
    /// query, and `Esc` on a list narrowed by an applied filter clears the
    /// filter first, so a second `Esc` is needed to quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> Transition {
        if key.kind == KeyEventKind::Release {
            return Transition::None;
        }

        let ctrl_c =
            key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);

        match self.mode {
            Mode::Selecting => {
                if ctrl_c {
                    return self.quit();
                }
                if self.selection.is_filtering() {
                    self.selection.handle_key(key);
                    return Transition::None;
                }

                match key.code {
                    KeyCode::Enter => self.launch_selected(),
                    // An applied filter is dismissed before Esc quits
                    KeyCode::Esc if self.selection.has_filter() => {
                        self.selection.clear_filter();
                        Transition::None
                    }
                    KeyCode::Esc | KeyCode::Char('q') => self.quit(),
                    _ => {
                        self.selection.handle_key(key);
                        Transition::None
                    }
                }
            }
            Mode::Running { .. } => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => self.quit(),
                _ if ctrl_c => self.quit(),
                _ => {
                    debug!("Ignoring {:?} while a command is running", key.code);
                    Transition::None
                }
            },
            Mode::ViewingOutput { .. } => {
                match key.code {
                    KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') => self.dismiss_output(),
                    _ if ctrl_c => self.dismiss_output(),
                    _ => self.viewer.handle_key(key),
                }
                Transition::None
            }
        }
    }

    fn launch_selected(&mut self) -> Transition {
        match self.selection.selected() {
            Some(command) => {
                let command = command.clone();
                self.mode = Mode::Running {
                    command: command.name.clone(),
                };
                Transition::Launch(command)
            }
            None => Transition::None,
        }
    }

    fn quit(&mut self) -> Transition {
        self.should_quit = true;
        Transition::Quit
    }

    fn dismiss_output(&mut self) {
        self.mode = Mode::Selecting;
        self.viewer.set_content(String::new());
    }

    /// Take in the result of the pending run and switch to the output screen.
    pub fn apply_result(&mut self, result: ExecutionResult) {
        match std::mem::replace(&mut self.mode, Mode::Selecting) {
            Mode::Running { command } => {
                self.viewer.set_content(result.output);
                self.mode = Mode::ViewingOutput {
                    command,
                    error: result.error,
                };
            }
            other => {
                debug!("Dropping a result that arrived while in {:?}", other);
                self.mode = other;
            }
        }
    }
}
