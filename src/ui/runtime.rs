//! # Event Loop
//!
//! The single cooperative loop that drives the launcher.
//!
//! Each iteration drains finished runs from the results channel, redraws,
//! then waits briefly for one terminal event and hands it to the [`App`].
//! When the app asks for a launch, [`Dispatcher::launch`] runs the action:
//! static text is answered on the spot, process actions run as a tokio task.
//! Either way the only thing that comes back is one [`ExecutionResult`]
//! message on the channel, so the app state is never touched outside this
//! loop. Quitting aborts the pending task, which kills its process.

use crate::command::{Command, ExecutionResult};
use crate::ui::app::{App, Transition};
use crate::ui::render;
use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use log::{debug, warn};
use ratatui::{backend::Backend, Terminal};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// Poll timeout while idle.
const IDLE_POLL: Duration = Duration::from_millis(100);
/// Poll timeout while a run is pending (~60fps).
const RUNNING_POLL: Duration = Duration::from_millis(16);

/// Trait for reading terminal events (allows dependency injection for testing)
pub trait EventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>>;
}

/// Production event reader that uses crossterm's event polling + read
pub struct CrosstermEventReader;

impl EventReader for CrosstermEventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout).context("Failed to poll for events")? {
            Ok(Some(
                event::read().context("Failed to read keyboard event")?,
            ))
        } else {
            Ok(None)
        }
    }
}

/// Owns the results channel between background runs and the loop, plus the
/// handle of the run in flight so quitting can cancel it.
pub struct Dispatcher {
    sender: UnboundedSender<ExecutionResult>,
    receiver: UnboundedReceiver<ExecutionResult>,
    pending: Option<JoinHandle<()>>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            sender,
            receiver,
            pending: None,
        }
    }

    /// Feed one terminal event to the app and act on the resulting transition.
    ///
    /// Must be called from within a tokio runtime.
    pub fn handle_event(&mut self, app: &mut App, event: &Event) {
        if let Event::Key(key) = event {
            match app.handle_key(*key) {
                Transition::Launch(command) => self.launch(command),
                Transition::Quit => self.abort_pending(),
                Transition::None => {}
            }
        }
    }

    /// Run `command` and post its result back to this dispatcher.
    pub fn launch(&mut self, command: Command) {
        debug!("Launching `{}`", command.name);
        let sender = self.sender.clone();

        if command.action.is_blocking() {
            self.abort_pending();
            self.pending = Some(tokio::spawn(async move {
                deliver(&sender, command.action.run_async().await);
            }));
        } else {
            deliver(&sender, command.action.run());
        }
    }

    /// Cancel the run in flight, if any. Its process is killed once the task
    /// is dropped by the runtime; use [`Dispatcher::shutdown`] to wait for that.
    pub fn abort_pending(&mut self) {
        if let Some(handle) = &self.pending {
            if !handle.is_finished() {
                debug!("Cancelling the pending run");
                handle.abort();
            }
        }
    }

    /// Cancel the run in flight and wait until its task has been dropped.
    pub async fn shutdown(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    warn!("Background run failed: {}", e);
                }
            }
        }
    }

    /// Apply every result that has already arrived. Returns how many were applied.
    pub fn drain(&mut self, app: &mut App) -> usize {
        let mut applied = 0;
        while let Ok(result) = self.receiver.try_recv() {
            app.apply_result(result);
            applied += 1;
        }
        applied
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        self.abort_pending();
    }
}

fn deliver(sender: &UnboundedSender<ExecutionResult>, result: ExecutionResult) {
    if sender.send(result).is_err() {
        debug!("Result arrived after the event loop stopped");
    }
}

/// Run the launcher until the user quits.
pub async fn run_app<B>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_reader: &mut dyn EventReader,
) -> Result<()>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
{
    let mut dispatcher = Dispatcher::new();

    loop {
        dispatcher.drain(app);

        terminal
            .draw(|f| render::render(f, app))
            .context("Failed to draw terminal UI")?;

        let poll_timeout = if app.is_running() {
            RUNNING_POLL
        } else {
            IDLE_POLL
        };

        // If no event, continue the loop (re-render and check for results)
        let Some(event) = event_reader.read_event(poll_timeout)? else {
            continue;
        };

        dispatcher.handle_event(app, &event);

        if app.should_quit {
            break;
        }
    }

    dispatcher.shutdown().await;
    Ok(())
}
