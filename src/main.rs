//! # cmdmenu CLI Entry Point
//!
//! Loads `commands.yaml` from the current directory and starts the
//! interactive launcher.
//!
//! ## Usage
//!
//! ```bash
//! cmdmenu
//!
//! # With logging (stderr, so the TUI is unaffected)
//! RUST_LOG=debug cmdmenu 2> cmdmenu.log
//! ```
//!
//! ## Key Bindings
//!
//! ### Command list
//! - `Enter` - Run the highlighted command
//! - `j` / `Down`, `k` / `Up` - Move selection
//! - `/` - Filter by name (`Enter` keeps the filter, `Esc` clears it)
//! - `q` / `Esc` / `Ctrl+c` - Quit
//!
//! ### Output panel
//! - `j` / `k`, `PgDn` / `PgUp`, `Ctrl+d` / `Ctrl+u` - Scroll
//! - `h` / `l` - Scroll sideways
//! - `Enter` / `Esc` / `q` - Back to the list
//!
//! ## Exit Codes
//!
//! `0` after the user quits, `1` when the commands file cannot be loaded or
//! the terminal cannot be set up.

use cmdmenu::command::Command;
use cmdmenu::config::{self, DEFAULT_CONFIG_PATH};
use cmdmenu::ui::runtime::{run_app, CrosstermEventReader};
use cmdmenu::ui::App;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::panic;
use std::path::Path;
use std::process::ExitCode;

/// cmdmenu - pick a command from `commands.yaml` and see its output
#[derive(Parser, Debug)]
#[command(name = "cmdmenu")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A terminal menu launcher for the commands in ./commands.yaml", long_about = None)]
struct Args {}

fn main() -> ExitCode {
    let _args = Args::parse();
    env_logger::init();

    // Set up panic hook to ensure terminal is restored on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);

        original_hook(panic_info);
    }));

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")
    {
        Ok(runtime) => runtime,
        Err(e) => {
            println!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = runtime.block_on(run_application());

    // A cancelled run may leave a pipe reader blocked on a grandchild process
    runtime.shutdown_background();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_commands(path: &Path) -> Result<Vec<Command>> {
    config::load(path).context("Error loading commands")
}

async fn run_application() -> Result<()> {
    // Startup errors abort before the terminal is touched
    let commands = load_commands(Path::new(DEFAULT_CONFIG_PATH))?;

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode for terminal")?;

    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e).context("Failed to setup terminal");
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(terminal) => terminal,
        Err(e) => {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            return Err(e).context("Failed to create terminal");
        }
    };

    let mut app = App::new(commands);

    // Run the app and ensure cleanup happens even on error
    let mut event_reader = CrosstermEventReader;
    let run_result = run_app(&mut terminal, &mut app, &mut event_reader).await;

    // Restore terminal (always runs, even if run_app failed)
    let cleanup_result = cleanup_terminal(&mut terminal);

    // Return the first error that occurred, or Ok if both succeeded
    run_result?;
    cleanup_result?;

    info!("Quit by user");
    Ok(())
}

/// Clean up terminal state
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;

    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;

    terminal.show_cursor().context("Failed to show cursor")?;

    Ok(())
}
