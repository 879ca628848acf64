//! # UI Module
//!
//! The terminal user interface of the launcher.
//!
//! ## Components
//!
//! - [`App`] - the controller: current mode, key dispatch, result intake
//! - [`selection::SelectionList`] - the filterable command list
//! - [`viewer::OutputViewer`] - the scrollable output panel
//! - [`mod@render`] - drawing the current mode
//! - [`runtime`] - the event loop and background launches
//!
//! ## Screens
//!
//! ```text
//! Selecting / Running               ViewingOutput
//! ┌ Select a command to run (2/2) ┐  Output: Hello
//! │> Hello                         │  ╭──────────────────────╮
//! │    Category: Demo              │  │Hello, world!         │
//! │  Disk usage                    │  │                      │
//! │    Category: System            │  ╰──────────────────────╯
//! └────────────────────────────────┘  <error, if any>
//!
//! [enter] run  [/] filter  [q] quit  [enter/esc to return]
//! ```

pub mod ansi;
pub mod app;
pub mod render;
pub mod runtime;
pub mod selection;
pub mod theme;
pub mod viewer;

pub use app::App;
pub use render::render;
