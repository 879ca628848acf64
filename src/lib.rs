//! cmdmenu - a terminal menu launcher
//!
//! This library loads named commands from a YAML file, lists them in an
//! interactive TUI and shows the output of the one the user runs.

pub mod command;
pub mod config;
pub mod ui;
