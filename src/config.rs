//! # Command Configuration
//!
//! Loads the menu entries from a YAML file (by default `commands.yaml` in the
//! working directory).
//!
//! ## File Format
//!
//! ```yaml
//! commands:
//!   - name: Hello
//!     category: Demo
//!     type: func
//!     code: "Hello, world!"
//!   - name: Disk usage
//!     category: System
//!     type: exec
//!     command: df
//!     args: ["-h"]
//! ```
//!
//! `func` entries require `code`; `exec` entries require `command` and accept
//! an optional `args` list. Any other `type` aborts the whole load. Unknown
//! keys are ignored. Entries keep their file order.

use crate::command::{Action, Command};
use log::{debug, info, warn};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Where the launcher looks for its commands, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "commands.yaml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file `{}`: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file `{}`: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unknown command type `{kind}` for command `{name}`")]
    UnknownType { name: String, kind: String },

    #[error("command `{name}` of type `{kind}` is missing required field `{field}`")]
    MissingField {
        name: String,
        kind: String,
        field: &'static str,
    },
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    commands: Option<Vec<RawCommand>>,
}

#[derive(Debug, Deserialize)]
struct RawCommand {
    name: String,
    category: String,
    #[serde(rename = "type")]
    kind: String,
    code: Option<String>,
    command: Option<String>,
    #[serde(default)]
    args: Vec<String>,
}

impl RawCommand {
    fn into_command(self) -> Result<Command, ConfigError> {
        let action = match self.kind.as_str() {
            "func" => Action::StaticText {
                text: self.require(self.code.as_ref(), "code")?,
            },
            "exec" => Action::Process {
                program: self.require(self.command.as_ref(), "command")?,
                args: self.args,
            },
            _ => {
                return Err(ConfigError::UnknownType {
                    kind: self.kind.clone(),
                    name: self.name,
                })
            }
        };

        Ok(Command::new(self.name, self.category, action))
    }

    fn require(&self, value: Option<&String>, field: &'static str) -> Result<String, ConfigError> {
        value.cloned().ok_or_else(|| ConfigError::MissingField {
            name: self.name.clone(),
            kind: self.kind.clone(),
            field,
        })
    }
}

/// Load the commands at `path`, preserving file order.
///
/// Fails as a whole on the first invalid entry; no partial list is returned.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<Command>, ConfigError> {
    let path = path.as_ref();
    debug!("Loading commands from {}", path.display());

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let commands = parse(&contents).map_err(|e| match e {
        ParseFailure::Yaml(source) => ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        },
        ParseFailure::Entry(e) => e,
    })?;

    info!("Loaded {} commands from {}", commands.len(), path.display());
    Ok(commands)
}

enum ParseFailure {
    Yaml(serde_yaml::Error),
    Entry(ConfigError),
}

fn parse(contents: &str) -> Result<Vec<Command>, ParseFailure> {
    let raw: RawConfig = serde_yaml::from_str(contents).map_err(ParseFailure::Yaml)?;

    let Some(entries) = raw.commands else {
        warn!("Config has no `commands` key; the menu will be empty");
        return Ok(Vec::new());
    };

    entries
        .into_iter()
        .map(RawCommand::into_command)
        .collect::<Result<Vec<_>, _>>()
        .map_err(ParseFailure::Entry)
}
