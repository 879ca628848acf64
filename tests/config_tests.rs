//! Config loading tests
//!
//! Loads command files from disk and runs the resulting commands.

use cmdmenu::command::{Action, ExecutionError};
use cmdmenu::config::{self, ConfigError};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_config(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("commands.yaml");
    fs::write(&path, contents).unwrap();
    (temp_dir, path)
}

#[test]
fn test_func_entries_run_to_their_code() {
    let (_dir, path) = write_config(
        r#"
commands:
  - name: Multi
    category: Demo
    type: func
    code: |
      first line
      second line
  - name: Quoted
    category: Demo
    type: func
    code: "tabs\tand \"quotes\""
"#,
    );

    let commands = config::load(&path).unwrap();
    let outputs: Vec<String> = commands
        .iter()
        .map(|c| {
            let result = c.action.run();
            assert!(result.error.is_none());
            result.output
        })
        .collect();

    assert_eq!(outputs, vec!["first line\nsecond line\n", "tabs\tand \"quotes\""]);
}

#[cfg(unix)]
#[test]
fn test_exec_entry_reports_nonzero_exit_with_output() {
    let (_dir, path) = write_config(
        r#"
commands:
  - name: Fail
    category: Demo
    type: exec
    command: sh
    args: ["-c", "echo boom >&2; exit 1"]
"#,
    );

    let commands = config::load(&path).unwrap();
    let result = commands[0].action.run();
    assert_eq!(result.output, "boom\n");
    assert!(matches!(result.error, Some(ExecutionError::Exit { .. })));
}

#[cfg(unix)]
#[test]
fn test_exec_entry_without_args() {
    let (_dir, path) = write_config(
        "commands:\n  - name: Noop\n    category: Demo\n    type: exec\n    command: \"true\"\n",
    );

    let commands = config::load(&path).unwrap();
    assert_eq!(
        commands[0].action,
        Action::Process {
            program: "true".to_string(),
            args: Vec::new(),
        }
    );
    assert!(commands[0].action.run().is_success());
}

#[test]
fn test_other_type_fails_whole_load() {
    let (_dir, path) = write_config(
        r#"
commands:
  - name: Fine
    category: Demo
    type: func
    code: fine
  - name: Odd
    category: Demo
    type: other
"#,
    );

    let err = config::load(&path).unwrap_err();
    assert!(err.to_string().contains("other"));
    assert!(matches!(err, ConfigError::UnknownType { .. }));
}

#[test]
fn test_missing_file_and_bad_yaml() {
    let temp_dir = TempDir::new().unwrap();
    let missing = config::load(temp_dir.path().join("commands.yaml")).unwrap_err();
    assert!(matches!(missing, ConfigError::Read { .. }));

    let (_dir, path) = write_config("commands:\n  - name: [unterminated\n");
    let invalid = config::load(&path).unwrap_err();
    assert!(matches!(invalid, ConfigError::Parse { .. }));
}

#[test]
fn test_default_config_path() {
    assert_eq!(config::DEFAULT_CONFIG_PATH, "commands.yaml");
}
