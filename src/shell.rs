//! Line commands of the headless shell.

use serde_json::Value;
use std::fmt;
use std::path::PathBuf;

use workbench_host::models::FileType;

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Help,
    Quit,
    State,
    Activity(String),
    Sidebar(String),
    Menu(String),
    Open(PathBuf),
    Create {
        file_type: FileType,
        parent_id: Option<String>,
    },
    Rename {
        id: String,
        name: String,
    },
    SelectFile(String),
    Search(String),
    Click(String),
    Tab(String),
    Edit {
        id: String,
        value: String,
    },
    Close(String),
    Config(Value),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageError(pub String);

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "usage: {}", self.0)
    }
}

impl std::error::Error for UsageError {}

pub const HELP: &str = "\
commands:
  state                         print the workbench state as json
  activity <id>                 select an activity bar item
  sidebar <id>                  select a sidebar pane
  menu <id>                     select a menu entry
  open <path>                   pick <path> and run File > Open
  create <RootFolder|Folder|File> [parent-id]
  rename <id> <name>
  select-file <id>
  search [query]
  click <result-key>
  tab <id> | edit <id> <text> | close <id>
  config <json>                 propose a configuration change
  quit";

fn required(arg: &str, usage: &str) -> Result<String, UsageError> {
    if arg.is_empty() {
        Err(UsageError(usage.to_string()))
    } else {
        Ok(arg.to_string())
    }
}

fn split_first(rest: &str) -> (&str, &str) {
    match rest.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, tail.trim()),
        None => (rest, ""),
    }
}

impl ShellCommand {
    /// `Ok(None)` for blank lines.
    pub fn parse(line: &str) -> Result<Option<Self>, UsageError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (verb, rest) = split_first(line);
        let command = match verb {
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            "state" => ShellCommand::State,
            "activity" => ShellCommand::Activity(required(rest, "activity <id>")?),
            "sidebar" => ShellCommand::Sidebar(required(rest, "sidebar <id>")?),
            "menu" => ShellCommand::Menu(required(rest, "menu <id>")?),
            "open" => ShellCommand::Open(PathBuf::from(required(rest, "open <path>")?)),
            "create" => {
                let (kind, parent) = split_first(rest);
                let file_type = FileType::from_name(kind).ok_or_else(|| {
                    UsageError("create <RootFolder|Folder|File> [parent-id]".to_string())
                })?;
                ShellCommand::Create {
                    file_type,
                    parent_id: (!parent.is_empty()).then(|| parent.to_string()),
                }
            }
            "rename" => {
                let (id, name) = split_first(rest);
                ShellCommand::Rename {
                    id: required(id, "rename <id> <name>")?,
                    name: required(name, "rename <id> <name>")?,
                }
            }
            "select-file" => ShellCommand::SelectFile(required(rest, "select-file <id>")?),
            "search" => ShellCommand::Search(rest.to_string()),
            "click" => ShellCommand::Click(required(rest, "click <result-key>")?),
            "tab" => ShellCommand::Tab(required(rest, "tab <id>")?),
            "edit" => {
                let (id, value) = split_first(rest);
                ShellCommand::Edit {
                    id: required(id, "edit <id> <text>")?,
                    value: value.to_string(),
                }
            }
            "close" => ShellCommand::Close(required(rest, "close <id>")?),
            "config" => {
                let value = serde_json::from_str(rest)
                    .map_err(|e| UsageError(format!("config <json> ({})", e)))?;
                ShellCommand::Config(value)
            }
            other => return Err(UsageError(format!("unknown command `{}`, try help", other))),
        };
        Ok(Some(command))
    }
}

#[cfg(test)]
#[path = "../tests/unit/shell.rs"]
mod tests;
