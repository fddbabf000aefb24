//! Line parser for the interactive prompt.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Edit(i64),
    Desc(String),
    Done,
    Undone,
    Save,
    Cancel,
    Remove(i64),
    Clear,
    List,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error("`{0}` is not a todo id")]
    BadId(String),
}

pub const HELP: &str = "\
commands:
  ls              show the list
  add <text>      add a todo
  edit <id>       start editing a todo
  desc <text>     change the draft's description
  done | undone   change the draft's completed flag
  save            save the draft
  cancel          stop editing without saving
  rm <id>         delete a todo
  clear           delete every todo
  help            show this text
  quit            exit";

/// Parse one input line. `Ok(None)` for a blank line.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "add" => Command::Add(text_arg("add", rest)?),
        "desc" => Command::Desc(text_arg("desc", rest)?),
        "edit" => Command::Edit(id_arg("edit", rest)?),
        "rm" | "delete" => Command::Remove(id_arg("rm", rest)?),
        "done" => Command::Done,
        "undone" => Command::Undone,
        "save" => Command::Save,
        "cancel" => Command::Cancel,
        "clear" => Command::Clear,
        "ls" | "list" => Command::List,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn text_arg(name: &'static str, rest: &str) -> Result<String, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingArgument(name));
    }
    Ok(rest.to_string())
}

fn id_arg(name: &'static str, rest: &str) -> Result<i64, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingArgument(name));
    }
    rest.parse().map_err(|_| CommandError::BadId(rest.to_string()))
}
