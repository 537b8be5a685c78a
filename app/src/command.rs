//! Input lines to view-model events.

use std::str::FromStr;

use drink_core::{ApiError, DrinkId, DrinkViewModel, Render, Transport};
use serde_json::Value;
use thiserror::Error;

use crate::render::drink_line;

pub const HELP: &str = "\
commands:
  load                         reload the drink list
  set <field> <value>          set a field on the new drink
  add                          create the new drink
  reset                        discard the new drink
  rm <id>                      delete a drink
  edit <id> <field> <value>    change a field of a listed drink
  show <id>                    fetch one drink from the server
  help                         this text
  quit                         leave
values are read as JSON when they parse, otherwise as text";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Load,
    Set { field: String, value: Value },
    Add,
    Reset,
    Remove(DrinkId),
    Edit { id: DrinkId, field: String, value: Value },
    Show(DrinkId),
    Help,
    Quit,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command {0:?}, try help")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        match word {
            "" => Err(CommandError::Empty),
            "load" | "ls" => Ok(Command::Load),
            "add" => Ok(Command::Add),
            "reset" => Ok(Command::Reset),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            "set" => {
                let (field, value) = field_and_value(rest).ok_or(CommandError::Usage("set <field> <value>"))?;
                Ok(Command::Set { field, value })
            }
            "rm" | "remove" => Ok(Command::Remove(single_id(rest).ok_or(CommandError::Usage("rm <id>"))?)),
            "show" | "get" => Ok(Command::Show(single_id(rest).ok_or(CommandError::Usage("show <id>"))?)),
            "edit" => {
                let usage = CommandError::Usage("edit <id> <field> <value>");
                let (id, rest) = rest.split_once(char::is_whitespace).ok_or(usage.clone())?;
                let (field, value) = field_and_value(rest.trim()).ok_or(usage)?;
                Ok(Command::Edit {
                    id: parse_id(id),
                    field,
                    value,
                })
            }
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn parse_id(text: &str) -> DrinkId {
    match text.parse() {
        Ok(id) => id,
        Err(never) => match never {},
    }
}

fn single_id(rest: &str) -> Option<DrinkId> {
    if rest.is_empty() || rest.contains(char::is_whitespace) {
        return None;
    }
    Some(parse_id(rest))
}

fn field_and_value(rest: &str) -> Option<(String, Value)> {
    let (field, raw) = rest.split_once(char::is_whitespace)?;
    let raw = raw.trim();
    if field.is_empty() || raw.is_empty() {
        return None;
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Some((field.to_string(), value))
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("drink {0} is not in the list, load first")]
    UnknownDrink(DrinkId),
    #[error("the id field is assigned by the server")]
    IdField,
}

/// What the input loop should do after a command.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    Continue(Option<String>),
    Quit,
}

/// Run one command against the view-model.
///
/// State changes reach the screen through the view-model's renderer; the
/// returned message covers output that is not part of the page.
pub fn dispatch<T: Transport, R: Render>(
    vm: &mut DrinkViewModel<T, R>,
    command: Command,
) -> Result<Outcome, AppError> {
    match command {
        Command::Load => vm.load()?,
        Command::Set { field, value } => {
            if !vm.set_draft_field(&field, value) {
                return Err(AppError::IdField);
            }
        }
        Command::Add => vm.add()?,
        Command::Reset => vm.reset_draft(),
        Command::Remove(id) => vm.remove(&id)?,
        Command::Edit { id, field, value } => {
            let mut drink = vm
                .state()
                .find(&id)
                .cloned()
                .ok_or(AppError::UnknownDrink(id))?;
            if !drink.set(field, value) {
                return Err(AppError::IdField);
            }
            vm.edit(&drink)?;
        }
        Command::Show(id) => {
            let drink = vm.show(&id)?;
            return Ok(Outcome::Continue(Some(drink_line(&drink))));
        }
        Command::Help => return Ok(Outcome::Continue(Some(HELP.to_string()))),
        Command::Quit => return Ok(Outcome::Quit),
    }
    Ok(Outcome::Continue(None))
}
