//! Textual command surface: `create <title>...`, `check <n>`, `uncheck <n>`,
//! `show`, `clear`.
//!
//! Titles containing spaces can be double-quoted:
//! `create "write tests" "ship it"`.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::error::TodoError;
use crate::manager::{TodoListManager, TodoOutcome};
use crate::response::TodoResponse;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]*)"|(\S+)"#).expect("token pattern should be valid"));

/// One parsed command, mapping 1:1 to a manager operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoCommand {
    Create(Vec<String>),
    Check(usize),
    Uncheck(usize),
    Show,
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}' (expected create, check, uncheck, show or clear)")]
    Unknown(String),
    #[error("'{command}' requires {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("'{command}' got unexpected arguments: {extra}")]
    UnexpectedArguments { command: &'static str, extra: String },
    #[error("invalid item number '{0}'")]
    InvalidNumber(String),
}

fn tokenize(line: &str) -> Vec<String> {
    TOKEN_RE
        .captures_iter(line)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string())
        .collect()
}

fn parse_order(command: &'static str, args: &[String]) -> Result<usize, CommandError> {
    match args {
        [] => Err(CommandError::MissingArgument {
            command,
            expected: "an item number",
        }),
        [raw] => raw
            .parse()
            .map_err(|_| CommandError::InvalidNumber(raw.clone())),
        [_, extra @ ..] => Err(CommandError::UnexpectedArguments {
            command,
            extra: extra.join(" "),
        }),
    }
}

fn expect_no_args(command: &'static str, args: &[String]) -> Result<(), CommandError> {
    if args.is_empty() {
        return Ok(());
    }
    Err(CommandError::UnexpectedArguments {
        command,
        extra: args.join(" "),
    })
}

impl FromStr for TodoCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let tokens = tokenize(line);
        let Some((name, args)) = tokens.split_first() else {
            return Err(CommandError::Empty);
        };
        match name.as_str() {
            "create" => {
                if args.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "create",
                        expected: "at least one title",
                    });
                }
                Ok(TodoCommand::Create(args.to_vec()))
            }
            "check" => parse_order("check", args).map(TodoCommand::Check),
            "uncheck" => parse_order("uncheck", args).map(TodoCommand::Uncheck),
            "show" => expect_no_args("show", args).map(|()| TodoCommand::Show),
            "clear" => expect_no_args("clear", args).map(|()| TodoCommand::Clear),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

impl TodoCommand {
    /// Run against `manager`.
    pub fn apply(self, manager: &mut TodoListManager) -> Result<TodoOutcome, TodoError> {
        match self {
            TodoCommand::Create(titles) => manager.create(&titles),
            TodoCommand::Check(order) => manager.check(order),
            TodoCommand::Uncheck(order) => manager.uncheck(order),
            TodoCommand::Show => manager.show(),
            TodoCommand::Clear => manager.clear(),
        }
    }

    /// Run against `manager`, folding any error into the response.
    pub fn execute(self, manager: &mut TodoListManager) -> TodoResponse {
        TodoResponse::from(self.apply(manager))
    }
}

/// Parse and execute one command line.
pub fn run_line(line: &str, manager: &mut TodoListManager) -> TodoResponse {
    match line.parse::<TodoCommand>() {
        Ok(command) => command.execute(manager),
        Err(err) => TodoResponse::failure(err.to_string()),
    }
}
