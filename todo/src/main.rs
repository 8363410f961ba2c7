//! Sequential todo list tracker CLI.
//!
//! Keeps one ordered list per workspace. By default the list lives in
//! `~/.loom/projects/<name>-<hash>/todo.json`, or `.loom/todo.json` in the
//! workspace when no data directory is available.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use loom_todo::command::TodoCommand;
use loom_todo::error::TodoError;
use loom_todo::exit_codes;
use loom_todo::io::config::{ConfigLayer, default_data_dir, load_config};
use loom_todo::io::paths::{PathResolver, ProjectPathResolver, find_workspace_root};
use loom_todo::logging;
use loom_todo::manager::{TodoListManager, TodoOutcome};
use loom_todo::render::render_list;
use loom_todo::response::TodoResponse;

#[derive(Parser)]
#[command(name = "loom-todo", version, about = "Sequential todo list tracker")]
struct Cli {
    /// Workspace root. Defaults to the nearest ancestor containing `.git` or `.loom`.
    #[arg(long, global = true)]
    workspace: Option<PathBuf>,

    /// Data directory for project-scoped storage (overrides config).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Print the JSON response envelope instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replace any existing list with 2-10 new items.
    Create {
        #[arg(required = true)]
        titles: Vec<String>,
    },
    /// Check item N (all earlier items must be checked).
    Check { order: usize },
    /// Uncheck item N and every item after it.
    Uncheck { order: usize },
    /// Show the active list.
    Show,
    /// Delete the active list.
    Clear,
    /// Print a one-line progress summary.
    Status,
    /// Print the list as an agent prompt block.
    Prompt,
    /// Run one textual command, e.g. `exec 'create "a b" c'`.
    Exec { line: String },
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let overrides = ConfigLayer {
        data_dir: cli.data_dir.clone(),
        ..ConfigLayer::default()
    };
    let workspace = match cli.workspace {
        Some(workspace) => workspace,
        None => {
            let cwd = std::env::current_dir().context("read current directory")?;
            let data_dir = overrides.data_dir.clone().or_else(default_data_dir);
            find_workspace_root(&cwd, data_dir.as_deref())
        }
    };
    let cfg = load_config(&workspace, overrides).context("load config")?;
    let resolver = ProjectPathResolver::from_config(&cfg);
    let mut manager = TodoListManager::open(
        &workspace,
        &cfg,
        resolver.as_ref().map(|r| r as &dyn PathResolver),
    );
    if let Some(warning) = manager.load_warning() {
        eprintln!("warning: {warning}");
    }

    let command = match cli.command {
        Command::Create { titles } => TodoCommand::Create(titles),
        Command::Check { order } => TodoCommand::Check(order),
        Command::Uncheck { order } => TodoCommand::Uncheck(order),
        Command::Show => TodoCommand::Show,
        Command::Clear => TodoCommand::Clear,
        Command::Status => return print_view(manager.status_line()),
        Command::Prompt => return print_view(manager.prompt_text()?),
        Command::Exec { line } => match line.parse::<TodoCommand>() {
            Ok(command) => command,
            Err(err) => {
                print_response(&TodoResponse::failure(err.to_string()), cli.json)?;
                return Ok(exit_codes::INVALID);
            }
        },
    };

    let result = command.apply(&mut manager);
    let code = exit_code(&result);
    print_response(&TodoResponse::from(result), cli.json)?;
    Ok(code)
}

fn exit_code(result: &Result<TodoOutcome, TodoError>) -> i32 {
    match result {
        Ok(_) => exit_codes::OK,
        Err(TodoError::NoActiveList) => exit_codes::NO_ACTIVE_LIST,
        Err(_) => exit_codes::REJECTED,
    }
}

fn print_view(view: Option<String>) -> Result<i32> {
    match view {
        Some(text) => {
            println!("{}", text.trim_end());
            Ok(exit_codes::OK)
        }
        None => {
            println!("No active todo list");
            Ok(exit_codes::NO_ACTIVE_LIST)
        }
    }
}

fn print_response(response: &TodoResponse, json: bool) -> Result<()> {
    if json {
        let payload = serde_json::to_string_pretty(response).context("serialize response")?;
        println!("{payload}");
        return Ok(());
    }
    if let Some(error) = &response.error {
        eprintln!("error: {error}");
    }
    if let Some(message) = &response.message {
        println!("{message}");
    }
    if let Some(list) = &response.list {
        println!("{}", render_list(list));
    }
    Ok(())
}
