//! Text views over a todo list: status line, agent prompt, plain listing.
//!
//! Item status is recomputed on every call via
//! [`item_statuses`](crate::core::status::item_statuses).

use anyhow::{Context, Result};
use minijinja::{Environment, context};
use serde::Serialize;

use crate::core::status::item_statuses;
use crate::core::types::{ItemStatus, TodoList};

const TODO_PROMPT_TEMPLATE: &str = include_str!("prompts/todo.md");

/// Per-item context for template rendering.
#[derive(Debug, Clone, Serialize)]
struct ItemContext {
    order: usize,
    title: String,
    status: &'static str,
    marker: &'static str,
}

#[derive(Debug, Clone, Serialize)]
struct NextContext {
    order: usize,
    title: String,
}

fn marker(status: ItemStatus) -> &'static str {
    match status {
        ItemStatus::Done => "[x]",
        ItemStatus::Ready => "[>]",
        ItemStatus::Locked => "[ ]",
    }
}

fn item_contexts(list: &TodoList) -> Vec<ItemContext> {
    list.items
        .iter()
        .zip(item_statuses(list))
        .map(|(item, status)| ItemContext {
            order: item.order,
            title: item.title.clone(),
            status: status.as_str(),
            marker: marker(status),
        })
        .collect()
}

/// One-line progress summary, e.g. `todo 1/3 | next: 2. build`.
pub fn status_line(list: &TodoList) -> String {
    let progress = format!("todo {}/{}", list.checked_count(), list.len());
    match list.next_ready() {
        Some(next) => format!("{progress} | next: {}. {}", next.order, next.title),
        None => format!("{progress} | complete"),
    }
}

/// Markdown block describing the list and the sequential rule for an agent.
pub fn prompt_text(list: &TodoList) -> Result<String> {
    let mut env = Environment::new();
    env.add_template("todo", TODO_PROMPT_TEMPLATE)
        .context("load todo prompt template")?;
    let template = env.get_template("todo")?;
    let next = list.next_ready().map(|item| NextContext {
        order: item.order,
        title: item.title.clone(),
    });
    let rendered = template
        .render(context! {
            checked => list.checked_count(),
            total => list.len(),
            items => item_contexts(list),
            next => next,
        })
        .context("render todo prompt")?;
    Ok(rendered)
}

/// Plain listing with one line per item.
pub fn render_list(list: &TodoList) -> String {
    item_contexts(list)
        .iter()
        .map(|item| format!("{} {}. {}", item.marker, item.order, item.title))
        .collect::<Vec<_>>()
        .join("\n")
}
