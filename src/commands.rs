use std::io::{self, Write};
use chrono::NaiveDate;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use crate::store::TaskStore;
use crate::storage::delete_database;

/// Adds a new task.
///
/// A blank title is declined without a message (matching the store's
/// silent-reject contract). An unknown category id falls back to "General".
pub fn cmd_add(
    title: String,
    description: Option<String>,
    due: Option<String>,
    category: Option<u64>,
    silent: bool,
) {
    let due_date = match due {
        Some(d) => match NaiveDate::parse_from_str(&d, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(e) => {
                if !silent { eprintln!("Invalid due date '{}': {}. Use YYYY-MM-DD.", d, e); }
                return;
            }
        },
        None => None,
    };

    let mut store = TaskStore::load();
    match store.create_task(title, description, due_date, category) {
        Ok(Some(id)) => {
            if !silent { println!("Task added (id = {})", id); }
        }
        Ok(None) => {} // Blank title, silently declined
        Err(e) => {
            if !silent { eprintln!("Failed to save tasks: {}", e); }
        }
    }
}

/// Marks a task as complete, or back to pending if it already was.
pub fn cmd_complete(id: u64, silent: bool) {
    let mut store = TaskStore::load();
    match store.toggle_complete(id) {
        Ok(true) => {
            if !silent {
                let state = if store.task(id).map(|t| t.completed).unwrap_or(false) {
                    "complete"
                } else {
                    "pending"
                };
                println!("Task {} marked as {}.", id, state);
            }
        }
        Ok(false) => {
            if !silent { eprintln!("Task {} not found.", id); }
        }
        Err(e) => {
            if !silent { eprintln!("Failed to save tasks: {}", e); }
        }
    }
}

/// Removes a task by ID.
pub fn cmd_remove(id: u64, silent: bool) {
    let mut store = TaskStore::load();
    match store.delete_task(id) {
        Ok(true) => {
            if !silent { println!("Task {} removed.", id); }
        }
        Ok(false) => {
            if !silent { eprintln!("Task {} not found.", id); }
        }
        Err(e) => {
            if !silent { eprintln!("Failed to save tasks: {}", e); }
        }
    }
}

/// Edits an existing task's details.
///
/// `clear_desc` / `clear_due` empty the respective optional field; they
/// take precedence over a new value passed alongside.
pub fn cmd_edit(
    id: u64,
    title: Option<String>,
    description: Option<String>,
    due: Option<String>,
    clear_desc: bool,
    clear_due: bool,
    category: Option<u64>,
    silent: bool,
) {
    let due_date = if clear_due {
        Some(None)
    } else {
        match due {
            Some(d) => match NaiveDate::parse_from_str(&d, "%Y-%m-%d") {
                Ok(date) => Some(Some(date)),
                Err(e) => {
                    if !silent { eprintln!("Invalid due date '{}': {}. Use YYYY-MM-DD.", d, e); }
                    return;
                }
            },
            None => None,
        }
    };
    let description = if clear_desc {
        Some(None)
    } else {
        description.map(Some)
    };

    let mut store = TaskStore::load();
    match store.update_task(id, title, description, due_date, category) {
        Ok(true) => {
            if !silent { println!("Task {} updated.", id); }
        }
        Ok(false) => {
            if !silent { eprintln!("Task {} not found.", id); }
        }
        Err(e) => {
            if !silent { eprintln!("Failed to save tasks: {}", e); }
        }
    }
}

/// Lists tasks in a formatted table, grouped by category.
///
/// By default, hides completed tasks unless `all` is true.
pub fn cmd_list(all: bool) {
    let store = TaskStore::load();
    if store.tasks().is_empty() {
        println!("No tasks found.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Title").add_attribute(Attribute::Bold),
            Cell::new("Category").add_attribute(Attribute::Bold),
            Cell::new("Due").add_attribute(Attribute::Bold),
            Cell::new("Created").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
        ]);

    for (category, tasks) in store.tasks_by_category() {
        for t in tasks {
            if t.completed && !all {
                continue;
            }
            let status = if t.completed { "Done" } else { "Pending" };
            let status_color = if t.completed { Color::Green } else { Color::Yellow };
            let created = t.created_at.split('T').next().unwrap_or(&t.created_at);
            table.add_row(vec![
                Cell::new(t.id),
                Cell::new(&t.title),
                Cell::new(&category.name),
                Cell::new(t.due_date.map(|d| d.to_string()).unwrap_or_default()),
                Cell::new(created),
                Cell::new(status).fg(status_color),
            ]);
        }
    }

    println!("{table}");
}

/// Adds a new category.
pub fn cmd_category_add(name: String, silent: bool) {
    let mut store = TaskStore::load();
    match store.create_category(name) {
        Ok(Some(id)) => {
            if !silent { println!("Category added (id = {})", id); }
        }
        Ok(None) => {} // Blank name, silently declined
        Err(e) => {
            if !silent { eprintln!("Failed to save categories: {}", e); }
        }
    }
}

/// Lists all categories with their task counts.
pub fn cmd_category_list() {
    let store = TaskStore::load();
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["ID", "Name", "Tasks"]);
    for (category, tasks) in store.tasks_by_category() {
        table.add_row(vec![
            category.id.to_string(),
            category.name.clone(),
            tasks.len().to_string(),
        ]);
    }
    println!("{table}");
}

/// Removes a category, moving its tasks to "General".
///
/// The default category cannot be removed.
pub fn cmd_category_remove(id: u64, silent: bool) {
    let mut store = TaskStore::load();
    match store.delete_category(id) {
        Ok(true) => {
            if !silent { println!("Category {} removed; its tasks moved to General.", id); }
        }
        Ok(false) => {
            if !silent { eprintln!("Category {} not found or is the default category.", id); }
        }
        Err(e) => {
            if !silent { eprintln!("Failed to save categories: {}", e); }
        }
    }
}

/// Resets the database by deleting all tasks and categories.
pub fn cmd_reset(force: bool) {
    if !force {
        print!("Are you sure you want to delete all tasks and categories? This cannot be undone. [y/N] ");
        io::stdout().flush().unwrap();
        let mut input = String::new();
        io::stdin().read_line(&mut input).unwrap();
        if input.trim().to_lowercase() != "y" {
            println!("Aborted.");
            return;
        }
    }

    if let Err(e) = delete_database() {
        eprintln!("Failed to reset database: {}", e);
    } else {
        println!("Database reset successfully.");
    }
}
