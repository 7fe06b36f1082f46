use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use crate::models::{Category, Task};

/// Errors raised when writing a collection to disk.
///
/// Loads are deliberately lenient (missing or unreadable files come back as
/// empty collections); only saves surface errors to the caller.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Returns the path to the tasks database file (`tasks.json`).
///
/// The path is determined in the following order:
/// 1. `TASKS_DB` environment variable.
/// 2. `~/.local/share/taskdeck/tasks.json` (on Linux).
/// 3. `./tasks.json` (fallback).
fn db_path() -> PathBuf {
    std::env::var("TASKS_DB").map(PathBuf::from).unwrap_or_else(|_| {
        let mut p = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push("taskdeck");
        if !p.exists() {
            let _ = fs::create_dir_all(&p);
        }
        p.push("tasks.json");
        p
    })
}

/// Returns the path to the categories database file (`categories.json`).
///
/// Located in the same directory as the tasks database.
fn categories_path() -> PathBuf {
    let mut p = db_path();
    p.pop();
    p.push("categories.json");
    p
}

fn read_file(path: &Path) -> Option<String> {
    if !path.exists() {
        return None;
    }
    let mut f = OpenOptions::new().read(true).open(path).ok()?;
    let mut s = String::new();
    f.read_to_string(&mut s).ok()?;
    Some(s)
}

fn write_file(path: &Path, contents: &str) -> Result<(), StorageError> {
    let mut f = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;
    f.write_all(contents.as_bytes())?;
    Ok(())
}

/// Loads all tasks from the storage file.
///
/// Returns an empty vector if the file does not exist or cannot be read.
pub fn load_tasks() -> Vec<Task> {
    match read_file(&db_path()) {
        Some(s) => serde_json::from_str(&s).unwrap_or_else(|_| Vec::new()),
        None => Vec::new(),
    }
}

/// Saves the given list of tasks to the storage file.
///
/// Overwrites the existing file.
pub fn save_tasks(tasks: &[Task]) -> Result<(), StorageError> {
    let s = serde_json::to_string_pretty(tasks)?;
    write_file(&db_path(), &s)
}

/// Loads all categories from the storage file.
///
/// If the file is absent (first run) or holds no categories, the collection
/// is seeded with the default "General" category and written back
/// immediately, so the default is always present.
pub fn load_categories() -> Vec<Category> {
    let categories: Vec<Category> = match read_file(&categories_path()) {
        Some(s) => serde_json::from_str(&s).unwrap_or_else(|_| Vec::new()),
        None => Vec::new(),
    };
    if categories.iter().any(|c| c.is_default()) {
        return categories;
    }
    let mut seeded = vec![Category::default_category()];
    seeded.extend(categories);
    let _ = save_categories(&seeded);
    seeded
}

/// Saves the given list of categories to the storage file.
pub fn save_categories(categories: &[Category]) -> Result<(), StorageError> {
    let s = serde_json::to_string_pretty(categories)?;
    write_file(&categories_path(), &s)
}

/// Deletes the tasks and categories database files.
pub fn delete_database() -> Result<(), StorageError> {
    let t_path = db_path();
    if t_path.exists() {
        fs::remove_file(t_path)?;
    }
    let c_path = categories_path();
    if c_path.exists() {
        fs::remove_file(c_path)?;
    }
    Ok(())
}
