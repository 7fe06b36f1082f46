//! # Taskdeck
//!
//! A terminal task manager written in Rust. Taskdeck combines a fast CLI for
//! quick entry with a rich TUI (Terminal User Interface) for interactive
//! management.
//!
//! ## Features
//!
//! *   **Categories**: Tasks are grouped into named categories; a built-in
//!     "General" category always exists and collects tasks whose category
//!     is deleted.
//! *   **Dual Interface**:
//!     *   **CLI**: Scriptable and quick for single commands.
//!     *   **TUI**: Interactive dashboard to manage tasks visually.
//! *   **Data Persistence**: Tasks and categories are stored in standard
//!     XDG data directories (JSON format), one file per collection.
//!
//! ## Data Storage
//!
//! Collections are saved in your local data directory:
//! *   Linux: `~/.local/share/taskdeck/tasks.json` (and `categories.json`)
//! *   macOS: `~/Library/Application Support/taskdeck/tasks.json`
//! *   Windows: `%APPDATA%\taskdeck\tasks.json`
//!
//! You can override this by setting the `TASKS_DB` environment variable to
//! the tasks file path; the categories file lives next to it.
//!
//! Every mutation writes the affected collection back to disk before
//! returning, so state is durable at each step.

pub mod commands;
pub mod models;
pub mod storage;
pub mod store;
pub mod tui;
