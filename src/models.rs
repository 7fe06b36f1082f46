use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier of the built-in "General" category.
///
/// It always exists (seeded on first load) and cannot be deleted; tasks
/// whose category is removed are reassigned to it.
pub const DEFAULT_CATEGORY_ID: u64 = 0;

/// Name of the built-in default category.
pub const DEFAULT_CATEGORY_NAME: &str = "General";

/// Represents a single task in the task manager.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Task {
    /// Unique identifier for the task.
    pub id: u64,
    /// The title of the task. Never empty.
    pub title: String,
    /// Optional longer description.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional due date.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Category the task belongs to. Always resolves to an existing
    /// category or [`DEFAULT_CATEGORY_ID`].
    #[serde(default)]
    pub category_id: u64,
    /// Whether the task has been completed.
    #[serde(default)]
    pub completed: bool,
    /// Timestamp when the task was created (ISO 8601). Fixed at creation.
    pub created_at: String,
}

/// Represents a named grouping of tasks.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Category {
    /// Unique identifier for the category.
    pub id: u64,
    /// Display name of the category.
    pub name: String,
}

impl Category {
    /// The always-present default category.
    pub fn default_category() -> Category {
        Category {
            id: DEFAULT_CATEGORY_ID,
            name: DEFAULT_CATEGORY_NAME.to_string(),
        }
    }

    /// Whether this is the reserved default category.
    pub fn is_default(&self) -> bool {
        self.id == DEFAULT_CATEGORY_ID
    }
}
