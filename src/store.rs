use chrono::{Local, NaiveDate};
use crate::models::{Category, Task, DEFAULT_CATEGORY_ID};
use crate::storage::{load_categories, load_tasks, save_categories, save_tasks, StorageError};

/// In-memory task and category collections, mirrored to disk.
///
/// Collections are loaded once at construction. Every mutating operation
/// updates the in-memory state and persists the affected collection(s)
/// before returning, so the next read (here or in a later process) always
/// observes the mutation. A failed write is returned as an error; the
/// in-memory change stands, but callers must not report it as durable.
pub struct TaskStore {
    tasks: Vec<Task>,
    categories: Vec<Category>,
}

impl TaskStore {
    /// Creates a store from the persisted collections.
    ///
    /// The categories load seeds the default category on first run.
    pub fn load() -> TaskStore {
        TaskStore {
            tasks: load_tasks(),
            categories: load_categories(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn task(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Adds a new task and returns its id.
    ///
    /// An empty or whitespace-only title is silently declined and
    /// `Ok(None)` is returned. An unknown `category_id` falls back to the
    /// default category so the reference always resolves.
    pub fn create_task(
        &mut self,
        title: String,
        description: Option<String>,
        due_date: Option<NaiveDate>,
        category_id: Option<u64>,
    ) -> Result<Option<u64>, StorageError> {
        if title.trim().is_empty() {
            return Ok(None);
        }
        let category_id = category_id
            .filter(|id| self.categories.iter().any(|c| c.id == *id))
            .unwrap_or(DEFAULT_CATEGORY_ID);
        let next_id = self.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        self.tasks.push(Task {
            id: next_id,
            title,
            description,
            due_date,
            category_id,
            completed: false,
            created_at: Local::now().to_rfc3339(),
        });
        save_tasks(&self.tasks)?;
        Ok(Some(next_id))
    }

    /// Adds a new category and returns its id.
    ///
    /// An empty or whitespace-only name is silently declined.
    pub fn create_category(&mut self, name: String) -> Result<Option<u64>, StorageError> {
        if name.trim().is_empty() {
            return Ok(None);
        }
        let next_id = self.categories.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        self.categories.push(Category { id: next_id, name });
        save_categories(&self.categories)?;
        Ok(Some(next_id))
    }

    /// Removes a category, reassigning its tasks to the default category.
    ///
    /// The default category cannot be deleted; deleting it or an unknown id
    /// is a no-op. Returns whether a category was removed.
    pub fn delete_category(&mut self, id: u64) -> Result<bool, StorageError> {
        if id == DEFAULT_CATEGORY_ID || !self.categories.iter().any(|c| c.id == id) {
            return Ok(false);
        }
        for task in self.tasks.iter_mut() {
            if task.category_id == id {
                task.category_id = DEFAULT_CATEGORY_ID;
            }
        }
        self.categories.retain(|c| c.id != id);
        save_tasks(&self.tasks)?;
        save_categories(&self.categories)?;
        Ok(true)
    }

    /// Flips the completed flag of the task with the given id.
    ///
    /// Returns whether a task was found.
    pub fn toggle_complete(&mut self, id: u64) -> Result<bool, StorageError> {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(t) => {
                t.completed = !t.completed;
                save_tasks(&self.tasks)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Removes the task with the given id. Returns whether one was removed.
    pub fn delete_task(&mut self, id: u64) -> Result<bool, StorageError> {
        let len_before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == len_before {
            return Ok(false);
        }
        save_tasks(&self.tasks)?;
        Ok(true)
    }

    /// Applies the provided fields to the task with the given id.
    ///
    /// Outer `None` leaves a field untouched; `Some(None)` clears an
    /// optional field (description, due date). An empty new title is
    /// ignored (the existing title is kept); an unknown new category falls
    /// back to the default. The completed flag and creation timestamp are
    /// never edited. Returns whether a task was found.
    pub fn update_task(
        &mut self,
        id: u64,
        title: Option<String>,
        description: Option<Option<String>>,
        due_date: Option<Option<NaiveDate>>,
        category_id: Option<u64>,
    ) -> Result<bool, StorageError> {
        let valid_category = category_id.map(|cid| {
            if self.categories.iter().any(|c| c.id == cid) {
                cid
            } else {
                DEFAULT_CATEGORY_ID
            }
        });
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(t) => {
                if let Some(title) = title {
                    if !title.trim().is_empty() {
                        t.title = title;
                    }
                }
                if let Some(d) = description {
                    t.description = d;
                }
                if let Some(d) = due_date {
                    t.due_date = d;
                }
                if let Some(cid) = valid_category {
                    t.category_id = cid;
                }
                save_tasks(&self.tasks)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Groups tasks by category.
    ///
    /// Yields each category in stored order together with the tasks that
    /// reference it, preserving task insertion order within each group.
    pub fn tasks_by_category(&self) -> Vec<(&Category, Vec<&Task>)> {
        self.categories
            .iter()
            .map(|c| {
                let tasks = self.tasks.iter().filter(|t| t.category_id == c.id).collect();
                (c, tasks)
            })
            .collect()
    }

    /// Display name of a category, or "Uncategorized" when the id does not
    /// resolve.
    pub fn category_name(&self, id: u64) -> &str {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
            .unwrap_or("Uncategorized")
    }
}
