use ratatui::widgets::TableState;
use chrono::NaiveDate;
use crate::models::Task;
use crate::storage::StorageError;
use crate::store::TaskStore;

#[derive(PartialEq)]
pub enum InputMode {
    Normal,
    Editing,
    Adding,
}

pub enum InputField {
    None,
    Title,
    Description,
    Due,
    Category,
}

pub enum DisplayItem {
    Task(Task),
    CategoryHeader(u64, String, usize), // Id, name, task count
}

/// TUI view state.
///
/// Owns the store plus purely presentational state (selection, input mode,
/// edit buffer, expanded task). None of this is ever persisted; the store
/// persists its own collections on each mutation.
pub struct App {
    pub store: TaskStore,
    pub display_items: Vec<DisplayItem>,
    pub state: TableState,
    pub input_mode: InputMode,
    pub input_field: InputField,
    pub input_buffer: String,
    /// Task being edited. At most one edit session exists at a time;
    /// starting an edit on another task drops the previous buffer.
    pub target_id: Option<u64>,
    pub add_state: AddState,
    pub expanded_task_id: Option<u64>,
    pub show_completed: bool,
    /// Last failed save, shown in the status bar until the next mutation.
    pub status: Option<String>,
}

/// State for the multi-step "Add" wizard.
#[derive(Default)]
pub struct AddState {
    pub title: String,
    pub description: Option<String>,
    pub due: Option<NaiveDate>,
    pub step: usize, // Task: 0 Title, 1 Description, 2 Due, 3 Category
    pub category: bool,
}

impl App {
    /// Creates a new App instance and loads initial data.
    pub fn new() -> App {
        let mut app = App {
            store: TaskStore::load(),
            display_items: Vec::new(),
            state: TableState::default(),
            input_mode: InputMode::Normal,
            input_field: InputField::None,
            input_buffer: String::new(),
            target_id: None,
            add_state: AddState::default(),
            expanded_task_id: None,
            show_completed: true,
            status: None,
        };
        app.reload();
        app
    }

    /// Records the outcome of a store mutation for the status bar.
    fn report<T>(&mut self, res: Result<T, StorageError>) {
        self.status = match res {
            Ok(_) => None,
            Err(e) => Some(format!("Save failed: {}", e)),
        };
    }

    /// Rebuilds the display list from the store's category grouping.
    pub fn reload(&mut self) {
        self.display_items.clear();
        for (category, tasks) in self.store.tasks_by_category() {
            let visible: Vec<&&Task> = tasks
                .iter()
                .filter(|t| self.show_completed || !t.completed)
                .collect();
            self.display_items.push(DisplayItem::CategoryHeader(
                category.id,
                category.name.clone(),
                visible.len(),
            ));
            for t in visible {
                self.display_items.push(DisplayItem::Task((**t).clone()));
            }
        }

        if self.display_items.is_empty() {
            self.state.select(None);
        } else if let Some(i) = self.state.selected() {
            if i >= self.display_items.len() {
                self.state.select(Some(self.display_items.len() - 1));
            }
        } else {
            self.state.select(Some(0));
        }

        if let Some(id) = self.expanded_task_id {
            if self.store.task(id).is_none() {
                self.expanded_task_id = None;
            }
        }
    }

    /// Selects the next item in the list.
    pub fn next(&mut self) {
        if self.display_items.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i >= self.display_items.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    /// Selects the previous item in the list.
    pub fn previous(&mut self) {
        if self.display_items.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    self.display_items.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    fn selected_task(&self) -> Option<&Task> {
        match self.state.selected().and_then(|i| self.display_items.get(i)) {
            Some(DisplayItem::Task(t)) => Some(t),
            _ => None,
        }
    }

    /// Toggles the completion flag of the currently selected task.
    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_task().map(|t| t.id) {
            let res = self.store.toggle_complete(id);
            self.report(res);
            self.reload();
        }
    }

    /// Deletes the currently selected item.
    ///
    /// A selected task is removed; a selected category header removes the
    /// category, moving its tasks to the default one. Deleting the default
    /// category's header does nothing.
    pub fn delete_selected(&mut self) {
        match self.state.selected().and_then(|i| self.display_items.get(i)) {
            Some(DisplayItem::Task(t)) => {
                let id = t.id;
                let res = self.store.delete_task(id);
                self.report(res);
                self.reload();
            }
            Some(DisplayItem::CategoryHeader(id, _, _)) => {
                let id = *id;
                let res = self.store.delete_category(id);
                self.report(res);
                self.reload();
            }
            None => {}
        }
    }

    /// Expands or collapses the detail panel for the selected task.
    pub fn toggle_expanded(&mut self) {
        if let Some(id) = self.selected_task().map(|t| t.id) {
            self.expanded_task_id = if self.expanded_task_id == Some(id) {
                None
            } else {
                Some(id)
            };
        }
    }

    /// Toggles the visibility of completed tasks.
    pub fn toggle_completed_filter(&mut self) {
        self.show_completed = !self.show_completed;
        self.reload();
    }

    /// Initiates the "Add Task" wizard.
    pub fn start_add(&mut self) {
        self.input_mode = InputMode::Adding;
        self.add_state = AddState::default();
        self.input_buffer.clear();
    }

    /// Initiates the single-step "Add Category" prompt.
    pub fn start_add_category(&mut self) {
        self.input_mode = InputMode::Adding;
        self.add_state = AddState::default();
        self.add_state.category = true;
        self.input_buffer.clear();
    }

    /// Initiates editing of a specific field for the selected task.
    ///
    /// Replaces any in-progress edit session; the prior buffer is dropped.
    pub fn start_edit(&mut self, field: InputField) {
        if let Some(t) = self.selected_task() {
            let (id, title, description, due, category_id) = (
                t.id,
                t.title.clone(),
                t.description.clone(),
                t.due_date,
                t.category_id,
            );
            self.target_id = Some(id);
            self.input_mode = InputMode::Editing;
            self.input_buffer = match field {
                InputField::Title => title,
                InputField::Description => description.unwrap_or_default(),
                InputField::Due => due.map(|d| d.to_string()).unwrap_or_default(),
                InputField::Category => category_id.to_string(),
                InputField::None => String::new(),
            };
            self.input_field = field;
        }
    }

    /// Leaves Adding/Editing mode, discarding the buffer.
    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input_field = InputField::None;
        self.input_buffer.clear();
        self.target_id = None;
    }

    /// Handles a committed line of input based on the current mode.
    pub fn handle_input(&mut self) {
        match self.input_mode {
            InputMode::Adding => self.handle_adding_input(),
            InputMode::Editing => self.handle_editing_input(),
            _ => {}
        }
    }

    /// Advances the "Add" wizard one step, creating the entity at the end.
    fn handle_adding_input(&mut self) {
        if self.add_state.category {
            // Single step: category name. A blank name is declined by the
            // store; either way the prompt closes.
            let res = self.store.create_category(self.input_buffer.clone());
            self.report(res);
            self.cancel_input();
            self.reload();
            return;
        }

        match self.add_state.step {
            0 => {
                // Title, required
                if !self.input_buffer.trim().is_empty() {
                    self.add_state.title = self.input_buffer.clone();
                    self.add_state.step += 1;
                    self.input_buffer.clear();
                }
            }
            1 => {
                // Description, optional
                if !self.input_buffer.is_empty() {
                    self.add_state.description = Some(self.input_buffer.clone());
                }
                self.add_state.step += 1;
                self.input_buffer.clear();
            }
            2 => {
                // Due date, optional; stay on step until valid or blank
                if self.input_buffer.is_empty() {
                    self.add_state.step += 1;
                } else if let Ok(d) =
                    NaiveDate::parse_from_str(&self.input_buffer, "%Y-%m-%d")
                {
                    self.add_state.due = Some(d);
                    self.add_state.step += 1;
                    self.input_buffer.clear();
                }
            }
            3 => {
                // Category id, optional (blank or unknown -> General)
                let category = self.input_buffer.parse::<u64>().ok();
                let res = self.store.create_task(
                    self.add_state.title.clone(),
                    self.add_state.description.clone(),
                    self.add_state.due,
                    category,
                );
                self.report(res);
                self.cancel_input();
                self.reload();
            }
            _ => {}
        }
    }

    /// Commits the edit buffer to the target task's field.
    ///
    /// An emptied buffer clears the description or due date; a blank title
    /// keeps the old one (the store declines it).
    fn handle_editing_input(&mut self) {
        if let Some(id) = self.target_id {
            match self.input_field {
                InputField::Title => {
                    let res = self
                        .store
                        .update_task(id, Some(self.input_buffer.clone()), None, None, None);
                    self.report(res);
                }
                InputField::Description => {
                    let description = if self.input_buffer.is_empty() {
                        None
                    } else {
                        Some(self.input_buffer.clone())
                    };
                    let res = self
                        .store
                        .update_task(id, None, Some(description), None, None);
                    self.report(res);
                }
                InputField::Due => {
                    let due = if self.input_buffer.is_empty() {
                        Some(None)
                    } else {
                        NaiveDate::parse_from_str(&self.input_buffer, "%Y-%m-%d")
                            .ok()
                            .map(Some)
                    };
                    if let Some(due) = due {
                        let res = self.store.update_task(id, None, None, Some(due), None);
                        self.report(res);
                    }
                }
                InputField::Category => {
                    if let Ok(cid) = self.input_buffer.parse::<u64>() {
                        let res = self.store.update_task(id, None, None, None, Some(cid));
                        self.report(res);
                    }
                }
                InputField::None => {}
            }
            self.cancel_input();
            self.reload();
        }
    }
}
