use taskdeck::commands::*;
use taskdeck::models::DEFAULT_CATEGORY_ID;
use taskdeck::storage::{load_categories, load_tasks};
use std::env;
use std::sync::Mutex;
use tempfile::TempDir;

// Use a mutex to ensure tests run serially since they modify the environment variable
static TEST_MUTEX: Mutex<()> = Mutex::new(());

fn with_test_db<F>(f: F)
where
    F: FnOnce(),
{
    let _guard = TEST_MUTEX.lock().unwrap();

    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("tasks.json");
    env::set_var("TASKS_DB", db_path.to_str().unwrap());

    f();

    env::remove_var("TASKS_DB");
}

#[test]
fn test_add_and_load() {
    with_test_db(|| {
        cmd_add("Test Task".into(), Some("A description".into()), Some("2026-12-01".into()), None, true);

        let tasks = load_tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Test Task");
        assert_eq!(tasks[0].description, Some("A description".into()));
        assert_eq!(tasks[0].due_date.unwrap().to_string(), "2026-12-01");
        assert_eq!(tasks[0].category_id, DEFAULT_CATEGORY_ID);
    });
}

#[test]
fn test_add_invalid_due_date() {
    with_test_db(|| {
        cmd_add("Bad date".into(), None, Some("tomorrow".into()), None, true);
        assert!(load_tasks().is_empty());
    });
}

#[test]
fn test_add_blank_title_is_silent_noop() {
    with_test_db(|| {
        cmd_add("   ".into(), None, None, None, true);
        assert!(load_tasks().is_empty());
    });
}

#[test]
fn test_complete_toggles() {
    with_test_db(|| {
        cmd_add("Task to complete".into(), None, None, None, true);
        let id = load_tasks()[0].id;

        cmd_complete(id, true);
        assert!(load_tasks()[0].completed);

        cmd_complete(id, true);
        assert!(!load_tasks()[0].completed);
    });
}

#[test]
fn test_remove() {
    with_test_db(|| {
        cmd_add("Task to remove".into(), None, None, None, true);
        let id = load_tasks()[0].id;

        cmd_remove(id, true);
        assert!(load_tasks().is_empty());
    });
}

#[test]
fn test_edit_fields() {
    with_test_db(|| {
        cmd_add("Original".into(), None, None, None, true);
        let id = load_tasks()[0].id;

        cmd_edit(id, Some("Renamed".into()), Some("now with notes".into()), Some("2026-06-30".into()), false, false, None, true);

        let tasks = load_tasks();
        assert_eq!(tasks[0].title, "Renamed");
        assert_eq!(tasks[0].description, Some("now with notes".into()));
        assert_eq!(tasks[0].due_date.unwrap().to_string(), "2026-06-30");
        assert!(!tasks[0].completed);
    });
}

#[test]
fn test_edit_clear_flags() {
    with_test_db(|| {
        cmd_add("Has extras".into(), Some("temporary".into()), Some("2026-06-30".into()), None, true);
        let id = load_tasks()[0].id;

        cmd_edit(id, None, None, None, true, true, None, true);

        let tasks = load_tasks();
        assert_eq!(tasks[0].title, "Has extras");
        assert_eq!(tasks[0].description, None);
        assert_eq!(tasks[0].due_date, None);
    });
}

#[test]
fn test_category_add_and_assignment() {
    with_test_db(|| {
        cmd_category_add("Work".into(), true);

        let categories = load_categories();
        assert_eq!(categories.len(), 2);
        let work_id = categories.iter().find(|c| c.name == "Work").unwrap().id;

        cmd_add("Report".into(), None, None, Some(work_id), true);
        assert_eq!(load_tasks()[0].category_id, work_id);
    });
}

#[test]
fn test_category_remove_moves_tasks() {
    with_test_db(|| {
        cmd_category_add("Work".into(), true);
        let work_id = load_categories()
            .iter()
            .find(|c| c.name == "Work")
            .unwrap()
            .id;
        cmd_add("Report".into(), None, None, Some(work_id), true);

        cmd_category_remove(work_id, true);

        let categories = load_categories();
        assert!(categories.iter().all(|c| c.id != work_id));
        assert_eq!(load_tasks()[0].category_id, DEFAULT_CATEGORY_ID);
    });
}

#[test]
fn test_category_remove_default_is_noop() {
    with_test_db(|| {
        cmd_category_remove(DEFAULT_CATEGORY_ID, true);

        let categories = load_categories();
        assert!(categories.iter().any(|c| c.is_default()));
    });
}

#[test]
fn test_reset() {
    with_test_db(|| {
        cmd_add("Doomed".into(), None, None, None, true);
        cmd_category_add("Also doomed".into(), true);

        cmd_reset(true);

        assert!(load_tasks().is_empty());
        // Reload reseeds only the default category
        let categories = load_categories();
        assert_eq!(categories.len(), 1);
        assert!(categories[0].is_default());
    });
}
