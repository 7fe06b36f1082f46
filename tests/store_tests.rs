use taskdeck::models::DEFAULT_CATEGORY_ID;
use taskdeck::storage::{load_categories, load_tasks};
use taskdeck::store::TaskStore;
use chrono::NaiveDate;
use std::env;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::TempDir;

// Use a mutex to ensure tests run serially since they modify the environment variable
static TEST_MUTEX: Mutex<()> = Mutex::new(());

fn with_test_db<F>(f: F)
where
    F: FnOnce(PathBuf),
{
    let _guard = TEST_MUTEX.lock().unwrap();

    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("tasks.json");
    env::set_var("TASKS_DB", db_path.to_str().unwrap());

    f(db_path);

    env::remove_var("TASKS_DB");
}

#[test]
fn test_create_task_appends_uncompleted() {
    with_test_db(|_path| {
        let mut store = TaskStore::load();
        assert!(store.tasks().is_empty());

        let id = store.create_task("Buy milk".into(), None, None, None).unwrap();
        assert!(id.is_some());
        assert_eq!(store.tasks().len(), 1);
        assert!(!store.tasks()[0].completed);
        assert_eq!(store.tasks()[0].category_id, DEFAULT_CATEGORY_ID);
    });
}

#[test]
fn test_create_task_blank_title_declined() {
    with_test_db(|_path| {
        let mut store = TaskStore::load();
        assert_eq!(store.create_task("".into(), None, None, None).unwrap(), None);
        assert_eq!(store.create_task("   ".into(), None, None, None).unwrap(), None);
        assert!(store.tasks().is_empty());
    });
}

#[test]
fn test_toggle_flips_only_target() {
    with_test_db(|_path| {
        let mut store = TaskStore::load();
        let a = store.create_task("A".into(), None, None, None).unwrap().unwrap();
        let b = store.create_task("B".into(), None, None, None).unwrap().unwrap();

        assert!(store.toggle_complete(a).unwrap());
        assert!(store.task(a).unwrap().completed);
        assert!(!store.task(b).unwrap().completed);

        // Toggling again flips back
        assert!(store.toggle_complete(a).unwrap());
        assert!(!store.task(a).unwrap().completed);

        // Unknown id is a no-op
        assert!(!store.toggle_complete(9999).unwrap());
    });
}

#[test]
fn test_delete_category_reassigns_tasks() {
    with_test_db(|_path| {
        let mut store = TaskStore::load();
        let work = store.create_category("Work".into()).unwrap().unwrap();
        let t = store
            .create_task("Report".into(), None, None, Some(work))
            .unwrap()
            .unwrap();
        assert_eq!(store.task(t).unwrap().category_id, work);

        assert!(store.delete_category(work).unwrap());
        assert!(store.categories().iter().all(|c| c.id != work));
        assert_eq!(store.task(t).unwrap().category_id, DEFAULT_CATEGORY_ID);
        assert_eq!(store.category_name(store.task(t).unwrap().category_id), "General");
    });
}

#[test]
fn test_default_category_not_deletable() {
    with_test_db(|_path| {
        let mut store = TaskStore::load();
        assert!(!store.delete_category(DEFAULT_CATEGORY_ID).unwrap());
        assert!(store.categories().iter().any(|c| c.is_default()));
    });
}

#[test]
fn test_persistence_round_trip() {
    with_test_db(|_path| {
        let mut store = TaskStore::load();
        store.create_category("Home".into()).unwrap();
        let due = NaiveDate::from_ymd_opt(2026, 12, 24).unwrap();
        store
            .create_task("One".into(), Some("first".into()), Some(due), None)
            .unwrap();
        store.create_task("Two".into(), None, None, Some(1)).unwrap();
        store.toggle_complete(1).unwrap();

        let tasks = load_tasks();
        let categories = load_categories();
        let reloaded = TaskStore::load();

        assert_eq!(reloaded.tasks().len(), tasks.len());
        for (a, b) in reloaded.tasks().iter().zip(store.tasks()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.title, b.title);
            assert_eq!(a.description, b.description);
            assert_eq!(a.due_date, b.due_date);
            assert_eq!(a.category_id, b.category_id);
            assert_eq!(a.completed, b.completed);
            assert_eq!(a.created_at, b.created_at);
        }
        assert_eq!(reloaded.task(1).unwrap().due_date, Some(due));
        assert_eq!(reloaded.categories().len(), categories.len());
        for (a, b) in reloaded.categories().iter().zip(store.categories()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.name, b.name);
        }
    });
}

#[test]
fn test_failed_save_surfaces_error() {
    with_test_db(|db_path| {
        let mut store = TaskStore::load();

        // Point the database into a directory that does not exist, so the
        // next write fails
        let mut bad = db_path.clone();
        bad.pop();
        bad.push("missing");
        bad.push("tasks.json");
        env::set_var("TASKS_DB", bad.to_str().unwrap());

        assert!(store.create_task("Vanishes".into(), None, None, None).is_err());

        env::set_var("TASKS_DB", db_path.to_str().unwrap());
        assert!(load_tasks().is_empty());
    });
}

#[test]
fn test_first_load_seeds_default_category() {
    with_test_db(|_path| {
        let categories = load_categories();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].id, DEFAULT_CATEGORY_ID);
        assert_eq!(categories[0].name, "General");

        // The seeded collection was written back immediately
        let reloaded = load_categories();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded[0].name, "General");
    });
}

#[test]
fn test_task_lifecycle_scenario() {
    with_test_db(|_path| {
        // Start: only the default "General" category
        let mut store = TaskStore::load();
        assert_eq!(store.categories().len(), 1);

        let id = store
            .create_task("Buy milk".into(), None, None, None)
            .unwrap()
            .unwrap();
        let groups = store.tasks_by_category();
        assert_eq!(groups[0].0.name, "General");
        assert_eq!(groups[0].1.len(), 1);
        assert!(!groups[0].1[0].completed);

        store.toggle_complete(id).unwrap();
        assert!(store.task(id).unwrap().completed);

        store.update_task(id, Some("Buy oat milk".into()), None, None, None).unwrap();
        assert_eq!(store.task(id).unwrap().title, "Buy oat milk");
        assert!(store.task(id).unwrap().completed);

        store.delete_task(id).unwrap();
        assert!(store.tasks().is_empty());
    });
}

#[test]
fn test_category_deletion_scenario() {
    with_test_db(|_path| {
        let mut store = TaskStore::load();
        let work = store.create_category("Work".into()).unwrap().unwrap();
        store.create_task("Report".into(), None, None, Some(work)).unwrap();

        store.delete_category(work).unwrap();

        let groups = store.tasks_by_category();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].0.name, "General");
        assert_eq!(groups[0].1.len(), 1);
        assert_eq!(groups[0].1[0].title, "Report");
    });
}

#[test]
fn test_update_ignores_blank_title() {
    with_test_db(|_path| {
        let mut store = TaskStore::load();
        let id = store
            .create_task("Keep me".into(), None, None, None)
            .unwrap()
            .unwrap();

        assert!(store.update_task(id, Some("  ".into()), None, None, None).unwrap());
        assert_eq!(store.task(id).unwrap().title, "Keep me");
    });
}

#[test]
fn test_update_clears_optional_fields() {
    with_test_db(|_path| {
        let mut store = TaskStore::load();
        let due = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let id = store
            .create_task("Trim me".into(), Some("notes".into()), Some(due), None)
            .unwrap()
            .unwrap();

        // Outer None leaves the fields alone
        store.update_task(id, Some("Still trim me".into()), None, None, None).unwrap();
        assert_eq!(store.task(id).unwrap().description, Some("notes".into()));
        assert_eq!(store.task(id).unwrap().due_date, Some(due));

        // Some(None) clears them
        store.update_task(id, None, Some(None), Some(None), None).unwrap();
        assert_eq!(store.task(id).unwrap().description, None);
        assert_eq!(store.task(id).unwrap().due_date, None);

        // And the cleared state is what persisted
        let reloaded = TaskStore::load();
        assert_eq!(reloaded.task(id).unwrap().description, None);
        assert_eq!(reloaded.task(id).unwrap().due_date, None);
    });
}

#[test]
fn test_grouping_preserves_insertion_order() {
    with_test_db(|_path| {
        let mut store = TaskStore::load();
        let home = store.create_category("Home".into()).unwrap().unwrap();
        store.create_task("First".into(), None, None, Some(home)).unwrap();
        store.create_task("General one".into(), None, None, None).unwrap();
        store.create_task("Second".into(), None, None, Some(home)).unwrap();

        let groups = store.tasks_by_category();
        // Categories in stored order: General first, then Home
        assert_eq!(groups[0].0.name, "General");
        assert_eq!(groups[1].0.name, "Home");
        let home_titles: Vec<&str> =
            groups[1].1.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(home_titles, vec!["First", "Second"]);
    });
}

#[test]
fn test_category_name_fallback() {
    with_test_db(|_path| {
        let store = TaskStore::load();
        assert_eq!(store.category_name(DEFAULT_CATEGORY_ID), "General");
        assert_eq!(store.category_name(42), "Uncategorized");
    });
}

#[test]
fn test_create_task_unknown_category_falls_back() {
    with_test_db(|_path| {
        let mut store = TaskStore::load();
        let id = store
            .create_task("Orphan".into(), None, None, Some(123))
            .unwrap()
            .unwrap();
        assert_eq!(store.task(id).unwrap().category_id, DEFAULT_CATEGORY_ID);
    });
}
