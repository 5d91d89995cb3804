//! Integration tests for `homely`.
//!
//! Exercises the full flow against a real SQLite store in a temp
//! directory: seed, toggle a recurring task, reload, and reverse.

use chrono::NaiveDate;
use homely::app::App;
use homely::config::AppConfig;
use homely::store::SqliteStore;
use homely::VERSION;
use tempfile::TempDir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn open_store(dir: &TempDir) -> SqliteStore {
    SqliteStore::new(dir.path().join("homely.sqlite3")).unwrap()
}

#[test]
fn test_version_exists() {
    assert!(!VERSION.is_empty());
}

#[test]
fn test_full_toggle_cycle_survives_reload() {
    let dir = TempDir::new().unwrap();
    let now = today().and_hms_opt(9, 30, 0).unwrap();

    let spawned_id = {
        let mut app = App::load_at(open_store(&dir), AppConfig::default(), today());
        assert!(app.login("alex.doe@example.com", "password123"));

        // task-2 is urgent, due today, with monthly recurrence
        let outcome = app.toggle_task_at("task-2", now).unwrap();
        assert!(outcome.toggled);
        assert_eq!(outcome.points_delta, 25);
        outcome.spawned_task_id.unwrap()
    };

    // Reload from disk in a fresh app
    let mut app = App::load_at(open_store(&dir), AppConfig::default(), today());
    assert!(app.login("alex.doe@example.com", "password123"));
    assert_eq!(app.current_user().unwrap().points, 25);
    assert!(app.state.tasks.iter().any(|t| t.id == "task-2" && t.completed));
    let spawned = app.state.tasks.iter().find(|t| t.id == spawned_id).unwrap();
    assert!(!spawned.completed);
    assert_eq!(spawned.due_date, NaiveDate::from_ymd_opt(2024, 7, 15).unwrap());
    assert_eq!(spawned.generated_from_task_id.as_deref(), Some("task-2"));

    // Reverse the completion; the pending next occurrence goes away
    let outcome = app.toggle_task_at("task-2", now).unwrap();
    assert_eq!(outcome.points_delta, -25);
    assert_eq!(outcome.removed_sibling_id.as_deref(), Some(spawned_id.as_str()));

    let app = App::load_at(open_store(&dir), AppConfig::default(), today());
    assert_eq!(app.state.user_store.get("user-1").unwrap().points, 0);
    assert!(!app.state.tasks.iter().any(|t| t.id == spawned_id));
}

#[test]
fn test_notifications_derived_from_persisted_state() {
    let dir = TempDir::new().unwrap();
    let now = today().and_hms_opt(8, 0, 0).unwrap();

    let mut app = App::load_at(open_store(&dir), AppConfig::default(), today());
    assert!(app.login("alex.doe@example.com", "password123"));
    assert!(app.refresh_notifications_at(today(), now));

    // task-2 is due today, task-1 due in three days, task-4/5 are overdue
    let ids: Vec<&str> = app.notifications.iter().map(|n| n.related_id()).collect();
    assert!(ids.contains(&"task-2"));
    assert!(ids.contains(&"task-1"));
    assert!(ids.contains(&"task-5"));

    // Read state is inherited across refreshes
    app.mark_all_notifications_read();
    app.delete_task("task-1").unwrap();
    assert!(app.refresh_notifications_at(today(), now));
    assert!(app.notifications.iter().all(|n| n.read));
    assert!(!app.notifications.iter().any(|n| n.related_id() == "task-1"));
}

#[test]
fn test_signup_and_property_setup() {
    let dir = TempDir::new().unwrap();

    {
        let mut app = App::load_at(open_store(&dir), AppConfig::default(), today());
        app.signup("Jordan Lee", "jordan@example.com", "hunter2", homely::models::UserRole::Homeowner)
            .unwrap();
        app.add_property("Elm Street Duplex", "9 Elm St", "A two-unit duplex").unwrap();
        assert!(app.selected_property_id.is_some());
    }

    let mut app = App::load_at(open_store(&dir), AppConfig::default(), today());
    assert!(app.login("jordan@example.com", "hunter2"));
    let user = app.current_user().unwrap();
    assert_eq!(user.properties.len(), 1);
    assert_eq!(user.properties[0].name, "Elm Street Duplex");
    assert_eq!(app.selected_property_id.as_deref(), Some(user.properties[0].id.as_str()));
}

#[test]
fn test_config_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");

    let config = AppConfig {
        sibling_matching: homely::lifecycle::SiblingMatching::Linked,
        ..AppConfig::default()
    };
    config.save_to(&path).unwrap();

    let loaded = AppConfig::load_from(&path).unwrap();
    assert_eq!(loaded.sibling_matching, homely::lifecycle::SiblingMatching::Linked);
}

#[test]
fn test_corrupt_slice_falls_back_to_seeds() {
    use homely::store::{keys, PersistencePort};

    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);
    store.save_raw(keys::TASKS, "{not json").unwrap();

    let app = App::load_at(open_store(&dir), AppConfig::default(), today());
    assert_eq!(app.state.tasks.len(), 7);
}
