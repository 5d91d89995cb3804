//! Command execution for the CLI.
//!
//! This module handles running CLI commands and producing output. The
//! dispatch functions are generic over the persistence port so the tests
//! can drive them against an in-memory store.

use crate::app::App;
use crate::badges::{badge_by_id, ALL_BADGES};
use crate::cli::{Command, NotifyCommand, TaskCommand};
use crate::config::AppConfig;
use crate::error::Error;
use crate::models::{Category, Priority, Recurrence, Task};
use crate::notifications::AppNotification;
use crate::paths;
use crate::store::{PersistencePort, SqliteStore};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::process::ExitCode;

/// Output from running the CLI, with separate stdout and stderr messages.
#[derive(Debug)]
pub struct CliOutput {
    /// Exit code for the process.
    pub exit_code: ExitCode,
    /// Messages to print to stdout.
    pub stdout: Vec<String>,
    /// Messages to print to stderr.
    pub stderr: Vec<String>,
}

/// Run a CLI command.
pub fn run(command: Command) -> CliOutput {
    match command {
        Command::Version => run_version(),
        Command::Task(cmd) => with_app(|app| task_dispatch(app, cmd)),
        Command::Notify(cmd) => with_app(|app| notify_dispatch(app, cmd)),
        Command::Badges => with_app(|app| badges_dispatch(app)),
        Command::Status => with_app(status_dispatch),
    }
}

fn run_version() -> CliOutput {
    CliOutput {
        exit_code: ExitCode::SUCCESS,
        stdout: vec![],
        stderr: vec![format!("homely v{}", crate::VERSION)],
    }
}

fn with_app(f: impl FnOnce(&mut App<SqliteStore>) -> CliOutput) -> CliOutput {
    match open_app() {
        Ok(mut app) => f(&mut app),
        Err(e) => error_output(e),
    }
}

/// Open the on-disk store and start a session as the first registered
/// user, scoped to their first property.
fn open_app() -> Result<App<SqliteStore>, String> {
    let data_dir = paths::data_dir().ok_or_else(|| Error::NoDataDir.to_string())?;
    std::fs::create_dir_all(&data_dir).map_err(|e| e.to_string())?;

    let db_path = paths::db_path().ok_or_else(|| Error::NoDataDir.to_string())?;
    let store = SqliteStore::new(&db_path).map_err(|e| e.to_string())?;

    let config = match paths::config_path().map(|p| AppConfig::load_from(&p)) {
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            tracing::warn!(%e, "could not load config, using defaults");
            AppConfig::default()
        }
        None => AppConfig::default(),
    };

    let mut app = App::load(store, config);
    start_session(&mut app);
    Ok(app)
}

/// Log in as the first registered user (by ID order) and select their
/// first property.
pub(super) fn start_session<P: PersistencePort>(app: &mut App<P>) {
    let mut user_ids: Vec<String> = app.state.user_store.keys().cloned().collect();
    user_ids.sort();
    let Some(user_id) = user_ids.into_iter().next() else {
        return;
    };
    let property_id = app
        .state
        .user_store
        .get(&user_id)
        .and_then(|u| u.properties.first())
        .map(|p| p.id.clone());
    app.current_user_id = Some(user_id);
    app.selected_property_id = property_id;
}

// === Task Commands ===

pub(super) fn task_dispatch<P: PersistencePort>(app: &mut App<P>, cmd: TaskCommand) -> CliOutput {
    match cmd {
        TaskCommand::Add { name, due, category, priority, recurrence, notes, property } => {
            task_add(app, &name, &due, &category, &priority, &recurrence, notes, property)
        }
        TaskCommand::List { property, all, pending, completed } => {
            task_list(app, property, all, pending, completed)
        }
        TaskCommand::Complete { id } => task_complete(app, &id),
        TaskCommand::Delete { id } => task_delete(app, &id),
    }
}

#[allow(clippy::too_many_arguments)]
fn task_add<P: PersistencePort>(
    app: &mut App<P>,
    name: &str,
    due: &str,
    category: &str,
    priority: &str,
    recurrence: &str,
    notes: Option<String>,
    property: Option<String>,
) -> CliOutput {
    let due_date = match NaiveDate::parse_from_str(due, "%Y-%m-%d") {
        Ok(d) => d,
        Err(e) => return error_output(format!("Invalid due date {due:?}: {e}")),
    };
    let category = match Category::from_str(category) {
        Ok(c) => c,
        Err(e) => return error_output(e.to_string()),
    };
    let priority = match Priority::from_str(priority) {
        Ok(p) => p,
        Err(e) => return error_output(e.to_string()),
    };
    let recurrence = match Recurrence::from_str(recurrence) {
        Ok(r) => r,
        Err(e) => return error_output(e.to_string()),
    };
    if let Some(property_id) = property {
        app.select_property(Some(property_id));
    }

    let draft = Task {
        id: String::new(),
        property_id: String::new(),
        name: name.to_string(),
        category,
        priority,
        due_date,
        completed: false,
        completed_date: None,
        notes,
        cost: None,
        recurrence,
        service_provider_id: None,
        tenant_id: None,
        attachments: vec![],
        generated_from_task_id: None,
    };
    match app.add_task(draft) {
        Ok(id) => match app.state.tasks.iter().find(|t| t.id == id) {
            Some(task) => json_output(&TaskSummary::from_task(task)),
            None => error_output(format!("Task not found after create: {id}")),
        },
        Err(e) => error_output(e.to_string()),
    }
}

fn task_list<P: PersistencePort>(
    app: &App<P>,
    property: Option<String>,
    all: bool,
    pending: bool,
    completed: bool,
) -> CliOutput {
    let scope = if all { None } else { property.or_else(|| app.selected_property_id.clone()) };
    let summaries: Vec<TaskSummary> = app
        .state
        .tasks
        .iter()
        .filter(|t| scope.as_deref().map_or(true, |p| t.property_id == p))
        .filter(|t| !(pending && t.completed))
        .filter(|t| !(completed && !t.completed))
        .map(TaskSummary::from_task)
        .collect();
    json_output(&summaries)
}

fn task_complete<P: PersistencePort>(app: &mut App<P>, id: &str) -> CliOutput {
    let outcome = match app.toggle_task(id) {
        Ok(o) => o,
        Err(e) => return error_output(e.to_string()),
    };
    if !outcome.toggled {
        return error_output(format!("Task not found: {id}"));
    }

    let now_completed =
        app.state.tasks.iter().find(|t| t.id == id).is_some_and(|t| t.completed);
    let mut messages = vec![if now_completed {
        format!("Task {id} marked complete ({:+} points)", outcome.points_delta)
    } else {
        format!("Task {id} marked incomplete ({:+} points)", outcome.points_delta)
    }];
    if let Some(spawned) = outcome.spawned_task_id {
        messages.push(format!("Next occurrence scheduled: {spawned}"));
    }
    if let Some(removed) = outcome.removed_sibling_id {
        messages.push(format!("Pending next occurrence removed: {removed}"));
    }
    if let Some(badge_id) = outcome.newly_unlocked_badge {
        let name = badge_by_id(&badge_id).map_or(badge_id.clone(), |b| b.name.clone());
        messages.push(format!("Badge unlocked: {name}"));
    }
    CliOutput { exit_code: ExitCode::SUCCESS, stdout: messages, stderr: vec![] }
}

fn task_delete<P: PersistencePort>(app: &mut App<P>, id: &str) -> CliOutput {
    if !app.state.tasks.iter().any(|t| t.id == id) {
        return error_output(format!("Task not found: {id}"));
    }
    match app.delete_task(id) {
        Ok(()) => success_output(format!("Task deleted: {id}")),
        Err(e) => error_output(e.to_string()),
    }
}

// === Notification Commands ===

pub(super) fn notify_dispatch<P: PersistencePort>(app: &mut App<P>, cmd: NotifyCommand) -> CliOutput {
    // The notification list is derived, not stored, so every invocation
    // recomputes it first.
    app.refresh_notifications();
    match cmd {
        NotifyCommand::List => {
            let outputs: Vec<NotificationOutput> =
                app.notifications.iter().map(NotificationOutput::from).collect();
            json_output(&outputs)
        }
        NotifyCommand::Refresh => {
            let unread = app.notifications.iter().filter(|n| !n.read).count();
            success_output(format!(
                "{} notifications ({unread} unread)",
                app.notifications.len()
            ))
        }
        NotifyCommand::MarkRead => {
            app.mark_all_notifications_read();
            success_output(format!("Marked {} notifications read", app.notifications.len()))
        }
    }
}

// === Badges / Status ===

pub(super) fn badges_dispatch<P: PersistencePort>(app: &App<P>) -> CliOutput {
    let Some(user) = app.current_user() else {
        return error_output("No registered user".to_string());
    };
    let outputs: Vec<BadgeOutput> = ALL_BADGES
        .iter()
        .map(|b| BadgeOutput {
            id: b.id.clone(),
            name: b.name.clone(),
            description: b.description.clone(),
            unlocked: user.unlocked_badges.contains(&b.id),
        })
        .collect();
    json_output(&outputs)
}

pub(super) fn status_dispatch<P: PersistencePort>(app: &mut App<P>) -> CliOutput {
    app.refresh_notifications();
    let Some(user) = app.current_user() else {
        return error_output("No registered user".to_string());
    };
    let today = Local::now().date_naive();
    let tasks = &app.state.tasks;
    let output = StatusOutput {
        user: user.name.clone(),
        email: user.email.clone(),
        points: user.points,
        badges_unlocked: user.unlocked_badges.len(),
        selected_property: app.selected_property_id.clone(),
        tasks_total: tasks.len(),
        tasks_pending: tasks.iter().filter(|t| !t.completed).count(),
        tasks_overdue: tasks.iter().filter(|t| !t.completed && t.due_date < today).count(),
        unread_notifications: app.notifications.iter().filter(|n| !n.read).count(),
        refresh_interval_minutes: app.config.notification_refresh_minutes,
    };
    json_output(&output)
}

// === Output Helpers ===

fn json_output<T: Serialize>(value: &T) -> CliOutput {
    match serde_json::to_string_pretty(value) {
        Ok(json) => CliOutput { exit_code: ExitCode::SUCCESS, stdout: vec![json], stderr: vec![] },
        Err(e) => error_output(e.to_string()),
    }
}

fn success_output(message: String) -> CliOutput {
    CliOutput { exit_code: ExitCode::SUCCESS, stdout: vec![message], stderr: vec![] }
}

fn error_output(message: String) -> CliOutput {
    CliOutput { exit_code: ExitCode::from(1), stdout: vec![], stderr: vec![message] }
}

// === Output Types ===

/// Task summary for list and create operations.
#[derive(Debug, Serialize)]
struct TaskSummary {
    id: String,
    name: String,
    property_id: String,
    category: String,
    priority: String,
    due_date: String,
    completed: bool,
    recurrence: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
}

impl TaskSummary {
    fn from_task(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            name: task.name.clone(),
            property_id: task.property_id.clone(),
            category: task.category.as_str().to_string(),
            priority: task.priority.as_str().to_string(),
            due_date: task.due_date.format("%Y-%m-%d").to_string(),
            completed: task.completed,
            recurrence: task.recurrence.as_str().to_string(),
            notes: task.notes.clone(),
        }
    }
}

/// Notification output for list operations.
#[derive(Debug, Serialize)]
struct NotificationOutput {
    source_id: String,
    kind: String,
    title: String,
    message: String,
    date: String,
    read: bool,
}

impl From<&AppNotification> for NotificationOutput {
    fn from(n: &AppNotification) -> Self {
        Self {
            source_id: n.key.source_id.clone(),
            kind: n.key.kind.as_str().to_string(),
            title: n.title.clone(),
            message: n.message.clone(),
            date: n.date.format("%Y-%m-%d %H:%M").to_string(),
            read: n.read,
        }
    }
}

/// Badge progress output.
#[derive(Debug, Serialize)]
struct BadgeOutput {
    id: String,
    name: String,
    description: String,
    unlocked: bool,
}

/// Summary output for the status command.
#[derive(Debug, Serialize)]
struct StatusOutput {
    user: String,
    email: String,
    points: i64,
    badges_unlocked: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    selected_property: Option<String>,
    tasks_total: usize,
    tasks_pending: usize,
    tasks_overdue: usize,
    unread_notifications: usize,
    refresh_interval_minutes: u64,
}
