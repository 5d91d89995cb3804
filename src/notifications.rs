//! Derived notifications for due tasks and expiring warranties.
//!
//! The notification list is never patched incrementally: it is recomputed
//! wholesale from the current tasks and inventory every time either changes
//! (and periodically, to catch date-boundary crossings). Identity is a
//! tagged key of source entity and kind, so read state and first-seen
//! timestamps survive recomputation.

use crate::models::{InventoryItem, Task};
use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Days ahead at which an incomplete task starts producing an Upcoming
/// notification.
const UPCOMING_WINDOW_DAYS: i64 = 3;

/// Days ahead at which a warranty expiry starts producing a notification.
const WARRANTY_WINDOW_DAYS: u64 = 30;

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationKind {
    /// Task due within the upcoming window.
    Upcoming,
    /// Task past its due date.
    Overdue,
    /// Inventory warranty expiring soon.
    Warranty,
}

impl NotificationKind {
    /// Get the string representation of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "Upcoming",
            Self::Overdue => "Overdue",
            Self::Warranty => "Warranty",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Deterministic notification identity: source entity plus kind.
///
/// A tagged pair rather than a concatenated string, so a source ID that
/// happens to contain a kind name cannot collide with another key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationKey {
    /// ID of the task or inventory item this notification is about.
    #[serde(rename = "sourceId")]
    pub source_id: String,
    /// The notification kind.
    pub kind: NotificationKind,
}

/// A derived notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppNotification {
    /// Stable identity across recomputations.
    pub key: NotificationKey,
    /// Name of the source entity, used as the display title.
    pub title: String,
    /// Human-readable detail line.
    pub message: String,
    /// First-seen timestamp, inherited across recomputations.
    pub date: NaiveDateTime,
    /// Whether the user has seen this notification.
    pub read: bool,
}

impl AppNotification {
    /// ID of the related source entity.
    #[must_use]
    pub fn related_id(&self) -> &str {
        &self.key.source_id
    }

    /// Title for an external alert about this notification.
    #[must_use]
    pub fn alert_title(&self) -> String {
        match self.key.kind {
            NotificationKind::Warranty => format!("Warranty Alert: {}", self.title),
            kind => format!("{kind}: {}", self.title),
        }
    }
}

/// Permission tri-state for the host alert facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertPermission {
    /// Not yet asked.
    #[default]
    Default,
    /// User granted alerts.
    Granted,
    /// User denied alerts.
    Denied,
}

/// A host notification facility (e.g. desktop notifications).
///
/// Delivery is fire-and-forget: implementations swallow their own failures.
pub trait AlertSink {
    /// Show an alert with the given title, body, and de-duplication tag.
    fn show(&mut self, title: &str, body: &str, tag: &str);
}

/// The alert facility together with its permission state.
///
/// Absence of a sink is tolerated; alerts are silently skipped unless a sink
/// is present and permission is granted.
pub struct AlertGate {
    permission: AlertPermission,
    sink: Option<Box<dyn AlertSink>>,
}

impl std::fmt::Debug for AlertGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertGate")
            .field("permission", &self.permission)
            .field("sink", &self.sink.is_some())
            .finish()
    }
}

impl Default for AlertGate {
    fn default() -> Self {
        Self::disabled()
    }
}

impl AlertGate {
    /// An alert gate with no facility attached.
    #[must_use]
    pub const fn disabled() -> Self {
        Self { permission: AlertPermission::Default, sink: None }
    }

    /// An alert gate wrapping the given sink, permission not yet requested.
    #[must_use]
    pub fn new(sink: Box<dyn AlertSink>) -> Self {
        Self { permission: AlertPermission::Default, sink: Some(sink) }
    }

    /// Current permission state.
    #[must_use]
    pub const fn permission(&self) -> AlertPermission {
        self.permission
    }

    /// Record the outcome of a host permission request.
    pub fn set_permission(&mut self, permission: AlertPermission) {
        self.permission = permission;
    }

    /// Show an alert if a sink is present and permission is granted.
    pub fn show(&mut self, title: &str, body: &str, tag: &str) {
        if self.permission != AlertPermission::Granted {
            return;
        }
        if let Some(sink) = self.sink.as_mut() {
            sink.show(title, body, tag);
        }
    }
}

/// Format a date the way the overdue message expects (`M/D/YYYY`).
fn short_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

fn task_notification(task: &Task, today: NaiveDate) -> Option<(NotificationKind, String)> {
    if task.completed {
        return None;
    }
    let diff_days = (task.due_date - today).num_days();
    if diff_days < 0 {
        return Some((
            NotificationKind::Overdue,
            format!("Was due on {}", short_date(task.due_date)),
        ));
    }
    if diff_days <= UPCOMING_WINDOW_DAYS {
        let message = match diff_days {
            0 => "Due today".to_string(),
            1 => "Due tomorrow".to_string(),
            n => format!("Due in {n} days"),
        };
        return Some((NotificationKind::Upcoming, message));
    }
    None
}

fn warranty_notification(
    item: &InventoryItem,
    selected_property_id: Option<&str>,
    today: NaiveDate,
) -> Option<String> {
    let expiry = item.warranty_expiry_date?;
    // Warranty alerts are scoped to the selected property; task alerts are
    // not. The asymmetry is intentional product behavior.
    if selected_property_id != Some(item.property_id.as_str()) {
        return None;
    }
    if expiry < today {
        return None;
    }
    let window_end = today.checked_add_days(Days::new(WARRANTY_WINDOW_DAYS))?;
    if expiry > window_end {
        return None;
    }
    let diff_days = (expiry - today).num_days();
    Some(match diff_days {
        0 => "Warranty expires today.".to_string(),
        1 => "Warranty expires tomorrow.".to_string(),
        n => format!("Warranty expires in {n} days."),
    })
}

/// Recompute the notification list.
///
/// `date` and `read` are inherited from the entry with the same key in
/// `previous` when one exists; brand-new keys get `date = now`, unread, and
/// fire one alert each through `alerts`. The result is sorted by first-seen
/// date descending. Returns `None` when the recomputed list is structurally
/// identical to `previous`, so downstream consumers can skip updates.
pub fn derive(
    tasks: &[Task],
    inventory: &[InventoryItem],
    selected_property_id: Option<&str>,
    previous: &[AppNotification],
    today: NaiveDate,
    now: NaiveDateTime,
    alerts: &mut AlertGate,
) -> Option<Vec<AppNotification>> {
    let mut next: Vec<AppNotification> = Vec::new();

    for task in tasks {
        if let Some((kind, message)) = task_notification(task, today) {
            next.push(build(
                NotificationKey { source_id: task.id.clone(), kind },
                &task.name,
                message,
                previous,
                now,
            ));
        }
    }

    for item in inventory {
        if let Some(message) = warranty_notification(item, selected_property_id, today) {
            next.push(build(
                NotificationKey {
                    source_id: item.id.clone(),
                    kind: NotificationKind::Warranty,
                },
                &item.name,
                message,
                previous,
                now,
            ));
        }
    }

    for notification in &next {
        let is_new = !previous.iter().any(|p| p.key == notification.key);
        if is_new {
            alerts.show(
                &notification.alert_title(),
                &notification.message,
                notification.related_id(),
            );
        }
    }

    next.sort_by(|a, b| b.date.cmp(&a.date));

    if next == previous {
        tracing::debug!("notification derivation unchanged, skipping update");
        return None;
    }
    Some(next)
}

fn build(
    key: NotificationKey,
    title: &str,
    message: String,
    previous: &[AppNotification],
    now: NaiveDateTime,
) -> AppNotification {
    let prior = previous.iter().find(|p| p.key == key);
    AppNotification {
        key,
        title: title.to_string(),
        message,
        date: prior.map_or(now, |p| p.date),
        read: prior.is_some_and(|p| p.read),
    }
}

/// Mark every notification as read.
pub fn mark_all_read(notifications: &mut [AppNotification]) {
    for notification in notifications.iter_mut() {
        notification.read = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, InventoryCategory, Priority, Recurrence};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn task(id: &str, name: &str, due: NaiveDate, completed: bool) -> Task {
        Task {
            id: id.to_string(),
            property_id: "prop-1".to_string(),
            name: name.to_string(),
            category: Category::General,
            priority: Priority::Low,
            due_date: due,
            completed,
            completed_date: completed.then(|| due.and_hms_opt(9, 0, 0).unwrap()),
            notes: None,
            cost: None,
            recurrence: Recurrence::None,
            service_provider_id: None,
            tenant_id: None,
            attachments: vec![],
            generated_from_task_id: None,
        }
    }

    fn item(id: &str, property_id: &str, expiry: Option<NaiveDate>) -> InventoryItem {
        InventoryItem {
            id: id.to_string(),
            property_id: property_id.to_string(),
            name: format!("Item {id}"),
            category: InventoryCategory::Appliance,
            purchase_date: None,
            warranty_expiry_date: expiry,
            price: None,
            model_number: None,
            serial_number: None,
            notes: None,
            attachments: vec![],
        }
    }

    /// Sink that records every alert it is asked to show.
    #[derive(Default)]
    struct Recorder(Rc<RefCell<Vec<(String, String, String)>>>);

    impl AlertSink for Recorder {
        fn show(&mut self, title: &str, body: &str, tag: &str) {
            self.0.borrow_mut().push((title.to_string(), body.to_string(), tag.to_string()));
        }
    }

    fn granted_recorder() -> (AlertGate, Rc<RefCell<Vec<(String, String, String)>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut gate = AlertGate::new(Box::new(Recorder(Rc::clone(&log))));
        gate.set_permission(AlertPermission::Granted);
        (gate, log)
    }

    fn today() -> NaiveDate {
        d(2024, 6, 15)
    }

    fn now() -> NaiveDateTime {
        today().and_hms_opt(8, 0, 0).unwrap()
    }

    #[test]
    fn test_due_today_tomorrow_and_in_n_days() {
        let tasks = vec![
            task("task-1", "A", d(2024, 6, 15), false),
            task("task-2", "B", d(2024, 6, 16), false),
            task("task-3", "C", d(2024, 6, 18), false),
            task("task-4", "D", d(2024, 6, 19), false),
        ];
        let mut gate = AlertGate::disabled();
        let result =
            derive(&tasks, &[], None, &[], today(), now(), &mut gate).unwrap();

        let msg = |id: &str| {
            result.iter().find(|n| n.related_id() == id).map(|n| n.message.clone())
        };
        assert_eq!(msg("task-1").as_deref(), Some("Due today"));
        assert_eq!(msg("task-2").as_deref(), Some("Due tomorrow"));
        assert_eq!(msg("task-3").as_deref(), Some("Due in 3 days"));
        // 4 days out is beyond the window
        assert!(msg("task-4").is_none());
    }

    #[test]
    fn test_overdue_message_and_kind() {
        let tasks = vec![task("task-1", "A", d(2024, 6, 14), false)];
        let mut gate = AlertGate::disabled();
        let result =
            derive(&tasks, &[], None, &[], today(), now(), &mut gate).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].key.kind, NotificationKind::Overdue);
        assert_eq!(result[0].message, "Was due on 6/14/2024");
    }

    #[test]
    fn test_completed_tasks_are_silent() {
        let tasks = vec![task("task-1", "A", d(2024, 6, 10), true)];
        let mut gate = AlertGate::disabled();
        let result = derive(&tasks, &[], None, &[], today(), now(), &mut gate);
        // New list is empty, previous was empty: structurally identical
        assert!(result.is_none());
    }

    #[test]
    fn test_warranty_scoped_to_selected_property() {
        let inventory = vec![
            item("inv-1", "prop-1", Some(d(2024, 6, 20))),
            item("inv-2", "prop-2", Some(d(2024, 6, 20))),
        ];
        let mut gate = AlertGate::disabled();
        let result = derive(
            &[],
            &inventory,
            Some("prop-1"),
            &[],
            today(),
            now(),
            &mut gate,
        )
        .unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].related_id(), "inv-1");
        assert_eq!(result[0].message, "Warranty expires in 5 days.");
    }

    #[test]
    fn test_warranty_window_edges() {
        let inventory = vec![
            item("inv-today", "prop-1", Some(d(2024, 6, 15))),
            item("inv-tomorrow", "prop-1", Some(d(2024, 6, 16))),
            item("inv-expired", "prop-1", Some(d(2024, 6, 14))),
            item("inv-far", "prop-1", Some(d(2024, 7, 16))),
            item("inv-edge", "prop-1", Some(d(2024, 7, 15))),
        ];
        let mut gate = AlertGate::disabled();
        let result = derive(
            &[],
            &inventory,
            Some("prop-1"),
            &[],
            today(),
            now(),
            &mut gate,
        )
        .unwrap();

        let msg = |id: &str| {
            result.iter().find(|n| n.related_id() == id).map(|n| n.message.clone())
        };
        assert_eq!(msg("inv-today").as_deref(), Some("Warranty expires today."));
        assert_eq!(msg("inv-tomorrow").as_deref(), Some("Warranty expires tomorrow."));
        assert_eq!(msg("inv-edge").as_deref(), Some("Warranty expires in 30 days."));
        assert!(msg("inv-expired").is_none());
        assert!(msg("inv-far").is_none());
    }

    #[test]
    fn test_derivation_is_idempotent() {
        let tasks = vec![task("task-1", "A", d(2024, 6, 15), false)];
        let mut gate = AlertGate::disabled();
        let first =
            derive(&tasks, &[], None, &[], today(), now(), &mut gate).unwrap();
        let later = now() + chrono::Duration::minutes(5);
        let second = derive(&tasks, &[], None, &first, today(), later, &mut gate);
        assert!(second.is_none());
    }

    #[test]
    fn test_read_and_date_preserved_across_recompute() {
        let tasks = vec![task("task-1", "A", d(2024, 6, 15), false)];
        let mut gate = AlertGate::disabled();
        let mut first =
            derive(&tasks, &[], None, &[], today(), now(), &mut gate).unwrap();
        mark_all_read(&mut first);

        // Add a second task so the list actually changes
        let tasks = vec![
            task("task-1", "A", d(2024, 6, 15), false),
            task("task-2", "B", d(2024, 6, 16), false),
        ];
        let later = now() + chrono::Duration::hours(1);
        let second =
            derive(&tasks, &[], None, &first, today(), later, &mut gate).unwrap();

        let old = second.iter().find(|n| n.related_id() == "task-1").unwrap();
        assert!(old.read);
        assert_eq!(old.date, now());
        let fresh = second.iter().find(|n| n.related_id() == "task-2").unwrap();
        assert!(!fresh.read);
        assert_eq!(fresh.date, later);
    }

    #[test]
    fn test_alerts_fire_only_for_new_keys() {
        let tasks = vec![task("task-1", "Clean Gutters", d(2024, 6, 15), false)];
        let (mut gate, log) = granted_recorder();

        let first =
            derive(&tasks, &[], None, &[], today(), now(), &mut gate).unwrap();
        assert_eq!(log.borrow().len(), 1);
        assert_eq!(log.borrow()[0].0, "Upcoming: Clean Gutters");
        assert_eq!(log.borrow()[0].2, "task-1");

        // Recompute with the same inputs: no new keys, no new alerts
        derive(&tasks, &[], None, &first, today(), now(), &mut gate);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_alerts_gated_on_permission() {
        let tasks = vec![task("task-1", "A", d(2024, 6, 15), false)];
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut gate = AlertGate::new(Box::new(Recorder(Rc::clone(&log))));

        // Default permission: silent
        derive(&tasks, &[], None, &[], today(), now(), &mut gate);
        assert!(log.borrow().is_empty());

        gate.set_permission(AlertPermission::Denied);
        derive(&tasks, &[], None, &[], today(), now(), &mut gate);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_warranty_alert_title() {
        let inventory = vec![item("inv-1", "prop-1", Some(d(2024, 6, 20)))];
        let (mut gate, log) = granted_recorder();
        derive(&[], &inventory, Some("prop-1"), &[], today(), now(), &mut gate);
        assert_eq!(log.borrow()[0].0, "Warranty Alert: Item inv-1");
    }

    #[test]
    fn test_sorted_by_date_descending() {
        let tasks = vec![task("task-1", "A", d(2024, 6, 15), false)];
        let mut gate = AlertGate::disabled();
        let first =
            derive(&tasks, &[], None, &[], today(), now(), &mut gate).unwrap();

        let tasks = vec![
            task("task-1", "A", d(2024, 6, 15), false),
            task("task-2", "B", d(2024, 6, 16), false),
        ];
        let later = now() + chrono::Duration::hours(2);
        let second =
            derive(&tasks, &[], None, &first, today(), later, &mut gate).unwrap();
        // Newest first
        assert_eq!(second[0].related_id(), "task-2");
        assert_eq!(second[1].related_id(), "task-1");
    }

    #[test]
    fn test_mark_all_read() {
        let tasks = vec![
            task("task-1", "A", d(2024, 6, 15), false),
            task("task-2", "B", d(2024, 6, 14), false),
        ];
        let mut gate = AlertGate::disabled();
        let mut list =
            derive(&tasks, &[], None, &[], today(), now(), &mut gate).unwrap();
        assert!(list.iter().all(|n| !n.read));
        mark_all_read(&mut list);
        assert!(list.iter().all(|n| n.read));
    }
}
