//! Application orchestration.
//!
//! [`App`] owns the in-memory state, the persistence port, the alert gate,
//! and the connectivity tracker, and exposes the data operations the
//! surrounding UI calls into. Every mutating operation writes the affected
//! state slices back to the store before returning. Slices are written
//! independently; there is no cross-slice transaction.

use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::id::generate_id;
use crate::lifecycle::{self, ToggleOutcome};
use crate::models::{InventoryItem, Property, ServiceProvider, Task, Tenant, User, UserRole};
use crate::notifications::{self, AlertGate, AppNotification};
use crate::state::{self, AppState};
use crate::store::{keys, load_or_seed, PersistencePort};
use crate::suggest::{sanitize, FetchGeneration, Suggestion, SuggestionService};
use crate::sync::Connectivity;
use chrono::{Days, Local, NaiveDate, NaiveDateTime};
use std::collections::HashMap;

/// Days ahead a task created from a recommendation is due by default.
const RECOMMENDATION_DUE_DAYS: u64 = 30;

/// The application core: state plus injected ports.
pub struct App<P: PersistencePort> {
    store: P,
    /// User-adjustable settings.
    pub config: AppConfig,
    /// All persisted state.
    pub state: AppState,
    /// ID of the logged-in user, if any.
    pub current_user_id: Option<String>,
    /// The transient property filter.
    pub selected_property_id: Option<String>,
    /// The derived notification list (in-memory only).
    pub notifications: Vec<AppNotification>,
    /// Host alert facility.
    pub alerts: AlertGate,
    /// Connectivity tracker.
    pub connectivity: Connectivity,
    /// Latest personalized recommendations for the selected property.
    pub recommendations: Vec<Suggestion>,
    recommendation_fetch: FetchGeneration,
}

impl<P: PersistencePort> std::fmt::Debug for App<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("current_user_id", &self.current_user_id)
            .field("selected_property_id", &self.selected_property_id)
            .field("tasks", &self.state.tasks.len())
            .field("notifications", &self.notifications.len())
            .finish_non_exhaustive()
    }
}

impl<P: PersistencePort> App<P> {
    /// Load application state from the store, seeding any missing or
    /// corrupt slice with demo data dated relative to today.
    pub fn load(store: P, config: AppConfig) -> Self {
        Self::load_at(store, config, Local::now().date_naive())
    }

    /// Load with an explicit `today` for the seed data (for testing).
    pub fn load_at(store: P, config: AppConfig, today: NaiveDate) -> Self {
        let tasks = load_or_seed(&store, keys::TASKS, || state::seed_tasks(today));
        let service_providers =
            load_or_seed(&store, keys::SERVICE_PROVIDERS, state::seed_providers);
        let inventory_items = load_or_seed(&store, keys::INVENTORY_ITEMS, state::seed_inventory);
        let tenants = load_or_seed(&store, keys::TENANTS, state::seed_tenants);
        let dark_mode = load_or_seed(&store, keys::DARK_MODE, || false);
        let mut user_store: HashMap<String, User> =
            load_or_seed(&store, keys::USER_STORE, HashMap::new);
        // Keep the demo login available when nobody has signed up yet
        if user_store.is_empty() {
            let user = state::seed_user();
            user_store.insert(user.id.clone(), user);
        }

        Self {
            store,
            config,
            state: AppState {
                tasks,
                service_providers,
                inventory_items,
                tenants,
                user_store,
                dark_mode,
            },
            current_user_id: None,
            selected_property_id: None,
            notifications: Vec::new(),
            alerts: AlertGate::disabled(),
            connectivity: Connectivity::default(),
            recommendations: Vec::new(),
            recommendation_fetch: FetchGeneration::default(),
        }
    }

    /// The logged-in user.
    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        self.current_user_id.as_ref().and_then(|id| self.state.user_store.get(id))
    }

    /// The selected property of the logged-in user.
    #[must_use]
    pub fn current_property(&self) -> Option<&Property> {
        let property_id = self.selected_property_id.as_deref()?;
        self.current_user()?.property(property_id)
    }

    // === Session ===

    /// Log in by email and password. Selects the user's first property.
    /// Returns false on bad credentials.
    pub fn login(&mut self, email: &str, password: &str) -> bool {
        let Some(user) =
            self.state.user_by_email(email).filter(|u| u.password == password).cloned()
        else {
            return false;
        };
        self.selected_property_id = user.properties.first().map(|p| p.id.clone());
        self.current_user_id = Some(user.id);
        true
    }

    /// Register a new user with no properties, points, or badges, and log
    /// them in.
    ///
    /// # Errors
    ///
    /// Returns an error if the user store cannot be persisted.
    pub fn signup(&mut self, name: &str, email: &str, password: &str, role: UserRole) -> Result<String> {
        let user = User {
            id: generate_id("user", name),
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role,
            properties: vec![],
            points: 0,
            unlocked_badges: vec![],
        };
        let user_id = user.id.clone();
        self.state.user_store.insert(user_id.clone(), user);
        self.save_users()?;
        self.current_user_id = Some(user_id.clone());
        self.selected_property_id = None;
        Ok(user_id)
    }

    /// Log out, clearing the session and the property selection.
    pub fn logout(&mut self) {
        self.current_user_id = None;
        self.selected_property_id = None;
        self.recommendations.clear();
    }

    /// Change the selected property. Outstanding recommendation fetches
    /// become stale.
    pub fn select_property(&mut self, property_id: Option<String>) {
        self.selected_property_id = property_id;
        self.recommendation_fetch.begin();
    }

    /// Add a property to the logged-in user and select it.
    ///
    /// # Errors
    ///
    /// Returns an error if nobody is logged in or the user store cannot be
    /// persisted.
    pub fn add_property(&mut self, name: &str, address: &str, description: &str) -> Result<String> {
        let user_id = self.current_user_id.clone().ok_or(Error::NotLoggedIn)?;
        let property = Property {
            id: generate_id("prop", name),
            name: name.to_string(),
            address: address.to_string(),
            description: description.to_string(),
        };
        let property_id = property.id.clone();
        if let Some(user) = self.state.user_store.get_mut(&user_id) {
            user.properties.push(property);
        }
        self.save_users()?;
        self.select_property(Some(property_id.clone()));
        Ok(property_id)
    }

    /// Flip the dark-mode flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the flag cannot be persisted.
    pub fn toggle_dark_mode(&mut self) -> Result<bool> {
        self.state.dark_mode = !self.state.dark_mode;
        self.store.save(keys::DARK_MODE, &self.state.dark_mode)?;
        Ok(self.state.dark_mode)
    }

    // === Task operations ===

    /// Add a task to the selected property. The task's ID, property, and
    /// completion state are assigned here; remaining fields come from the
    /// caller.
    ///
    /// # Errors
    ///
    /// Returns an error if no property is selected or persistence fails.
    pub fn add_task(&mut self, mut task: Task) -> Result<String> {
        let property_id =
            self.selected_property_id.clone().ok_or(Error::NoPropertySelected)?;
        task.id = generate_id("task", &task.name);
        task.property_id = property_id;
        task.completed = false;
        task.completed_date = None;
        let task_id = task.id.clone();
        self.state.tasks.push(task);
        self.save_tasks()?;
        Ok(task_id)
    }

    /// Replace a task wholesale. Unknown IDs are a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn edit_task(&mut self, updated: Task) -> Result<()> {
        lifecycle::replace_task(&mut self.state.tasks, updated);
        self.save_tasks()
    }

    /// Delete a task by ID. Unknown IDs are a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn delete_task(&mut self, task_id: &str) -> Result<()> {
        lifecycle::remove_task(&mut self.state.tasks, task_id);
        self.save_tasks()
    }

    /// Toggle completion on a task at the current local time.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn toggle_task(&mut self, task_id: &str) -> Result<ToggleOutcome> {
        self.toggle_task_at(task_id, Local::now().naive_local())
    }

    /// Toggle completion on a task at an explicit time (for testing).
    ///
    /// Requires a logged-in user; without one, or with an unknown task ID,
    /// nothing changes.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn toggle_task_at(&mut self, task_id: &str, now: NaiveDateTime) -> Result<ToggleOutcome> {
        let Some(user_id) = self.current_user_id.clone() else {
            return Ok(ToggleOutcome::default());
        };
        let state = &mut self.state;
        let Some(user) = state.user_store.get_mut(&user_id) else {
            return Ok(ToggleOutcome::default());
        };
        let outcome = lifecycle::toggle_completion(
            &mut state.tasks,
            user,
            task_id,
            now,
            self.config.sibling_matching,
        );
        if outcome.toggled {
            self.save_tasks()?;
            self.save_users()?;
        }
        Ok(outcome)
    }

    // === Service provider / inventory / tenant operations ===

    /// Add a service provider.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn add_provider(&mut self, mut provider: ServiceProvider) -> Result<String> {
        provider.id = generate_id("sp", &provider.name);
        let id = provider.id.clone();
        self.state.service_providers.push(provider);
        self.save_providers()?;
        Ok(id)
    }

    /// Delete a service provider and unassign it from any tasks.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn delete_provider(&mut self, provider_id: &str) -> Result<()> {
        self.state.service_providers.retain(|p| p.id != provider_id);
        lifecycle::unassign_provider(&mut self.state.tasks, provider_id);
        self.save_providers()?;
        self.save_tasks()
    }

    /// Add an inventory item to the selected property.
    ///
    /// # Errors
    ///
    /// Returns an error if no property is selected or persistence fails.
    pub fn add_inventory_item(&mut self, mut item: InventoryItem) -> Result<String> {
        let property_id =
            self.selected_property_id.clone().ok_or(Error::NoPropertySelected)?;
        item.id = generate_id("inv", &item.name);
        item.property_id = property_id;
        let id = item.id.clone();
        self.state.inventory_items.push(item);
        self.save_inventory()?;
        Ok(id)
    }

    /// Delete an inventory item by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn delete_inventory_item(&mut self, item_id: &str) -> Result<()> {
        self.state.inventory_items.retain(|i| i.id != item_id);
        self.save_inventory()
    }

    /// Add a tenant to the selected property.
    ///
    /// # Errors
    ///
    /// Returns an error if no property is selected or persistence fails.
    pub fn add_tenant(&mut self, mut tenant: Tenant) -> Result<String> {
        let property_id =
            self.selected_property_id.clone().ok_or(Error::NoPropertySelected)?;
        tenant.id = generate_id("t", &tenant.name);
        tenant.property_id = property_id;
        let id = tenant.id.clone();
        self.state.tenants.push(tenant);
        self.save_tenants()?;
        Ok(id)
    }

    /// Delete a tenant and unassign them from any tasks.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn delete_tenant(&mut self, tenant_id: &str) -> Result<()> {
        self.state.tenants.retain(|t| t.id != tenant_id);
        lifecycle::unassign_tenant(&mut self.state.tasks, tenant_id);
        self.save_tenants()?;
        self.save_tasks()
    }

    // === Notifications ===

    /// Recompute the notification list against the current local date.
    /// Returns true if the list changed.
    pub fn refresh_notifications(&mut self) -> bool {
        let now = Local::now().naive_local();
        self.refresh_notifications_at(now.date(), now)
    }

    /// Recompute the notification list at an explicit date/time (for
    /// testing and timer hosts). Returns true if the list changed.
    pub fn refresh_notifications_at(&mut self, today: NaiveDate, now: NaiveDateTime) -> bool {
        let next = notifications::derive(
            &self.state.tasks,
            &self.state.inventory_items,
            self.selected_property_id.as_deref(),
            &self.notifications,
            today,
            now,
            &mut self.alerts,
        );
        match next {
            Some(list) => {
                self.notifications = list;
                true
            }
            None => false,
        }
    }

    /// Mark every notification as read.
    pub fn mark_all_notifications_read(&mut self) {
        notifications::mark_all_read(&mut self.notifications);
    }

    // === AI suggestions ===

    /// Generate task suggestions for the selected property's description.
    /// Results are sanitized before being returned.
    ///
    /// # Errors
    ///
    /// Returns an error if offline, no property is selected, or the service
    /// fails; the caller surfaces it for a manual retry.
    pub fn generate_suggestions(
        &self,
        service: &dyn SuggestionService,
    ) -> Result<Vec<Suggestion>> {
        if !self.connectivity.is_online() {
            return Err(Error::Suggestion(
                "cannot reach the suggestion service while offline".to_string(),
            ));
        }
        let property = self.current_property().ok_or(Error::NoPropertySelected)?;
        let raw = service.generate_maintenance_tasks(&property.description)?;
        Ok(sanitize(raw))
    }

    /// Fetch personalized recommendations for the selected property.
    ///
    /// Failures are swallowed: the recommendation panel simply stays empty.
    /// A response that arrives after the property selection changed is
    /// discarded.
    pub fn fetch_recommendations(&mut self, service: &dyn SuggestionService) {
        if !self.connectivity.is_online() {
            self.recommendations.clear();
            return;
        }
        let Some(property) = self.current_property().cloned() else {
            return;
        };
        let token = self.recommendation_fetch.begin();
        let result =
            service.generate_personalized_recommendations(&property.description, &self.state.tasks);
        if !self.recommendation_fetch.accept(token) {
            tracing::debug!("discarding stale recommendation response");
            return;
        }
        match result {
            Ok(raw) => self.recommendations = sanitize(raw),
            Err(err) => {
                tracing::warn!(%err, "failed to fetch recommendations");
            }
        }
    }

    /// Remove a recommendation by task name.
    pub fn dismiss_recommendation(&mut self, task_name: &str) {
        self.recommendations.retain(|r| r.task_name != task_name);
    }

    /// Build a task draft from a recommendation, due 30 days from `today`.
    #[must_use]
    pub fn task_from_recommendation(recommendation: &Suggestion, today: NaiveDate) -> Task {
        let due_date = today
            .checked_add_days(Days::new(RECOMMENDATION_DUE_DAYS))
            .unwrap_or(today);
        let mut notes = String::new();
        if let Some(reason) = &recommendation.reason {
            notes.push_str(&format!("AI Recommendation: {reason}\n"));
        }
        notes.push_str(&format!(
            "Recommended Frequency: {}.",
            recommendation.recommended_frequency
        ));
        Task {
            id: String::new(),
            property_id: String::new(),
            name: recommendation.task_name.clone(),
            category: recommendation.category,
            priority: recommendation.priority,
            due_date,
            completed: false,
            completed_date: None,
            notes: Some(notes),
            cost: None,
            recurrence: crate::models::Recurrence::None,
            service_provider_id: None,
            tenant_id: None,
            attachments: vec![],
            generated_from_task_id: None,
        }
    }

    /// Add a batch of accepted suggestions as tasks due on `due_date`.
    ///
    /// # Errors
    ///
    /// Returns an error if no property is selected or persistence fails.
    pub fn add_suggested_tasks(
        &mut self,
        suggestions: &[Suggestion],
        due_date: NaiveDate,
    ) -> Result<usize> {
        let property_id =
            self.selected_property_id.clone().ok_or(Error::NoPropertySelected)?;
        for suggestion in suggestions {
            let mut task = Self::task_from_recommendation(suggestion, due_date);
            task.id = generate_id("task", &task.name);
            task.property_id = property_id.clone();
            task.due_date = due_date;
            self.state.tasks.push(task);
        }
        self.save_tasks()?;
        Ok(suggestions.len())
    }

    // === Connectivity ===

    /// Handle the host's online event.
    pub fn went_online(&mut self) {
        self.connectivity.went_online();
    }

    /// Handle the host's offline event. Recommendations are cleared while
    /// offline.
    pub fn went_offline(&mut self) {
        self.connectivity.went_offline();
        self.recommendations.clear();
    }

    // === Persistence ===

    fn save_tasks(&self) -> Result<()> {
        self.store.save(keys::TASKS, &self.state.tasks)
    }

    fn save_providers(&self) -> Result<()> {
        self.store.save(keys::SERVICE_PROVIDERS, &self.state.service_providers)
    }

    fn save_inventory(&self) -> Result<()> {
        self.store.save(keys::INVENTORY_ITEMS, &self.state.inventory_items)
    }

    fn save_tenants(&self) -> Result<()> {
        self.store.save(keys::TENANTS, &self.state.tenants)
    }

    fn save_users(&self) -> Result<()> {
        self.store.save(keys::USER_STORE, &self.state.user_store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Priority, Recurrence};
    use crate::store::PersistencePort;
    use crate::testing::MemoryStore;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn now() -> NaiveDateTime {
        today().and_hms_opt(10, 0, 0).unwrap()
    }

    fn logged_in_app() -> App<MemoryStore> {
        let mut app = App::load_at(MemoryStore::default(), AppConfig::default(), today());
        assert!(app.login("alex.doe@example.com", "password123"));
        app
    }

    fn draft_task(name: &str, due: NaiveDate) -> Task {
        Task {
            id: String::new(),
            property_id: String::new(),
            name: name.to_string(),
            category: Category::General,
            priority: Priority::Medium,
            due_date: due,
            completed: false,
            completed_date: None,
            notes: None,
            cost: None,
            recurrence: Recurrence::None,
            service_provider_id: None,
            tenant_id: None,
            attachments: vec![],
            generated_from_task_id: None,
        }
    }

    #[test]
    fn test_load_seeds_when_store_empty() {
        let app = App::load_at(MemoryStore::default(), AppConfig::default(), today());
        assert_eq!(app.state.tasks.len(), 7);
        assert_eq!(app.state.user_store.len(), 1);
    }

    #[test]
    fn test_load_prefers_persisted_state() {
        let store = MemoryStore::default();
        store.save(keys::TASKS, &Vec::<Task>::new()).unwrap();
        let app = App::load_at(store, AppConfig::default(), today());
        assert!(app.state.tasks.is_empty());
    }

    #[test]
    fn test_login_selects_first_property() {
        let app = logged_in_app();
        assert_eq!(app.selected_property_id.as_deref(), Some("prop-1"));
        assert_eq!(app.current_property().unwrap().name, "Main Street Home");
    }

    #[test]
    fn test_login_rejects_bad_password() {
        let mut app = App::load_at(MemoryStore::default(), AppConfig::default(), today());
        assert!(!app.login("alex.doe@example.com", "wrong"));
        assert!(app.current_user_id.is_none());
    }

    #[test]
    fn test_signup_starts_empty() {
        let mut app = App::load_at(MemoryStore::default(), AppConfig::default(), today());
        let id = app.signup("New User", "new@example.com", "pw", UserRole::Homeowner).unwrap();
        let user = app.state.user_store.get(&id).unwrap();
        assert_eq!(user.points, 0);
        assert!(user.unlocked_badges.is_empty());
        assert!(user.properties.is_empty());
        assert!(app.selected_property_id.is_none());
    }

    #[test]
    fn test_add_task_requires_selected_property() {
        let mut app = App::load_at(MemoryStore::default(), AppConfig::default(), today());
        let result = app.add_task(draft_task("Orphan", today()));
        assert!(matches!(result, Err(Error::NoPropertySelected)));
    }

    #[test]
    fn test_add_task_assigns_property_and_persists() {
        let mut app = logged_in_app();
        let id = app.add_task(draft_task("Replace filter", today())).unwrap();
        let task = app.state.tasks.iter().find(|t| t.id == id).unwrap();
        assert_eq!(task.property_id, "prop-1");
        assert!(!task.completed);

        // A reload sees the new task
        let reloaded = App::load_at(app.store.clone(), AppConfig::default(), today());
        assert!(reloaded.state.tasks.iter().any(|t| t.id == id));
    }

    #[test]
    fn test_toggle_without_login_is_noop() {
        let mut app = App::load_at(MemoryStore::default(), AppConfig::default(), today());
        let outcome = app.toggle_task_at("task-2", now()).unwrap();
        assert!(!outcome.toggled);
        assert!(!app.state.tasks.iter().any(|t| t.completed && t.id == "task-2"));
    }

    #[test]
    fn test_toggle_persists_tasks_and_user() {
        let mut app = logged_in_app();
        // task-2 is the seeded urgent task due today with Monthly recurrence
        let outcome = app.toggle_task_at("task-2", now()).unwrap();
        assert!(outcome.toggled);
        assert_eq!(outcome.points_delta, 25);
        assert!(outcome.spawned_task_id.is_some());

        let reloaded = App::load_at(app.store.clone(), AppConfig::default(), today());
        let user = reloaded.state.user_store.get("user-1").unwrap();
        assert_eq!(user.points, 25);
        assert!(reloaded.state.tasks.iter().any(|t| t.id == "task-2" && t.completed));
    }

    #[test]
    fn test_delete_provider_unassigns_tasks() {
        let mut app = logged_in_app();
        assert!(app
            .state
            .tasks
            .iter()
            .any(|t| t.service_provider_id.as_deref() == Some("sp-1")));
        app.delete_provider("sp-1").unwrap();
        assert!(!app.state.service_providers.iter().any(|p| p.id == "sp-1"));
        assert!(!app
            .state
            .tasks
            .iter()
            .any(|t| t.service_provider_id.as_deref() == Some("sp-1")));
    }

    #[test]
    fn test_delete_tenant_unassigns_tasks() {
        let mut app = logged_in_app();
        app.delete_tenant("t-1").unwrap();
        assert!(!app.state.tasks.iter().any(|t| t.tenant_id.as_deref() == Some("t-1")));
    }

    #[test]
    fn test_refresh_notifications_reports_change() {
        let mut app = logged_in_app();
        assert!(app.refresh_notifications_at(today(), now()));
        assert!(!app.notifications.is_empty());
        // Unchanged inputs short-circuit
        assert!(!app.refresh_notifications_at(today(), now()));
    }

    #[test]
    fn test_mark_all_notifications_read() {
        let mut app = logged_in_app();
        app.refresh_notifications_at(today(), now());
        app.mark_all_notifications_read();
        assert!(app.notifications.iter().all(|n| n.read));
    }

    #[test]
    fn test_task_from_recommendation() {
        let suggestion = Suggestion {
            task_name: "Flush water heater".to_string(),
            category: Category::Plumbing,
            priority: Priority::Medium,
            recommended_frequency: "Annually".to_string(),
            recommended_professional: None,
            reason: Some("Sediment builds up".to_string()),
        };
        let task = App::<MemoryStore>::task_from_recommendation(&suggestion, today());
        assert_eq!(task.due_date, today().checked_add_days(Days::new(30)).unwrap());
        let notes = task.notes.unwrap();
        assert!(notes.contains("Sediment builds up"));
        assert!(notes.contains("Annually"));
    }

    #[test]
    fn test_add_suggested_tasks_bulk() {
        let mut app = logged_in_app();
        let before = app.state.tasks.len();
        let suggestions = vec![
            Suggestion {
                task_name: "Clean dryer vent".to_string(),
                category: Category::Appliance,
                priority: Priority::Urgent,
                recommended_frequency: "Annually".to_string(),
                recommended_professional: None,
                reason: None,
            },
            Suggestion {
                task_name: "Test GFCI outlets".to_string(),
                category: Category::Electrical,
                priority: Priority::Low,
                recommended_frequency: "Monthly".to_string(),
                recommended_professional: None,
                reason: None,
            },
        ];
        let added = app.add_suggested_tasks(&suggestions, today()).unwrap();
        assert_eq!(added, 2);
        assert_eq!(app.state.tasks.len(), before + 2);
        assert!(app
            .state
            .tasks
            .iter()
            .filter(|t| t.property_id == "prop-1")
            .any(|t| t.name == "Clean dryer vent" && !t.completed));
    }

    #[test]
    fn test_offline_clears_recommendations() {
        let mut app = logged_in_app();
        app.recommendations.push(Suggestion {
            task_name: "x".to_string(),
            category: Category::General,
            priority: Priority::Low,
            recommended_frequency: "Monthly".to_string(),
            recommended_professional: None,
            reason: None,
        });
        app.went_offline();
        assert!(app.recommendations.is_empty());
    }

    #[test]
    fn test_dismiss_recommendation() {
        let mut app = logged_in_app();
        app.recommendations = vec![Suggestion {
            task_name: "Keep".to_string(),
            category: Category::General,
            priority: Priority::Low,
            recommended_frequency: "Monthly".to_string(),
            recommended_professional: None,
            reason: None,
        }];
        app.dismiss_recommendation("Keep");
        assert!(app.recommendations.is_empty());
    }

    #[test]
    fn test_toggle_dark_mode_persists() {
        let mut app = logged_in_app();
        assert!(app.toggle_dark_mode().unwrap());
        let reloaded = App::load_at(app.store.clone(), AppConfig::default(), today());
        assert!(reloaded.state.dark_mode);
    }
}
