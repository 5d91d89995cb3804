//! In-memory application state and property-scoped projections.
//!
//! All persisted slices live together in [`AppState`]; engine operations
//! take and return this state explicitly rather than touching storage. The
//! selected property is a transient filter held by the app layer, not part
//! of the persisted state.

use crate::models::{
    Attachment, Category, InventoryCategory, InventoryItem, Priority, Property, Recurrence,
    ServiceProvider, Task, Tenant, User, UserRole,
};
use chrono::{Days, NaiveDate};
use std::collections::HashMap;

/// All persisted application state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// All tasks across all properties.
    pub tasks: Vec<Task>,
    /// Service providers (not property-scoped).
    pub service_providers: Vec<ServiceProvider>,
    /// Inventory items across all properties.
    pub inventory_items: Vec<InventoryItem>,
    /// Tenants across all properties.
    pub tenants: Vec<Tenant>,
    /// Registered users, keyed by ID.
    pub user_store: HashMap<String, User>,
    /// Dark-mode UI flag.
    pub dark_mode: bool,
}

impl AppState {
    /// Tasks belonging to the given property.
    #[must_use]
    pub fn tasks_for(&self, property_id: &str) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.property_id == property_id).collect()
    }

    /// Inventory items belonging to the given property.
    #[must_use]
    pub fn inventory_for(&self, property_id: &str) -> Vec<&InventoryItem> {
        self.inventory_items.iter().filter(|i| i.property_id == property_id).collect()
    }

    /// Tenants living at the given property.
    #[must_use]
    pub fn tenants_for(&self, property_id: &str) -> Vec<&Tenant> {
        self.tenants.iter().filter(|t| t.property_id == property_id).collect()
    }

    /// Find a user by email, matched case-insensitively.
    #[must_use]
    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.user_store.values().find(|u| u.email.eq_ignore_ascii_case(email))
    }
}

/// The demo user seeded when no user store exists yet.
#[must_use]
pub fn seed_user() -> User {
    User {
        id: "user-1".to_string(),
        name: "Alex Doe".to_string(),
        email: "alex.doe@example.com".to_string(),
        password: "password123".to_string(),
        role: UserRole::PropertyManager,
        properties: vec![
            Property {
                id: "prop-1".to_string(),
                name: "Main Street Home".to_string(),
                address: "123 Main St, Anytown, USA".to_string(),
                description: "A 3-bedroom, 2-bathroom house in a temperate climate with a \
                              small yard. Located in a suburban area."
                    .to_string(),
            },
            Property {
                id: "prop-2".to_string(),
                name: "Lakeside Cabin".to_string(),
                address: "456 Lake Rd, Lakeside, USA".to_string(),
                description: "A 2-bedroom rustic cabin with a wooden deck, located in a \
                              coastal region with heavy snowfall in winter."
                    .to_string(),
            },
        ],
        points: 0,
        unlocked_badges: vec![],
    }
}

fn offset(today: NaiveDate, days: i64) -> NaiveDate {
    let days_abs = days.unsigned_abs();
    let shifted = if days >= 0 {
        today.checked_add_days(Days::new(days_abs))
    } else {
        today.checked_sub_days(Days::new(days_abs))
    };
    shifted.unwrap_or(today)
}

/// Seed tasks, with due dates relative to `today`.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn seed_tasks(today: NaiveDate) -> Vec<Task> {
    let blank = |id: &str, property_id: &str, name: &str| Task {
        id: id.to_string(),
        property_id: property_id.to_string(),
        name: name.to_string(),
        category: Category::General,
        priority: Priority::Medium,
        due_date: today,
        completed: false,
        completed_date: None,
        notes: None,
        cost: None,
        recurrence: Recurrence::None,
        service_provider_id: None,
        tenant_id: None,
        attachments: vec![],
        generated_from_task_id: None,
    };

    let mut gutters = blank("task-1", "prop-1", "Clean Gutters");
    gutters.category = Category::Seasonal;
    gutters.due_date = offset(today, 3);
    gutters.notes = Some("Remove leaves and debris from all gutters and downspouts.".to_string());
    gutters.recurrence = Recurrence::Yearly;

    let mut detectors = blank("task-2", "prop-1", "Test Smoke Detectors");
    detectors.category = Category::Electrical;
    detectors.priority = Priority::Urgent;
    detectors.notes =
        Some("Check batteries and functionality of all smoke and CO detectors.".to_string());
    detectors.recurrence = Recurrence::Monthly;
    detectors.service_provider_id = Some("sp-2".to_string());
    detectors.tenant_id = Some("t-1".to_string());

    let mut hvac = blank("task-3", "prop-1", "Service HVAC System");
    hvac.category = Category::Hvac;
    hvac.due_date = offset(today, 14);
    hvac.recurrence = Recurrence::Yearly;
    hvac.service_provider_id = Some("sp-3".to_string());
    hvac.attachments = vec![Attachment {
        id: "att-3".to_string(),
        file_name: "hvac-service-quote.pdf".to_string(),
        file_type: "application/pdf".to_string(),
        url: "#".to_string(),
    }];

    let mut kitchen = blank("task-4", "prop-2", "Deep Clean Kitchen");
    kitchen.category = Category::Cleaning;
    kitchen.priority = Priority::Low;
    kitchen.due_date = offset(today, -2);
    kitchen.notes = Some("Clean inside of oven, microwave, and refrigerator.".to_string());

    let mut leaks = blank("task-5", "prop-2", "Check for Leaks");
    leaks.category = Category::Plumbing;
    leaks.priority = Priority::Urgent;
    leaks.due_date = offset(today, -5);
    leaks.notes =
        Some("Inspect under sinks and around toilets for any signs of water damage.".to_string());
    leaks.service_provider_id = Some("sp-1".to_string());
    leaks.tenant_id = Some("t-3".to_string());

    let mut driveway = blank("task-6", "prop-1", "Power Wash Driveway");
    driveway.category = Category::Seasonal;
    driveway.priority = Priority::Low;
    driveway.due_date = offset(today, 30);
    driveway.completed = true;
    driveway.completed_date = offset(today, -7).and_hms_opt(12, 0, 0);

    let mut pipes = blank("task-7", "prop-2", "Winterize Pipes");
    pipes.category = Category::Plumbing;
    pipes.due_date = offset(today, 60);
    pipes.notes = Some("For the Lakeside Cabin before winter.".to_string());
    pipes.service_provider_id = Some("sp-1".to_string());

    vec![gutters, detectors, hvac, kitchen, leaks, driveway, pipes]
}

/// Seed service providers.
#[must_use]
pub fn seed_providers() -> Vec<ServiceProvider> {
    vec![
        ServiceProvider {
            id: "sp-1".to_string(),
            name: "A+ Plumbing".to_string(),
            specialty: Category::Plumbing,
            contact_person: None,
            phone: "555-123-4567".to_string(),
            email: Some("contact@aplusplumbing.com".to_string()),
        },
        ServiceProvider {
            id: "sp-2".to_string(),
            name: "Electric Eagles".to_string(),
            specialty: Category::Electrical,
            contact_person: Some("Jane Smith".to_string()),
            phone: "555-765-4321".to_string(),
            email: None,
        },
        ServiceProvider {
            id: "sp-3".to_string(),
            name: "CoolBreeze HVAC".to_string(),
            specialty: Category::Hvac,
            contact_person: None,
            phone: "555-987-6543".to_string(),
            email: Some("service@coolbreeze.com".to_string()),
        },
    ]
}

/// Seed inventory items.
#[must_use]
pub fn seed_inventory() -> Vec<InventoryItem> {
    let blank = |id: &str, property_id: &str, name: &str| InventoryItem {
        id: id.to_string(),
        property_id: property_id.to_string(),
        name: name.to_string(),
        category: InventoryCategory::Other,
        purchase_date: None,
        warranty_expiry_date: None,
        price: None,
        model_number: None,
        serial_number: None,
        notes: None,
        attachments: vec![],
    };

    let mut fridge = blank("inv-1", "prop-1", "LG Refrigerator LFXS26973S");
    fridge.category = InventoryCategory::Appliance;
    fridge.purchase_date = NaiveDate::from_ymd_opt(2022, 8, 15);
    fridge.price = Some(1800.0);
    fridge.warranty_expiry_date = NaiveDate::from_ymd_opt(2024, 8, 15);
    fridge.model_number = Some("LFXS26973S".to_string());
    fridge.serial_number = Some("LG12345ABC".to_string());
    fridge.attachments = vec![
        Attachment {
            id: "att-1".to_string(),
            file_name: "fridge-receipt.pdf".to_string(),
            file_type: "application/pdf".to_string(),
            url: "#".to_string(),
        },
        Attachment {
            id: "att-2".to_string(),
            file_name: "user-manual.pdf".to_string(),
            file_type: "application/pdf".to_string(),
            url: "#".to_string(),
        },
    ];

    let mut drill = blank("inv-2", "prop-1", "DeWalt 20V MAX Cordless Drill");
    drill.category = InventoryCategory::Tools;
    drill.purchase_date = NaiveDate::from_ymd_opt(2021, 5, 20);
    drill.price = Some(150.0);

    let mut paint = blank("inv-3", "prop-2", "Sherwin-Williams Interior Paint");
    paint.category = InventoryCategory::Paint;
    paint.notes = Some(
        "Color: Agreeable Gray (SW 7029), Finish: Eggshell. Used in living room.".to_string(),
    );

    vec![fridge, drill, paint]
}

/// Seed tenants.
#[must_use]
pub fn seed_tenants() -> Vec<Tenant> {
    vec![
        Tenant {
            id: "t-1".to_string(),
            property_id: "prop-1".to_string(),
            name: "John Smith".to_string(),
            email: "john.s@example.com".to_string(),
            phone: "555-111-2222".to_string(),
            move_in_date: NaiveDate::from_ymd_opt(2023, 1, 15),
        },
        Tenant {
            id: "t-2".to_string(),
            property_id: "prop-1".to_string(),
            name: "Sarah Connor".to_string(),
            email: "sarah.c@example.com".to_string(),
            phone: "555-333-4444".to_string(),
            move_in_date: None,
        },
        Tenant {
            id: "t-3".to_string(),
            property_id: "prop-2".to_string(),
            name: "Kyle Reese".to_string(),
            email: "kyle.r@example.com".to_string(),
            phone: "555-555-6666".to_string(),
            move_in_date: NaiveDate::from_ymd_opt(2024, 3, 1),
        },
    ]
}

/// A full seed state with the demo user registered.
#[must_use]
pub fn seed_state(today: NaiveDate) -> AppState {
    let user = seed_user();
    let mut user_store = HashMap::new();
    user_store.insert(user.id.clone(), user);
    AppState {
        tasks: seed_tasks(today),
        service_providers: seed_providers(),
        inventory_items: seed_inventory(),
        tenants: seed_tenants(),
        user_store,
        dark_mode: false,
    }
}
