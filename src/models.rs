//! Domain model types for the maintenance tracker.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Task priority levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Priority {
    /// Urgent priority - needs attention now.
    Urgent,
    /// Medium priority (default).
    #[default]
    Medium,
    /// Low priority.
    Low,
}

impl Priority {
    /// Parse a priority from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid priority.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, InvalidPriority> {
        match s {
            "Urgent" => Ok(Self::Urgent),
            "Medium" => Ok(Self::Medium),
            "Low" => Ok(Self::Low),
            _ => Err(InvalidPriority(s.to_string())),
        }
    }

    /// Get the string representation of the priority.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Urgent => "Urgent",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid priority string is provided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPriority(pub String);

impl std::fmt::Display for InvalidPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid priority: '{}' (must be one of: Urgent, Medium, Low)", self.0)
    }
}

impl std::error::Error for InvalidPriority {}

/// Task and service-provider category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Category {
    /// Plumbing work.
    Plumbing,
    /// Electrical work.
    Electrical,
    /// Heating, ventilation, and air conditioning.
    #[serde(rename = "HVAC")]
    Hvac,
    /// Cleaning chores.
    Cleaning,
    /// Appliance upkeep.
    Appliance,
    /// Seasonal maintenance.
    Seasonal,
    /// General maintenance (default).
    #[default]
    General,
}

impl Category {
    /// Parse a category from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid category.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, InvalidCategory> {
        match s {
            "Plumbing" => Ok(Self::Plumbing),
            "Electrical" => Ok(Self::Electrical),
            "HVAC" => Ok(Self::Hvac),
            "Cleaning" => Ok(Self::Cleaning),
            "Appliance" => Ok(Self::Appliance),
            "Seasonal" => Ok(Self::Seasonal),
            "General" => Ok(Self::General),
            _ => Err(InvalidCategory(s.to_string())),
        }
    }

    /// Get the string representation of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Plumbing => "Plumbing",
            Self::Electrical => "Electrical",
            Self::Hvac => "HVAC",
            Self::Cleaning => "Cleaning",
            Self::Appliance => "Appliance",
            Self::Seasonal => "Seasonal",
            Self::General => "General",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid category string is provided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidCategory(pub String);

impl std::fmt::Display for InvalidCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid category: '{}'", self.0)
    }
}

impl std::error::Error for InvalidCategory {}

/// How often a task repeats.
///
/// Anything other than `None` turns completion into instance generation:
/// completing the task spawns a pending sibling due one interval later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Recurrence {
    /// One-off task (default).
    #[default]
    None,
    /// Every day.
    Daily,
    /// Every week.
    Weekly,
    /// Every calendar month.
    Monthly,
    /// Every three calendar months.
    Seasonal,
    /// Every calendar year.
    Yearly,
}

impl Recurrence {
    /// Parse a recurrence rule from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid recurrence rule.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, InvalidRecurrence> {
        match s {
            "None" => Ok(Self::None),
            "Daily" => Ok(Self::Daily),
            "Weekly" => Ok(Self::Weekly),
            "Monthly" => Ok(Self::Monthly),
            "Seasonal" => Ok(Self::Seasonal),
            "Yearly" => Ok(Self::Yearly),
            _ => Err(InvalidRecurrence(s.to_string())),
        }
    }

    /// Get the string representation of the recurrence rule.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Seasonal => "Seasonal",
            Self::Yearly => "Yearly",
        }
    }

    /// Whether this rule generates a follow-up instance on completion.
    #[must_use]
    pub const fn is_repeating(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl std::fmt::Display for Recurrence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid recurrence string is provided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidRecurrence(pub String);

impl std::fmt::Display for InvalidRecurrence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid recurrence: '{}' (must be one of: None, Daily, Weekly, Monthly, Seasonal, Yearly)",
            self.0
        )
    }
}

impl std::error::Error for InvalidRecurrence {}

/// A file attached to a task or inventory item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Unique identifier.
    pub id: String,
    /// Original file name.
    #[serde(rename = "fileName")]
    pub file_name: String,
    /// MIME type of the file.
    #[serde(rename = "fileType")]
    pub file_type: String,
    /// URL where the file can be retrieved.
    pub url: String,
}

/// A maintenance task for a property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier.
    pub id: String,
    /// ID of the property this task belongs to.
    #[serde(rename = "propertyId")]
    pub property_id: String,
    /// Short task name.
    pub name: String,
    /// Task category.
    pub category: Category,
    /// Priority level.
    pub priority: Priority,
    /// Calendar date the task is due (no time component).
    #[serde(rename = "dueDate")]
    pub due_date: NaiveDate,
    /// Whether the task has been completed.
    pub completed: bool,
    /// Timestamp of completion. Present iff `completed` is true.
    #[serde(rename = "completedDate", default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<NaiveDateTime>,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Cost of the task, if known. Non-negative.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    /// Recurrence rule.
    #[serde(default)]
    pub recurrence: Recurrence,
    /// Assigned service provider, if any.
    #[serde(rename = "serviceProviderId", default, skip_serializing_if = "Option::is_none")]
    pub service_provider_id: Option<String>,
    /// Assigned tenant, if any.
    #[serde(rename = "tenantId", default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    /// Attached files.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    /// ID of the completed instance that spawned this one, for recurring
    /// tasks. Enables exact sibling matching on un-completion.
    #[serde(rename = "generatedFromTaskId", default, skip_serializing_if = "Option::is_none")]
    pub generated_from_task_id: Option<String>,
}

impl Task {
    /// End of the due day, the cutoff for on-time completion.
    #[must_use]
    pub fn due_end_of_day(&self) -> NaiveDateTime {
        // 23:59:59 always exists for a valid date
        self.due_date
            .and_hms_opt(23, 59, 59)
            .unwrap_or_else(|| self.due_date.and_time(chrono::NaiveTime::MIN))
    }

    /// Whether a completion at `at` counts as on time.
    #[must_use]
    pub fn is_on_time(&self, at: NaiveDateTime) -> bool {
        at <= self.due_end_of_day()
    }

    /// Check the completion invariant: `completed` iff `completed_date` set.
    #[must_use]
    pub const fn completion_consistent(&self) -> bool {
        self.completed == self.completed_date.is_some()
    }
}

/// A user's role in the household.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UserRole {
    /// Owner-occupier (default).
    #[default]
    Homeowner,
    /// Renting tenant.
    Tenant,
    /// Manages properties for others.
    #[serde(rename = "Property Manager")]
    PropertyManager,
}

/// A physical home or unit; the top-level scoping unit for tasks,
/// tenants, and inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Free-form description, used as input to AI suggestions.
    #[serde(default)]
    pub description: String,
}

/// An account holder. Mutated by point/badge awarding and property
/// management; never deleted in-session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address (login key, matched case-insensitively).
    pub email: String,
    /// Stored password. This is demo plumbing, not a security model.
    #[serde(default)]
    pub password: String,
    /// Role in the household.
    #[serde(default)]
    pub role: UserRole,
    /// Properties owned/managed by this user.
    #[serde(default)]
    pub properties: Vec<Property>,
    /// Gamification points. May go negative transiently.
    #[serde(default)]
    pub points: i64,
    /// IDs of unlocked badges. Grows monotonically.
    #[serde(rename = "unlockedBadges", default)]
    pub unlocked_badges: Vec<String>,
}

impl User {
    /// Look up a property by ID.
    #[must_use]
    pub fn property(&self, property_id: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.id == property_id)
    }
}

/// A static achievement catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// What the badge rewards.
    pub description: String,
    /// Icon tag for the UI layer.
    pub icon: String,
}

/// Inventory item category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InventoryCategory {
    /// Household appliance.
    Appliance,
    /// Tools.
    Tools,
    /// Paint and finishes.
    Paint,
    /// Fixtures and fittings.
    Fixtures,
    /// Anything else (default).
    #[default]
    Other,
}

/// A tracked household item, optionally under warranty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Unique identifier.
    pub id: String,
    /// ID of the property this item belongs to.
    #[serde(rename = "propertyId")]
    pub property_id: String,
    /// Display name.
    pub name: String,
    /// Item category.
    #[serde(default)]
    pub category: InventoryCategory,
    /// Date of purchase.
    #[serde(rename = "purchaseDate", default, skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<NaiveDate>,
    /// Date the warranty runs out, if covered.
    #[serde(rename = "warrantyExpiryDate", default, skip_serializing_if = "Option::is_none")]
    pub warranty_expiry_date: Option<NaiveDate>,
    /// Purchase price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Manufacturer model number.
    #[serde(rename = "modelNumber", default, skip_serializing_if = "Option::is_none")]
    pub model_number: Option<String>,
    /// Serial number.
    #[serde(rename = "serialNumber", default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Attached files (receipts, manuals).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

/// A tenant living at a property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    /// Unique identifier.
    pub id: String,
    /// ID of the property this tenant lives at.
    #[serde(rename = "propertyId")]
    pub property_id: String,
    /// Display name.
    pub name: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Phone number.
    #[serde(default)]
    pub phone: String,
    /// Move-in date, if recorded.
    #[serde(rename = "moveInDate", default, skip_serializing_if = "Option::is_none")]
    pub move_in_date: Option<NaiveDate>,
}

/// A tradesperson or company that can be assigned to tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceProvider {
    /// Unique identifier.
    pub id: String,
    /// Business name.
    pub name: String,
    /// Trade specialty.
    pub specialty: Category,
    /// Named contact, if any.
    #[serde(rename = "contactPerson", default, skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    /// Phone number.
    #[serde(default)]
    pub phone: String,
    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
