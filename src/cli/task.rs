//! Task CLI subcommands.
//!
//! Provides commands for managing maintenance tasks: create, list, toggle
//! completion, and delete.

use clap::Subcommand;

/// Task management commands.
///
/// Each task belongs to a property and has:
/// - A name and optional notes
/// - A category (Plumbing, Electrical, HVAC, Cleaning, Appliance,
///   Seasonal, General)
/// - A priority (Urgent, Medium, Low)
/// - A due date and an optional recurrence rule
///
/// ## Quick Start
///
/// ```bash
/// # Create a task
/// homely task add --name "Clean gutters" --due 2026-10-01 --recurrence Yearly
///
/// # See what's pending
/// homely task list --pending
///
/// # Mark it done (awards points; recurring tasks get a next occurrence)
/// homely task complete <id>
/// ```
#[derive(Subcommand, Debug, Clone)]
pub enum TaskCommand {
    /// Create a new task for the active property.
    Add {
        /// Task name (required)
        #[arg(short, long)]
        name: String,

        /// Due date, YYYY-MM-DD (required)
        #[arg(short, long)]
        due: String,

        /// Category: Plumbing, Electrical, HVAC, Cleaning, Appliance,
        /// Seasonal, General
        #[arg(short, long, default_value = "General")]
        category: String,

        /// Priority: Urgent, Medium, Low
        #[arg(short, long, default_value = "Medium")]
        priority: String,

        /// Recurrence: None, Daily, Weekly, Monthly, Seasonal, Yearly
        #[arg(short, long, default_value = "None")]
        recurrence: String,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,

        /// Property ID (defaults to the user's first property)
        #[arg(long)]
        property: Option<String>,
    },

    /// List tasks with optional filters.
    ///
    /// Without filters, lists tasks for the active property. Use --all to
    /// list tasks across every property.
    List {
        /// Filter by property ID
        #[arg(long)]
        property: Option<String>,

        /// List tasks across all properties
        #[arg(short, long)]
        all: bool,

        /// Only pending tasks
        #[arg(long, conflicts_with = "completed")]
        pending: bool,

        /// Only completed tasks
        #[arg(long)]
        completed: bool,
    },

    /// Toggle completion on a task.
    ///
    /// Completing awards points and spawns the next occurrence of a
    /// recurring task. Running it again on a completed task reverses the
    /// points and removes the pending next occurrence.
    Complete {
        /// Task ID
        id: String,
    },

    /// Delete a task.
    Delete {
        /// Task ID
        id: String,
    },
}
