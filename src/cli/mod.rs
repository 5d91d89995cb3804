//! Hierarchical CLI for homely.
//!
//! This module provides the command-line interface with two-level commands
//! for managing maintenance tasks, notifications, and gamification status.

mod notify;
mod run;
mod task;


pub use notify::NotifyCommand;
pub use run::{run, CliOutput};
pub use task::TaskCommand;

use clap::{Parser, Subcommand};

/// Homely CLI - home maintenance task tracking.
///
/// For detailed help on any command group, use:
///   homely <command> --help
#[derive(Parser, Debug)]
#[command(name = "homely")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Task management - create, list, complete, and delete maintenance
    /// tasks.
    ///
    /// Completing a task awards points and, for recurring tasks, schedules
    /// the next occurrence. Completing it again reverses both.
    #[command(subcommand)]
    Task(TaskCommand),

    /// Notification management - view and acknowledge reminders.
    ///
    /// Notifications are derived from task due dates and inventory warranty
    /// expiries; they are recomputed on every invocation.
    #[command(subcommand)]
    Notify(NotifyCommand),

    /// Show badge progress for the active user.
    Badges,

    /// Show a summary: points, task counts, and unread notifications.
    Status,

    /// Show version information.
    Version,
}
