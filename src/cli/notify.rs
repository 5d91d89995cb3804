//! Notification CLI subcommands.

use clap::Subcommand;

/// Notification commands.
///
/// Notifications are derived from the current task and inventory state:
/// tasks due within three days or overdue, and warranties at the active
/// property expiring within thirty days.
#[derive(Subcommand, Debug, Clone)]
pub enum NotifyCommand {
    /// List current notifications.
    List,

    /// Recompute notifications and report how many there are.
    Refresh,

    /// Mark every notification as read.
    #[command(name = "mark-read")]
    MarkRead,
}
