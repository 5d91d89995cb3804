//! Badge catalog and award evaluation.
//!
//! Badges are one-time achievements: once an ID is in the user's
//! `unlocked_badges` it is never re-evaluated or removed. Criteria are pure
//! functions over the user and the full task list.

use crate::models::{Badge, Task, User};
use once_cell::sync::Lazy;

/// Tasks completed on or before their due date required for badge-2.
const ON_TIME_THRESHOLD: usize = 5;

/// Completed tasks required for badge-3.
const TASK_MASTER_THRESHOLD: usize = 15;

/// Points required for badge-4.
const CHAMPION_POINTS: i64 = 500;

/// The static badge catalog, in evaluation order.
pub static ALL_BADGES: Lazy<Vec<Badge>> = Lazy::new(|| {
    vec![
        Badge {
            id: "badge-1".to_string(),
            name: "First Task Complete".to_string(),
            description: "You completed your very first task. Keep it up!".to_string(),
            icon: "Sparkles".to_string(),
        },
        Badge {
            id: "badge-2".to_string(),
            name: "On-Time Pro".to_string(),
            description: "Complete 5 tasks on or before their due date.".to_string(),
            icon: "CalendarDays".to_string(),
        },
        Badge {
            id: "badge-3".to_string(),
            name: "Task Master".to_string(),
            description: "Complete 15 tasks.".to_string(),
            icon: "CheckBadge".to_string(),
        },
        Badge {
            id: "badge-4".to_string(),
            name: "Maintenance Champion".to_string(),
            description: "Reach 500 points.".to_string(),
            icon: "Trophy".to_string(),
        },
    ]
});

/// Look up a badge in the catalog by ID.
#[must_use]
pub fn badge_by_id(id: &str) -> Option<&'static Badge> {
    ALL_BADGES.iter().find(|b| b.id == id)
}

/// Outcome of a badge evaluation pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AwardResult {
    /// The user's badge set after the pass.
    pub unlocked_badges: Vec<String>,
    /// The last newly qualifying badge in catalog order, surfaced for a
    /// one-shot toast. When several badges unlock in one pass, all land in
    /// `unlocked_badges` but only this one is reported.
    pub newly_unlocked: Option<String>,
}

/// Evaluate badge criteria against the user's points and the full task list.
///
/// Already-unlocked badges are skipped; the set only grows.
#[must_use]
pub fn evaluate(user: &User, all_tasks: &[Task]) -> AwardResult {
    let mut unlocked = user.unlocked_badges.clone();
    let mut newly_unlocked = None;

    let completed: Vec<&Task> = all_tasks.iter().filter(|t| t.completed).collect();

    for badge in ALL_BADGES.iter() {
        if user.unlocked_badges.iter().any(|id| id == &badge.id) {
            continue;
        }

        let criteria_met = match badge.id.as_str() {
            "badge-1" => !completed.is_empty(),
            "badge-2" => {
                let on_time = completed
                    .iter()
                    .filter(|t| t.completed_date.is_some_and(|at| t.is_on_time(at)))
                    .count();
                on_time >= ON_TIME_THRESHOLD
            }
            "badge-3" => completed.len() >= TASK_MASTER_THRESHOLD,
            "badge-4" => user.points >= CHAMPION_POINTS,
            _ => false,
        };

        if criteria_met {
            unlocked.push(badge.id.clone());
            newly_unlocked = Some(badge.id.clone());
        }
    }

    AwardResult { unlocked_badges: unlocked, newly_unlocked }
}
