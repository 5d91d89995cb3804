//! Task completion state machine and recurrence engine.
//!
//! Toggling completion on a non-recurring task flips the flag. On a
//! recurring task, completion additionally spawns a pending sibling due one
//! interval later, and un-completion removes that sibling again if it is
//! still pending. Every toggle applies a point delta to the user and runs a
//! badge evaluation pass over the updated task list.

use crate::badges;
use crate::id::generate_id;
use crate::models::{Task, User};
use crate::points::completion_award;
use crate::recurrence::advance;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// How the "next instance" sibling of a recurring task is located when the
/// completion that spawned it is reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiblingMatching {
    /// Match by field equality: same name, property, and recurrence, still
    /// pending, due exactly one interval after the toggled task. This is the
    /// historical behavior and can collide when two identically named
    /// recurring tasks on one property share a due date.
    #[default]
    Heuristic,
    /// Match on the `generated_from_task_id` back-reference recorded when
    /// the sibling was spawned.
    Linked,
}

/// The result of a completion toggle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ToggleOutcome {
    /// Whether a task was found and toggled. False means the ID was unknown
    /// and nothing changed.
    pub toggled: bool,
    /// Net change applied to the user's points.
    pub points_delta: i64,
    /// ID of the sibling instance spawned by completing a recurring task.
    pub spawned_task_id: Option<String>,
    /// ID of the pending sibling removed by un-completing a recurring task.
    pub removed_sibling_id: Option<String>,
    /// Badge newly unlocked by this toggle, if any (single-toast rule).
    pub newly_unlocked_badge: Option<String>,
}

/// Toggle completion state of the task with `task_id` at time `now`.
///
/// Unknown IDs are a silent no-op: callers are expected to hold a valid
/// task reference already. Points may take `user.points` negative.
pub fn toggle_completion(
    tasks: &mut Vec<Task>,
    user: &mut User,
    task_id: &str,
    now: NaiveDateTime,
    matching: SiblingMatching,
) -> ToggleOutcome {
    let Some(index) = tasks.iter().position(|t| t.id == task_id) else {
        return ToggleOutcome::default();
    };
    let snapshot = tasks[index].clone();

    // Score the toggled instance only. Reversal is computed from the
    // completion timestamp being cleared, not from now, so it subtracts
    // exactly what completion awarded.
    let points_delta = if snapshot.completed {
        -completion_award(&snapshot, snapshot.completed_date.unwrap_or(now))
    } else {
        completion_award(&snapshot, now)
    };

    let mut spawned_task_id = None;
    let mut removed_sibling_id = None;

    if snapshot.recurrence.is_repeating() && !snapshot.completed {
        tasks[index].completed = true;
        tasks[index].completed_date = Some(now);

        let mut next = snapshot.clone();
        next.id = generate_id("task", &snapshot.name);
        next.due_date = advance(snapshot.due_date, snapshot.recurrence);
        next.completed = false;
        next.completed_date = None;
        next.generated_from_task_id = Some(snapshot.id.clone());
        spawned_task_id = Some(next.id.clone());
        tasks.push(next);
    } else if snapshot.recurrence.is_repeating() && snapshot.completed {
        tasks[index].completed = false;
        tasks[index].completed_date = None;

        // Delete the generated follow-up if it is still pending. If the user
        // already completed it too, leave everything as-is.
        let sibling = match matching {
            SiblingMatching::Heuristic => {
                let expected_due = advance(snapshot.due_date, snapshot.recurrence);
                tasks.iter().position(|t| {
                    !t.completed
                        && t.name == snapshot.name
                        && t.property_id == snapshot.property_id
                        && t.recurrence == snapshot.recurrence
                        && t.due_date == expected_due
                })
            }
            SiblingMatching::Linked => tasks.iter().position(|t| {
                !t.completed && t.generated_from_task_id.as_deref() == Some(snapshot.id.as_str())
            }),
        };
        if let Some(sibling_index) = sibling {
            removed_sibling_id = Some(tasks.remove(sibling_index).id);
        }
    } else if snapshot.completed {
        tasks[index].completed = false;
        tasks[index].completed_date = None;
    } else {
        tasks[index].completed = true;
        tasks[index].completed_date = Some(now);
    }

    user.points += points_delta;

    let award = badges::evaluate(user, tasks);
    user.unlocked_badges = award.unlocked_badges;

    ToggleOutcome {
        toggled: true,
        points_delta,
        spawned_task_id,
        removed_sibling_id,
        newly_unlocked_badge: award.newly_unlocked,
    }
}

/// Remove the task with the given ID. Returns true if a task was removed.
pub fn remove_task(tasks: &mut Vec<Task>, task_id: &str) -> bool {
    let before = tasks.len();
    tasks.retain(|t| t.id != task_id);
    tasks.len() != before
}

/// Replace the task with the same ID as `updated`. Unknown IDs are a no-op.
pub fn replace_task(tasks: &mut [Task], updated: Task) {
    if let Some(slot) = tasks.iter_mut().find(|t| t.id == updated.id) {
        *slot = updated;
    }
}

/// Clear the given service provider from any task that references it.
pub fn unassign_provider(tasks: &mut [Task], provider_id: &str) {
    for task in tasks.iter_mut() {
        if task.service_provider_id.as_deref() == Some(provider_id) {
            task.service_provider_id = None;
        }
    }
}

/// Clear the given tenant from any task that references it.
pub fn unassign_tenant(tasks: &mut [Task], tenant_id: &str) {
    for task in tasks.iter_mut() {
        if task.tenant_id.as_deref() == Some(tenant_id) {
            task.tenant_id = None;
        }
    }
}
