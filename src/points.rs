//! Completion scoring rules.
//!
//! Completing a task earns a base award plus bonuses for finishing on time
//! and for priority. Un-completing subtracts exactly what completion earned,
//! scored against the completion timestamp being cleared rather than the
//! current time, so the reversal is symmetric.

use crate::models::{Priority, Task};
use chrono::NaiveDateTime;

/// Base points for completing any task.
const BASE_POINTS: i64 = 10;

/// Bonus for completing on or before the due date's end of day.
const ON_TIME_BONUS: i64 = 5;

/// Bonus for urgent-priority tasks.
const URGENT_BONUS: i64 = 10;

/// Bonus for medium-priority tasks.
const MEDIUM_BONUS: i64 = 5;

/// Points awarded for completing `task` at `at`.
#[must_use]
pub fn completion_award(task: &Task, at: NaiveDateTime) -> i64 {
    let mut points = BASE_POINTS;
    if task.is_on_time(at) {
        points += ON_TIME_BONUS;
    }
    points += match task.priority {
        Priority::Urgent => URGENT_BONUS,
        Priority::Medium => MEDIUM_BONUS,
        Priority::Low => 0,
    };
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Recurrence};
    use chrono::NaiveDate;

    fn task_with(priority: Priority) -> Task {
        Task {
            id: "task-0001".to_string(),
            property_id: "prop-1".to_string(),
            name: "Test Smoke Detectors".to_string(),
            category: Category::Electrical,
            priority,
            due_date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
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

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn test_urgent_on_time_is_25() {
        assert_eq!(completion_award(&task_with(Priority::Urgent), at(2024, 6, 15)), 25);
    }

    #[test]
    fn test_medium_on_time_is_20() {
        assert_eq!(completion_award(&task_with(Priority::Medium), at(2024, 6, 14)), 20);
    }

    #[test]
    fn test_low_on_time_is_15() {
        assert_eq!(completion_award(&task_with(Priority::Low), at(2024, 6, 15)), 15);
    }

    #[test]
    fn test_late_loses_on_time_bonus() {
        assert_eq!(completion_award(&task_with(Priority::Urgent), at(2024, 6, 16)), 20);
        assert_eq!(completion_award(&task_with(Priority::Low), at(2024, 7, 1)), 10);
    }

    #[test]
    fn test_end_of_due_day_still_on_time() {
        let last_second =
            NaiveDate::from_ymd_opt(2024, 6, 15).unwrap().and_hms_opt(23, 59, 59).unwrap();
        assert_eq!(completion_award(&task_with(Priority::Low), last_second), 15);
    }
}
