//! Due-date advancement for recurring tasks.

use crate::models::Recurrence;
use chrono::{Days, Months, NaiveDate};

/// Advance a due date by one recurrence interval.
///
/// Daily adds 1 day, Weekly 7 days, Monthly 1 calendar month, Seasonal 3
/// calendar months, Yearly 1 calendar year. Month/year arithmetic follows
/// chrono's overflow handling (Jan 31 + 1 month clamps to the end of
/// February). A `None` rule returns the date unchanged.
#[must_use]
pub fn advance(due_date: NaiveDate, rule: Recurrence) -> NaiveDate {
    let next = match rule {
        Recurrence::None => Some(due_date),
        Recurrence::Daily => due_date.checked_add_days(Days::new(1)),
        Recurrence::Weekly => due_date.checked_add_days(Days::new(7)),
        Recurrence::Monthly => due_date.checked_add_months(Months::new(1)),
        Recurrence::Seasonal => due_date.checked_add_months(Months::new(3)),
        Recurrence::Yearly => due_date.checked_add_months(Months::new(12)),
    };
    // Overflow is only possible at the far edge of the calendar range
    next.unwrap_or(due_date)
}
