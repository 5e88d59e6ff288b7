//! Display ordering and due-date status for tasks.
//!
//! # Invariants
//! - Incomplete tasks precede completed ones; each bucket keeps the
//!   underlying manual order.
//! - Completed tasks are never reported as overdue.

use crate::model::todo::{Checklist, Task};
use chrono::{Days, NaiveDate};

/// Tasks in the order a checklist shows them.
pub fn tasks_for_display(checklist: &Checklist) -> Vec<&Task> {
    let (completed, mut open): (Vec<&Task>, Vec<&Task>) =
        checklist.tasks.iter().partition(|task| task.completed);
    open.extend(completed);
    open
}

/// Due-date badge state relative to a reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    /// No due date set.
    None,
    Overdue,
    /// Past due date on a task that is already done.
    Past,
    Today,
    Tomorrow,
    Upcoming,
}

/// Classifies `task`'s due date against `today` (local calendar day).
pub fn due_status(task: &Task, today: NaiveDate) -> DueStatus {
    let Some(due) = task.due_date else {
        return DueStatus::None;
    };
    if due == today {
        return DueStatus::Today;
    }
    if due < today {
        return if task.completed {
            DueStatus::Past
        } else {
            DueStatus::Overdue
        };
    }
    if today.checked_add_days(Days::new(1)) == Some(due) {
        DueStatus::Tomorrow
    } else {
        DueStatus::Upcoming
    }
}

#[cfg(test)]
mod tests {
    use super::{due_status, tasks_for_display, DueStatus};
    use crate::model::todo::{Checklist, Task};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn display_order_puts_open_tasks_first_preserving_manual_order() {
        let mut checklist = Checklist::new("folder", "list");
        for (title, completed) in [("a", true), ("b", false), ("c", true), ("d", false)] {
            let mut task = Task::new(title, None);
            task.completed = completed;
            checklist.tasks.push(task);
        }
        let titles = tasks_for_display(&checklist)
            .into_iter()
            .map(|task| task.title.as_str())
            .collect::<Vec<_>>();
        assert_eq!(titles, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn due_status_classifies_relative_to_today() {
        let today = day(15);
        let mut task = Task::new("pay rent", None);
        assert_eq!(due_status(&task, today), DueStatus::None);

        task.due_date = Some(day(14));
        assert_eq!(due_status(&task, today), DueStatus::Overdue);
        task.due_date = Some(day(15));
        assert_eq!(due_status(&task, today), DueStatus::Today);
        task.due_date = Some(day(16));
        assert_eq!(due_status(&task, today), DueStatus::Tomorrow);
        task.due_date = Some(day(20));
        assert_eq!(due_status(&task, today), DueStatus::Upcoming);
    }

    #[test]
    fn completed_past_due_task_is_not_overdue() {
        let mut task = Task::new("filed taxes", Some(day(1)));
        task.completed = true;
        assert_eq!(due_status(&task, day(15)), DueStatus::Past);
    }
}
