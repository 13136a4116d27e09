//! Reminder aggregation: a stateless view over the plant list, computed
//! through the schedule engine on every query.

use crate::model::Plant;
use crate::schedule::{classify_tasks, days_until, partition_tasks, Task};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeSet;

/// Plants due within this many days are flagged as "soon".
pub const DEFAULT_SOON_DAYS: i64 = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReminderBoard {
    pub overdue: Vec<Task>,
    pub upcoming: Vec<Task>,
}

impl ReminderBoard {
    pub fn build(plants: &[Plant], now: DateTime<Utc>) -> Self {
        let (overdue, upcoming) = partition_tasks(classify_tasks(plants, now));
        Self { overdue, upcoming }
    }

    pub fn is_empty(&self) -> bool {
        self.overdue.is_empty() && self.upcoming.is_empty()
    }

    pub fn len(&self) -> usize {
        self.overdue.len() + self.upcoming.len()
    }

    /// Distinct calendar days (UTC) that carry at least one task.
    pub fn task_dates(&self) -> BTreeSet<NaiveDate> {
        self.overdue
            .iter()
            .chain(self.upcoming.iter())
            .map(Task::due_day)
            .collect()
    }
}

/// How urgently a single plant needs water.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WateringStatus {
    Due,
    Soon,
    Ok,
    Unknown,
}

pub fn watering_status(plant: &Plant, now: DateTime<Utc>, soon_days: i64) -> WateringStatus {
    match plant.next_watering {
        None => WateringStatus::Unknown,
        Some(due) => {
            let days = days_until(due, now);
            if days <= 0 {
                WateringStatus::Due
            } else if days <= soon_days {
                WateringStatus::Soon
            } else {
                WateringStatus::Ok
            }
        }
    }
}

/// Number of plants whose watering is due at `now`, or `None` when there are
/// none. Drives the "time to care for your plants" notice.
pub fn watering_alert(plants: &[Plant], now: DateTime<Utc>) -> Option<usize> {
    let count = plants
        .iter()
        .filter(|p| p.next_watering.is_some_and(|due| due <= now))
        .count();
    (count > 0).then_some(count)
}
