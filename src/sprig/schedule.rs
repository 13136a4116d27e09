//! # Care-Schedule Engine
//!
//! Pure functions that decide when a plant next needs care and how a care
//! action changes a plant record. Nothing here touches storage or the clock:
//! callers pass `now` explicitly, which keeps every function deterministic.
//!
//! ## Schedule rules
//!
//! - `nextWatering = lastWatered + wateringFrequency days`, and the same for
//!   fertilizing.
//! - Repotting only records `lastRepotted`. No `nextRepotting` is ever
//!   computed even though `repottingFrequency` is stored; this mirrors how the
//!   data has always been written and is kept on purpose.
//! - Every action appends exactly one history item. The input plant is never
//!   mutated; [`apply_action`] returns the replacement record.

use crate::error::{Result, SprigError};
use crate::model::{CareAction, CareHistoryItem, Plant, PlantId};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

const NANOS_PER_DAY: i64 = 86_400_000_000_000;
const MILLIS_PER_DAY: i64 = 86_400_000;

/// A plant record after a care action, together with the history item that
/// was appended to it.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedCare {
    pub plant: Plant,
    pub entry: CareHistoryItem,
}

/// The kind of recurring task that shows up in reminders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Water,
    Fertilize,
}

impl TaskKind {
    pub fn action(&self) -> CareAction {
        match self {
            TaskKind::Water => CareAction::Water,
            TaskKind::Fertilize => CareAction::Fertilize,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub plant_id: PlantId,
    pub plant_name: String,
    pub kind: TaskKind,
    pub due_date: DateTime<Utc>,
    pub overdue: bool,
    pub days_until: i64,
}

impl Task {
    pub fn due_day(&self) -> NaiveDate {
        self.due_date.date_naive()
    }
}

/// Returns `last + frequency_days` whole days.
pub fn compute_next_due(last: DateTime<Utc>, frequency_days: u32) -> Result<DateTime<Utc>> {
    if frequency_days == 0 {
        return Err(SprigError::InvalidFrequency(frequency_days));
    }
    Ok(last + Duration::days(i64::from(frequency_days)))
}

/// Whole days from `now` until `due`, rounded up. Zero or negative means the
/// task is due or overdue.
pub fn days_until(due: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let gap = due - now;
    // Any positive gap, however small, counts as at least one day. Gaps too
    // wide for i64 nanoseconds fall back to milliseconds.
    match gap.num_nanoseconds() {
        Some(nanos) => ceil_div(nanos, NANOS_PER_DAY),
        None => ceil_div(gap.num_milliseconds(), MILLIS_PER_DAY),
    }
}

// Integer division truncates toward zero, which is already the ceiling for
// negative values.
fn ceil_div(value: i64, unit: i64) -> i64 {
    let whole = value / unit;
    if value % unit > 0 {
        whole + 1
    } else {
        whole
    }
}

pub fn apply_action(plant: &Plant, action: CareAction, now: DateTime<Utc>) -> Result<AppliedCare> {
    let mut updated = plant.clone();

    match action {
        CareAction::Water => {
            updated.next_watering = Some(compute_next_due(now, plant.watering_frequency)?);
            updated.last_watered = Some(now);
        }
        CareAction::Fertilize => {
            updated.next_fertilizing = Some(compute_next_due(now, plant.fertilizing_frequency)?);
            updated.last_fertilized = Some(now);
        }
        CareAction::Repot => {
            updated.last_repotted = Some(now);
        }
    }

    let entry = CareHistoryItem::new(action, now);
    updated.history.push(entry.clone());

    Ok(AppliedCare {
        plant: updated,
        entry,
    })
}

/// Collects the watering and fertilizing tasks of every plant, ordered by due
/// date. Plants keep their relative input order when due dates tie.
pub fn classify_tasks(plants: &[Plant], now: DateTime<Utc>) -> Vec<Task> {
    let mut tasks: Vec<Task> = plants
        .iter()
        .flat_map(|plant| {
            [
                (TaskKind::Water, plant.next_watering),
                (TaskKind::Fertilize, plant.next_fertilizing),
            ]
            .into_iter()
            .filter_map(move |(kind, due)| due.map(|due| make_task(plant, kind, due, now)))
        })
        .collect();

    // sort_by_key is stable, so ties keep input order.
    tasks.sort_by_key(|t| t.due_date);
    tasks
}

/// Splits classified tasks into `(overdue, upcoming)`, preserving order.
pub fn partition_tasks(tasks: Vec<Task>) -> (Vec<Task>, Vec<Task>) {
    tasks.into_iter().partition(|t| t.overdue)
}

fn make_task(plant: &Plant, kind: TaskKind, due: DateTime<Utc>, now: DateTime<Utc>) -> Task {
    Task {
        plant_id: plant.id.clone(),
        plant_name: plant.name.clone(),
        kind,
        due_date: due,
        overdue: due <= now,
        days_until: days_until(due, now),
    }
}
