use crate::commands::helpers::resolve_ids;
use crate::commands::{CmdMessage, CmdResult, PlantSelector};
use crate::error::Result;
use crate::model::{CareAction, Plant};
use crate::schedule::days_until;
use crate::store::plant_store::PlantStore;
use crate::store::StorageBackend;
use chrono::{DateTime, Utc};

/// Records `action` for every selected plant at `now`.
pub fn run<B: StorageBackend>(
    store: &mut PlantStore<B>,
    selectors: &[PlantSelector],
    action: CareAction,
    now: DateTime<Utc>,
) -> Result<CmdResult> {
    let ids = resolve_ids(store, selectors)?;
    let mut result = CmdResult::default();

    for applied in store.record_care_many(&ids, action, now)? {
        result.add_message(CmdMessage::success(describe(&applied.plant, action, now)));
        result.affected_plants.push(applied.plant);
    }

    Ok(result)
}

fn describe(plant: &Plant, action: CareAction, now: DateTime<Utc>) -> String {
    let next = match action {
        CareAction::Water => plant.next_watering,
        CareAction::Fertilize => plant.next_fertilizing,
        CareAction::Repot => None,
    };
    let verb = match action {
        CareAction::Water => "Watered",
        CareAction::Fertilize => "Fertilized",
        CareAction::Repot => "Repotted",
    };
    match next {
        Some(due) => format!(
            "{} {}, next {} in {} days ({})",
            verb,
            plant.name,
            action,
            days_until(due, now),
            due.format("%Y-%m-%d")
        ),
        None => format!("{} {}", verb, plant.name),
    }
}
