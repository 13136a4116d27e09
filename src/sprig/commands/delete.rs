use crate::commands::helpers::resolve_selectors;
use crate::commands::{CmdMessage, CmdResult, PlantSelector};
use crate::error::Result;
use crate::store::plant_store::PlantStore;
use crate::store::StorageBackend;

/// Removes plants for good, history included.
pub fn run<B: StorageBackend>(
    store: &mut PlantStore<B>,
    selectors: &[PlantSelector],
) -> Result<CmdResult> {
    let targets = resolve_selectors(store, selectors)?;
    let mut result = CmdResult::default();

    for target in targets {
        if let Some(plant) = store.delete(&target.plant.id)? {
            result.add_message(CmdMessage::success(format!(
                "Plant deleted ({}): {}",
                target.index, plant.name
            )));
            result.affected_plants.push(plant);
        }
    }

    Ok(result)
}
