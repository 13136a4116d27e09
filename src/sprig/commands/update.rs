use crate::commands::helpers::resolve_one;
use crate::commands::{CmdMessage, CmdResult, PlantSelector};
use crate::error::{Result, SprigError};
use crate::model::PlantPatch;
use crate::store::plant_store::PlantStore;
use crate::store::StorageBackend;

pub fn run<B: StorageBackend>(
    store: &mut PlantStore<B>,
    selector: &PlantSelector,
    patch: &PlantPatch,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if patch.is_empty() {
        result.add_message(CmdMessage::warning("Nothing to update"));
        return Ok(result);
    }
    if let Some(name) = &patch.name {
        if name.trim().is_empty() {
            return Err(SprigError::Api("A plant needs a name".to_string()));
        }
    }

    let target = resolve_one(store, selector)?;
    match store.update(&target.plant.id, patch)? {
        Some(plant) => {
            result.add_message(CmdMessage::success(format!(
                "Plant updated ({}): {}",
                target.index, plant.name
            )));
            result.affected_plants.push(plant);
        }
        None => {
            result.add_message(CmdMessage::warning(format!(
                "Plant {} disappeared before it could be updated",
                target.index
            )));
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Location;
    use crate::store::plant_store::fixtures::StoreFixture;

    #[test]
    fn patches_fields_and_keeps_schedule() {
        let mut fx = StoreFixture::new().with_plant("Ficus");
        let before = fx.store.list().unwrap()[0].clone();

        let patch = PlantPatch {
            location: Some(Location::Outdoor),
            watering_frequency: Some(3),
            ..PlantPatch::default()
        };
        let result = run(&mut fx.store, &PlantSelector::Index(1), &patch).unwrap();

        let after = &result.affected_plants[0];
        assert_eq!(after.location, Location::Outdoor);
        assert_eq!(after.watering_frequency, 3);
        assert_eq!(after.id, before.id);
        assert_eq!(after.next_watering, before.next_watering);
    }

    #[test]
    fn empty_patch_writes_nothing() {
        let mut fx = StoreFixture::new().with_plant("Ficus");
        let writes = fx.store.backend().write_count();
        let result = run(&mut fx.store, &PlantSelector::Index(1), &PlantPatch::default()).unwrap();
        assert!(result.affected_plants.is_empty());
        assert_eq!(fx.store.backend().write_count(), writes);
    }

    #[test]
    fn zero_frequency_is_rejected() {
        let mut fx = StoreFixture::new().with_plant("Ficus");
        let patch = PlantPatch {
            fertilizing_frequency: Some(0),
            ..PlantPatch::default()
        };
        assert!(matches!(
            run(&mut fx.store, &PlantSelector::Index(1), &patch),
            Err(SprigError::InvalidFrequency(0))
        ));
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut fx = StoreFixture::new().with_plant("Ficus");
        let patch = PlantPatch {
            name: Some(" ".into()),
            ..PlantPatch::default()
        };
        assert!(run(&mut fx.store, &PlantSelector::Index(1), &patch).is_err());
    }
}
