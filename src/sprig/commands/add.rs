use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, SprigError};
use crate::model::PlantDraft;
use crate::store::plant_store::PlantStore;
use crate::store::StorageBackend;
use chrono::{DateTime, Utc};

pub fn run<B: StorageBackend>(
    store: &mut PlantStore<B>,
    mut draft: PlantDraft,
    now: DateTime<Utc>,
) -> Result<CmdResult> {
    draft.name = draft.name.trim().to_string();
    if draft.name.is_empty() {
        return Err(SprigError::Api("A plant needs a name".to_string()));
    }

    let plant = store.create(draft, now)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Plant added: {}", plant.name)));
    Ok(result.with_affected_plants(vec![plant]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use crate::store::plant_store::fixtures::fixed_now;
    use chrono::Duration;

    #[test]
    fn creates_plant_with_initial_schedule() {
        let mut store = PlantStore::with_backend(MemBackend::new());
        let result = run(&mut store, PlantDraft::new("  Monstera "), fixed_now()).unwrap();

        let plant = &result.affected_plants[0];
        assert_eq!(plant.name, "Monstera");
        assert_eq!(plant.next_watering, Some(fixed_now() + Duration::days(7)));
        assert!(plant.history.is_empty());
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut store = PlantStore::with_backend(MemBackend::new());
        assert!(run(&mut store, PlantDraft::new("   "), fixed_now()).is_err());
        assert_eq!(store.backend().write_count(), 0);
    }

    #[test]
    fn zero_frequency_is_rejected() {
        let mut store = PlantStore::with_backend(MemBackend::new());
        let draft = PlantDraft {
            watering_frequency: 0,
            ..PlantDraft::new("Dry")
        };
        assert!(matches!(
            run(&mut store, draft, fixed_now()),
            Err(SprigError::InvalidFrequency(0))
        ));
        assert!(store.list().unwrap().is_empty());
    }
}
