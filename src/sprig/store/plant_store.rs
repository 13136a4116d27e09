use super::{StorageBackend, PLANTS_KEY};
use crate::error::{Result, SprigError};
use crate::model::{CareAction, Plant, PlantDraft, PlantId, PlantPatch};
use crate::schedule::{self, AppliedCare};
use chrono::{DateTime, Utc};

/// The plant list, persisted as a single blob through a [`StorageBackend`].
///
/// Each operation is a read-modify-write against the backend: the list is
/// loaded, changed in memory and written back in full. Operations on an
/// unknown id do nothing and write nothing.
pub struct PlantStore<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> PlantStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn list(&self) -> Result<Vec<Plant>> {
        match self.backend.load(PLANTS_KEY)? {
            Some(blob) if !blob.trim().is_empty() => {
                let plants: Vec<Plant> =
                    serde_json::from_str(&blob).map_err(SprigError::Serialization)?;
                Ok(plants)
            }
            _ => Ok(Vec::new()),
        }
    }

    pub fn get(&self, id: &PlantId) -> Result<Option<Plant>> {
        Ok(self.list()?.into_iter().find(|p| &p.id == id))
    }

    /// Adds a plant built from `draft`. Watering and fertilizing are treated
    /// as done at `now`, so the first reminders land one interval later.
    pub fn create(&mut self, draft: PlantDraft, now: DateTime<Utc>) -> Result<Plant> {
        validate_frequency(draft.repotting_frequency)?;

        let mut plant = Plant::from_draft(PlantId::generate(), draft);
        plant.last_watered = Some(now);
        plant.last_fertilized = Some(now);
        plant.next_watering = Some(schedule::compute_next_due(now, plant.watering_frequency)?);
        plant.next_fertilizing =
            Some(schedule::compute_next_due(now, plant.fertilizing_frequency)?);

        let mut plants = self.list()?;
        plants.push(plant.clone());
        self.save_all(&plants)?;

        tracing::debug!(id = %plant.id, name = %plant.name, "plant created");
        Ok(plant)
    }

    /// Applies `patch` to the plant with `id`. Returns the updated plant, or
    /// `None` (and writes nothing) when the id is unknown.
    pub fn update(&mut self, id: &PlantId, patch: &PlantPatch) -> Result<Option<Plant>> {
        for days in [
            patch.watering_frequency,
            patch.fertilizing_frequency,
            patch.repotting_frequency,
        ]
        .into_iter()
        .flatten()
        {
            validate_frequency(days)?;
        }

        let mut plants = self.list()?;
        let Some(plant) = plants.iter_mut().find(|p| &p.id == id) else {
            tracing::debug!(%id, "update ignored: unknown plant");
            return Ok(None);
        };
        patch.apply_to(plant);
        let updated = plant.clone();
        self.save_all(&plants)?;

        Ok(Some(updated))
    }

    /// Removes the plant with `id` together with its history. Returns the
    /// removed plant, or `None` when the id is unknown.
    pub fn delete(&mut self, id: &PlantId) -> Result<Option<Plant>> {
        let mut plants = self.list()?;
        let Some(pos) = plants.iter().position(|p| &p.id == id) else {
            tracing::debug!(%id, "delete ignored: unknown plant");
            return Ok(None);
        };
        let removed = plants.remove(pos);
        self.save_all(&plants)?;

        tracing::debug!(%id, name = %removed.name, "plant deleted");
        Ok(Some(removed))
    }

    /// Runs `action` through the schedule engine and replaces the stored
    /// record with the result.
    pub fn record_care(
        &mut self,
        id: &PlantId,
        action: CareAction,
        now: DateTime<Utc>,
    ) -> Result<Option<AppliedCare>> {
        Ok(self
            .record_care_many(std::slice::from_ref(id), action, now)?
            .into_iter()
            .next())
    }

    /// Records `action` for every plant in `ids` with a single write. If the
    /// schedule engine rejects any of them, nothing is saved. Unknown ids are
    /// skipped.
    pub fn record_care_many(
        &mut self,
        ids: &[PlantId],
        action: CareAction,
        now: DateTime<Utc>,
    ) -> Result<Vec<AppliedCare>> {
        let mut plants = self.list()?;
        let mut applied = Vec::with_capacity(ids.len());

        for id in ids {
            let Some(slot) = plants.iter_mut().find(|p| &p.id == id) else {
                tracing::debug!(%id, %action, "care ignored: unknown plant");
                continue;
            };
            let care = schedule::apply_action(slot, action, now)?;
            *slot = care.plant.clone();
            applied.push(care);
        }

        if !applied.is_empty() {
            self.save_all(&plants)?;
            tracing::debug!(count = applied.len(), %action, "care recorded");
        }
        Ok(applied)
    }

    fn save_all(&self, plants: &[Plant]) -> Result<()> {
        let blob = serde_json::to_string(plants).map_err(SprigError::Serialization)?;
        self.backend.save(PLANTS_KEY, &blob)
    }
}

fn validate_frequency(value: u32) -> Result<()> {
    if value == 0 {
        return Err(SprigError::InvalidFrequency(value));
    }
    Ok(())
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use chrono::TimeZone;

    pub fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    pub struct StoreFixture {
        pub store: PlantStore<MemBackend>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: PlantStore::with_backend(MemBackend::new()),
            }
        }

        pub fn with_plant(mut self, name: &str) -> Self {
            self.store
                .create(PlantDraft::new(name), fixed_now())
                .unwrap();
            self
        }

        pub fn with_draft(mut self, draft: PlantDraft) -> Self {
            self.store.create(draft, fixed_now()).unwrap();
            self
        }

        pub fn ids(&self) -> Vec<PlantId> {
            self.store
                .list()
                .unwrap()
                .into_iter()
                .map(|p| p.id)
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{fixed_now, StoreFixture};
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use chrono::Duration;

    #[test]
    fn empty_backend_lists_nothing() {
        let store = PlantStore::with_backend(MemBackend::new());
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn create_assigns_id_and_initial_schedule() {
        let mut store = PlantStore::with_backend(MemBackend::new());
        let draft = PlantDraft {
            watering_frequency: 3,
            fertilizing_frequency: 30,
            ..PlantDraft::new("Papartis")
        };
        let plant = store.create(draft, fixed_now()).unwrap();

        assert!(!plant.id.as_str().is_empty());
        assert_eq!(plant.last_watered, Some(fixed_now()));
        assert_eq!(plant.last_fertilized, Some(fixed_now()));
        assert_eq!(plant.next_watering, Some(fixed_now() + Duration::days(3)));
        assert_eq!(plant.next_fertilizing, Some(fixed_now() + Duration::days(30)));
        assert!(plant.last_repotted.is_none());
        assert!(plant.next_repotting.is_none());
        assert!(plant.history.is_empty());

        assert_eq!(store.list().unwrap(), vec![plant]);
    }

    #[test]
    fn create_rejects_zero_frequency_without_writing() {
        let mut store = PlantStore::with_backend(MemBackend::new());
        let draft = PlantDraft {
            watering_frequency: 0,
            ..PlantDraft::new("Broken")
        };
        let err = store.create(draft, fixed_now()).unwrap_err();
        assert!(matches!(err, SprigError::InvalidFrequency(0)));
        assert_eq!(store.backend().write_count(), 0);
    }

    #[test]
    fn ids_are_unique() {
        let fixture = StoreFixture::new()
            .with_plant("A")
            .with_plant("B")
            .with_plant("C");
        let mut ids = fixture.ids();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn update_patches_fields_and_keeps_identity() {
        let mut fixture = StoreFixture::new().with_plant("Old name");
        let id = fixture.ids()[0].clone();
        let before = fixture.store.get(&id).unwrap().unwrap();

        let patch = PlantPatch {
            name: Some("New name".into()),
            ..PlantPatch::default()
        };
        let updated = fixture.store.update(&id, &patch).unwrap().unwrap();

        assert_eq!(updated.id, id);
        assert_eq!(updated.name, "New name");
        assert_eq!(updated.history, before.history);
        assert_eq!(updated.next_watering, before.next_watering);
        assert_eq!(fixture.store.get(&id).unwrap().unwrap().name, "New name");
    }

    #[test]
    fn update_unknown_id_leaves_blob_byte_identical() {
        let mut fixture = StoreFixture::new().with_plant("A").with_plant("B");
        let before = fixture.store.backend().raw(PLANTS_KEY).unwrap();
        let writes = fixture.store.backend().write_count();

        let patch = PlantPatch {
            name: Some("Ghost".into()),
            ..PlantPatch::default()
        };
        let result = fixture
            .store
            .update(&PlantId::from("does-not-exist"), &patch)
            .unwrap();

        assert!(result.is_none());
        assert_eq!(fixture.store.backend().raw(PLANTS_KEY).unwrap(), before);
        assert_eq!(fixture.store.backend().write_count(), writes);
    }

    #[test]
    fn update_rejects_zero_frequency() {
        let mut fixture = StoreFixture::new().with_plant("A");
        let id = fixture.ids()[0].clone();
        let patch = PlantPatch {
            fertilizing_frequency: Some(0),
            ..PlantPatch::default()
        };
        assert!(fixture.store.update(&id, &patch).is_err());
    }

    #[test]
    fn delete_removes_plant() {
        let mut fixture = StoreFixture::new().with_plant("A").with_plant("B");
        let ids = fixture.ids();

        let removed = fixture.store.delete(&ids[0]).unwrap().unwrap();
        assert_eq!(removed.name, "A");

        let remaining = fixture.store.list().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, ids[1]);
    }

    #[test]
    fn delete_unknown_id_leaves_list_unchanged() {
        let mut fixture = StoreFixture::new().with_plant("A").with_plant("B");
        let before = fixture.store.list().unwrap();

        assert!(fixture
            .store
            .delete(&PlantId::from("nope"))
            .unwrap()
            .is_none());
        assert_eq!(fixture.store.list().unwrap(), before);
    }

    #[test]
    fn record_care_replaces_stored_record() {
        let mut fixture = StoreFixture::new().with_plant("A").with_plant("B");
        let ids = fixture.ids();
        let now = fixed_now() + Duration::days(8) + Duration::hours(12);

        let applied = fixture
            .store
            .record_care(&ids[1], CareAction::Water, now)
            .unwrap()
            .unwrap();

        let stored = fixture.store.get(&ids[1]).unwrap().unwrap();
        assert_eq!(stored, applied.plant);
        assert_eq!(stored.history.len(), 1);
        assert_eq!(stored.last_watered, Some(now));
        assert_eq!(stored.next_watering, Some(now + Duration::days(7)));

        // The other plant is untouched.
        let other = fixture.store.get(&ids[0]).unwrap().unwrap();
        assert!(other.history.is_empty());
    }

    #[test]
    fn record_care_unknown_id_is_noop() {
        let mut fixture = StoreFixture::new().with_plant("A");
        let writes = fixture.store.backend().write_count();
        let result = fixture
            .store
            .record_care(&PlantId::from("nope"), CareAction::Repot, fixed_now())
            .unwrap();
        assert!(result.is_none());
        assert_eq!(fixture.store.backend().write_count(), writes);
    }

    #[test]
    fn record_care_many_writes_once() {
        let mut fixture = StoreFixture::new().with_plant("A").with_plant("B");
        let ids = fixture.ids();
        let writes = fixture.store.backend().write_count();

        let applied = fixture
            .store
            .record_care_many(&ids, CareAction::Water, fixed_now())
            .unwrap();

        assert_eq!(applied.len(), 2);
        assert_eq!(fixture.store.backend().write_count(), writes + 1);
        assert!(fixture
            .store
            .list()
            .unwrap()
            .iter()
            .all(|p| p.history.len() == 1));
    }

    #[test]
    fn write_failure_propagates() {
        let mut fixture = StoreFixture::new().with_plant("A");
        let id = fixture.ids()[0].clone();
        fixture.store.backend().set_simulate_write_error(true);

        let err = fixture
            .store
            .record_care(&id, CareAction::Water, fixed_now())
            .unwrap_err();
        assert!(matches!(err, SprigError::Store(_)));

        // Nothing was persisted.
        fixture.store.backend().set_simulate_write_error(false);
        assert!(fixture.store.get(&id).unwrap().unwrap().history.is_empty());
    }

    #[test]
    fn loads_blob_written_by_older_versions() {
        let blob = r#"[{"id":"1718000000000","name":"Aloė","species":"Aloe vera","type":"succulent",
            "wateringFrequency":14,"fertilizingFrequency":90,"repottingFrequency":2,
            "location":"indoor","lightNeeds":"direct","humidityNeeds":"low","tempRange":"18-24°C",
            "acquisitionDate":"2024-06-10","lastWatered":"2024-06-10T10:00:00.000Z",
            "nextWatering":"2024-06-24T10:00:00.000Z","history":[
            {"id":"1718100000000","date":"2024-06-11T10:00:00.000Z","action":"water"}]}]"#;
        let store = PlantStore::with_backend(MemBackend::with_blob(PLANTS_KEY, blob));

        let plants = store.list().unwrap();
        assert_eq!(plants.len(), 1);
        assert_eq!(plants[0].history.len(), 1);
        assert!(plants[0].next_fertilizing.is_none());
        assert!(plants[0].notes.is_none());
    }
}
