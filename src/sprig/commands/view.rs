use crate::commands::helpers::resolve_selectors;
use crate::commands::{CmdResult, PlantSelector};
use crate::error::Result;
use crate::store::plant_store::PlantStore;
use crate::store::StorageBackend;

pub fn run<B: StorageBackend>(
    store: &PlantStore<B>,
    selectors: &[PlantSelector],
) -> Result<CmdResult> {
    let plants = resolve_selectors(store, selectors)?;
    Ok(CmdResult::default().with_listed_plants(plants))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SprigError;
    use crate::store::plant_store::fixtures::StoreFixture;

    #[test]
    fn views_selected_plants() {
        let fx = StoreFixture::new().with_plant("Aloe").with_plant("Ficus");
        let result = run(&fx.store, &[PlantSelector::Index(2)]).unwrap();
        assert_eq!(result.listed_plants.len(), 1);
        assert_eq!(result.listed_plants[0].plant.name, "Ficus");
    }

    #[test]
    fn unknown_plant_errors() {
        let fx = StoreFixture::new().with_plant("Aloe");
        assert!(matches!(
            run(&fx.store, &[PlantSelector::Term("Ficus".into())]),
            Err(SprigError::PlantNotFound(_))
        ));
    }
}
