use crate::commands::helpers::indexed_plants;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::{Location, Plant};
use crate::store::plant_store::PlantStore;
use crate::store::StorageBackend;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LocationFilter {
    #[default]
    All,
    Only(Location),
}

#[derive(Debug, Clone, Default)]
pub struct PlantFilter {
    pub search: Option<String>,
    pub location: LocationFilter,
}

impl PlantFilter {
    /// Case-insensitive substring match on name or species, combined with
    /// the location filter.
    pub fn matches(&self, plant: &Plant) -> bool {
        let location_ok = match self.location {
            LocationFilter::All => true,
            LocationFilter::Only(loc) => plant.location == loc,
        };
        if !location_ok {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                plant.name.to_lowercase().contains(&term)
                    || plant.species.to_lowercase().contains(&term)
            }
        }
    }
}

pub fn run<B: StorageBackend>(store: &PlantStore<B>, filter: &PlantFilter) -> Result<CmdResult> {
    let plants = indexed_plants(store)?
        .into_iter()
        .filter(|dp| filter.matches(&dp.plant))
        .collect();
    Ok(CmdResult::default().with_listed_plants(plants))
}
