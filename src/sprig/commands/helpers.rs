use crate::error::{Result, SprigError};
use crate::model::{Plant, PlantId};
use crate::store::plant_store::PlantStore;
use crate::store::StorageBackend;
use std::fmt;
use std::str::FromStr;

/// A plant with its 1-based position in the stored list. The index is stable
/// under filtering, so `sprig list -s fern` and `sprig water 3` agree.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayPlant {
    pub index: usize,
    pub plant: Plant,
}

/// How a user refers to a plant on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlantSelector {
    Index(usize),
    /// Full id, or a case-insensitive exact name.
    Term(String),
}

impl FromStr for PlantSelector {
    type Err = SprigError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(SprigError::Api("Empty plant selector".to_string()));
        }
        if s.chars().all(|c| c.is_ascii_digit()) {
            // Too large for an index, so it can only be a numeric id.
            let Ok(index) = s.parse::<usize>() else {
                return Ok(PlantSelector::Term(s.to_string()));
            };
            if index == 0 {
                return Err(SprigError::Api("Indexes start at 1".to_string()));
            }
            return Ok(PlantSelector::Index(index));
        }
        Ok(PlantSelector::Term(s.to_string()))
    }
}

impl fmt::Display for PlantSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlantSelector::Index(i) => write!(f, "{}", i),
            PlantSelector::Term(t) => f.write_str(t),
        }
    }
}

pub fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<PlantSelector>> {
    inputs.iter().map(|s| s.as_ref().parse()).collect()
}

pub fn indexed_plants<B: StorageBackend>(store: &PlantStore<B>) -> Result<Vec<DisplayPlant>> {
    Ok(store
        .list()?
        .into_iter()
        .enumerate()
        .map(|(i, plant)| DisplayPlant {
            index: i + 1,
            plant,
        })
        .collect())
}

fn find<'a>(plants: &'a [DisplayPlant], selector: &PlantSelector) -> Result<&'a DisplayPlant> {
    match selector {
        // Older records carry all-digit ids, so a number past the end of the
        // list is tried as an id.
        PlantSelector::Index(i) => {
            let id = i.to_string();
            plants
                .iter()
                .find(|dp| dp.index == *i)
                .or_else(|| plants.iter().find(|dp| dp.plant.id.as_str() == id))
                .ok_or_else(|| SprigError::PlantNotFound(selector.to_string()))
        }
        PlantSelector::Term(term) => {
            if let Some(dp) = plants.iter().find(|dp| dp.plant.id.as_str() == term) {
                return Ok(dp);
            }
            let needle = term.to_lowercase();
            let mut matches = plants
                .iter()
                .filter(|dp| dp.plant.name.to_lowercase() == needle);
            match (matches.next(), matches.next()) {
                (Some(dp), None) => Ok(dp),
                (Some(_), Some(_)) => Err(SprigError::Api(format!(
                    "More than one plant is called '{}', use its index instead",
                    term
                ))),
                (None, _) => Err(SprigError::PlantNotFound(term.clone())),
            }
        }
    }
}

/// Resolves every selector against the current list. Fails on the first one
/// that matches nothing, before anything is changed.
pub fn resolve_selectors<B: StorageBackend>(
    store: &PlantStore<B>,
    selectors: &[PlantSelector],
) -> Result<Vec<DisplayPlant>> {
    let plants = indexed_plants(store)?;
    let mut resolved: Vec<DisplayPlant> = Vec::with_capacity(selectors.len());
    for selector in selectors {
        let dp = find(&plants, selector)?;
        if !resolved.iter().any(|r| r.plant.id == dp.plant.id) {
            resolved.push(dp.clone());
        }
    }
    Ok(resolved)
}

pub fn resolve_one<B: StorageBackend>(
    store: &PlantStore<B>,
    selector: &PlantSelector,
) -> Result<DisplayPlant> {
    let plants = indexed_plants(store)?;
    find(&plants, selector).cloned()
}

pub fn resolve_ids<B: StorageBackend>(
    store: &PlantStore<B>,
    selectors: &[PlantSelector],
) -> Result<Vec<PlantId>> {
    Ok(resolve_selectors(store, selectors)?
        .into_iter()
        .map(|dp| dp.plant.id)
        .collect())
}
