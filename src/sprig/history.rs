use crate::model::{CareAction, Plant, PlantId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A care event together with the plant it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub plant_id: PlantId,
    pub plant_name: String,
    pub item_id: String,
    pub date: DateTime<Utc>,
    pub action: CareAction,
    pub note: Option<String>,
}

/// Every care event across all plants, newest first. Events on the same
/// instant keep plant order, then history order.
pub fn history_feed(plants: &[Plant]) -> Vec<HistoryEntry> {
    let mut entries: Vec<HistoryEntry> = plants
        .iter()
        .flat_map(|plant| {
            plant.history.iter().map(move |item| HistoryEntry {
                plant_id: plant.id.clone(),
                plant_name: plant.name.clone(),
                item_id: item.id.clone(),
                date: item.date,
                action: item.action,
                note: item.note.clone(),
            })
        })
        .collect();

    entries.sort_by(|a, b| b.date.cmp(&a.date));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CareHistoryItem, PlantDraft};
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap()
    }

    fn with_history(name: &str, events: &[(CareAction, u32)]) -> Plant {
        let mut p = Plant::from_draft(PlantId::from(name), PlantDraft::new(name));
        p.history = events
            .iter()
            .map(|(action, day)| CareHistoryItem::new(*action, at(*day)))
            .collect();
        p
    }

    #[test]
    fn feed_is_newest_first_across_plants() {
        let plants = vec![
            with_history("Fern", &[(CareAction::Water, 1), (CareAction::Water, 4)]),
            with_history("Cactus", &[(CareAction::Repot, 3)]),
        ];
        let feed = history_feed(&plants);

        let summary: Vec<(&str, u32)> = feed
            .iter()
            .map(|e| (e.plant_name.as_str(), chrono::Datelike::day(&e.date)))
            .collect();
        assert_eq!(summary, vec![("Fern", 4), ("Cactus", 3), ("Fern", 1)]);
    }

    #[test]
    fn same_instant_keeps_input_order() {
        let plants = vec![
            with_history("A", &[(CareAction::Water, 2)]),
            with_history("B", &[(CareAction::Fertilize, 2)]),
        ];
        let feed = history_feed(&plants);
        assert_eq!(feed[0].plant_name, "A");
        assert_eq!(feed[1].plant_name, "B");
    }

    #[test]
    fn empty_without_history() {
        let plants = vec![with_history("A", &[])];
        assert!(history_feed(&plants).is_empty());
    }
}
