use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::form::{LookupOutcome, PlantForm};
use crate::identify::{ImagePayload, PlantIdentifier};
use crate::model::PlantDraft;
use crate::store::plant_store::PlantStore;
use crate::store::StorageBackend;
use chrono::{DateTime, Utc};

/// Identifies the plant in `image` and fills `draft` with the suggestion.
/// With `save`, the filled draft is added to the store with the image
/// attached. A failed lookup is reported as an error message and leaves the
/// store untouched.
pub async fn run<B: StorageBackend, I: PlantIdentifier>(
    store: &mut PlantStore<B>,
    identifier: &I,
    image: ImagePayload,
    draft: PlantDraft,
    save: bool,
    now: DateTime<Utc>,
) -> Result<CmdResult> {
    let mut form = PlantForm::new(draft);
    let ticket = form.begin_lookup();
    let lookup = identifier.identify(&image).await;
    let identified = lookup.as_ref().ok().cloned();

    let mut result = CmdResult::default();
    match form.apply_lookup(ticket, lookup) {
        LookupOutcome::Applied(name) => {
            if let Some(found) = identified {
                result.add_message(CmdMessage::success(format!(
                    "Identified {} ({}, {:.0}% confidence)",
                    name,
                    found.species,
                    found.confidence * 100.0
                )));
                result = result.with_identified(found);
            }
            if save {
                let mut draft = form.into_draft();
                draft.image = Some(image.as_str().to_string());
                let plant = store.create(draft, now)?;
                result.add_message(CmdMessage::success(format!("Plant added: {}", plant.name)));
                result.affected_plants.push(plant);
            } else {
                result.add_message(CmdMessage::info("Use --save to add it to your plants"));
            }
        }
        LookupOutcome::Failed(message) => {
            result.add_message(CmdMessage::error(message));
        }
        LookupOutcome::Discarded => {
            result.add_message(CmdMessage::warning("Identification result was discarded"));
        }
    }
    Ok(result)
}
