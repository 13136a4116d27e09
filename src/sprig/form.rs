//! Add-plant form session.
//!
//! A lookup is started, the user keeps editing (or closes the form), and the
//! result arrives later. Each lookup gets a [`LookupTicket`] carrying the
//! form generation it was issued for. A result is applied only if the form is
//! still open and no newer lookup has been started since; everything else is
//! discarded without touching the draft.

use crate::identify::{IdentifiedPlant, IdentifyError};
use crate::model::PlantDraft;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupTicket {
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Fields were filled in; carries the identified name.
    Applied(String),
    /// Lookup failed; the draft is unchanged.
    Failed(String),
    /// Result arrived for a closed form or a superseded lookup.
    Discarded,
}

#[derive(Debug, Clone)]
pub struct PlantForm {
    draft: PlantDraft,
    generation: u64,
    open: bool,
    pending: bool,
}

impl Default for PlantForm {
    fn default() -> Self {
        Self::new(PlantDraft::default())
    }
}

impl PlantForm {
    pub fn new(draft: PlantDraft) -> Self {
        Self {
            draft,
            generation: 0,
            open: true,
            pending: false,
        }
    }

    pub fn draft(&self) -> &PlantDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut PlantDraft {
        &mut self.draft
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_looking_up(&self) -> bool {
        self.pending
    }

    /// Starts a new lookup, superseding any in flight.
    pub fn begin_lookup(&mut self) -> LookupTicket {
        self.generation += 1;
        self.pending = true;
        LookupTicket {
            generation: self.generation,
        }
    }

    /// Closes the form. Any result still in flight will be discarded.
    pub fn dismiss(&mut self) {
        self.open = false;
        self.pending = false;
        self.generation += 1;
    }

    pub fn apply_lookup(
        &mut self,
        ticket: LookupTicket,
        result: Result<IdentifiedPlant, IdentifyError>,
    ) -> LookupOutcome {
        if !self.open || ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale lookup result"
            );
            return LookupOutcome::Discarded;
        }
        self.pending = false;

        match result {
            Ok(plant) => {
                self.draft.species = plant.species;
                self.draft.name = plant.name.clone();
                self.draft.watering_frequency = plant.watering_frequency;
                self.draft.fertilizing_frequency = plant.fertilizing_frequency;
                self.draft.notes = Some(plant.care_notes).filter(|n| !n.is_empty());
                LookupOutcome::Applied(plant.name)
            }
            Err(e) => LookupOutcome::Failed(e.user_message()),
        }
    }

    /// Consumes the form, returning the draft to save.
    pub fn into_draft(self) -> PlantDraft {
        self.draft
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identify::catalog::catalog;
    use crate::model::PlantType;

    fn monstera() -> IdentifiedPlant {
        catalog()[0].clone()
    }

    #[test]
    fn successful_lookup_fills_fields() {
        let mut form = PlantForm::default();
        form.draft_mut().kind = PlantType::Fern;
        let ticket = form.begin_lookup();
        assert!(form.is_looking_up());

        let outcome = form.apply_lookup(ticket, Ok(monstera()));

        assert_eq!(outcome, LookupOutcome::Applied("Monstera".to_string()));
        let draft = form.draft();
        assert_eq!(draft.species, "Monstera deliciosa");
        assert_eq!(draft.name, "Monstera");
        assert_eq!(draft.watering_frequency, 7);
        assert_eq!(draft.fertilizing_frequency, 30);
        assert!(draft.notes.as_deref().unwrap().contains("indirect light"));
        // fields the lookup does not know about are left alone
        assert_eq!(draft.kind, PlantType::Fern);
        assert!(!form.is_looking_up());
    }

    #[test]
    fn failed_lookup_leaves_draft_unchanged() {
        let mut form = PlantForm::new(PlantDraft::new("Mystery"));
        let before = form.draft().clone();
        let ticket = form.begin_lookup();

        let outcome = form.apply_lookup(ticket, Err(IdentifyError::Network("down".into())));

        assert!(matches!(outcome, LookupOutcome::Failed(_)));
        assert_eq!(form.draft(), &before);
    }

    #[test]
    fn result_after_dismiss_is_discarded() {
        let mut form = PlantForm::new(PlantDraft::new("Mine"));
        let ticket = form.begin_lookup();
        form.dismiss();

        assert_eq!(
            form.apply_lookup(ticket, Ok(monstera())),
            LookupOutcome::Discarded
        );
        assert_eq!(form.draft().name, "Mine");
    }

    #[test]
    fn superseded_ticket_is_discarded() {
        let mut form = PlantForm::default();
        let first = form.begin_lookup();
        let second = form.begin_lookup();

        assert_eq!(
            form.apply_lookup(first, Ok(monstera())),
            LookupOutcome::Discarded
        );
        assert!(form.draft().species.is_empty());
        assert!(form.is_looking_up());

        let cactus = catalog()[7].clone();
        assert_eq!(
            form.apply_lookup(second, Ok(cactus)),
            LookupOutcome::Applied("Cactus".to_string())
        );
        assert_eq!(form.draft().watering_frequency, 21);
    }
}
