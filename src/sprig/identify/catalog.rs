use super::{IdentifiedPlant, IdentifyError, ImagePayload, PlantIdentifier};
use once_cell::sync::Lazy;
use rand_core::{OsRng, RngCore};
use std::future::Future;
use std::time::Duration;

pub const DEFAULT_DELAY: Duration = Duration::from_millis(2000);

#[allow(clippy::too_many_arguments)]
fn entry(
    name: &str,
    species: &str,
    common_names: &[&str],
    watering: u32,
    fertilizing: u32,
    repot_month: u32,
    care_notes: &str,
    confidence: f32,
) -> IdentifiedPlant {
    IdentifiedPlant {
        name: name.to_string(),
        species: species.to_string(),
        common_names: common_names.iter().map(|s| s.to_string()).collect(),
        watering_frequency: watering,
        fertilizing_frequency: fertilizing,
        repotting_month: Some(repot_month),
        care_notes: care_notes.to_string(),
        confidence,
    }
}

static CATALOG: Lazy<Vec<IdentifiedPlant>> = Lazy::new(|| {
    vec![
        entry(
            "Monstera",
            "Monstera deliciosa",
            &["Swiss Cheese Plant", "Split-leaf Philodendron"],
            7,
            30,
            4,
            "Likes bright, indirect light. Water once the top layer of soil is dry, more often in summer.",
            0.95,
        ),
        entry(
            "Succulent",
            "Echeveria elegans",
            &["Mexican Snowball", "White Mexican Rose"],
            14,
            60,
            3,
            "Needs plenty of sun. Water sparingly and only when the soil is completely dry.",
            0.92,
        ),
        entry(
            "Ficus",
            "Ficus elastica",
            &["Rubber Plant", "Rubber Tree"],
            7,
            30,
            5,
            "Prefers a bright spot. Water when the topsoil dries out and wipe the leaves with a damp cloth.",
            0.89,
        ),
        entry(
            "Aloe",
            "Aloe vera",
            &["Medicinal Aloe", "Burn Plant"],
            14,
            90,
            3,
            "A succulent that wants lots of light and little water. Let the soil dry fully between waterings.",
            0.94,
        ),
        entry(
            "Fern",
            "Nephrolepis exaltata",
            &["Boston Fern", "Sword Fern"],
            3,
            30,
            4,
            "Likes humidity and partial shade. Keep the soil evenly moist and mist the fronds.",
            0.88,
        ),
        entry(
            "Sansevieria",
            "Sansevieria trifasciata",
            &["Snake Plant", "Mother-in-Law's Tongue"],
            14,
            60,
            5,
            "Very hardy. Grows in bright light or partial shade. Water rarely.",
            0.91,
        ),
        entry(
            "Pothos",
            "Epipremnum aureum",
            &["Golden Pothos", "Devil's Ivy"],
            7,
            30,
            4,
            "Easy going. Prefers medium light. Water once the top layer of soil is dry.",
            0.93,
        ),
        entry(
            "Cactus",
            "Cactaceae",
            &["Cactus"],
            21,
            90,
            3,
            "Needs lots of sun. Water very rarely and keep the soil dry between waterings.",
            0.87,
        ),
    ]
});

/// The fixed set of plants the catalog identifier chooses from.
pub fn catalog() -> &'static [IdentifiedPlant] {
    &CATALOG
}

/// Offline identifier: waits `delay`, then returns a uniformly random
/// catalog entry. Never fails for a valid payload.
#[derive(Debug, Clone)]
pub struct CatalogIdentifier {
    delay: Duration,
}

impl Default for CatalogIdentifier {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

impl CatalogIdentifier {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    fn pick(&self) -> IdentifiedPlant {
        let entries = catalog();
        let index = OsRng.next_u32() as usize % entries.len();
        entries[index].clone()
    }
}

impl PlantIdentifier for CatalogIdentifier {
    fn identify<'a>(
        &'a self,
        image: &'a ImagePayload,
    ) -> impl Future<Output = Result<IdentifiedPlant, IdentifyError>> + Send + 'a {
        async move {
            tracing::trace!(bytes = image.base64().len(), delay_ms = ?self.delay, "catalog lookup");
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            Ok(self.pick())
        }
    }
}
