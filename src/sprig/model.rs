use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Declares a closed set of lowercase keywords that round-trip through serde,
/// `Display` and `FromStr` with the same spelling.
macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $text:literal),+ $(,)? } default $default:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let lower = s.trim().to_lowercase();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == lower)
                    .ok_or_else(|| {
                        let allowed: Vec<&str> = $name::ALL.iter().map(|v| v.as_str()).collect();
                        format!("unknown value '{}' (expected one of: {})", s, allowed.join(", "))
                    })
            }
        }
    };
}

keyword_enum! {
    /// Broad botanical grouping, used only for display and filtering.
    PlantType {
        Succulent => "succulent",
        Tropical => "tropical",
        Flowering => "flowering",
        Fern => "fern",
        Tree => "tree",
        Other => "other",
    } default Tropical
}

keyword_enum! {
    Location {
        Indoor => "indoor",
        Outdoor => "outdoor",
    } default Indoor
}

keyword_enum! {
    LightLevel {
        Low => "low",
        Medium => "medium",
        Bright => "bright",
        Direct => "direct",
    } default Bright
}

keyword_enum! {
    HumidityLevel {
        Low => "low",
        Medium => "medium",
        High => "high",
    } default Medium
}

keyword_enum! {
    /// A care event that can be recorded against a plant.
    CareAction {
        Water => "water",
        Fertilize => "fertilize",
        Repot => "repot",
    } default Water
}

pub const DEFAULT_WATERING_FREQUENCY: u32 = 7;
pub const DEFAULT_FERTILIZING_FREQUENCY: u32 = 30;
pub const DEFAULT_REPOTTING_FREQUENCY: u32 = 2;
pub const DEFAULT_TEMP_RANGE: &str = "18-24°C";

fn default_watering_frequency() -> u32 {
    DEFAULT_WATERING_FREQUENCY
}

fn default_fertilizing_frequency() -> u32 {
    DEFAULT_FERTILIZING_FREQUENCY
}

fn default_repotting_frequency() -> u32 {
    DEFAULT_REPOTTING_FREQUENCY
}

/// Opaque plant identifier.
///
/// Fresh ids are UUID v4 strings, but any string read back from storage is
/// accepted as-is so older data keeps its identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlantId(String);

impl PlantId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlantId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PlantId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for PlantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One recorded care event. Never modified after it is appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareHistoryItem {
    pub id: String,
    pub date: DateTime<Utc>,
    pub action: CareAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl CareHistoryItem {
    pub fn new(action: CareAction, date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            action,
            note: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub id: PlantId,
    pub name: String,
    #[serde(default)]
    pub species: String,
    #[serde(rename = "type", default)]
    pub kind: PlantType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acquisition_date: Option<NaiveDate>,

    #[serde(default = "default_watering_frequency")]
    pub watering_frequency: u32,
    #[serde(default = "default_fertilizing_frequency")]
    pub fertilizing_frequency: u32,
    /// Years, not days.
    #[serde(default = "default_repotting_frequency")]
    pub repotting_frequency: u32,

    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub light_needs: LightLevel,
    #[serde(default)]
    pub humidity_needs: HumidityLevel,
    #[serde(default)]
    pub temp_range: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_watered: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_fertilized: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_repotted: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_watering: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_fertilizing: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_repotting: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub history: Vec<CareHistoryItem>,
}

impl Plant {
    /// Builds a record from a draft with empty schedule state and history.
    pub fn from_draft(id: PlantId, draft: PlantDraft) -> Self {
        Self {
            id,
            name: draft.name,
            species: draft.species,
            kind: draft.kind,
            image: draft.image,
            acquisition_date: draft.acquisition_date,
            watering_frequency: draft.watering_frequency,
            fertilizing_frequency: draft.fertilizing_frequency,
            repotting_frequency: draft.repotting_frequency,
            location: draft.location,
            light_needs: draft.light_needs,
            humidity_needs: draft.humidity_needs,
            temp_range: draft.temp_range,
            last_watered: None,
            last_fertilized: None,
            last_repotted: None,
            next_watering: None,
            next_fertilizing: None,
            next_repotting: None,
            notes: draft.notes,
            history: Vec::new(),
        }
    }

    pub fn count_actions(&self, action: CareAction) -> usize {
        self.history.iter().filter(|h| h.action == action).count()
    }
}

/// User-supplied fields for a new plant. The store fills in the id, the
/// initial schedule and an empty history.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantDraft {
    pub name: String,
    pub species: String,
    pub kind: PlantType,
    pub image: Option<String>,
    pub acquisition_date: Option<NaiveDate>,
    pub watering_frequency: u32,
    pub fertilizing_frequency: u32,
    pub repotting_frequency: u32,
    pub location: Location,
    pub light_needs: LightLevel,
    pub humidity_needs: HumidityLevel,
    pub temp_range: String,
    pub notes: Option<String>,
}

impl PlantDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Default for PlantDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            species: String::new(),
            kind: PlantType::default(),
            image: None,
            acquisition_date: None,
            watering_frequency: DEFAULT_WATERING_FREQUENCY,
            fertilizing_frequency: DEFAULT_FERTILIZING_FREQUENCY,
            repotting_frequency: DEFAULT_REPOTTING_FREQUENCY,
            location: Location::default(),
            light_needs: LightLevel::default(),
            humidity_needs: HumidityLevel::default(),
            temp_range: DEFAULT_TEMP_RANGE.to_string(),
            notes: None,
        }
    }
}

/// Partial update of a plant's user-editable fields.
///
/// Identity, history and the schedule state (`last*`/`next*`) are not
/// reachable through a patch. Changing a frequency does not reschedule; the
/// new value takes effect at the next care action.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlantPatch {
    pub name: Option<String>,
    pub species: Option<String>,
    pub kind: Option<PlantType>,
    pub image: Option<String>,
    pub acquisition_date: Option<NaiveDate>,
    pub watering_frequency: Option<u32>,
    pub fertilizing_frequency: Option<u32>,
    pub repotting_frequency: Option<u32>,
    pub location: Option<Location>,
    pub light_needs: Option<LightLevel>,
    pub humidity_needs: Option<HumidityLevel>,
    pub temp_range: Option<String>,
    pub notes: Option<String>,
}

impl PlantPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn apply_to(&self, plant: &mut Plant) {
        if let Some(name) = &self.name {
            plant.name = name.clone();
        }
        if let Some(species) = &self.species {
            plant.species = species.clone();
        }
        if let Some(kind) = self.kind {
            plant.kind = kind;
        }
        if let Some(image) = &self.image {
            plant.image = Some(image.clone());
        }
        if let Some(date) = self.acquisition_date {
            plant.acquisition_date = Some(date);
        }
        if let Some(days) = self.watering_frequency {
            plant.watering_frequency = days;
        }
        if let Some(days) = self.fertilizing_frequency {
            plant.fertilizing_frequency = days;
        }
        if let Some(years) = self.repotting_frequency {
            plant.repotting_frequency = years;
        }
        if let Some(location) = self.location {
            plant.location = location;
        }
        if let Some(light) = self.light_needs {
            plant.light_needs = light;
        }
        if let Some(humidity) = self.humidity_needs {
            plant.humidity_needs = humidity;
        }
        if let Some(range) = &self.temp_range {
            plant.temp_range = range.clone();
        }
        if let Some(notes) = &self.notes {
            plant.notes = Some(notes.clone());
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}
