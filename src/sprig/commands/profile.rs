use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::CareAction;
use crate::schedule::classify_tasks;
use crate::store::plant_store::PlantStore;
use crate::store::prefs::{load_profile, save_profile};
use crate::store::StorageBackend;
use chrono::{DateTime, Utc};

/// Counters shown next to the profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfileStats {
    pub plants: usize,
    pub waterings: usize,
    /// Tasks due now or earlier.
    pub open_tasks: usize,
}

/// Field edits for the profile. `Some("")` clears an optional field.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.location.is_none()
            && self.avatar.is_none()
            && self.bio.is_none()
    }
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

pub fn stats<B: StorageBackend>(store: &PlantStore<B>, now: DateTime<Utc>) -> Result<ProfileStats> {
    let plants = store.list()?;
    Ok(ProfileStats {
        plants: plants.len(),
        waterings: plants
            .iter()
            .map(|p| p.count_actions(CareAction::Water))
            .sum(),
        open_tasks: classify_tasks(&plants, now)
            .iter()
            .filter(|t| t.overdue)
            .count(),
    })
}

pub fn show<B: StorageBackend>(store: &PlantStore<B>, now: DateTime<Utc>) -> Result<CmdResult> {
    let profile = load_profile(store.backend())?;
    Ok(CmdResult::default()
        .with_profile(profile)
        .with_stats(stats(store, now)?))
}

pub fn update<B: StorageBackend>(
    store: &PlantStore<B>,
    changes: ProfileUpdate,
    now: DateTime<Utc>,
) -> Result<CmdResult> {
    if changes.is_empty() {
        let mut result = show(store, now)?;
        result.add_message(CmdMessage::warning("Nothing to update"));
        return Ok(result);
    }

    let mut profile = load_profile(store.backend())?;
    if let Some(name) = changes.name {
        profile.name = name.trim().to_string();
    }
    if let Some(email) = changes.email {
        profile.email = email.trim().to_string();
    }
    if let Some(phone) = changes.phone {
        profile.phone = phone.trim().to_string();
    }
    if let Some(location) = changes.location {
        profile.location = location.trim().to_string();
    }
    if let Some(avatar) = changes.avatar {
        profile.avatar = optional(&avatar);
    }
    if let Some(bio) = changes.bio {
        profile.bio = optional(&bio);
    }
    save_profile(store.backend(), &profile)?;
    tracing::debug!("profile saved");

    let mut result = CmdResult::default()
        .with_profile(profile)
        .with_stats(stats(store, now)?);
    result.add_message(CmdMessage::success("Profile updated"));
    Ok(result)
}
