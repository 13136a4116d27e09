//! Profile and theme persistence.
//!
//! Both live next to the plant list in the same backend but under their own
//! keys, so they are read and written independently of it.

use super::{StorageBackend, PROFILE_KEY, THEME_KEY};
use crate::error::{Result, SprigError};
use crate::model::UserProfile;
use crate::themes::ThemeId;

pub fn load_profile<B: StorageBackend>(backend: &B) -> Result<UserProfile> {
    match backend.load(PROFILE_KEY)? {
        Some(blob) if !blob.trim().is_empty() => {
            serde_json::from_str(&blob).map_err(SprigError::Serialization)
        }
        _ => Ok(UserProfile::default()),
    }
}

pub fn save_profile<B: StorageBackend>(backend: &B, profile: &UserProfile) -> Result<()> {
    let blob = serde_json::to_string(profile).map_err(SprigError::Serialization)?;
    backend.save(PROFILE_KEY, &blob)
}

/// Returns the stored theme. Anything unrecognised falls back to the default.
pub fn load_theme<B: StorageBackend>(backend: &B) -> Result<ThemeId> {
    let theme = backend
        .load(THEME_KEY)?
        .and_then(|raw| raw.parse::<ThemeId>().ok())
        .unwrap_or_default();
    Ok(theme)
}

pub fn save_theme<B: StorageBackend>(backend: &B, theme: ThemeId) -> Result<()> {
    backend.save(THEME_KEY, theme.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn missing_profile_is_empty() {
        let backend = MemBackend::new();
        assert_eq!(load_profile(&backend).unwrap(), UserProfile::default());
    }

    #[test]
    fn profile_round_trip() {
        let backend = MemBackend::new();
        let profile = UserProfile {
            name: "Rūta".into(),
            email: "ruta@example.com".into(),
            bio: Some("Mostly ferns".into()),
            ..UserProfile::default()
        };
        save_profile(&backend, &profile).unwrap();
        assert_eq!(load_profile(&backend).unwrap(), profile);
    }

    #[test]
    fn partial_profile_blob_fills_defaults() {
        let backend = MemBackend::with_blob(PROFILE_KEY, r#"{"name":"Jonas"}"#);
        let profile = load_profile(&backend).unwrap();
        assert_eq!(profile.name, "Jonas");
        assert!(profile.email.is_empty());
        assert!(profile.avatar.is_none());
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        let backend = MemBackend::with_blob(THEME_KEY, "neon");
        assert_eq!(load_theme(&backend).unwrap(), ThemeId::Green);
    }

    #[test]
    fn theme_is_stored_as_bare_string() {
        let backend = MemBackend::new();
        save_theme(&backend, ThemeId::Warm).unwrap();
        assert_eq!(backend.raw(THEME_KEY).as_deref(), Some("warm"));
        assert_eq!(load_theme(&backend).unwrap(), ThemeId::Warm);
    }
}
