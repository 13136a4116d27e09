//! # Plant identification
//!
//! Identification takes an image and proposes a species with suggested care
//! frequencies. It is the only asynchronous part of sprig.
//!
//! Two implementations sit behind [`PlantIdentifier`]:
//!
//! - [`catalog::CatalogIdentifier`]: a fixed catalog of common houseplants,
//!   picked at random after a short delay. Useful offline and in tests.
//! - [`plant_id::PlantIdClient`]: calls the plant.id HTTP service.
//!
//! Which one is used is decided by [`IdentifierKind`] in the configuration,
//! see [`Identifier::from_config`].

pub mod catalog;
pub mod plant_id;

use crate::config::SprigConfig;
use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// A proposed identification, with care suggestions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifiedPlant {
    pub name: String,
    pub species: String,
    #[serde(default)]
    pub common_names: Vec<String>,
    pub watering_frequency: u32,
    pub fertilizing_frequency: u32,
    /// Best calendar month (1-12) for repotting, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repotting_month: Option<u32>,
    #[serde(default)]
    pub care_notes: String,
    /// 0.0 to 1.0
    pub confidence: f32,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifyError {
    #[error("invalid image: {0}")]
    InvalidImage(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("identification service returned HTTP {status}")]
    Service { status: u16 },

    #[error("unreadable identification response: {0}")]
    Parse(String),

    #[error("no plant recognised in the image")]
    NoMatch,

    #[error("identifier not configured: {0}")]
    NotConfigured(String),
}

impl IdentifyError {
    /// Short text suitable for a notification.
    pub fn user_message(&self) -> String {
        match self {
            IdentifyError::InvalidImage(_) => {
                "That image could not be read. Try a different photo.".to_string()
            }
            IdentifyError::Network(_) | IdentifyError::Service { .. } | IdentifyError::Parse(_) => {
                "Could not identify the plant. Please try again.".to_string()
            }
            IdentifyError::NoMatch => {
                "No plant was recognised in that photo. Try a closer shot.".to_string()
            }
            IdentifyError::NotConfigured(what) => {
                format!("Identification is not set up: {}", what)
            }
        }
    }
}

/// Image data as handed to an identifier: either a `data:` URL or bare
/// base64.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload(String);

impl ImagePayload {
    pub fn new(raw: impl Into<String>) -> Result<Self, IdentifyError> {
        let raw = raw.into().trim().to_string();
        if raw.is_empty() {
            return Err(IdentifyError::InvalidImage("empty image".to_string()));
        }
        let payload = Self(raw);
        if payload.base64().is_empty() {
            return Err(IdentifyError::InvalidImage("no image data".to_string()));
        }
        B64.decode(payload.base64())
            .map_err(|e| IdentifyError::InvalidImage(e.to_string()))?;
        Ok(payload)
    }

    /// Reads an image file and encodes it as a data URL.
    pub fn from_file(path: &Path) -> Result<Self, IdentifyError> {
        let media_type = media_type_for(path).ok_or_else(|| {
            IdentifyError::InvalidImage(format!("unsupported image type: {}", path.display()))
        })?;
        let bytes = std::fs::read(path)
            .map_err(|e| IdentifyError::InvalidImage(format!("{}: {}", path.display(), e)))?;
        if bytes.is_empty() {
            return Err(IdentifyError::InvalidImage(format!(
                "{} is empty",
                path.display()
            )));
        }
        Ok(Self(format!(
            "data:{};base64,{}",
            media_type,
            B64.encode(bytes)
        )))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The base64 body, without any `data:...;base64,` prefix.
    pub fn base64(&self) -> &str {
        if self.0.starts_with("data:") {
            self.0.split_once(',').map(|(_, body)| body).unwrap_or("")
        } else {
            &self.0
        }
    }

    pub fn media_type(&self) -> Option<&str> {
        let header = self.0.strip_prefix("data:")?.split_once(',')?.0;
        header.split(';').next().filter(|m| !m.is_empty())
    }
}

fn media_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "heic" => Some("image/heic"),
        _ => None,
    }
}

/// Capability to identify a plant from an image.
pub trait PlantIdentifier {
    fn identify<'a>(
        &'a self,
        image: &'a ImagePayload,
    ) -> impl Future<Output = Result<IdentifiedPlant, IdentifyError>> + Send + 'a;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierKind {
    #[default]
    Catalog,
    PlantId,
}

impl IdentifierKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierKind::Catalog => "catalog",
            IdentifierKind::PlantId => "plant_id",
        }
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdentifierKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "catalog" => Ok(IdentifierKind::Catalog),
            "plant_id" | "plantid" => Ok(IdentifierKind::PlantId),
            other => Err(format!(
                "unknown identifier '{}' (expected catalog or plant_id)",
                other
            )),
        }
    }
}

/// The identifier selected by configuration.
pub enum Identifier {
    Catalog(catalog::CatalogIdentifier),
    PlantId(plant_id::PlantIdClient),
}

impl Identifier {
    pub fn from_config(config: &SprigConfig) -> Result<Self, IdentifyError> {
        match config.identifier {
            IdentifierKind::Catalog => Ok(Identifier::Catalog(
                catalog::CatalogIdentifier::new(Duration::from_millis(config.lookup_delay_ms)),
            )),
            IdentifierKind::PlantId => {
                let key = config.plant_id_api_key.as_deref().ok_or_else(|| {
                    IdentifyError::NotConfigured(
                        "set plant-id-api-key with `sprig config plant-id-api-key <key>`"
                            .to_string(),
                    )
                })?;
                Ok(Identifier::PlantId(plant_id::PlantIdClient::new(
                    &config.plant_id_endpoint,
                    key,
                )?))
            }
        }
    }

    pub fn kind(&self) -> IdentifierKind {
        match self {
            Identifier::Catalog(_) => IdentifierKind::Catalog,
            Identifier::PlantId(_) => IdentifierKind::PlantId,
        }
    }
}

impl PlantIdentifier for Identifier {
    fn identify<'a>(
        &'a self,
        image: &'a ImagePayload,
    ) -> impl Future<Output = Result<IdentifiedPlant, IdentifyError>> + Send + 'a {
        async move {
            tracing::debug!(identifier = %self.kind(), "identifying plant");
            let result = match self {
                Identifier::Catalog(inner) => inner.identify(image).await,
                Identifier::PlantId(inner) => inner.identify(image).await,
            };
            if let Err(e) = &result {
                tracing::warn!(error = %e, "identification failed");
            }
            result
        }
    }
}
