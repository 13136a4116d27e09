//! Client for the plant.id v2 `identify` endpoint.

use super::{IdentifiedPlant, IdentifyError, ImagePayload, PlantIdentifier};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://api.plant.id/v2/identify";

const MODIFIERS: &[&str] = &["crops_fast", "similar_images"];
const PLANT_DETAILS: &[&str] = &["common_names", "watering"];
const DEFAULT_FERTILIZING_DAYS: u32 = 30;

#[derive(Clone)]
pub struct PlantIdClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl PlantIdClient {
    pub fn new(endpoint: &str, api_key: &str) -> Result<Self, IdentifyError> {
        if api_key.trim().is_empty() {
            return Err(IdentifyError::NotConfigured(
                "plant-id-api-key is empty".to_string(),
            ));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| IdentifyError::Network(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            api_key: api_key.trim().to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl PlantIdentifier for PlantIdClient {
    fn identify<'a>(
        &'a self,
        image: &'a ImagePayload,
    ) -> impl Future<Output = Result<IdentifiedPlant, IdentifyError>> + Send + 'a {
        async move {
            let body = IdentifyRequest {
                images: vec![image.base64()],
                modifiers: MODIFIERS,
                plant_details: PLANT_DETAILS,
            };

            tracing::debug!(endpoint = %self.endpoint, "POST identify");
            let resp = self
                .client
                .post(&self.endpoint)
                .header("Api-Key", &self.api_key)
                .json(&body)
                .send()
                .await
                .map_err(|e| IdentifyError::Network(e.to_string()))?;

            let status = resp.status();
            if !status.is_success() {
                return Err(IdentifyError::Service {
                    status: status.as_u16(),
                });
            }
            let text = resp
                .text()
                .await
                .map_err(|e| IdentifyError::Network(e.to_string()))?;
            parse_response(&text)
        }
    }
}

#[derive(Serialize)]
struct IdentifyRequest<'a> {
    images: Vec<&'a str>,
    modifiers: &'static [&'static str],
    plant_details: &'static [&'static str],
}

#[derive(Deserialize)]
struct IdentifyResponse {
    #[serde(default)]
    is_plant: Option<bool>,
    #[serde(default)]
    suggestions: Vec<Suggestion>,
}

#[derive(Deserialize)]
struct Suggestion {
    plant_name: String,
    #[serde(default)]
    probability: f32,
    #[serde(default)]
    plant_details: Option<PlantDetails>,
}

#[derive(Deserialize, Default)]
struct PlantDetails {
    #[serde(default)]
    common_names: Option<Vec<String>>,
    #[serde(default)]
    scientific_name: Option<String>,
    #[serde(default)]
    watering: Option<Watering>,
}

/// plant.id scale: 1 = dry, 2 = medium, 3 = wet.
#[derive(Deserialize)]
struct Watering {
    #[serde(default)]
    min: Option<u8>,
    #[serde(default)]
    max: Option<u8>,
}

fn watering_days(level: Option<u8>) -> u32 {
    match level {
        Some(1) => 14,
        Some(3) => 3,
        _ => 7,
    }
}

fn watering_notes(level: Option<u8>) -> &'static str {
    match level {
        Some(1) => "Let the soil dry out completely between waterings.",
        Some(3) => "Keep the soil consistently moist.",
        _ => "Water when the top layer of soil is dry.",
    }
}

/// Maps a raw service response to the most probable suggestion.
pub fn parse_response(body: &str) -> Result<IdentifiedPlant, IdentifyError> {
    let response: IdentifyResponse =
        serde_json::from_str(body).map_err(|e| IdentifyError::Parse(e.to_string()))?;

    if response.is_plant == Some(false) {
        return Err(IdentifyError::NoMatch);
    }

    let best = response
        .suggestions
        .into_iter()
        .max_by(|a, b| a.probability.total_cmp(&b.probability))
        .ok_or(IdentifyError::NoMatch)?;

    let details = best.plant_details.unwrap_or_default();
    let common_names = details.common_names.unwrap_or_default();
    let level = details.watering.and_then(|w| w.max.or(w.min));
    let species = details
        .scientific_name
        .unwrap_or_else(|| best.plant_name.clone());
    let name = common_names
        .first()
        .cloned()
        .unwrap_or_else(|| best.plant_name.clone());

    Ok(IdentifiedPlant {
        name,
        species,
        common_names,
        watering_frequency: watering_days(level),
        fertilizing_frequency: DEFAULT_FERTILIZING_DAYS,
        repotting_month: None,
        care_notes: watering_notes(level).to_string(),
        confidence: best.probability.clamp(0.0, 1.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_most_probable_suggestion() {
        let body = r#"{
            "is_plant": true,
            "suggestions": [
                {"plant_name": "Ficus lyrata", "probability": 0.12},
                {
                    "plant_name": "Monstera deliciosa",
                    "probability": 0.81,
                    "plant_details": {
                        "common_names": ["Swiss cheese plant"],
                        "scientific_name": "Monstera deliciosa",
                        "watering": {"min": 2, "max": 2}
                    }
                }
            ]
        }"#;
        let plant = parse_response(body).unwrap();
        assert_eq!(plant.name, "Swiss cheese plant");
        assert_eq!(plant.species, "Monstera deliciosa");
        assert_eq!(plant.watering_frequency, 7);
        assert_eq!(plant.fertilizing_frequency, 30);
        assert!((plant.confidence - 0.81).abs() < f32::EPSILON);
    }

    #[test]
    fn watering_levels_map_to_days() {
        let body = |level: u8| {
            format!(
                r#"{{"suggestions":[{{"plant_name":"X","probability":0.5,
                    "plant_details":{{"watering":{{"max":{}}}}}}}]}}"#,
                level
            )
        };
        assert_eq!(parse_response(&body(1)).unwrap().watering_frequency, 14);
        assert_eq!(parse_response(&body(2)).unwrap().watering_frequency, 7);
        assert_eq!(parse_response(&body(3)).unwrap().watering_frequency, 3);
    }

    #[test]
    fn falls_back_to_plant_name_without_details() {
        let plant =
            parse_response(r#"{"suggestions":[{"plant_name":"Aloe vera","probability":0.7}]}"#)
                .unwrap();
        assert_eq!(plant.name, "Aloe vera");
        assert_eq!(plant.species, "Aloe vera");
        assert!(plant.common_names.is_empty());
        assert_eq!(plant.watering_frequency, 7);
    }

    #[test]
    fn not_a_plant_is_no_match() {
        assert_eq!(
            parse_response(r#"{"is_plant": false, "suggestions": []}"#),
            Err(IdentifyError::NoMatch)
        );
        assert_eq!(
            parse_response(r#"{"suggestions": []}"#),
            Err(IdentifyError::NoMatch)
        );
    }

    #[test]
    fn malformed_body_is_parse_error() {
        assert!(matches!(
            parse_response("<html>oops</html>"),
            Err(IdentifyError::Parse(_))
        ));
    }

    #[test]
    fn empty_key_is_rejected() {
        assert!(matches!(
            PlantIdClient::new(DEFAULT_ENDPOINT, "  "),
            Err(IdentifyError::NotConfigured(_))
        ));
    }

    #[test]
    fn request_body_shape() {
        let body = IdentifyRequest {
            images: vec!["aGVsbG8="],
            modifiers: MODIFIERS,
            plant_details: PLANT_DETAILS,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["images"][0], "aGVsbG8=");
        assert_eq!(json["modifiers"][0], "crops_fast");
        assert_eq!(json["plant_details"][1], "watering");
    }
}
