//! City name resolution
//!
//! Resolves free text into the single best-match `Location` using the
//! Open-Meteo geocoding search.

use crate::error::ServiceError;
use crate::http::ApiClient;
use crate::models::Location;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

/// Geocoding search response
#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
    admin1: Option<String>,
    timezone: Option<String>,
}

impl From<GeocodingResult> for Location {
    fn from(result: GeocodingResult) -> Self {
        Location {
            name: result.name,
            latitude: result.latitude,
            longitude: result.longitude,
            country: result.country,
            admin1: result.admin1,
            timezone: result.timezone,
        }
    }
}

/// Client for the geocoding search endpoint
#[derive(Debug, Clone)]
pub struct Geocoder {
    api: ApiClient,
    endpoint: String,
}

impl Geocoder {
    pub fn new(api: ApiClient, endpoint: impl Into<String>) -> Self {
        Self {
            api,
            endpoint: endpoint.into(),
        }
    }

    /// Resolve a city name to its first upstream candidate.
    ///
    /// Blank input returns `Ok(None)` without touching the network.
    #[instrument(skip(self))]
    pub async fn locate(&self, city: &str) -> Result<Option<Location>, ServiceError> {
        let name = city.trim();
        if name.is_empty() {
            return Ok(None);
        }

        let response: GeocodingResponse = self
            .api
            .get_json(
                &self.endpoint,
                &[
                    ("name", name),
                    ("count", "1"),
                    ("language", "es"),
                    ("format", "json"),
                ],
            )
            .await?;

        let Some(first) = response.results.and_then(|r| r.into_iter().next()) else {
            warn!("No results found for location '{}'", name);
            return Ok(None);
        };

        let location = Location::from(first);
        debug!(
            "Found location: {} ({})",
            location.name,
            location.format_coordinates()
        );
        Ok(Some(location))
    }
}
