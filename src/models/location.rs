//! Location model for geocoded places

/// Best-match place returned by the geocoder
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    /// Place name as the geocoder spells it
    pub name: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Country name
    pub country: Option<String>,
    /// First-level administrative area (state, region, ...)
    pub admin1: Option<String>,
    /// IANA timezone, e.g. `Europe/Madrid`
    pub timezone: Option<String>,
}

impl Location {
    /// Create a new location without optional metadata
    #[must_use]
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
            country: None,
            admin1: None,
            timezone: None,
        }
    }

    /// Timezone to request forecasts in; upstream resolves `auto` itself
    #[must_use]
    pub fn forecast_timezone(&self) -> &str {
        self.timezone.as_deref().unwrap_or("auto")
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}
