//! Open-Meteo forecast response
//!
//! Fields are kept as raw JSON so shape checks happen here, at the boundary,
//! instead of failing the whole body on one odd value.

use serde::Deserialize;
use serde_json::Value;

/// Forecast body for `current=temperature_2m&hourly=temperature_2m`
#[derive(Debug, Default, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub current: Option<CurrentData>,
    #[serde(default)]
    pub hourly: Option<HourlyData>,
}

/// Current conditions block
#[derive(Debug, Default, Deserialize)]
pub struct CurrentData {
    #[serde(rename = "temperature_2m", default)]
    pub temperature: Option<Value>,
}

/// Hourly series block
#[derive(Debug, Default, Deserialize)]
pub struct HourlyData {
    #[serde(default)]
    pub time: Option<Value>,
    #[serde(rename = "temperature_2m", default)]
    pub temperature: Option<Value>,
}

impl ForecastResponse {
    /// Current temperature, only when upstream sent a JSON number
    #[must_use]
    pub fn current_temperature(&self) -> Option<f64> {
        self.current
            .as_ref()
            .and_then(|c| c.temperature.as_ref())
            .and_then(Value::as_f64)
    }

    /// First `limit` hourly timestamps; a missing or non-array field is empty
    #[must_use]
    pub fn hourly_times(&self, limit: usize) -> Vec<String> {
        self.hourly_array(|h| h.time.as_ref())
            .iter()
            .take(limit)
            .map(|v| v.as_str().unwrap_or_default().to_string())
            .collect()
    }

    /// First `limit` hourly temperatures; `null` and non-numbers become NaN
    #[must_use]
    pub fn hourly_temperatures(&self, limit: usize) -> Vec<f64> {
        self.hourly_array(|h| h.temperature.as_ref())
            .iter()
            .take(limit)
            .map(|v| v.as_f64().unwrap_or(f64::NAN))
            .collect()
    }

    fn hourly_array<'a>(&'a self, field: impl Fn(&'a HourlyData) -> Option<&'a Value>) -> &'a [Value] {
        self.hourly
            .as_ref()
            .and_then(field)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
