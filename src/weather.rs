//! Weather search flow
//!
//! City name → geocoder → Open-Meteo forecast → temperature chart → panel.

use crate::chart::TemperatureChart;
use crate::error::ServiceError;
use crate::flow::{Flow, FlowDescriptor, FlowId, FlowOutcome, Trigger};
use crate::geocoding::Geocoder;
use crate::html::escape;
use crate::http::ApiClient;
use crate::models::{ForecastResponse, Location};
use async_trait::async_trait;
use tracing::{error, info, instrument};

/// Upstream may send more hours than one day; the chart takes at most this many
pub const HOURLY_LIMIT: usize = 24;

pub const DESCRIPTOR: FlowDescriptor = FlowDescriptor {
    id: FlowId::Weather,
    title: "Weather",
    trigger: Trigger::Submit {
        prompt: "Enter a city name.",
    },
    subject: "weather",
    not_found: "City not found.",
};

const NO_DATA: &str = "No temperature data.";

/// What one weather search produced
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherReport {
    /// The geocoder had no candidate
    UnknownCity,
    /// The forecast lacked a numeric current temperature
    NoData,
    Found {
        location: Location,
        current: f64,
        chart: Option<TemperatureChart>,
    },
}

/// Geocode-then-forecast flow
#[derive(Debug, Clone)]
pub struct WeatherFlow {
    geocoder: Geocoder,
    api: ApiClient,
    forecast_endpoint: String,
}

impl WeatherFlow {
    pub fn new(geocoder: Geocoder, api: ApiClient, forecast_endpoint: impl Into<String>) -> Self {
        Self {
            geocoder,
            api,
            forecast_endpoint: forecast_endpoint.into(),
        }
    }

    /// Resolve `city` and fetch today's forecast for it
    #[instrument(skip(self))]
    pub async fn search(&self, city: &str) -> Result<WeatherReport, ServiceError> {
        let Some(location) = self.geocoder.locate(city).await? else {
            return Ok(WeatherReport::UnknownCity);
        };

        let forecast = self.forecast(&location).await?;
        let Some(current) = forecast.current_temperature() else {
            return Ok(WeatherReport::NoData);
        };

        let times = forecast.hourly_times(HOURLY_LIMIT);
        let temps = forecast.hourly_temperatures(HOURLY_LIMIT);
        let chart = TemperatureChart::build(&times, &temps);

        info!(
            "Weather for {}: {} °C, {} hourly samples",
            location.name,
            current,
            temps.len()
        );

        Ok(WeatherReport::Found {
            location,
            current,
            chart,
        })
    }

    async fn forecast(&self, location: &Location) -> Result<ForecastResponse, ServiceError> {
        let latitude = location.latitude.to_string();
        let longitude = location.longitude.to_string();
        self.api
            .get_json(
                &self.forecast_endpoint,
                &[
                    ("latitude", latitude.as_str()),
                    ("longitude", longitude.as_str()),
                    ("current", "temperature_2m"),
                    ("timezone", location.forecast_timezone()),
                    ("hourly", "temperature_2m"),
                    ("forecast_days", "1"),
                ],
            )
            .await
    }
}

/// Summary block plus the chart when one could be drawn
#[must_use]
pub fn render(location: &Location, current: f64, chart: Option<&TemperatureChart>) -> String {
    format!(
        r#"
        <div class="weather-summary">
          <h3>{name}</h3>
          <p>Current: {current} °C</p>
        </div>
        {chart}
      "#,
        name = escape(&location.name),
        chart = chart.map(TemperatureChart::to_svg).unwrap_or_default(),
    )
}

#[async_trait]
impl Flow for WeatherFlow {
    fn descriptor(&self) -> &FlowDescriptor {
        &DESCRIPTOR
    }

    async fn run(&self, input: &str) -> FlowOutcome {
        let city = input.trim();
        if city.is_empty() {
            return FlowOutcome::Prompt("Enter a city name.");
        }

        match self.search(city).await {
            Ok(WeatherReport::UnknownCity) => FlowOutcome::NotFound(DESCRIPTOR.not_found),
            Ok(WeatherReport::NoData) => FlowOutcome::NotFound(NO_DATA),
            Ok(WeatherReport::Found {
                location,
                current,
                chart,
            }) => FlowOutcome::Rendered(render(&location, current, chart.as_ref())),
            Err(err) => {
                error!(flow = %DESCRIPTOR.id, error = %err, "Weather search failed");
                FlowOutcome::Failed(DESCRIPTOR.error_message())
            }
        }
    }
}
