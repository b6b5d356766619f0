//! Data models shared across flows
//!
//! - Location: geocoded place handed from the geocoder to the forecast call
//! - Forecast: Open-Meteo forecast response as the weather flow reads it

pub mod forecast;
pub mod location;

pub use forecast::ForecastResponse;
pub use location::Location;
