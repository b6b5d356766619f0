//! `apiboard` - a local dashboard wiring search forms and buttons to public
//! REST APIs
//!
//! Every interaction is a [`flow::Flow`]: validate the input, call one or two
//! upstream services, render an HTML fragment into that flow's [`panel::Panel`].
//! The weather flow additionally draws an SVG temperature chart.

pub mod api;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod flow;
pub mod geocoding;
pub mod html;
pub mod http;
pub mod logging;
pub mod lookups;
pub mod models;
pub mod panel;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use chart::TemperatureChart;
pub use config::ApiboardConfig;
pub use dashboard::Dashboard;
pub use error::{ApiboardError, ServiceError};
pub use flow::{Fetched, Flow, FlowDescriptor, FlowId, FlowOutcome, Lookup, LookupFlow};
pub use http::ApiClient;
pub use models::Location;
pub use panel::Panel;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
