//! Flow table behind the page: one flow and one panel per [`FlowId`]

use crate::config::ApiboardConfig;
use crate::flow::{Flow, FlowDescriptor, FlowId};
use crate::geocoding::Geocoder;
use crate::http::ApiClient;
use crate::lookups;
use crate::panel::Panel;
use crate::weather::WeatherFlow;
use anyhow::Result;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// A flow bound to its result container
pub struct FlowContext {
    pub flow: Arc<dyn Flow>,
    pub panel: Panel,
}

pub struct Dashboard {
    contexts: BTreeMap<FlowId, FlowContext>,
}

impl Dashboard {
    /// Build every flow against the configured endpoints with one shared client
    pub fn from_config(config: &ApiboardConfig) -> Result<Self> {
        let api = ApiClient::new(&config.http)?;
        let endpoints = &config.endpoints;

        let weather = WeatherFlow::new(
            Geocoder::new(api.clone(), &endpoints.geocoding),
            api.clone(),
            &endpoints.forecast,
        );

        let mut flows: Vec<Arc<dyn Flow>> = vec![Arc::new(weather)];
        flows.extend(lookups::build_all(&api, endpoints));

        let dashboard = Self::from_flows(flows);
        info!("Dashboard ready with {} flows", dashboard.contexts.len());
        Ok(dashboard)
    }

    /// Later flows with the same id replace earlier ones
    #[must_use]
    pub fn from_flows(flows: impl IntoIterator<Item = Arc<dyn Flow>>) -> Self {
        let contexts = flows
            .into_iter()
            .map(|flow| {
                let id = flow.descriptor().id;
                (
                    id,
                    FlowContext {
                        flow,
                        panel: Panel::new(),
                    },
                )
            })
            .collect();
        Self { contexts }
    }

    /// Run one flow into its panel.
    ///
    /// Returns the rendered fragment, or `None` when the flow is unknown or a
    /// newer request on the same panel superseded this one.
    pub async fn trigger(&self, id: FlowId, input: &str) -> Option<String> {
        let context = self.contexts.get(&id)?;
        let token = context.panel.begin().await;

        let html = context.flow.run(input).await.into_html();

        if context.panel.complete(token, html.clone()).await {
            Some(html)
        } else {
            debug!(flow = %id, "Result superseded by a newer request");
            None
        }
    }

    #[must_use]
    pub fn contains(&self, id: FlowId) -> bool {
        self.contexts.contains_key(&id)
    }

    pub fn panel(&self, id: FlowId) -> Option<&Panel> {
        self.contexts.get(&id).map(|context| &context.panel)
    }

    /// Descriptors in page order
    pub fn flows(&self) -> impl Iterator<Item = &FlowDescriptor> {
        self.contexts.values().map(|context| context.flow.descriptor())
    }
}
