//! Age estimate for a first name (agify)

use crate::error::ServiceError;
use crate::flow::{Fetched, FlowDescriptor, FlowId, Lookup, Trigger};
use crate::html::escape;
use crate::http::ApiClient;
use async_trait::async_trait;
use serde::Deserialize;

pub const DESCRIPTOR: FlowDescriptor = FlowDescriptor {
    id: FlowId::Age,
    title: "Age prediction",
    trigger: Trigger::Submit {
        prompt: "Enter a name.",
    },
    subject: "age",
    not_found: "No age estimate.",
};

#[derive(Debug, Clone, Deserialize)]
pub struct AgeEstimate {
    pub name: String,
    /// `null` when upstream has no data for the name
    pub age: Option<u32>,
    #[serde(default)]
    pub count: u64,
}

pub struct AgeLookup {
    endpoint: String,
}

impl AgeLookup {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Lookup for AgeLookup {
    type Record = AgeEstimate;

    async fn fetch(&self, api: &ApiClient, query: &str) -> Result<Fetched<AgeEstimate>, ServiceError> {
        let estimate = api.get_json(&self.endpoint, &[("name", query)]).await?;
        Ok(Fetched::Found(estimate))
    }

    fn render(&self, estimate: &AgeEstimate) -> String {
        let age = estimate
            .age
            .map_or_else(|| "Unknown".to_string(), |age| age.to_string());
        format!(
            r#"
        <p>Name: {name}</p>
        <p>Age: {age}</p>
        <p>Count: {count}</p>
      "#,
            name = escape(&estimate.name),
            count = estimate.count,
        )
    }
}
