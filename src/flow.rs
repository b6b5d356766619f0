//! Flow abstraction
//!
//! A flow is one input → fetch → render interaction bound to a single panel.
//! Integrations implement [`Lookup`] (fetch + render) and get the shared
//! state machine from [`LookupFlow`]: blank input prompts, upstream failures
//! are logged and reduced to a fixed message, missing records show the
//! integration's "not found" text.

use crate::error::ServiceError;
use crate::html::escape;
use crate::http::ApiClient;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{error, info};

/// Every flow on the dashboard, in page order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlowId {
    Weather,
    Character,
    Quote,
    Country,
    Advice,
    CatFact,
    DogFact,
    Joke,
    Meal,
    Age,
    Dictionary,
    Pokemon,
    Cocktail,
    Github,
}

impl FlowId {
    pub const ALL: [FlowId; 14] = [
        FlowId::Weather,
        FlowId::Character,
        FlowId::Quote,
        FlowId::Country,
        FlowId::Advice,
        FlowId::CatFact,
        FlowId::DogFact,
        FlowId::Joke,
        FlowId::Meal,
        FlowId::Age,
        FlowId::Dictionary,
        FlowId::Pokemon,
        FlowId::Cocktail,
        FlowId::Github,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowId::Weather => "weather",
            FlowId::Character => "character",
            FlowId::Quote => "quote",
            FlowId::Country => "country",
            FlowId::Advice => "advice",
            FlowId::CatFact => "cat-fact",
            FlowId::DogFact => "dog-fact",
            FlowId::Joke => "joke",
            FlowId::Meal => "meal",
            FlowId::Age => "age",
            FlowId::Dictionary => "dictionary",
            FlowId::Pokemon => "pokemon",
            FlowId::Cocktail => "cocktail",
            FlowId::Github => "github",
        }
    }
}

impl fmt::Display for FlowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlowId {
    type Err = crate::ApiboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FlowId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| crate::ApiboardError::validation(format!("unknown flow '{s}'")))
    }
}

/// What starts a flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Trigger {
    /// Button press, no input
    Click,
    /// Form submission; `prompt` is shown when the input is blank
    Submit { prompt: &'static str },
}

/// Static description of one flow
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FlowDescriptor {
    pub id: FlowId,
    /// Panel heading on the page
    pub title: &'static str,
    pub trigger: Trigger,
    /// Completes "Error fetching {subject}."
    #[serde(skip)]
    pub subject: &'static str,
    /// Shown when the upstream answered but had no matching record
    #[serde(skip)]
    pub not_found: &'static str,
}

impl FlowDescriptor {
    /// Fixed message shown for any upstream failure
    #[must_use]
    pub fn error_message(&self) -> String {
        format!("Error fetching {}.", self.subject)
    }
}

/// Terminal state of one flow run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    /// Input was blank; no request was made
    Prompt(&'static str),
    /// Upstream answered without the record we wanted
    NotFound(&'static str),
    /// Upstream failed; the cause went to the log
    Failed(String),
    /// Rendered markup
    Rendered(String),
}

impl FlowOutcome {
    /// Panel markup; status messages are plain escaped text
    #[must_use]
    pub fn into_html(self) -> String {
        match self {
            FlowOutcome::Prompt(msg) | FlowOutcome::NotFound(msg) => escape(msg),
            FlowOutcome::Failed(msg) => escape(&msg),
            FlowOutcome::Rendered(html) => html,
        }
    }
}

/// Tagged result of an integration's fetch step
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    Found(T),
    Missing,
}

impl<T> From<Option<T>> for Fetched<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(record) => Fetched::Found(record),
            None => Fetched::Missing,
        }
    }
}

/// A runnable flow, type-erased for the dashboard table
#[async_trait]
pub trait Flow: Send + Sync {
    fn descriptor(&self) -> &FlowDescriptor;

    async fn run(&self, input: &str) -> FlowOutcome;
}

/// One upstream integration: how to fetch its record and how to show it
#[async_trait]
pub trait Lookup: Send + Sync + 'static {
    type Record: Send;

    /// Query the upstream. `query` is already trimmed, and empty only for
    /// click flows.
    async fn fetch(&self, api: &ApiClient, query: &str)
    -> Result<Fetched<Self::Record>, ServiceError>;

    fn render(&self, record: &Self::Record) -> String;
}

/// Shared runner for every [`Lookup`]
pub struct LookupFlow<L> {
    descriptor: FlowDescriptor,
    api: ApiClient,
    lookup: L,
}

impl<L: Lookup> LookupFlow<L> {
    pub fn new(descriptor: FlowDescriptor, api: ApiClient, lookup: L) -> Self {
        Self {
            descriptor,
            api,
            lookup,
        }
    }
}

#[async_trait]
impl<L: Lookup> Flow for LookupFlow<L> {
    fn descriptor(&self) -> &FlowDescriptor {
        &self.descriptor
    }

    async fn run(&self, input: &str) -> FlowOutcome {
        let query = input.trim();
        if let Trigger::Submit { prompt } = self.descriptor.trigger {
            if query.is_empty() {
                return FlowOutcome::Prompt(prompt);
            }
        }

        info!(flow = %self.descriptor.id, query, "Running lookup");
        match self.lookup.fetch(&self.api, query).await {
            Ok(Fetched::Found(record)) => FlowOutcome::Rendered(self.lookup.render(&record)),
            Ok(Fetched::Missing) => FlowOutcome::NotFound(self.descriptor.not_found),
            Err(err) => {
                error!(flow = %self.descriptor.id, error = %err, "Lookup failed");
                FlowOutcome::Failed(self.descriptor.error_message())
            }
        }
    }
}
