//! English dictionary definitions

use crate::error::ServiceError;
use crate::flow::{Fetched, FlowDescriptor, FlowId, Lookup, Trigger};
use crate::html::escape;
use crate::http::{ApiClient, with_segment};
use async_trait::async_trait;
use serde::Deserialize;

pub const DESCRIPTOR: FlowDescriptor = FlowDescriptor {
    id: FlowId::Dictionary,
    title: "Dictionary",
    trigger: Trigger::Submit {
        prompt: "Enter a word.",
    },
    subject: "definition",
    not_found: "No definition found.",
};

#[derive(Debug, Clone, Deserialize)]
pub struct Entry {
    pub word: String,
    #[serde(default)]
    pub meanings: Vec<Meaning>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meaning {
    #[serde(default)]
    pub part_of_speech: String,
    #[serde(default)]
    pub definitions: Vec<Sense>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sense {
    #[serde(default)]
    pub definition: String,
}

/// First definition of the first meaning of the first entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub word: String,
    pub part_of_speech: String,
    pub text: String,
}

impl Definition {
    #[must_use]
    pub fn first_of(entries: Vec<Entry>) -> Option<Self> {
        let entry = entries.into_iter().next()?;
        let meaning = entry.meanings.into_iter().next()?;
        let sense = meaning.definitions.into_iter().next()?;
        if sense.definition.is_empty() {
            return None;
        }
        Some(Self {
            word: entry.word,
            part_of_speech: meaning.part_of_speech,
            text: sense.definition,
        })
    }
}

pub struct DictionaryLookup {
    endpoint: String,
}

impl DictionaryLookup {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Lookup for DictionaryLookup {
    type Record = Definition;

    async fn fetch(&self, api: &ApiClient, query: &str) -> Result<Fetched<Definition>, ServiceError> {
        let entries: Vec<Entry> = api.get_json(&with_segment(&self.endpoint, query), &[]).await?;
        Ok(Definition::first_of(entries).into())
    }

    fn render(&self, definition: &Definition) -> String {
        format!(
            r#"
        <p>Word: {word}</p>
        <p>Type: {kind}</p>
        <p>{text}</p>
      "#,
            word = escape(&definition.word),
            kind = escape(&definition.part_of_speech),
            text = escape(&definition.text),
        )
    }
}
