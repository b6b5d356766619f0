//! PokeAPI lookup with a prefix-search fallback
//!
//! A direct lookup by exact name is tried first. If PokeAPI answers with a
//! non-success status, the first 1000 names are listed and the first one
//! starting with the query is looked up instead.

use crate::error::ServiceError;
use crate::flow::{Fetched, FlowDescriptor, FlowId, Lookup, Trigger};
use crate::html::{escape, image};
use crate::http::{ApiClient, with_segment};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

pub const DESCRIPTOR: FlowDescriptor = FlowDescriptor {
    id: FlowId::Pokemon,
    title: "Pokemon",
    trigger: Trigger::Submit {
        prompt: "Enter a pokemon name.",
    },
    subject: "pokemon",
    not_found: "Pokemon not found.",
};

const LISTING_LIMIT: &str = "1000";

#[derive(Debug, Clone, Deserialize)]
pub struct Pokemon {
    pub name: String,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub sprites: Option<Sprites>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedResource {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sprites {
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct Listing {
    #[serde(default)]
    results: Vec<NamedResource>,
}

impl Pokemon {
    #[must_use]
    pub fn type_names(&self) -> String {
        self.types
            .iter()
            .map(|slot| slot.kind.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn sprite(&self) -> Option<&str> {
        self.sprites.as_ref()?.front_default.as_deref()
    }
}

/// First listed name starting with `prefix`, in listing order
#[must_use]
pub fn match_prefix<'a>(names: &'a [NamedResource], prefix: &str) -> Option<&'a str> {
    names
        .iter()
        .map(|entry| entry.name.as_str())
        .find(|name| name.starts_with(prefix))
}

pub struct PokemonLookup {
    endpoint: String,
}

impl PokemonLookup {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    async fn by_name(&self, api: &ApiClient, name: &str) -> Result<Pokemon, ServiceError> {
        api.get_json(&with_segment(&self.endpoint, name), &[]).await
    }
}

#[async_trait]
impl Lookup for PokemonLookup {
    type Record = Pokemon;

    async fn fetch(&self, api: &ApiClient, query: &str) -> Result<Fetched<Pokemon>, ServiceError> {
        let name = query.to_lowercase();

        match self.by_name(api, &name).await {
            Ok(pokemon) => return Ok(Fetched::Found(pokemon)),
            Err(err) if err.status().is_some() => {
                debug!(query = %name, error = %err, "Direct lookup failed, searching listing");
            }
            Err(err) => return Err(err),
        }

        let listing: Listing = api
            .get_json(&self.endpoint, &[("limit", LISTING_LIMIT)])
            .await?;
        match match_prefix(&listing.results, &name) {
            Some(found) => Ok(Fetched::Found(self.by_name(api, found).await?)),
            None => Ok(Fetched::Missing),
        }
    }

    fn render(&self, pokemon: &Pokemon) -> String {
        format!(
            r#"
        <p>Name: {name}</p>
        <p>Types: {types}</p>
        {img}
      "#,
            name = escape(&pokemon.name),
            types = escape(&pokemon.type_names()),
            img = image(pokemon.sprite(), &pokemon.name, 120),
        )
    }
}
