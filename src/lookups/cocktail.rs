//! TheCocktailDB search by name

use crate::error::ServiceError;
use crate::flow::{Fetched, FlowDescriptor, FlowId, Lookup, Trigger};
use crate::html::{escape, image};
use crate::http::ApiClient;
use async_trait::async_trait;
use serde::Deserialize;

pub const DESCRIPTOR: FlowDescriptor = FlowDescriptor {
    id: FlowId::Cocktail,
    title: "Cocktails",
    trigger: Trigger::Submit {
        prompt: "Enter a cocktail name.",
    },
    subject: "cocktail",
    not_found: "No cocktail found.",
};

/// `drinks` is `null` when nothing matched
#[derive(Debug, Clone, Deserialize)]
pub struct CocktailResponse {
    #[serde(default)]
    pub drinks: Option<Vec<Drink>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Drink {
    #[serde(rename = "strDrink")]
    pub name: String,
    #[serde(rename = "strCategory", default)]
    pub category: Option<String>,
    #[serde(rename = "strAlcoholic", default)]
    pub alcoholic: Option<String>,
    #[serde(rename = "strDrinkThumb", default)]
    pub thumbnail: Option<String>,
}

pub struct CocktailLookup {
    endpoint: String,
}

impl CocktailLookup {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Lookup for CocktailLookup {
    type Record = Drink;

    async fn fetch(&self, api: &ApiClient, query: &str) -> Result<Fetched<Drink>, ServiceError> {
        let response: CocktailResponse = api.get_json(&self.endpoint, &[("s", query)]).await?;
        Ok(response.drinks.and_then(|d| d.into_iter().next()).into())
    }

    fn render(&self, drink: &Drink) -> String {
        format!(
            r#"
        <p>Name: {name}</p>
        <p>Category: {category}</p>
        <p>Type: {kind}</p>
        {img}
      "#,
            name = escape(&drink.name),
            category = escape(drink.category.as_deref().unwrap_or_default()),
            kind = escape(drink.alcoholic.as_deref().unwrap_or_default()),
            img = image(drink.thumbnail.as_deref(), &drink.name, 140),
        )
    }
}
