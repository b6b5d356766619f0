//! REST Countries lookup by name

use crate::error::ServiceError;
use crate::flow::{Fetched, FlowDescriptor, FlowId, Lookup, Trigger};
use crate::html::{escape, image, thousands};
use crate::http::{ApiClient, with_segment};
use async_trait::async_trait;
use serde::Deserialize;

pub const DESCRIPTOR: FlowDescriptor = FlowDescriptor {
    id: FlowId::Country,
    title: "Countries",
    trigger: Trigger::Submit {
        prompt: "Enter a country name.",
    },
    subject: "country",
    not_found: "Country not found.",
};

#[derive(Debug, Clone, Deserialize)]
pub struct Country {
    pub name: CountryName,
    #[serde(default)]
    pub capital: Option<Vec<String>>,
    pub population: u64,
    pub region: String,
    #[serde(default)]
    pub flags: Option<Flags>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CountryName {
    pub common: String,
    pub official: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Flags {
    pub png: Option<String>,
    pub svg: Option<String>,
}

impl Country {
    /// PNG flag, else SVG
    #[must_use]
    pub fn flag(&self) -> Option<&str> {
        let flags = self.flags.as_ref()?;
        flags.png.as_deref().or(flags.svg.as_deref())
    }

    #[must_use]
    pub fn first_capital(&self) -> &str {
        self.capital
            .as_ref()
            .and_then(|c| c.first())
            .map_or("-", String::as_str)
    }
}

pub struct CountryLookup {
    endpoint: String,
}

impl CountryLookup {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Lookup for CountryLookup {
    type Record = Country;

    async fn fetch(&self, api: &ApiClient, query: &str) -> Result<Fetched<Country>, ServiceError> {
        let countries: Vec<Country> = api.get_json(&with_segment(&self.endpoint, query), &[]).await?;
        Ok(countries.into_iter().next().into())
    }

    fn render(&self, country: &Country) -> String {
        let common = &country.name.common;
        format!(
            r#"
        <h3>{name}</h3>
        <p>Official: {official}</p>
        <p>Region: {region}</p>
        <p>Capital: {capital}</p>
        <p>Population: {population}</p>
        {flag}
      "#,
            name = escape(common),
            official = escape(&country.name.official),
            region = escape(&country.region),
            capital = escape(country.first_capital()),
            population = thousands(country.population),
            flag = image(country.flag(), &format!("{common} flag"), 140),
        )
    }
}
