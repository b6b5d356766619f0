//! Click-only flows that fetch something random: quotes, advice, cat and
//! dog facts, jokes and meals.

use crate::error::ServiceError;
use crate::flow::{Fetched, FlowDescriptor, FlowId, Lookup, Trigger};
use crate::html::{escape, image};
use crate::http::ApiClient;
use async_trait::async_trait;
use serde::Deserialize;

pub const QUOTE: FlowDescriptor = FlowDescriptor {
    id: FlowId::Quote,
    title: "Random quote",
    trigger: Trigger::Click,
    subject: "quote",
    not_found: "No quote found.",
};

pub const ADVICE: FlowDescriptor = FlowDescriptor {
    id: FlowId::Advice,
    title: "Advice",
    trigger: Trigger::Click,
    subject: "advice",
    not_found: "No advice found.",
};

pub const CAT_FACT: FlowDescriptor = FlowDescriptor {
    id: FlowId::CatFact,
    title: "Cat facts",
    trigger: Trigger::Click,
    subject: "cat fact",
    not_found: "No cat fact found.",
};

pub const DOG_FACT: FlowDescriptor = FlowDescriptor {
    id: FlowId::DogFact,
    title: "Dog facts",
    trigger: Trigger::Click,
    subject: "dog fact",
    not_found: "\"No fact\"",
};

pub const JOKE: FlowDescriptor = FlowDescriptor {
    id: FlowId::Joke,
    title: "Jokes",
    trigger: Trigger::Click,
    subject: "joke",
    not_found: "No joke found.",
};

pub const MEAL: FlowDescriptor = FlowDescriptor {
    id: FlowId::Meal,
    title: "Random meal",
    trigger: Trigger::Click,
    subject: "meal",
    not_found: "No meal found.",
};

/// Escape `text` and wrap it in literal double quotes
fn quoted(text: &str) -> String {
    format!("\"{}\"", escape(text))
}

/// Lookup against a fixed URL with no parameters
pub struct RandomLookup<T> {
    endpoint: String,
    _record: std::marker::PhantomData<fn() -> T>,
}

impl<T> RandomLookup<T> {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            _record: std::marker::PhantomData,
        }
    }
}

// quotes

#[derive(Debug, Clone, Deserialize)]
pub struct Quote {
    pub content: String,
    pub author: String,
}

#[async_trait]
impl Lookup for RandomLookup<Quote> {
    type Record = Quote;

    async fn fetch(&self, api: &ApiClient, _query: &str) -> Result<Fetched<Quote>, ServiceError> {
        Ok(Fetched::Found(api.get_json(&self.endpoint, &[]).await?))
    }

    fn render(&self, quote: &Quote) -> String {
        format!(
            r#"
        <p>{content}</p>
        <p>- {author}</p>
      "#,
            content = quoted(&quote.content),
            author = escape(&quote.author),
        )
    }
}

// advice

#[derive(Debug, Clone, Deserialize)]
pub struct AdviceResponse {
    pub slip: AdviceSlip,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdviceSlip {
    pub advice: String,
}

#[async_trait]
impl Lookup for RandomLookup<AdviceSlip> {
    type Record = AdviceSlip;

    async fn fetch(&self, api: &ApiClient, _query: &str) -> Result<Fetched<AdviceSlip>, ServiceError> {
        let response: AdviceResponse = api.get_json(&self.endpoint, &[]).await?;
        Ok(Fetched::Found(response.slip))
    }

    fn render(&self, slip: &AdviceSlip) -> String {
        quoted(&slip.advice)
    }
}

// cat facts

#[derive(Debug, Clone, Deserialize)]
pub struct CatFact {
    pub fact: String,
}

#[async_trait]
impl Lookup for RandomLookup<CatFact> {
    type Record = CatFact;

    async fn fetch(&self, api: &ApiClient, _query: &str) -> Result<Fetched<CatFact>, ServiceError> {
        Ok(Fetched::Found(api.get_json(&self.endpoint, &[]).await?))
    }

    fn render(&self, fact: &CatFact) -> String {
        quoted(&fact.fact)
    }
}

// dog facts

#[derive(Debug, Clone, Deserialize)]
pub struct DogFactResponse {
    #[serde(default)]
    pub data: Option<Vec<DogFactEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DogFactEntry {
    #[serde(default)]
    pub attributes: Option<DogFactAttributes>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DogFactAttributes {
    #[serde(default)]
    pub body: Option<String>,
}

impl DogFactResponse {
    /// Body of the first fact, if any
    #[must_use]
    pub fn into_first_body(self) -> Option<String> {
        self.data?.into_iter().next()?.attributes?.body
    }
}

/// Dog fact text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DogFact(pub String);

#[async_trait]
impl Lookup for RandomLookup<DogFact> {
    type Record = DogFact;

    async fn fetch(&self, api: &ApiClient, _query: &str) -> Result<Fetched<DogFact>, ServiceError> {
        let response: DogFactResponse = api.get_json(&self.endpoint, &[("limit", "1")]).await?;
        Ok(response.into_first_body().map(DogFact).into())
    }

    fn render(&self, fact: &DogFact) -> String {
        quoted(&fact.0)
    }
}

// jokes

#[derive(Debug, Clone, Deserialize)]
pub struct Joke {
    pub setup: String,
    pub punchline: String,
}

#[async_trait]
impl Lookup for RandomLookup<Joke> {
    type Record = Joke;

    async fn fetch(&self, api: &ApiClient, _query: &str) -> Result<Fetched<Joke>, ServiceError> {
        Ok(Fetched::Found(api.get_json(&self.endpoint, &[]).await?))
    }

    fn render(&self, joke: &Joke) -> String {
        format!(
            r#"
      <p>{}</p>
      <p>{}</p>
    "#,
            escape(&joke.setup),
            escape(&joke.punchline)
        )
    }
}

// meals

#[derive(Debug, Clone, Deserialize)]
pub struct MealResponse {
    #[serde(default)]
    pub meals: Option<Vec<Meal>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Meal {
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strCategory", default)]
    pub category: Option<String>,
    #[serde(rename = "strArea", default)]
    pub area: Option<String>,
    #[serde(rename = "strMealThumb", default)]
    pub thumbnail: Option<String>,
}

#[async_trait]
impl Lookup for RandomLookup<Meal> {
    type Record = Meal;

    async fn fetch(&self, api: &ApiClient, _query: &str) -> Result<Fetched<Meal>, ServiceError> {
        let response: MealResponse = api.get_json(&self.endpoint, &[]).await?;
        Ok(response.meals.and_then(|m| m.into_iter().next()).into())
    }

    fn render(&self, meal: &Meal) -> String {
        format!(
            r#"
      <p>{name}</p>
      <p>{category} · {area}</p>
      {img}
    "#,
            name = escape(&meal.name),
            category = escape(meal.category.as_deref().unwrap_or_default()),
            area = escape(meal.area.as_deref().unwrap_or_default()),
            img = image(meal.thumbnail.as_deref(), &meal.name, 160),
        )
    }
}
