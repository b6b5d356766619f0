//! Harry Potter character directory

use crate::error::ServiceError;
use crate::flow::{Fetched, FlowDescriptor, FlowId, Lookup, Trigger};
use crate::html::{escape, image, or_dash};
use crate::http::ApiClient;
use async_trait::async_trait;
use serde::Deserialize;

pub const DESCRIPTOR: FlowDescriptor = FlowDescriptor {
    id: FlowId::Character,
    title: "Harry Potter characters",
    trigger: Trigger::Submit {
        prompt: "Enter a character name.",
    },
    subject: "character",
    not_found: "Character not found.",
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Character {
    pub full_name: String,
    pub nickname: String,
    pub hogwarts_house: String,
    pub interpreted_by: String,
    pub children: Vec<String>,
    pub image: String,
    pub birthdate: String,
    pub index: u32,
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// First full-name substring match, else first nickname substring match
#[must_use]
pub fn find_character<'a>(roster: &'a [Character], query: &str) -> Option<&'a Character> {
    let q = normalize(query);
    roster
        .iter()
        .find(|c| normalize(&c.full_name).contains(&q))
        .or_else(|| roster.iter().find(|c| normalize(&c.nickname).contains(&q)))
}

/// Searches the whole roster, fetched fresh on every query
pub struct CharacterLookup {
    endpoint: String,
}

impl CharacterLookup {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Lookup for CharacterLookup {
    type Record = Character;

    async fn fetch(&self, api: &ApiClient, query: &str) -> Result<Fetched<Character>, ServiceError> {
        let roster: Vec<Character> = api.get_json(&self.endpoint, &[]).await?;
        Ok(find_character(&roster, query).cloned().into())
    }

    fn render(&self, c: &Character) -> String {
        format!(
            r#"
        <h3>{name}</h3>
        <p>Nickname: {nickname}</p>
        <p>House: {house}</p>
        <p>Actor: {actor}</p>
        <p>Birthdate: {birthdate}</p>
        {img}
      "#,
            name = escape(&c.full_name),
            nickname = or_dash(Some(c.nickname.as_str())),
            house = or_dash(Some(c.hogwarts_house.as_str())),
            actor = or_dash(Some(c.interpreted_by.as_str())),
            birthdate = or_dash(Some(c.birthdate.as_str())),
            img = image(Some(c.image.as_str()), &c.full_name, 160),
        )
    }
}
