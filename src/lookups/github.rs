//! GitHub user profiles

use crate::error::ServiceError;
use crate::flow::{Fetched, FlowDescriptor, FlowId, Lookup, Trigger};
use crate::html::{escape, image};
use crate::http::{ApiClient, with_segment};
use async_trait::async_trait;
use serde::Deserialize;

pub const DESCRIPTOR: FlowDescriptor = FlowDescriptor {
    id: FlowId::Github,
    title: "GitHub users",
    trigger: Trigger::Submit {
        prompt: "Enter a username.",
    },
    subject: "user",
    not_found: "User not found.",
};

#[derive(Debug, Clone, Deserialize)]
pub struct GithubUser {
    pub login: String,
    pub name: Option<String>,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub followers: u64,
    pub html_url: String,
    pub avatar_url: Option<String>,
}

impl GithubUser {
    /// Display name, falling back to the login
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.login)
    }
}

pub struct GithubLookup {
    endpoint: String,
}

impl GithubLookup {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Lookup for GithubLookup {
    type Record = GithubUser;

    // unknown users come back as 404, which surfaces as a service error
    async fn fetch(&self, api: &ApiClient, query: &str) -> Result<Fetched<GithubUser>, ServiceError> {
        let user = api.get_json(&with_segment(&self.endpoint, query), &[]).await?;
        Ok(Fetched::Found(user))
    }

    fn render(&self, user: &GithubUser) -> String {
        format!(
            r#"
        <p>User: {name}</p>
        <p>Repos: {repos}</p>
        <p>Followers: {followers}</p>
        <p><a href="{url}" target="_blank" rel="noreferrer">Profile</a></p>
        {img}
      "#,
            name = escape(user.display_name()),
            repos = user.public_repos,
            followers = user.followers,
            url = escape(&user.html_url),
            img = image(user.avatar_url.as_deref(), &user.login, 120),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn octocat(name: serde_json::Value) -> GithubUser {
        serde_json::from_value(json!({
            "login": "octocat",
            "name": name,
            "public_repos": 8,
            "followers": 4000,
            "html_url": "https://github.com/octocat",
            "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4"
        }))
        .unwrap()
    }

    #[test]
    fn test_display_name_falls_back_to_login() {
        assert_eq!(octocat(json!(null)).display_name(), "octocat");
        assert_eq!(octocat(json!("The Octocat")).display_name(), "The Octocat");
    }

    #[test]
    fn test_render_user() {
        let html = GithubLookup::new("http://unused").render(&octocat(json!("The Octocat")));
        assert!(html.contains("<p>User: The Octocat</p>"));
        assert!(html.contains("<p>Repos: 8</p>"));
        assert!(html.contains(r#"<a href="https://github.com/octocat""#));
        assert!(html.contains(r#"alt="octocat" width="120""#));
    }
}
