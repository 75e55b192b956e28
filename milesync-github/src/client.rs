//! Blocking GitHub REST client.
//!
//! Every request carries the bearer token plus the headers GitHub requires.
//! List endpoints are fetched page by page until a short page is returned.

use std::time::Duration;

use chrono::DateTime;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use milesync_core::{LabelSpec, MilestoneSpec, MilestoneState, RepoName};

use crate::error::ForgeError;
use crate::forge::Forge;
use crate::types::{LiveLabel, LiveMilestone, RateLimit, RepoHandle};

/// GitHub API base URL.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Environment variable holding the access token.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Environment variable overriding [`GITHUB_API_BASE`].
pub const API_URL_ENV: &str = "GITHUB_API_URL";

const API_VERSION: &str = "2022-11-28";
const PER_PAGE: usize = 100;
const TIMEOUT: Duration = Duration::from_secs(30);

/// A [`Forge`] backed by the GitHub REST API.
pub struct GitHubClient {
    agent: ureq::Agent,
    base_url: String,
    token: String,
}

impl GitHubClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(TIMEOUT)
            .user_agent(concat!("milesync/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// Build from `$GITHUB_TOKEN` and, if set, `$GITHUB_API_URL`.
    pub fn from_env() -> Result<Self, ForgeError> {
        let token = std::env::var(TOKEN_ENV)
            .ok()
            .filter(|t| !t.is_empty())
            .ok_or(ForgeError::MissingToken(TOKEN_ENV))?;
        let base_url = std::env::var(API_URL_ENV)
            .ok()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| GITHUB_API_BASE.to_string());
        Ok(Self::new(base_url, token))
    }

    fn request(&self, method: &str, path: &str) -> ureq::Request {
        let url = format!("{}{}", self.base_url, path);
        tracing::trace!(method, url = %url, "github request");
        self.agent
            .request(method, &url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("Accept", "application/vnd.github+json")
            .set("X-GitHub-Api-Version", API_VERSION)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ForgeError> {
        let resp = self.request("GET", path).call()?;
        resp.into_json()
            .map_err(|e| ForgeError::Decode(e.to_string()))
    }

    /// Fetch every page of a list endpoint.
    fn get_all<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, ForgeError> {
        let per_page = PER_PAGE.to_string();
        let mut items = Vec::new();
        let mut page = 1usize;
        loop {
            let page_str = page.to_string();
            let mut req = self
                .request("GET", path)
                .query("per_page", &per_page)
                .query("page", &page_str);
            for (k, v) in query {
                req = req.query(k, v);
            }
            let batch: Vec<T> = req
                .call()?
                .into_json()
                .map_err(|e| ForgeError::Decode(e.to_string()))?;
            let short = batch.len() < PER_PAGE;
            items.extend(batch);
            if short {
                return Ok(items);
            }
            page += 1;
        }
    }

    fn send(&self, method: &str, path: &str, body: serde_json::Value) -> Result<(), ForgeError> {
        self.request(method, path).send_json(body)?;
        Ok(())
    }

    fn delete(&self, path: &str) -> Result<(), ForgeError> {
        self.request("DELETE", path).call()?;
        Ok(())
    }
}

fn label_path(repo: &RepoHandle, name: &str) -> String {
    format!(
        "/repos/{}/labels/{}",
        repo.full_name,
        urlencoding::encode(name)
    )
}

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct WireMilestone {
    number: u64,
    title: String,
    state: String,
    description: Option<String>,
}

impl TryFrom<WireMilestone> for LiveMilestone {
    type Error = ForgeError;

    fn try_from(wire: WireMilestone) -> Result<Self, Self::Error> {
        let state = MilestoneState::parse(&wire.state).ok_or_else(|| {
            ForgeError::Decode(format!(
                "milestone '{}' has unknown state '{}'",
                wire.title, wire.state
            ))
        })?;
        Ok(LiveMilestone {
            number: wire.number,
            title: wire.title,
            state,
            description: wire.description.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct WireLabel {
    name: String,
    color: String,
    description: Option<String>,
}

impl From<WireLabel> for LiveLabel {
    fn from(wire: WireLabel) -> Self {
        LiveLabel {
            name: wire.name,
            color: wire.color.to_ascii_lowercase(),
            description: wire.description.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireRateLimit {
    rate: WireRate,
}

#[derive(Debug, Deserialize)]
struct WireRate {
    limit: u64,
    remaining: u64,
    #[serde(default)]
    reset: Option<i64>,
}

// ---------------------------------------------------------------------------
// Forge impl
// ---------------------------------------------------------------------------

impl Forge for GitHubClient {
    fn resolve_repository(&self, repo: &RepoName) -> Result<RepoHandle, ForgeError> {
        self.get_json(&format!("/repos/{}/{}", repo.owner(), repo.name()))
    }

    fn list_milestones(&self, repo: &RepoHandle) -> Result<Vec<LiveMilestone>, ForgeError> {
        let wire: Vec<WireMilestone> = self.get_all(
            &format!("/repos/{}/milestones", repo.full_name),
            &[("state", "all")],
        )?;
        wire.into_iter().map(LiveMilestone::try_from).collect()
    }

    fn create_milestone(&self, repo: &RepoHandle, spec: &MilestoneSpec) -> Result<(), ForgeError> {
        self.send(
            "POST",
            &format!("/repos/{}/milestones", repo.full_name),
            json!({
                "title": spec.title,
                "state": spec.state.as_str(),
                "description": spec.description,
            }),
        )
    }

    fn update_milestone(
        &self,
        repo: &RepoHandle,
        number: u64,
        spec: &MilestoneSpec,
    ) -> Result<(), ForgeError> {
        self.send(
            "PATCH",
            &format!("/repos/{}/milestones/{number}", repo.full_name),
            json!({
                "state": spec.state.as_str(),
                "description": spec.description,
            }),
        )
    }

    fn delete_milestone(&self, repo: &RepoHandle, number: u64) -> Result<(), ForgeError> {
        self.delete(&format!("/repos/{}/milestones/{number}", repo.full_name))
    }

    fn list_labels(&self, repo: &RepoHandle) -> Result<Vec<LiveLabel>, ForgeError> {
        let wire: Vec<WireLabel> =
            self.get_all(&format!("/repos/{}/labels", repo.full_name), &[])?;
        Ok(wire.into_iter().map(LiveLabel::from).collect())
    }

    fn create_label(&self, repo: &RepoHandle, spec: &LabelSpec) -> Result<(), ForgeError> {
        self.send(
            "POST",
            &format!("/repos/{}/labels", repo.full_name),
            json!({
                "name": spec.name,
                "color": spec.color,
                "description": spec.description,
            }),
        )
    }

    fn update_label(
        &self,
        repo: &RepoHandle,
        current_name: &str,
        spec: &LabelSpec,
    ) -> Result<(), ForgeError> {
        self.send(
            "PATCH",
            &label_path(repo, current_name),
            json!({
                "new_name": spec.name,
                "color": spec.color,
                "description": spec.description,
            }),
        )
    }

    fn delete_label(&self, repo: &RepoHandle, name: &str) -> Result<(), ForgeError> {
        self.delete(&label_path(repo, name))
    }

    fn rate_limit(&self) -> Result<RateLimit, ForgeError> {
        let wire: WireRateLimit = self.get_json("/rate_limit")?;
        Ok(RateLimit {
            limit: wire.rate.limit,
            remaining: wire.rate.remaining,
            reset: wire
                .rate
                .reset
                .and_then(|secs| DateTime::from_timestamp(secs, 0)),
        })
    }
}
