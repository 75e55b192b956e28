//! Config file loading and validation.
//!
//! # File format
//!
//! ```text
//! [
//!   {
//!     "Repositories": ["owner/name", ...],
//!     "Milestones": [{ "Title": "v1", "State": "open", "Description": "..." }],
//!     "Labels": [{ "Name": "bug", "Color": "d73a4a", "Repos": ["owner/name"] }],
//!     "DeleteUnknownMilestones": true,
//!     "ExcludeMilestoneDeletion": ["backlog"]
//!   }
//! ]
//! ```
//!
//! Field names match case-insensitively and ignore `_` / `-`, so
//! `DeleteUnknownLabels`, `deleteUnknownLabels` and `delete_unknown_labels`
//! all name the same field. The whole file is validated before anything is
//! returned: a bad state, color or repository, or a duplicate key, fails the load.
//!
//! # API pattern
//!
//! - `load_at(path)` — explicit path; used in tests with `TempDir`
//! - `load()` — resolves the path via [`resolve_path`], delegates to `load_at`

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{io_err, ConfigError};
use crate::types::{Config, LabelSpec, MilestoneSpec, MilestoneState, RepoName};

/// Environment variable naming the config file.
pub const CONFIG_FILE_ENV: &str = "CONFIG_FILE";

/// Fallback config file, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

// ---------------------------------------------------------------------------
// 1. Path resolution
// ---------------------------------------------------------------------------

/// Resolve the config path: `explicit` > `$CONFIG_FILE` > `config.json`.
pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    match std::env::var_os(CONFIG_FILE_ENV) {
        Some(value) if !value.is_empty() => PathBuf::from(value),
        _ => PathBuf::from(DEFAULT_CONFIG_FILE),
    }
}

// ---------------------------------------------------------------------------
// 2. Load
// ---------------------------------------------------------------------------

/// Load and validate every config entry in the file at `path`.
///
/// Returns `ConfigError::NotFound` if absent, `ConfigError::Parse` (with path
/// and line context) if malformed, or a validation variant.
pub fn load_at(path: &Path) -> Result<Vec<Config>, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    parse_str(path, &contents)
}

/// Parse and validate a config document. `path` is only used for error context.
pub fn parse_str(path: &Path, contents: &str) -> Result<Vec<Config>, ConfigError> {
    let parse_err = |source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    };
    let value: Value = serde_json::from_str(contents).map_err(parse_err)?;
    let raw: Vec<RawConfig> = serde_json::from_value(normalize_keys(value)).map_err(parse_err)?;
    raw.into_iter().map(Config::try_from).collect()
}

// ---------------------------------------------------------------------------
// 3. Raw document shape
// ---------------------------------------------------------------------------

// Keys are compared after `normalize_key`, hence the flattened renames.

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    repositories: Option<Vec<String>>,
    #[serde(default)]
    milestones: Option<Vec<RawMilestone>>,
    #[serde(default)]
    labels: Option<Vec<RawLabel>>,
    #[serde(default, rename = "excludefrommilestonesync")]
    exclude_from_milestone_sync: Option<Vec<String>>,
    #[serde(default, rename = "excludefromlabelsync")]
    exclude_from_label_sync: Option<Vec<String>>,
    #[serde(default, rename = "excludemilestonedeletion")]
    exclude_milestone_deletion: Option<Vec<String>>,
    #[serde(default, rename = "excludelabeldeletion")]
    exclude_label_deletion: Option<Vec<String>>,
    #[serde(default, rename = "deleteunknownmilestones")]
    delete_unknown_milestones: Option<bool>,
    #[serde(default, rename = "deleteunknownlabels")]
    delete_unknown_labels: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawMilestone {
    title: String,
    state: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    repos: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct RawLabel {
    name: String,
    color: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    repos: Option<Vec<String>>,
}

fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Rewrite every object key in `value` (recursively) with [`normalize_key`].
fn normalize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (normalize_key(&k), normalize_keys(v)))
                .collect::<Map<_, _>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_keys).collect()),
        other => other,
    }
}

// ---------------------------------------------------------------------------
// 4. Validation
// ---------------------------------------------------------------------------

impl TryFrom<RawConfig> for Config {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let mut titles = HashSet::new();
        let milestones = raw
            .milestones
            .unwrap_or_default()
            .into_iter()
            .map(|m| {
                let spec = MilestoneSpec::try_from(m)?;
                if !titles.insert(spec.title.clone()) {
                    return Err(ConfigError::DuplicateMilestone(spec.title));
                }
                Ok(spec)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut names = HashSet::new();
        let labels = raw
            .labels
            .unwrap_or_default()
            .into_iter()
            .map(|l| {
                let spec = LabelSpec::try_from(l)?;
                if !names.insert(spec.name.clone()) {
                    return Err(ConfigError::DuplicateLabel(spec.name));
                }
                Ok(spec)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Config {
            repositories: parse_repos(raw.repositories)?,
            milestones,
            labels,
            exclude_from_milestone_sync: parse_repos(raw.exclude_from_milestone_sync)?
                .into_iter()
                .collect(),
            exclude_from_label_sync: parse_repos(raw.exclude_from_label_sync)?
                .into_iter()
                .collect(),
            exclude_milestone_deletion: raw
                .exclude_milestone_deletion
                .unwrap_or_default()
                .into_iter()
                .collect(),
            exclude_label_deletion: raw
                .exclude_label_deletion
                .unwrap_or_default()
                .into_iter()
                .collect(),
            delete_unknown_milestones: raw.delete_unknown_milestones.unwrap_or(false),
            delete_unknown_labels: raw.delete_unknown_labels.unwrap_or(false),
        })
    }
}

impl TryFrom<RawMilestone> for MilestoneSpec {
    type Error = ConfigError;

    fn try_from(raw: RawMilestone) -> Result<Self, Self::Error> {
        let state = MilestoneState::parse(&raw.state).ok_or_else(|| ConfigError::InvalidState {
            title: raw.title.clone(),
            state: raw.state.clone(),
        })?;
        Ok(MilestoneSpec {
            title: raw.title,
            state,
            description: raw.description.unwrap_or_default(),
            repos: parse_repos(raw.repos)?,
        })
    }
}

impl TryFrom<RawLabel> for LabelSpec {
    type Error = ConfigError;

    fn try_from(raw: RawLabel) -> Result<Self, Self::Error> {
        let color = normalize_color(&raw.color).ok_or_else(|| ConfigError::InvalidColor {
            name: raw.name.clone(),
            color: raw.color.clone(),
        })?;
        Ok(LabelSpec {
            name: raw.name,
            color,
            description: raw.description.unwrap_or_default(),
            repos: parse_repos(raw.repos)?,
        })
    }
}

fn parse_repos(raw: Option<Vec<String>>) -> Result<Vec<RepoName>, ConfigError> {
    raw.unwrap_or_default().iter().map(|r| r.parse()).collect()
}

/// `#D73A4A` → `d73a4a`; `None` unless exactly six hex digits remain.
fn normalize_color(color: &str) -> Option<String> {
    let hex = color.trim().trim_start_matches('#');
    if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Some(hex.to_ascii_lowercase())
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
