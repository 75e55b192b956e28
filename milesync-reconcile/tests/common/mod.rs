//! In-memory `Forge` that records every mutating call and applies it to its
//! own state, so a second run sees the result of the first.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use milesync_core::{Config, LabelSpec, MilestoneSpec, MilestoneState, RepoName};
use milesync_github::{Forge, ForgeError, LiveLabel, LiveMilestone, RateLimit, RepoHandle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateMilestone {
        repo: String,
        title: String,
        state: MilestoneState,
        description: String,
    },
    UpdateMilestone {
        repo: String,
        number: u64,
        state: MilestoneState,
        description: String,
    },
    DeleteMilestone {
        repo: String,
        number: u64,
    },
    CreateLabel {
        repo: String,
        name: String,
        color: String,
        description: String,
    },
    UpdateLabel {
        repo: String,
        current: String,
        name: String,
        color: String,
        description: String,
    },
    DeleteLabel {
        repo: String,
        name: String,
    },
}

impl Call {
    pub fn repo(&self) -> &str {
        match self {
            Call::CreateMilestone { repo, .. }
            | Call::UpdateMilestone { repo, .. }
            | Call::DeleteMilestone { repo, .. }
            | Call::CreateLabel { repo, .. }
            | Call::UpdateLabel { repo, .. }
            | Call::DeleteLabel { repo, .. } => repo,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RepoState {
    pub milestones: Vec<LiveMilestone>,
    pub labels: Vec<LiveLabel>,
}

#[derive(Debug, Default)]
pub struct FakeForge {
    repos: RefCell<BTreeMap<String, RepoState>>,
    calls: RefCell<Vec<Call>>,
    next_number: Cell<u64>,
    fail_on: Option<&'static str>,
}

impl FakeForge {
    pub fn new() -> Self {
        Self {
            next_number: Cell::new(1000),
            ..Self::default()
        }
    }

    pub fn with_repo(self, name: &str, milestones: Vec<LiveMilestone>, labels: Vec<LiveLabel>) -> Self {
        self.repos
            .borrow_mut()
            .insert(name.to_string(), RepoState { milestones, labels });
        self
    }

    /// Make the named operation (e.g. `"create_label"`) fail with HTTP 500.
    pub fn failing_on(mut self, operation: &'static str) -> Self {
        self.fail_on = Some(operation);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn state(&self, repo: &str) -> RepoState {
        self.repos.borrow().get(repo).cloned().unwrap_or_default()
    }

    fn check(&self, operation: &'static str) -> Result<(), ForgeError> {
        if self.fail_on == Some(operation) {
            return Err(ForgeError::Status {
                code: 500,
                body: format!("injected failure in {operation}"),
            });
        }
        Ok(())
    }

    fn with_state<T>(&self, repo: &RepoHandle, f: impl FnOnce(&mut RepoState) -> T) -> T {
        let mut repos = self.repos.borrow_mut();
        f(repos.entry(repo.full_name.clone()).or_default())
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl Forge for FakeForge {
    fn resolve_repository(&self, repo: &RepoName) -> Result<RepoHandle, ForgeError> {
        self.check("resolve_repository")?;
        if !self.repos.borrow().contains_key(repo.as_str()) {
            return Err(ForgeError::NotFound {
                url: format!("/repos/{repo}"),
            });
        }
        Ok(RepoHandle {
            id: 1,
            full_name: repo.to_string(),
        })
    }

    fn list_milestones(&self, repo: &RepoHandle) -> Result<Vec<LiveMilestone>, ForgeError> {
        self.check("list_milestones")?;
        Ok(self.with_state(repo, |s| s.milestones.clone()))
    }

    fn create_milestone(&self, repo: &RepoHandle, spec: &MilestoneSpec) -> Result<(), ForgeError> {
        self.check("create_milestone")?;
        let number = self.next_number.get();
        self.next_number.set(number + 1);
        self.with_state(repo, |s| {
            s.milestones.push(LiveMilestone {
                number,
                title: spec.title.clone(),
                state: spec.state,
                description: spec.description.clone(),
            })
        });
        self.record(Call::CreateMilestone {
            repo: repo.full_name.clone(),
            title: spec.title.clone(),
            state: spec.state,
            description: spec.description.clone(),
        });
        Ok(())
    }

    fn update_milestone(
        &self,
        repo: &RepoHandle,
        number: u64,
        spec: &MilestoneSpec,
    ) -> Result<(), ForgeError> {
        self.check("update_milestone")?;
        self.with_state(repo, |s| {
            if let Some(m) = s.milestones.iter_mut().find(|m| m.number == number) {
                m.state = spec.state;
                m.description = spec.description.clone();
            }
        });
        self.record(Call::UpdateMilestone {
            repo: repo.full_name.clone(),
            number,
            state: spec.state,
            description: spec.description.clone(),
        });
        Ok(())
    }

    fn delete_milestone(&self, repo: &RepoHandle, number: u64) -> Result<(), ForgeError> {
        self.check("delete_milestone")?;
        self.with_state(repo, |s| s.milestones.retain(|m| m.number != number));
        self.record(Call::DeleteMilestone {
            repo: repo.full_name.clone(),
            number,
        });
        Ok(())
    }

    fn list_labels(&self, repo: &RepoHandle) -> Result<Vec<LiveLabel>, ForgeError> {
        self.check("list_labels")?;
        Ok(self.with_state(repo, |s| s.labels.clone()))
    }

    fn create_label(&self, repo: &RepoHandle, spec: &LabelSpec) -> Result<(), ForgeError> {
        self.check("create_label")?;
        self.with_state(repo, |s| s.labels.push(live_label(&spec.name, &spec.color, &spec.description)));
        self.record(Call::CreateLabel {
            repo: repo.full_name.clone(),
            name: spec.name.clone(),
            color: spec.color.clone(),
            description: spec.description.clone(),
        });
        Ok(())
    }

    fn update_label(
        &self,
        repo: &RepoHandle,
        current_name: &str,
        spec: &LabelSpec,
    ) -> Result<(), ForgeError> {
        self.check("update_label")?;
        self.with_state(repo, |s| {
            if let Some(l) = s.labels.iter_mut().find(|l| l.name == current_name) {
                *l = live_label(&spec.name, &spec.color, &spec.description);
            }
        });
        self.record(Call::UpdateLabel {
            repo: repo.full_name.clone(),
            current: current_name.to_string(),
            name: spec.name.clone(),
            color: spec.color.clone(),
            description: spec.description.clone(),
        });
        Ok(())
    }

    fn delete_label(&self, repo: &RepoHandle, name: &str) -> Result<(), ForgeError> {
        self.check("delete_label")?;
        self.with_state(repo, |s| s.labels.retain(|l| l.name != name));
        self.record(Call::DeleteLabel {
            repo: repo.full_name.clone(),
            name: name.to_string(),
        });
        Ok(())
    }

    fn rate_limit(&self) -> Result<RateLimit, ForgeError> {
        self.check("rate_limit")?;
        Ok(RateLimit {
            limit: 5000,
            remaining: 5000 - self.calls.borrow().len() as u64,
            reset: None,
        })
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

pub fn repo(s: &str) -> RepoName {
    s.parse().expect("repo name")
}

pub fn milestone(title: &str, state: MilestoneState, description: &str) -> MilestoneSpec {
    MilestoneSpec {
        title: title.into(),
        state,
        description: description.into(),
        repos: vec![],
    }
}

pub fn label(name: &str, color: &str, description: &str) -> LabelSpec {
    LabelSpec {
        name: name.into(),
        color: color.into(),
        description: description.into(),
        repos: vec![],
    }
}

pub fn live_milestone(
    number: u64,
    title: &str,
    state: MilestoneState,
    description: &str,
) -> LiveMilestone {
    LiveMilestone {
        number,
        title: title.into(),
        state,
        description: description.into(),
    }
}

pub fn live_label(name: &str, color: &str, description: &str) -> LiveLabel {
    LiveLabel {
        name: name.into(),
        color: color.into(),
        description: description.into(),
    }
}

pub fn config_for(repos: &[&str]) -> Config {
    Config {
        repositories: repos.iter().map(|r| repo(r)).collect(),
        ..Config::default()
    }
}
