//! Human-readable run summary.

use chrono::{DateTime, Utc};
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use milesync_github::RateLimit;
use milesync_reconcile::{Change, Outcome, RepoReport, RunSummary, Tally};

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "repository")]
    repository: String,
    #[tabled(rename = "milestones")]
    milestones: String,
    #[tabled(rename = "labels")]
    labels: String,
}

pub fn print_summary(summary: &RunSummary) {
    let prefix = if summary.dry_run { "[dry-run] " } else { "" };

    if summary.repositories.is_empty() {
        println!("{prefix}No repositories configured.");
    } else {
        for repo in &summary.repositories {
            print_repo_line(prefix, repo);
        }

        let rows: Vec<SummaryRow> = summary
            .repositories
            .iter()
            .map(|repo| SummaryRow {
                repository: repo.repository.to_string(),
                milestones: describe(repo.milestones.as_ref().map(|_| repo.milestone_tally())),
                labels: describe(repo.labels.as_ref().map(|_| repo.label_tally())),
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
    }

    let total = summary.tally();
    if summary.dry_run && total.mutations() > 0 {
        println!(
            "{prefix}{} changes pending. Run without --dry-run to apply.",
            total.mutations()
        );
    }

    println!("Finished.");
    println!("{}", rate_limit_line(&summary.rate_limit, Utc::now()));
}

fn print_repo_line(prefix: &str, repo: &RepoReport) {
    let changed = repo.milestone_tally().mutations() + repo.label_tally().mutations();
    if changed == 0 {
        println!("{prefix}{} '{}' — nothing to do", "✓".green(), repo.repository);
    } else {
        println!(
            "{prefix}{} '{}' — {} changes",
            "✎".yellow(),
            repo.repository,
            changed
        );
        for outcome in repo.outcomes().filter(|o| o.change.is_mutation()) {
            println!("    {} {} '{}'", verb(outcome), outcome.entity, outcome.key);
        }
    }
}

fn verb(outcome: &Outcome) -> &'static str {
    match (outcome.change, outcome.dry_run) {
        (Change::Created, false) => "created",
        (Change::Created, true) => "would create",
        (Change::Updated, false) => "updated",
        (Change::Updated, true) => "would update",
        (Change::Deleted, false) => "deleted",
        (Change::Deleted, true) => "would delete",
        _ => "kept",
    }
}

/// `None` means the phase was excluded for this repository.
fn describe(tally: Option<Tally>) -> String {
    let Some(t) = tally else {
        return "excluded".to_string();
    };
    let parts: Vec<String> = [
        (t.created, "created"),
        (t.updated, "updated"),
        (t.deleted, "deleted"),
        (t.unchanged, "unchanged"),
        (t.skipped, "skipped"),
        (t.excluded, "kept"),
    ]
    .into_iter()
    .filter(|(n, _)| *n > 0)
    .map(|(n, what)| format!("{n} {what}"))
    .collect();

    if parts.is_empty() {
        "none".to_string()
    } else {
        parts.join(", ")
    }
}

fn rate_limit_line(rate: &RateLimit, now: DateTime<Utc>) -> String {
    let base = format!(
        "Remaining {} of {} rate limit.",
        rate.remaining, rate.limit
    );
    match rate.reset {
        Some(reset) if reset > now => {
            let minutes = (reset - now).num_minutes();
            format!("{base} Resets in {minutes}m.")
        }
        _ => base,
    }
}
