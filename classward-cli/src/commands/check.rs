//! Check every class of a manifest

use anyhow::Result;
use colored::*;
use serde::Serialize;
use std::path::Path;

use super::{define_manifest, Outcome};
use crate::config::OutputFormat;
use crate::manifest::Manifest;

/// Summary of a manifest check
#[derive(Debug, Serialize)]
pub struct Report {
    pub manifest: String,
    pub accepted: usize,
    pub rejected: usize,
    pub classes: Vec<Outcome>,
}

impl Report {
    pub fn from_outcomes(manifest: &Path, classes: Vec<Outcome>) -> Self {
        let accepted = classes.iter().filter(|o| o.accepted).count();
        Self {
            manifest: manifest.display().to_string(),
            accepted,
            rejected: classes.len() - accepted,
            classes,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.rejected == 0
    }
}

/// Check a manifest, print the report, and return whether every class was accepted
pub fn check(path: &Path, format: OutputFormat, fail_fast: bool) -> Result<bool> {
    let manifest = Manifest::load(path)?;
    let (_, outcomes) = define_manifest(&manifest, fail_fast);
    let report = Report::from_outcomes(path, outcomes);

    match format {
        OutputFormat::Human => print_human(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(report.is_clean())
}

fn print_human(report: &Report) {
    println!("{} Checking {}", "→".blue().bold(), report.manifest);

    for outcome in &report.classes {
        match (&outcome.policy, &outcome.error) {
            (Some(policy), _) => {
                println!("  {} {} ({})", "✓".green(), outcome.class, policy)
            }
            (None, Some(error)) => {
                println!("  {} {}: {}", "✗".red(), outcome.class, error)
            }
            (None, None) => println!("  {} {}", "?".yellow(), outcome.class),
        }
    }

    println!("\n{}", "─".repeat(60));
    let summary = format!("{} accepted, {} rejected", report.accepted, report.rejected);
    if report.is_clean() {
        println!("{}", summary.green().bold());
    } else {
        println!("{}", summary.red().bold());
    }
}
