//! Describe one accepted class of a manifest

use anyhow::{bail, Result};
use classward_core::{ClassDef, MemberKind, Policy};
use colored::*;
use serde::Serialize;
use std::path::Path;

use super::define_manifest;
use crate::config::OutputFormat;
use crate::manifest::Manifest;

#[derive(Debug, PartialEq, Serialize)]
pub struct ClassSummary {
    pub name: String,
    pub policy: Policy,
    pub bases: Vec<String>,
    pub mro: Vec<String>,
    pub abstract_methods: Vec<String>,
    pub members: Vec<MemberSummary>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct MemberSummary {
    pub name: String,
    pub kind: MemberKind,
}

impl ClassSummary {
    pub fn of(class: &ClassDef) -> Self {
        Self {
            name: class.name().to_string(),
            policy: class.policy(),
            bases: class.bases().iter().map(|b| b.name().to_string()).collect(),
            mro: class.mro().iter().map(|c| c.name().to_string()).collect(),
            abstract_methods: class.abstract_methods().iter().cloned().collect(),
            members: class
                .namespace()
                .iter()
                .map(|(name, member)| MemberSummary {
                    name: name.to_string(),
                    kind: member.kind(),
                })
                .collect(),
        }
    }
}

pub fn inspect(path: &Path, class_name: &str, format: OutputFormat) -> Result<()> {
    let manifest = Manifest::load(path)?;
    let (registry, outcomes) = define_manifest(&manifest, false);

    let Some(class) = registry.get(class_name) else {
        match outcomes.iter().find(|o| o.class == class_name) {
            Some(outcome) => bail!(
                "Class {} was rejected: {}",
                class_name,
                outcome.error.as_deref().unwrap_or("unknown error")
            ),
            None => bail!("Class {} is not defined in {}", class_name, path.display()),
        }
    };

    let summary = ClassSummary::of(&class);
    match format {
        OutputFormat::Human => print_human(&summary),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }
    Ok(())
}

fn join_or_dash(names: &[String]) -> String {
    if names.is_empty() {
        "-".to_string()
    } else {
        names.join(", ")
    }
}

fn print_human(summary: &ClassSummary) {
    println!("{} {}", "Class".bold(), summary.name.cyan());
    println!("  policy:   {}", summary.policy);
    println!("  bases:    {}", join_or_dash(&summary.bases));
    println!("  mro:      {}", join_or_dash(&summary.mro));
    println!("  abstract: {}", join_or_dash(&summary.abstract_methods));
    println!("  members:");
    for member in &summary.members {
        let kind = match member.kind {
            MemberKind::Abstract => "abstract".yellow(),
            MemberKind::Method => "method".green(),
            MemberKind::Attribute => "attribute".normal(),
        };
        println!("    {} ({})", member.name, kind);
    }
}
