//! Command implementations

pub mod check;
pub mod inspect;

use classward_core::{ClassRegistry, Policy};
use serde::Serialize;
use tracing::debug;

use crate::manifest::Manifest;

/// Result of defining one manifest class
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub class: String,
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<Policy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Define the manifest classes in order into a registry seeded with the
/// marker roots. Rejected classes stay out of the registry, so later classes
/// naming them as a base are rejected too.
pub fn define_manifest(manifest: &Manifest, fail_fast: bool) -> (ClassRegistry, Vec<Outcome>) {
    let registry = ClassRegistry::with_markers();
    let mut outcomes = Vec::with_capacity(manifest.classes.len());

    for spec in &manifest.classes {
        let defined = spec
            .to_builder(&registry)
            .and_then(|builder| Ok(registry.define(builder)?));

        let outcome = match defined {
            Ok(class) => Outcome {
                class: spec.name.clone(),
                accepted: true,
                policy: Some(class.policy()),
                error: None,
            },
            Err(err) => Outcome {
                class: spec.name.clone(),
                accepted: false,
                policy: None,
                error: Some(err.to_string()),
            },
        };

        let rejected = !outcome.accepted;
        outcomes.push(outcome);
        if rejected && fail_fast {
            debug!("Stopping after rejected class {}", spec.name);
            break;
        }
    }

    (registry, outcomes)
}

#[cfg(test)]
#[path = "../commands_tests.rs"]
mod tests;
