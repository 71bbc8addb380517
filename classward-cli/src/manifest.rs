//! JSON manifests describing class hierarchies

use anyhow::{bail, Context, Result};
use classward_core::{
    markers, ClassBuilder, ClassRegistry, Member, MemberKind, Method, Policy, Value,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Classes in definition order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub classes: Vec<ClassSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSpec {
    pub name: String,

    /// Explicit policy; inherited from the bases when absent
    #[serde(default)]
    pub policy: Option<Policy>,

    /// Earlier manifest classes or marker roots
    #[serde(default)]
    pub bases: Vec<String>,

    #[serde(default)]
    pub members: Vec<MemberSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberSpec {
    pub name: String,
    pub kind: MemberKind,

    /// Attribute value
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

impl Manifest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("Invalid manifest {}", path.display()))
    }
}

impl ClassSpec {
    /// Builder for this class, with bases looked up in `registry`.
    /// Marker root names are reserved.
    pub fn to_builder(&self, registry: &ClassRegistry) -> Result<ClassBuilder> {
        if markers::by_name(&self.name).is_some() {
            bail!("Class name {} is reserved for a marker root", self.name);
        }

        let mut builder = ClassBuilder::new(self.name.as_str());

        for base in &self.bases {
            match registry.get(base) {
                Some(class) => builder = builder.base(class),
                None => bail!("Unknown base class {} for {}", base, self.name),
            }
        }

        for member in &self.members {
            builder = builder.member(member.name.as_str(), member.to_member());
        }

        if let Some(policy) = self.policy {
            builder = builder.policy(policy);
        }
        Ok(builder)
    }
}

impl MemberSpec {
    pub fn to_member(&self) -> Member {
        match self.kind {
            MemberKind::Abstract => Member::Abstract,
            MemberKind::Method => {
                let name = self.name.clone();
                Member::Method(Method::new("", name, |_, _| Ok(Value::Nil)))
            }
            MemberKind::Attribute => {
                Member::Attribute(self.value.as_ref().map_or(Value::Nil, json_to_value))
            }
        }
    }
}

/// Convert a JSON value into the object model
pub fn json_to_value(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Nil,
        serde_json::Value::Bool(b) => Value::Boolean(*b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(s) => Value::String(s.clone()),
        serde_json::Value::Array(items) => Value::List(items.iter().map(json_to_value).collect()),
        serde_json::Value::Object(map) => Value::Map(
            map.iter()
                .map(|(k, v)| (k.clone(), json_to_value(v)))
                .collect(),
        ),
    }
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
