//! Terraform JSON rendering and read-back
//!
//! `render_stack` turns a stack into the JSON document written to
//! `cdk.tf.json`. `Plan` is a read-only view over such a document.

use std::path::Path;

use serde_json::{json, Map, Value};

use crate::application::Stack;
use crate::error::StackResult;

pub const PLAN_FILE: &str = "cdk.tf.json";

fn insert_nonempty(doc: &mut Map<String, Value>, key: &str, section: Map<String, Value>) {
    if !section.is_empty() {
        doc.insert(key.to_string(), Value::Object(section));
    }
}

/// Render a stack as a Terraform JSON document.
///
/// Keys are emitted in sorted order, so identical stacks render identically.
pub fn render_stack(stack: &Stack) -> Value {
    let mut doc = Map::new();

    doc.insert(
        "//".to_string(),
        json!({
            "metadata": {
                "version": env!("CARGO_PKG_VERSION"),
                "stackName": stack.name().as_str(),
                "backend": "local",
            }
        }),
    );

    let mut required = Map::new();
    for provider in stack.providers() {
        let mut entry = Map::new();
        entry.insert("source".to_string(), Value::String(provider.source().to_string()));
        if let Some(version) = provider.version_constraint() {
            entry.insert("version".to_string(), Value::String(version.to_string()));
        }
        required.insert(provider.name().to_string(), Value::Object(entry));
    }
    if !required.is_empty() {
        doc.insert(
            "terraform".to_string(),
            json!({ "required_providers": Value::Object(required) }),
        );
    }

    let mut providers = Map::new();
    for provider in stack.providers() {
        let blocks = providers
            .entry(provider.name().to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(items) = blocks {
            items.push(provider.to_json());
        }
    }
    insert_nonempty(&mut doc, "provider", providers);

    let mut resources = Map::new();
    for resource in stack.resources() {
        let by_type = resources
            .entry(resource.resource_type().to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(items) = by_type {
            items.insert(resource.id().to_string(), resource.to_json());
        }
    }
    insert_nonempty(&mut doc, "resource", resources);

    let modules: Map<String, Value> = stack
        .modules()
        .iter()
        .map(|m| (m.id().to_string(), m.to_json()))
        .collect();
    insert_nonempty(&mut doc, "module", modules);

    let outputs: Map<String, Value> = stack
        .outputs()
        .iter()
        .map(|o| (o.id().to_string(), o.to_json()))
        .collect();
    insert_nonempty(&mut doc, "output", outputs);

    Value::Object(doc)
}

/// Read-only view over a synthesized `cdk.tf.json`
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    doc: Value,
}

impl Plan {
    pub fn from_value(doc: Value) -> Self {
        Self { doc }
    }

    pub fn load(path: &Path) -> StackResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_value(serde_json::from_str(&content)?))
    }

    pub fn as_value(&self) -> &Value {
        &self.doc
    }

    pub fn stack_name(&self) -> Option<&str> {
        self.doc["//"]["metadata"]["stackName"].as_str()
    }

    /// Resource blocks of one type, keyed by id
    pub fn resources_of(&self, resource_type: &str) -> Vec<(&str, &Value)> {
        match self.doc["resource"][resource_type].as_object() {
            Some(items) => items.iter().map(|(k, v)| (k.as_str(), v)).collect(),
            None => Vec::new(),
        }
    }

    pub fn resource(&self, resource_type: &str, id: &str) -> Option<&Value> {
        self.doc["resource"][resource_type].get(id)
    }

    /// Total number of resource blocks across all types
    pub fn resource_count(&self) -> usize {
        self.doc["resource"]
            .as_object()
            .map(|types| {
                types
                    .values()
                    .filter_map(Value::as_object)
                    .map(|items| items.len())
                    .sum()
            })
            .unwrap_or(0)
    }

    pub fn output(&self, id: &str) -> Option<&Value> {
        self.doc["output"].get(id).map(|o| &o["value"])
    }
}
