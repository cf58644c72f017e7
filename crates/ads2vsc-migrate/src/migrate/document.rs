//! Settings documents on either side of the migration.
//!
//! Both are validated on construction: once a `SourceDocument` or
//! `TargetDocument` exists, the migration itself cannot fail.

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::collections::HashSet;

use super::error::{DocumentRole, MigrateError, MigrateResult};
use super::types::*;

// ─── Source ─────────────────────────────────────────────────────────

/// The parts of an Azure Data Studio settings file that the migration reads.
///
/// Connection entries stay raw: a bad entry is a per-connection skip, not a
/// document failure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceDocument {
    pub groups: Vec<ConnectionGroup>,
    pub connections: Vec<Value>,
}

impl SourceDocument {
    pub fn parse(content: &str) -> MigrateResult<Self> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| MigrateError::malformed(DocumentRole::Source, e.to_string()))?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> MigrateResult<Self> {
        let root = value.as_object().ok_or_else(|| {
            MigrateError::malformed(
                DocumentRole::Source,
                format!(
                    "expected a JSON object at the top level, found {}",
                    json_type(value)
                ),
            )
        })?;

        let groups = parse_groups(root, SOURCE_GROUPS_KEY)?;
        let connections = parse_entries(root, SOURCE_CONNECTIONS_KEY, DocumentRole::Source)?;

        Ok(Self { groups, connections })
    }
}

// ─── Target ─────────────────────────────────────────────────────────

/// A VS Code settings file. The whole object is kept so the rewrite
/// preserves every unrelated setting in its original order.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetDocument {
    root: Map<String, Value>,
    groups: Vec<ConnectionGroup>,
}

impl TargetDocument {
    pub fn parse(content: &str) -> MigrateResult<Self> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| MigrateError::malformed(DocumentRole::Target, e.to_string()))?;
        Self::from_value(value)
    }

    /// Validate the target and make sure `mssql.connections` is a list.
    pub fn from_value(value: Value) -> MigrateResult<Self> {
        let mut root = match value {
            Value::Object(map) => map,
            other => {
                return Err(MigrateError::malformed(
                    DocumentRole::Target,
                    format!(
                        "expected a JSON object at the top level, found {}",
                        json_type(&other)
                    ),
                ))
            }
        };

        let groups = parse_groups(&root, TARGET_GROUPS_KEY)?;

        match root.get(TARGET_CONNECTIONS_KEY) {
            Some(Value::Array(_)) => {}
            None | Some(Value::Null) => {
                root.insert(TARGET_CONNECTIONS_KEY.into(), Value::Array(Vec::new()));
            }
            Some(other) => {
                return Err(MigrateError::malformed(
                    DocumentRole::Target,
                    format!(
                        "'{}' must be a list, found {}",
                        TARGET_CONNECTIONS_KEY,
                        json_type(other)
                    ),
                ))
            }
        }

        Ok(Self { root, groups })
    }

    pub fn groups(&self) -> &[ConnectionGroup] {
        &self.groups
    }

    /// Raw `mssql.connections` entries, pre-existing ones untouched.
    pub fn connections(&self) -> &[Value] {
        self.root
            .get(TARGET_CONNECTIONS_KEY)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Ids of the connections currently in the document. Entries without a
    /// string `id` are kept but never match.
    pub fn connection_ids(&self) -> HashSet<String> {
        self.connections()
            .iter()
            .filter_map(|c| c.get("id").and_then(Value::as_str))
            .map(str::to_string)
            .collect()
    }

    pub fn push_connection(&mut self, connection: &TargetConnection) {
        let list = self
            .root
            .entry(TARGET_CONNECTIONS_KEY)
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(items) = list {
            items.push(connection.to_json());
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }

    /// Serialise the full document with `indent_width` spaces per level.
    pub fn to_pretty_bytes(&self, indent_width: usize) -> serde_json::Result<Vec<u8>> {
        let indent = " ".repeat(indent_width);
        let mut out = Vec::new();
        let formatter = PrettyFormatter::with_indent(indent.as_bytes());
        let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.root.serialize(&mut ser)?;
        Ok(out)
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────

/// A missing or `null` key reads as an empty list.
fn parse_groups(root: &Map<String, Value>, key: &str) -> MigrateResult<Vec<ConnectionGroup>> {
    let items = match root.get(key) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(MigrateError::GroupProcessing(format!(
                "'{}' must be a list, found {}",
                key,
                json_type(other)
            )))
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            ConnectionGroup::deserialize(item)
                .map_err(|e| MigrateError::GroupProcessing(format!("{}[{}]: {}", key, i, e)))
        })
        .collect()
}

/// Only the list shape is checked; the entries are returned as they are.
fn parse_entries(
    root: &Map<String, Value>,
    key: &str,
    role: DocumentRole,
) -> MigrateResult<Vec<Value>> {
    match root.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items.clone()),
        Some(other) => Err(MigrateError::malformed(
            role,
            format!("'{}' must be a list, found {}", key, json_type(other)),
        )),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
