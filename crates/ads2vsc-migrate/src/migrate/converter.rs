//! Converts one Azure Data Studio connection into one VS Code `mssql`
//! connection.
//!
//! The source format stores booleans as `"true"` / `"false"` strings. They are
//! turned into real booleans while `options` is deserialised
//! ([`parse_string_flag`]), so everything past the boundary works on `bool`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashSet;

use super::groups::GroupResolver;
use super::types::*;

// ─── Boundary helpers ───────────────────────────────────────────────

/// `true` only for a JSON string equal to `"true"` ignoring case.
pub fn parse_string_flag(raw: &Value) -> bool {
    raw.as_str().is_some_and(|s| s.eq_ignore_ascii_case("true"))
}

/// serde adapter for [`parse_string_flag`]; `null` reads as `false`.
pub(crate) fn deserialize_string_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().is_some_and(parse_string_flag))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// The string `id` of a raw source entry, if it has one. Used for reporting
/// entries that could not be deserialised.
pub fn raw_connection_id(raw: &Value) -> Option<&str> {
    raw.get("id").and_then(Value::as_str)
}

/// `options.groupId` wins; the top-level `groupId` is the fallback. Empty
/// strings count as absent on both levels.
pub fn effective_group_id<'a>(
    connection: &'a SourceConnection,
    options: &'a SourceOptions,
) -> Option<&'a str> {
    non_empty(options.group_id.as_deref())
        .or_else(|| non_empty(connection.group_id.as_deref()))
}

// ─── ADS → VS Code ──────────────────────────────────────────────────

/// Translate a single raw `datasource.connections` entry.
///
/// `existing_ids` is the target's id snapshot taken before the run. The
/// connection is either fully translated or skipped with the reason.
pub fn translate_connection(
    raw: &Value,
    existing_ids: &HashSet<String>,
    resolver: &GroupResolver,
    config: &MigrationConfig,
) -> Result<TargetConnection, SkipReason> {
    let connection = SourceConnection::deserialize(raw)
        .map_err(|e| SkipReason::InvalidConnection(e.to_string()))?;

    let id = connection.id.as_deref().ok_or(SkipReason::MissingId)?;

    if existing_ids.contains(id) {
        return Err(SkipReason::AlreadyExists);
    }

    let raw_options = match &connection.options {
        Some(map) if !map.is_empty() => map,
        _ => return Err(SkipReason::MissingOptions),
    };
    let options = SourceOptions::deserialize(Value::Object(raw_options.clone()))
        .map_err(|e| SkipReason::InvalidOptions(e.to_string()))?;

    let source_group_id = effective_group_id(&connection, &options);
    let group_id = resolver.resolve(source_group_id).map(str::to_string);
    if group_id.is_none() {
        if let Some(gid) = source_group_id {
            log::debug!(
                "connection {id}: group {gid} has no counterpart in target, leaving ungrouped"
            );
        }
    }

    Ok(TargetConnection {
        id: id.to_string(),
        server: options.server,
        database: options.database,
        authentication_type: options.authentication_type,
        user: options.user,
        password: options.password,
        profile_name: options.connection_name,
        group_id,
        application_name: config.application_name.clone(),
        encrypt: EncryptMode::from_flag(options.encrypt),
        trust_server_certificate: options.trust_server_certificate,
        connect_timeout: config.connect_timeout,
        command_timeout: config.command_timeout,
        application_intent: config.application_intent.clone(),
    })
}
