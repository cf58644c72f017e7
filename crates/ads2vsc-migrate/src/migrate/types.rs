//! Connection model on both sides of the migration (Azure Data Studio
//! `datasource.*` entries in, VS Code `mssql.*` entries out) plus the
//! config and report types shared by the converter and the service.

use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::fmt;
use std::path::PathBuf;

// ─── Settings keys ──────────────────────────────────────────────────

pub const SOURCE_GROUPS_KEY: &str = "datasource.connectionGroups";
pub const SOURCE_CONNECTIONS_KEY: &str = "datasource.connections";
pub const TARGET_GROUPS_KEY: &str = "mssql.connectionGroups";
pub const TARGET_CONNECTIONS_KEY: &str = "mssql.connections";

// ─── Groups ─────────────────────────────────────────────────────────

/// A named folder of connections. Ids are only meaningful inside the
/// document that owns them; `name` is the join key across documents.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConnectionGroup {
    pub id: String,
    pub name: String,
}

// ─── Source (Azure Data Studio) ─────────────────────────────────────

/// One entry of `datasource.connections`. Each entry is deserialised on
/// its own, so a bad one only skips that connection.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceConnection {
    pub id: Option<String>,
    pub group_id: Option<String>,
    /// Left raw so that `{}` can be told apart from an object that only
    /// carries keys we do not translate.
    pub options: Option<Map<String, Value>>,
}

/// The recognised subset of a source connection's `options` object.
/// Copied fields stay raw JSON and land in the target as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceOptions {
    pub server: Option<Value>,
    pub database: Option<Value>,
    pub authentication_type: Option<Value>,
    pub user: Option<Value>,
    pub password: Option<Value>,
    pub connection_name: Option<Value>,
    pub group_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::migrate::converter::deserialize_string_flag"
    )]
    pub encrypt: bool,
    #[serde(
        default,
        deserialize_with = "crate::migrate::converter::deserialize_string_flag"
    )]
    pub trust_server_certificate: bool,
}

// ─── Target (VS Code mssql) ─────────────────────────────────────────

/// Value of the target `encrypt` setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncryptMode {
    Mandatory,
    Optional,
}

impl Default for EncryptMode {
    fn default() -> Self { Self::Optional }
}

impl EncryptMode {
    pub fn from_flag(encrypt: bool) -> Self {
        if encrypt { Self::Mandatory } else { Self::Optional }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mandatory => "Mandatory",
            Self::Optional => "Optional",
        }
    }
}

/// One entry of `mssql.connections` as produced by the migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetConnection {
    pub id: String,
    pub server: Option<Value>,
    pub database: Option<Value>,
    pub authentication_type: Option<Value>,
    pub user: Option<Value>,
    pub password: Option<Value>,
    pub profile_name: Option<Value>,
    pub group_id: Option<String>,
    pub application_name: String,
    pub encrypt: EncryptMode,
    pub trust_server_certificate: bool,
    pub connect_timeout: u32,
    pub command_timeout: u32,
    pub application_intent: String,
}

impl TargetConnection {
    /// Render as a settings.json object. Absent source values stay `null`;
    /// an unresolved group leaves `groupId` out entirely.
    pub fn to_json(&self) -> Value {
        let mut entry = Map::new();
        entry.insert("id".into(), json!(self.id));
        entry.insert("server".into(), json!(self.server));
        entry.insert("database".into(), json!(self.database));
        entry.insert("authenticationType".into(), json!(self.authentication_type));
        entry.insert("user".into(), json!(self.user));
        entry.insert("password".into(), json!(self.password));
        entry.insert("profileName".into(), json!(self.profile_name));
        if let Some(group_id) = &self.group_id {
            entry.insert("groupId".into(), json!(group_id));
        }
        entry.insert("applicationName".into(), json!(self.application_name));
        entry.insert("encrypt".into(), json!(self.encrypt.as_str()));
        entry.insert(
            "trustServerCertificate".into(),
            json!(self.trust_server_certificate),
        );
        entry.insert("connectTimeout".into(), json!(self.connect_timeout));
        entry.insert("commandTimeout".into(), json!(self.command_timeout));
        entry.insert("applicationIntent".into(), json!(self.application_intent));
        Value::Object(entry)
    }
}

// ─── Config ─────────────────────────────────────────────────────────

/// Values stamped onto every migrated connection, and output formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationConfig {
    pub application_name: String,
    pub connect_timeout: u32,
    pub command_timeout: u32,
    pub application_intent: String,
    /// Spaces per indentation level when the target is rewritten.
    pub indent_width: usize,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            application_name: "vscode-mssql".into(),
            connect_timeout: 30,
            command_timeout: 30,
            application_intent: "ReadWrite".into(),
            indent_width: 4,
        }
    }
}

/// Source and target settings files for a file-level run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationPaths {
    pub source: PathBuf,
    pub target: PathBuf,
}

/// Whether a file-level run persists the rewritten target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationMode {
    Write,
    DryRun,
}

// ─── Report ─────────────────────────────────────────────────────────

/// Why a source connection produced no target entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The id is already present among the target's connections.
    AlreadyExists,
    /// `options` is absent, null or an empty object.
    MissingOptions,
    /// The connection has no `id`.
    MissingId,
    /// A recognised option has the wrong JSON type.
    InvalidOptions(String),
    /// The entry itself is not a usable connection object (not an object,
    /// non-string `id` or `groupId`, non-object `options`).
    InvalidConnection(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyExists => write!(f, "already exists in target"),
            Self::MissingOptions => write!(f, "No 'options' field found."),
            Self::MissingId => write!(f, "No 'id' field found."),
            Self::InvalidOptions(msg) => write!(f, "invalid 'options': {}", msg),
            Self::InvalidConnection(msg) => write!(f, "invalid connection entry: {}", msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedConnection {
    pub id: Option<String>,
    pub reason: SkipReason,
}

/// Non-fatal conditions noticed while setting up the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationWarning {
    /// The target has no `mssql.connectionGroups`; every connection lands
    /// ungrouped.
    NoTargetGroups,
}

impl fmt::Display for MigrationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTargetGroups => {
                write!(f, "No '{}' found in target file.", TARGET_GROUPS_KEY)
            }
        }
    }
}

/// Counts and diagnostics of one migration run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub migrated: usize,
    pub skipped: usize,
    pub skipped_connections: Vec<SkippedConnection>,
    pub warnings: Vec<MigrationWarning>,
}

impl MigrationReport {
    pub fn record_migrated(&mut self) {
        self.migrated += 1;
    }

    pub fn record_skipped(&mut self, id: Option<String>, reason: SkipReason) {
        self.skipped += 1;
        self.skipped_connections.push(SkippedConnection { id, reason });
    }

    pub fn warn(&mut self, warning: MigrationWarning) {
        self.warnings.push(warning);
    }
}
