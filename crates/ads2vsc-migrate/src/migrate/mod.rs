pub mod types;
pub mod error;
pub mod document;
pub mod groups;
pub mod converter;
pub mod service;

// Re-exports
pub use types::*;
pub use error::{DocumentRole, MigrateError, MigrateErrorKind, MigrateResult};
pub use document::{SourceDocument, TargetDocument};
pub use groups::GroupResolver;
pub use converter::{
    effective_group_id, parse_string_flag, raw_connection_id, translate_connection,
};
pub use service::{migrate, ConnectionMigrator, FileMigrationResult, MigrationOutcome};
