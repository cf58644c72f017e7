//! # ads2vsc-migrate: Azure Data Studio → VS Code mssql connections
//!
//! Moves stored database connections from Azure Data Studio settings
//! (`datasource.*` keys) into the VS Code `mssql` extension settings
//! (`mssql.*` keys):
//! - **Group reconciliation**: source and target group ids are joined by name
//! - **Field translation**: renames, string → enum, string → bool, defaults
//! - **Idempotent merge**: ids already present in the target are left alone
//!
//! Architecture:
//! - `types`: settings keys, connection/group model, config, report
//! - `error`: migration error type and error kinds
//! - `document`: source/target settings documents (parse + render)
//! - `groups`: group id reconciliation tables
//! - `converter`: one source connection → one target connection
//! - `service`: pure migration core and the file-level driver

pub mod migrate;

pub use migrate::*;
