//! Migration driver.
//!
//! [`migrate`] is the pure core: two validated documents in, the updated
//! target and a report out. [`ConnectionMigrator`] wraps it with the file
//! reads and the final write.
//!
//! There is no locking around the target file. Two runs racing on the same
//! settings.json can lose one run's connections.

use std::fs;
use std::io;
use std::path::Path;

use super::converter;
use super::document::{SourceDocument, TargetDocument};
use super::error::{DocumentRole, MigrateError, MigrateResult};
use super::groups::GroupResolver;
use super::types::*;

/// Updated target document plus what happened to each source connection.
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationOutcome {
    pub document: TargetDocument,
    pub report: MigrationReport,
}

/// Result of a file-level run.
#[derive(Debug, Clone, PartialEq)]
pub struct FileMigrationResult {
    pub report: MigrationReport,
    /// The rendered target document, whether or not it was written.
    pub output: Vec<u8>,
    pub written: bool,
}

/// Append every translatable source connection to `target`, in source order.
pub fn migrate(
    source: &SourceDocument,
    mut target: TargetDocument,
    config: &MigrationConfig,
) -> MigrationOutcome {
    let mut report = MigrationReport::default();

    let resolver = GroupResolver::new(&source.groups, target.groups());
    if !resolver.has_target_groups() {
        log::info!("no '{}' in target, connections will be ungrouped", TARGET_GROUPS_KEY);
        report.warn(MigrationWarning::NoTargetGroups);
    }

    // Snapshot before appending anything.
    let existing_ids = target.connection_ids();

    for connection in &source.connections {
        match converter::translate_connection(connection, &existing_ids, &resolver, config) {
            Ok(translated) => {
                log::debug!("migrated connection {}", translated.id);
                target.push_connection(&translated);
                report.record_migrated();
            }
            Err(reason) => {
                let id = converter::raw_connection_id(connection).map(str::to_string);
                log::info!(
                    "skipping connection {}: {}",
                    id.as_deref().unwrap_or("<no id>"),
                    reason
                );
                report.record_skipped(id, reason);
            }
        }
    }

    MigrationOutcome { document: target, report }
}

/// File-level migrator: reads both settings files, migrates, and rewrites
/// the target in full.
#[derive(Debug, Clone, Default)]
pub struct ConnectionMigrator {
    config: MigrationConfig,
}

impl ConnectionMigrator {
    pub fn new(config: MigrationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MigrationConfig {
        &self.config
    }

    pub fn load_source(&self, path: &Path) -> MigrateResult<SourceDocument> {
        let content = read_document(path, DocumentRole::Source)?;
        SourceDocument::parse(&content)
    }

    pub fn load_target(&self, path: &Path) -> MigrateResult<TargetDocument> {
        let content = read_document(path, DocumentRole::Target)?;
        TargetDocument::parse(&content)
    }

    /// Run the whole migration. Any load or group failure returns before the
    /// target is touched; in [`MigrationMode::DryRun`] it is never touched.
    pub fn migrate_files(
        &self,
        paths: &MigrationPaths,
        mode: MigrationMode,
    ) -> MigrateResult<FileMigrationResult> {
        ensure_exists(&paths.source, DocumentRole::Source)?;
        ensure_exists(&paths.target, DocumentRole::Target)?;

        let source = self.load_source(&paths.source)?;
        let target = self.load_target(&paths.target)?;
        log::debug!(
            "loaded {} source connection(s), {} target connection(s)",
            source.connections.len(),
            target.connections().len()
        );

        let MigrationOutcome { document, report } = migrate(&source, target, &self.config);

        let output = document
            .to_pretty_bytes(self.config.indent_width)
            .map_err(|e| MigrateError::Write { path: paths.target.clone(), source: e.into() })?;

        let written = match mode {
            MigrationMode::Write => {
                fs::write(&paths.target, &output)
                    .map_err(|e| MigrateError::Write { path: paths.target.clone(), source: e })?;
                log::info!("wrote {}", paths.target.display());
                true
            }
            MigrationMode::DryRun => false,
        };

        Ok(FileMigrationResult { report, output, written })
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────

fn ensure_exists(path: &Path, role: DocumentRole) -> MigrateResult<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(MigrateError::MissingFile { role, path: path.to_path_buf() })
    }
}

fn read_document(path: &Path, role: DocumentRole) -> MigrateResult<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => MigrateError::MissingFile { role, path: path.to_path_buf() },
        io::ErrorKind::InvalidData => {
            MigrateError::malformed(role, format!("file is not valid UTF-8: {}", e))
        }
        _ => MigrateError::Read { role, path: path.to_path_buf(), source: e },
    })
}
