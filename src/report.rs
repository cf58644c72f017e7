//! User-facing report lines for a finished or failed run.

use std::path::Path;

use ads2vsc_migrate::{DocumentRole, MigrateError, MigrationReport, SkipReason};

/// Lines describing a finished run. Ids already present in the target are
/// only counted, every other skip gets its own line.
pub fn report_lines(report: &MigrationReport, target: &Path, written: bool) -> Vec<String> {
  let mut lines = Vec::new();

  for warning in &report.warnings {
    lines.push(format!("Warning: {warning}"));
  }

  for skipped in &report.skipped_connections {
    if skipped.reason == SkipReason::AlreadyExists {
      continue;
    }
    let id = skipped.id.as_deref().unwrap_or("<no id>");
    lines.push(format!("Skipping connection {id}: {}", skipped.reason));
  }

  lines.push(String::new());
  lines.push("--- Migration Complete ---".into());
  lines.push(format!("Successfully migrated {} new connection(s).", report.migrated));
  lines.push(format!("Skipped {} connection(s).", report.skipped));
  if written {
    lines.push(format!("Your target file '{}' has been updated.", target.display()));
  } else {
    lines.push(format!("Dry run: '{}' was not modified.", target.display()));
  }

  lines
}

/// Lines describing a fatal error.
pub fn error_lines(err: &MigrateError) -> Vec<String> {
  let mut lines = vec![format!("Error: {err}")];
  if let MigrateError::MissingFile { role: DocumentRole::Target, .. } = err {
    lines.push("Please ensure the target settings.json file exists.".into());
  }
  if err.is_load_failure() {
    lines.push("No changes were written.".into());
  }
  lines
}
