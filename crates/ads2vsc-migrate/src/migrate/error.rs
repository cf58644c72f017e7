//! Error types for the migration crate.
//!
//! Everything here aborts the run before the target is written (or, for
//! `Write`, while writing it). Per-connection problems are not errors; they
//! end up as [`SkipReason`](super::types::SkipReason) entries in the report.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Which of the two settings documents an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentRole {
    Source,
    Target,
}

impl fmt::Display for DocumentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Target => write!(f, "target"),
        }
    }
}

/// Coarse classification for callers that branch on the failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateErrorKind {
    MissingFile,
    Read,
    MalformedDocument,
    GroupProcessing,
    Write,
}

#[derive(Debug, Error)]
pub enum MigrateError {
    /// Input path does not exist
    #[error("{role} file not found at '{}'", .path.display())]
    MissingFile { role: DocumentRole, path: PathBuf },
    /// Input path exists but could not be read
    #[error("could not read {role} file '{}': {source}", .path.display())]
    Read {
        role: DocumentRole,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Not JSON, not an object, or a recognised key with the wrong shape
    #[error("could not decode {role} JSON: {detail}")]
    MalformedDocument { role: DocumentRole, detail: String },
    /// A connection group list that cannot be turned into lookup tables
    #[error("error processing connection groups: {0}")]
    GroupProcessing(String),
    /// Rendering or writing the target failed
    #[error("error writing to target file '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type MigrateResult<T> = Result<T, MigrateError>;

impl MigrateError {
    pub fn malformed(role: DocumentRole, detail: impl Into<String>) -> Self {
        Self::MalformedDocument { role, detail: detail.into() }
    }

    pub fn kind(&self) -> MigrateErrorKind {
        match self {
            Self::MissingFile { .. } => MigrateErrorKind::MissingFile,
            Self::Read { .. } => MigrateErrorKind::Read,
            Self::MalformedDocument { .. } => MigrateErrorKind::MalformedDocument,
            Self::GroupProcessing(_) => MigrateErrorKind::GroupProcessing,
            Self::Write { .. } => MigrateErrorKind::Write,
        }
    }

    /// True when the run failed before anything was computed, so the
    /// target file was never touched.
    pub fn is_load_failure(&self) -> bool {
        !matches!(self, Self::Write { .. })
    }

    /// The document the failure belongs to, when there is exactly one.
    pub fn role(&self) -> Option<DocumentRole> {
        match self {
            Self::MissingFile { role, .. }
            | Self::Read { role, .. }
            | Self::MalformedDocument { role, .. } => Some(*role),
            Self::Write { .. } => Some(DocumentRole::Target),
            Self::GroupProcessing(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_message() {
        let err = MigrateError::MissingFile {
            role: DocumentRole::Source,
            path: PathBuf::from("ads.json"),
        };
        assert_eq!(err.to_string(), "source file not found at 'ads.json'");
        assert_eq!(err.kind(), MigrateErrorKind::MissingFile);
        assert!(err.is_load_failure());
    }

    #[test]
    fn test_write_is_not_a_load_failure() {
        let err = MigrateError::Write {
            path: PathBuf::from("settings.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.kind(), MigrateErrorKind::Write);
        assert!(!err.is_load_failure());
        assert_eq!(err.role(), Some(DocumentRole::Target));
        assert!(err.to_string().starts_with("error writing to target file 'settings.json'"));
    }

    #[test]
    fn test_group_processing_has_no_role() {
        let err = MigrateError::GroupProcessing("bad".into());
        assert_eq!(err.role(), None);
        assert_eq!(err.to_string(), "error processing connection groups: bad");
    }
}
