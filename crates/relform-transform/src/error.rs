use relform_index::IndexSpecError;
use thiserror::Error;

/// Coarse classification of [`TransformError`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed statement, index spec, or foreign key spec.
    Parse,
    /// Well-formed input that violates the document model.
    Structural,
    /// A referenced table does not exist where one is required.
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error(
        "invalid statement: '{0}' (expected 'del table|column <table>|fk' followed by 'pattern:<glob>' or 'index:<spec>')"
    )]
    InvalidStatement(String),
    #[error("invalid index spec '{spec}': {reason}")]
    InvalidIndexSpec { spec: String, reason: IndexSpecError },
    #[error("invalid foreign key spec (missing '|-->|'): {0}")]
    MissingSeparator(String),
    #[error("invalid foreign key spec (multiple '|-->|'): {0}")]
    DuplicateSeparator(String),
    #[error("invalid source spec (expected 'table|cols'): {0}")]
    InvalidSource(String),
    #[error("invalid target spec (expected 'table|cols'): {0}")]
    InvalidTarget(String),
    #[error("empty table or column name in foreign key spec: {0}")]
    EmptyName(String),
    #[error(
        "column count mismatch in '{spec}': source has {source_count}, target has {target_count}"
    )]
    ColumnCountMismatch {
        spec: String,
        source_count: usize,
        target_count: usize,
    },
    #[error("source table not found: {table} (in '{spec}')")]
    SourceTableNotFound { table: String, spec: String },
    #[error("line {position}: {reason}")]
    Line {
        position: usize,
        reason: Box<TransformError>,
    },
}

impl TransformError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TransformError::ColumnCountMismatch { .. } => ErrorKind::Structural,
            TransformError::SourceTableNotFound { .. } => ErrorKind::NotFound,
            TransformError::Line { reason, .. } => reason.kind(),
            _ => ErrorKind::Parse,
        }
    }

    pub(crate) fn at_line(self, position: usize) -> Self {
        TransformError::Line {
            position,
            reason: Box::new(self),
        }
    }
}
