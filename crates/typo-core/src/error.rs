//! Error types for configuration, pattern compilation, checker state and fix application.

use crate::host::DocumentId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while loading settings or a grammar file.
pub enum ConfigError {
    #[error("the grammar file path is not configured")]
    /// No grammar path was set (or it is blank).
    GrammarPathUnset,

    #[error("grammar file not found: {}", path.display())]
    /// The configured grammar path does not exist.
    GrammarNotFound {
        /// The configured path.
        path: PathBuf,
    },

    #[error("failed to read {}: {source}", path.display())]
    /// Reading a configuration file failed.
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    /// A configuration file is not valid JSON or has the wrong shape.
    Parse {
        /// The file being parsed.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
#[error("invalid pattern '{pattern}': {source}")]
/// A rule's `pattern` or `arg` is not a valid regular expression.
pub struct PatternError {
    /// The regex source that failed to compile.
    pub pattern: String,
    /// The compiler error.
    #[source]
    pub source: regex::Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// An operation was invoked in a state that does not allow it.
pub enum StateError {
    #[error("the typo checker has already started")]
    /// `enable` while already enabled.
    AlreadyEnabled,

    #[error("the typo checker has not started; enable it before checking documents")]
    /// An operation that needs an enabled checker was invoked while disabled.
    NotEnabled,

    #[error("there is no active document to check")]
    /// A check of the active document was requested without one.
    NoActiveDocument,

    #[error("document is not open: {0}")]
    /// The host has no text for the document.
    DocumentNotOpen(DocumentId),

    #[error("the diagnostic is no longer present")]
    /// A fix was requested for a diagnostic that has since been replaced or removed.
    DiagnosticNotFound,
}

#[derive(Debug, Error)]
/// Errors produced by a single document check.
pub enum CheckError {
    #[error(transparent)]
    /// A rule pattern failed to compile; the whole check was aborted.
    Pattern(#[from] PatternError),

    #[error(transparent)]
    /// The check could not run in the current state.
    State(#[from] StateError),
}

#[derive(Debug, Error)]
/// Errors produced while applying a suggested fix.
pub enum FixError {
    #[error(transparent)]
    /// The fix could not run in the current state.
    State(#[from] StateError),

    #[error("the diagnostic carries no suggestion")]
    /// The diagnostic message has no suggestion line.
    NoSuggestion,

    #[error("edit rejected for {document}: {reason}")]
    /// The host refused the text edit; the diagnostic was kept.
    EditRejected {
        /// Target document.
        document: DocumentId,
        /// Host-provided reason.
        reason: String,
    },
}
