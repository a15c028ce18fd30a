//! Error types used throughout the synchronization core

use thiserror::Error;

/// Coarse classification of [`HrSyncError`] used for logging and for the
/// skip-versus-abort decision inside hierarchical expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection refused, timeout, TLS failure
    Transport,
    /// Non-2xx response from a resource endpoint
    HttpStatus,
    /// Token endpoint failure or exhausted re-auth attempts
    Authentication,
    /// Response body was not the JSON shape we expected
    Deserialization,
    /// A pass was aborted
    PassFatal,
    /// One parent's dependent fetch failed
    PerParent,
    /// Invalid or missing configuration
    Config,
    /// The pass was cancelled by its caller
    Cancelled,
}

impl ErrorCategory {
    /// Stable lowercase label for structured log fields.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::HttpStatus => "http_status",
            Self::Authentication => "auth",
            Self::Deserialization => "deserialization",
            Self::PassFatal => "pass_fatal",
            Self::PerParent => "per_parent",
            Self::Config => "config",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Main error type for HrSync
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HrSyncError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("{entity} pass aborted: {source}")]
    PassFatal {
        entity: String,
        #[source]
        source: Box<HrSyncError>,
    },

    #[error("parent {parent} skipped: {source}")]
    PerParentFailure {
        parent: String,
        #[source]
        source: Box<HrSyncError>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl HrSyncError {
    /// Wrap `err` as the error that aborted the `entity` pass.
    ///
    /// Already-fatal errors are returned unchanged so the wrapper never nests.
    pub fn pass_fatal(entity: impl Into<String>, err: Self) -> Self {
        match err {
            Self::PassFatal { .. } => err,
            other => Self::PassFatal { entity: entity.into(), source: Box::new(other) },
        }
    }

    /// Wrap `err` as a recoverable failure for one parent record.
    pub fn per_parent(parent: impl Into<String>, err: Self) -> Self {
        Self::PerParentFailure { parent: parent.into(), source: Box::new(err) }
    }

    /// Get the error category for this error
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Transport(_) => ErrorCategory::Transport,
            Self::HttpStatus { .. } => ErrorCategory::HttpStatus,
            Self::Auth(_) => ErrorCategory::Authentication,
            Self::Deserialization(_) => ErrorCategory::Deserialization,
            Self::PassFatal { .. } => ErrorCategory::PassFatal,
            Self::PerParentFailure { .. } => ErrorCategory::PerParent,
            Self::Config(_) => ErrorCategory::Config,
            Self::Cancelled => ErrorCategory::Cancelled,
        }
    }

    /// The innermost error, looking through pass and per-parent wrappers.
    pub fn root(&self) -> &Self {
        match self {
            Self::PassFatal { source, .. } | Self::PerParentFailure { source, .. } => source.root(),
            other => other,
        }
    }

    /// HTTP status of the underlying response, if the failure carried one.
    pub fn status(&self) -> Option<u16> {
        match self.root() {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether a dependent fetch failing with this error should skip the
    /// parent and continue the pass.
    ///
    /// Authentication and configuration failures affect every parent alike,
    /// so they abort the pass instead.
    pub fn is_recoverable_per_parent(&self) -> bool {
        matches!(
            self.root().category(),
            ErrorCategory::Transport | ErrorCategory::HttpStatus | ErrorCategory::Deserialization
        )
    }

    /// Whether this error (or the error it wraps) is a cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.root(), Self::Cancelled)
    }
}

/// Result type alias for HrSync operations
pub type Result<T> = std::result::Result<T, HrSyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn server_error() -> HrSyncError {
        HrSyncError::HttpStatus { status: 503, body: "unavailable".to_string() }
    }

    #[test]
    fn pass_fatal_exposes_inner_status() {
        let err = HrSyncError::pass_fatal("workers", server_error());

        assert_eq!(err.category(), ErrorCategory::PassFatal);
        assert_eq!(err.status(), Some(503));
        assert!(err.to_string().contains("workers pass aborted"));
    }

    #[test]
    fn pass_fatal_does_not_nest() {
        let once = HrSyncError::pass_fatal("workers", server_error());
        let twice = HrSyncError::pass_fatal("time_cards", once.clone());

        assert_eq!(once, twice);
    }

    #[test]
    fn recoverable_kinds() {
        assert!(server_error().is_recoverable_per_parent());
        assert!(HrSyncError::Transport("refused".into()).is_recoverable_per_parent());
        assert!(HrSyncError::Deserialization("eof".into()).is_recoverable_per_parent());
        assert!(!HrSyncError::Auth("denied".into()).is_recoverable_per_parent());
        assert!(!HrSyncError::Config("missing".into()).is_recoverable_per_parent());
        assert!(!HrSyncError::Cancelled.is_recoverable_per_parent());
    }

    #[test]
    fn per_parent_wrapper_keeps_status() {
        let err = HrSyncError::per_parent("G3ABC", server_error());

        assert_eq!(err.category(), ErrorCategory::PerParent);
        assert_eq!(err.status(), Some(503));
        assert!(err.is_recoverable_per_parent());
    }

    #[test]
    fn category_labels_are_stable() {
        assert_eq!(ErrorCategory::Authentication.as_str(), "auth");
        assert_eq!(HrSyncError::Cancelled.category().as_str(), "cancelled");
    }
}
