//! Error types and result definitions for harvest operations.
//!
//! Provides an error system with classification and captured diagnostic
//! metadata for the harvest pipeline. Per-fetch failures are absorbed into
//! absence values by the client layer and never surface here; a
//! [`CadastreError`] always means the run itself cannot continue.

use std::borrow::Cow;
use std::error;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Convenient result type for harvest operations using [`CadastreError`] as the error type.
pub type CadastreResult<T> = Result<T, CadastreError>;

/// Detailed payload stored for [`CadastreError`] instances.
#[derive(Debug, Clone)]
struct ErrorPayload {
    kind: ErrorKind,
    description: Cow<'static, str>,
    detail: Option<Cow<'static, str>>,
    source: Option<Arc<dyn error::Error + Send + Sync>>,
    location: &'static Location<'static>,
}

/// Main error type for harvest operations.
///
/// Carries an [`ErrorKind`] classification, a static description, optional
/// dynamic detail, an optional source error, and the callsite location where
/// the error was created.
#[derive(Debug, Clone)]
pub struct CadastreError {
    payload: ErrorPayload,
}

/// Specific categories of errors that can occur during harvest operations.
///
/// Error kinds are organized by functional area and failure mode.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    // Configuration errors
    ConfigError,

    // IO & serialization errors
    SinkIoError,
    CheckpointIoError,
    SerializationError,
    DeserializationError,

    // State & workflow errors
    InvalidState,

    // Unknown / uncategorized
    Unknown,
}

impl CadastreError {
    /// Returns the [`ErrorKind`] of this error.
    pub fn kind(&self) -> ErrorKind {
        self.payload.kind
    }

    /// Returns the detailed error information if available.
    pub fn detail(&self) -> Option<&str> {
        self.payload.detail.as_deref()
    }

    /// Returns the captured callsite location for this error.
    pub fn location(&self) -> &'static Location<'static> {
        self.payload.location
    }

    /// Attaches an originating [`error::Error`] to this error and returns the modified instance.
    ///
    /// The stored source is preserved across clones and exposed via [`error::Error::source`].
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: error::Error + Send + Sync + 'static,
    {
        self.payload.source = Some(Arc::new(source));
        self
    }

    /// Creates a [`CadastreError`] from its components.
    #[track_caller]
    fn from_components(
        kind: ErrorKind,
        description: Cow<'static, str>,
        detail: Option<Cow<'static, str>>,
    ) -> Self {
        CadastreError {
            payload: ErrorPayload {
                kind,
                description,
                detail,
                source: None,
                location: Location::caller(),
            },
        }
    }
}

impl PartialEq for CadastreError {
    fn eq(&self, other: &CadastreError) -> bool {
        self.payload.kind == other.payload.kind
    }
}

impl fmt::Display for CadastreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        let location = self.payload.location;
        write!(
            f,
            "[{:?}] {} @ {}:{}:{}",
            self.payload.kind,
            self.payload.description,
            location.file(),
            location.line(),
            location.column()
        )?;

        if let Some(detail) = self.payload.detail.as_deref() {
            write!(f, "\n  detail: {detail}")?;
        }

        Ok(())
    }
}

impl error::Error for CadastreError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.payload
            .source
            .as_ref()
            .map(|source| source as &(dyn error::Error + 'static))
    }
}

impl From<(ErrorKind, &'static str)> for CadastreError {
    #[track_caller]
    fn from((kind, description): (ErrorKind, &'static str)) -> Self {
        CadastreError::from_components(kind, Cow::Borrowed(description), None)
    }
}

impl From<(ErrorKind, String)> for CadastreError {
    #[track_caller]
    fn from((kind, description): (ErrorKind, String)) -> Self {
        CadastreError::from_components(kind, Cow::Owned(description), None)
    }
}

impl From<(ErrorKind, &'static str, String)> for CadastreError {
    #[track_caller]
    fn from((kind, description, detail): (ErrorKind, &'static str, String)) -> Self {
        CadastreError::from_components(kind, Cow::Borrowed(description), Some(Cow::Owned(detail)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cadastre_error;

    #[test]
    fn error_carries_kind_and_detail() {
        let err = cadastre_error!(
            ErrorKind::CheckpointIoError,
            "Failed to persist checkpoint",
            "disk full".to_string()
        );

        assert_eq!(err.kind(), ErrorKind::CheckpointIoError);
        assert_eq!(err.detail(), Some("disk full"));
        assert!(format!("{err}").contains("Failed to persist checkpoint"));
    }

    #[test]
    fn errors_compare_by_kind() {
        let a = cadastre_error!(ErrorKind::SinkIoError, "one");
        let b = cadastre_error!(ErrorKind::SinkIoError, "two");
        assert_eq!(a, b);
    }

    #[test]
    fn source_is_exposed() {
        use std::error::Error;

        let io = std::io::Error::other("boom");
        let err = cadastre_error!(ErrorKind::SinkIoError, "Failed to append").with_source(io);
        assert!(err.source().is_some());
    }
}
