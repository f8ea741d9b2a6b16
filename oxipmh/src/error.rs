//! Error types for the provider core
//!
//! Two layers of failure exist and they never mix:
//!
//! - [`ProtocolError`] is an OAI-PMH protocol condition (`badVerb`,
//!   `badArgument`, ...). Handlers accumulate these per request and a
//!   non-empty list turns the whole response into an error document.
//! - [`Error`] is a fault of the hosting application itself (bad
//!   configuration, a broken store backend). These propagate out of
//!   [`handle`](crate::verbs::Provider::handle) as `Err` and never appear
//!   inside a response document.
//!
//! The data-access boundary gets its own [`DataError`]: a store may signal a
//! protocol condition (folded into the request's error list) or a backend
//! fault (propagated unmasked).

use std::fmt;
use thiserror::Error;

/// Result type alias using the crate error
pub type Result<T> = std::result::Result<T, Error>;

// ============================================================================
// Protocol error taxonomy
// ============================================================================

/// The fixed OAI-PMH v2.0 error condition taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolErrorKind {
    /// Missing, repeated, or unrecognized verb argument
    BadVerb,
    /// Illegal, missing, or repeated request argument
    BadArgument,
    /// Invalid or expired resumption token
    BadResumptionToken,
    /// No metadata formats available for the requested item
    NoMetadataFormats,
    /// The repository does not expose a set hierarchy
    NoSetHierarchy,
    /// The requested metadata prefix is not supported
    CannotDisseminateFormat,
    /// Unknown or illegal record identifier
    IdDoesNotExist,
}

impl ProtocolErrorKind {
    /// Protocol code string, exactly as it appears in the `code` attribute
    /// of an `<error>` element.
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadVerb => "badVerb",
            Self::BadArgument => "badArgument",
            Self::BadResumptionToken => "badResumptionToken",
            Self::NoMetadataFormats => "noMetadataFormats",
            Self::NoSetHierarchy => "noSetHierarchy",
            Self::CannotDisseminateFormat => "cannotDisseminateFormat",
            Self::IdDoesNotExist => "idDoesNotExist",
        }
    }

    /// Default human-readable message for this condition, taken from the
    /// protocol specification's descriptions.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::BadVerb => {
                "Value of the verb argument is not a legal OAI-PMH verb, the verb argument is \
                 missing, or the verb argument is repeated."
            }
            Self::BadArgument => {
                "The request includes illegal arguments, is missing required arguments, includes \
                 a repeated argument, or values for arguments have an illegal syntax."
            }
            Self::BadResumptionToken => {
                "The value of the resumptionToken argument is invalid or expired."
            }
            Self::NoMetadataFormats => {
                "There are no metadata formats available for the specified item."
            }
            Self::NoSetHierarchy => "This repository does not support sets.",
            Self::CannotDisseminateFormat => {
                "The metadata format identified by the value given for the metadataPrefix \
                 argument is not supported by the item or by the repository."
            }
            Self::IdDoesNotExist => {
                "The value of the identifier argument is unknown or illegal in this repository."
            }
        }
    }
}

impl fmt::Display for ProtocolErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A single OAI-PMH protocol error condition with its message
///
/// A request accumulates zero or more of these; any non-empty list forces
/// the response into error form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ProtocolError {
    /// The protocol condition
    pub kind: ProtocolErrorKind,
    /// Human-readable message
    pub message: String,
}

impl ProtocolError {
    /// Create a protocol error carrying the condition's default message
    pub fn new(kind: ProtocolErrorKind) -> Self {
        Self {
            kind,
            message: kind.default_message().to_string(),
        }
    }

    /// Create a protocol error with a custom message
    pub fn with_message(kind: ProtocolErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// `badVerb` with the default message
    pub fn bad_verb() -> Self {
        Self::new(ProtocolErrorKind::BadVerb)
    }

    /// `badArgument` naming the offending key
    pub fn bad_argument(key: &str) -> Self {
        Self::with_message(
            ProtocolErrorKind::BadArgument,
            format!("Illegal or missing argument: '{key}'."),
        )
    }

    /// `badResumptionToken` with the default message
    pub fn bad_resumption_token() -> Self {
        Self::new(ProtocolErrorKind::BadResumptionToken)
    }

    /// `cannotDisseminateFormat` naming the unsupported prefix
    pub fn cannot_disseminate_format(prefix: &str) -> Self {
        Self::with_message(
            ProtocolErrorKind::CannotDisseminateFormat,
            format!("The metadata format '{prefix}' is not supported by this repository."),
        )
    }

    /// `idDoesNotExist` naming the identifier
    pub fn id_does_not_exist(identifier: &str) -> Self {
        Self::with_message(
            ProtocolErrorKind::IdDoesNotExist,
            format!("The identifier '{identifier}' is unknown in this repository."),
        )
    }

    /// The protocol code string for this error
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

// ============================================================================
// Data-access boundary errors
// ============================================================================

/// Failure raised by a [`DataStore`](crate::store::DataStore) operation
///
/// `Protocol` failures are caught narrowly by the dispatcher and folded into
/// the request's error list; `Backend` failures propagate to the caller
/// unmasked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    /// The store signals an OAI-PMH protocol condition
    #[error("{0}")]
    Protocol(ProtocolError),

    /// The store backend itself failed
    #[error("data access failed: {0}")]
    Backend(String),
}

impl DataError {
    /// Convenience constructor for backend faults
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}

impl From<ProtocolError> for DataError {
    fn from(err: ProtocolError) -> Self {
        Self::Protocol(err)
    }
}

// ============================================================================
// Top-level error
// ============================================================================

/// Main error type for the provider core
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// Invalid Identify configuration
    #[error("Invalid Identify configuration: {0}")]
    Identify(String),

    /// Invalid paging configuration
    #[error("Invalid paging configuration: {0}")]
    Paging(String),

    /// Backend fault raised by a data-access operation
    #[error("{0}")]
    Data(DataError),
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}

impl From<DataError> for Error {
    fn from(err: DataError) -> Self {
        Error::Data(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_protocol() {
        assert_eq!(ProtocolErrorKind::BadVerb.code(), "badVerb");
        assert_eq!(ProtocolErrorKind::BadArgument.code(), "badArgument");
        assert_eq!(
            ProtocolErrorKind::BadResumptionToken.code(),
            "badResumptionToken"
        );
        assert_eq!(
            ProtocolErrorKind::NoMetadataFormats.code(),
            "noMetadataFormats"
        );
        assert_eq!(ProtocolErrorKind::NoSetHierarchy.code(), "noSetHierarchy");
        assert_eq!(
            ProtocolErrorKind::CannotDisseminateFormat.code(),
            "cannotDisseminateFormat"
        );
        assert_eq!(ProtocolErrorKind::IdDoesNotExist.code(), "idDoesNotExist");
    }

    #[test]
    fn test_default_message() {
        let err = ProtocolError::bad_verb();
        assert_eq!(err.kind, ProtocolErrorKind::BadVerb);
        assert_eq!(err.message, ProtocolErrorKind::BadVerb.default_message());
    }

    #[test]
    fn test_bad_argument_names_key() {
        let err = ProtocolError::bad_argument("metadataPrefix");
        assert_eq!(err.code(), "badArgument");
        assert!(err.message.contains("metadataPrefix"));
    }

    #[test]
    fn test_display_includes_code() {
        let err = ProtocolError::id_does_not_exist("oai:example:1");
        let display = format!("{}", err);
        assert!(display.starts_with("idDoesNotExist:"));
        assert!(display.contains("oai:example:1"));
    }

    #[test]
    fn test_data_error_folds_protocol() {
        let err: DataError = ProtocolError::bad_resumption_token().into();
        assert!(matches!(err, DataError::Protocol(_)));
    }

    #[test]
    fn test_backend_error_display() {
        let err = DataError::backend("connection refused");
        assert_eq!(format!("{}", err), "data access failed: connection refused");
    }
}
