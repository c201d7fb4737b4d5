//! Error type shared by all value wrappers.
//!
//! Every fallible operation in this crate returns [`Result`]. An [`Error`]
//! carries:
//! - the [`ErrorKind`] describing which contract was violated
//! - a human-readable message
//! - optionally, the upstream error that caused it (UTF-8 validation,
//!   JSON codec, regex compilation)
//!
//! Nothing is reported through sentinel values: a missing substring is a
//! [`ErrorKind::NotFound`] error, never `-1`.

use core::fmt;

/// Boxed upstream error kept for diagnostics.
type Source = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The category of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The encoding could not be detected or is inconsistent with the
    /// presumed scheme.
    Encoding,
    /// An argument is outside the operation's valid domain
    /// (negative count, empty separator, out-of-range offset, ...).
    Domain,
    /// A search found no match where a position was required.
    NotFound,
    /// Removal was requested on an empty collection.
    EmptyCollection,
    /// Illegal arithmetic: division by zero or integer overflow.
    Arithmetic,
    /// JSON encoding or decoding failed.
    Serialization,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encoding => write!(f, "encoding error"),
            Self::Domain => write!(f, "domain error"),
            Self::NotFound => write!(f, "not found"),
            Self::EmptyCollection => write!(f, "empty collection"),
            Self::Arithmetic => write!(f, "arithmetic error"),
            Self::Serialization => write!(f, "serialization error"),
        }
    }
}

/// Error returned by value wrapper operations.
#[derive(Debug)]
pub struct Error {
    /// What kind of contract was violated.
    pub kind: ErrorKind,
    /// Human-readable description of the failure.
    pub message: String,
    source: Option<Source>,
}

impl Error {
    /// Create an error of the given kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Error {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Attach the upstream error that caused this one.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub(crate) fn encoding(message: impl Into<String>) -> Self {
        Error::new(ErrorKind::Encoding, message)
    }

    pub(crate) fn domain(message: impl Into<String>) -> Self {
        Error::new(ErrorKind::Domain, message)
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Error::new(ErrorKind::NotFound, message)
    }

    pub(crate) fn empty_collection(message: impl Into<String>) -> Self {
        Error::new(ErrorKind::EmptyCollection, message)
    }

    pub(crate) fn arithmetic(message: impl Into<String>) -> Self {
        Error::new(ErrorKind::Arithmetic, message)
    }

    pub(crate) fn serialization(message: impl Into<String>) -> Self {
        Error::new(ErrorKind::Serialization, message)
    }

    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Whether this error is of the given kind.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
