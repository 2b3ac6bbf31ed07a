//! Error types for vcf-annotator
//!
//! Defines all error types used throughout the library.

use thiserror::Error;

/// Main error type for annotation runs
#[derive(Debug, Error)]
pub enum AnnotatorError {
    /// A VCF data line could not be turned into variant records
    #[error("Invalid VCF record at line {line}: {source}")]
    InvalidRecord {
        line: usize,
        #[source]
        source: VcfParseError,
    },

    /// Bulk annotation lookup failed
    #[error("Annotation service error: {0}")]
    Service(#[from] ServiceError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while pulling subfields out of an INFO column
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InfoError {
    /// Fewer tokens matched than the requested occurrence
    #[error("INFO field '{phrase}' occurrence {occurrence} not found ({found} matching tokens)")]
    FieldNotFound {
        phrase: String,
        occurrence: usize,
        found: usize,
    },

    /// The value list has no entry for the requested allele
    #[error("INFO field '{field}' has {available} values, allele index {index} requested")]
    AlleleOutOfRange {
        field: String,
        index: usize,
        available: usize,
    },
}

/// VCF parsing error
#[derive(Debug, Error)]
pub enum VcfParseError {
    #[error("Empty line")]
    EmptyLine,

    #[error("Too few fields: expected at least {expected}, found {found}")]
    TooFewFields { expected: usize, found: usize },

    #[error("Invalid UTF-8 in field: {0}")]
    InvalidUtf8(&'static str),

    /// An INFO subfield expected to be numeric is not
    #[error("Malformed number in INFO field {field}: '{value}'")]
    MalformedNumber { field: &'static str, value: String },

    #[error(transparent)]
    Info(#[from] InfoError),
}

/// Errors from the bulk annotation service
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Transport-level failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status code
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    /// Response body is not the expected JSON shape
    #[error("Failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for annotation runs
pub type Result<T> = std::result::Result<T, AnnotatorError>;

/// Result type alias for INFO extraction
pub type InfoResult<T> = std::result::Result<T, InfoError>;

/// Result type alias for service lookups
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
