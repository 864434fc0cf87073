use std::net::AddrParseError;
use std::num::ParseIntError;

/// Errors that can occur while mapping a source record.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    /// The record does not have the schema's token count.
    #[error("expected {expected} fields in flow log record, found {actual}")]
    Arity { expected: usize, actual: usize },

    /// An address field is not a dotted-quad IPv4 address.
    #[error("invalid IPv4 address for {field}: {token:?} ({source})")]
    Address {
        field: &'static str,
        token: String,
        source: AddrParseError,
    },

    /// An integer field is not numeric or does not fit the field width.
    #[error("invalid integer for {field}: {token:?} ({source})")]
    Integer {
        field: &'static str,
        token: String,
        source: ParseIntError,
    },

    /// The mapping table itself is inconsistent.
    #[error("invalid mapping for {field}: {reason}")]
    InvalidMapping { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, MappingError>;
