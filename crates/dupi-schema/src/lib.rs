//! Positional mapping from textual flow log records to DUPI record fields.
//!
//! A source record is one whitespace-delimited line with a fixed arity. The
//! [`PositionalMapping`] table says, for every record field, which source
//! token feeds it (and how to parse it) or that it is always zero. The
//! [`FieldMapper`] applies the table to one line at a time.

pub mod error;
pub mod mapper;
pub mod mapping;
pub mod sink;

pub use error::{MappingError, Result};
pub use mapper::FieldMapper;
pub use mapping::{FieldKind, FieldSource, PositionalMapping, VPC_FLOW_LOG_V2_FIELDS};
pub use sink::{DiagnosticSink, MemorySink, NullSink, TracingSink};
