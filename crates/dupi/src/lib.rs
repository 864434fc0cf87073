//! Export cloud flow logs as compact DUPI PDUs over UDP.
//!
//! dupi turns batches of textual VPC flow log records into fixed-layout
//! binary PDUs, each sized to fit a single datagram, and sends them to a
//! flow collector.
//!
//! # Crate Structure
//!
//! - [`transport`]: Datagram transport collaborator (UDP)
//! - [`pdu`]: Wire layout: header, records, MTU-bounded batching
//! - [`schema`]: Source schema and positional field mapping
//! - [`export`]: Envelope decoding and the export pipeline (behind `export` feature)

/// Re-export transport types.
pub mod transport {
    pub use dupi_transport::*;
}

/// Re-export PDU encoding types.
pub mod pdu {
    pub use dupi_pdu::*;
}

/// Re-export field mapping types.
pub mod schema {
    pub use dupi_schema::*;
}

/// Re-export pipeline types (requires `export` feature).
#[cfg(feature = "export")]
pub mod export {
    pub use dupi_export::*;
}
