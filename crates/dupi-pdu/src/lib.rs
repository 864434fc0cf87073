//! Fixed-layout DUPI flow PDU encoding.
//!
//! One PDU is one UDP datagram: a 32-byte header followed by 1..=N 32-byte
//! flow records, all fields in network byte order.
//!
//! ```text
//! ┌──────────────────────────────┬──────────┬──────────┬─────┬──────────┐
//! │ Header (32B)                 │ Record 1 │ Record 2 │ ... │ Record N │
//! │ version, count, ts, sampling │ (32B)    │ (32B)    │     │ (32B)    │
//! │ site name                    │          │          │     │          │
//! └──────────────────────────────┴──────────┴──────────┴─────┴──────────┘
//! ```
//!
//! The number of records per PDU is bounded by [`BatchLimits`], computed once
//! from the maximum datagram payload.

pub mod batch;
pub mod error;
pub mod header;
pub mod pdu;
pub mod record;

pub use batch::{BatchLimits, DEFAULT_MAX_PAYLOAD};
pub use error::{PduError, Result};
pub use header::{
    encode_header, PduHeader, PduTimestamp, SiteName, DEFAULT_SAMPLING, DEFAULT_SITE_NAME,
    HEADER_SIZE, PDU_VERSION, SITE_NAME_LEN,
};
pub use pdu::encode_pdu;
pub use record::{encode_record, FieldWidth, FlowRecord, RecordField, RECORD_SIZE};
