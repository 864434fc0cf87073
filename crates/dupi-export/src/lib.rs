//! Flow log to DUPI PDU export pipeline.
//!
//! This is the orchestration layer: decode the trigger envelope, resolve the
//! collector, batch the flow log lines, map and encode every batch into one
//! PDU and hand each PDU to the datagram transport, strictly in order.
//!
//! Each call to [`Exporter::export`] is independent; the only state kept
//! between calls is the read-only configuration and the transport's sockets.

pub mod capture;
pub mod clock;
pub mod config;
pub mod emitter;
pub mod envelope;
pub mod error;
pub mod pipeline;
pub mod status;

pub use capture::CaptureTransport;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, ExportConfig, ValidatedConfig};
pub use dupi_schema::{DiagnosticSink, MemorySink, NullSink, TracingSink};
pub use emitter::{EmittedPdu, PduEmitter};
pub use envelope::{decode_event, EnvelopeError, LogEvent, LogsMessage, MessageKind, TriggerEvent};
pub use error::{ExportError, Result};
pub use pipeline::{ExportReport, Exporter};
pub use status::ExportStatus;
