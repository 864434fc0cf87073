use dupi_pdu::PduError;
use dupi_schema::MappingError;
use dupi_transport::TransportError;

use crate::config::ConfigError;
use crate::envelope::EnvelopeError;
use crate::status::ExportStatus;

/// Errors that abort an export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Static configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The collector could not be resolved. Nothing was processed.
    #[error("Destination host {host}:{port} invalid ({source})")]
    Destination {
        host: String,
        port: u16,
        source: TransportError,
    },

    /// The envelope could not be decoded or is not a data message.
    #[error("{0}")]
    Envelope(#[from] EnvelopeError),

    /// A flow log line failed to map. The PDU holding it was not sent.
    #[error("Received invalid flow log message (PDU #{pdu}, record #{record}): {source}")]
    Record {
        pdu: usize,
        record: usize,
        source: MappingError,
    },

    /// A batch could not be assembled into a PDU.
    #[error("failed to assemble PDU #{pdu}: {source}")]
    Pdu { pdu: usize, source: PduError },

    /// Sending a PDU failed. Earlier PDUs stand.
    #[error("Failed to export DUPI PDU #{pdu} to host {destination} ({source})")]
    Transport {
        pdu: usize,
        destination: String,
        source: TransportError,
    },
}

impl ExportError {
    /// Client-side failures: the input was at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ExportError::Envelope(_) | ExportError::Record { .. })
    }

    /// Status to report to the caller.
    pub fn status(&self) -> ExportStatus {
        if self.is_client_error() {
            ExportStatus::client_error(self.to_string())
        } else {
            ExportStatus::server_error(self.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
