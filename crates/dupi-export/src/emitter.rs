use bytes::BytesMut;
use dupi_pdu::{encode_pdu, BatchLimits, FlowRecord, PduHeader};
use dupi_schema::DiagnosticSink;
use dupi_transport::{DatagramTransport, Destination};
use serde::Serialize;
use tracing::Level;

use crate::error::{ExportError, Result};

/// What one successful emit put on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmittedPdu {
    /// 1-based PDU number within the export.
    pub index: usize,
    /// Records carried.
    pub flows: usize,
    /// Datagram size in bytes.
    pub bytes: usize,
}

/// Assembles header + records into one buffer and sends it.
pub struct PduEmitter<'d, T> {
    transport: T,
    destination: &'d Destination,
    limits: BatchLimits,
    buf: BytesMut,
}

impl<'d, T: DatagramTransport> PduEmitter<'d, T> {
    pub fn new(transport: T, destination: &'d Destination, limits: BatchLimits) -> Self {
        Self {
            transport,
            destination,
            limits,
            buf: BytesMut::with_capacity(limits.max_payload()),
        }
    }

    /// Encode and send PDU number `index`. A transport failure is reported
    /// as-is; nothing is retried.
    pub fn emit<S: DiagnosticSink + ?Sized>(
        &mut self,
        index: usize,
        header: &PduHeader,
        records: &[FlowRecord],
        sink: &S,
    ) -> Result<EmittedPdu> {
        if sink.enabled(Level::DEBUG) {
            log_header(index, header, sink);
        }

        self.buf.clear();
        encode_pdu(header, records, &self.limits, &mut self.buf)
            .map_err(|source| ExportError::Pdu { pdu: index, source })?;

        let bytes = self
            .transport
            .send_to(&self.buf, self.destination)
            .map_err(|source| {
                let err = ExportError::Transport {
                    pdu: index,
                    destination: self.destination.to_string(),
                    source,
                };
                sink.record(Level::WARN, &err.to_string());
                err
            })?;

        sink.record(
            Level::INFO,
            &format!(
                "Exported DUPI PDU #{index} with {} flow records ({bytes} bytes) to host {}",
                records.len(),
                self.destination
            ),
        );

        Ok(EmittedPdu {
            index,
            flows: records.len(),
            bytes,
        })
    }
}

fn log_header<S: DiagnosticSink + ?Sized>(index: usize, header: &PduHeader, sink: &S) {
    sink.record(Level::DEBUG, &format!("DUPI PDU #{index} OUTPUT:"));
    sink.record(Level::DEBUG, " DUPI PDU Header");
    let fields = [
        ("pdu_version", header.version.to_string()),
        ("flow_count", header.flow_count.to_string()),
        ("timestamp_sec", header.timestamp.secs.to_string()),
        ("timestamp_nsecs", header.timestamp.nsecs.to_string()),
        ("sampling", header.sampling.to_string()),
        ("site_name", format!("{:?}", header.site_name)),
    ];
    for (name, value) in fields {
        sink.record(Level::DEBUG, &format!("  {name:<17}: {value}"));
    }
}
