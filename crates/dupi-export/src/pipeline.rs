use dupi_pdu::{FlowRecord, PduHeader, PduTimestamp};
use dupi_schema::{DiagnosticSink, FieldMapper};
use dupi_transport::DatagramTransport;
use tracing::Level;

use crate::clock::{Clock, SystemClock};
use crate::config::ValidatedConfig;
use crate::emitter::{EmittedPdu, PduEmitter};
use crate::envelope::LogsMessage;
use crate::error::{ExportError, Result};
use crate::status::ExportStatus;

/// Outcome of a completed export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    /// Collector the PDUs went to.
    pub destination: String,
    /// Flow log records processed.
    pub records: usize,
    /// One entry per PDU sent, in order.
    pub pdus: Vec<EmittedPdu>,
}

impl ExportReport {
    /// Success status for the caller.
    pub fn status(&self) -> ExportStatus {
        ExportStatus::success(self.records)
    }
}

/// Runs the export pipeline for one log message at a time.
///
/// ```text
/// resolve destination ─▶ check message kind ─▶ batch lines
///        │ for each batch: map × N ─▶ header ─▶ assemble ─▶ send
/// ```
///
/// Batches are encoded and sent strictly one after another. The first
/// failure stops the export; PDUs already sent are not recalled.
pub struct Exporter<T, C = SystemClock> {
    config: ValidatedConfig,
    transport: T,
    clock: C,
}

impl<T: DatagramTransport> Exporter<T> {
    pub fn new(config: ValidatedConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            clock: SystemClock,
        }
    }
}

impl<T: DatagramTransport, C: Clock> Exporter<T, C> {
    /// Replace the clock the per-PDU capture instant is read from.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> Exporter<T, C2> {
        Exporter {
            config: self.config,
            transport: self.transport,
            clock,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Export one message.
    pub fn export<S: DiagnosticSink + ?Sized>(
        &mut self,
        message: &LogsMessage,
        sink: &S,
    ) -> Result<ExportReport> {
        let host = self.config.destination_host();
        let port = self.config.destination_port();
        let destination = self.transport.resolve(host, port).map_err(|source| {
            let err = ExportError::Destination {
                host: host.to_string(),
                port,
                source,
            };
            sink.record(Level::WARN, &err.to_string());
            err
        })?;

        if let Err(err) = message.ensure_data() {
            sink.record(Level::WARN, &err.to_string());
            return Err(err.into());
        }

        if sink.enabled(Level::DEBUG) {
            log_message(message, sink);
        }

        let lines: Vec<&str> = message.lines().collect();
        let limits = *self.config.limits();
        let mapper = FieldMapper::new(self.config.mapping(), sink);
        let mut emitter = PduEmitter::new(&mut self.transport, &destination, limits);
        let mut records: Vec<FlowRecord> = Vec::with_capacity(limits.max_records());
        let mut pdus = Vec::with_capacity(limits.batch_count(lines.len()));

        for (batch_index, batch) in limits.batches(&lines).enumerate() {
            let pdu = batch_index + 1;
            let timestamp = PduTimestamp::from_system_time(self.clock.now());

            records.clear();
            for (record_index, line) in batch.iter().enumerate() {
                if sink.enabled(Level::DEBUG) {
                    sink.record(
                        Level::DEBUG,
                        &format!(" DUPI PDU Record #{}", record_index + 1),
                    );
                }
                let record = mapper.map_line(line).map_err(|source| {
                    let err = ExportError::Record {
                        pdu,
                        record: record_index + 1,
                        source,
                    };
                    sink.record(Level::WARN, &err.to_string());
                    err
                })?;
                records.push(record);
            }

            // Batches never exceed max_records, which is capped to u16.
            let flow_count = u16::try_from(records.len()).unwrap_or(u16::MAX);
            let header = PduHeader {
                version: self.config.pdu_version(),
                flow_count,
                timestamp,
                sampling: self.config.sampling(),
                site_name: self.config.site_name(),
            };

            pdus.push(emitter.emit(pdu, &header, &records, sink)?);
        }

        Ok(ExportReport {
            destination: destination.to_string(),
            records: lines.len(),
            pdus,
        })
    }
}

fn log_message<S: DiagnosticSink + ?Sized>(message: &LogsMessage, sink: &S) {
    sink.record(Level::DEBUG, "FLOW LOG MESSAGE INPUT:");
    let fields = [
        ("messageType", message.message_type.clone()),
        ("owner", message.owner.clone()),
        ("logGroup", message.log_group.clone()),
        ("logStream", message.log_stream.clone()),
        ("subscriptionFilters", message.subscription_filters.join(",")),
        ("logEvents", message.log_events.len().to_string()),
    ];
    for (name, value) in fields {
        sink.record(Level::DEBUG, &format!(" {name:<19}: {value}"));
    }
}
