use std::net::Ipv4Addr;
use std::num::ParseIntError;
use std::str::FromStr;

use dupi_pdu::{FlowRecord, RecordField};
use tracing::Level;

use crate::error::{MappingError, Result};
use crate::mapping::{FieldKind, FieldSource, PositionalMapping};
use crate::sink::DiagnosticSink;

/// Applies a [`PositionalMapping`] to textual source records.
pub struct FieldMapper<'a, S: ?Sized> {
    mapping: &'a PositionalMapping,
    sink: &'a S,
}

impl<'a, S: DiagnosticSink + ?Sized> FieldMapper<'a, S> {
    pub fn new(mapping: &'a PositionalMapping, sink: &'a S) -> Self {
        Self { mapping, sink }
    }

    /// Split a whitespace-delimited line and map it.
    pub fn map_line(&self, line: &str) -> Result<FlowRecord> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        self.map_tokens(&tokens)
    }

    /// Map one record's tokens into a [`FlowRecord`].
    ///
    /// Fails on arity mismatch, malformed addresses, and integers that are
    /// non-numeric or too wide for their field. Zero-mapped fields are 0.
    pub fn map_tokens(&self, tokens: &[&str]) -> Result<FlowRecord> {
        if tokens.len() != self.mapping.arity() {
            return Err(MappingError::Arity {
                expected: self.mapping.arity(),
                actual: tokens.len(),
            });
        }

        Ok(FlowRecord {
            sip: self.resolve(RecordField::Sip, tokens)?,
            dip: self.resolve(RecordField::Dip, tokens)?,
            packets: self.resolve(RecordField::Packets, tokens)?,
            bytes: self.resolve(RecordField::Bytes, tokens)?,
            start: self.resolve(RecordField::Start, tokens)?,
            end: self.resolve(RecordField::End, tokens)?,
            sp: self.resolve(RecordField::Sp, tokens)?,
            dp: self.resolve(RecordField::Dp, tokens)?,
            flags: self.resolve(RecordField::Flags, tokens)?,
            proto: self.resolve(RecordField::Proto, tokens)?,
            pad: self.resolve(RecordField::Pad, tokens)?,
        })
    }

    fn resolve<T>(&self, field: RecordField, tokens: &[&str]) -> Result<T>
    where
        T: FromStr<Err = ParseIntError> + TryFrom<u32> + Default,
    {
        let (index, kind) = match self.mapping.source(field) {
            FieldSource::Zero => {
                self.debug_field(field, "0");
                return Ok(T::default());
            }
            FieldSource::FromSource { index, kind } => (index, kind),
        };

        let token = *tokens
            .get(index)
            .ok_or_else(|| MappingError::InvalidMapping {
                field: field.name(),
                reason: format!("source index {index} out of range for arity {}", tokens.len()),
            })?;

        let value = match kind {
            FieldKind::Integer => token.parse::<T>().map_err(|source| MappingError::Integer {
                field: field.name(),
                token: token.to_string(),
                source,
            })?,
            FieldKind::Address => {
                let addr: Ipv4Addr = token.parse().map_err(|source| MappingError::Address {
                    field: field.name(),
                    token: token.to_string(),
                    source,
                })?;
                T::try_from(u32::from(addr)).map_err(|_| MappingError::InvalidMapping {
                    field: field.name(),
                    reason: "address kind needs a 32-bit field".to_string(),
                })?
            }
        };

        self.debug_field(field, token);
        Ok(value)
    }

    fn debug_field(&self, field: RecordField, token: &str) {
        if self.sink.enabled(Level::DEBUG) {
            self.sink
                .record(Level::DEBUG, &format!("  {:<13}: {token}", field.name()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{MemorySink, NullSink};

    const LINE: &str = "2 123456789010 eni-abc123de 172.31.16.139 172.31.16.21 20641 22 6 20 4249 1418530010 1418530070 ACCEPT OK";

    fn map(line: &str) -> Result<FlowRecord> {
        FieldMapper::new(&PositionalMapping::VPC_FLOW_LOG_V2, &NullSink).map_line(line)
    }

    #[test]
    fn maps_accepted_flow() {
        let record = map(LINE).unwrap();
        assert_eq!(
            record,
            FlowRecord {
                sip: u32::from(Ipv4Addr::new(172, 31, 16, 139)),
                dip: u32::from(Ipv4Addr::new(172, 31, 16, 21)),
                packets: 20,
                bytes: 4249,
                start: 1_418_530_010,
                end: 1_418_530_070,
                sp: 20641,
                dp: 22,
                flags: 0,
                proto: 6,
                pad: 0,
            }
        );
    }

    #[test]
    fn rejected_flow_keeps_flags_and_pad_zero() {
        let line = LINE.replace("ACCEPT", "REJECT");
        let record = map(&line).unwrap();
        assert_eq!(record.flags, 0);
        assert_eq!(record.pad, 0);
        assert_eq!(record, map(LINE).unwrap());
    }

    #[test]
    fn arity_mismatch_is_rejected() {
        let err = map("2 123456789010 eni-abc123de 172.31.16.139").unwrap_err();
        assert!(matches!(
            err,
            MappingError::Arity {
                expected: 14,
                actual: 4
            }
        ));

        let extra = format!("{LINE} EXTRA");
        assert!(matches!(
            map(&extra).unwrap_err(),
            MappingError::Arity { actual: 15, .. }
        ));
    }

    #[test]
    fn malformed_address_is_rejected() {
        let line = LINE.replace("172.31.16.139", "172.31.16.999");
        let err = map(&line).unwrap_err();
        assert!(matches!(err, MappingError::Address { field: "sip", .. }));
    }

    #[test]
    fn ipv6_address_is_rejected() {
        let line = LINE.replace("172.31.16.21", "2001:db8::1");
        let err = map(&line).unwrap_err();
        assert!(matches!(err, MappingError::Address { field: "dip", .. }));
    }

    #[test]
    fn nodata_placeholder_is_rejected() {
        let line = "2 123456789010 eni-1a2b3c4d - - - - - - - 1431280876 1431280934 - NODATA";
        let err = map(line).unwrap_err();
        assert!(matches!(err, MappingError::Address { field: "sip", .. }));
    }

    #[test]
    fn non_numeric_integer_is_rejected() {
        let line = LINE.replace(" 4249 ", " lots ");
        let err = map(&line).unwrap_err();
        assert!(matches!(err, MappingError::Integer { field: "bytes", .. }));
    }

    #[test]
    fn port_wider_than_u16_is_rejected() {
        let line = LINE.replace(" 20641 ", " 70000 ");
        let err = map(&line).unwrap_err();
        assert!(matches!(err, MappingError::Integer { field: "sp", .. }));
    }

    #[test]
    fn protocol_wider_than_u8_is_rejected() {
        let line = LINE.replace(" 22 6 ", " 22 256 ");
        let err = map(&line).unwrap_err();
        assert!(matches!(err, MappingError::Integer { field: "proto", .. }));
    }

    #[test]
    fn counter_wider_than_u32_is_rejected() {
        let line = LINE.replace(" 4249 ", " 4294967296 ");
        let err = map(&line).unwrap_err();
        assert!(matches!(err, MappingError::Integer { field: "bytes", .. }));
    }

    #[test]
    fn negative_integer_is_rejected() {
        let line = LINE.replace(" 20 4249 ", " -1 4249 ");
        let err = map(&line).unwrap_err();
        assert!(matches!(err, MappingError::Integer { field: "packets", .. }));
    }

    #[test]
    fn tolerates_extra_whitespace() {
        let spaced = LINE.replace(' ', "  \t");
        assert_eq!(map(&spaced).unwrap(), map(LINE).unwrap());
    }

    #[test]
    fn records_each_resolved_field() {
        let sink = MemorySink::new();
        FieldMapper::new(&PositionalMapping::VPC_FLOW_LOG_V2, &sink)
            .map_line(LINE)
            .unwrap();

        let lines = sink.lines();
        assert_eq!(lines.len(), RecordField::COUNT);
        assert!(lines.iter().all(|(level, _)| *level == Level::DEBUG));
        assert!(sink.contains(Level::DEBUG, "sip          : 172.31.16.139"));
        assert!(sink.contains(Level::DEBUG, "flags        : 0"));
    }

    #[test]
    fn custom_mapping_zeroes_unmapped_fields() {
        let mut sources = [FieldSource::Zero; RecordField::COUNT];
        sources[RecordField::Sip.index()] = FieldSource::FromSource {
            index: 1,
            kind: FieldKind::Address,
        };
        sources[RecordField::Proto.index()] = FieldSource::FromSource {
            index: 0,
            kind: FieldKind::Integer,
        };
        let mapping = PositionalMapping::new(2, sources);
        mapping.validate().unwrap();

        let record = FieldMapper::new(&mapping, &NullSink)
            .map_line("17 10.1.2.3")
            .unwrap();
        assert_eq!(
            record,
            FlowRecord {
                sip: 0x0A01_0203,
                proto: 17,
                ..FlowRecord::default()
            }
        );
    }
}
