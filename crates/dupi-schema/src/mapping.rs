use dupi_pdu::{FieldWidth, RecordField};

use crate::error::{MappingError, Result};

/// Token names of a default-format VPC flow log record (version 2).
pub const VPC_FLOW_LOG_V2_FIELDS: [&str; 14] = [
    "version",
    "account-id",
    "interface-id",
    "srcaddr",
    "dstaddr",
    "srcport",
    "dstport",
    "protocol",
    "packets",
    "bytes",
    "start",
    "end",
    "action",
    "log-status",
];

/// How a source token is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Dotted-quad IPv4 address, stored as its 32-bit integer.
    Address,
    /// Base-10 unsigned integer, range-checked against the field width.
    Integer,
}

/// Where a record field's value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSource {
    /// The source token at `index`, parsed as `kind`.
    FromSource { index: usize, kind: FieldKind },
    /// Always zero, whatever the input.
    Zero,
}

const fn from_source(index: usize, kind: FieldKind) -> FieldSource {
    FieldSource::FromSource { index, kind }
}

/// Static table mapping every record field to a source token or zero.
///
/// Entry `i` describes [`RecordField::ALL`]`[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionalMapping {
    arity: usize,
    sources: [FieldSource; RecordField::COUNT],
}

impl PositionalMapping {
    /// VPC flow log v2 to DUPI record.
    ///
    /// `flags` and `pad` have no source and stay zero; `action` and
    /// `log-status` are not carried.
    pub const VPC_FLOW_LOG_V2: PositionalMapping = PositionalMapping {
        arity: VPC_FLOW_LOG_V2_FIELDS.len(),
        sources: [
            from_source(3, FieldKind::Address),  // sip <- srcaddr
            from_source(4, FieldKind::Address),  // dip <- dstaddr
            from_source(8, FieldKind::Integer),  // packets
            from_source(9, FieldKind::Integer),  // bytes
            from_source(10, FieldKind::Integer), // start
            from_source(11, FieldKind::Integer), // end
            from_source(5, FieldKind::Integer),  // sp <- srcport
            from_source(6, FieldKind::Integer),  // dp <- dstport
            FieldSource::Zero,                   // flags
            from_source(7, FieldKind::Integer),  // proto <- protocol
            FieldSource::Zero,                   // pad
        ],
    };

    /// Build a mapping for a source schema of `arity` tokens.
    ///
    /// Call [`validate`](Self::validate) once before use.
    pub const fn new(arity: usize, sources: [FieldSource; RecordField::COUNT]) -> Self {
        Self { arity, sources }
    }

    /// Expected token count of a source record.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Source of one record field.
    pub fn source(&self, field: RecordField) -> FieldSource {
        self.sources[field.index()]
    }

    /// Check the table against the schema: indices in range, addresses only
    /// on 32-bit fields.
    pub fn validate(&self) -> Result<()> {
        for field in RecordField::ALL {
            let FieldSource::FromSource { index, kind } = self.source(field) else {
                continue;
            };
            if index >= self.arity {
                return Err(MappingError::InvalidMapping {
                    field: field.name(),
                    reason: format!("source index {index} out of range for arity {}", self.arity),
                });
            }
            if kind == FieldKind::Address && field.width() != FieldWidth::U32 {
                return Err(MappingError::InvalidMapping {
                    field: field.name(),
                    reason: format!("address kind needs a 32-bit field, got {:?}", field.width()),
                });
            }
        }
        Ok(())
    }
}

impl Default for PositionalMapping {
    fn default() -> Self {
        Self::VPC_FLOW_LOG_V2
    }
}
