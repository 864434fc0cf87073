use bytes::BytesMut;
use tracing::trace;

use crate::batch::BatchLimits;
use crate::error::{PduError, Result};
use crate::header::{encode_header, PduHeader};
use crate::record::{encode_record, FlowRecord};

/// Assemble one PDU: the header followed by every record, in order.
///
/// The header's flow count must match `records`, and the batch must fit the
/// limits. On error nothing is written to `dst`.
pub fn encode_pdu(
    header: &PduHeader,
    records: &[FlowRecord],
    limits: &BatchLimits,
    dst: &mut BytesMut,
) -> Result<()> {
    if usize::from(header.flow_count) != records.len() {
        return Err(PduError::FlowCountMismatch {
            header: header.flow_count,
            records: records.len(),
        });
    }
    if records.len() > limits.max_records() {
        return Err(PduError::TooManyRecords {
            count: records.len(),
            max: limits.max_records(),
        });
    }
    let start = dst.len();
    dst.reserve(limits.pdu_size(records.len()));
    encode_header(header, dst);
    for record in records {
        encode_record(record, dst);
    }
    trace!(records = records.len(), bytes = dst.len() - start, "encoded pdu");
    Ok(())
}
