/// Errors that can occur while batching or assembling PDUs.
#[derive(Debug, thiserror::Error)]
pub enum PduError {
    /// The configured payload ceiling cannot hold a header and one record.
    #[error(
        "max payload {max_payload} cannot hold a {header_size}-byte header and one {record_size}-byte record"
    )]
    InvalidBatchLimits {
        max_payload: usize,
        header_size: usize,
        record_size: usize,
    },

    /// More records were handed to one PDU than the limits allow.
    #[error("too many records for one PDU ({count}, max {max})")]
    TooManyRecords { count: usize, max: usize },

    /// The header flow count does not match the records being encoded.
    #[error("header flow count {header} does not match {records} records")]
    FlowCountMismatch { header: u16, records: usize },
}

pub type Result<T> = std::result::Result<T, PduError>;
