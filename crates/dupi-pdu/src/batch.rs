use std::slice::Chunks;

use crate::error::{PduError, Result};
use crate::header::HEADER_SIZE;
use crate::record::RECORD_SIZE;

/// Default maximum datagram payload: 1500 MTU - 20 (IPv4) - 8 (UDP).
pub const DEFAULT_MAX_PAYLOAD: usize = 1472;

/// Size ceiling for one PDU and the record count it implies.
///
/// `max_records = (max_payload - header_size) / record_size`, computed once.
/// A ceiling that cannot hold a header plus one record is rejected at
/// construction, so every value of this type allows at least one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchLimits {
    max_payload: usize,
    header_size: usize,
    record_size: usize,
    max_records: usize,
}

impl BatchLimits {
    /// Limits for the default 1472-byte payload: 45 records per PDU.
    pub const DEFAULT: BatchLimits = BatchLimits {
        max_payload: DEFAULT_MAX_PAYLOAD,
        header_size: HEADER_SIZE,
        record_size: RECORD_SIZE,
        max_records: (DEFAULT_MAX_PAYLOAD - HEADER_SIZE) / RECORD_SIZE,
    };

    /// Limits for the DUPI header and record sizes under `max_payload`.
    pub fn new(max_payload: usize) -> Result<Self> {
        Self::with_sizes(max_payload, HEADER_SIZE, RECORD_SIZE)
    }

    /// Limits for arbitrary block sizes.
    pub fn with_sizes(max_payload: usize, header_size: usize, record_size: usize) -> Result<Self> {
        let invalid = || PduError::InvalidBatchLimits {
            max_payload,
            header_size,
            record_size,
        };

        if record_size == 0 {
            return Err(invalid());
        }
        let room = max_payload.checked_sub(header_size).ok_or_else(invalid)?;
        // flow_count is a u16 on the wire.
        let max_records = (room / record_size).min(usize::from(u16::MAX));
        if max_records == 0 {
            return Err(invalid());
        }

        Ok(Self {
            max_payload,
            header_size,
            record_size,
            max_records,
        })
    }

    /// Maximum datagram payload in bytes.
    pub fn max_payload(&self) -> usize {
        self.max_payload
    }

    /// Maximum records in one PDU. Always at least 1.
    pub fn max_records(&self) -> usize {
        self.max_records
    }

    /// Encoded size of a PDU carrying `records` records.
    pub fn pdu_size(&self, records: usize) -> usize {
        self.header_size + self.record_size * records
    }

    /// Split `records` into consecutive batches of at most
    /// [`max_records`](Self::max_records), preserving order.
    ///
    /// Every batch but the last is full; an empty input yields no batches.
    pub fn batches<'a, T>(&self, records: &'a [T]) -> Chunks<'a, T> {
        records.chunks(self.max_records)
    }

    /// Number of batches `len` records split into.
    pub fn batch_count(&self, len: usize) -> usize {
        len.div_ceil(self.max_records)
    }
}

impl Default for BatchLimits {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Payload ceiling that holds exactly 40 records.
    const FORTY: usize = HEADER_SIZE + 40 * RECORD_SIZE;

    #[test]
    fn default_limits_hold_45_records() {
        assert_eq!(BatchLimits::DEFAULT.max_records(), 45);
        assert_eq!(BatchLimits::new(DEFAULT_MAX_PAYLOAD).unwrap(), BatchLimits::DEFAULT);
        assert_eq!(BatchLimits::default().pdu_size(45), 1472);
    }

    #[test]
    fn forty_records_make_one_batch() {
        let limits = BatchLimits::new(FORTY).unwrap();
        assert_eq!(limits.max_records(), 40);

        let records: Vec<u32> = (0..40).collect();
        let batches: Vec<&[u32]> = limits.batches(&records).collect();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].len(), 40);
    }

    #[test]
    fn forty_five_records_make_forty_then_five() {
        let limits = BatchLimits::new(FORTY).unwrap();
        let records: Vec<u32> = (0..45).collect();
        let sizes: Vec<usize> = limits.batches(&records).map(<[u32]>::len).collect();
        assert_eq!(sizes, vec![40, 5]);
        assert_eq!(limits.batch_count(45), 2);
    }

    #[test]
    fn empty_input_yields_no_batches() {
        let records: Vec<u32> = Vec::new();
        assert_eq!(BatchLimits::DEFAULT.batches(&records).count(), 0);
        assert_eq!(BatchLimits::DEFAULT.batch_count(0), 0);
    }

    #[test]
    fn batches_partition_input_in_order() {
        let limits = BatchLimits::DEFAULT;
        for len in [1usize, 44, 45, 46, 90, 91, 1000] {
            let records: Vec<usize> = (0..len).collect();
            let batches: Vec<&[usize]> = limits.batches(&records).collect();

            let rejoined: Vec<usize> = batches.iter().flat_map(|b| b.iter().copied()).collect();
            assert_eq!(rejoined, records, "len {len}");
            assert_eq!(batches.len(), limits.batch_count(len));

            let (last, full) = batches.split_last().unwrap();
            assert!(full.iter().all(|b| b.len() == limits.max_records()));
            assert!(!last.is_empty() && last.len() <= limits.max_records());
            for batch in &batches {
                assert!(limits.pdu_size(batch.len()) <= limits.max_payload());
            }
        }
    }

    #[test]
    fn payload_smaller_than_header_is_rejected() {
        let err = BatchLimits::new(HEADER_SIZE - 1).unwrap_err();
        assert!(matches!(err, PduError::InvalidBatchLimits { .. }));
    }

    #[test]
    fn payload_without_room_for_a_record_is_rejected() {
        let err = BatchLimits::new(HEADER_SIZE + RECORD_SIZE - 1).unwrap_err();
        assert!(matches!(err, PduError::InvalidBatchLimits { .. }));
        assert_eq!(BatchLimits::new(HEADER_SIZE + RECORD_SIZE).unwrap().max_records(), 1);
    }

    #[test]
    fn zero_record_size_is_rejected() {
        assert!(BatchLimits::with_sizes(1472, 32, 0).is_err());
    }

    #[test]
    fn record_count_is_capped_to_wire_width() {
        let limits = BatchLimits::with_sizes(200_000, 0, 1).unwrap();
        assert_eq!(limits.max_records(), usize::from(u16::MAX));
    }
}
