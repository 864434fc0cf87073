use bytes::{BufMut, BytesMut};

/// Record block: 6 × u32 + 2 × u16 + 2 × u8 + 1 × u16 = 32 bytes.
pub const RECORD_SIZE: usize = 32;

/// Width of a record field on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldWidth {
    U8,
    U16,
    U32,
}

impl FieldWidth {
    /// Size of the field in bytes.
    pub const fn bytes(self) -> usize {
        match self {
            FieldWidth::U8 => 1,
            FieldWidth::U16 => 2,
            FieldWidth::U32 => 4,
        }
    }
}

/// The fields of a flow record, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    /// Source IPv4 address.
    Sip,
    /// Destination IPv4 address.
    Dip,
    /// Packets in the flow.
    Packets,
    /// Bytes in the flow.
    Bytes,
    /// Flow start, epoch seconds.
    Start,
    /// Flow end, epoch seconds.
    End,
    /// TCP/UDP source port.
    Sp,
    /// TCP/UDP destination port.
    Dp,
    /// Cumulative TCP flags.
    Flags,
    /// IP protocol number.
    Proto,
    /// Alignment padding.
    Pad,
}

impl RecordField {
    /// Number of fields in a record.
    pub const COUNT: usize = 11;

    /// All fields in wire order.
    pub const ALL: [RecordField; Self::COUNT] = [
        RecordField::Sip,
        RecordField::Dip,
        RecordField::Packets,
        RecordField::Bytes,
        RecordField::Start,
        RecordField::End,
        RecordField::Sp,
        RecordField::Dp,
        RecordField::Flags,
        RecordField::Proto,
        RecordField::Pad,
    ];

    /// Position of the field in wire order.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Wire width of the field.
    pub const fn width(self) -> FieldWidth {
        match self {
            RecordField::Sip
            | RecordField::Dip
            | RecordField::Packets
            | RecordField::Bytes
            | RecordField::Start
            | RecordField::End => FieldWidth::U32,
            RecordField::Sp | RecordField::Dp | RecordField::Pad => FieldWidth::U16,
            RecordField::Flags | RecordField::Proto => FieldWidth::U8,
        }
    }

    /// Short field name used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            RecordField::Sip => "sip",
            RecordField::Dip => "dip",
            RecordField::Packets => "packets",
            RecordField::Bytes => "bytes",
            RecordField::Start => "start",
            RecordField::End => "end",
            RecordField::Sp => "sp",
            RecordField::Dp => "dp",
            RecordField::Flags => "flags",
            RecordField::Proto => "proto",
            RecordField::Pad => "pad",
        }
    }
}

/// One flow record in its binary shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlowRecord {
    pub sip: u32,
    pub dip: u32,
    pub packets: u32,
    pub bytes: u32,
    pub start: u32,
    pub end: u32,
    pub sp: u16,
    pub dp: u16,
    pub flags: u8,
    pub proto: u8,
    pub pad: u16,
}

/// Encode a record into its 32-byte wire form.
///
/// Wire format (big-endian):
/// ```text
/// sip:u32 dip:u32 packets:u32 bytes:u32 start:u32 end:u32
/// sp:u16 dp:u16 flags:u8 proto:u8 pad:u16
/// ```
pub fn encode_record(record: &FlowRecord, dst: &mut BytesMut) {
    dst.reserve(RECORD_SIZE);
    dst.put_u32(record.sip);
    dst.put_u32(record.dip);
    dst.put_u32(record.packets);
    dst.put_u32(record.bytes);
    dst.put_u32(record.start);
    dst.put_u32(record.end);
    dst.put_u16(record.sp);
    dst.put_u16(record.dp);
    dst.put_u8(record.flags);
    dst.put_u8(record.proto);
    dst.put_u16(record.pad);
}

#[cfg(test)]
pub(crate) mod tests {
    use bytes::Buf;

    use super::*;

    /// Inverse of [`encode_record`], test-only.
    pub(crate) fn decode_record(mut src: &[u8]) -> FlowRecord {
        assert!(src.len() >= RECORD_SIZE, "short record block");
        FlowRecord {
            sip: src.get_u32(),
            dip: src.get_u32(),
            packets: src.get_u32(),
            bytes: src.get_u32(),
            start: src.get_u32(),
            end: src.get_u32(),
            sp: src.get_u16(),
            dp: src.get_u16(),
            flags: src.get_u8(),
            proto: src.get_u8(),
            pad: src.get_u16(),
        }
    }

    fn sample() -> FlowRecord {
        FlowRecord {
            sip: 0x0A00_0001,
            dip: 0xC0A8_0102,
            packets: 20,
            bytes: 4249,
            start: 1_418_530_010,
            end: 1_418_530_070,
            sp: 49761,
            dp: 3389,
            flags: 0,
            proto: 6,
            pad: 0,
        }
    }

    #[test]
    fn field_widths_sum_to_record_size() {
        let total: usize = RecordField::ALL.iter().map(|f| f.width().bytes()).sum();
        assert_eq!(total, RECORD_SIZE);
    }

    #[test]
    fn field_order_matches_index() {
        for (i, field) in RecordField::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
        }
    }

    #[test]
    fn encoded_record_is_fixed_size() {
        let mut buf = BytesMut::new();
        encode_record(&sample(), &mut buf);
        assert_eq!(buf.len(), RECORD_SIZE);
    }

    #[test]
    fn encoded_record_decodes_field_for_field() {
        let record = FlowRecord {
            flags: 0x1B,
            pad: 0xBEEF,
            ..sample()
        };
        let mut buf = BytesMut::new();
        encode_record(&record, &mut buf);
        assert_eq!(decode_record(&buf), record);
    }

    #[test]
    fn fields_are_big_endian() {
        let mut buf = BytesMut::new();
        encode_record(&sample(), &mut buf);

        assert_eq!(&buf[0..4], &[10, 0, 0, 1]);
        assert_eq!(&buf[4..8], &[192, 168, 1, 2]);
        assert_eq!(&buf[8..12], &20u32.to_be_bytes());
        assert_eq!(&buf[24..26], &49761u16.to_be_bytes());
        assert_eq!(&buf[26..28], &3389u16.to_be_bytes());
        assert_eq!(buf[28], 0);
        assert_eq!(buf[29], 6);
        assert_eq!(&buf[30..32], &[0, 0]);
    }

    #[test]
    fn extreme_values_survive_encoding() {
        let record = FlowRecord {
            sip: u32::MAX,
            dip: 0,
            packets: u32::MAX,
            bytes: u32::MAX,
            start: 0,
            end: u32::MAX,
            sp: u16::MAX,
            dp: 0,
            flags: u8::MAX,
            proto: u8::MAX,
            pad: u16::MAX,
        };
        let mut buf = BytesMut::new();
        encode_record(&record, &mut buf);
        assert_eq!(decode_record(&buf), record);
    }
}
