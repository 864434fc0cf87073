use std::time::{SystemTime, UNIX_EPOCH};

use bytes::{BufMut, BytesMut};

/// Header block: version (2) + count (2) + ts_sec (4) + ts_nsec (4) +
/// sampling (4) + site name (16) = 32 bytes.
pub const HEADER_SIZE: usize = 32;

/// PDU protocol version carried in every header.
pub const PDU_VERSION: u16 = 20;

/// Sampling factor when every flow is exported.
pub const DEFAULT_SAMPLING: u32 = 1;

/// Width of the site name field in bytes.
pub const SITE_NAME_LEN: usize = 16;

/// Site label used when none is configured.
pub const DEFAULT_SITE_NAME: &str = "aws-site";

/// Capture instant split into whole seconds and nanosecond remainder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PduTimestamp {
    pub secs: u32,
    pub nsecs: u32,
}

impl PduTimestamp {
    /// Split a wall-clock instant into epoch seconds and sub-second nanos.
    ///
    /// Instants before the epoch map to zero; seconds past `u32::MAX`
    /// saturate.
    pub fn from_system_time(instant: SystemTime) -> Self {
        let since_epoch = instant.duration_since(UNIX_EPOCH).unwrap_or_default();
        Self {
            secs: u32::try_from(since_epoch.as_secs()).unwrap_or(u32::MAX),
            nsecs: since_epoch.subsec_nanos(),
        }
    }
}

/// Fixed-width site label: truncated or zero-padded to [`SITE_NAME_LEN`].
///
/// Truncation is silent and byte-wise; the label is advisory metadata.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SiteName([u8; SITE_NAME_LEN]);

impl SiteName {
    pub fn new(label: &str) -> Self {
        let mut bytes = [0u8; SITE_NAME_LEN];
        let src = label.as_bytes();
        let len = src.len().min(SITE_NAME_LEN);
        bytes[..len].copy_from_slice(&src[..len]);
        Self(bytes)
    }

    /// The raw field bytes as written on the wire.
    pub fn as_bytes(&self) -> &[u8; SITE_NAME_LEN] {
        &self.0
    }

    /// Whether the given label would be cut short by the field width.
    pub fn truncates(label: &str) -> bool {
        label.len() > SITE_NAME_LEN
    }
}

impl Default for SiteName {
    fn default() -> Self {
        Self::new(DEFAULT_SITE_NAME)
    }
}

impl std::fmt::Debug for SiteName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let end = self.0.iter().position(|b| *b == 0).unwrap_or(SITE_NAME_LEN);
        f.debug_tuple("SiteName")
            .field(&String::from_utf8_lossy(&self.0[..end]))
            .finish()
    }
}

/// Per-PDU metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PduHeader {
    /// Protocol version.
    pub version: u16,
    /// Records following this header.
    pub flow_count: u16,
    /// Capture instant, taken once per PDU.
    pub timestamp: PduTimestamp,
    /// Sampling factor 1/n.
    pub sampling: u32,
    /// Site the flows originate from.
    pub site_name: SiteName,
}

impl PduHeader {
    /// Header for `flow_count` records with the default version.
    pub fn new(flow_count: u16, timestamp: PduTimestamp, sampling: u32, site_name: SiteName) -> Self {
        Self {
            version: PDU_VERSION,
            flow_count,
            timestamp,
            sampling,
            site_name,
        }
    }
}

/// Encode a header into its 32-byte wire form.
///
/// Wire format (big-endian):
/// ```text
/// ┌─────────┬────────────┬────────┬─────────┬──────────┬─────────────┐
/// │ version │ flow_count │ ts_sec │ ts_nsec │ sampling │ site_name   │
/// │ (2B)    │ (2B)       │ (4B)   │ (4B)    │ (4B)     │ (16B, NUL   │
/// │         │            │        │         │          │  padded)    │
/// └─────────┴────────────┴────────┴─────────┴──────────┴─────────────┘
/// ```
pub fn encode_header(header: &PduHeader, dst: &mut BytesMut) {
    dst.reserve(HEADER_SIZE);
    dst.put_u16(header.version);
    dst.put_u16(header.flow_count);
    dst.put_u32(header.timestamp.secs);
    dst.put_u32(header.timestamp.nsecs);
    dst.put_u32(header.sampling);
    dst.put_slice(header.site_name.as_bytes());
}
