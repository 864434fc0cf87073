use std::io::Read;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};

/// Upper bound on a decompressed log message.
pub const MAX_DECODED_SIZE: u64 = 64 * 1024 * 1024;

/// Errors that can occur while decoding or checking the input envelope.
#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    /// The `awslogs.data` field is not valid base64.
    #[error("envelope data is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded data is not a valid gzip stream.
    #[error("envelope data is not valid gzip: {0}")]
    Gzip(std::io::Error),

    /// The decompressed message exceeds [`MAX_DECODED_SIZE`].
    #[error("decompressed message exceeds {max} bytes")]
    TooLarge { max: u64 },

    /// The event or message is not valid JSON of the expected shape.
    #[error("envelope is not a valid log message: {0}")]
    Json(#[from] serde_json::Error),

    /// The message kind does not carry flow log data.
    #[error("Received invalid message with type {0}")]
    UnsupportedKind(String),
}

/// Trigger event as delivered by a log subscription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerEvent {
    pub awslogs: AwsLogs,
}

/// Compressed payload wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwsLogs {
    /// base64(gzip(json)) of a [`LogsMessage`].
    pub data: String,
}

impl TriggerEvent {
    /// Decode `awslogs.data` into the log message it carries.
    pub fn decode(&self) -> Result<LogsMessage, EnvelopeError> {
        let compressed = STANDARD.decode(self.awslogs.data.trim())?;

        let mut json = Vec::new();
        GzDecoder::new(compressed.as_slice())
            .take(MAX_DECODED_SIZE + 1)
            .read_to_end(&mut json)
            .map_err(EnvelopeError::Gzip)?;
        if json.len() as u64 > MAX_DECODED_SIZE {
            return Err(EnvelopeError::TooLarge {
                max: MAX_DECODED_SIZE,
            });
        }

        Ok(serde_json::from_slice(&json)?)
    }
}

/// Kind of a decoded log message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageKind {
    /// Carries log events.
    Data,
    /// Subscription health check; no log events.
    Control,
    /// Anything else.
    Other(String),
}

impl MessageKind {
    pub fn parse(kind: &str) -> Self {
        match kind {
            "DATA_MESSAGE" => MessageKind::Data,
            "CONTROL_MESSAGE" => MessageKind::Control,
            other => MessageKind::Other(other.to_string()),
        }
    }
}

/// Decoded log subscription message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogsMessage {
    pub message_type: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub log_group: String,
    #[serde(default)]
    pub log_stream: String,
    #[serde(default)]
    pub subscription_filters: Vec<String>,
    #[serde(default)]
    pub log_events: Vec<LogEvent>,
}

/// One log event; `message` is the flow log line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogEvent {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub timestamp: i64,
    pub message: String,
}

impl LogsMessage {
    pub fn kind(&self) -> MessageKind {
        MessageKind::parse(&self.message_type)
    }

    /// Fail unless this message carries flow log data.
    pub fn ensure_data(&self) -> Result<(), EnvelopeError> {
        match self.kind() {
            MessageKind::Data => Ok(()),
            _ => Err(EnvelopeError::UnsupportedKind(self.message_type.clone())),
        }
    }

    /// The flow log lines, in event order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.log_events.iter().map(|event| event.message.as_str())
    }
}

/// Decode either a trigger event (`{"awslogs": {"data": ...}}`) or an
/// already decoded [`LogsMessage`].
pub fn decode_event(json: &[u8]) -> Result<LogsMessage, EnvelopeError> {
    let value: serde_json::Value = serde_json::from_slice(json)?;
    if value.get("awslogs").is_some() {
        let event: TriggerEvent = serde_json::from_value(value)?;
        event.decode()
    } else {
        Ok(serde_json::from_value(value)?)
    }
}
