use std::net::SocketAddr;

/// Errors that can occur in datagram transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The destination host name is empty.
    #[error("destination host must not be empty")]
    EmptyHost,

    /// Name resolution for the destination failed.
    #[error("failed to resolve {host}:{port}: {source}")]
    Resolve {
        host: String,
        port: u16,
        source: std::io::Error,
    },

    /// Name resolution succeeded but yielded no usable address.
    #[error("no address found for {host}:{port}")]
    NoAddress { host: String, port: u16 },

    /// Failed to bind the local sending socket.
    #[error("failed to bind local socket {local}: {source}")]
    Bind {
        local: SocketAddr,
        source: std::io::Error,
    },

    /// The datagram could not be sent.
    #[error("failed to send datagram to {destination}: {source}")]
    Send {
        destination: String,
        source: std::io::Error,
    },

    /// The socket accepted fewer bytes than the datagram holds.
    #[error("short send to {destination} ({sent} of {len} bytes)")]
    ShortSend {
        destination: String,
        sent: usize,
        len: usize,
    },
}

pub type Result<T> = std::result::Result<T, TransportError>;
