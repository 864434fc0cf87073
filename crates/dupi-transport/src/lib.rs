//! Fire-and-forget datagram transport for DUPI PDUs.
//!
//! This is the lowest layer of dupi. The encoder hands a finished byte buffer
//! and a resolved [`Destination`] to a [`DatagramTransport`]; one call is one
//! unacknowledged datagram. There is no retry, acknowledgment or timeout
//! handling at this layer.

pub mod error;
pub mod traits;
pub mod udp;

pub use error::{Result, TransportError};
pub use traits::{DatagramTransport, Destination};
pub use udp::{UdpTransport, MAX_UDP_PAYLOAD};
