use std::fmt;
use std::net::SocketAddr;

use crate::error::Result;

/// A resolved datagram destination.
///
/// Keeps the configured host name next to the resolved socket address so
/// that diagnostics can report what the operator actually configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    host: String,
    port: u16,
    addr: SocketAddr,
}

impl Destination {
    /// Create a destination from an already resolved address.
    pub fn new(host: impl Into<String>, port: u16, addr: SocketAddr) -> Self {
        Self {
            host: host.into(),
            port,
            addr,
        }
    }

    /// The configured host name.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The configured port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// The resolved socket address datagrams are sent to.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// The transport collaborator the export pipeline talks to.
///
/// Implementations attempt a single unacknowledged send per call and signal
/// failure on resolution or send errors. They must not retry.
pub trait DatagramTransport {
    /// Resolve a configured host/port pair into a [`Destination`].
    fn resolve(&self, host: &str, port: u16) -> Result<Destination>;

    /// Send one datagram, returning the number of bytes handed to the network.
    fn send_to(&mut self, datagram: &[u8], destination: &Destination) -> Result<usize>;
}

impl<T: DatagramTransport + ?Sized> DatagramTransport for &mut T {
    fn resolve(&self, host: &str, port: u16) -> Result<Destination> {
        (**self).resolve(host, port)
    }

    fn send_to(&mut self, datagram: &[u8], destination: &Destination) -> Result<usize> {
        (**self).send_to(datagram, destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_display_uses_configured_host() {
        let addr: SocketAddr = "127.0.0.1:9995".parse().unwrap();
        let dest = Destination::new("collector.local", 9995, addr);
        assert_eq!(dest.to_string(), "collector.local:9995");
        assert_eq!(dest.addr(), addr);
        assert_eq!(dest.host(), "collector.local");
        assert_eq!(dest.port(), 9995);
    }
}
