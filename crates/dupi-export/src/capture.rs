use std::net::{Ipv4Addr, SocketAddr};

use bytes::Bytes;
use dupi_transport::{DatagramTransport, Destination, Result, TransportError};

/// Transport that keeps every datagram in memory instead of sending it.
///
/// Used for dry runs. Resolution never touches DNS: any non-empty host maps
/// to the unspecified address on the given port.
#[derive(Debug, Default)]
pub struct CaptureTransport {
    datagrams: Vec<(Destination, Bytes)>,
}

impl CaptureTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured datagrams, in send order.
    pub fn datagrams(&self) -> impl Iterator<Item = &Bytes> {
        self.datagrams.iter().map(|(_, datagram)| datagram)
    }

    /// Captured datagrams with the destination each was sent to.
    pub fn sent(&self) -> &[(Destination, Bytes)] {
        &self.datagrams
    }

    pub fn len(&self) -> usize {
        self.datagrams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datagrams.is_empty()
    }
}

impl DatagramTransport for CaptureTransport {
    fn resolve(&self, host: &str, port: u16) -> Result<Destination> {
        if host.trim().is_empty() {
            return Err(TransportError::EmptyHost);
        }
        let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
        Ok(Destination::new(host, port, addr))
    }

    fn send_to(&mut self, datagram: &[u8], destination: &Destination) -> Result<usize> {
        self.datagrams
            .push((destination.clone(), Bytes::copy_from_slice(datagram)));
        Ok(datagram.len())
    }
}
