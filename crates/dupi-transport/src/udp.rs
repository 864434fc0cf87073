use std::io::ErrorKind;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs, UdpSocket};

use tracing::{debug, trace};

use crate::error::{Result, TransportError};
use crate::traits::{DatagramTransport, Destination};

/// Largest payload a single IPv4 UDP datagram can carry (65535 - 20 - 8).
pub const MAX_UDP_PAYLOAD: usize = 65_507;

/// UDP transport over `std::net::UdpSocket`.
///
/// Sending sockets are bound lazily to an ephemeral port, one per address
/// family, the first time a datagram goes to a destination of that family.
#[derive(Debug, Default)]
pub struct UdpTransport {
    v4: Option<UdpSocket>,
    v6: Option<UdpSocket>,
}

impl UdpTransport {
    /// Create a transport with no sockets bound yet.
    pub fn new() -> Self {
        Self::default()
    }

    fn socket_for(&mut self, addr: &SocketAddr) -> Result<&UdpSocket> {
        let (slot, local) = match addr {
            SocketAddr::V4(_) => (&mut self.v4, SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))),
            SocketAddr::V6(_) => (&mut self.v6, SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))),
        };

        if slot.is_none() {
            let socket =
                UdpSocket::bind(local).map_err(|source| TransportError::Bind { local, source })?;
            debug!(local = ?socket.local_addr().ok(), "bound udp sending socket");
            *slot = Some(socket);
        }

        slot.as_ref().ok_or_else(|| TransportError::Bind {
            local,
            source: std::io::Error::other("socket slot empty after bind"),
        })
    }
}

impl DatagramTransport for UdpTransport {
    fn resolve(&self, host: &str, port: u16) -> Result<Destination> {
        if host.trim().is_empty() {
            return Err(TransportError::EmptyHost);
        }

        let mut addrs = (host, port)
            .to_socket_addrs()
            .map_err(|source| TransportError::Resolve {
                host: host.to_string(),
                port,
                source,
            })?;

        let addr = addrs.next().ok_or_else(|| TransportError::NoAddress {
            host: host.to_string(),
            port,
        })?;

        debug!(host, port, %addr, "resolved destination");
        Ok(Destination::new(host, port, addr))
    }

    fn send_to(&mut self, datagram: &[u8], destination: &Destination) -> Result<usize> {
        let addr = destination.addr();
        let socket = self.socket_for(&addr)?;

        let sent = loop {
            match socket.send_to(datagram, addr) {
                Ok(n) => break n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(TransportError::Send {
                        destination: destination.to_string(),
                        source,
                    })
                }
            }
        };

        if sent != datagram.len() {
            return Err(TransportError::ShortSend {
                destination: destination.to_string(),
                sent,
                len: datagram.len(),
            });
        }

        trace!(bytes = sent, %addr, "datagram sent");
        Ok(sent)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn resolves_literal_address() {
        let transport = UdpTransport::new();
        let dest = transport.resolve("127.0.0.1", 9995).unwrap();
        assert_eq!(dest.addr(), "127.0.0.1:9995".parse().unwrap());
        assert_eq!(dest.to_string(), "127.0.0.1:9995");
    }

    #[test]
    fn rejects_empty_host() {
        let transport = UdpTransport::new();
        let err = transport.resolve("  ", 9995).unwrap_err();
        assert!(matches!(err, TransportError::EmptyHost));
    }

    #[test]
    fn sends_datagram_to_loopback() {
        let receiver = UdpSocket::bind("127.0.0.1:0").unwrap();
        receiver
            .set_read_timeout(Some(Duration::from_secs(2)))
            .unwrap();
        let port = receiver.local_addr().unwrap().port();

        let mut transport = UdpTransport::new();
        let dest = transport.resolve("127.0.0.1", port).unwrap();
        let sent = transport.send_to(b"dupi", &dest).unwrap();
        assert_eq!(sent, 4);

        let mut buf = [0u8; 64];
        let (n, _) = receiver.recv_from(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"dupi");
    }

    #[test]
    fn reuses_socket_across_sends() {
        let receiver = UdpSocket::bind("127.0.0.1:0").unwrap();
        receiver
            .set_read_timeout(Some(Duration::from_secs(2)))
            .unwrap();
        let port = receiver.local_addr().unwrap().port();

        let mut transport = UdpTransport::new();
        let dest = transport.resolve("127.0.0.1", port).unwrap();
        transport.send_to(b"one", &dest).unwrap();
        transport.send_to(b"two", &dest).unwrap();

        let mut buf = [0u8; 64];
        let (_, from_first) = receiver.recv_from(&mut buf).unwrap();
        let (_, from_second) = receiver.recv_from(&mut buf).unwrap();
        assert_eq!(from_first, from_second);
        assert!(transport.v6.is_none());
    }

    #[test]
    fn oversized_datagram_is_a_send_error() {
        let mut transport = UdpTransport::new();
        let dest = transport.resolve("127.0.0.1", 9).unwrap();
        let huge = vec![0u8; MAX_UDP_PAYLOAD + 1];
        let err = transport.send_to(&huge, &dest).unwrap_err();
        assert!(matches!(err, TransportError::Send { .. }));
    }
}
