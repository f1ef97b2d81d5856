//! Network connect-and-send action

use crate::context::InvocationContext;
use crate::engine::actions::{now_timestamp, ActivityDetails, NetworkDetails, SuccessRecord};
use crate::error::{CanaryError, Result};
use clap::ValueEnum;
use nix::sys::socket::{
    bind, connect, getsockname, send, socket, AddressFamily, MsgFlags, SockFlag, SockType, SockaddrIn,
};
use serde::{Deserialize, Serialize};
use std::io;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, ToSocketAddrs};
use std::os::fd::{AsRawFd, OwnedFd};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    #[default]
    Tcp,
    Udp,
}

impl Protocol {
    fn sock_type(&self) -> SockType {
        match self {
            Protocol::Tcp => SockType::Stream,
            Protocol::Udp => SockType::Datagram,
        }
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Protocol::Tcp => f.write_str("tcp"),
            Protocol::Udp => f.write_str("udp"),
        }
    }
}

/// Open one socket, connect it to `host:port` and send `data` through it.
///
/// TCP and UDP take the same path: bind to an ephemeral port, connect, send.
/// The socket is closed when this function returns, whatever the outcome.
pub fn send_packet(
    host: &str,
    port: u16,
    protocol: Protocol,
    data: Option<&str>,
    ctx: &InvocationContext,
) -> Result<SuccessRecord> {
    let payload = data.unwrap_or_default().as_bytes();

    let socket = Socket::open(protocol)?;
    socket.bind(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 0))?;
    let source_host = resolve_ipv4("localhost", 0)?;
    let source_port = socket.local_port()?;
    log::debug!("Bound {} socket to port {}", protocol, source_port);

    let started = now_timestamp();
    let destination = resolve_ipv4(host, port)?;

    let refused = |e: io::Error| match e.kind() {
        io::ErrorKind::ConnectionRefused => CanaryError::ConnectionRefused {
            host: host.to_string(),
            port,
        },
        _ => CanaryError::IoError(e),
    };
    socket.connect(destination).map_err(refused)?;
    let sent = socket.send(payload).map_err(refused)?;
    log::debug!("Sent {} of {} bytes to {}", sent, payload.len(), destination);

    Ok(SuccessRecord::from_context(
        started,
        ctx,
        ActivityDetails::Network(NetworkDetails {
            destination: format!("{}:{}", host, port),
            source: format!("{}:{}", source_host.ip(), source_port),
            size: payload.len(),
            protocol,
        }),
    ))
}

fn resolve_ipv4(host: &str, port: u16) -> Result<SocketAddrV4> {
    (host, port)
        .to_socket_addrs()?
        .find_map(|addr| match addr {
            SocketAddr::V4(v4) => Some(v4),
            SocketAddr::V6(_) => None,
        })
        .ok_or_else(|| CanaryError::Resolve(host.to_string()))
}

/// IPv4 socket that is closed when dropped
struct Socket(OwnedFd);

impl Socket {
    fn open(protocol: Protocol) -> io::Result<Self> {
        let fd = socket(AddressFamily::Inet, protocol.sock_type(), SockFlag::empty(), None)?;
        Ok(Socket(fd))
    }

    fn bind(&self, addr: SocketAddrV4) -> io::Result<()> {
        bind(self.0.as_raw_fd(), &SockaddrIn::from(addr))?;
        Ok(())
    }

    fn connect(&self, addr: SocketAddrV4) -> io::Result<()> {
        connect(self.0.as_raw_fd(), &SockaddrIn::from(addr))?;
        Ok(())
    }

    fn local_port(&self) -> io::Result<u16> {
        let addr: SockaddrIn = getsockname(self.0.as_raw_fd())?;
        Ok(addr.port())
    }

    fn send(&self, data: &[u8]) -> io::Result<usize> {
        Ok(send(self.0.as_raw_fd(), data, MsgFlags::empty())?)
    }
}
