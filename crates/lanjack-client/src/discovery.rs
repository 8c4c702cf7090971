//! UDP offer discovery.
//!
//! The client binds the well-known discovery port and blocks until a valid
//! Offer datagram arrives.  The port is bound with address and port reuse
//! so several clients on one host can listen at once.  Anything that fails
//! the length, cookie, or type checks is foreign broadcast noise: dropped
//! at debug level, and listening continues.
//!
//! No timeout is imposed — the caller waits as long as it takes.  That is
//! deliberate: clients rediscover between games, so a vanished server just
//! means waiting for the next one to start broadcasting.

use std::net::{Ipv4Addr, SocketAddr, UdpSocket};

use lanjack_core::{protocol::codec::decode_offer, OfferMessage};
use socket2::{Domain, Protocol, Socket, Type};
use thiserror::Error;
use tracing::{debug, info};

/// Error type for discovery operations.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The UDP socket could not be bound.
    #[error("failed to bind discovery socket on {addr}: {source}")]
    BindFailed {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    /// An I/O error occurred while receiving a datagram.
    #[error("recv error: {0}")]
    Recv(std::io::Error),
}

/// Blocks until a valid Offer arrives on `discovery_port`.
///
/// Returns the game endpoint — the sender's address combined with the TCP
/// port embedded in the offer — together with the decoded offer itself.
///
/// # Errors
///
/// Returns [`DiscoveryError`] if the socket cannot be bound or a receive
/// fails outright.  Undecodable datagrams are not errors; they are skipped.
pub fn wait_for_offer(discovery_port: u16) -> Result<(SocketAddr, OfferMessage), DiscoveryError> {
    let addr: SocketAddr = (Ipv4Addr::UNSPECIFIED, discovery_port).into();
    let socket = bind_reusable(addr)?;

    let mut buf = [0u8; 1024];
    loop {
        let (len, src) = socket.recv_from(&mut buf).map_err(DiscoveryError::Recv)?;

        match decode_offer(&buf[..len]) {
            Ok(offer) => {
                info!("received offer from {} ({})", src.ip(), offer.team_name);
                let game_addr = SocketAddr::new(src.ip(), offer.tcp_port);
                return Ok((game_addr, offer));
            }
            Err(e) => {
                debug!("discarding datagram from {src}: {e}");
            }
        }
    }
}

/// Binds a UDP socket with `SO_REUSEADDR` (and `SO_REUSEPORT` where the
/// platform has it), so multiple clients on one host can share the
/// discovery port.
fn bind_reusable(addr: SocketAddr) -> Result<UdpSocket, DiscoveryError> {
    let make = || -> std::io::Result<UdpSocket> {
        let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;
        socket.set_reuse_address(true)?;
        #[cfg(all(unix, not(any(target_os = "solaris", target_os = "illumos"))))]
        socket.set_reuse_port(true)?;
        socket.bind(&addr.into())?;
        Ok(socket.into())
    };
    make().map_err(|source| DiscoveryError::BindFailed { addr, source })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
