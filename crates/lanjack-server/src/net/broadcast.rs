//! UDP offer broadcasting.
//!
//! The server advertises its game TCP port so clients can find it without
//! prior configuration: every second, one Offer datagram goes to the LAN
//! broadcast address on the well-known discovery port.  There is no
//! acknowledgement and no retry logic — a lost offer is recovered by the
//! next tick, and a client that missed one simply waits a little longer.
//!
//! The broadcaster runs as a blocking loop on a dedicated thread for the
//! process lifetime, independent of any game session.  It only ever reads
//! the TCP port and team name it was started with, never session state.

use std::net::{Ipv4Addr, SocketAddr, UdpSocket};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use lanjack_core::{protocol::codec::encode_offer, OfferMessage, DISCOVERY_PORT};
use thiserror::Error;
use tracing::{info, warn};

/// Time between offer datagrams.
pub const OFFER_INTERVAL: Duration = Duration::from_secs(1);

/// Error type for broadcaster startup.
#[derive(Debug, Error)]
pub enum BroadcastError {
    /// The UDP socket could not be bound.
    #[error("failed to bind broadcast socket on {addr}: {source}")]
    BindFailed {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    /// The socket refused the broadcast option.
    #[error("failed to enable broadcast: {0}")]
    BroadcastOption(std::io::Error),
}

/// Binds a UDP socket and spawns a background thread that sends one Offer
/// per [`OFFER_INTERVAL`] until `running` clears.
///
/// # Errors
///
/// Returns [`BroadcastError`] if the socket cannot be bound or put into
/// broadcast mode.
pub fn start_offer_broadcaster(
    tcp_port: u16,
    team_name: String,
    running: Arc<AtomicBool>,
) -> Result<(), BroadcastError> {
    let addr: SocketAddr = (Ipv4Addr::UNSPECIFIED, 0).into();
    let socket =
        UdpSocket::bind(addr).map_err(|source| BroadcastError::BindFailed { addr, source })?;
    socket
        .set_broadcast(true)
        .map_err(BroadcastError::BroadcastOption)?;

    // The datagram never changes: rebuild-once, resend every tick.
    let packet = encode_offer(&OfferMessage {
        tcp_port,
        team_name,
    });

    std::thread::Builder::new()
        .name("lanjack-broadcast".to_string())
        .spawn(move || {
            broadcast_loop(socket, packet, running);
        })
        .expect("failed to spawn broadcast thread");

    info!("offer broadcaster advertising TCP port {tcp_port} on UDP {DISCOVERY_PORT}");
    Ok(())
}

/// The send loop executed on the broadcaster thread.
fn broadcast_loop(socket: UdpSocket, packet: Vec<u8>, running: Arc<AtomicBool>) {
    let dest: SocketAddr = (Ipv4Addr::BROADCAST, DISCOVERY_PORT).into();

    while running.load(Ordering::Relaxed) {
        if let Err(e) = socket.send_to(&packet, dest) {
            warn!("failed to send offer: {e}");
        }
        std::thread::sleep(OFFER_INTERVAL);
    }

    info!("offer broadcaster stopped");
}

// ── Tests ─────────────────────────────────────────────────────────────────────
