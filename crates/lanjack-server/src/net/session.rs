//! Per-connection game session loop.
//!
//! One session owns one TCP connection, one draw source, and one round
//! engine at a time.  Sessions are fully independent: no shared state, no
//! locks — a failure here aborts this session only, never the accept loop
//! or the broadcaster.
//!
//! Consecutive event sends are paced by [`SessionConfig::send_delay`] so a
//! naive receiver is less likely to see several fixed-size frames coalesce
//! into one read.  This is a mitigation, not a protocol guarantee; the
//! client reassembles from the byte stream regardless.

use std::net::SocketAddr;
use std::time::Duration;

use lanjack_core::{
    protocol::codec::{decode_decision, decode_join_request, encode_game_event},
    protocol::messages::{DECISION_LEN, JOIN_REQUEST_LEN},
    DecisionMessage, DrawSource, GameEventMessage, ProtocolError,
};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time;
use tracing::{debug, info};

use crate::engine::Round;

/// Errors that abort a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// An I/O error occurred on the established connection.
    #[error("connection I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The peer closed the connection mid-round.
    #[error("connection closed by peer")]
    Closed,

    /// The peer sent something that is neither our protocol nor ignorable
    /// noise.
    #[error("protocol violation: {0}")]
    Protocol(#[from] ProtocolError),
}

/// Tunables for one session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Pause between consecutive event sends in the dealing and dealer
    /// phases.
    pub send_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            send_delay: Duration::from_millis(50),
        }
    }
}

/// Drives one full game session on an accepted connection: join request,
/// then the requested number of rounds, then the connection closes.
///
/// # Errors
///
/// Returns [`SessionError`] for transport failures and protocol violations.
/// A join request that fails the cookie filter is not an error — the
/// connection is closed quietly, as it was never ours to begin with.
pub async fn run_session<S, D>(
    mut stream: S,
    peer: SocketAddr,
    mut draw: D,
    config: SessionConfig,
) -> Result<(), SessionError>
where
    S: AsyncRead + AsyncWrite + Unpin,
    D: DrawSource,
{
    let mut join_buf = [0u8; JOIN_REQUEST_LEN];
    if let Err(e) = stream.read_exact(&mut join_buf).await {
        debug!(%peer, "connection ended before join request: {e}");
        return Ok(());
    }

    let join = match decode_join_request(&join_buf) {
        Ok(join) => join,
        Err(e) => {
            debug!(%peer, "discarding invalid join request: {e}");
            return Ok(());
        }
    };

    info!(
        %peer,
        team = %join.team_name,
        rounds = join.num_rounds,
        "starting game"
    );

    for round_no in 1..=join.num_rounds {
        debug!(%peer, round_no, "dealing");
        run_round(&mut stream, &mut draw, &config).await?;
    }

    info!(%peer, team = %join.team_name, "game finished");
    Ok(())
}

/// Plays one round to resolution.
async fn run_round<S, D>(
    stream: &mut S,
    draw: &mut D,
    config: &SessionConfig,
) -> Result<(), SessionError>
where
    S: AsyncRead + AsyncWrite + Unpin,
    D: DrawSource,
{
    let (mut round, events) = Round::deal(draw);
    send_events(stream, &events, config.send_delay).await?;

    while !round.is_resolved() {
        let decision = read_decision(stream).await?;
        let events = round.apply_decision(decision.decision, draw);
        send_events(stream, &events, config.send_delay).await?;
    }

    Ok(())
}

/// Reads decision frames until one passes the cookie filter.
async fn read_decision<S>(stream: &mut S) -> Result<DecisionMessage, SessionError>
where
    S: AsyncRead + Unpin,
{
    loop {
        let mut buf = [0u8; DECISION_LEN];
        if let Err(e) = stream.read_exact(&mut buf).await {
            return if e.kind() == std::io::ErrorKind::UnexpectedEof {
                Err(SessionError::Closed)
            } else {
                Err(SessionError::Io(e))
            };
        }

        match decode_decision(&buf) {
            Ok(decision) => return Ok(decision),
            Err(e) if e.is_discard() => {
                debug!("discarding foreign decision frame: {e}");
            }
            Err(e) => return Err(SessionError::Protocol(e)),
        }
    }
}

/// Writes each event, pausing between consecutive sends.
async fn send_events<S>(
    stream: &mut S,
    events: &[GameEventMessage],
    delay: Duration,
) -> Result<(), SessionError>
where
    S: AsyncWrite + Unpin,
{
    for (i, event) in events.iter().enumerate() {
        stream.write_all(&encode_game_event(event)).await?;
        stream.flush().await?;
        if i + 1 < events.len() && !delay.is_zero() {
            time::sleep(delay).await;
        }
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
