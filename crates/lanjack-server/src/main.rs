//! Lanjack server entry point.
//!
//! Binds the game TCP listener on an ephemeral port, starts the offer
//! broadcaster, and accepts connections forever — one spawned task per
//! session, each owning its own round engine and draw source.
//!
//! ```text
//! main()
//!  └─ TcpListener::bind(:0)        -- ephemeral game port
//!  └─ start_offer_broadcaster()    -- UDP background thread, 1 s ticks
//!  └─ accept loop
//!       └─ tokio::spawn(run_session)  per connection
//! ```

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use lanjack_server::net::broadcast::start_offer_broadcaster;
use lanjack_server::net::session::{run_session, SessionConfig};

/// Team name advertised in every offer.  The protocol carries no other
/// server identity.
const TEAM_NAME: &str = "TheAceArchitects";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let listener = TcpListener::bind(("0.0.0.0", 0)).await?;
    let game_port = listener.local_addr()?.port();
    info!("server started, listening on TCP port {game_port}");

    // Shutdown flag shared with the broadcaster thread.
    let running = Arc::new(AtomicBool::new(true));
    start_offer_broadcaster(game_port, TEAM_NAME.to_string(), Arc::clone(&running))?;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown signal received");
                running.store(false, Ordering::Relaxed);
                break;
            }
            accepted = listener.accept() => {
                match accepted {
                    Ok((stream, peer)) => {
                        info!(%peer, "accepted connection");
                        tokio::spawn(async move {
                            let draw = lanjack_core::RngDraw::from_entropy();
                            match run_session(stream, peer, draw, SessionConfig::default()).await {
                                Ok(()) => info!(%peer, "session ended"),
                                Err(e) => error!(%peer, "session aborted: {e}"),
                            }
                        });
                    }
                    Err(e) => error!("accept failed: {e}"),
                }
            }
        }
    }

    info!("server stopped");
    Ok(())
}
