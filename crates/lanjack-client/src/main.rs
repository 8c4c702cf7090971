//! Lanjack client entry point.
//!
//! Asks once for a round count, then loops forever: discover a table over
//! UDP, connect over TCP, play the requested rounds, print the tally, and
//! go back to listening for the next offer.

use std::net::TcpStream;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use lanjack_client::console::{prompt_round_count, ConsolePrompt, ConsoleTable};
use lanjack_client::discovery::wait_for_offer;
use lanjack_client::table::play_game;
use lanjack_core::DISCOVERY_PORT;

/// Team name sent in every join request.
const TEAM_NAME: &str = "RustPlayer";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let num_rounds = prompt_round_count()?;

    loop {
        println!("Client started, listening for offer requests...");
        let (game_addr, offer) = match wait_for_offer(DISCOVERY_PORT) {
            Ok(found) => found,
            Err(e) => {
                error!("discovery failed: {e}");
                continue;
            }
        };
        println!("Received offer from {} ({})", game_addr.ip(), offer.team_name);

        let mut stream = match TcpStream::connect(game_addr) {
            Ok(stream) => stream,
            Err(e) => {
                error!("failed to connect to {game_addr}: {e}");
                continue;
            }
        };
        info!(%game_addr, "connected, playing {num_rounds} rounds");

        let mut prompt = ConsolePrompt;
        let mut display = ConsoleTable;
        match play_game(&mut stream, num_rounds, TEAM_NAME, &mut prompt, &mut display) {
            Ok(report) => info!("game over, {} wins of {}", report.wins, report.rounds),
            Err(e) => error!("game error: {e}"),
        }
        // Either way, fall through to rediscovery for the next game.
    }
}
