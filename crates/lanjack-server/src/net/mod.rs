//! Network services for the server.

pub mod broadcast;
pub mod session;

pub use broadcast::{start_offer_broadcaster, BroadcastError, OFFER_INTERVAL};
pub use session::{run_session, SessionConfig, SessionError};
