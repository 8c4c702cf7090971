//! lanjack-client library entry point.
//!
//! The client is the player side of the table.  Its whole life is a
//! sequential, blocking flow — discovery blocks until an offer arrives,
//! then one game session runs to completion over blocking TCP reads and
//! writes, then the client returns to discovery.  There is deliberately no
//! concurrency and no receive timeout here: a stalled dealer stalls the
//! player, and rediscovery between games covers a vanished server.
//!
//! Modules:
//!
//! 1. [`discovery`] – blocks on the well-known UDP port until a valid
//!    Offer names a table to join.
//! 2. [`table`] – the round client: reassembles the event stream, labels
//!    cards for display, and asks its collaborator for hit/stand choices.
//! 3. [`console`] – the collaborators: stdin prompts and stdout display.

pub mod console;
pub mod discovery;
pub mod table;
