//! lanjack-server library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.

/// Per-round dealing, decision, and resolution state machine.
pub mod engine;

/// Network services: the offer broadcaster and the per-connection session loop.
pub mod net;
