//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `probe.rs` — one probe cycle: rpc, verdict, print, alert fan-out.
//!
//! ## Principles
//! - Resolve CLI/config inputs here.
//! - Delegate business logic to `services/*`.
//! - Keep behavior and output schema stable.

pub mod probe;

pub use probe::handle_probe;
