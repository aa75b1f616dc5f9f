//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Validated config → Create socket → Bind → Listen → Build pipeline
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then logging, then sockets
//! - Fail fast: the binary exits on any startup error, no retry
//! - No shutdown path: the loop ends with the process

pub mod startup;

pub use startup::start;
