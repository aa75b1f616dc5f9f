//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! net, server, lifecycle
//!     → tracing events (fields: address, connection_id, bytes, stage)
//!     → logging.rs subscriber (env filter + fmt layer)
//!     → stdout
//! ```
//!
//! # Design Decisions
//! - Structured fields instead of formatted strings where possible
//! - Each loop iteration runs inside a `connection` span

pub mod logging;
