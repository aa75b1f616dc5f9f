//! Connection-processing server.
//!
//! # Data Flow
//! ```text
//! Server<P>::run (loop, one connection at a time)
//!     → P::accept   (block on listener, receive request)
//!     → P::handle   (inspect request)
//!     → P::respond  (write response, close)
//!     → back to accept
//!
//! Stages per iteration:
//!     WaitConnection → Accepting → Handling → Responding → WaitConnection
//! ```
//!
//! # Design Decisions
//! - The stages are a `Pipeline` trait injected into a generic driver
//! - A failed stage skips the rest of its iteration, never the loop
//! - `respond` consumes the connection, so it is closed before the next accept

pub mod error;
pub mod fixed;
pub mod pipeline;

pub use error::ConnectionError;
pub use fixed::{FixedResponsePipeline, FIXED_RESPONSE};
pub use pipeline::{Pipeline, Server, Stage};
