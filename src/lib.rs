//! Single-connection TCP server on raw sockets.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │                        SIMPLE SERVER                          │
//!   │                                                              │
//!   │  ┌──────────┐   ┌──────────────┐   ┌──────────────────┐     │
//!   │  │  socket  │──▶│ association  │──▶│     listener     │     │
//!   │  │ (create) │   │(bind/connect)│   │ (listen, accept) │     │
//!   │  └──────────┘   └──────────────┘   └────────┬─────────┘     │
//!   │                                             │                │
//!   │                                             ▼                │
//!   │                  ┌──────────────────────────────────────┐    │
//!   │  Client ────────▶│ Server<P>: accept → handle → respond │    │
//!   │         ◀────────│   P = FixedResponsePipeline          │    │
//!   │                  └──────────────────────────────────────┘    │
//!   │                                                              │
//!   │  Cross-cutting: config, observability, lifecycle             │
//!   └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Connections are served strictly one at a time.

// Core subsystems
pub mod net;
pub mod server;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;
