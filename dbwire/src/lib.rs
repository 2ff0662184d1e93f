//! Request/reply correlation for an asynchronous database wire client.
//!
//! Callers register the id of each request they send, the reply dispatcher hands every
//! decoded reply to the connection's waiting list, and tearing the connection down fails
//! whatever is still waiting. Each request reaches exactly one outcome.

pub mod callback;
pub mod connection;
pub mod handshake;
pub mod net;
