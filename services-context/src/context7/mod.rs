//! Context7 implementation of the contextual-search client.
//!
//! This module provides a concrete implementation of `ContextProvider`
//! backed by the Context7 HTTP API.

mod client;

pub use client::Context7Client;
