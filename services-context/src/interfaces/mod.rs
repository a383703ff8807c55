//! Interface definitions for the contextual-search client.
//!
//! This module defines the abstract `ContextProvider` trait so consumers can
//! depend on the abstraction and swap in a fake for testing.

mod context_provider;

pub use context_provider::ContextProvider;
