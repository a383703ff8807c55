//! # Services Context
//!
//! Client for the Context7 contextual-search API. It includes the
//! `ContextProvider` interface, its configuration, and a concrete
//! implementation that talks to the remote API over HTTPS.
//!
//! Every call returns an [`Envelope`](services_shared::Envelope); transport,
//! status and decode failures are logged and converted, never propagated.

pub mod config;
pub mod context7;
pub mod interfaces;

pub use config::ContextSearchConfig;
pub use context7::Context7Client;
pub use interfaces::ContextProvider;
