//! # Services Shared
//!
//! Types shared by the external service clients and the validation harness.
//!
//! Every outward-facing client call returns one of the envelope types defined
//! here instead of a bare `Result`, so callers always receive a value they can
//! inspect or render as JSON.

pub mod envelope;
pub mod status;
pub mod vector;

pub use envelope::{Envelope, ErrorKind, ServiceError};
pub use status::{Status, StatusEnvelope};
pub use vector::{ScoredRecord, VectorRecord};
