//! Configuration and dependency wiring for the harness.

mod dependencies;

pub use dependencies::{Dependencies, DATABASE_URL_VAR};
