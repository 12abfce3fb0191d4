//! Command line entry points.

pub mod query;

pub use query::{QueryCommand, execute, run};
