//! Port contracts for the process config store.

pub mod source;

pub use source::{ProcessConfigSource, ProcessSourceError, ProcessSourceResult};
