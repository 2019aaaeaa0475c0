//! `carton-core` -- shared naming and error types for the Carton Case
//! Management operational tooling.

pub mod environment;
pub mod error;
