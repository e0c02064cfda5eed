//! Deployment environments and the endpoint registry.
//!
//! An [`Environment`] is a named bundle of endpoint values describing one
//! cloud deployment (global, sovereign, or a private instance). Endpoint
//! reads resolve through a process environment variable first and fall back
//! to the stored value; see [`Environment::get`] for the exact precedence.
//! The built-in public environments live in [`catalog`].

pub mod catalog;
pub mod endpoint;
pub mod environment;

pub use catalog::{catalog, find};
pub use endpoint::Endpoint;
pub use environment::Environment;
