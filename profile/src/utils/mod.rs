//! Utility helpers shared across the library.
//!
//! Currently this is limited to [`env`], the validated environment-variable
//! access layer that backs the env-var override tier of endpoint resolution.

pub mod env;

pub use env::EnvUtils;
