//! # Azprofile Library
//!
//! Core library for cloud environment definitions and account credential
//! resolution. It models named deployment environments (sovereign-cloud
//! endpoint bundles), resolves endpoint parameters with env-var override
//! semantics, and exchanges user or service-principal credentials for a
//! normalized list of subscriptions.
//!
//! ## Modules
//!
//! - [`environment`] - Endpoint registry, environment definitions and the built-in catalog
//! - [`auth`] - Auth configuration, token types and the token authority
//! - [`account`] - Subscription model and the account login orchestrator
//! - [`management`] - Thin management-API clients (classic and resource manager)
//! - [`common`] - Shared error types
//! - [`utils`] - Utility functions and helpers

pub mod account;
pub mod auth;
pub mod common;
pub mod environment;
pub mod management;
pub mod utils;
