//! Seagrape Core - Shared types library.
//!
//! This crate provides common types used across all Seagrape components:
//! - `engine` - Cross-selling rule evaluation
//! - The admin panel and platform proxy layers that consume them
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, the product read model, field values, and the
//!   cross-selling rule definition model

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
