//! gocart Core - Shared domain types.
//!
//! This crate provides the value types used across all gocart components:
//! - `store` - In-memory cart state with durable key-value persistence
//! - `integration-tests` - Cross-crate tests against real storage backends
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no async
//! runtime. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, and quantities

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
