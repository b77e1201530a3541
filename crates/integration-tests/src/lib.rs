//! Integration tests for gocart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p gocart-integration-tests
//! # With logs
//! RUST_LOG=gocart_store=debug cargo test -p gocart-integration-tests -- --nocapture
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Carts surviving a close/reopen against the file store
//! - `cart_handles` - Handles, subscriptions and concurrent callers

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use gocart_core::{Price, ProductId};
use gocart_store::NewCartItem;
use tracing_subscriber::EnvFilter;

/// Install a test-friendly tracing subscriber once per test binary.
///
/// Defaults to `warn` unless `RUST_LOG` is set.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_test_writer()
        .try_init();
}

/// A fresh, not-yet-created directory under the system temp dir.
#[must_use]
pub fn temp_storage_dir() -> PathBuf {
    std::env::temp_dir().join(format!("gocart-it-{}", uuid::Uuid::new_v4()))
}

/// A catalog product with a predictable title, image and price.
#[must_use]
pub fn product(id: &str, cents: i64) -> NewCartItem {
    NewCartItem {
        id: ProductId::new(id),
        title: format!("Product {id}"),
        image_url: format!("https://cdn.example/{id}.png"),
        price: Price::from_cents(cents),
    }
}
