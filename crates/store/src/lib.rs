//! gocart Store - cart state with durable persistence.
//!
//! Holds the cart's line items in memory, hydrates them once from a
//! key-value store on open, and writes the full cart back after every change.
//!
//! # Architecture
//!
//! - [`CartStore`] owns the state and is created by the application's
//!   composition root. Consumers get [`CartHandle`]s.
//! - Changes are published on a `tokio::sync::watch` channel; subscribers
//!   pull the current [`CartState`] snapshot.
//! - Persistence runs on a background task that drains writes in order.
//!   Failed writes are logged and dropped, never retried.
//!
//! # Example
//!
//! ```rust,no_run
//! use gocart_store::{CartStore, MemoryStore, NewCartItem};
//! use gocart_core::{Price, ProductId};
//!
//! # async fn demo() {
//! let store = CartStore::open(MemoryStore::new()).await;
//! store.add_to_cart(NewCartItem {
//!     id: ProductId::new("A"),
//!     title: "Tee".to_string(),
//!     image_url: "https://cdn.example/tee.png".to_string(),
//!     price: Price::from_cents(1000),
//! });
//! store.increment(&ProductId::new("A"));
//! assert_eq!(store.items().len(), 1);
//! store.close().await;
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod error;
pub mod item;
mod persist;
pub mod state;
pub mod storage;

pub use cart::CartState;
pub use gocart_core::{Price, ProductId, Quantity};
pub use config::{CartConfig, ConfigError};
pub use error::{CartError, Result};
pub use item::{CartItem, NewCartItem};
pub use state::{CartHandle, CartStore};
pub use storage::{FileStore, KeyValueStore, MemoryStore, STORAGE_KEY, StorageError};
