//! Cart error types.
//!
//! Storage and parse failures never reach callers: hydration falls back to an
//! empty cart and the writer logs and drops failed writes. What remains is
//! misuse of the API, which fails immediately.

use thiserror::Error;

/// Errors surfaced by the cart API.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// A handle was used after its owning `CartStore` was closed or dropped.
    #[error("cart used outside of an active cart store")]
    Detached,
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
