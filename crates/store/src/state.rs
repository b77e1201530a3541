//! The cart store and the handles consumers use to reach it.

use std::sync::{Arc, Weak};

use gocart_core::ProductId;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::cart::CartState;
use crate::config::CartConfig;
use crate::error::{CartError, Result};
use crate::item::NewCartItem;
use crate::persist::PersistQueue;
use crate::storage::{FileStore, KeyValueStore, STORAGE_KEY};

/// Owner of the cart state.
///
/// Created once by the application's composition root with [`CartStore::open`],
/// which hydrates the cart from storage before returning. Consumers should be
/// given [`CartHandle`]s rather than the store itself; dropping the store
/// ends the cart's in-memory lifetime and detaches every handle.
///
/// Mutations apply to memory synchronously and queue a full overwrite of
/// the persisted cart. They never block on storage.
#[derive(Debug)]
pub struct CartStore {
    inner: Arc<CartInner>,
}

#[derive(Debug)]
struct CartInner {
    state: watch::Sender<CartState>,
    writer: PersistQueue,
}

/// A non-owning view of a [`CartStore`].
///
/// Cheap to clone and hand out. Every call fails with
/// [`CartError::Detached`] once the store is gone.
#[derive(Debug, Clone)]
pub struct CartHandle {
    inner: Weak<CartInner>,
}

impl CartStore {
    /// Open a cart backed by `storage`.
    ///
    /// Reads the persisted cart once. A missing, unreadable or malformed value
    /// yields an empty cart; the failure is logged, not returned.
    ///
    /// Must be called from within a Tokio runtime.
    #[instrument(skip_all)]
    pub async fn open<S: KeyValueStore>(storage: S) -> Self {
        let initial = hydrate(&storage).await;
        info!(items = initial.len(), "Cart hydrated");

        let (state, _) = watch::channel(initial);
        let writer = PersistQueue::spawn(storage, STORAGE_KEY);

        Self {
            inner: Arc::new(CartInner { state, writer }),
        }
    }

    /// Open a file-backed cart in the configured storage directory.
    pub async fn open_with_config(config: &CartConfig) -> Self {
        Self::open(FileStore::new(config.storage_dir.clone())).await
    }

    /// A handle for consumers.
    #[must_use]
    pub fn handle(&self) -> CartHandle {
        CartHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// The current cart contents.
    #[must_use]
    pub fn items(&self) -> CartState {
        self.inner.snapshot()
    }

    /// Subscribe to cart changes.
    ///
    /// The receiver is marked changed after every mutation that altered the
    /// cart; read the new contents with `borrow_and_update`.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.inner.state.subscribe()
    }

    /// Add one unit of a product, appending it if it is not in the cart yet.
    pub fn add_to_cart(&self, item: NewCartItem) {
        self.inner.add_to_cart(item);
    }

    /// Add one unit of a product already in the cart. Unknown ids are ignored.
    pub fn increment(&self, id: &ProductId) {
        self.inner.increment(id);
    }

    /// Remove one unit of a product, dropping the line at zero. Unknown ids
    /// are ignored.
    pub fn decrement(&self, id: &ProductId) {
        self.inner.decrement(id);
    }

    /// Wait until every write queued so far has been attempted.
    pub async fn flush(&self) {
        self.inner.writer.flush().await;
    }

    /// Flush pending writes and release the in-memory cart.
    ///
    /// Outstanding handles are detached. The persisted cart is kept.
    pub async fn close(self) {
        self.flush().await;
        debug!("Cart store closed");
    }
}

impl CartHandle {
    fn upgrade(&self) -> Result<Arc<CartInner>> {
        self.inner.upgrade().ok_or(CartError::Detached)
    }

    /// Whether the owning store is still alive.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// The current cart contents.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Detached`] if the store is gone.
    pub fn items(&self) -> Result<CartState> {
        Ok(self.upgrade()?.snapshot())
    }

    /// Subscribe to cart changes.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Detached`] if the store is gone.
    pub fn subscribe(&self) -> Result<watch::Receiver<CartState>> {
        Ok(self.upgrade()?.state.subscribe())
    }

    /// See [`CartStore::add_to_cart`].
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Detached`] if the store is gone.
    pub fn add_to_cart(&self, item: NewCartItem) -> Result<()> {
        self.upgrade()?.add_to_cart(item);
        Ok(())
    }

    /// See [`CartStore::increment`].
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Detached`] if the store is gone.
    pub fn increment(&self, id: &ProductId) -> Result<()> {
        self.upgrade()?.increment(id);
        Ok(())
    }

    /// See [`CartStore::decrement`].
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Detached`] if the store is gone.
    pub fn decrement(&self, id: &ProductId) -> Result<()> {
        self.upgrade()?.decrement(id);
        Ok(())
    }
}

impl CartInner {
    fn snapshot(&self) -> CartState {
        self.state.borrow().clone()
    }

    #[instrument(skip(self, item), fields(id = %item.id))]
    fn add_to_cart(&self, item: NewCartItem) {
        self.apply(|state| Some(state.with_added(item)));
    }

    #[instrument(skip(self))]
    fn increment(&self, id: &ProductId) {
        if !self.apply(|state| state.with_incremented(id)) {
            debug!("Item not in cart, ignoring increment");
        }
    }

    #[instrument(skip(self))]
    fn decrement(&self, id: &ProductId) {
        if !self.apply(|state| state.with_decremented(id)) {
            debug!("Item not in cart, ignoring decrement");
        }
    }

    /// Replace the state with `update`'s result, if any, and queue a write.
    ///
    /// Runs under the watch channel's write lock, so concurrent mutations
    /// are applied and enqueued in the same order.
    fn apply(&self, update: impl FnOnce(&CartState) -> Option<CartState>) -> bool {
        self.state.send_if_modified(|state| {
            let Some(next) = update(state) else {
                return false;
            };
            match serde_json::to_string(&next) {
                Ok(payload) => self.writer.enqueue(payload),
                Err(e) => warn!(error = %e, "Failed to serialize cart, skipping write"),
            }
            debug!(items = next.len(), "Cart updated");
            *state = next;
            true
        })
    }
}

/// Load the persisted cart, falling back to empty on any failure.
async fn hydrate<S: KeyValueStore>(storage: &S) -> CartState {
    match storage.get(STORAGE_KEY).await {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(error = %e, "Stored cart is malformed, starting empty");
            CartState::default()
        }),
        Ok(None) => {
            debug!("No stored cart, starting empty");
            CartState::default()
        }
        Err(e) => {
            warn!(error = %e, "Failed to read stored cart, starting empty");
            CartState::default()
        }
    }
}
