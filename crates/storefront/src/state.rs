//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use bhojan_core::{Cart, changed_line};

use crate::config::StorefrontConfig;
use crate::menu::MenuClient;
use crate::storage::CartStorage;

/// Outcome of a cart mutation: the post-mutation snapshot plus the id of
/// the line the mutation touched (drives the transient highlight).
#[derive(Debug, Clone)]
pub struct CartChange {
    /// Snapshot of the cart after the mutation.
    pub cart: Cart,
    /// Id of the added or re-quantified line, if any.
    pub changed_id: Option<String>,
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The cart is the only
/// mutable state shared between the catalog display and the order flow;
/// it lives behind one `RwLock` and is mirrored to durable storage on
/// every mutation.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    menu: MenuClient,
    cart: RwLock<Cart>,
    storage: CartStorage,
    // Held for the duration of an order submission so a double-press
    // cannot dispatch two messaging handoffs.
    submit_guard: Mutex<()>,
}

impl AppState {
    /// Create a new application state, rehydrating the cart from storage.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let menu = MenuClient::new(&config.sanity);
        let storage = CartStorage::new(config.cart_path.clone());
        let cart = storage.load();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                menu,
                cart: RwLock::new(cart),
                storage,
                submit_guard: Mutex::new(()),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the menu source adapter.
    #[must_use]
    pub fn menu(&self) -> &MenuClient {
        &self.inner.menu
    }

    /// Read a snapshot of the current cart.
    pub async fn cart(&self) -> Cart {
        self.inner.cart.read().await.clone()
    }

    /// Apply a mutation to the cart, mirror it to storage, and report
    /// which line changed.
    ///
    /// The diff against the pre-mutation snapshot is computed here,
    /// synchronously after the mutation, rather than being inferred at
    /// render time.
    pub async fn mutate_cart<F>(&self, mutate: F) -> CartChange
    where
        F: FnOnce(&mut Cart),
    {
        let mut cart = self.inner.cart.write().await;
        let before = cart.clone();
        mutate(&mut cart);
        let changed_id = changed_line(&before, &cart).map(str::to_owned);

        self.inner.storage.save(&cart);

        CartChange {
            cart: cart.clone(),
            changed_id,
        }
    }

    /// Try to claim the order-submission guard.
    ///
    /// Returns `None` while another submission is in flight; the guard is
    /// released when the returned value is dropped.
    pub fn try_begin_submit(&self) -> Option<tokio::sync::MutexGuard<'_, ()>> {
        self.inner.submit_guard.try_lock().ok()
    }
}
