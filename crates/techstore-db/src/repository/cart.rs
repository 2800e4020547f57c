//! # Cart Repository
//!
//! Persists the cart snapshot under [`CART_STORAGE_KEY`].
//!
//! ## Snapshot Format
//! ```json
//! [{"id":1,"name":"Laptop Pro","price":1299,"image":"💻","category":"Electronics","quantity":2}]
//! ```
//! No schema version. A blob that does not parse as this array is treated as
//! no saved cart: a warning is logged and an empty cart is returned.

use tracing::{debug, warn};

use techstore_core::{Cart, CART_STORAGE_KEY};

use crate::error::DbResult;
use crate::store::KeyValueStore;

/// Repository for the persisted cart snapshot.
#[derive(Debug, Clone)]
pub struct CartRepository<S> {
    store: S,
}

impl<S: KeyValueStore> CartRepository<S> {
    pub fn new(store: S) -> Self {
        CartRepository { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads the saved cart.
    ///
    /// ## Returns
    /// * `Ok(cart)` - the saved lines, verbatim
    /// * `Ok(empty)` - nothing saved, or the saved blob is malformed
    /// * `Err(DbError)` - the store itself failed
    pub async fn load(&self) -> DbResult<Cart> {
        let Some(raw) = self.store.get(CART_STORAGE_KEY).await? else {
            debug!("No saved cart");
            return Ok(Cart::new());
        };

        match serde_json::from_str::<Cart>(&raw) {
            Ok(cart) => {
                debug!(lines = cart.line_count(), "Saved cart loaded");
                Ok(cart)
            }
            Err(e) => {
                warn!(error = %e, bytes = raw.len(), "Saved cart is malformed, starting empty");
                Ok(Cart::new())
            }
        }
    }

    /// Writes the full cart snapshot. An empty cart is saved as `[]`.
    pub async fn save(&self, cart: &Cart) -> DbResult<()> {
        let json = serde_json::to_string(cart)?;
        self.store.set(CART_STORAGE_KEY, &json).await?;

        debug!(
            lines = cart.line_count(),
            items = cart.item_count(),
            "Cart saved"
        );
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use techstore_core::Catalog;

    fn sample_cart() -> Cart {
        let catalog = Catalog::default();
        let mut cart = Cart::new();
        cart.add(&catalog.products()[0]);
        cart.add(&catalog.products()[0]);
        cart.add(&catalog.products()[4]);
        cart
    }

    #[tokio::test]
    async fn test_save_then_load_restores_lines() {
        let repo = CartRepository::new(MemoryStore::new());
        let cart = sample_cart();

        repo.save(&cart).await.unwrap();
        let restored = repo.load().await.unwrap();

        assert_eq!(restored, cart);
        assert_eq!(restored.line(1).map(|l| l.quantity), Some(2));
        assert_eq!(restored.total().units(), 2 * 1299 + 299);
    }

    #[tokio::test]
    async fn test_missing_key_is_empty_cart() {
        let repo = CartRepository::new(MemoryStore::new());
        assert!(repo.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_blob_is_empty_cart() {
        let store = MemoryStore::with_entries([(CART_STORAGE_KEY, "{\"not\": \"a cart\"}")]);
        let repo = CartRepository::new(store);

        assert!(repo.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reads_plain_snapshot_format() {
        let store = MemoryStore::with_entries([(
            CART_STORAGE_KEY,
            r#"[{"id":3,"name":"Wireless Headphones","price":199,"image":"🎧","category":"Audio","quantity":4}]"#,
        )]);
        let repo = CartRepository::new(store);

        let cart = repo.load().await.unwrap();
        assert_eq!(cart.item_count(), 4);
        assert_eq!(cart.total().units(), 796);
    }

    #[tokio::test]
    async fn test_empty_cart_is_saved_as_empty_array() {
        let store = MemoryStore::new();
        let repo = CartRepository::new(store.clone());

        repo.save(&sample_cart()).await.unwrap();
        repo.save(&Cart::new()).await.unwrap();

        assert_eq!(
            store.get(CART_STORAGE_KEY).await.unwrap().as_deref(),
            Some("[]")
        );
    }
}
