use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Cart, CartLineItem, CartStorage};
use crate::{models::Product, pricing::AmountOverflow};

/// Prefix of every persisted cart entry.
pub const CART_STORAGE_NAMESPACE: &str = "cart-storage";

const CART_STORAGE_VERSION: u32 = 0;

#[derive(Serialize, Deserialize)]
struct PersistedCart {
    state: Cart,
    version: u32,
}

/// A [`Cart`] bound to one storage entry.
///
/// The cart is rehydrated in [`CartStore::open`] and written back after every
/// mutation that changed it. Writes are best-effort: a failed write is logged
/// and the in-memory cart stays authoritative.
pub struct CartStore {
    storage: Arc<dyn CartStorage>,
    key: String,
    cart: Cart,
}

impl CartStore {
    /// Opens the cart stored under `CART_STORAGE_NAMESPACE` + `scope`.
    /// Missing, unreadable or corrupt data yields an empty cart.
    pub fn open(storage: Arc<dyn CartStorage>, scope: &str) -> Self {
        let key = format!("{CART_STORAGE_NAMESPACE}-{scope}");
        let cart = load(storage.as_ref(), &key);
        Self { storage, key, cart }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn items(&self) -> &[CartLineItem] {
        self.cart.items()
    }

    pub fn add_item(
        &mut self,
        product: Product,
        quantity: i64,
        variant_id: Option<u64>,
        variant_name: Option<String>,
        unit_price: Option<Decimal>,
    ) -> Result<bool, AmountOverflow> {
        let changed = self
            .cart
            .add_item(product, quantity, variant_id, variant_name, unit_price)?;
        if changed {
            self.persist();
        }
        Ok(changed)
    }

    pub fn remove_item(&mut self, product_id: u64, variant_id: Option<u64>) -> bool {
        let changed = self.cart.remove_item(product_id, variant_id);
        if changed {
            self.persist();
        }
        changed
    }

    pub fn update_quantity(
        &mut self,
        product_id: u64,
        quantity: i64,
        variant_id: Option<u64>,
    ) -> Result<bool, AmountOverflow> {
        let changed = self
            .cart
            .update_quantity(product_id, quantity, variant_id)?;
        if changed {
            self.persist();
        }
        Ok(changed)
    }

    /// Empties the cart and drops its storage entry.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        if let Err(err) = self.storage.remove(&self.key) {
            tracing::warn!(key = %self.key, error = %err, "cart remove failed");
        }
    }

    pub fn total(&self) -> Result<Decimal, AmountOverflow> {
        self.cart.total()
    }

    fn persist(&self) {
        let payload = PersistedCart {
            state: self.cart.clone(),
            version: CART_STORAGE_VERSION,
        };
        let encoded = match serde_json::to_string(&payload) {
            Ok(encoded) => encoded,
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "cart encode failed");
                return;
            }
        };
        if let Err(err) = self.storage.write(&self.key, &encoded) {
            tracing::warn!(key = %self.key, error = %err, "cart persist failed");
        }
    }
}

fn load(storage: &dyn CartStorage, key: &str) -> Cart {
    let raw = match storage.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Cart::new(),
        Err(err) => {
            tracing::warn!(key = %key, error = %err, "cart read failed, starting empty");
            return Cart::new();
        }
    };

    match serde_json::from_str::<PersistedCart>(&raw) {
        Ok(persisted) if persisted.version != CART_STORAGE_VERSION => {
            tracing::warn!(
                key = %key,
                version = persisted.version,
                "unknown cart version, starting empty"
            );
            Cart::new()
        }
        Ok(persisted) if !persisted.state.is_consistent() => {
            tracing::warn!(key = %key, "inconsistent cart lines, starting empty");
            Cart::new()
        }
        Ok(persisted) => persisted.state,
        Err(err) => {
            tracing::warn!(key = %key, error = %err, "corrupt cart data, starting empty");
            Cart::new()
        }
    }
}
