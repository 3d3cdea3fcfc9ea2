//! Client-side shopping cart.
//!
//! [`Cart`] is the pure reducer: line items keyed by product and variant,
//! merged on add and priced from the snapshot taken when the line was first
//! added. [`CartStore`] wraps a cart with a [`CartStorage`] backend and writes
//! the whole item list back after every mutation that changed it.

pub mod storage;
pub mod store;

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{models::Product, pricing::AmountOverflow};

pub use storage::{CartStorage, FileCartStorage, MemoryCartStorage, StorageError};
pub use store::{CART_STORAGE_NAMESPACE, CartStore};

/// Identity of a line item. `variant_id == None` is the "no variant" key and
/// never collides with a real variant id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub product_id: u64,
    pub variant_id: Option<u64>,
}

impl LineKey {
    pub fn new(product_id: u64, variant_id: Option<u64>) -> Self {
        Self {
            product_id,
            variant_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartLineItem {
    pub product: Product,
    pub variant_id: Option<u64>,
    pub variant_name: Option<String>,
    pub unit_price: Decimal,
    pub quantity: u64,
}

impl CartLineItem {
    pub fn key(&self) -> LineKey {
        LineKey::new(self.product.id, self.variant_id)
    }

    pub fn line_total(&self) -> Result<Decimal, AmountOverflow> {
        self.unit_price
            .checked_mul(Decimal::from(self.quantity))
            .ok_or(AmountOverflow)
    }
}

/// Line items in insertion order.
///
/// Every line has `quantity >= 1`, keys are unique, and the total fits in a
/// `Decimal`. Mutations that would break the last rule are refused.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all lines.
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .fold(0u64, |count, item| count.saturating_add(item.quantity))
    }

    /// Whether deserialized data upholds the line invariants.
    pub fn is_consistent(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.items.len());
        self.items
            .iter()
            .all(|item| item.quantity >= 1 && seen.insert(item.key()))
            && self.total().is_ok()
    }

    /// Adds `quantity` of a product/variant combination.
    ///
    /// An existing line with the same key only has its quantity increased;
    /// its price, variant name and product snapshot stay as first added.
    /// Non-positive quantities leave the cart untouched so every stored line
    /// keeps `quantity >= 1`. Returns whether the cart changed.
    pub fn add_item(
        &mut self,
        product: Product,
        quantity: i64,
        variant_id: Option<u64>,
        variant_name: Option<String>,
        unit_price: Option<Decimal>,
    ) -> Result<bool, AmountOverflow> {
        let Ok(quantity) = u64::try_from(quantity) else {
            return Ok(false);
        };
        if quantity == 0 {
            return Ok(false);
        }

        let key = LineKey::new(product.id, variant_id);
        if let Some(index) = self.position(key) {
            let current = self.items[index].quantity;
            return self.set_quantity(index, current.saturating_add(quantity));
        }

        self.items.push(CartLineItem {
            product,
            variant_id,
            variant_name,
            unit_price: unit_price.unwrap_or(Decimal::ZERO),
            quantity,
        });
        if self.total().is_err() {
            self.items.pop();
            return Err(AmountOverflow);
        }
        Ok(true)
    }

    /// Removes the line with exactly this key. Returns whether one was found.
    pub fn remove_item(&mut self, product_id: u64, variant_id: Option<u64>) -> bool {
        let key = LineKey::new(product_id, variant_id);
        let before = self.items.len();
        self.items.retain(|item| item.key() != key);
        self.items.len() != before
    }

    /// Replaces a line's quantity. Zero or negative removes the line.
    pub fn update_quantity(
        &mut self,
        product_id: u64,
        quantity: i64,
        variant_id: Option<u64>,
    ) -> Result<bool, AmountOverflow> {
        let quantity = match u64::try_from(quantity) {
            Ok(quantity) if quantity > 0 => quantity,
            _ => return Ok(self.remove_item(product_id, variant_id)),
        };

        match self.position(LineKey::new(product_id, variant_id)) {
            Some(index) => self.set_quantity(index, quantity),
            None => Ok(false),
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// `Σ unit_price × quantity`, unrounded.
    pub fn total(&self) -> Result<Decimal, AmountOverflow> {
        self.items.iter().try_fold(Decimal::ZERO, |total, item| {
            total
                .checked_add(item.line_total()?)
                .ok_or(AmountOverflow)
        })
    }

    fn position(&self, key: LineKey) -> Option<usize> {
        self.items.iter().position(|item| item.key() == key)
    }

    // reverts the change if the cart total would no longer fit
    fn set_quantity(&mut self, index: usize, quantity: u64) -> Result<bool, AmountOverflow> {
        let previous = std::mem::replace(&mut self.items[index].quantity, quantity);
        if self.total().is_err() {
            self.items[index].quantity = previous;
            return Err(AmountOverflow);
        }
        Ok(previous != quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u64) -> Product {
        Product {
            id,
            category_id: 1,
            name: format!("Product {id}"),
            description: String::new(),
            health_benefits: String::new(),
            image: String::new(),
            price: Decimal::ZERO,
            in_stock: true,
        }
    }

    #[test]
    fn adding_same_key_twice_merges_quantities() {
        let mut cart = Cart::new();
        let small = Some("Small".to_string());
        let other = Some("Other".to_string());
        cart.add_item(product(1), 2, Some(10), small, Some(Decimal::from(5))).unwrap();
        cart.add_item(product(1), 3, Some(10), other, Some(Decimal::from(99))).unwrap();

        assert_eq!(cart.len(), 1);
        let line = &cart.items()[0];
        assert_eq!(line.quantity, 5);
        assert_eq!(line.unit_price, Decimal::from(5));
        assert_eq!(line.variant_name.as_deref(), Some("Small"));
    }

    #[test]
    fn distinct_variants_get_distinct_lines() {
        let mut cart = Cart::new();
        cart.add_item(product(1), 1, Some(10), None, None).unwrap();
        cart.add_item(product(1), 1, Some(11), None, None).unwrap();
        cart.add_item(product(1), 1, None, None, None).unwrap();

        assert_eq!(cart.len(), 3);
    }

    #[test]
    fn add_defaults_price_and_variant() {
        let mut cart = Cart::new();
        cart.add_item(product(4), 1, None, None, None).unwrap();

        let line = &cart.items()[0];
        assert_eq!(line.unit_price, Decimal::ZERO);
        assert_eq!(line.variant_id, None);
        assert_eq!(line.variant_name, None);
    }

    #[test]
    fn non_positive_add_is_ignored() {
        let mut cart = Cart::new();
        assert_eq!(cart.add_item(product(1), 0, None, None, None), Ok(false));
        assert_eq!(cart.add_item(product(1), -3, None, None, None), Ok(false));
        assert!(cart.is_empty());
    }

    #[test]
    fn add_that_overflows_total_is_refused() {
        let mut cart = Cart::new();
        cart.add_item(product(1), 2, None, None, Some(Decimal::from(10))).unwrap();

        let huge = Some(Decimal::from_i128_with_scale(100_000_000_000_000_000_000, 0));
        assert_eq!(
            cart.add_item(product(2), i64::MAX, None, None, huge),
            Err(AmountOverflow)
        );
        assert_eq!(
            cart.add_item(product(3), 1, None, None, Some(Decimal::MAX)),
            Err(AmountOverflow)
        );

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total(), Ok(Decimal::from(20)));
    }

    #[test]
    fn add_then_remove_leaves_empty_cart() {
        let mut cart = Cart::new();
        cart.add_item(product(1), 1, Some(2), None, None).unwrap();
        assert!(cart.remove_item(1, Some(2)));
        assert!(cart.is_empty());
    }

    #[test]
    fn remove_only_matches_exact_key() {
        let mut cart = Cart::new();
        cart.add_item(product(1), 1, Some(2), None, None).unwrap();

        assert!(!cart.remove_item(1, None));
        assert!(!cart.remove_item(2, Some(2)));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn update_quantity_replaces_instead_of_adding() {
        let mut cart = Cart::new();
        cart.add_item(product(1), 4, None, None, None).unwrap();
        assert_eq!(cart.update_quantity(1, 2, None), Ok(true));

        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn update_to_zero_or_negative_removes_line() {
        let mut cart = Cart::new();
        cart.add_item(product(1), 4, None, None, None).unwrap();
        cart.add_item(product(2), 4, None, None, None).unwrap();

        assert_eq!(cart.update_quantity(1, 0, None), Ok(true));
        assert_eq!(cart.update_quantity(2, -1, None), Ok(true));

        assert!(cart.is_empty());
    }

    #[test]
    fn update_missing_line_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(product(1), 4, None, None, None).unwrap();

        assert_eq!(cart.update_quantity(1, 9, Some(3)), Ok(false));
        assert_eq!(cart.items()[0].quantity, 4);
    }

    #[test]
    fn update_that_overflows_keeps_previous_quantity() {
        let mut cart = Cart::new();
        let price = Some(Decimal::from_i128_with_scale(100_000_000_000_000_000_000, 0));
        cart.add_item(product(1), 3, None, None, price).unwrap();

        assert_eq!(cart.update_quantity(1, i64::MAX, None), Err(AmountOverflow));
        assert_eq!(cart.items()[0].quantity, 3);
    }

    #[test]
    fn total_sums_price_times_quantity() {
        let mut cart = Cart::new();
        cart.add_item(product(1), 2, None, None, Some(Decimal::from(10))).unwrap();
        cart.add_item(product(2), 3, None, None, Some(Decimal::from(5))).unwrap();

        assert_eq!(cart.total(), Ok(Decimal::from(35)));
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn clear_empties_cart_and_zeroes_total() {
        let mut cart = Cart::new();
        cart.add_item(product(1), 2, None, None, Some(Decimal::from(10))).unwrap();
        cart.clear();

        assert_eq!(cart.len(), 0);
        assert_eq!(cart.total(), Ok(Decimal::ZERO));
    }

    #[test]
    fn consistency_rejects_zero_quantities_and_duplicate_keys() {
        let line = CartLineItem {
            product: product(1),
            variant_id: None,
            variant_name: None,
            unit_price: Decimal::ONE,
            quantity: 1,
        };
        let duplicated = Cart {
            items: vec![line.clone(), line.clone()],
        };
        let zero = Cart {
            items: vec![CartLineItem {
                quantity: 0,
                ..line.clone()
            }],
        };

        assert!(!duplicated.is_consistent());
        assert!(!zero.is_consistent());
        assert!(Cart { items: vec![line] }.is_consistent());
    }
}
