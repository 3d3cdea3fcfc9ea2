//! Builds the order payload the backend's `placeOrder` expects from a cart.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    cart::Cart,
    models::{OrderProduct, PromoCode},
    pricing::{AmountOverflow, summarize},
};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CheckoutForm {
    pub name: String,
    pub mobile: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CustomerDetails {
    pub name: String,
    pub mobile: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderDraft {
    pub customer: CustomerDetails,
    pub products: Vec<OrderProduct>,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub total_amount: Decimal,
    pub promo_code_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutError {
    EmptyCart,
    InvalidFields(BTreeMap<String, String>),
    Overflow(AmountOverflow),
}

/// Trims the form and reports every invalid field at once.
pub fn validate_form(form: &CheckoutForm) -> Result<CustomerDetails, BTreeMap<String, String>> {
    let name = form.name.trim();
    let mobile = form.mobile.trim();
    let address = form.address.trim();

    let mut errors = BTreeMap::new();
    if name.is_empty() {
        errors.insert("name".to_string(), "Name is required".to_string());
    }
    if mobile.is_empty() {
        errors.insert("mobile".to_string(), "Mobile number is required".to_string());
    } else if mobile.len() != 10 || !mobile.bytes().all(|b| b.is_ascii_digit()) {
        errors.insert(
            "mobile".to_string(),
            "Please enter a valid 10-digit mobile number".to_string(),
        );
    }
    if address.is_empty() {
        errors.insert("address".to_string(), "Address is required".to_string());
    }

    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(CustomerDetails {
        name: name.to_string(),
        mobile: mobile.to_string(),
        address: address.to_string(),
    })
}

/// The cart is left untouched; callers clear it once the backend accepts the
/// order.
pub fn build_order_draft(
    cart: &Cart,
    form: &CheckoutForm,
    promo: Option<&PromoCode>,
) -> Result<OrderDraft, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    let customer = validate_form(form).map_err(CheckoutError::InvalidFields)?;

    let products = cart
        .items()
        .iter()
        .map(|item| OrderProduct {
            product_id: item.product.id,
            variant_id: item.variant_id,
            quantity: item.quantity,
            price: item.unit_price,
        })
        .collect();

    let summary = cart
        .total()
        .and_then(|subtotal| summarize(subtotal, promo.map(|p| &p.discount_type)))
        .map_err(CheckoutError::Overflow)?;

    Ok(OrderDraft {
        customer,
        products,
        subtotal: summary.subtotal,
        discount: summary.discount,
        total_amount: summary.total,
        promo_code_id: promo.map(|p| p.id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DiscountType, Product};

    fn form(name: &str, mobile: &str, address: &str) -> CheckoutForm {
        CheckoutForm {
            name: name.into(),
            mobile: mobile.into(),
            address: address.into(),
        }
    }

    fn cart_with_item() -> Cart {
        let mut cart = Cart::new();
        cart.add_item(
            Product {
                id: 5,
                category_id: 1,
                name: "Jowar Roti".into(),
                description: String::new(),
                health_benefits: String::new(),
                image: String::new(),
                price: Decimal::ZERO,
                in_stock: true,
            },
            2,
            Some(9),
            Some("Family".into()),
            Some(Decimal::from(100)),
        )
        .unwrap();
        cart
    }

    #[test]
    fn reports_all_invalid_fields() {
        let errors = validate_form(&form("  ", "12345", "")).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors["mobile"], "Please enter a valid 10-digit mobile number");
    }

    #[test]
    fn trims_valid_fields() {
        let customer = validate_form(&form(" Asha ", " 9876543210 ", " 12 Lake Rd ")).unwrap();
        assert_eq!(customer.name, "Asha");
        assert_eq!(customer.mobile, "9876543210");
        assert_eq!(customer.address, "12 Lake Rd");
    }

    #[test]
    fn empty_cart_is_rejected() {
        let result = build_order_draft(&Cart::new(), &form("Asha", "9876543210", "x"), None);
        assert_eq!(result, Err(CheckoutError::EmptyCart));
    }

    #[test]
    fn draft_applies_promo_and_keeps_snapshot_prices() {
        let promo = PromoCode {
            id: 3,
            code: "WELCOME10".into(),
            discount_type: DiscountType::Percentage(Decimal::from(10)),
            min_order_value: Decimal::ZERO,
            expiry_date: None,
            is_active: true,
        };
        let draft =
            build_order_draft(&cart_with_item(), &form("Asha", "9876543210", "x"), Some(&promo))
                .unwrap();

        assert_eq!(draft.products.len(), 1);
        assert_eq!(draft.products[0].variant_id, Some(9));
        assert_eq!(draft.products[0].price, Decimal::from(100));
        assert_eq!(draft.subtotal, Decimal::from(200));
        assert_eq!(draft.discount, Decimal::from(20));
        assert_eq!(draft.total_amount, Decimal::from(180));
        assert_eq!(draft.promo_code_id, Some(3));
    }

    #[test]
    fn promo_that_overflows_total_is_reported() {
        let promo = PromoCode {
            id: 4,
            code: "HUGE".into(),
            discount_type: DiscountType::Flat(Decimal::MIN),
            min_order_value: Decimal::ZERO,
            expiry_date: None,
            is_active: true,
        };
        let result =
            build_order_draft(&cart_with_item(), &form("Asha", "9876543210", "x"), Some(&promo));
        assert_eq!(result, Err(CheckoutError::Overflow(AmountOverflow)));
    }
}
