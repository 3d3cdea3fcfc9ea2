//! Promo discount arithmetic shared by the cart summary and checkout.
//!
//! Minimum order value and expiry are checked by the backend when a code is
//! applied; this module trusts whatever promo it is handed.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::models::DiscountType;

/// An amount did not fit in a `Decimal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("amount out of range")]
pub struct AmountOverflow;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PriceSummary {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

/// Discount for `subtotal`. A flat discount is not capped, so it may exceed
/// the subtotal.
pub fn discount_for(
    subtotal: Decimal,
    promo: Option<&DiscountType>,
) -> Result<Decimal, AmountOverflow> {
    match promo {
        None => Ok(Decimal::ZERO),
        Some(DiscountType::Flat(amount)) => Ok(*amount),
        Some(DiscountType::Percentage(pct)) => subtotal
            .checked_mul(*pct)
            .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
            .ok_or(AmountOverflow),
    }
}

pub fn summarize(
    subtotal: Decimal,
    promo: Option<&DiscountType>,
) -> Result<PriceSummary, AmountOverflow> {
    let discount = discount_for(subtotal, promo)?;
    let total = subtotal.checked_sub(discount).ok_or(AmountOverflow)?;
    Ok(PriceSummary {
        subtotal,
        discount,
        total,
    })
}

/// Renders an amount with exactly two decimals, rounding half away from zero.
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}
