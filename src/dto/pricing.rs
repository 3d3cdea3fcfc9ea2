use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::models::DiscountType;

#[derive(Debug, Deserialize, ToSchema)]
pub struct QuoteRequest {
    pub subtotal: Decimal,
    pub discount_type: Option<DiscountType>,
}
