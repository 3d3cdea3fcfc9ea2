use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    cart::CartLineItem,
    models::{Product, PromoCode},
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddItemRequest {
    pub product: Product,
    pub quantity: i64,
    pub variant_id: Option<u64>,
    pub variant_name: Option<String>,
    pub unit_price: Option<Decimal>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateQuantityRequest {
    pub quantity: i64,
    pub variant_id: Option<u64>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CartSummaryRequest {
    pub promo: Option<PromoCode>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartView {
    pub items: Vec<CartLineItem>,
    pub subtotal: Decimal,
}
