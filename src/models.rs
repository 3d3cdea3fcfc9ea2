use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Catalog product as returned by the backend. Carts keep a snapshot of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: u64,
    #[serde(default)]
    pub category_id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub health_benefits: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default = "default_true")]
    pub in_stock: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductVariant {
    pub id: u64,
    pub product_id: u64,
    pub name: String,
    pub price: Decimal,
    pub is_active: bool,
    pub in_stock: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    Flat(Decimal),
    Percentage(Decimal),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PromoCode {
    pub id: u64,
    pub code: String,
    pub discount_type: DiscountType,
    #[serde(default)]
    pub min_order_value: Decimal,
    pub expiry_date: Option<DateTime<Utc>>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Accepted,
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Accepted => "accepted",
            OrderStatus::Completed => "completed",
        }
    }
}

/// One line of a placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderProduct {
    pub product_id: u64,
    pub variant_id: Option<u64>,
    pub quantity: u64,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: u64,
    pub order_date: DateTime<Utc>,
    pub customer_id: u64,
    pub status: OrderStatus,
    pub payment_method: Option<String>,
    pub payment_status: Option<String>,
    pub total_amount: Decimal,
    pub discounted_amount: Option<Decimal>,
    pub promo_code_id: Option<u64>,
    pub products: Vec<OrderProduct>,
}

fn default_true() -> bool {
    true
}
