use serde::Deserialize;
use utoipa::ToSchema;

use crate::models::{Order, Product};

/// Orders and the catalog used to resolve product names.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ExportOrdersRequest {
    pub orders: Vec<Order>,
    #[serde(default)]
    pub products: Vec<Product>,
}
