use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct Meta {
    /// Number of units across all cart lines, when the payload is a cart.
    pub item_count: Option<u64>,
    pub currency: Option<String>,
}

impl Meta {
    pub fn cart(item_count: u64, currency: impl Into<String>) -> Self {
        Self {
            item_count: Some(item_count),
            currency: Some(currency.into()),
        }
    }

    pub fn empty() -> Self {
        Self {
            item_count: None,
            currency: None,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }
}
