use serde::Deserialize;
use utoipa::ToSchema;

use crate::{checkout::CheckoutForm, models::PromoCode};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    #[serde(flatten)]
    pub form: CheckoutForm,
    pub promo: Option<PromoCode>,
}
