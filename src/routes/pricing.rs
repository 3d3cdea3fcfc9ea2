use axum::{Json, Router, routing::post};

use crate::{
    dto::pricing::QuoteRequest,
    error::AppResult,
    pricing::{PriceSummary, summarize},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/quote", post(quote))
}

#[utoipa::path(
    post,
    path = "/api/pricing/quote",
    request_body = QuoteRequest,
    responses(
        (status = 200, description = "Discount and total for a subtotal", body = ApiResponse<PriceSummary>),
        (status = 400, description = "Amount out of range"),
    ),
    tag = "Pricing"
)]
pub async fn quote(
    Json(payload): Json<QuoteRequest>,
) -> AppResult<Json<ApiResponse<PriceSummary>>> {
    let summary = summarize(payload.subtotal, payload.discount_type.as_ref())?;
    Ok(Json(ApiResponse::success("OK", summary, Some(Meta::empty()))))
}
