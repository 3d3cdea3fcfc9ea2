use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch, post},
};
use uuid::Uuid;

use crate::{
    checkout::OrderDraft,
    dto::{
        cart::{AddItemRequest, CartSummaryRequest, CartView, UpdateQuantityRequest},
        checkout::CheckoutRequest,
    },
    error::AppResult,
    pricing::PriceSummary,
    response::ApiResponse,
    routes::params::VariantQuery,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{cart_id}", get(get_cart).delete(clear_cart))
        .route("/{cart_id}/items", post(add_item))
        .route(
            "/{cart_id}/items/{product_id}",
            patch(update_quantity).delete(remove_item),
        )
        .route("/{cart_id}/summary", post(cart_summary))
        .route("/{cart_id}/checkout", post(checkout))
}

#[utoipa::path(
    get,
    path = "/api/carts/{cart_id}",
    params(("cart_id" = Uuid, Path, description = "Cart ID")),
    responses(
        (status = 200, description = "Cart lines and subtotal", body = ApiResponse<CartView>)
    ),
    tag = "Cart"
)]
pub async fn get_cart(
    State(state): State<AppState>,
    Path(cart_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::get_cart(&state, cart_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/carts/{cart_id}/items",
    params(("cart_id" = Uuid, Path, description = "Cart ID")),
    request_body = AddItemRequest,
    responses(
        (status = 200, description = "Add item, merging with an existing line", body = ApiResponse<CartView>),
        (status = 400, description = "Bad request"),
    ),
    tag = "Cart"
)]
pub async fn add_item(
    State(state): State<AppState>,
    Path(cart_id): Path<Uuid>,
    Json(payload): Json<AddItemRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::add_item(&state, cart_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/carts/{cart_id}/items/{product_id}",
    params(
        ("cart_id" = Uuid, Path, description = "Cart ID"),
        ("product_id" = u64, Path, description = "Product ID")
    ),
    request_body = UpdateQuantityRequest,
    responses(
        (status = 200, description = "Set quantity; zero or less removes the line", body = ApiResponse<CartView>),
    ),
    tag = "Cart"
)]
pub async fn update_quantity(
    State(state): State<AppState>,
    Path((cart_id, product_id)): Path<(Uuid, u64)>,
    Json(payload): Json<UpdateQuantityRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::update_quantity(&state, cart_id, product_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/carts/{cart_id}/items/{product_id}",
    params(
        ("cart_id" = Uuid, Path, description = "Cart ID"),
        ("product_id" = u64, Path, description = "Product ID"),
        VariantQuery
    ),
    responses(
        (status = 200, description = "Remove line", body = ApiResponse<CartView>),
    ),
    tag = "Cart"
)]
pub async fn remove_item(
    State(state): State<AppState>,
    Path((cart_id, product_id)): Path<(Uuid, u64)>,
    Query(query): Query<VariantQuery>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::remove_item(&state, cart_id, product_id, query.variant_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/carts/{cart_id}",
    params(("cart_id" = Uuid, Path, description = "Cart ID")),
    responses(
        (status = 200, description = "Empty the cart", body = ApiResponse<CartView>),
    ),
    tag = "Cart"
)]
pub async fn clear_cart(
    State(state): State<AppState>,
    Path(cart_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::clear_cart(&state, cart_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/carts/{cart_id}/summary",
    params(("cart_id" = Uuid, Path, description = "Cart ID")),
    request_body = CartSummaryRequest,
    responses(
        (status = 200, description = "Subtotal, discount and total for an applied promo", body = ApiResponse<PriceSummary>),
    ),
    tag = "Cart"
)]
pub async fn cart_summary(
    State(state): State<AppState>,
    Path(cart_id): Path<Uuid>,
    Json(payload): Json<CartSummaryRequest>,
) -> AppResult<Json<ApiResponse<PriceSummary>>> {
    let resp = cart_service::summarize_cart(&state, cart_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/carts/{cart_id}/checkout",
    params(("cart_id" = Uuid, Path, description = "Cart ID")),
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Order payload ready for the backend", body = ApiResponse<OrderDraft>),
        (status = 400, description = "Cart is empty"),
        (status = 422, description = "Invalid customer details"),
    ),
    tag = "Cart"
)]
pub async fn checkout(
    State(state): State<AppState>,
    Path(cart_id): Path<Uuid>,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<ApiResponse<OrderDraft>>> {
    let resp = cart_service::checkout(&state, cart_id, payload).await?;
    Ok(Json(resp))
}
