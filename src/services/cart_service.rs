use uuid::Uuid;

use crate::{
    audit::log_audit,
    cart::{Cart, CartStore},
    checkout::{CheckoutError, OrderDraft, build_order_draft},
    dto::{
        cart::{AddItemRequest, CartSummaryRequest, CartView, UpdateQuantityRequest},
        checkout::CheckoutRequest,
    },
    error::{AppError, AppResult},
    pricing::{PriceSummary, format_amount, summarize},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Opens the cart under its stripe lock and runs `f` on the blocking pool,
/// since storage does synchronous file io. The guard is released only after
/// `f` returns, even if the request is dropped first.
async fn with_cart<T, F>(state: &AppState, cart_id: Uuid, f: F) -> AppResult<T>
where
    F: FnOnce(&mut CartStore) -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    let guard = state.cart_locks.lock(cart_id).await;
    let storage = state.cart_storage.clone();
    tokio::task::spawn_blocking(move || {
        let _guard = guard;
        let mut store = CartStore::open(storage, &cart_id.to_string());
        f(&mut store)
    })
    .await
    .map_err(|err| AppError::Internal(err.into()))?
}

fn cart_response(state: &AppState, message: &str, cart: Cart) -> AppResult<ApiResponse<CartView>> {
    let subtotal = cart.total()?;
    let meta = Meta::cart(cart.item_count(), state.config.currency_symbol.clone());
    let view = CartView {
        items: cart.items().to_vec(),
        subtotal,
    };
    Ok(ApiResponse::success(message, view, Some(meta)))
}

pub async fn get_cart(state: &AppState, cart_id: Uuid) -> AppResult<ApiResponse<CartView>> {
    let cart = with_cart(state, cart_id, |store| Ok(store.cart().clone())).await?;
    cart_response(state, "OK", cart)
}

pub async fn add_item(
    state: &AppState,
    cart_id: Uuid,
    payload: AddItemRequest,
) -> AppResult<ApiResponse<CartView>> {
    if payload.quantity <= 0 {
        return Err(AppError::BadRequest(
            "quantity must be greater than 0".to_string(),
        ));
    }

    let product_id = payload.product.id;
    let variant_id = payload.variant_id;
    let quantity = payload.quantity;
    let cart = with_cart(state, cart_id, move |store| {
        store.add_item(
            payload.product,
            payload.quantity,
            payload.variant_id,
            payload.variant_name,
            payload.unit_price,
        )?;
        Ok(store.cart().clone())
    })
    .await?;

    log_audit(
        Some(cart_id),
        None,
        "cart_add",
        Some(serde_json::json!({
            "product_id": product_id,
            "variant_id": variant_id,
            "quantity": quantity,
        })),
    );

    cart_response(state, "Added to cart", cart)
}

pub async fn update_quantity(
    state: &AppState,
    cart_id: Uuid,
    product_id: u64,
    payload: UpdateQuantityRequest,
) -> AppResult<ApiResponse<CartView>> {
    let UpdateQuantityRequest {
        quantity,
        variant_id,
    } = payload;
    let (changed, cart) = with_cart(state, cart_id, move |store| {
        let changed = store.update_quantity(product_id, quantity, variant_id)?;
        Ok((changed, store.cart().clone()))
    })
    .await?;

    if changed {
        log_audit(
            Some(cart_id),
            None,
            "cart_update",
            Some(serde_json::json!({
                "product_id": product_id,
                "variant_id": variant_id,
                "quantity": quantity,
            })),
        );
    } else {
        tracing::debug!(
            %cart_id,
            product_id,
            variant_id = ?variant_id,
            "quantity update matched no line"
        );
    }

    cart_response(state, "Cart updated", cart)
}

pub async fn remove_item(
    state: &AppState,
    cart_id: Uuid,
    product_id: u64,
    variant_id: Option<u64>,
) -> AppResult<ApiResponse<CartView>> {
    let (removed, cart) = with_cart(state, cart_id, move |store| {
        let removed = store.remove_item(product_id, variant_id);
        Ok((removed, store.cart().clone()))
    })
    .await?;

    if removed {
        log_audit(
            Some(cart_id),
            None,
            "cart_remove",
            Some(serde_json::json!({ "product_id": product_id, "variant_id": variant_id })),
        );
    }

    cart_response(state, "Removed from cart", cart)
}

pub async fn clear_cart(state: &AppState, cart_id: Uuid) -> AppResult<ApiResponse<CartView>> {
    let cart = with_cart(state, cart_id, |store| {
        store.clear_cart();
        Ok(store.cart().clone())
    })
    .await?;
    log_audit(Some(cart_id), None, "cart_clear", None);

    cart_response(state, "Cart cleared", cart)
}

pub async fn summarize_cart(
    state: &AppState,
    cart_id: Uuid,
    payload: CartSummaryRequest,
) -> AppResult<ApiResponse<PriceSummary>> {
    let subtotal = with_cart(state, cart_id, |store| store.total().map_err(AppError::from)).await?;
    let summary = summarize(subtotal, payload.promo.as_ref().map(|p| &p.discount_type))?;

    tracing::debug!(
        %cart_id,
        subtotal = %format_amount(summary.subtotal),
        discount = %format_amount(summary.discount),
        total = %format_amount(summary.total),
        "cart summary"
    );

    Ok(ApiResponse::success("OK", summary, Some(Meta::empty())))
}

pub async fn checkout(
    state: &AppState,
    cart_id: Uuid,
    payload: CheckoutRequest,
) -> AppResult<ApiResponse<OrderDraft>> {
    let cart = with_cart(state, cart_id, |store| Ok(store.cart().clone())).await?;

    let draft = build_order_draft(&cart, &payload.form, payload.promo.as_ref()).map_err(
        |err| match err {
            CheckoutError::EmptyCart => AppError::BadRequest("Cart is empty".into()),
            CheckoutError::InvalidFields(fields) => AppError::Validation(fields),
            CheckoutError::Overflow(err) => AppError::AmountOutOfRange(err),
        },
    )?;

    log_audit(
        Some(cart_id),
        None,
        "checkout_draft",
        Some(serde_json::json!({
            "lines": draft.products.len(),
            "total_amount": format_amount(draft.total_amount),
            "promo_code_id": draft.promo_code_id,
        })),
    );

    Ok(ApiResponse::success(
        "Checkout ready",
        draft,
        Some(Meta::empty()),
    ))
}
