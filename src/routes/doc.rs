use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    cart::CartLineItem,
    checkout::{CheckoutForm, CustomerDetails, OrderDraft},
    dto::{
        cart::{AddItemRequest, CartSummaryRequest, CartView, UpdateQuantityRequest},
        checkout::CheckoutRequest,
        export::ExportOrdersRequest,
        pricing::QuoteRequest,
    },
    models::{DiscountType, Order, OrderProduct, OrderStatus, Product, ProductVariant, PromoCode},
    pricing::PriceSummary,
    response::{ApiResponse, Meta},
    routes::{admin, cart, health, pricing},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        cart::get_cart,
        cart::add_item,
        cart::update_quantity,
        cart::remove_item,
        cart::clear_cart,
        cart::cart_summary,
        cart::checkout,
        pricing::quote,
        admin::export_orders
    ),
    components(
        schemas(
            Product,
            ProductVariant,
            PromoCode,
            DiscountType,
            Order,
            OrderProduct,
            OrderStatus,
            CartLineItem,
            CartView,
            AddItemRequest,
            UpdateQuantityRequest,
            CartSummaryRequest,
            CheckoutForm,
            CheckoutRequest,
            CustomerDetails,
            OrderDraft,
            QuoteRequest,
            PriceSummary,
            ExportOrdersRequest,
            Meta,
            ApiResponse<CartView>,
            ApiResponse<PriceSummary>,
            ApiResponse<OrderDraft>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Cart", description = "Cart endpoints"),
        (name = "Pricing", description = "Promo discount endpoints"),
        (name = "Admin", description = "Admin endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
