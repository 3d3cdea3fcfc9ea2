use axum::{
    Json, Router,
    http::header,
    response::{IntoResponse, Response},
    routing::post,
};

use crate::{
    dto::export::ExportOrdersRequest,
    error::AppResult,
    export::CSV_CONTENT_TYPE,
    middleware::auth::AuthUser,
    services::export_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/orders/export", post(export_orders))
}

#[utoipa::path(
    post,
    path = "/api/admin/orders/export",
    request_body = ExportOrdersRequest,
    responses(
        (status = 200, description = "CSV download of the given orders (admin only)", content_type = "text/csv", body = String),
        (status = 400, description = "Missing or invalid token"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn export_orders(
    user: AuthUser,
    Json(payload): Json<ExportOrdersRequest>,
) -> AppResult<Response> {
    let export = export_service::export_orders(&user, payload)?;
    let disposition = format!("attachment; filename=\"{}\"", export.filename);

    Ok((
        [
            (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.body,
    )
        .into_response())
}
