use chrono::Utc;

use crate::{
    audit::log_audit,
    dto::export::ExportOrdersRequest,
    error::AppResult,
    export::{export_filename, orders_to_csv},
    middleware::auth::{AuthUser, ensure_admin},
};

pub struct CsvExport {
    pub filename: String,
    pub body: String,
}

pub fn export_orders(user: &AuthUser, payload: ExportOrdersRequest) -> AppResult<CsvExport> {
    ensure_admin(user)?;

    let body = orders_to_csv(&payload.orders, &payload.products)?;
    let filename = export_filename(Utc::now().date_naive());

    log_audit(
        None,
        Some(user.subject.as_str()),
        "orders_export",
        Some(serde_json::json!({ "orders": payload.orders.len(), "filename": &filename })),
    );

    Ok(CsvExport { filename, body })
}
