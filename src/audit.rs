use serde_json::Value;
use uuid::Uuid;

/// Emits an audit event on the `audit` tracing target.
pub fn log_audit(
    cart_id: Option<Uuid>,
    actor: Option<&str>,
    action: &str,
    metadata: Option<Value>,
) {
    let metadata = metadata.unwrap_or(Value::Null);
    tracing::info!(
        target: "audit",
        cart_id = ?cart_id,
        actor = actor.unwrap_or("-"),
        action,
        %metadata,
        "audit"
    );
}
