use serde_json::{Value, json};
use tracing::info;

use crate::backend::IntakeBackend;
use crate::error::IntakeError;

/// Trigger the confirmation email for a visa request. Called exactly once
/// per successful submission, after every row for it is persisted. A failure
/// here surfaces as a submission error even though the rows already exist.
pub async fn notify_visa<B: IntakeBackend>(
    backend: &B,
    function: &str,
    visa_request_id: i64,
) -> Result<Value, IntakeError> {
    let result = backend
        .invoke_function(function, &json!({ "visa_request_id": visa_request_id }))
        .await?;
    info!(visa_request_id, function, "confirmation email triggered");
    Ok(result)
}

/// Same function, package shape: a discriminator tag plus the package id.
pub async fn notify_package<B: IntakeBackend>(
    backend: &B,
    function: &str,
    trip_package_id: i64,
) -> Result<Value, IntakeError> {
    let result = backend
        .invoke_function(
            function,
            &json!({ "type": "package", "trip_package_id": trip_package_id }),
        )
        .await?;
    info!(trip_package_id, function, "confirmation email triggered");
    Ok(result)
}
