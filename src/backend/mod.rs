//! Seam between the intake flows and the hosted backend.
//!
//! The orchestrator is generic over this trait so tests can substitute a
//! recording fake for the real REST surface.

pub mod supabase;

use serde_json::Value;

use crate::error::IntakeError;

#[allow(async_fn_in_trait)]
pub trait IntakeBackend {
    /// Write `bytes` to object storage at `path`. Overwrite is disabled:
    /// an existing object at the same path is an error, not a replace.
    async fn upload_object(
        &self,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), IntakeError>;

    /// Insert one row and return the backend-generated id.
    async fn insert_returning_id(
        &self,
        table: &'static str,
        row: &Value,
    ) -> Result<i64, IntakeError>;

    /// Insert a batch of rows in a single request.
    async fn insert_rows(&self, table: &'static str, rows: &[Value]) -> Result<(), IntakeError>;

    /// Invoke a serverless function with a JSON body.
    async fn invoke_function(&self, name: &str, body: &Value) -> Result<Value, IntakeError>;
}
