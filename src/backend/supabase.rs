use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::backend::IntakeBackend;
use crate::config::Config;
use crate::error::IntakeError;

/// Thin client over the hosted backend's three HTTP surfaces: object storage,
/// the REST insert API, and function invocation. One `reqwest::Client` is
/// built up front and cloned per call.
#[derive(Clone)]
pub struct SupabaseBackend {
    http: reqwest::Client,
    base: Url,
    bucket: String,
}

impl SupabaseBackend {
    pub fn new(cfg: &Config) -> Result<Self, IntakeError> {
        let bad_key =
            || figment::Error::from("supabase anon key is not a valid header value".to_string());

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", cfg.supabase_anon_key))
            .map_err(|_| bad_key())?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        let apikey = HeaderValue::from_str(&cfg.supabase_anon_key).map_err(|_| bad_key())?;
        headers.insert("apikey", apikey);

        let http = reqwest::Client::builder()
            .user_agent("travel-intake/0.1")
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base: cfg.supabase_url.clone(),
            bucket: cfg.bucket.clone(),
        })
    }

    fn endpoint(&self, suffix: &str) -> String {
        format!("{}/{}", self.base.as_str().trim_end_matches('/'), suffix)
    }

    async fn check(
        resp: reqwest::Response,
        context: &'static str,
    ) -> Result<reqwest::Response, IntakeError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = resp.text().await.unwrap_or_default();
        Err(IntakeError::Backend {
            context,
            status: status.as_u16(),
            message,
        })
    }
}

impl IntakeBackend for SupabaseBackend {
    async fn upload_object(
        &self,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), IntakeError> {
        let url = self.endpoint(&format!("storage/v1/object/{}/{}", self.bucket, path));
        debug!(path, size = bytes.len(), "uploading object");
        let resp = self
            .http
            .post(url)
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await?;
        Self::check(resp, "object upload").await?;
        Ok(())
    }

    async fn insert_returning_id(
        &self,
        table: &'static str,
        row: &Value,
    ) -> Result<i64, IntakeError> {
        let url = self.endpoint(&format!("rest/v1/{table}"));
        let resp = self
            .http
            .post(url)
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await?;
        let resp = Self::check(resp, "row insert").await?;
        let rows: Vec<Value> = resp.json().await?;
        rows.first()
            .and_then(|r| r.get("id"))
            .and_then(Value::as_i64)
            .ok_or(IntakeError::MissingGeneratedId(table))
    }

    async fn insert_rows(&self, table: &'static str, rows: &[Value]) -> Result<(), IntakeError> {
        let url = self.endpoint(&format!("rest/v1/{table}"));
        let resp = self
            .http
            .post(url)
            .header("Prefer", "return=minimal")
            .json(&rows)
            .send()
            .await?;
        Self::check(resp, "batch insert").await?;
        Ok(())
    }

    async fn invoke_function(&self, name: &str, body: &Value) -> Result<Value, IntakeError> {
        let url = self.endpoint(&format!("functions/v1/{name}"));
        let resp = self.http.post(url).json(body).send().await?;
        let resp = Self::check(resp, "function invoke").await?;
        Ok(resp.json().await.unwrap_or(Value::Null))
    }
}
