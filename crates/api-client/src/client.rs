//! Configured HTTP client for the notes API.
//!
//! Every response of the API is a JSON envelope `{"message": ..., "<resource>": ...}`. The helpers
//! here issue one request, check the status and unwrap the named resource field.

use crate::{ApiError, ApiResult};
use reqwest::{multipart::Form, Method, Response, Url};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// Thin wrapper around a `reqwest::Client` bound to the API base URL.
#[derive(Clone, Debug)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpClient {
    /// Creates a client for the API rooted at `base_url`.
    ///
    /// A base URL with a path prefix (`https://host/api`) keeps that prefix for every request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if `base_url` cannot carry a path (for example
    /// `mailto:`), or [`ApiError::Transport`] if the underlying client cannot be built.
    pub fn new(mut base_url: Url) -> ApiResult<Self> {
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        // `Url::join` replaces the last segment unless the base ends with a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("scribe/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(format!("{path}: {e}")))
    }

    /// `GET path` and unwrap `field` from the envelope.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        field: &'static str,
    ) -> ApiResult<T> {
        tracing::debug!("GET {}", path);
        let response = self.http.get(self.url(path)?).send().await?;
        unwrap_envelope(Method::GET, path, field, response).await
    }

    /// `PUT path` with a JSON body and unwrap `field` from the envelope.
    pub(crate) async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        field: &'static str,
    ) -> ApiResult<T> {
        tracing::debug!("PUT {}", path);
        let response = self.http.put(self.url(path)?).json(body).send().await?;
        unwrap_envelope(Method::PUT, path, field, response).await
    }

    /// `POST path` with a `multipart/form-data` body and unwrap `field` from the envelope.
    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
        field: &'static str,
    ) -> ApiResult<T> {
        tracing::debug!("POST {} (multipart)", path);
        let response = self.http.post(self.url(path)?).multipart(form).send().await?;
        unwrap_envelope(Method::POST, path, field, response).await
    }
}

async fn unwrap_envelope<T: DeserializeOwned>(
    method: Method,
    path: &str,
    field: &'static str,
    response: Response,
) -> ApiResult<T> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<Value>(&bytes)
            .ok()
            .and_then(|body| body.get("message").and_then(Value::as_str).map(str::to_owned))
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("no message").to_owned());

        tracing::debug!("{} {} failed with {}: {}", method, path, status, message);
        return Err(ApiError::Status {
            method: method.to_string(),
            path: path.to_owned(),
            status: status.as_u16(),
            message,
        });
    }

    let mut envelope: Value = serde_json::from_slice(&bytes).map_err(ApiError::InvalidBody)?;
    let payload = match envelope.get_mut(field).map(Value::take) {
        Some(Value::Null) | None => return Err(ApiError::MissingField { field }),
        Some(payload) => payload,
    };

    serde_json::from_value(payload).map_err(|source| ApiError::Decode { field, source })
}
