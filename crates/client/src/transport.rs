//! Request transport.
//!
//! [`Transport`] is the seam between typed resource clients and the wire.
//! [`HttpTransport`] wraps a [`reqwest::Client`]; tests substitute their
//! own implementation.

use async_trait::async_trait;
use labadmin_core::form::convert_empty_to_null;
use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::ClientError;

/// HTTP verbs used by the lab API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A transport-agnostic API call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path below the base URL, starting with `/`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Append one query parameter.
    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Append all non-null scalar fields of `params` as query parameters.
    pub fn params<T: Serialize + ?Sized>(mut self, params: &T) -> Result<Self, ClientError> {
        self.query.extend(query_pairs(params)?);
        Ok(self)
    }

    pub fn pairs(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    /// Attach a JSON body.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ClientError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Executes an [`ApiRequest`] and returns the raw JSON response body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<Value, ClientError>;
}

/// Flatten a serializable filter struct into query pairs.
///
/// Nulls and empty strings are skipped, booleans and numbers are
/// stringified, arrays repeat the key. Nested objects are rejected.
pub fn query_pairs<T: Serialize + ?Sized>(params: &T) -> Result<Vec<(String, String)>, ClientError> {
    let map = match convert_empty_to_null(serde_json::to_value(params)?) {
        Value::Null => return Ok(Vec::new()),
        Value::Object(map) => map,
        other => {
            return Err(ClientError::Query(format!(
                "Query parameters must be an object, got {other}"
            )))
        }
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        match value {
            Value::Array(items) => {
                for item in items {
                    if let Some(s) = scalar(&key, item)? {
                        pairs.push((key.clone(), s));
                    }
                }
            }
            other => {
                if let Some(s) = scalar(&key, other)? {
                    pairs.push((key, s));
                }
            }
        }
    }
    Ok(pairs)
}

fn scalar(key: &str, value: Value) -> Result<Option<String>, ClientError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Array(_) | Value::Object(_) => Err(ClientError::Query(format!(
            "Query parameter '{key}' must be a scalar"
        ))),
    }
}

/// Transport over HTTP using [`reqwest`].
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpTransport {
    /// Build a transport from configuration (timeout, base URL, token).
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self::with_client(
            client,
            config.base_url.clone(),
            config.token.clone(),
        ))
    }

    /// Reuse an existing [`reqwest::Client`] (shared connection pool).
    pub fn with_client(client: reqwest::Client, base_url: String, token: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`ClientError::Status`]
    /// containing the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Value, ClientError> {
        let url = format!("{}{}", self.base_url, request.path);
        let request_id = uuid::Uuid::new_v4().to_string();

        let mut builder = self
            .client
            .request(request.method.into(), &url)
            .header("x-request-id", &request_id);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        tracing::debug!(
            method = %request.method,
            path = %request.path,
            request_id = %request_id,
            "Sending lab API request"
        );

        let response = builder.send().await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<Value>().await?)
    }
}
