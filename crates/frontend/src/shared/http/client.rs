use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::error::ApiError;
use super::notify::{Notice, Notifier};
use super::transport::{HttpRequest, HttpResponse, Method, Transport};
use crate::shared::api_utils::join_url;

/// Envelope status code that means success besides any 2xx code.
pub const SUCCESS_STATUS: i64 = 0;

const GENERIC_ERROR: &str = "Request failed, please try again later";

/// What the HTTP layer needs to know about the signed-in session.
pub trait SessionContext: Send + Sync {
    fn access_token(&self) -> Option<String>;
    /// Drop tokens and profile. Called synchronously on every HTTP 401.
    fn clear(&self);
}

/// One call against the API, before the verb is chosen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiRequest {
    pub path: String,
    pub query: Option<String>,
    pub body: Option<Value>,
    pub skip_error_toast: bool,
    /// Body is a plain REST resource, never an envelope.
    pub raw: bool,
}

impl ApiRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Query string from a serializable value; `None` fields disappear.
    pub fn query<Q: Serialize>(mut self, params: &Q) -> Result<Self, ApiError> {
        let qs = serde_qs::to_string(params).map_err(|e| ApiError::Encode {
            message: format!("Failed to encode query: {}", e),
        })?;
        self.query = if qs.is_empty() { None } else { Some(qs) };
        Ok(self)
    }

    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Encode {
            message: format!("Failed to serialize request: {}", e),
        })?;
        self.body = Some(value);
        Ok(self)
    }

    /// Keep failures of this request out of the toast area.
    pub fn skip_error_toast(mut self) -> Self {
        self.skip_error_toast = true;
        self
    }

    /// For endpoints whose records carry their own `status` field.
    pub fn raw(mut self) -> Self {
        self.raw = true;
        self
    }
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    session: Arc<dyn SessionContext>,
    transport: Arc<dyn Transport>,
    notifier: Arc<dyn Notifier>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        session: Arc<dyn SessionContext>,
        transport: Arc<dyn Transport>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            session,
            transport,
            notifier,
        }
    }

    pub fn notify(&self, notice: Notice) {
        self.notifier.notify(notice);
    }

    pub async fn get<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        self.request(Method::Get, request).await
    }

    pub async fn post<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        self.request(Method::Post, request).await
    }

    pub async fn put<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        self.request(Method::Put, request).await
    }

    pub async fn patch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        self.request(Method::Patch, request).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        self.request(Method::Delete, request).await
    }

    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        request: ApiRequest,
    ) -> Result<T, ApiError> {
        let skip_error_toast = request.skip_error_toast;
        let raw = request.raw;
        let http = self.prepare(method, request);
        log::debug!("{} {}", http.method, http.url);

        let outcome = match self.transport.send(http).await {
            Ok(response) => interpret(response, raw),
            Err(err) => Err(ApiError::Transport {
                message: if err.0.is_empty() {
                    GENERIC_ERROR.to_string()
                } else {
                    err.0
                },
            }),
        };

        let value = outcome.map_err(|err| self.fail(err, skip_error_toast))?;
        serde_json::from_value(value).map_err(|e| {
            self.fail(
                ApiError::Decode {
                    message: format!("Failed to parse response: {}", e),
                },
                skip_error_toast,
            )
        })
    }

    fn prepare(&self, method: Method, request: ApiRequest) -> HttpRequest {
        let mut url = join_url(&self.base_url, &request.path);
        if let Some(query) = request.query {
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str(&query);
        }

        let mut headers = Vec::new();
        if let Some(token) = self.session.access_token() {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }
        let body = request.body.map(|body| {
            headers.push((
                "Content-Type".to_string(),
                "application/json;charset=utf-8".to_string(),
            ));
            body.to_string()
        });

        HttpRequest {
            method,
            url,
            headers,
            body,
        }
    }

    /// Side effects shared by every failure: 401 clears the session no
    /// matter what, the toast fires unless suppressed or a 400.
    fn fail(&self, err: ApiError, skip_error_toast: bool) -> ApiError {
        log::warn!("API request failed: {}", err);
        if matches!(err, ApiError::Unauthorized { .. }) {
            self.session.clear();
        }
        if !skip_error_toast && !err.is_validation() {
            self.notifier.notify(Notice::error(err.to_string()));
        }
        err
    }
}

fn interpret(response: HttpResponse, raw: bool) -> Result<Value, ApiError> {
    if !(200..300).contains(&response.status) {
        return Err(error_for_status(response.status, response.body));
    }
    let body = response.body.unwrap_or(Value::Null);
    if raw {
        return Ok(body);
    }
    unwrap_envelope(body)
}

fn error_for_status(status: u16, body: Option<Value>) -> ApiError {
    let message = body
        .as_ref()
        .and_then(|b| text_field(b, "message").or_else(|| text_field(b, "detail")))
        .unwrap_or_else(|| format!("Request failed with status code {}", status));
    match status {
        400 => ApiError::Validation {
            message,
            body: body.unwrap_or(Value::Null),
        },
        401 => ApiError::Unauthorized { message },
        _ => ApiError::Server { status, message },
    }
}

/// Any object with a `status` key is an envelope; everything else is a plain
/// REST body and passes through untouched.
fn unwrap_envelope(body: Value) -> Result<Value, ApiError> {
    let mut map = match body {
        Value::Object(map) if map.contains_key("status") => map,
        other => return Ok(other),
    };

    let status = map.remove("status").unwrap_or(Value::Null);
    if is_success_status(&status) {
        return Ok(map.remove("data").unwrap_or(Value::Null));
    }
    let message = map
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .unwrap_or(GENERIC_ERROR)
        .to_string();
    Err(ApiError::Envelope { status, message })
}

fn is_success_status(status: &Value) -> bool {
    status
        .as_i64()
        .map(|code| code == SUCCESS_STATUS || (200..300).contains(&code))
        .unwrap_or(false)
}

fn text_field(body: &Value, key: &str) -> Option<String> {
    body.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
