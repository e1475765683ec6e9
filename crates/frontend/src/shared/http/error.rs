use std::collections::BTreeMap;

use serde_json::Value;

/// Field name → messages, as sent by the server on a validation failure.
pub type ServerFieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// No response at all.
    #[error("{message}")]
    Transport { message: String },
    /// HTTP 400. Never toasted: the calling form shows field errors instead.
    #[error("{message}")]
    Validation { message: String, body: Value },
    /// HTTP 401. The session has already been cleared when this is returned.
    #[error("{message}")]
    Unauthorized { message: String },
    /// Any other non-2xx status.
    #[error("{message}")]
    Server { status: u16, message: String },
    /// 2xx response whose envelope reported a failure status.
    #[error("{message}")]
    Envelope { status: Value, message: String },
    #[error("{message}")]
    Decode { message: String },
    #[error("{message}")]
    Encode { message: String },
}

impl ApiError {
    /// HTTP status of the failed response, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Validation { .. } => Some(400),
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation { .. })
    }

    /// Field errors carried by a validation failure.
    ///
    /// The backend nests them under `data` when it wraps responses in an
    /// envelope, and sends them as the whole body otherwise. A field may map
    /// to a list of messages or to a single string.
    pub fn field_errors(&self) -> Option<ServerFieldErrors> {
        let ApiError::Validation { body, .. } = self else {
            return None;
        };
        let map = match body {
            Value::Object(map) => match map.get("data") {
                Some(Value::Object(nested)) => nested,
                _ => map,
            },
            _ => return None,
        };

        let errors: ServerFieldErrors = map
            .iter()
            .map(|(field, messages)| (field.clone(), messages_of(messages)))
            .filter(|(_, messages)| !messages.is_empty())
            .collect();

        if errors.is_empty() {
            None
        } else {
            Some(errors)
        }
    }
}

fn messages_of(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().flat_map(messages_of).collect(),
        Value::String(s) if s.is_empty() => Vec::new(),
        Value::String(s) => vec![s.clone()],
        Value::Null => Vec::new(),
        other => vec![other.to_string()],
    }
}
