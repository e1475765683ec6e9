//! Thin HTTP wrapper around the admin REST API.
//!
//! [`ApiClient`] attaches the bearer token from the session, unwraps the
//! `{status, data, message}` envelope when the backend uses one, and turns
//! every failure into an [`ApiError`] with a toast side effect that callers
//! can suppress per request.

mod client;
mod error;
mod notify;
mod transport;

#[cfg(test)]
pub mod testing;

pub use client::{ApiClient, ApiRequest, SessionContext, SUCCESS_STATUS};
pub use error::{ApiError, ServerFieldErrors};
pub use notify::{Notice, NoticeKind, Notifier};
pub use transport::{FetchTransport, HttpRequest, HttpResponse, Method, Transport, TransportError};
