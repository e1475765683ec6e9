use leptos::prelude::*;

use super::session::SessionStore;
use crate::shared::http::ApiClient;

/// Session store provided by `App`.
pub fn use_session() -> SessionStore {
    use_context::<SessionStore>().expect("SessionStore not found in component tree")
}

/// API client provided by `App`.
pub fn use_api() -> ApiClient {
    use_context::<ApiClient>().expect("ApiClient not found in component tree")
}
