//! API base URL and endpoint paths.
//!
//! The base URL comes from the `APP_API_BASE_URL` environment variable at
//! build time. Without it the console talks to its own origin.

/// Admin REST endpoints. Paths are relative to [`api_base`].
pub mod endpoints {
    pub const LOGIN: &str = "/admin/login/";
    pub const PROFILE: &str = "/admin/profile/";
    pub const CHANGE_PASSWORD: &str = "/admin/change-password/";
    pub const FORGOT_PASSWORD: &str = "/admin/forgot-password/";
    pub const USERS: &str = "/admin/users/";

    /// `/admin/users/{id}/`
    pub fn user(id: impl std::fmt::Display) -> String {
        format!("{}{}/", USERS, id)
    }
}

/// Get the base URL for API requests
///
/// # Returns
/// - `APP_API_BASE_URL` without its trailing slash, when set at build time
/// - otherwise the page origin, like "https://admin.example.com"
/// - empty string if window is not available
pub fn api_base() -> String {
    if let Some(base) = configured_base(option_env!("APP_API_BASE_URL")) {
        return base;
    }
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    window.location().origin().unwrap_or_default()
}

fn configured_base(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Join a base URL and an endpoint path without doubling slashes.
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}
