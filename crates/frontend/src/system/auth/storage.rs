use contracts::system::auth::TokenPair;
use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "admin_access_token";
const REFRESH_TOKEN_KEY: &str = "admin_refresh_token";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Persist both tokens to localStorage
pub fn save_tokens(tokens: &TokenPair) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(ACCESS_TOKEN_KEY, &tokens.access_token);
        let _ = storage.set_item(REFRESH_TOKEN_KEY, &tokens.refresh_token);
    }
}

/// Tokens saved by a previous visit, if an access token is among them
pub fn load_tokens() -> Option<TokenPair> {
    let storage = get_local_storage()?;
    let access_token = storage.get_item(ACCESS_TOKEN_KEY).ok()??;
    let refresh_token = storage
        .get_item(REFRESH_TOKEN_KEY)
        .ok()
        .flatten()
        .unwrap_or_default();
    Some(TokenPair {
        access_token,
        refresh_token,
    })
}

/// Clear all authentication tokens
pub fn clear_tokens() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(ACCESS_TOKEN_KEY);
        let _ = storage.remove_item(REFRESH_TOKEN_KEY);
    }
}
