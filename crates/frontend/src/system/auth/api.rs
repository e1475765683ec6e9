use contracts::system::auth::{
    ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, LoginResponse, Profile, TokenPair,
};
use serde_json::Value;

use crate::shared::api_utils::endpoints;
use crate::shared::http::{ApiClient, ApiError, ApiRequest};

/// Tokens with their field names normalized, plus the profile when the
/// backend embeds it in the login answer.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginOutcome {
    pub tokens: TokenPair,
    pub user: Option<Profile>,
}

/// Login with username and password
pub async fn login(
    client: &ApiClient,
    username: String,
    password: String,
) -> Result<LoginOutcome, ApiError> {
    let request = ApiRequest::new(endpoints::LOGIN).json(&LoginRequest { username, password })?;
    let response: LoginResponse = client.post(request).await?;
    Ok(LoginOutcome {
        tokens: response.tokens(),
        user: response.user,
    })
}

/// Current administrator. Failures are never toasted: a missing profile
/// during bootstrap is not something the user can act on.
pub async fn get_profile(client: &ApiClient) -> Result<Profile, ApiError> {
    client
        .get(ApiRequest::new(endpoints::PROFILE).skip_error_toast())
        .await
}

pub async fn change_password(
    client: &ApiClient,
    request: &ChangePasswordRequest,
) -> Result<Value, ApiError> {
    client
        .post(ApiRequest::new(endpoints::CHANGE_PASSWORD).json(request)?)
        .await
}

pub async fn forgot_password(
    client: &ApiClient,
    request: &ForgotPasswordRequest,
) -> Result<Value, ApiError> {
    client
        .post(ApiRequest::new(endpoints::FORGOT_PASSWORD).json(request)?)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::http::testing::harness;
    use crate::shared::http::Method;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn login_normalizes_simplejwt_token_names() {
        let h = harness();
        h.transport.reply(200, json!({"access": "acc", "refresh": "ref"}));
        let outcome = block_on(login(&h.client, "root".into(), "secret".into())).unwrap();
        assert_eq!(outcome.tokens.access_token, "acc");
        assert_eq!(outcome.tokens.refresh_token, "ref");
        assert!(outcome.user.is_none());

        let sent = h.transport.last_request().unwrap();
        assert_eq!(sent.method, Method::Post);
        assert!(sent.url.ends_with("/admin/login/"));
        let body: Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"username": "root", "password": "secret"}));
    }

    #[test]
    fn login_accepts_enveloped_camel_case_tokens() {
        let h = harness();
        h.transport.reply(
            200,
            json!({"status": 0, "data": {
                "accessToken": "a", "refreshToken": "r",
                "user": {"id": 1, "email": "root@site.io"}
            }}),
        );
        let outcome = block_on(login(&h.client, "root".into(), "pw".into())).unwrap();
        assert_eq!(outcome.tokens.access_token, "a");
        assert_eq!(outcome.user.unwrap().email, "root@site.io");
    }

    #[test]
    fn profile_failures_are_not_toasted() {
        let h = harness();
        h.transport.reply(500, json!({"message": "boom"}));
        assert!(block_on(get_profile(&h.client)).is_err());
        assert!(h.notifier.messages().is_empty());
    }

    #[test]
    fn password_endpoints_pass_bodies_through() {
        let h = harness();
        h.transport.reply(200, json!({"detail": "Password changed"}));
        let value = block_on(change_password(
            &h.client,
            &ChangePasswordRequest {
                old_password: "old".into(),
                new_password: "newpass".into(),
            },
        ))
        .unwrap();
        assert_eq!(value, json!({"detail": "Password changed"}));

        h.transport.reply(200, json!({"sent": true}));
        let value = block_on(forgot_password(
            &h.client,
            &ForgotPasswordRequest {
                email: "a@b.io".into(),
            },
        ))
        .unwrap();
        assert_eq!(value["sent"], json!(true));
        assert!(h
            .transport
            .last_request()
            .unwrap()
            .url
            .ends_with("/admin/forgot-password/"));
    }
}
