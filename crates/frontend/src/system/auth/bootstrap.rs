use super::api::{self, LoginOutcome};
use super::session::SessionStore;
use crate::shared::http::ApiClient;

/// Reload the administrator profile for a session restored from storage.
///
/// Runs only when a token is present. A failure is logged and otherwise
/// ignored; a 401 has already cleared the session by the time it returns.
pub async fn restore_profile(client: &ApiClient, session: SessionStore) -> bool {
    if !session.is_authenticated() {
        return false;
    }
    match api::get_profile(client).await {
        Ok(profile) => {
            log::debug!("profile restored for {}", profile.email);
            session.set_user_info(profile);
            true
        }
        Err(e) => {
            log::warn!("profile bootstrap failed: {}", e);
            false
        }
    }
}

/// Store what a successful login returned, fetching the profile when the
/// login answer did not embed it.
pub async fn complete_sign_in(client: &ApiClient, session: SessionStore, outcome: LoginOutcome) {
    session.set_user_token(outcome.tokens);
    match outcome.user {
        Some(profile) => session.set_user_info(profile),
        None => {
            restore_profile(client, session).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::http::testing::harness;
    use contracts::system::auth::{Profile, TokenPair};
    use contracts::system::users::UserId;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn no_token_means_no_request() {
        let h = harness();
        assert!(!block_on(restore_profile(&h.client, h.session)));
        assert!(h.transport.requests().is_empty());
    }

    #[test]
    fn restored_profile_lands_in_session() {
        let h = harness();
        h.sign_in("tok");
        h.transport
            .reply(200, json!({"id": 3, "email": "root@site.io", "username": "root"}));
        assert!(block_on(restore_profile(&h.client, h.session)));
        assert_eq!(h.session.user_info().unwrap().email, "root@site.io");
        assert_eq!(
            h.transport.last_request().unwrap().header("authorization"),
            Some("Bearer tok")
        );
    }

    #[test]
    fn failed_bootstrap_is_silent() {
        let h = harness();
        h.sign_in("tok");
        h.transport.reply(500, json!({"message": "down"}));
        assert!(!block_on(restore_profile(&h.client, h.session)));
        assert!(h.notifier.messages().is_empty());
        assert!(h.session.is_authenticated());
    }

    #[test]
    fn sign_in_fetches_missing_profile() {
        let h = harness();
        h.transport.reply(200, json!({"id": 1, "email": "a@b.io"}));
        let outcome = LoginOutcome {
            tokens: TokenPair {
                access_token: "acc".into(),
                refresh_token: "ref".into(),
            },
            user: None,
        };
        block_on(complete_sign_in(&h.client, h.session, outcome));
        assert_eq!(h.session.access_token().as_deref(), Some("acc"));
        assert_eq!(h.session.user_info().unwrap().email, "a@b.io");
        assert_eq!(h.transport.requests().len(), 1);
    }

    #[test]
    fn sign_in_uses_embedded_profile() {
        let h = harness();
        let profile = Profile {
            id: UserId::Number(1),
            email: "a@b.io".into(),
            username: None,
            first_name: None,
            last_name: None,
            avatar: None,
            is_superuser: true,
        };
        let outcome = LoginOutcome {
            tokens: TokenPair::default(),
            user: Some(profile.clone()),
        };
        block_on(complete_sign_in(&h.client, h.session, outcome));
        assert_eq!(h.session.user_info(), Some(profile));
        assert!(h.transport.requests().is_empty());
    }
}
