use contracts::system::auth::{Profile, TokenPair};
use leptos::prelude::*;

use super::storage;
use crate::shared::http::SessionContext;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user_info: Option<Profile>,
}

/// Tokens and profile of the signed-in administrator.
///
/// State changes only through the action methods. Reads are synchronous and
/// untracked so the HTTP layer can use them outside any component; views
/// subscribe through [`SessionStore::state`].
#[derive(Clone, Copy)]
pub struct SessionStore {
    state: RwSignal<SessionState>,
    persist: bool,
}

impl SessionStore {
    /// In-memory session, nothing survives a reload.
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(SessionState::default()),
            persist: false,
        }
    }

    /// Session backed by localStorage, restored from a previous visit.
    pub fn persistent() -> Self {
        let tokens = storage::load_tokens();
        if tokens.is_some() {
            log::debug!("Restored session tokens from storage");
        }
        Self {
            state: RwSignal::new(SessionState {
                access_token: tokens.as_ref().map(|t| t.access_token.clone()),
                refresh_token: tokens.map(|t| t.refresh_token),
                user_info: None,
            }),
            persist: true,
        }
    }

    pub fn state(&self) -> ReadSignal<SessionState> {
        self.state.read_only()
    }

    pub fn access_token(&self) -> Option<String> {
        self.state.with_untracked(|s| s.access_token.clone())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.state.with_untracked(|s| s.refresh_token.clone())
    }

    pub fn user_info(&self) -> Option<Profile> {
        self.state.with_untracked(|s| s.user_info.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with_untracked(|s| s.access_token.is_some())
    }

    pub fn set_user_info(&self, profile: Profile) {
        self.state.update(|s| s.user_info = Some(profile));
    }

    pub fn set_user_token(&self, tokens: TokenPair) {
        if self.persist {
            storage::save_tokens(&tokens);
        }
        self.state.update(|s| {
            s.access_token = Some(tokens.access_token);
            s.refresh_token = Some(tokens.refresh_token);
        });
    }

    pub fn clear_user_info_and_token(&self) {
        if self.persist {
            storage::clear_tokens();
        }
        self.state.set(SessionState::default());
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionContext for SessionStore {
    fn access_token(&self) -> Option<String> {
        SessionStore::access_token(self)
    }

    fn clear(&self) {
        self.clear_user_info_and_token();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::users::UserId;

    fn profile() -> Profile {
        Profile {
            id: UserId::Number(1),
            email: "root@site.io".into(),
            username: None,
            first_name: None,
            last_name: None,
            avatar: None,
            is_superuser: true,
        }
    }

    #[test]
    fn tokens_and_profile_are_set_by_actions() {
        let session = SessionStore::new();
        assert!(!session.is_authenticated());

        session.set_user_token(TokenPair {
            access_token: "a".into(),
            refresh_token: "r".into(),
        });
        session.set_user_info(profile());

        assert_eq!(session.access_token().as_deref(), Some("a"));
        assert_eq!(session.refresh_token().as_deref(), Some("r"));
        assert_eq!(session.user_info(), Some(profile()));
    }

    #[test]
    fn clear_drops_everything() {
        let session = SessionStore::new();
        session.set_user_token(TokenPair::default());
        session.set_user_info(profile());
        SessionContext::clear(&session);
        assert_eq!(session.state().get_untracked(), SessionState::default());
    }
}
