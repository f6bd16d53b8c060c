//! Logged-in user, as left in localStorage by the sign-in flow.

use serde::Deserialize;
use smokes_shared::models::UserId;

use crate::config::{TOKEN_STORAGE_KEY, USER_STORAGE_KEY};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: UserId,
    #[serde(default, alias = "displayName")]
    pub username: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<SessionUser>,
}

impl Session {
    /// Build from raw storage values. A user without a token is ignored.
    pub fn from_parts(token: Option<String>, user_json: Option<String>) -> Self {
        let token = token.filter(|t| !t.trim().is_empty());
        let user = match (&token, user_json) {
            (Some(_), Some(json)) => match serde_json::from_str::<SessionUser>(&json) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring malformed stored user");
                    None
                }
            },
            _ => None,
        };
        Session { token, user }
    }

    /// Read the current session from localStorage. Missing storage means logged out.
    pub fn load() -> Self {
        let Some(storage) = local_storage() else {
            return Session::default();
        };
        let token = storage.get_item(TOKEN_STORAGE_KEY).ok().flatten();
        let user = storage.get_item(USER_STORAGE_KEY).ok().flatten();
        Session::from_parts(token, user)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user.as_ref().map(|u| u.id)
    }

    pub fn is_author(&self, author_id: UserId) -> bool {
        self.user_id() == Some(author_id)
    }
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_from_parts() {
        let s = Session::from_parts(
            Some("tok".to_string()),
            Some(r#"{"id":5,"username":"flick","avatarUrl":"https://a/b.png","steamId":"765"}"#.to_string()),
        );
        assert!(s.is_authenticated());
        assert_eq!(s.user_id(), Some(5));
        assert!(s.is_author(5));
        assert!(!s.is_author(6));
    }

    #[test]
    fn test_user_without_token_is_logged_out() {
        let s = Session::from_parts(None, Some(r#"{"id":5}"#.to_string()));
        assert!(!s.is_authenticated());
        assert_eq!(s.user_id(), None);

        let blank = Session::from_parts(Some("  ".to_string()), None);
        assert!(!blank.is_authenticated());
    }

    #[test]
    fn test_malformed_user_keeps_token() {
        let s = Session::from_parts(Some("tok".to_string()), Some("not json".to_string()));
        assert!(s.is_authenticated());
        assert!(s.user.is_none());
    }

    #[test]
    fn test_display_name_alias() {
        let user: SessionUser = serde_json::from_str(r#"{"id":1,"displayName":"Zywoo"}"#).unwrap();
        assert_eq!(user.username.as_deref(), Some("Zywoo"));
    }
}
