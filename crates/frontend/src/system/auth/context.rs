//! Login session held in context and mirrored to localStorage.

use contracts::system::auth::{LoginResponse, UserInfo};
use leptos::prelude::*;

use super::storage;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
}

impl AuthState {
    fn restored() -> Self {
        Self {
            access_token: storage::get_access_token(),
            user_info: storage::get_user_info(),
        }
    }
}

/// Handle to the session signal.
#[derive(Clone, Copy)]
pub struct Session {
    state: RwSignal<AuthState>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.state.with(|s| s.access_token.is_some())
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.state.with(|s| s.user_info.clone())
    }

    /// Stores the token and user; the shell switches to the main layout.
    pub fn complete_login(&self, response: LoginResponse) {
        storage::save_access_token(&response.token);
        storage::save_user_info(&response.user);
        self.state.set(AuthState {
            access_token: Some(response.token),
            user_info: Some(response.user),
        });
    }

    /// Local only: the upstream keeps no server-side session to revoke.
    pub fn logout(&self) {
        storage::clear_tokens();
        self.state.set(AuthState::default());
    }
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    provide_context(Session {
        state: RwSignal::new(AuthState::restored()),
    });
    children()
}

pub fn use_auth() -> Session {
    use_context::<Session>().expect("AuthProvider not found in component tree")
}
