//! Authenticated session: token and user lifecycle around the API client.

use std::sync::{Arc, RwLock};

use payloads::{APIClient, ApiError, User, requests, responses};

use crate::storage::{Storage, TokenStorage, UserStorage};

#[derive(Default)]
struct SessionState {
    user: Option<User>,
    token: Option<String>,
}

struct SessionInner {
    client: APIClient,
    storage: Arc<dyn Storage>,
    state: RwLock<SessionState>,
}

/// Shared handle to the authentication state. Cheap to clone; all clones
/// observe the same login.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl Session {
    /// Create a session, hydrating from storage. A stored token without a
    /// stored user (or vice versa) is ignored; both must be present to
    /// resume a login.
    pub fn new(client: APIClient, storage: Arc<dyn Storage>) -> Self {
        let token = TokenStorage::get(storage.as_ref());
        let user = UserStorage::get(storage.as_ref());
        let state = match (token, user) {
            (Some(token), Some(user)) => SessionState {
                user: Some(user),
                token: Some(token),
            },
            _ => SessionState::default(),
        };
        Self {
            inner: Arc::new(SessionInner {
                client,
                storage,
                state: RwLock::new(state),
            }),
        }
    }

    pub fn client(&self) -> &APIClient {
        &self.inner.client
    }

    pub fn token(&self) -> Option<String> {
        self.read(|state| state.token.clone())
    }

    pub fn user(&self) -> Option<User> {
        self.read(|state| state.user.clone())
    }

    /// Recomputed from current state on every call, never cached.
    pub fn is_authenticated(&self) -> bool {
        self.read(|state| state.token.is_some() && state.user.is_some())
    }

    pub async fn login(&self, credentials: &requests::Login) -> Result<User, ApiError> {
        let response = self.inner.client.login(credentials).await?;
        let data = response
            .data
            .ok_or_else(|| ApiError::Validation("login response had no data".to_string()))?;
        self.store_login(&data.token, &data.partner);
        Ok(data.partner)
    }

    pub async fn register(
        &self,
        details: &requests::Register,
    ) -> Result<responses::RegisterResponse, ApiError> {
        let response = self.inner.client.register(details).await?;
        let data = response
            .data
            .ok_or_else(|| ApiError::Validation("register response had no data".to_string()))?;
        self.store_login(&data.token, &data.partner);
        Ok(data)
    }

    /// End the session. The server is notified best-effort; local state is
    /// cleared whether or not that call succeeds.
    pub async fn logout(&self) {
        if let Some(token) = self.token() {
            if let Err(e) = self.inner.client.logout(&token).await {
                tracing::warn!("logout request failed: {e}");
            }
        }
        self.clear();
    }

    /// Re-fetch the user profile to pick up server-side changes. A no-op
    /// when logged out; failures are logged and the cached user is kept.
    pub async fn refresh_user(&self) {
        let Some(token) = self.token() else { return };
        match self.inner.client.user_profile(&token).await {
            Ok(response) => {
                if let Some(user) = response.data {
                    UserStorage::set(self.inner.storage.as_ref(), &user);
                    self.write(|state| state.user = Some(user));
                }
            }
            Err(e) => tracing::error!("failed to refresh user profile: {e}"),
        }
    }

    fn store_login(&self, token: &str, user: &User) {
        TokenStorage::set(self.inner.storage.as_ref(), token);
        UserStorage::set(self.inner.storage.as_ref(), user);
        self.write(|state| {
            state.token = Some(token.to_string());
            state.user = Some(user.clone());
        });
    }

    fn clear(&self) {
        TokenStorage::remove(self.inner.storage.as_ref());
        UserStorage::remove(self.inner.storage.as_ref());
        self.write(|state| *state = SessionState::default());
    }

    fn read<R>(&self, f: impl FnOnce(&SessionState) -> R) -> R {
        f(&self.inner.state.read().unwrap_or_else(|e| e.into_inner()))
    }

    fn write(&self, f: impl FnOnce(&mut SessionState)) {
        f(&mut self.inner.state.write().unwrap_or_else(|e| e.into_inner()));
    }
}
