//! Session state: who is signed in, and how they got there.
//!
//! `Unauthenticated -> login -> Authenticated(User) -> logout -> Unauthenticated`

use crate::api::client::DirectoryClient;
use crate::api::models::{LoginRequest, LoginResponse, User};
use crate::error::{ApiError, AppError, AuthError, CliError};
use crate::storage::token::TokenProvider;
use crate::utils::validation::validate_email;
use async_trait::async_trait;
use std::sync::Arc;

/// Server calls the auth context depends on.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError>;
    /// Profile of the user the stored token belongs to.
    async fn current_user(&self) -> Result<User, ApiError>;
}

#[async_trait]
impl AuthBackend for DirectoryClient {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        DirectoryClient::login(self, request).await
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        self.get_current_user().await
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum AuthState {
    #[default]
    Unauthenticated,
    Authenticated(User),
}

pub struct AuthContext {
    backend: Arc<dyn AuthBackend>,
    tokens: Arc<dyn TokenProvider>,
    state: AuthState,
}

impl AuthContext {
    /// `tokens` must be the same provider the backend's client reads from.
    pub fn new(backend: Arc<dyn AuthBackend>, tokens: Arc<dyn TokenProvider>) -> Self {
        Self {
            backend,
            tokens,
            state: AuthState::Unauthenticated,
        }
    }

    /// Context for a client, sharing the client's token provider.
    pub fn for_client(client: Arc<DirectoryClient>) -> Self {
        let tokens = client.token_provider();
        Self::new(client, tokens)
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, AuthState::Authenticated(_))
    }

    pub fn user(&self) -> Option<&User> {
        match &self.state {
            AuthState::Authenticated(user) => Some(user),
            AuthState::Unauthenticated => None,
        }
    }

    /// Restore a persisted session.
    ///
    /// A token the server no longer accepts is discarded and the context
    /// stays unauthenticated; that is not an error.
    pub async fn hydrate(&mut self) -> crate::Result<()> {
        if self.tokens.token()?.is_none() {
            log::debug!("No stored token, starting unauthenticated");
            self.state = AuthState::Unauthenticated;
            return Ok(());
        }

        match self.backend.current_user().await {
            Ok(user) => {
                log::debug!("Restored session for {}", user.email);
                self.state = AuthState::Authenticated(user);
            }
            Err(e) => {
                log::warn!("Stored token rejected, clearing it: {}", e);
                self.tokens.clear()?;
                self.state = AuthState::Unauthenticated;
            }
        }
        Ok(())
    }

    /// Sign in, persist the token, then fetch the profile.
    pub async fn login(&mut self, email: &str, password: &str) -> crate::Result<&User> {
        let email = email.trim();
        validate_email(email)?;
        if password.is_empty() {
            return Err(CliError::InvalidArguments("Password cannot be empty".to_string()).into());
        }

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.backend.login(&request).await.map_err(|e| match e {
            ApiError::Unauthorized { .. } => AppError::Auth(AuthError::InvalidCredentials),
            e @ ApiError::Http { status: 400, .. } => {
                AppError::Auth(AuthError::LoginFailed { message: e.message() })
            }
            other => AppError::Api(other),
        })?;

        let token = response
            .token
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;
        self.tokens.store(&token)?;

        let user = match self.backend.current_user().await {
            Ok(user) => user,
            Err(e) => {
                self.tokens.clear()?;
                self.state = AuthState::Unauthenticated;
                return Err(e.into());
            }
        };
        log::info!("Signed in as {}", user.email);
        self.state = AuthState::Authenticated(user);
        self.user()
            .ok_or_else(|| AppError::from(AuthError::SessionInvalid))
    }

    /// Forget the session locally. No server call is made.
    pub fn logout(&mut self) -> crate::Result<()> {
        self.tokens.clear()?;
        self.state = AuthState::Unauthenticated;
        Ok(())
    }
}
