use std::{future::Future, sync::Arc, time::Duration};

use warden_core::{PasswordHasher, TokenIssuer, UserStore};

use crate::{
    error::AuthError,
    use_cases::{
        AuthResponse, LoginRequest, LoginUseCase, RefreshTokenRequest, RefreshTokenUseCase,
        SignupRequest, SignupUseCase, TokenClaims, TokenPair, ValidateTokenRequest,
        ValidateTokenUseCase,
    },
};

/// All authentication workflows behind one cheaply clonable handle.
///
/// Stores implement Clone via internal `Arc`, so every use case shares the
/// same backing state. When a deadline is set, each call is abandoned once it
/// elapses; dropping the workflow future drops any in-flight port calls.
pub struct AuthUseCases<U, H, T>
where
    U: UserStore,
    H: PasswordHasher,
    T: TokenIssuer,
{
    inner: Arc<Inner<U, H, T>>,
    deadline: Option<Duration>,
}

struct Inner<U, H, T>
where
    U: UserStore,
    H: PasswordHasher,
    T: TokenIssuer,
{
    signup: SignupUseCase<U, H, T>,
    login: LoginUseCase<U, H, T>,
    validate_token: ValidateTokenUseCase<U, T>,
    refresh_token: RefreshTokenUseCase<U, T>,
}

impl<U, H, T> Clone for AuthUseCases<U, H, T>
where
    U: UserStore,
    H: PasswordHasher,
    T: TokenIssuer,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            deadline: self.deadline,
        }
    }
}

impl<U, H, T> AuthUseCases<U, H, T>
where
    U: UserStore + Clone,
    H: PasswordHasher + Clone,
    T: TokenIssuer + Clone,
{
    pub fn new(user_store: U, password_hasher: H, token_issuer: T) -> Self {
        let inner = Inner {
            signup: SignupUseCase::new(
                user_store.clone(),
                password_hasher.clone(),
                token_issuer.clone(),
            ),
            login: LoginUseCase::new(user_store.clone(), password_hasher, token_issuer.clone()),
            validate_token: ValidateTokenUseCase::new(user_store.clone(), token_issuer.clone()),
            refresh_token: RefreshTokenUseCase::new(user_store, token_issuer),
        };

        Self {
            inner: Arc::new(inner),
            deadline: None,
        }
    }

    /// Bounds every workflow call by `deadline`.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

impl<U, H, T> AuthUseCases<U, H, T>
where
    U: UserStore,
    H: PasswordHasher,
    T: TokenIssuer,
{
    /// Precomputes login's dummy hash. Logins work without it; the first one
    /// for an unknown email is then slower than a wrong password.
    pub async fn warm_up(&self) -> Result<(), AuthError> {
        Ok(self.inner.login.warm_up().await?)
    }

    pub async fn signup(&self, request: SignupRequest) -> Result<AuthResponse, AuthError> {
        self.bounded(self.inner.signup.execute(request)).await
    }

    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AuthError> {
        self.bounded(self.inner.login.execute(request)).await
    }

    pub async fn validate_token(
        &self,
        request: ValidateTokenRequest,
    ) -> Result<TokenClaims, AuthError> {
        self.bounded(self.inner.validate_token.execute(request))
            .await
    }

    pub async fn refresh_token(
        &self,
        request: RefreshTokenRequest,
    ) -> Result<TokenPair, AuthError> {
        self.bounded(self.inner.refresh_token.execute(request))
            .await
    }

    async fn bounded<F, R>(&self, workflow: F) -> Result<R, AuthError>
    where
        F: Future<Output = Result<R, AuthError>>,
    {
        match self.deadline {
            Some(deadline) => tokio::time::timeout(deadline, workflow)
                .await
                .map_err(|_| AuthError::DeadlineExceeded(deadline))?,
            None => workflow.await,
        }
    }
}
