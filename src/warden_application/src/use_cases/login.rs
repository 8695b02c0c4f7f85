use std::sync::Arc;

use secrecy::Secret;
use tokio::sync::OnceCell;
use warden_core::{
    DomainError, Email, Password, PasswordHasher, PasswordHasherError, TokenIssuer, UserStore,
    UserStoreError,
};

use super::{ACCOUNT_INACTIVE, AuthResponse, INVALID_CREDENTIALS, issue_token_pair};
use crate::error::AuthError;

const DUMMY_PASSWORD: &str = "Dummy-Passw0rd-For-Timing";

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: Secret<String>,
}

/// Login use case - handles user authentication
pub struct LoginUseCase<U, H, T>
where
    U: UserStore,
    H: PasswordHasher,
    T: TokenIssuer,
{
    user_store: U,
    password_hasher: H,
    token_issuer: T,
    // Compared against when the email is unknown so that both failure paths
    // pay for one hash verification.
    dummy_hash: Arc<OnceCell<Password>>,
}

impl<U, H, T> LoginUseCase<U, H, T>
where
    U: UserStore,
    H: PasswordHasher,
    T: TokenIssuer,
{
    pub fn new(user_store: U, password_hasher: H, token_issuer: T) -> Self {
        Self {
            user_store,
            password_hasher,
            token_issuer,
            dummy_hash: Arc::new(OnceCell::new()),
        }
    }

    /// Execute the login use case
    ///
    /// # Arguments
    /// * `request` - Email and plaintext password as typed by the user
    ///
    /// # Returns
    /// The user's id and email together with a fresh token pair
    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, request))]
    pub async fn execute(&self, request: LoginRequest) -> Result<AuthResponse, AuthError> {
        let Ok(email) = Email::parse(&request.email) else {
            return Err(DomainError::unauthorized(INVALID_CREDENTIALS).into());
        };

        let user = match self.user_store.find_by_email(&email).await {
            Ok(user) => user,
            Err(UserStoreError::UserNotFound) => {
                self.compare_against_dummy(&request.password).await;
                return Err(DomainError::unauthorized(INVALID_CREDENTIALS).into());
            }
            Err(e) => return Err(e.into()),
        };

        if !user.can_login() {
            return Err(DomainError::forbidden(ACCOUNT_INACTIVE).into());
        }

        match self
            .password_hasher
            .compare(user.password(), &request.password)
            .await
        {
            Ok(()) => {}
            Err(PasswordHasherError::Mismatch) => {
                return Err(DomainError::unauthorized(INVALID_CREDENTIALS).into());
            }
            Err(e) => return Err(e.into()),
        }

        let tokens = issue_token_pair(&self.token_issuer, &user).await?;

        tracing::info!(user_id = %user.id(), "user logged in");

        Ok(AuthResponse::new(&user, tokens))
    }

    /// Computes the hash compared against for unknown emails, so the first
    /// such login costs the same as a wrong password.
    pub async fn warm_up(&self) -> Result<(), PasswordHasherError> {
        self.dummy_hash().await.map(|_| ())
    }

    async fn dummy_hash(&self) -> Result<&Password, PasswordHasherError> {
        self.dummy_hash
            .get_or_try_init(|| async {
                let dummy = Password::from_hash(Secret::new(DUMMY_PASSWORD.to_owned()));
                self.password_hasher
                    .hash(&dummy)
                    .await
                    .map(Password::from_hash)
            })
            .await
    }

    async fn compare_against_dummy(&self, candidate: &Secret<String>) {
        if let Ok(dummy) = self.dummy_hash().await {
            let _ = self.password_hasher.compare(dummy, candidate).await;
        }
    }
}
