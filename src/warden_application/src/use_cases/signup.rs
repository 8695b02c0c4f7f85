use secrecy::Secret;
use warden_core::{
    DomainError, Email, Password, PasswordHasher, TokenIssuer, User, UserStore, UserStoreError,
};

use super::{AuthResponse, EMAIL_IN_USE, INVALID_EMAIL_FORMAT, issue_token_pair};
use crate::error::AuthError;

#[derive(Debug, Clone)]
pub struct SignupRequest {
    pub email: String,
    pub password: Secret<String>,
}

/// Signup use case - registers a new account and logs it in
pub struct SignupUseCase<U, H, T>
where
    U: UserStore,
    H: PasswordHasher,
    T: TokenIssuer,
{
    user_store: U,
    password_hasher: H,
    token_issuer: T,
}

impl<U, H, T> SignupUseCase<U, H, T>
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
        }
    }

    /// Execute the signup use case
    ///
    /// # Arguments
    /// * `request` - Raw email and plaintext password
    ///
    /// # Returns
    /// The new user's id and email together with a fresh token pair
    #[tracing::instrument(name = "SignupUseCase::execute", skip(self, request))]
    pub async fn execute(&self, request: SignupRequest) -> Result<AuthResponse, AuthError> {
        let email = Email::parse(&request.email).map_err(|e| {
            DomainError::invalid_input(INVALID_EMAIL_FORMAT)
                .with_field("email")
                .with_source(e)
        })?;

        let password = Password::try_from(request.password).map_err(|e| {
            DomainError::invalid_input(e.to_string())
                .with_field("password")
                .with_source(e)
        })?;

        if self.user_store.exists_by_email(&email).await? {
            return Err(DomainError::conflict(EMAIL_IN_USE).into());
        }

        let hash = self.password_hasher.hash(&password).await?;
        let user = User::new(email, Password::from_hash(hash))?;

        // The existence check above can race with a concurrent signup.
        match self.user_store.create(&user).await {
            Ok(()) => {}
            Err(UserStoreError::UserAlreadyExists) => {
                return Err(DomainError::conflict(EMAIL_IN_USE).into());
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!(user_id = %user.id(), "user registered");

        let tokens = issue_token_pair(&self.token_issuer, &user)
            .await
            .map_err(|e| {
                tracing::error!(
                    user_id = %user.id(),
                    error = %e,
                    "account created but token issuance failed, user must log in separately"
                );
                e
            })?;

        Ok(AuthResponse::new(&user, tokens))
    }
}
