use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{self, PasswordHasher as _, SaltString, rand_core},
};
use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use warden_core::{Password, PasswordHasher, PasswordHasherError};

use crate::config::HashingSettings;

/// Argon2id hashing on the blocking thread pool. Hashes are PHC strings, so
/// the parameters used to create a hash travel with it.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Argon2PasswordHasher {
    /// # Arguments
    /// * `memory_cost_kib` - Memory per hash in KiB
    /// * `iterations` - Number of passes
    /// * `parallelism` - Degree of parallelism
    pub fn new(
        memory_cost_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordHasherError> {
        let params = Params::new(memory_cost_kib, iterations, parallelism, None)
            .map_err(|e| PasswordHasherError::UnexpectedError(e.to_string()))?;
        Ok(Self { params })
    }

    pub fn from_settings(settings: &HashingSettings) -> Result<Self, PasswordHasherError> {
        Self::new(
            settings.memory_cost_kib,
            settings.iterations,
            settings.parallelism,
        )
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
    async fn hash(&self, password: &Password) -> Result<Secret<String>, PasswordHasherError> {
        let argon2 = self.argon2();
        let password = password.clone();
        let current_span: tracing::Span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let salt = SaltString::generate(rand_core::OsRng);
                argon2
                    .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                    .map(|hash| Secret::new(hash.to_string()))
                    .map_err(|e| PasswordHasherError::UnexpectedError(e.to_string()))
            })
        })
        .await
        .map_err(|e| PasswordHasherError::UnexpectedError(e.to_string()))?
    }

    #[tracing::instrument(name = "Verify password hash", skip_all)]
    async fn compare(
        &self,
        hash: &Password,
        candidate: &Secret<String>,
    ) -> Result<(), PasswordHasherError> {
        let argon2 = self.argon2();
        let expected = hash.as_ref().clone();
        let candidate = candidate.clone();
        let current_span: tracing::Span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let expected = PasswordHash::new(expected.expose_secret())
                    .map_err(|e| PasswordHasherError::UnexpectedError(e.to_string()))?;

                match argon2.verify_password(candidate.expose_secret().as_bytes(), &expected) {
                    Ok(()) => Ok(()),
                    Err(password_hash::Error::Password) => Err(PasswordHasherError::Mismatch),
                    Err(e) => Err(PasswordHasherError::UnexpectedError(e.to_string())),
                }
            })
        })
        .await
        .map_err(|e| PasswordHasherError::UnexpectedError(e.to_string()))?
    }
}
