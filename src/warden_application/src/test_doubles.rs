//! Hand-rolled port implementations shared by the use case tests.

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;
use warden_core::{
    Email, IssuedClaims, PageRequest, Password, PasswordHasher, PasswordHasherError, TokenIssuer,
    TokenIssuerError, User, UserId, UserStore, UserStoreError,
};

#[derive(Default, Clone)]
pub struct MockUserStore {
    users: Arc<RwLock<HashMap<UserId, User>>>,
    pub create_calls: Arc<AtomicUsize>,
    pub fail_lookups: Arc<AtomicBool>,
    /// Makes `exists_by_email` miss rows that `create` still sees, as when a
    /// concurrent signup lands between the two calls.
    pub stale_existence_check: Arc<AtomicBool>,
}

impl MockUserStore {
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(*user.id(), user);
    }

    pub async fn get(&self, email: &str) -> Option<User> {
        self.users
            .read()
            .await
            .values()
            .find(|u| u.email().as_str() == email)
            .cloned()
    }

    fn check_available(&self) -> Result<(), UserStoreError> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(UserStoreError::UnexpectedError("store offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MockUserStore {
    async fn create(&self, user: &User) -> Result<(), UserStoreError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email() == user.email()) {
            return Err(UserStoreError::UserAlreadyExists);
        }
        users.insert(*user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<User, UserStoreError> {
        self.check_available()?;
        self.users
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn find_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        self.check_available()?;
        self.users
            .read()
            .await
            .values()
            .find(|u| u.email() == email)
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn update(&self, _user: &User) -> Result<(), UserStoreError> {
        unimplemented!()
    }

    async fn delete(&self, _id: &UserId) -> Result<(), UserStoreError> {
        unimplemented!()
    }

    async fn exists_by_email(&self, email: &Email) -> Result<bool, UserStoreError> {
        self.check_available()?;
        if self.stale_existence_check.load(Ordering::SeqCst) {
            return Ok(false);
        }
        Ok(self.users.read().await.values().any(|u| u.email() == email))
    }

    async fn list(&self, _page: PageRequest) -> Result<Vec<User>, UserStoreError> {
        unimplemented!()
    }

    async fn count(&self) -> Result<i64, UserStoreError> {
        unimplemented!()
    }
}

/// Prefixes the plaintext instead of hashing it.
#[derive(Default, Clone)]
pub struct MockPasswordHasher {
    pub hash_calls: Arc<AtomicUsize>,
    pub compare_calls: Arc<AtomicUsize>,
    pub fail_compare: Arc<AtomicBool>,
}

impl MockPasswordHasher {
    pub fn hash_of(plaintext: &str) -> Password {
        Password::from_hash(Secret::new(format!("hashed:{plaintext}")))
    }
}

#[async_trait]
impl PasswordHasher for MockPasswordHasher {
    async fn hash(&self, password: &Password) -> Result<Secret<String>, PasswordHasherError> {
        self.hash_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Secret::new(format!(
            "hashed:{}",
            password.as_ref().expose_secret()
        )))
    }

    async fn compare(
        &self,
        hash: &Password,
        candidate: &Secret<String>,
    ) -> Result<(), PasswordHasherError> {
        self.compare_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_compare.load(Ordering::SeqCst) {
            return Err(PasswordHasherError::UnexpectedError("worker pool gone".into()));
        }
        let expected = format!("hashed:{}", candidate.expose_secret());
        if hash.as_ref().expose_secret() == &expected {
            Ok(())
        } else {
            Err(PasswordHasherError::Mismatch)
        }
    }
}

/// Issues readable `kind|user_id|email|serial` tokens.
#[derive(Default, Clone)]
pub struct MockTokenIssuer {
    serial: Arc<AtomicUsize>,
    pub fail_generation: Arc<AtomicBool>,
}

impl MockTokenIssuer {
    fn mint(&self, kind: &str, user_id: &UserId, email: &str) -> Result<String, TokenIssuerError> {
        if self.fail_generation.load(Ordering::SeqCst) {
            return Err(TokenIssuerError::UnexpectedError("signing key missing".into()));
        }
        let serial = self.serial.fetch_add(1, Ordering::SeqCst);
        Ok(format!("{kind}|{user_id}|{email}|{serial}"))
    }
}

#[async_trait]
impl TokenIssuer for MockTokenIssuer {
    async fn generate_access_token(
        &self,
        user_id: &UserId,
        email: &Email,
    ) -> Result<String, TokenIssuerError> {
        self.mint("access", user_id, email.as_str())
    }

    async fn generate_refresh_token(&self, user_id: &UserId) -> Result<String, TokenIssuerError> {
        self.mint("refresh", user_id, "")
    }

    async fn validate_token(&self, token: &str) -> Result<IssuedClaims, TokenIssuerError> {
        let parts: Vec<&str> = token.split('|').collect();
        match parts.as_slice() {
            ["access" | "refresh", user_id, email, _serial] => Ok(IssuedClaims {
                user_id: (*user_id).to_owned(),
                email: (!email.is_empty()).then(|| (*email).to_owned()),
            }),
            _ => Err(TokenIssuerError::InvalidToken("malformed".into())),
        }
    }
}

pub fn secret(raw: &str) -> Secret<String> {
    Secret::new(raw.to_owned())
}
