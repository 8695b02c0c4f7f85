use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use warden_core::{Email, PageRequest, User, UserId, UserStore, UserStoreError};

#[derive(Default)]
struct Users {
    by_id: HashMap<UserId, User>,
    id_by_email: HashMap<Email, UserId>,
}

/// In-process user store. Uniqueness of emails is checked and claimed under
/// the same write lock.
#[derive(Default, Clone)]
pub struct HashMapUserStore {
    users: Arc<RwLock<Users>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    async fn create(&self, user: &User) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        if users.id_by_email.contains_key(user.email()) || users.by_id.contains_key(user.id()) {
            return Err(UserStoreError::UserAlreadyExists);
        }
        users.id_by_email.insert(user.email().clone(), *user.id());
        users.by_id.insert(*user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .by_id
            .get(id)
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn find_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .id_by_email
            .get(email)
            .and_then(|id| users.by_id.get(id))
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn update(&self, user: &User) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let previous_email = users
            .by_id
            .get(user.id())
            .map(|existing| existing.email().clone())
            .ok_or(UserStoreError::UserNotFound)?;

        if &previous_email != user.email() {
            if users.id_by_email.contains_key(user.email()) {
                return Err(UserStoreError::UserAlreadyExists);
            }
            users.id_by_email.remove(&previous_email);
            users.id_by_email.insert(user.email().clone(), *user.id());
        }

        users.by_id.insert(*user.id(), user.clone());
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let user = users.by_id.remove(id).ok_or(UserStoreError::UserNotFound)?;
        users.id_by_email.remove(user.email());
        Ok(())
    }

    async fn exists_by_email(&self, email: &Email) -> Result<bool, UserStoreError> {
        let users = self.users.read().await;
        Ok(users.id_by_email.contains_key(email))
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<User>, UserStoreError> {
        let users = self.users.read().await;
        let mut all: Vec<&User> = users.by_id.values().collect();
        all.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit()).unwrap_or(0);

        Ok(all.into_iter().skip(offset).take(limit).cloned().collect())
    }

    async fn count(&self) -> Result<i64, UserStoreError> {
        let users = self.users.read().await;
        i64::try_from(users.by_id.len()).map_err(|e| UserStoreError::UnexpectedError(e.to_string()))
    }
}
