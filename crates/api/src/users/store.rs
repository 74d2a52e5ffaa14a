use std::collections::HashMap;

use async_trait::async_trait;
use pressroom_core::error::CoreError;
use pressroom_core::types::UserId;
use pressroom_core::users::normalize_email;
use tokio::sync::RwLock;

use super::models::User;

/// Persistence seam for user accounts.
///
/// Emails are matched case-insensitively and must be unique.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, CoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CoreError>;

    /// Insert a new account. Fails with [`CoreError::Conflict`] if the email
    /// is already registered.
    async fn insert(&self, user: User) -> Result<User, CoreError>;

    /// Replace an existing account, bumping `updated_at`. Fails with
    /// [`CoreError::NotFound`] if the id is unknown and with
    /// [`CoreError::Conflict`] if another account already holds the email.
    async fn update(&self, user: User) -> Result<User, CoreError>;

    /// Every stored account, soft-deleted ones included, oldest first.
    async fn list(&self) -> Result<Vec<User>, CoreError>;
}

/// Process-local [`UserStore`] backed by a `HashMap`.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts, including soft-deleted ones.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, CoreError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CoreError> {
        let email = normalize_email(email);
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn insert(&self, mut user: User) -> Result<User, CoreError> {
        user.email = normalize_email(&user.email);

        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(CoreError::Conflict(format!(
                "A user with email {} already exists",
                user.email
            )));
        }
        if users.contains_key(&user.id) {
            return Err(CoreError::Conflict(format!(
                "A user with id {} already exists",
                user.id
            )));
        }

        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn update(&self, mut user: User) -> Result<User, CoreError> {
        user.email = normalize_email(&user.email);

        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(CoreError::NotFound {
                entity: "User",
                id: user.id,
            });
        }
        if users
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(CoreError::Conflict(format!(
                "A user with email {} already exists",
                user.email
            )));
        }

        user.updated_at = chrono::Utc::now();
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, CoreError> {
        let mut all: Vec<User> = self.users.read().await.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn user(email: &str) -> User {
        User::new(email.to_string(), "$argon2id$placeholder".to_string())
    }

    #[tokio::test]
    async fn insert_then_find_by_id_and_email() {
        let store = InMemoryUserStore::new();
        let created = store.insert(user("Writer@Example.com")).await.unwrap();
        assert_eq!(created.email, "writer@example.com");

        let by_id = store.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "writer@example.com");

        let by_email = store.find_by_email("WRITER@example.com").await.unwrap();
        assert_eq!(by_email.map(|u| u.id), Some(created.id));
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let store = InMemoryUserStore::new();
        store.insert(user("dup@example.com")).await.unwrap();

        let result = store.insert(user("DUP@example.com")).await;
        assert_matches!(result, Err(CoreError::Conflict(_)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn update_replaces_record() {
        let store = InMemoryUserStore::new();
        let mut created = store.insert(user("flags@example.com")).await.unwrap();
        let before = created.updated_at;

        created.is_verified = true;
        let updated = store.update(created).await.unwrap();
        assert!(updated.is_verified);
        assert!(updated.updated_at >= before);

        let stored = store.find_by_id(&updated.id).await.unwrap().unwrap();
        assert!(stored.is_verified);
    }

    #[tokio::test]
    async fn update_to_taken_email_conflicts() {
        let store = InMemoryUserStore::new();
        let first = store.insert(user("a@example.com")).await.unwrap();
        let mut second = store.insert(user("b@example.com")).await.unwrap();

        second.email = "A@example.com".into();
        let result = store.update(second.clone()).await;
        assert_matches!(result, Err(CoreError::Conflict(_)));

        let stored = store.find_by_id(&second.id).await.unwrap().unwrap();
        assert_eq!(stored.email, "b@example.com");
        let owner = store.find_by_email("a@example.com").await.unwrap().unwrap();
        assert_eq!(owner.id, first.id);
    }

    #[tokio::test]
    async fn update_keeping_own_email_is_allowed() {
        let store = InMemoryUserStore::new();
        let mut created = store.insert(user("same@example.com")).await.unwrap();

        created.email = "SAME@example.com".into();
        let updated = store.update(created).await.unwrap();
        assert_eq!(updated.email, "same@example.com");
    }

    #[tokio::test]
    async fn list_returns_oldest_first() {
        let store = InMemoryUserStore::new();
        let first = store.insert(user("first@example.com")).await.unwrap();
        let second = store.insert(user("second@example.com")).await.unwrap();

        let ids: Vec<_> = store.list().await.unwrap().into_iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn update_unknown_user_is_not_found() {
        let store = InMemoryUserStore::new();
        let result = store.update(user("ghost@example.com")).await;
        assert_matches!(result, Err(CoreError::NotFound { entity: "User", .. }));
    }

    #[tokio::test]
    async fn missing_lookups_return_none() {
        let store = InMemoryUserStore::new();
        assert!(store.is_empty().await);
        assert!(store.find_by_id("nope").await.unwrap().is_none());
        assert!(store.find_by_email("nope@example.com").await.unwrap().is_none());
    }
}
