use super::{UserFilter, UserStore};
use crate::{models::User, utils::error::StoreError};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Insertion-ordered store for tests and local runs without MongoDB.
/// Uniqueness of `id` and `email` is checked under the write lock, so it
/// gives the same backstop as the MongoDB unique indexes.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_one(&self, filter: UserFilter) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| filter.matches(u)).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.id == user.id) {
            return Err(StoreError::DuplicateKey(format!("id {}", user.id)));
        }
        if users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::DuplicateKey(format!("email {}", user.email)));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn update_in_place(&self, user: User) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email && u.id != user.id) {
            return Err(StoreError::DuplicateKey(format!("email {}", user.email)));
        }
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(slot) => {
                *slot = user.clone();
                Ok(user)
            }
            None => Err(StoreError::Backend(format!(
                "user {} disappeared before update",
                user.id
            ))),
        }
    }

    async fn find_and_delete(&self, filter: UserFilter) -> Result<Option<User>, StoreError> {
        let mut users = self.users.write().await;
        Ok(users
            .iter()
            .position(|u| filter.matches(u))
            .map(|idx| users.remove(idx)))
    }

    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.read().await.clone())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_rejects_duplicate_email() {
        let store = InMemoryUserStore::new();
        store.insert(User::new("Ann", "ann@example.com", 30)).await.unwrap();

        let result = store.insert(User::new("Other", "ann@example.com", 50)).await;
        assert!(matches!(result, Err(StoreError::DuplicateKey(_))));
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_rejects_email_held_by_other_record() {
        let store = InMemoryUserStore::new();
        let ann = store.insert(User::new("Ann", "ann@example.com", 30)).await.unwrap();
        store.insert(User::new("Bob", "bob@example.com", 31)).await.unwrap();

        let mut changed = ann.clone();
        changed.email = "bob@example.com".to_string();
        let result = store.update_in_place(changed).await;
        assert!(matches!(result, Err(StoreError::DuplicateKey(_))));

        // Keeping its own email is not a conflict
        let mut renamed = ann.clone();
        renamed.name = "Annie".to_string();
        let saved = store.update_in_place(renamed).await.unwrap();
        assert_eq!(saved.name, "Annie");
    }

    #[tokio::test]
    async fn test_find_all_keeps_insertion_order() {
        let store = InMemoryUserStore::new();
        let a = store.insert(User::new("A", "a@example.com", 1)).await.unwrap();
        let b = store.insert(User::new("B", "b@example.com", 2)).await.unwrap();
        let c = store.insert(User::new("C", "c@example.com", 3)).await.unwrap();

        let ids: Vec<String> = store.find_all().await.unwrap().into_iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![a.id, b.id, c.id]);
    }

    #[tokio::test]
    async fn test_find_and_delete_removes_once() {
        let store = InMemoryUserStore::new();
        let ann = store.insert(User::new("Ann", "ann@example.com", 30)).await.unwrap();

        let removed = store.find_and_delete(UserFilter::ById(ann.id.clone())).await.unwrap();
        assert_eq!(removed, Some(ann.clone()));
        assert_eq!(store.find_and_delete(UserFilter::ById(ann.id)).await.unwrap(), None);
    }
}
