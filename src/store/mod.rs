// ==================== USER STORE ====================
// Narrow document-store interface consumed by the user service.

pub mod memory;
pub mod mongo;

pub use memory::InMemoryUserStore;
pub use mongo::MongoUserStore;

use crate::{models::User, utils::error::StoreError};
use async_trait::async_trait;

/// Lookup predicates the service needs. Ids and emails are expected to be
/// normalized (lowercase) by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserFilter {
    ById(String),
    ByEmail(String),
    /// Same email held by any record other than `id`.
    ByEmailExcluding { email: String, id: String },
}

impl UserFilter {
    pub fn matches(&self, user: &User) -> bool {
        match self {
            UserFilter::ById(id) => &user.id == id,
            UserFilter::ByEmail(email) => &user.email == email,
            UserFilter::ByEmailExcluding { email, id } => &user.email == email && &user.id != id,
        }
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_one(&self, filter: UserFilter) -> Result<Option<User>, StoreError>;

    /// Must reject a record whose `id` or `email` is already taken with
    /// `StoreError::DuplicateKey`.
    async fn insert(&self, user: User) -> Result<User, StoreError>;

    /// Replaces the record with the same `id` as a single write. Same
    /// uniqueness rules as `insert`.
    async fn update_in_place(&self, user: User) -> Result<User, StoreError>;

    async fn find_and_delete(&self, filter: UserFilter) -> Result<Option<User>, StoreError>;

    /// Every record, in storage order.
    async fn find_all(&self) -> Result<Vec<User>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}
