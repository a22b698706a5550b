use super::{UserFilter, UserStore};
use crate::{database::MongoDB, models::User, utils::error::StoreError};
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::Collection;

const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Clone)]
pub struct MongoUserStore {
    db: MongoDB,
    collection: Collection<User>,
}

impl MongoUserStore {
    pub fn new(db: MongoDB, collection_name: &str) -> Self {
        let collection = db.collection::<User>(collection_name);
        Self { db, collection }
    }
}

fn to_document(filter: &UserFilter) -> Document {
    match filter {
        UserFilter::ById(id) => doc! { "id": id },
        UserFilter::ByEmail(email) => doc! { "email": email },
        UserFilter::ByEmailExcluding { email, id } => doc! { "email": email, "id": { "$ne": id } },
    }
}

fn map_error(e: mongodb::error::Error) -> StoreError {
    if let ErrorKind::Write(WriteFailure::WriteError(write_error)) = e.kind.as_ref() {
        if write_error.code == DUPLICATE_KEY_CODE {
            return StoreError::DuplicateKey(write_error.message.clone());
        }
    }
    StoreError::Backend(e.to_string())
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn find_one(&self, filter: UserFilter) -> Result<Option<User>, StoreError> {
        self.collection
            .find_one(to_document(&filter))
            .await
            .map_err(map_error)
    }

    async fn insert(&self, user: User) -> Result<User, StoreError> {
        self.collection.insert_one(&user).await.map_err(map_error)?;
        Ok(user)
    }

    async fn update_in_place(&self, user: User) -> Result<User, StoreError> {
        let result = self
            .collection
            .replace_one(doc! { "id": &user.id }, &user)
            .await
            .map_err(map_error)?;

        if result.matched_count == 0 {
            return Err(StoreError::Backend(format!(
                "user {} disappeared before update",
                user.id
            )));
        }

        Ok(user)
    }

    async fn find_and_delete(&self, filter: UserFilter) -> Result<Option<User>, StoreError> {
        self.collection
            .find_one_and_delete(to_document(&filter))
            .await
            .map_err(map_error)
    }

    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        let cursor = self.collection.find(doc! {}).await.map_err(map_error)?;
        cursor.try_collect().await.map_err(map_error)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.db.ping().await.map_err(map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_filter_documents() {
        assert_eq!(to_document(&UserFilter::ById("abc".into())), doc! { "id": "abc" });
        assert_eq!(
            to_document(&UserFilter::ByEmailExcluding {
                email: "a@b.co".into(),
                id: "abc".into()
            }),
            doc! { "email": "a@b.co", "id": { "$ne": "abc" } }
        );
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_unique_email_backstop() {
        dotenv::dotenv().ok();
        let config = AppConfig::from_env().unwrap();
        let db = MongoDB::connect(&config).await.unwrap();
        let store = MongoUserStore::new(db, &config.users_collection);

        let first = User::new("Ann", "backstop@example.com", 30);
        let second = User::new("Bob", "backstop@example.com", 31);

        store.insert(first.clone()).await.unwrap();
        let result = store.insert(second).await;
        store.find_and_delete(UserFilter::ById(first.id)).await.unwrap();

        assert!(matches!(result, Err(StoreError::DuplicateKey(_))));
    }
}
