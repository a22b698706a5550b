// ==================== USER SERVICE ====================
// Duplicate-email checks, lookups and merge-and-persist for user records.
// The store's unique constraints are the real guarantee; the checks here
// only turn the common case into a clean conflict before writing.

use crate::{
    models::{normalize_email, User, UserFields},
    store::{UserFilter, UserStore},
    utils::{
        error::{AppError, DUPLICATE_EMAIL_MESSAGE},
        validation::{is_valid_user_id, validate_new_user, validate_user_fields, ValidationMode},
    },
};
use std::sync::Arc;

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, fields: UserFields) -> Result<User, AppError> {
        let (name, email, age) = validate_new_user(&fields).map_err(AppError::Validation)?;

        let email = normalize_email(email);
        self.ensure_email_free(UserFilter::ByEmail(email.clone())).await?;

        let user = self.store.insert(User::new(name, &email, age)).await?;

        log::info!("✅ User created: {} ({})", user.id, user.email);
        Ok(user)
    }

    pub async fn list_all(&self) -> Result<Vec<User>, AppError> {
        Ok(self.store.find_all().await?)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<User, AppError> {
        let id = parse_id(id)?;
        self.find_existing(id).await
    }

    /// Full replace. Shares the partial validation path, so absent fields are
    /// kept rather than rejected.
    pub async fn replace_by_id(&self, id: &str, fields: UserFields) -> Result<User, AppError> {
        self.merge_and_save(id, fields).await
    }

    /// Partial update: any subset of fields, including none.
    pub async fn patch_by_id(&self, id: &str, fields: UserFields) -> Result<User, AppError> {
        self.merge_and_save(id, fields).await
    }

    pub async fn delete_by_id(&self, id: &str) -> Result<(), AppError> {
        let id = parse_id(id)?;
        match self.store.find_and_delete(UserFilter::ById(id)).await? {
            Some(user) => {
                log::info!("🗑️  User deleted: {}", user.id);
                Ok(())
            }
            None => Err(AppError::NotFound),
        }
    }

    async fn merge_and_save(&self, id: &str, fields: UserFields) -> Result<User, AppError> {
        let id = parse_id(id)?;
        let current = self.find_existing(id).await?;

        validate_user_fields(&fields, ValidationMode::Patching).map_err(AppError::Validation)?;

        if let Some(email) = &fields.email {
            let email = normalize_email(email);
            if email != current.email {
                self.ensure_email_free(UserFilter::ByEmailExcluding {
                    email,
                    id: current.id.clone(),
                })
                .await?;
            }
        }

        // One write carries every field change plus the timestamp
        let updated = self.store.update_in_place(current.merged_with(&fields)).await?;

        log::info!("✅ User updated: {}", updated.id);
        Ok(updated)
    }

    async fn find_existing(&self, id: String) -> Result<User, AppError> {
        self.store
            .find_one(UserFilter::ById(id))
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn ensure_email_free(&self, filter: UserFilter) -> Result<(), AppError> {
        if self.store.find_one(filter).await?.is_some() {
            return Err(AppError::Conflict(DUPLICATE_EMAIL_MESSAGE.to_string()));
        }
        Ok(())
    }

    pub async fn is_store_reachable(&self) -> bool {
        match self.store.ping().await {
            Ok(()) => true,
            Err(e) => {
                log::warn!("⚠️  User store unreachable: {}", e);
                false
            }
        }
    }
}

/// Checks the identifier shape before any storage access and returns the
/// lowercase form ids are stored in.
fn parse_id(id: &str) -> Result<String, AppError> {
    if is_valid_user_id(id) {
        Ok(id.to_lowercase())
    } else {
        Err(AppError::MalformedId)
    }
}
