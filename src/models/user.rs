use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stored user record. The same shape is persisted and returned to callers;
/// MongoDB's own `_id` is ignored on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Lowercase 8-4-4-4-12 hex identifier, generated at creation
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Candidate fields for create, replace and patch requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct UserFields {
    #[schema(example = "John Doe")]
    pub name: Option<String>,
    #[schema(example = "john@example.com")]
    pub email: Option<String>,
    #[schema(example = 25)]
    pub age: Option<i64>,
}

pub fn normalize_name(name: &str) -> String {
    name.trim().to_string()
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Next `updatedAt` value: the current time, bumped past `previous` when the
/// clock has not moved forward.
pub fn next_update_time(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

impl User {
    /// Builds a fresh record from already-validated fields.
    pub fn new(name: &str, email: &str, age: i64) -> Self {
        let now = Utc::now();
        User {
            id: uuid::Uuid::new_v4().to_string(),
            name: normalize_name(name),
            email: normalize_email(email),
            age,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies every supplied field and refreshes `updatedAt`.
    pub fn merged_with(&self, fields: &UserFields) -> User {
        let mut updated = self.clone();
        if let Some(name) = &fields.name {
            updated.name = normalize_name(name);
        }
        if let Some(email) = &fields.email {
            updated.email = normalize_email(email);
        }
        if let Some(age) = fields.age {
            updated.age = age;
        }
        updated.updated_at = next_update_time(self.updated_at);
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_normalizes_fields() {
        let user = User::new("  John Doe ", " John@Example.COM", 25);
        assert_eq!(user.name, "John Doe");
        assert_eq!(user.email, "john@example.com");
        assert_eq!(user.created_at, user.updated_at);
        assert!(crate::utils::validation::is_valid_user_id(&user.id));
        assert_eq!(user.id, user.id.to_lowercase());
    }

    #[test]
    fn test_merge_with_empty_fields_only_touches_updated_at() {
        let user = User::new("Ann", "ann@example.com", 40);
        let merged = user.merged_with(&UserFields::default());
        assert_eq!(merged.id, user.id);
        assert_eq!(merged.name, user.name);
        assert_eq!(merged.email, user.email);
        assert_eq!(merged.age, user.age);
        assert_eq!(merged.created_at, user.created_at);
        assert!(merged.updated_at > user.updated_at);
    }

    #[test]
    fn test_next_update_time_is_strictly_later() {
        let future = Utc::now() + Duration::hours(1);
        assert!(next_update_time(future) > future);
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(User::new("Ann", "ann@example.com", 40)).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("created_at").is_none());
    }
}
