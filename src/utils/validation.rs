use crate::models::UserFields;
use lazy_static::lazy_static;
use regex::Regex;

pub const NAME_MAX_LEN: usize = 100;
pub const AGE_MIN: i64 = 1;
pub const AGE_MAX: i64 = 149;

lazy_static! {
    // something@something.something, no whitespace
    static ref EMAIL_RE: Regex = Regex::new(r"^\S+@\S+\.\S+$").unwrap();
    static ref USER_ID_RE: Regex = Regex::new(
        r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$"
    )
    .unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Every field is mandatory.
    Creating,
    /// Only supplied fields are checked.
    Patching,
}

/// Returns the first violation found. Required-field checks run before any
/// format check, then name, email and age in that order.
pub fn validate_user_fields(fields: &UserFields, mode: ValidationMode) -> Result<(), String> {
    match mode {
        ValidationMode::Creating => validate_new_user(fields).map(|_| ()),
        ValidationMode::Patching => validate_supplied_fields(fields),
    }
}

/// Creating-mode validation that hands back the mandatory values.
pub fn validate_new_user(fields: &UserFields) -> Result<(&str, &str, i64), String> {
    let name = fields.name.as_deref().ok_or_else(|| "Name is required".to_string())?;
    let email = fields.email.as_deref().ok_or_else(|| "Email is required".to_string())?;
    let age = fields.age.ok_or_else(|| "Age is required".to_string())?;

    validate_supplied_fields(fields)?;

    Ok((name, email, age))
}

fn validate_supplied_fields(fields: &UserFields) -> Result<(), String> {
    if let Some(name) = &fields.name {
        validate_name(name)?;
    }
    if let Some(email) = &fields.email {
        validate_email(email)?;
    }
    if let Some(age) = fields.age {
        validate_age(age)?;
    }

    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name cannot be empty".to_string());
    }
    if trimmed.chars().count() > NAME_MAX_LEN {
        return Err(format!("Name cannot exceed {} characters", NAME_MAX_LEN));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), String> {
    if EMAIL_RE.is_match(email.trim()) {
        Ok(())
    } else {
        Err("Please provide a valid email".to_string())
    }
}

pub fn validate_age(age: i64) -> Result<(), String> {
    if age < AGE_MIN {
        return Err(format!("Age must be at least {}", AGE_MIN));
    }
    if age > AGE_MAX {
        return Err(format!("Age must be less than {}", AGE_MAX + 1));
    }
    Ok(())
}

/// 8-4-4-4-12 hex groups, any case. Nothing else is accepted.
pub fn is_valid_user_id(id: &str) -> bool {
    USER_ID_RE.is_match(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: Option<&str>, email: Option<&str>, age: Option<i64>) -> UserFields {
        UserFields {
            name: name.map(String::from),
            email: email.map(String::from),
            age,
        }
    }

    #[test]
    fn test_creating_requires_all_fields_before_format() {
        // Bad name is present, but the missing email is reported first
        let err = validate_user_fields(&fields(Some("   "), None, Some(0)), ValidationMode::Creating);
        assert_eq!(err, Err("Email is required".to_string()));

        let err = validate_user_fields(&fields(None, None, None), ValidationMode::Creating);
        assert_eq!(err, Err("Name is required".to_string()));

        let err = validate_user_fields(&fields(Some("Ann"), Some("a@b.co"), None), ValidationMode::Creating);
        assert_eq!(err, Err("Age is required".to_string()));
    }

    #[test]
    fn test_format_checks_in_order() {
        let err = validate_user_fields(&fields(Some(""), Some("bad"), Some(0)), ValidationMode::Patching);
        assert_eq!(err, Err("Name cannot be empty".to_string()));

        let err = validate_user_fields(&fields(Some("Ann"), Some("bad"), Some(0)), ValidationMode::Patching);
        assert_eq!(err, Err("Please provide a valid email".to_string()));

        let err = validate_user_fields(&fields(Some("Ann"), Some("a@b.co"), Some(0)), ValidationMode::Patching);
        assert_eq!(err, Err("Age must be at least 1".to_string()));
    }

    #[test]
    fn test_new_user_returns_required_values() {
        let input = fields(Some(" Ann "), Some("Ann@B.co"), Some(7));
        assert_eq!(validate_new_user(&input), Ok((" Ann ", "Ann@B.co", 7)));
        assert_eq!(
            validate_new_user(&fields(Some("Ann"), Some("a@b.co"), Some(150))),
            Err("Age must be less than 150".to_string())
        );
    }

    #[test]
    fn test_patching_accepts_empty_set() {
        assert!(validate_user_fields(&UserFields::default(), ValidationMode::Patching).is_ok());
        assert!(validate_user_fields(&fields(None, None, Some(30)), ValidationMode::Patching).is_ok());
    }

    #[test]
    fn test_age_boundaries() {
        assert!(validate_age(1).is_ok());
        assert!(validate_age(149).is_ok());
        assert!(validate_age(0).is_err());
        assert_eq!(validate_age(150), Err("Age must be less than 150".to_string()));
        assert!(validate_age(-5).is_err());
    }

    #[test]
    fn test_name_boundaries() {
        assert!(validate_name(&"a".repeat(100)).is_ok());
        assert!(validate_name(&"a".repeat(101)).is_err());
        // Surrounding whitespace does not count towards the limit
        assert!(validate_name(&format!("  {}  ", "a".repeat(100))).is_ok());
        assert!(validate_name(" \t\n ").is_err());
        assert!(validate_name(&"é".repeat(100)).is_ok());
    }

    #[test]
    fn test_email_shape() {
        assert!(validate_email("john@example.com").is_ok());
        assert!(validate_email("John.Doe+tag@mail.example.co.uk").is_ok());
        assert!(validate_email("a@b.c").is_ok());
        assert!(validate_email("plainaddress").is_err());
        assert!(validate_email("john@example").is_err());
        assert!(validate_email("john doe@example.com").is_err());
        assert!(validate_email("@example.com").is_err());
    }

    #[test]
    fn test_user_id_shape() {
        assert!(is_valid_user_id("550e8400-e29b-41d4-a716-446655440000"));
        assert!(is_valid_user_id("550E8400-E29B-41D4-A716-446655440000"));
        assert!(!is_valid_user_id("550e8400e29b41d4a716446655440000"));
        assert!(!is_valid_user_id("{550e8400-e29b-41d4-a716-446655440000}"));
        assert!(!is_valid_user_id("550e8400-e29b-41d4-a716-44665544000g"));
        assert!(!is_valid_user_id("507f1f77bcf86cd799439011"));
        assert!(!is_valid_user_id(""));
    }
}
