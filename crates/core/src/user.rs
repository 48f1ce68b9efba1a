//! User record and field validation.
//!
//! The store owns user records; this module only describes their shape and
//! the constraints a write must satisfy before it reaches the store.

use serde::{Deserialize, Serialize};

use crate::{DomainError, DomainResult, Entity, UserId};

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 100;
pub const AGE_MIN: i32 = 0;
pub const AGE_MAX: i32 = 130;

/// A persisted user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub age: i32,
}

impl User {
    /// Attach a store-assigned id to validated input.
    pub fn from_input(id: UserId, input: UserInput) -> Self {
        Self {
            id,
            name: input.name,
            email: input.email,
            age: input.age,
        }
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> UserId {
        self.id
    }
}

/// The client-writable fields of a user (create and full replace).
///
/// An `id` in the incoming body is ignored: ids come from the store on create
/// and from the path on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInput {
    pub name: String,
    pub email: String,
    pub age: i32,
}

impl UserInput {
    pub fn new(name: impl Into<String>, email: impl Into<String>, age: i32) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            age,
        }
    }

    /// Check every field constraint, reporting all violations at once.
    pub fn validate(&self) -> DomainResult<()> {
        let mut violations = Vec::new();

        let name_len = self.name.chars().count();
        if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&name_len) {
            violations.push(format!(
                "name must be between {NAME_MIN_CHARS} and {NAME_MAX_CHARS} characters (got {name_len})"
            ));
        }

        if !is_valid_email(&self.email) {
            violations.push("email must be a valid email address".to_string());
        }

        if !(AGE_MIN..=AGE_MAX).contains(&self.age) {
            violations.push(format!(
                "age must be between {AGE_MIN} and {AGE_MAX} (got {})",
                self.age
            ));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(DomainError::validation(violations.join("; ")))
        }
    }
}

/// Syntactic email check: `local@domain` with a dotted domain.
///
/// Deliberately structural; deliverability is not our concern.
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.len() > 254 || email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };

    if local.is_empty() || local.len() > 64 || local.contains('@') {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_alphanumeric() || c == '-')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, email: &str, age: i32) -> UserInput {
        UserInput::new(name, email, age)
    }

    #[test]
    fn accepts_valid_input() {
        assert!(input("Al", "al@x.com", 30).validate().is_ok());
        assert!(input(&"a".repeat(100), "first.last@sub.example.org", 0).validate().is_ok());
        assert!(input("Zoë", "z@example.io", 130).validate().is_ok());
    }

    #[test]
    fn rejects_one_char_name() {
        let err = input("A", "a@x.com", 30).validate().unwrap_err();
        let DomainError::Validation(msg) = err else {
            panic!("expected validation error");
        };
        assert!(msg.contains("name"));
    }

    #[test]
    fn rejects_overlong_name() {
        assert!(input(&"a".repeat(101), "a@x.com", 30).validate().is_err());
    }

    #[test]
    fn name_length_counts_characters_not_bytes() {
        // Two characters, four bytes.
        assert!(input("éé", "a@x.com", 30).validate().is_ok());
    }

    #[test]
    fn rejects_age_out_of_range() {
        assert!(input("Al", "al@x.com", -1).validate().is_err());
        assert!(input("Al", "al@x.com", 131).validate().is_err());
    }

    #[test]
    fn reports_all_violations() {
        let err = input("A", "nope", 200).validate().unwrap_err();
        let DomainError::Validation(msg) = err else {
            panic!("expected validation error");
        };
        assert!(msg.contains("name"));
        assert!(msg.contains("email"));
        assert!(msg.contains("age"));
    }

    #[test]
    fn email_syntax() {
        for ok in ["al@x.com", "a.b+tag@mail.example.co", "x_y@a-b.io"] {
            assert!(is_valid_email(ok), "{ok} should be valid");
        }
        for bad in [
            "",
            "plain",
            "@x.com",
            "al@",
            "al@x",
            "al@@x.com",
            "al@x..com",
            "al @x.com",
            ".al@x.com",
            "al@-x.com",
        ] {
            assert!(!is_valid_email(bad), "{bad} should be invalid");
        }
    }

    #[test]
    fn input_ignores_id_in_body() {
        let body = r#"{"id": 99, "name": "Al", "email": "al@x.com", "age": 30}"#;
        let parsed: UserInput = serde_json::from_str(body).unwrap();
        assert_eq!(parsed, input("Al", "al@x.com", 30));
    }
}
