//! Request body validation

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Compile-time constant pattern
    Regex::new(r"^[^@\s]+@[^@\s]+$").expect("Invalid email regex - this is a bug in the codebase")
});

/// Checks a deserialized request body before it reaches a handler
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Field checks used by the `Validate` impls. The first violation wins.
pub struct Check<'a> {
    field: &'a str,
    value: &'a str,
}

pub fn field<'a>(field: &'a str, value: &'a str) -> Check<'a> {
    Check { field, value }
}

impl Check<'_> {
    fn fail(&self, reason: &str) -> Error {
        Error::BadRequest(format!("{}: {}", self.field, reason))
    }

    pub fn not_blank(self) -> Result<Self> {
        if self.value.trim().is_empty() {
            return Err(self.fail("must not be blank"));
        }
        Ok(self)
    }

    pub fn max(self, max: usize) -> Result<Self> {
        if self.value.chars().count() > max {
            return Err(self.fail(&format!("size must be at most {}", max)));
        }
        Ok(self)
    }

    pub fn between(self, min: usize, max: usize) -> Result<Self> {
        let len = self.value.chars().count();
        if len < min || len > max {
            return Err(self.fail(&format!("size must be between {} and {}", min, max)));
        }
        Ok(self)
    }

    /// Empty values pass; pair with `not_blank` when required
    pub fn email(self) -> Result<Self> {
        if !self.value.is_empty() && !EMAIL_RE.is_match(self.value) {
            return Err(self.fail("must be a well-formed email address"));
        }
        Ok(self)
    }
}

pub fn required<T>(name: &str, value: &Option<T>) -> Result<()> {
    if value.is_none() {
        return Err(Error::BadRequest(format!("{}: must not be null", name)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_blank() {
        assert!(field("name", "yoga").not_blank().is_ok());
        assert!(field("name", "   ").not_blank().is_err());
    }

    #[test]
    fn test_between_counts_chars() {
        assert!(field("firstName", "Hél").between(3, 20).is_ok());
        assert!(field("firstName", "Te").between(3, 20).is_err());
        assert!(field("firstName", "Teststoolongfirstname").between(3, 20).is_err());
    }

    #[test]
    fn test_email() {
        assert!(field("email", "test@example.com").email().is_ok());
        assert!(field("email", "test").email().is_err());
        assert!(field("email", "a b@example.com").email().is_err());
    }

    #[test]
    fn test_message_names_field() {
        let err = field("password", "").not_blank().err().unwrap();
        assert_eq!(err.to_string(), "password: must not be blank");
    }

    #[test]
    fn test_required() {
        assert!(required("date", &Some(1)).is_ok());
        assert!(required::<i64>("teacher_id", &None).is_err());
    }
}
