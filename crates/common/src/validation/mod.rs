//! Domain validation helpers
//!
//! Input checks performed at the component boundary, before any write
//! reaches the database.

use crate::errors::{AppError, Result};
use regex_lite::Regex;
use std::sync::OnceLock;

/// Inclusive bounds for a review score.
pub const SCORE_MIN: i16 = 1;
pub const SCORE_MAX: i16 = 10;

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        // Local part, one @, domain with at least one dot. Intentionally
        // permissive; the mailbox is only used for correspondence.
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid")
    })
}

/// Validate an applicant email address.
pub fn validate_email(address: &str) -> Result<()> {
    if email_regex().is_match(address) {
        Ok(())
    } else {
        Err(AppError::InvalidEmail {
            address: address.to_string(),
        })
    }
}

/// Validate an optional review score against the inclusive [1, 10] range.
pub fn validate_score(score: Option<i16>) -> Result<()> {
    match score {
        Some(s) if !(SCORE_MIN..=SCORE_MAX).contains(&s) => {
            Err(AppError::ScoreOutOfRange { score: s })
        }
        _ => Ok(()),
    }
}

/// Validate that a question order is a positive integer.
pub fn validate_question_order(order: i32) -> Result<()> {
    if order >= 1 {
        Ok(())
    } else {
        Err(AppError::InvalidQuestionOrder { order })
    }
}

/// Validate that a required text field is non-blank.
pub fn validate_required_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(AppError::Validation {
            message: format!("{field} must not be blank"),
            field: Some(field.to_string()),
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_addresses() {
        assert!(validate_email("jane@example.com").is_ok());
        assert!(validate_email("jane.doe+tag@mail.example.co.uk").is_ok());
    }

    #[test]
    fn test_rejects_malformed_addresses() {
        for bad in ["", "jane", "jane@", "@example.com", "jane@example", "ja ne@example.com", "jane@@example.com"] {
            assert!(validate_email(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_score_bounds_are_inclusive() {
        assert!(validate_score(Some(1)).is_ok());
        assert!(validate_score(Some(10)).is_ok());
        assert!(validate_score(Some(7)).is_ok());
        assert!(validate_score(None).is_ok());
    }

    #[test]
    fn test_score_out_of_range_rejected() {
        for bad in [0, -3, 11, 100] {
            let err = validate_score(Some(bad)).unwrap_err();
            assert!(matches!(err, AppError::ScoreOutOfRange { score } if score == bad));
        }
    }

    #[test]
    fn test_question_order_must_be_positive() {
        assert!(validate_question_order(1).is_ok());
        assert!(validate_question_order(42).is_ok());
        assert!(validate_question_order(0).is_err());
        assert!(validate_question_order(-1).is_err());
    }

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("title", "Eng Role").is_ok());
        let err = validate_required_text("title", "   ").unwrap_err();
        assert!(matches!(err, AppError::Validation { field: Some(f), .. } if f == "title"));
    }
}
