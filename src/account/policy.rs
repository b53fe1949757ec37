//! Credential policy: pure validation of candidate passwords.

use thiserror::Error;

/// The fixed special-character set a password must draw from.
pub const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyViolation {
    #[error("Password cannot be empty")]
    Empty,
    #[error("Password must be at least 8 characters long")]
    TooShort,
    #[error("Password must contain at least one number")]
    NoDigit,
    #[error("Password must contain at least one uppercase letter")]
    NoUppercase,
    #[error("Password must contain at least one special character")]
    NoSpecial,
}

/// Check a candidate password against the rule set. Fails fast on the
/// first unmet rule; no side effects.
pub fn validate(candidate: &str) -> Result<(), PolicyViolation> {
    if candidate.is_empty() {
        return Err(PolicyViolation::Empty);
    }
    if candidate.len() < 8 {
        return Err(PolicyViolation::TooShort);
    }
    if !candidate.chars().any(|c| c.is_ascii_digit()) {
        return Err(PolicyViolation::NoDigit);
    }
    if !candidate.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(PolicyViolation::NoUppercase);
    }
    if !candidate.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        return Err(PolicyViolation::NoSpecial);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_password_passes() {
        assert!(validate("Abcdefg1!").is_ok());
        assert!(validate("P@ssw0rd").is_ok());
        assert!(validate("A1!aaaaaaaaaaaaaaaa").is_ok());
    }

    #[test]
    fn test_rules_fail_in_order() {
        assert_eq!(validate(""), Err(PolicyViolation::Empty));
        assert_eq!(validate("Ab1!"), Err(PolicyViolation::TooShort));
        assert_eq!(validate("Abcdefg!"), Err(PolicyViolation::NoDigit));
        assert_eq!(validate("abcdefg1"), Err(PolicyViolation::NoUppercase));
        assert_eq!(validate("Abcdefg1"), Err(PolicyViolation::NoSpecial));
    }

    #[test]
    fn test_length_checked_before_content() {
        // Short but otherwise rule-satisfying input reports the length rule.
        assert_eq!(validate("A1!"), Err(PolicyViolation::TooShort));
    }

    #[test]
    fn test_every_special_character_counts() {
        for c in SPECIAL_CHARS.chars() {
            let candidate = format!("Abcdefg1{}", c);
            assert!(validate(&candidate).is_ok(), "rejected special char {:?}", c);
        }
    }
}
