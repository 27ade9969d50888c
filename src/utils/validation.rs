//! Input validation utilities

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::{self, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};

/// A class letter is exactly one alphabetic character ("A", "b", "É")
pub static CLASS_LETTER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\p{L}$").expect("valid class letter regex"));

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    let length = password.chars().count() as u64;
    if length < MIN_PASSWORD_LENGTH {
        return Err("Password must be at least 8 characters");
    }
    if length > MAX_PASSWORD_LENGTH {
        return Err("Password must be at most 128 characters");
    }
    if !password.chars().any(|c| c.is_lowercase()) {
        return Err("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        return Err("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_numeric()) {
        return Err("Password must contain at least one number");
    }
    if password.chars().all(|c| c.is_alphanumeric()) {
        return Err("Password must contain at least one symbol");
    }
    Ok(())
}

/// Validate user role
pub fn validate_role(role: &str) -> Result<(), &'static str> {
    if constants::roles::ALL.contains(&role) {
        Ok(())
    } else {
        Err("Invalid role")
    }
}

/// Validate a class letter. It is stored uppercased, so letters whose
/// uppercase form is longer than one character ("ß") are rejected.
pub fn validate_class_letter(letter: &str) -> Result<(), &'static str> {
    if CLASS_LETTER_REGEX.is_match(letter) && letter.to_uppercase().chars().count() == 1 {
        Ok(())
    } else {
        Err("Class letter must be a single letter")
    }
}

/// Reject values that are empty once trimmed
pub fn validate_not_blank(value: &str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        Err("Must not be blank")
    } else {
        Ok(())
    }
}

/// Sanitize string input (remove control characters, trim whitespace)
pub fn sanitize_string(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Normalize a person's name: trims and collapses inner whitespace
pub fn normalize_name(input: &str) -> String {
    sanitize_string(input)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize a string list: sanitizes entries, drops blanks and duplicates
/// while keeping the original order
pub fn normalize_list(items: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let item = sanitize_string(item);
        if !item.is_empty() && !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_password() {
        assert!(validate_password("Admin123!").is_ok());
        assert!(validate_password("Sh0rt!").is_err()); // Too short
        assert!(validate_password("nouppercase123!").is_err());
        assert!(validate_password("NOLOWERCASE123!").is_err());
        assert!(validate_password("NoNumbers!!").is_err());
        assert!(validate_password("NoSymbols123").is_err());
    }

    #[test]
    fn test_validate_role() {
        assert!(validate_role("admin").is_ok());
        assert!(validate_role("contributor").is_ok());
        assert!(validate_role("viewer").is_ok());
        assert!(validate_role("organizer").is_err());
        assert!(validate_role("Admin").is_err());
    }

    #[test]
    fn test_validate_class_letter() {
        assert!(validate_class_letter("A").is_ok());
        assert!(validate_class_letter("c").is_ok());
        assert!(validate_class_letter("É").is_ok());
        assert!(validate_class_letter("").is_err());
        assert!(validate_class_letter("AB").is_err());
        assert!(validate_class_letter("1").is_err());
        assert!(validate_class_letter("ß").is_err());
        assert!(validate_class_letter("ŉ").is_err());
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("regional").is_ok());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank(" \t ").is_err());
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Kovács   Péter "), "Kovács Péter");
        assert_eq!(normalize_name("\tAnna\u{0007}"), "Anna");
    }

    #[test]
    fn test_normalize_list() {
        let items = vec![
            " math ".to_string(),
            "".to_string(),
            "physics".to_string(),
            "math".to_string(),
        ];
        assert_eq!(normalize_list(&items), vec!["math", "physics"]);
    }
}
