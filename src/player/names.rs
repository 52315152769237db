//! Player name rules.
//!
//! Names double as storage keys (`<name>.json`), so anything that could
//! escape the player directory or collide after trimming is refused outright
//! rather than rewritten.

use crate::core::constants::MAX_PLAYER_NAME_LEN;

pub fn validate_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err("Name cannot be empty".to_string());
    }

    if trimmed != name {
        return Err("Name cannot start or end with whitespace".to_string());
    }

    if trimmed.chars().count() > MAX_PLAYER_NAME_LEN {
        return Err(format!(
            "Name must be {} characters or less",
            MAX_PLAYER_NAME_LEN
        ));
    }

    let valid_chars = trimmed
        .chars()
        .all(|c| c.is_alphanumeric() || c == ' ' || c == '-' || c == '_');

    if !valid_chars {
        return Err(
            "Name can only contain letters, numbers, spaces, hyphens, and underscores".to_string(),
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name_valid() {
        assert!(validate_name("alice").is_ok());
        assert!(validate_name("Big Spender").is_ok());
        assert!(validate_name("whale-2").is_ok());
        assert!(validate_name("under_score").is_ok());
        assert!(validate_name("Åsa").is_ok());
    }

    #[test]
    fn test_validate_name_empty() {
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
    }

    #[test]
    fn test_validate_name_surrounding_whitespace() {
        assert!(validate_name(" alice").is_err());
        assert!(validate_name("alice ").is_err());
    }

    #[test]
    fn test_validate_name_too_long() {
        assert!(validate_name(&"x".repeat(MAX_PLAYER_NAME_LEN)).is_ok());
        assert!(validate_name(&"x".repeat(MAX_PLAYER_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_name_rejects_path_tricks() {
        assert!(validate_name("../etc/passwd").is_err());
        assert!(validate_name("a/b").is_err());
        assert!(validate_name("a\\b").is_err());
        assert!(validate_name("..").is_err());
        assert!(validate_name("alice.json").is_err());
    }
}
