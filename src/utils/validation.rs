//! Input validation utilities

use crate::constants;

/// Validate email format (basic validation)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !email.contains('@') {
        return Err("Invalid email format");
    }
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err("Invalid email format");
    }
    if parts[0].is_empty() || parts[1].is_empty() {
        return Err("Invalid email format");
    }
    if !parts[1].contains('.') {
        return Err("Invalid email domain");
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    if password.len() > 128 {
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
    Ok(())
}

/// Validate an external player id (FF UID)
pub fn validate_ff_uid(ff_uid: &str) -> Result<(), &'static str> {
    let trimmed = ff_uid.trim();
    if trimmed.is_empty() {
        return Err("Player UID cannot be empty");
    }
    if trimmed.len() > 32 {
        return Err("Player UID must be at most 32 characters");
    }
    Ok(())
}

/// Validate a user role
pub fn validate_role(role: &str) -> Result<(), &'static str> {
    if constants::roles::ALL.contains(&role) {
        Ok(())
    } else {
        Err("Invalid role")
    }
}

/// Validate a tournament team mode
pub fn validate_team_mode(mode: &str) -> Result<(), &'static str> {
    if constants::team_modes::ALL.contains(&mode) {
        Ok(())
    } else {
        Err("Invalid team mode")
    }
}

/// Validate a ban status
pub fn validate_ban_status(status: &str) -> Result<(), &'static str> {
    if constants::ban_statuses::ALL.contains(&status) {
        Ok(())
    } else {
        Err("Invalid ban status")
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("Password123").is_ok());
        assert!(validate_password("short").is_err());
        assert!(validate_password("nouppercase123").is_err());
        assert!(validate_password("NOLOWERCASE123").is_err());
        assert!(validate_password("NoNumbers").is_err());
    }

    #[test]
    fn test_validate_ff_uid() {
        assert!(validate_ff_uid("2847561923").is_ok());
        assert!(validate_ff_uid("  ").is_err());
        assert!(validate_ff_uid(&"9".repeat(40)).is_err());
    }

    #[test]
    fn test_validate_team_mode() {
        assert!(validate_team_mode("Solo").is_ok());
        assert!(validate_team_mode("Squad").is_ok());
        assert!(validate_team_mode("Trio").is_err());
    }

    #[test]
    fn test_validate_role() {
        assert!(validate_role("user").is_ok());
        assert!(validate_role("super-admin").is_ok());
        assert!(validate_role("moderator").is_err());
    }
}
