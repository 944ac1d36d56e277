/// Payload validation rules for users, tasks, and notes
///
/// Validation is intentionally ordered and fail-fast: rules are checked in a
/// fixed order and the first violated rule's message is returned. The
/// functions are pure (no store access, no side effects) so the same rules
/// run identically on create and update paths.
///
/// # Example
///
/// ```
/// use tasknest_shared::validation::{validate_task, messages};
///
/// // All fields valid
/// assert!(validate_task(Some("Buy milk"), Some("a"), Some("incomplete")).is_ok());
///
/// // First violated rule wins
/// assert_eq!(
///     validate_task(Some(""), Some("z"), None),
///     Err(messages::DESCRIPTION_BLANK),
/// );
/// ```

/// Priorities a task may carry
pub const VALID_PRIORITIES: [&str; 3] = ["a", "b", "c"];

/// Statuses a task may carry
pub const VALID_STATUSES: [&str; 4] = ["incomplete", "in progress", "completed", "forwarded"];

/// Maximum username length in characters
pub const MAX_USERNAME_LENGTH: usize = 200;

/// Maximum email length in characters
pub const MAX_EMAIL_LENGTH: usize = 320;

/// Minimum password length in characters (before hashing)
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Validation failure messages, one per rule
pub mod messages {
    pub const USERNAME_MISSING: &str = "Username cannot be blank!";
    pub const USERNAME_TOO_LONG: &str = "Username cannot be longer than 200 characters!";
    pub const EMAIL_MISSING: &str = "Email cannot be blank!";
    pub const EMAIL_TOO_LONG: &str = "Email cannot be longer than 320 characters!";
    pub const PASSWORD_MISSING: &str = "Password cannot be blank!";
    pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters!";
    pub const DESCRIPTION_BLANK: &str = "Description cannot be blank.";
    pub const PRIORITY_INVALID: &str =
        "Please assign a priority. Valid values are 'a', 'b', 'c'.";
    pub const STATUS_INVALID: &str = "Task status is required. Valid values are 'incomplete', \
         'in progress', 'completed', 'forwarded'.";
    pub const CONTENT_BLANK: &str = "Content cannot be blank.";
}

/// Result of a validation check: `Ok(())` or the first violated rule's message
pub type ValidationResult = Result<(), &'static str>;

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Validates a user payload
///
/// Checks, in order: username present, username length, email present,
/// email length, password present (unless `password_optional`), password
/// length. Password length is only checked when a password is supplied, so
/// partial updates that omit the password pass with `password_optional`.
///
/// # Arguments
///
/// * `username` - Username field of the payload, if present
/// * `email` - Email field of the payload, if present
/// * `password` - Plaintext password field of the payload, if present
/// * `password_optional` - Skip the password-presence rule (update path)
///
/// # Example
///
/// ```
/// use tasknest_shared::validation::{validate_user, messages};
///
/// assert!(validate_user(Some("alice"), Some("a@example.com"), Some("longenough1"), false).is_ok());
/// assert_eq!(
///     validate_user(Some("alice"), None, Some("longenough1"), false),
///     Err(messages::EMAIL_MISSING),
/// );
/// ```
pub fn validate_user(
    username: Option<&str>,
    email: Option<&str>,
    password: Option<&str>,
    password_optional: bool,
) -> ValidationResult {
    if is_blank(username) {
        return Err(messages::USERNAME_MISSING);
    }
    if username.is_some_and(|u| u.chars().count() > MAX_USERNAME_LENGTH) {
        return Err(messages::USERNAME_TOO_LONG);
    }
    if is_blank(email) {
        return Err(messages::EMAIL_MISSING);
    }
    if email.is_some_and(|e| e.chars().count() > MAX_EMAIL_LENGTH) {
        return Err(messages::EMAIL_TOO_LONG);
    }
    if is_blank(password) && !password_optional {
        return Err(messages::PASSWORD_MISSING);
    }
    if password.is_some_and(|p| !p.is_empty() && p.chars().count() < MIN_PASSWORD_LENGTH) {
        return Err(messages::PASSWORD_TOO_SHORT);
    }

    Ok(())
}

/// Validates a task payload for creation
///
/// Checks, in order: description non-blank, priority in
/// [`VALID_PRIORITIES`], status in [`VALID_STATUSES`]. All three fields are
/// required on create.
pub fn validate_task(
    description: Option<&str>,
    priority: Option<&str>,
    status: Option<&str>,
) -> ValidationResult {
    if is_blank(description) {
        return Err(messages::DESCRIPTION_BLANK);
    }
    if !priority.is_some_and(|p| VALID_PRIORITIES.contains(&p)) {
        return Err(messages::PRIORITY_INVALID);
    }
    if !status.is_some_and(|s| VALID_STATUSES.contains(&s)) {
        return Err(messages::STATUS_INVALID);
    }

    Ok(())
}

/// Validates a partial task update
///
/// Absent fields are left untouched by the update and are skipped here;
/// present fields are checked with the same rules as on create.
pub fn validate_task_update(
    description: Option<&str>,
    priority: Option<&str>,
    status: Option<&str>,
) -> ValidationResult {
    if description.is_some() && is_blank(description) {
        return Err(messages::DESCRIPTION_BLANK);
    }
    if priority.is_some_and(|p| !VALID_PRIORITIES.contains(&p)) {
        return Err(messages::PRIORITY_INVALID);
    }
    if status.is_some_and(|s| !VALID_STATUSES.contains(&s)) {
        return Err(messages::STATUS_INVALID);
    }

    Ok(())
}

/// Validates a note payload
///
/// A note only requires non-blank content.
pub fn validate_note(content: Option<&str>) -> ValidationResult {
    if is_blank(content) {
        return Err(messages::CONTENT_BLANK);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_user_ok() {
        assert!(validate_user(
            Some("alice"),
            Some("alice@example.com"),
            Some("longenough1"),
            false
        )
        .is_ok());
    }

    #[test]
    fn test_validate_user_rule_order() {
        // Username is checked before email, email before password
        assert_eq!(
            validate_user(None, None, None, false),
            Err(messages::USERNAME_MISSING)
        );
        assert_eq!(
            validate_user(Some("alice"), None, None, false),
            Err(messages::EMAIL_MISSING)
        );
        assert_eq!(
            validate_user(Some("alice"), Some("a@b.c"), None, false),
            Err(messages::PASSWORD_MISSING)
        );
    }

    #[test]
    fn test_validate_user_blank_fields() {
        assert_eq!(
            validate_user(Some("   "), Some("a@b.c"), Some("longenough1"), false),
            Err(messages::USERNAME_MISSING)
        );
        assert_eq!(
            validate_user(Some("alice"), Some(""), Some("longenough1"), false),
            Err(messages::EMAIL_MISSING)
        );
    }

    #[test]
    fn test_validate_user_length_limits() {
        let long_username = "u".repeat(201);
        assert_eq!(
            validate_user(Some(&long_username), Some("a@b.c"), Some("longenough1"), false),
            Err(messages::USERNAME_TOO_LONG)
        );

        let long_email = format!("{}@example.com", "e".repeat(320));
        assert_eq!(
            validate_user(Some("alice"), Some(&long_email), Some("longenough1"), false),
            Err(messages::EMAIL_TOO_LONG)
        );

        let max_username = "u".repeat(200);
        assert!(validate_user(
            Some(&max_username),
            Some("a@b.c"),
            Some("longenough1"),
            false
        )
        .is_ok());
    }

    #[test]
    fn test_validate_user_short_password() {
        assert_eq!(
            validate_user(Some("alice"), Some("a@b.c"), Some("short"), false),
            Err(messages::PASSWORD_TOO_SHORT)
        );
    }

    #[test]
    fn test_validate_user_password_optional() {
        // Update path: omitting the password entirely is fine
        assert!(validate_user(Some("alice"), Some("a@b.c"), None, true).is_ok());

        // But a supplied short password is still rejected
        assert_eq!(
            validate_user(Some("alice"), Some("a@b.c"), Some("short"), true),
            Err(messages::PASSWORD_TOO_SHORT)
        );
    }

    #[test]
    fn test_validate_task_ok() {
        for priority in VALID_PRIORITIES {
            for status in VALID_STATUSES {
                assert!(
                    validate_task(Some("do the thing"), Some(priority), Some(status)).is_ok(),
                    "priority={priority} status={status} should be valid"
                );
            }
        }
    }

    #[test]
    fn test_validate_task_rule_order() {
        assert_eq!(
            validate_task(None, None, None),
            Err(messages::DESCRIPTION_BLANK)
        );
        assert_eq!(
            validate_task(Some("x"), None, None),
            Err(messages::PRIORITY_INVALID)
        );
        assert_eq!(
            validate_task(Some("x"), Some("a"), None),
            Err(messages::STATUS_INVALID)
        );
    }

    #[test]
    fn test_validate_task_invalid_enum_values() {
        assert_eq!(
            validate_task(Some("x"), Some("d"), Some("incomplete")),
            Err(messages::PRIORITY_INVALID)
        );
        assert_eq!(
            validate_task(Some("x"), Some("a"), Some("done")),
            Err(messages::STATUS_INVALID)
        );
        // Case matters
        assert_eq!(
            validate_task(Some("x"), Some("A"), Some("incomplete")),
            Err(messages::PRIORITY_INVALID)
        );
    }

    #[test]
    fn test_validate_task_blank_description() {
        assert_eq!(
            validate_task(Some("   "), Some("a"), Some("incomplete")),
            Err(messages::DESCRIPTION_BLANK)
        );
    }

    #[test]
    fn test_validate_task_update_skips_absent_fields() {
        assert!(validate_task_update(None, None, None).is_ok());
        assert!(validate_task_update(Some("new description"), None, None).is_ok());
        assert!(validate_task_update(None, Some("b"), None).is_ok());

        assert_eq!(
            validate_task_update(Some(""), None, None),
            Err(messages::DESCRIPTION_BLANK)
        );
        assert_eq!(
            validate_task_update(None, Some("z"), None),
            Err(messages::PRIORITY_INVALID)
        );
        assert_eq!(
            validate_task_update(None, None, Some("paused")),
            Err(messages::STATUS_INVALID)
        );
    }

    #[test]
    fn test_validate_note() {
        assert!(validate_note(Some("remember this")).is_ok());
        assert_eq!(validate_note(None), Err(messages::CONTENT_BLANK));
        assert_eq!(validate_note(Some("  ")), Err(messages::CONTENT_BLANK));
    }
}
