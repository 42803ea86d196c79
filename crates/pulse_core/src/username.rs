use std::fmt;

use thiserror::Error;

/// GitHub caps usernames at 39 characters.
pub const MAX_USERNAME_LEN: usize = 39;

/// A validated GitHub-style username.
///
/// Construction goes through [`Username::parse`], so every value of this type
/// is non-empty, trimmed, and made of ASCII alphanumerics and inner hyphens.
/// That charset means a username always substitutes into an upstream URL
/// template as a single opaque segment, with no encoding step.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsernameError {
    #[error("GitHub username is required")]
    Empty,
    #[error("GitHub username is longer than {MAX_USERNAME_LEN} characters")]
    TooLong,
    #[error("GitHub username may only contain letters, digits and hyphens")]
    ForbiddenChar,
    #[error("GitHub username cannot start or end with a hyphen")]
    EdgeHyphen,
}

impl Username {
    /// Validate a raw identifier, trimming surrounding whitespace.
    pub fn parse(raw: &str) -> Result<Self, UsernameError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UsernameError::Empty);
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(UsernameError::ForbiddenChar);
        }
        // Charset is ASCII by now, so byte length equals character count.
        if trimmed.len() > MAX_USERNAME_LEN {
            return Err(UsernameError::TooLong);
        }
        if trimmed.starts_with('-') || trimmed.ends_with('-') {
            return Err(UsernameError::EdgeHyphen);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
