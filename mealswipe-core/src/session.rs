use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::RecipeError;

/// Identifier of the authenticated user, passed explicitly to every service
/// call that reads or writes per-user data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Result<Self, RecipeError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(RecipeError::NotSignedIn);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Turn an optional signed-in user into a `UserId`, failing when absent.
    pub fn require(id: Option<&str>) -> Result<Self, RecipeError> {
        id.map_or(Err(RecipeError::NotSignedIn), Self::new)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_user_is_not_signed_in() {
        assert!(matches!(UserId::new("  "), Err(RecipeError::NotSignedIn)));
        assert!(matches!(UserId::require(None), Err(RecipeError::NotSignedIn)));
        assert_eq!(UserId::require(Some(" u1 ")).unwrap().as_str(), "u1");
    }
}
