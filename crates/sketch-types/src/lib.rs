//! # Sketch Types
//!
//! Shared domain types for the Sketchdeck drawing backend.
//!
//! Contains the file-tree entity and projection types exchanged between the
//! stores, the core services, and the delivery layer, plus user/account types
//! and the validated [`NodeName`] text wrapper.
//!
//! **No store or API concerns**: persistence lives in `sketch-store` and
//! `sketch-blobs`, HTTP in `api-rest`.

mod file;
mod user;

pub use file::{FileItem, FileMetadata};
pub use user::{User, UserInfo, UserKind};

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("name cannot be empty")]
    Empty,
    /// The input text contained a path separator
    #[error("name cannot contain '/' or '\\': {0}")]
    Separator(String),
}

/// A display name for a node in the file tree.
///
/// Wraps a `String` that is guaranteed non-empty after trimming and free of
/// path separators, so a name can never smuggle extra path segments into a
/// materialized path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeName(String);

impl NodeName {
    /// Creates a new `NodeName` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. Empty results
    /// and names containing `/` or `\` are rejected.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        if trimmed.contains('/') || trimmed.contains('\\') {
            return Err(TextError::Separator(trimmed.to_owned()));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for NodeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NodeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NodeName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NodeName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NodeName::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_name_trims_whitespace() {
        let name = NodeName::new("  Sketches  ").unwrap();
        assert_eq!(name.as_str(), "Sketches");
    }

    #[test]
    fn node_name_rejects_empty() {
        assert!(matches!(NodeName::new("   "), Err(TextError::Empty)));
    }

    #[test]
    fn node_name_rejects_separators() {
        assert!(matches!(
            NodeName::new("a/b"),
            Err(TextError::Separator(_))
        ));
        assert!(matches!(
            NodeName::new("a\\b"),
            Err(TextError::Separator(_))
        ));
    }
}
