//! Internal implementation of the identifier wrapper.

use crate::{IdError, IdResult};
use std::{fmt, str::FromStr};

/// Re-exported for convenience.
pub use ::uuid::Uuid;

/// Sketchdeck's canonical node identifier (32 lowercase hex characters, no
/// hyphens), generated from a time-ordered UUID.
///
/// Once constructed, the contained identifier is guaranteed to be in
/// canonical form.
///
/// # When to use this type
/// - Generating a fresh identifier for a new node ([`FileId::new`]).
/// - Accepting an identifier string from outside the core (API or CLI
///   input) that must name a real node ([`FileId::parse`]).
///
/// Elsewhere identifiers travel as plain strings; they are opaque to every
/// component except the one that mints them.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FileId(Uuid);

impl Default for FileId {
    fn default() -> Self {
        Self::new()
    }
}

impl FileId {
    /// Generates a new identifier in canonical form.
    ///
    /// Uses a version 7 (time-ordered) UUID, so identifiers allocated later
    /// compare greater than earlier ones. Suitable for allocating a fresh
    /// node id at creation time.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Validates and parses an identifier that must already be canonical.
    ///
    /// This does **not** normalise other common UUID forms (hyphenated,
    /// uppercase). Callers must provide the canonical representation.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidInput`] if `input` is not 32 lowercase hex
    /// characters.
    pub fn parse(input: &str) -> IdResult<Self> {
        if Self::is_canonical(input) {
            // is_canonical guarantees valid hex, so parse_str cannot fail
            let uuid = Uuid::parse_str(input).expect("is_canonical guarantees valid UUID");
            return Ok(Self(uuid));
        }
        Err(IdError::InvalidInput(format!(
            "identifier must be 32 lowercase hex characters without hyphens, got: '{}'",
            input
        )))
    }

    /// Returns the underlying `uuid::Uuid`.
    pub fn uuid(&self) -> Uuid {
        self.0
    }

    /// Returns true when `input` is already in canonical form.
    pub fn is_canonical(input: &str) -> bool {
        input.len() == 32
            && input
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for FileId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for FileId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for FileId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FileId::parse(&s).map_err(serde::de::Error::custom)
    }
}
