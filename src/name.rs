//! Bin names and identifier resolution.
//!
//! A bin name is embedded directly in a file path, so only a conservative
//! character set is accepted: ASCII letters, digits, `-`, `_` and `.`, never
//! starting with a `.`. That rules out path separators, traversal (`..`) and
//! hidden files.

use std::fmt;

use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

/// Longest accepted name, in bytes, including any unique suffix.
pub const MAX_NAME_LEN: usize = 128;

/// Bytes a unique suffix adds: `-` plus a hyphenated UUID.
const UNIQUE_SUFFIX_LEN: usize = 37;

/// Extension of the file backing each bin.
const BIN_EXTENSION: &str = "txt";

/// A validated bin name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BinName(String);

impl BinName {
    /// Validate a user-supplied name.
    ///
    /// Returns `NameUnspecified` for an empty string and `InvalidName` for
    /// anything outside the safe character set.
    pub fn parse(s: &str) -> StoreResult<BinName> {
        if s.is_empty() {
            return Err(StoreError::NameUnspecified);
        }

        if s.len() > MAX_NAME_LEN || s.starts_with('.') || !s.chars().all(is_safe_char) {
            return Err(StoreError::InvalidName(s.to_string()));
        }

        Ok(BinName(s.to_string()))
    }

    /// Resolve the identifier a create request should use.
    ///
    /// * `unique == false`: the name itself, which must be non-empty.
    /// * `unique == true`, non-empty name: `<name>-<uuid>`.
    /// * `unique == true`, empty name: the uuid alone.
    ///
    /// The resolved identifier is held to the same length limit as [`parse`],
    /// so a suffixed base may be at most `MAX_NAME_LEN - 37` bytes.
    ///
    /// [`parse`]: BinName::parse
    pub fn resolve(name: &str, unique: bool) -> StoreResult<BinName> {
        if !unique {
            return Self::parse(name);
        }

        let token = Uuid::new_v4().hyphenated().to_string();
        if name.is_empty() {
            return Ok(BinName(token));
        }

        let base = Self::parse(name)?;
        if base.0.len() + UNIQUE_SUFFIX_LEN > MAX_NAME_LEN {
            return Err(StoreError::InvalidName(base.0));
        }

        Ok(BinName(format!("{}-{}", base.0, token)))
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the file backing this bin, relative to the store root.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.0, BIN_EXTENSION)
    }

    /// Consume the name, returning the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for BinName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BinName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn is_safe_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}
