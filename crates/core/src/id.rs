//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// System-assigned identity of an article.
///
/// Codes start at 1; `0` is never handed out by a [`CodeGenerator`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleCode(u64);

impl ArticleCode {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// Whether a generator could ever have produced this code.
    pub const fn is_assignable(self) -> bool {
        self.0 != 0
    }
}

impl core::fmt::Display for ArticleCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for ArticleCode {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<ArticleCode> for u64 {
    fn from(value: ArticleCode) -> Self {
        value.0
    }
}

impl FromStr for ArticleCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u64>()
            .map_err(|e| DomainError::invalid_id(format!("ArticleCode: {e}")))?;
        Ok(Self(value))
    }
}

/// Monotonic code source owned by a single collection.
///
/// `peek` reports the code the next `advance` will hand out; callers check
/// for collisions with `peek` and only `advance` once the insert succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeGenerator {
    last: u64,
}

impl CodeGenerator {
    pub const fn new() -> Self {
        Self { last: 0 }
    }

    /// The code the next call to [`advance`](Self::advance) returns.
    pub const fn peek(&self) -> ArticleCode {
        ArticleCode(self.last + 1)
    }

    /// Consume and return the next code.
    pub fn advance(&mut self) -> ArticleCode {
        self.last += 1;
        ArticleCode(self.last)
    }

    /// Last code handed out, if any.
    pub fn last(&self) -> Option<ArticleCode> {
        (self.last > 0).then_some(ArticleCode(self.last))
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}
