//! Construct identifier value object
//!
//! Stack names, resource names, asset ids, output ids and module ids all
//! end up as Terraform block labels or path segments, so they share one
//! naming rule: a leading ASCII letter or `_`, then letters, digits, `_` or `-`.

use std::fmt;

use serde::Serialize;

use crate::error::{StackError, StackResult};

/// Validated construct identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ConstructId(String);

impl ConstructId {
    pub fn new(id: impl Into<String>) -> StackResult<Self> {
        let id = id.into();
        if let Some(reason) = Self::violation(&id) {
            return Err(StackError::InvalidId {
                id,
                reason: reason.to_string(),
            });
        }
        Ok(Self(id))
    }

    fn violation(id: &str) -> Option<&'static str> {
        let mut chars = id.chars();
        let first = match chars.next() {
            Some(c) => c,
            None => return Some("must not be empty"),
        };
        if !(first.is_ascii_alphabetic() || first == '_') {
            return Some("must start with a letter or '_'");
        }
        if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            return Some("may only contain letters, digits, '_' and '-'");
        }
        None
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConstructId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ConstructId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for ConstructId {
    type Error = StackError;

    fn try_from(value: &str) -> StackResult<Self> {
        Self::new(value)
    }
}

impl TryFrom<String> for ConstructId {
    type Error = StackError;

    fn try_from(value: String) -> StackResult<Self> {
        Self::new(value)
    }
}
