//! Privilege levels used for route access checks.
//!
//! DESIGN
//! ======
//! The backend sends role codes `"1"` through `"5"`. The enum's declaration
//! order is the privilege order, so `Ord` compares levels directly.

#[cfg(test)]
#[path = "role_test.rs"]
mod role_test;

use std::fmt;

use serde::Deserializer;
use serde::de::{Deserialize, Error as _};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    /// Freshly created account.
    Initial,
    Member,
    Vip,
    Admin,
    SuperAdmin,
}

impl Role {
    pub const ALL: [Role; 5] = [Role::Initial, Role::Member, Role::Vip, Role::Admin, Role::SuperAdmin];

    /// Parse a backend role code. Unknown codes return `None`.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "1" => Some(Self::Initial),
            "2" => Some(Self::Member),
            "3" => Some(Self::Vip),
            "4" => Some(Self::Admin),
            "5" => Some(Self::SuperAdmin),
            _ => None,
        }
    }

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Initial => "1",
            Self::Member => "2",
            Self::Vip => "3",
            Self::Admin => "4",
            Self::SuperAdmin => "5",
        }
    }

    /// Numeric rank, 1 through 5.
    #[must_use]
    pub fn level(self) -> u8 {
        match self {
            Self::Initial => 1,
            Self::Member => 2,
            Self::Vip => 3,
            Self::Admin => 4,
            Self::SuperAdmin => 5,
        }
    }
}

/// Rank of a raw role code. Unknown codes rank 0, below every real level.
#[must_use]
pub fn level_of(code: &str) -> u8 {
    Role::from_code(code).map_or(0, Role::level)
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Accept a role code sent either as a JSON string or a JSON integer.
pub(crate) fn deserialize_role_code<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(code) => Ok(code),
        serde_json::Value::Number(number) => number
            .as_u64()
            .map(|n| n.to_string())
            .ok_or_else(|| D::Error::custom("expected non-negative integer role code")),
        _ => Err(D::Error::custom("expected role code string or number")),
    }
}
