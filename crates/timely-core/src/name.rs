// crates/timely-core/src/name.rs
//
// Account names.
//
// Accounts follow the EOSIO naming scheme: up to 12 characters from
// `.12345abcdefghijklmnopqrstuvwxyz`, plus an optional 13th character restricted
// to `.12345abcdefghij`. A name may not be empty and may not end with a dot,
// since trailing dots do not survive the on-chain 64-bit encoding.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TimelyError;

/// Maximum length of an account name.
pub const MAX_NAME_LEN: usize = 13;

/// A validated account identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountName(String);

impl AccountName {
    /// Validate and wrap an account name.
    pub fn new(name: &str) -> Result<Self, TimelyError> {
        validate(name)?;
        Ok(Self(name.to_string()))
    }

    /// Borrow the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn validate(name: &str) -> Result<(), TimelyError> {
    if name.is_empty() {
        return Err(TimelyError::InvalidName("name is empty".to_string()));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(TimelyError::InvalidName(format!(
            "{} is longer than {} characters",
            name, MAX_NAME_LEN
        )));
    }
    for (i, c) in name.chars().enumerate() {
        let ok = if i < 12 {
            matches!(c, '.' | '1'..='5' | 'a'..='z')
        } else {
            matches!(c, '.' | '1'..='5' | 'a'..='j')
        };
        if !ok {
            return Err(TimelyError::InvalidName(format!(
                "{} contains invalid character {:?}",
                name, c
            )));
        }
    }
    if name.ends_with('.') {
        return Err(TimelyError::InvalidName(format!("{} ends with a dot", name)));
    }
    Ok(())
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AccountName {
    type Err = TimelyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for AccountName {
    type Error = TimelyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate(&value)?;
        Ok(Self(value))
    }
}

impl From<AccountName> for String {
    fn from(name: AccountName) -> Self {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        for n in ["alice", "eosio.token", "test.token", "timelyreward", "a1b2c3d4e5", "abcdefghijkla"] {
            assert!(AccountName::new(n).is_ok(), "{} should be valid", n);
        }
    }

    #[test]
    fn test_invalid_names() {
        for n in ["", "Alice", "bob6", "has space", "toolongname123z", "abcdefghijklz", "dot."] {
            assert!(AccountName::new(n).is_err(), "{} should be invalid", n);
        }
    }

    #[test]
    fn test_serde_as_string() {
        let name = AccountName::new("alice").unwrap();
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"alice\"");
        let back: AccountName = serde_json::from_str("\"alice\"").unwrap();
        assert_eq!(back, name);
        assert!(serde_json::from_str::<AccountName>("\"ALICE\"").is_err());
    }
}
