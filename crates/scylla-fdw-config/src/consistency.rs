//! Remote consistency levels.

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// How many replicas must acknowledge a read or write.
///
/// Discriminants are the native protocol codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[repr(u16)]
pub enum ConsistencyLevel {
    Any = 0,
    One = 1,
    Two = 2,
    Three = 3,
    Quorum = 4,
    All = 5,
    #[default]
    LocalQuorum = 6,
    EachQuorum = 7,
    Serial = 8,
    LocalSerial = 9,
    LocalOne = 10,
}

impl ConsistencyLevel {
    pub const ALL: [ConsistencyLevel; 11] = [
        ConsistencyLevel::Any,
        ConsistencyLevel::One,
        ConsistencyLevel::Two,
        ConsistencyLevel::Three,
        ConsistencyLevel::Quorum,
        ConsistencyLevel::All,
        ConsistencyLevel::LocalQuorum,
        ConsistencyLevel::EachQuorum,
        ConsistencyLevel::Serial,
        ConsistencyLevel::LocalSerial,
        ConsistencyLevel::LocalOne,
    ];

    /// Native protocol code.
    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConsistencyLevel::Any => "any",
            ConsistencyLevel::One => "one",
            ConsistencyLevel::Two => "two",
            ConsistencyLevel::Three => "three",
            ConsistencyLevel::Quorum => "quorum",
            ConsistencyLevel::All => "all",
            ConsistencyLevel::LocalQuorum => "local_quorum",
            ConsistencyLevel::EachQuorum => "each_quorum",
            ConsistencyLevel::Serial => "serial",
            ConsistencyLevel::LocalSerial => "local_serial",
            ConsistencyLevel::LocalOne => "local_one",
        }
    }
}

impl Display for ConsistencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConsistencyLevel {
    type Err = ConfigError;

    /// Parses a level name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::InvalidConsistency(s.to_string()))
    }
}

impl TryFrom<String> for ConsistencyLevel {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ConsistencyLevel> for String {
    fn from(level: ConsistencyLevel) -> Self {
        level.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("any", 0)]
    #[test_case("QUORUM", 4)]
    #[test_case("Local_Quorum", 6)]
    #[test_case("local_one", 10)]
    fn parses_case_insensitively(name: &str, code: u16) {
        let level: ConsistencyLevel = name.parse().unwrap();
        assert_eq!(level.code(), code);
    }

    #[test]
    fn rejects_unknown_level() {
        let err = "majority".parse::<ConsistencyLevel>().unwrap_err();
        assert_eq!(err, ConfigError::InvalidConsistency("majority".into()));
        assert!(err.to_string().contains("local_serial"));
    }

    #[test]
    fn names_round_trip() {
        for level in ConsistencyLevel::ALL {
            assert_eq!(level.to_string().parse::<ConsistencyLevel>().unwrap(), level);
        }
    }

    #[test]
    fn default_is_local_quorum() {
        assert_eq!(ConsistencyLevel::default(), ConsistencyLevel::LocalQuorum);
    }
}
