//! Priority values for order scheduling

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scheduling priority of an order
///
/// Any integer is accepted. Smaller values are dispatched first, so
/// `Priority(-5)` beats `Priority(0)` which beats `Priority(10)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priority(pub i64);

impl Priority {
    /// Raw numeric value
    pub fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for Priority {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rejected priority input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid priority: {input:?} is not an integer")]
pub struct PriorityParseError {
    pub input: String,
}

impl std::str::FromStr for Priority {
    type Err = PriorityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self).map_err(|_| PriorityParseError {
            input: s.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_ordering() {
        assert!(Priority(-1) < Priority(0));
        assert!(Priority(0) < Priority(1));
        assert!(Priority(1) < Priority(100));
    }

    #[test]
    fn test_priority_parse() {
        assert_eq!("2".parse::<Priority>().unwrap(), Priority(2));
        assert_eq!(" -7 ".parse::<Priority>().unwrap(), Priority(-7));
        assert_eq!("0".parse::<Priority>().unwrap(), Priority::default());
    }

    #[test]
    fn test_priority_parse_rejects_garbage() {
        let err = "high".parse::<Priority>().unwrap_err();
        assert_eq!(err.input, "high");
        assert!(err.to_string().contains("Invalid priority"));

        assert!("".parse::<Priority>().is_err());
        assert!("1.5".parse::<Priority>().is_err());
        assert!("99999999999999999999".parse::<Priority>().is_err());
    }

    #[test]
    fn test_priority_serde_is_plain_integer() {
        let json = serde_json::to_string(&Priority(3)).unwrap();
        assert_eq!(json, "3");

        let priority: Priority = serde_json::from_str("-4").unwrap();
        assert_eq!(priority, Priority(-4));
    }
}
