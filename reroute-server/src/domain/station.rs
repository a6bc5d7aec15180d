//! Station names.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid station name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station name: {reason}")]
pub struct InvalidStation {
    reason: &'static str,
}

/// A station, identified by its unique name.
///
/// Names are trimmed and must not be empty. The name is stored behind an
/// `Arc` so that graphs, routes and snapshots can share it cheaply.
///
/// # Examples
///
/// ```
/// use reroute_server::domain::Station;
///
/// let vigo = Station::parse("  Vigo-Guixar ").unwrap();
/// assert_eq!(vigo.as_str(), "Vigo-Guixar");
///
/// assert!(Station::parse("").is_err());
/// assert!(Station::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Station(Arc<str>);

impl Station {
    /// Parse a station name, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidStation> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidStation {
                reason: "must not be empty",
            });
        }

        if trimmed.chars().any(char::is_control) {
            return Err(InvalidStation {
                reason: "must not contain control characters",
            });
        }

        Ok(Station(Arc::from(trimmed)))
    }

    /// Returns the station name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Station {
    type Error = InvalidStation;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Station::parse(&value)
    }
}

impl From<Station> for String {
    fn from(station: Station) -> Self {
        station.0.to_string()
    }
}

impl fmt::Debug for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Station({})", self.as_str())
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Surrounding whitespace never changes the parsed name
        #[test]
        fn padding_is_ignored(name in "[A-Za-z][A-Za-z ]{0,20}[A-Za-z]", pad in " {0,3}") {
            let padded = format!("{pad}{name}{pad}");
            let a = Station::parse(&name).unwrap();
            let b = Station::parse(&padded).unwrap();
            prop_assert_eq!(a, b);
        }

        /// Whitespace-only input is always rejected
        #[test]
        fn blank_rejected(s in "[ \t]{0,8}") {
            prop_assert!(Station::parse(&s).is_err());
        }
    }
}
