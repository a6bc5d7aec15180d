//! Directed connections between stations.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Station;
use super::error::DomainError;

/// A non-negative, finite amount of travel time in minutes.
///
/// Travel times may be fractional; they are kept as `f64` so that both
/// integer and fractional inputs survive without loss. Each value is at
/// most [`Minutes::MAX`], so adding up the edges of any path stays finite.
#[derive(Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Minutes(f64);

impl Minutes {
    pub const ZERO: Minutes = Minutes(0.0);

    /// Largest single travel time accepted.
    pub const MAX: Minutes = Minutes(u32::MAX as f64);

    /// Create a duration, rejecting negative, NaN and out-of-range values.
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() {
            return Err(DomainError::InvalidTime(value));
        }
        if !(0.0..=Self::MAX.0).contains(&value) {
            return Err(DomainError::InvalidTime(value));
        }
        // Normalise -0.0 so that Display never prints a sign.
        Ok(Minutes(value + 0.0))
    }

    /// Whole minutes, as used for delays.
    pub fn whole(mins: u32) -> Self {
        Minutes(f64::from(mins))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl std::ops::Add for Minutes {
    type Output = Minutes;

    fn add(self, rhs: Minutes) -> Minutes {
        Minutes(self.0 + rhs.0)
    }
}

impl TryFrom<f64> for Minutes {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Minutes::new(value)
    }
}

impl From<Minutes> for f64 {
    fn from(m: Minutes) -> Self {
        m.0
    }
}

impl fmt::Debug for Minutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}min", self)
    }
}

/// Whole values print without a fractional part ("20", not "20.0").
impl fmt::Display for Minutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 && self.0.abs() < 1e15 {
            write!(f, "{}", self.0 as i64)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// A directed connection from `origin` to `destination`.
///
/// An edge from A to B says nothing about B to A. Parallel edges between
/// the same pair are legal and are never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub origin: Station,
    pub destination: Station,
    /// Scheduled travel time, before any delay.
    pub minutes: Minutes,
}

impl Edge {
    pub fn new(origin: Station, destination: Station, minutes: Minutes) -> Self {
        Self {
            origin,
            destination,
            minutes,
        }
    }

    /// Build an edge from raw parts, validating names and time.
    pub fn parse(origin: &str, destination: &str, minutes: f64) -> Result<Self, DomainError> {
        Ok(Self {
            origin: Station::parse(origin)?,
            destination: Station::parse(destination)?,
            minutes: Minutes::new(minutes)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minutes_rejects_invalid() {
        assert!(Minutes::new(-1.0).is_err());
        assert!(Minutes::new(f64::NAN).is_err());
        assert!(Minutes::new(f64::INFINITY).is_err());
        assert!(Minutes::new(1e308).is_err());
        assert!(Minutes::new(f64::from(u32::MAX) + 1.0).is_err());
    }

    #[test]
    fn minutes_accepts_upper_bound() {
        assert_eq!(Minutes::new(f64::from(u32::MAX)).unwrap(), Minutes::MAX);
        assert_eq!(Minutes::whole(u32::MAX), Minutes::MAX);
    }

    #[test]
    fn minutes_accepts_zero_and_fractions() {
        assert_eq!(Minutes::new(0.0).unwrap(), Minutes::ZERO);
        assert_eq!(Minutes::new(7.5).unwrap().get(), 7.5);
    }

    #[test]
    fn negative_zero_is_normalised() {
        let m = Minutes::new(-0.0).unwrap();
        assert_eq!(m.to_string(), "0");
    }

    #[test]
    fn minutes_display() {
        assert_eq!(Minutes::new(20.0).unwrap().to_string(), "20");
        assert_eq!(Minutes::new(12.5).unwrap().to_string(), "12.5");
        assert_eq!(Minutes::whole(15).to_string(), "15");
    }

    #[test]
    fn minutes_add() {
        let total = Minutes::new(10.0).unwrap() + Minutes::whole(15);
        assert_eq!(total.get(), 25.0);
    }

    #[test]
    fn edge_parse() {
        let edge = Edge::parse("A Coruña", "Betanzos", 18.0).unwrap();
        assert_eq!(edge.origin.as_str(), "A Coruña");
        assert_eq!(edge.destination.as_str(), "Betanzos");
        assert_eq!(edge.minutes.get(), 18.0);
    }

    #[test]
    fn edge_parse_rejects_bad_parts() {
        assert!(Edge::parse("", "Betanzos", 18.0).is_err());
        assert!(Edge::parse("A Coruña", "", 18.0).is_err());
        assert!(Edge::parse("A Coruña", "Betanzos", -3.0).is_err());
    }

    #[test]
    fn edge_deserialize_validates_time() {
        let ok: Edge =
            serde_json::from_str(r#"{"origin":"Lugo","destination":"Ourense","minutes":95}"#)
                .unwrap();
        assert_eq!(ok.minutes.get(), 95.0);

        let bad = serde_json::from_str::<Edge>(
            r#"{"origin":"Lugo","destination":"Ourense","minutes":-5}"#,
        );
        assert!(bad.is_err());
    }
}
