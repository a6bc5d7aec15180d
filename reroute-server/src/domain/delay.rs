//! Per-station delay selections.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::Station;

/// Delay minutes per station.
///
/// A station missing from the map has no delay. A station present with
/// zero minutes is still *marked*: it counts as a delayed station when
/// routes are compared, but adds nothing to edge weights.
///
/// The map is an owned value handed to the graph builder for one planning
/// request; nothing in the core keeps a reference to it afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DelayMap {
    delays: BTreeMap<Station, u32>,
}

impl DelayMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the delay at a station, replacing any previous value.
    pub fn set(&mut self, station: Station, minutes: u32) {
        self.delays.insert(station, minutes);
    }

    /// Builder-style variant of [`DelayMap::set`].
    pub fn with(mut self, station: Station, minutes: u32) -> Self {
        self.set(station, minutes);
        self
    }

    /// Remove a station's delay, returning the old value.
    pub fn remove(&mut self, station: &Station) -> Option<u32> {
        self.delays.remove(station)
    }

    /// Delay minutes at a station, zero when unmarked.
    pub fn get(&self, station: &Station) -> u32 {
        self.delays.get(station).copied().unwrap_or(0)
    }

    /// Whether the station has been marked, even with zero minutes.
    pub fn is_marked(&self, station: &Station) -> bool {
        self.delays.contains_key(station)
    }

    /// All marked stations.
    pub fn marked(&self) -> BTreeSet<Station> {
        self.delays.keys().cloned().collect()
    }

    /// Iterate over (station, minutes) in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&Station, u32)> {
        self.delays.iter().map(|(s, m)| (s, *m))
    }

    pub fn len(&self) -> usize {
        self.delays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delays.is_empty()
    }
}

impl FromIterator<(Station, u32)> for DelayMap {
    fn from_iter<I: IntoIterator<Item = (Station, u32)>>(iter: I) -> Self {
        Self {
            delays: iter.into_iter().collect(),
        }
    }
}
