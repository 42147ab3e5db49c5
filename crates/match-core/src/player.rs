//! Player identity and per-player state (§3).

use crate::config::{MatchConfig, LANE_COUNT};
use crate::lane::Lane;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub energy: u32,
    pub overheat: u32,
    pub lanes: [Lane; LANE_COUNT],
}

impl Player {
    pub fn new(id: PlayerId, config: &MatchConfig) -> Self {
        Self {
            id,
            energy: config.initial_energy,
            overheat: 0,
            lanes: std::array::from_fn(|_| Lane::new()),
        }
    }

    pub fn all_lanes_locked(&self) -> bool {
        self.lanes.iter().all(|l| l.locked)
    }

    pub fn decay_overheat(&mut self) {
        self.overheat = self.overheat.saturating_sub(1);
    }
}
