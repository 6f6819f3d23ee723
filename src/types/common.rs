//! Common domain types for Dota 2 match data.

use serde::{Deserialize, Serialize};

/// Slot values at or above this belong to the Dire side.
pub const DIRE_SLOT_OFFSET: u8 = 128;

/// Team side in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Radiant (slots 0-127)
    Radiant,
    /// Dire (slots 128+)
    Dire,
}

impl Side {
    /// Derive the side from an OpenDota `player_slot`.
    pub fn from_slot(slot: u8) -> Self {
        if slot < DIRE_SLOT_OFFSET {
            Side::Radiant
        } else {
            Side::Dire
        }
    }

    /// Whether this side won, given the match-level outcome.
    pub fn won(self, radiant_win: bool) -> bool {
        (self == Side::Radiant) == radiant_win
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Radiant => write!(f, "radiant"),
            Side::Dire => write!(f, "dire"),
        }
    }
}

/// A player's position in a match.
///
/// Only parsed matches carry the detailed `lane_role`; everything else is
/// either guessed from the coarse lane number or left [`Role::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Position 1, safe lane carry
    SafeLane,
    /// Position 2
    Mid,
    /// Position 3
    OffLane,
    /// Position 4
    SoftSupport,
    /// Position 5
    HardSupport,
    /// No lane data available
    Unknown,
}

impl Role {
    /// The five known positions, in position order.
    pub const KNOWN: [Role; 5] = [
        Role::SafeLane,
        Role::Mid,
        Role::OffLane,
        Role::SoftSupport,
        Role::HardSupport,
    ];

    /// Map an OpenDota `lane_role` value (1-5) to a role.
    pub fn from_lane_role(lane_role: u8) -> Option<Self> {
        match lane_role {
            1 => Some(Role::SafeLane),
            2 => Some(Role::Mid),
            3 => Some(Role::OffLane),
            4 => Some(Role::SoftSupport),
            5 => Some(Role::HardSupport),
            _ => None,
        }
    }

    /// Map a coarse lane number to a role. Only lanes 1-3 are distinguishable.
    pub fn from_lane(lane: u8) -> Option<Self> {
        match lane {
            1 => Some(Role::SafeLane),
            2 => Some(Role::Mid),
            3 => Some(Role::OffLane),
            _ => None,
        }
    }

    /// Position number (1-5), or `None` for unknown.
    pub fn position(self) -> Option<u8> {
        match self {
            Role::SafeLane => Some(1),
            Role::Mid => Some(2),
            Role::OffLane => Some(3),
            Role::SoftSupport => Some(4),
            Role::HardSupport => Some(5),
            Role::Unknown => None,
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Role::SafeLane => "Safe Lane",
            Role::Mid => "Mid Lane",
            Role::OffLane => "Off Lane",
            Role::SoftSupport => "Soft Support",
            Role::HardSupport => "Hard Support",
            Role::Unknown => "Unknown",
        }
    }

    pub fn is_known(self) -> bool {
        self != Role::Unknown
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
