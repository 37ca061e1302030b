//! Vote entity and the per-(answer, voter) vote state machine
//!
//! At most one vote row exists per `(answer_id, user_id)` pair; that unique
//! key is the authoritative dedup point. Re-voting the same direction
//! removes the vote, re-voting the opposite direction flips it.

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Direction of a vote on an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    /// Signed value as stored in the database (+1 / -1)
    #[inline]
    pub const fn value(self) -> i16 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }

    /// Parse the stored signed value
    pub const fn from_value(value: i16) -> Option<Self> {
        match value {
            1 => Some(Self::Up),
            -1 => Some(Self::Down),
            _ => None,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

/// A user's vote on an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vote {
    pub answer_id: Snowflake,
    pub user_id: Snowflake,
    pub direction: VoteDirection,
    pub created_at: DateTime<Utc>,
}

impl Vote {
    /// Create a new Vote
    pub fn new(answer_id: Snowflake, user_id: Snowflake, direction: VoteDirection) -> Self {
        Self {
            answer_id,
            user_id,
            direction,
            created_at: Utc::now(),
        }
    }
}

/// Observable vote state for one (answer, voter) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteState {
    NoVote,
    Upvoted,
    Downvoted,
}

impl VoteState {
    /// State implied by an optional existing vote row
    pub fn from_existing(existing: Option<VoteDirection>) -> Self {
        match existing {
            None => Self::NoVote,
            Some(VoteDirection::Up) => Self::Upvoted,
            Some(VoteDirection::Down) => Self::Downvoted,
        }
    }
}

/// Write-set implied by one vote request against the current state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteTransition {
    /// No vote row exists: insert one and bump the matching counter
    Cast(VoteDirection),
    /// Same direction again: delete the row and drop the matching counter
    Retract(VoteDirection),
    /// Opposite direction: flip the row, move one counter to the other
    Switch { from: VoteDirection, to: VoteDirection },
}

impl VoteTransition {
    /// Plan the transition for a vote in `requested` direction given the
    /// voter's existing vote on the answer, if any
    pub fn plan(existing: Option<VoteDirection>, requested: VoteDirection) -> Self {
        match existing {
            None => Self::Cast(requested),
            Some(current) if current == requested => Self::Retract(current),
            Some(current) => Self::Switch {
                from: current,
                to: requested,
            },
        }
    }

    /// Vote state after this transition is applied
    pub fn resulting_state(self) -> VoteState {
        match self {
            Self::Cast(direction) | Self::Switch { to: direction, .. } => {
                VoteState::from_existing(Some(direction))
            }
            Self::Retract(_) => VoteState::NoVote,
        }
    }
}
