use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::SmokeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vote {
    Up,
    Down,
}

impl Vote {
    /// Value sent in `{ "value": ... }` and returned by `/ratings/user`.
    pub fn value(&self) -> i8 {
        match self {
            Vote::Up => 1,
            Vote::Down => -1,
        }
    }

    pub fn from_value(value: i64) -> Option<Vote> {
        match value {
            1 => Some(Vote::Up),
            -1 => Some(Vote::Down),
            _ => None,
        }
    }
}

/// Body of `POST /smokes/{id}/rate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateBody {
    pub value: i8,
}

/// What pressing a vote button should do given the user's current vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteAction {
    Rate(Vote),
    Remove,
}

pub fn vote_action(current: Option<Vote>, pressed: Vote) -> VoteAction {
    if current == Some(pressed) {
        VoteAction::Remove
    } else {
        VoteAction::Rate(pressed)
    }
}

/// Score change once `action` is confirmed by the server.
pub fn score_delta(current: Option<Vote>, action: VoteAction) -> i64 {
    let before = current.map_or(0, |v| v.value() as i64);
    let after = match action {
        VoteAction::Rate(v) => v.value() as i64,
        VoteAction::Remove => 0,
    };
    after - before
}

/// Vote state that outlives a single dialog: the user's votes plus score
/// adjustments applied after confirmed votes.
///
/// Overrides are relative to the last fetched list and are dropped on refetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoteBook {
    votes: HashMap<SmokeId, Vote>,
    score_offsets: HashMap<SmokeId, i64>,
}

impl VoteBook {
    /// Load from the `/ratings/user` map (`smokeId -> 1 | -1`). Unknown values are skipped.
    pub fn from_ratings(ratings: &HashMap<SmokeId, i64>) -> Self {
        let votes = ratings
            .iter()
            .filter_map(|(id, v)| Vote::from_value(*v).map(|vote| (*id, vote)))
            .collect();
        VoteBook {
            votes,
            score_offsets: HashMap::new(),
        }
    }

    pub fn vote_for(&self, id: SmokeId) -> Option<Vote> {
        self.votes.get(&id).copied()
    }

    /// Record a confirmed action.
    pub fn apply(&mut self, id: SmokeId, action: VoteAction) {
        let delta = score_delta(self.vote_for(id), action);
        *self.score_offsets.entry(id).or_insert(0) += delta;
        match action {
            VoteAction::Rate(v) => {
                self.votes.insert(id, v);
            }
            VoteAction::Remove => {
                self.votes.remove(&id);
            }
        }
    }

    pub fn display_score(&self, id: SmokeId, fetched: i64) -> i64 {
        fetched + self.score_offsets.get(&id).copied().unwrap_or(0)
    }

    /// Called after the smoke list is refetched; the fetched scores now include our votes.
    pub fn clear_overrides(&mut self) {
        self.score_offsets.clear();
    }
}

pub fn format_score(score: i64) -> String {
    if score > 0 {
        format!("+{score}")
    } else {
        score.to_string()
    }
}
