use super::player::SessionId;
use crate::error::GameError;

/// Tracks the vote of each player in a single election.
#[derive(Clone, Debug, Default)]
pub struct Votes {
    votes: Vec<(SessionId, bool)>,
}

/// The resolved result of an election.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Tally {
    pub votes_for: usize,
    pub votes_against: usize,
    pub passed: bool,
}

impl Votes {
    /// Returns whether the given player has cast their vote.
    pub fn has_cast(&self, player: &SessionId) -> bool {
        self.votes.iter().any(|(id, _)| id == player)
    }

    /// Records the vote of a player. Each player may only vote once.
    pub fn vote(&mut self, player: SessionId, vote: bool) -> Result<(), GameError> {
        if self.has_cast(&player) {
            return Err(GameError::AlreadyVoted);
        }
        self.votes.push((player, vote));
        Ok(())
    }

    /// If every member of the electorate has voted, returns the outcome, otherwise returns `None`.
    ///
    /// The ballot passes on a strict majority of the electorate.
    pub fn outcome(&self, electorate: &[SessionId]) -> Option<Tally> {
        let counted = self.votes.iter().filter(|(id, _)| electorate.contains(id));
        let votes_for = counted.clone().filter(|(_, v)| *v).count();
        let votes_against = counted.filter(|(_, v)| !*v).count();
        (votes_for + votes_against >= electorate.len()).then(|| Tally {
            votes_for,
            votes_against,
            passed: votes_for * 2 > electorate.len(),
        })
    }

    /// The number of votes cast so far.
    #[cfg(test)]
    pub fn count(&self) -> usize {
        self.votes.len()
    }
}
