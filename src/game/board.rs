use super::{executive::ExecutiveAction, party::Party};

pub const MAX_LIBERAL_CARDS: usize = 5;
pub const MAX_FASCIST_CARDS: usize = 6;

/// The two policy tracks.
#[derive(Clone, Debug, Default)]
pub struct Board {
    pub liberal_cards: usize,
    pub fascist_cards: usize,
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enacts a policy.
    pub fn play_card(&mut self, card: Party) {
        match card {
            Party::Liberal => self.liberal_cards += 1,
            Party::Fascist => self.fascist_cards += 1,
        }
    }

    /// Gets the executive action unlocked by the card just played, if there is any.
    pub fn get_executive_power(&self, card: Party) -> Option<ExecutiveAction> {
        match (card, self.fascist_cards) {
            (Party::Fascist, 4 | 5) => Some(ExecutiveAction::Assassination),
            _ => None,
        }
    }

    /// Checks whether either party has completed their policy track.
    pub fn check_tracks(&self) -> Option<Party> {
        if self.liberal_cards >= MAX_LIBERAL_CARDS {
            return Some(Party::Liberal);
        }
        if self.fascist_cards >= MAX_FASCIST_CARDS {
            return Some(Party::Fascist);
        }
        None
    }

    /// The total number of policies enacted so far.
    pub fn enacted(&self) -> usize {
        self.liberal_cards + self.fascist_cards
    }
}
