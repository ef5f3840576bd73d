use super::party::Party;
use rand::prelude::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;
use std::iter::repeat;

pub const LIBERAL_POLICIES: usize = 6;
pub const FASCIST_POLICIES: usize = 11;
pub const TOTAL_POLICIES: usize = LIBERAL_POLICIES + FASCIST_POLICIES;

#[derive(Clone, Debug, Default)]
pub struct Deck {
    /// The current draw pile; the front is the top of the pile
    deck: VecDeque<Party>,
    /// Cards discarded by presidents and chancellors, in the order they were discarded
    discard: Vec<Party>,
}

impl Deck {
    /// Creates a freshly shuffled deck of every policy card.
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut cards = repeat(Party::Liberal)
            .take(LIBERAL_POLICIES)
            .chain(repeat(Party::Fascist).take(FASCIST_POLICIES))
            .collect::<Vec<_>>();
        cards.shuffle(rng);
        Self {
            deck: cards.into(),
            discard: vec![],
        }
    }

    /// Creates a deck whose draw pile is exactly `cards`, top first.
    #[cfg(test)]
    pub fn stacked(cards: Vec<Party>) -> Self {
        Self {
            deck: cards.into(),
            discard: vec![],
        }
    }

    /// Draws the top card, shuffling the discard pile under the draw pile first if it is empty.
    pub fn draw_one(&mut self, rng: &mut impl Rng) -> Option<Party> {
        if self.deck.is_empty() {
            self.reshuffle(rng);
        }
        self.deck.pop_front()
    }

    /// Draws the top three cards from the deck.
    pub fn draw_three(&mut self, rng: &mut impl Rng) -> Option<[Party; 3]> {
        Some([self.draw_one(rng)?, self.draw_one(rng)?, self.draw_one(rng)?])
    }

    /// Places cards on the discard pile. The pile is only shuffled when it is drawn from.
    pub fn discard(&mut self, cards: impl IntoIterator<Item = Party>) {
        self.discard.extend(cards);
    }

    /// The number of cards in the draw pile.
    pub fn count(&self) -> usize {
        self.deck.len()
    }

    /// The number of cards in the discard pile.
    pub fn discard_count(&self) -> usize {
        self.discard.len()
    }

    fn reshuffle(&mut self, rng: &mut impl Rng) {
        log::info!("Reshuffling {} discarded policies into the deck", self.discard.len());
        self.discard.shuffle(rng);
        self.deck.extend(self.discard.drain(..));
    }
}
