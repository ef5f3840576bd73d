use super::party::Party;
use super::player::SessionId;
use super::{Game, GameState, ServerMessage};
use crate::error::GameError;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LegislativeSessionTurn {
    /// President must discard a card.
    President { cards: [Party; 3] },
    /// Chancellor must choose a card to enact.
    Chancellor { cards: [Party; 2] },
}

impl LegislativeSessionTurn {
    /// The cards currently in hand.
    pub fn cards(&self) -> &[Party] {
        match self {
            LegislativeSessionTurn::President { cards } => cards,
            LegislativeSessionTurn::Chancellor { cards } => cards,
        }
    }
}

impl Game {
    /// Deals three policies to the newly elected president.
    pub(super) fn start_legislative_session(&mut self) -> Result<(), GameError> {
        let GameState::VotingResults { passed: true } = self.state else {
            return Err(GameError::InvalidAction);
        };
        let Some(government) = self.last_government.clone() else {
            return Err(GameError::InvalidAction);
        };
        if !self.players.is_active(&government.president) || !self.players.is_active(&government.chancellor) {
            log::warn!("Elected government is no longer seated");
            self.next_round();
            return Ok(());
        }
        let Some(cards) = self.deck.draw_three(&mut self.rng) else {
            log::error!("Not enough policies left to deal to the president");
            self.abort(GameError::DeckExhausted);
            return Err(GameError::DeckExhausted);
        };

        log::info!("President {} drew 3 policies", self.players.nickname(&government.president));
        self.send(
            &government.president,
            ServerMessage::PresidentDrawPolicies { policies: cards.to_vec() },
        );
        self.state = GameState::LegislativeSession {
            president: government.president,
            chancellor: government.chancellor,
            turn: LegislativeSessionTurn::President { cards },
        };
        Ok(())
    }

    /// Called when the president discards one of their three policies.
    /// The other two are passed to the chancellor.
    pub fn discard_policy(&mut self, player: &SessionId, policy: Party) -> Result<(), GameError> {
        let GameState::LegislativeSession { president, chancellor, turn } = &mut self.state else {
            return Err(GameError::InvalidAction);
        };
        let LegislativeSessionTurn::President { cards } = *turn else {
            return Err(GameError::InvalidAction);
        };
        if president != player {
            return Err(GameError::NotPresident);
        }
        let remaining = match cards.iter().position(|c| *c == policy) {
            Some(0) => [cards[1], cards[2]],
            Some(1) => [cards[0], cards[2]],
            Some(2) => [cards[0], cards[1]],
            _ => return Err(GameError::InvalidCard),
        };

        *turn = LegislativeSessionTurn::Chancellor { cards: remaining };
        let chancellor = chancellor.clone();
        self.deck.discard([policy]);
        log::info!("President {} discarded a policy", self.players.nickname(player));
        self.send(
            &chancellor,
            ServerMessage::ChancellorSelectPolicy { policies: remaining.to_vec() },
        );
        Ok(())
    }

    /// Called when the chancellor enacts one of their two policies. The other is discarded.
    pub fn play_policy(&mut self, player: &SessionId, policy: Party) -> Result<(), GameError> {
        let GameState::LegislativeSession { president, chancellor, turn } = &self.state else {
            return Err(GameError::InvalidAction);
        };
        let LegislativeSessionTurn::Chancellor { cards } = *turn else {
            return Err(GameError::InvalidAction);
        };
        if chancellor != player {
            return Err(GameError::NotChancellor);
        }
        let discarded = match cards.iter().position(|c| *c == policy) {
            Some(0) => cards[1],
            Some(1) => cards[0],
            _ => return Err(GameError::InvalidCard),
        };

        let president = president.clone();
        self.deck.discard([discarded]);
        self.board.play_card(policy);
        log::info!("Chancellor {} played a {} policy", self.players.nickname(player), policy);
        self.broadcast(ServerMessage::PolicyPlayed {
            policy_type: policy,
            liberal_policies: self.board.liberal_cards,
            fascist_policies: self.board.fascist_cards,
        });
        self.state = GameState::Election;

        if self.check_game_over(Some(policy)) {
            return Ok(());
        }
        match self.board.get_executive_power(policy) {
            Some(action) => self.start_executive_action(action, president),
            None => self.next_round(),
        }
        Ok(())
    }
}
