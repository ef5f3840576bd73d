use super::player::SessionId;
use super::{Game, GameState, Phase};
use serde::Serialize;

/// The public view of a match. Contains no roles and no cards in hand.
#[derive(Clone, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub phase: Phase,
    pub creator_id: Option<SessionId>,
    pub president_candidate_id: Option<SessionId>,
    pub president_id: Option<SessionId>,
    pub chancellor_id: Option<SessionId>,
    pub players: Vec<PublicPlayer>,
    pub liberal_policies: usize,
    pub fascist_policies: usize,
    pub draw_pile: usize,
    pub discard_pile: usize,
}

#[derive(Clone, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PublicPlayer {
    pub session_id: SessionId,
    pub nickname: String,
    pub connected: bool,
    pub ready: bool,
    pub eliminated: bool,
}

impl Game {
    pub fn snapshot(&self) -> Snapshot {
        let (president, chancellor) = match &self.state {
            GameState::Voting { president, chancellor, .. }
            | GameState::LegislativeSession { president, chancellor, .. } => {
                (Some(president.clone()), Some(chancellor.clone()))
            }
            _ => match &self.last_government {
                Some(government) => (Some(government.president.clone()), Some(government.chancellor.clone())),
                None => (None, None),
            },
        };

        Snapshot {
            phase: self.phase(),
            creator_id: self.players.creator().cloned(),
            president_candidate_id: self.president_candidate.clone(),
            president_id: president,
            chancellor_id: chancellor,
            players: self
                .players
                .iter()
                .map(|p| PublicPlayer {
                    session_id: p.id.clone(),
                    nickname: p.nickname.clone(),
                    connected: p.connected,
                    ready: p.ready,
                    eliminated: p.eliminated,
                })
                .collect(),
            liberal_policies: self.board.liberal_cards,
            fascist_policies: self.board.fascist_cards,
            draw_pile: self.deck.count(),
            discard_pile: self.deck.discard_count(),
        }
    }
}
