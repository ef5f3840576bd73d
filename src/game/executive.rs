use super::player::SessionId;
use super::{Game, GameState, ServerMessage};
use crate::error::GameError;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ExecutiveAction {
    /// The president must eliminate a player.
    Assassination,
}

impl Game {
    /// Hands the sitting president an executive power.
    pub(super) fn start_executive_action(&mut self, action: ExecutiveAction, president: SessionId) {
        match action {
            ExecutiveAction::Assassination => {
                log::info!(
                    "President {} is selecting a player to assassinate",
                    self.players.nickname(&president)
                );
                let targets = self.choices_for(&president);
                self.send(&president, ServerMessage::StartAssassination { targets });
                self.state = GameState::Assassination { president };
            }
        }
    }

    /// Called when the president chooses a player to assassinate.
    pub fn assassinate_player(&mut self, player: &SessionId, target: &SessionId) -> Result<(), GameError> {
        let GameState::Assassination { president } = &self.state else {
            return Err(GameError::InvalidAction);
        };
        if president != player {
            return Err(GameError::NotPresident);
        }
        if target == president {
            return Err(GameError::InvalidPlayerChoice);
        }
        self.players.eliminate(target)?;

        let nickname = self.players.nickname(target).to_owned();
        log::info!("President {} assassinated {}", self.players.nickname(player), nickname);
        self.broadcast(ServerMessage::PlayerEliminated {
            eliminated_player_id: target.clone(),
            message: format!("{} was assassinated!", nickname),
        });
        self.state = GameState::Election;

        if !self.check_game_over(None) {
            self.next_round();
        }
        Ok(())
    }
}
