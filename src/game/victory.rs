use super::party::Party;
use super::player::Role;
use super::{Game, GameState, ServerMessage};

/// The ways a match can be won.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum WinCondition {
    /// Hitler was assassinated
    HitlerAssassinated,
    /// Hitler, as chancellor, enacted the fourth fascist policy
    HitlerChancellor,
    /// The liberals completed their policy track.
    LiberalPolicyTrack,
    /// The fascists completed their policy track.
    FascistPolicyTrack,
}

impl WinCondition {
    pub fn winner(self) -> Party {
        match self {
            WinCondition::HitlerAssassinated | WinCondition::LiberalPolicyTrack => Party::Liberal,
            WinCondition::HitlerChancellor | WinCondition::FascistPolicyTrack => Party::Fascist,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            WinCondition::HitlerAssassinated => "Liberals win! Hitler was assassinated!",
            WinCondition::HitlerChancellor => "Fascists win! Hitler as Chancellor enacted the 4th Fascist Policy!",
            WinCondition::LiberalPolicyTrack => "Liberals win! 5 Liberal Policies enacted!",
            WinCondition::FascistPolicyTrack => "Fascists win! 6 Fascist Policies enacted!",
        }
    }
}

impl Game {
    /// Evaluates the win conditions, in priority order, ending the game on the first that holds.
    ///
    /// `enacted` is the policy that was just enacted, if the check follows an enactment. The
    /// Hitler-as-chancellor condition only applies at the moment the fourth fascist policy lands.
    pub(super) fn check_game_over(&mut self, enacted: Option<Party>) -> bool {
        let Some(outcome) = self.evaluate_win_conditions(enacted) else {
            log::info!("No win conditions met");
            return false;
        };
        log::info!("Game over! {}", outcome.message());
        self.state = GameState::GameOver(Some(outcome));
        self.pending_timer = None;
        self.broadcast(ServerMessage::GameOver {
            winner: outcome.winner(),
            message: outcome.message().to_string(),
        });
        true
    }

    fn evaluate_win_conditions(&self, enacted: Option<Party>) -> Option<WinCondition> {
        if self.players.hitler().is_some_and(|hitler| hitler.eliminated) {
            return Some(WinCondition::HitlerAssassinated);
        }

        let hitler_is_chancellor = self
            .last_government
            .as_ref()
            .and_then(|government| self.players.get(&government.chancellor))
            .is_some_and(|chancellor| chancellor.role == Some(Role::Hitler));
        if enacted == Some(Party::Fascist) && self.board.fascist_cards == 4 && hitler_is_chancellor {
            return Some(WinCondition::HitlerChancellor);
        }

        match self.board.check_tracks()? {
            Party::Liberal => Some(WinCondition::LiberalPolicyTrack),
            Party::Fascist => Some(WinCondition::FascistPolicyTrack),
        }
    }
}
