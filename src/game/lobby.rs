use super::deck::Deck;
use super::legislative::LegislativeSessionTurn;
use super::player::{assign_roles, SessionId, MAX_PLAYERS, MIN_PLAYERS};
use super::succession::Succession;
use super::{Game, GameState, ServerMessage, Timer};
use crate::error::GameError;

impl Game {
    /// Seats a new player in the lobby. The first player to join becomes the creator.
    pub fn join(&mut self, player: SessionId, nickname: Option<&str>) -> Result<(), GameError> {
        if self.started() {
            return Err(GameError::CannotJoinStartedGame);
        }
        let nickname = self.players.add(player.clone(), nickname)?.nickname.clone();
        log::info!("{} joined as {}", player, nickname);
        if self.players.is_creator(&player) {
            log::info!("{} is now the room creator", nickname);
        }
        self.send_room_joined(&player);
        Ok(())
    }

    /// Called when a player's connection drops.
    ///
    /// A consented leave gives up the seat straight away. Otherwise the seat is kept, marked as
    /// disconnected, until the player reconnects or [Game::remove_player] is called.
    pub fn leave(&mut self, player: &SessionId, consented: bool) -> Result<(), GameError> {
        if consented {
            return self.remove_player(player);
        }
        self.players.set_connected(player, false)?;
        log::info!("{} disconnected", self.players.nickname(player));
        Ok(())
    }

    /// Restores a disconnected player's seat and resends what they need to carry on playing.
    pub fn reconnect(&mut self, player: &SessionId) -> Result<(), GameError> {
        self.players.set_connected(player, true)?;
        log::info!("{} reconnected", self.players.nickname(player));
        self.resync(player);
        Ok(())
    }

    /// Permanently removes a player.
    ///
    /// Their seat in the presidential rotation is kept but never selected again. If the game was
    /// waiting on them, the round is abandoned.
    pub fn remove_player(&mut self, player: &SessionId) -> Result<(), GameError> {
        let new_creator = self.players.remove(player)?;
        log::info!("{} left the game", player);
        if let Some(creator) = new_creator {
            log::info!("New creator: {}", self.players.nickname(&creator));
            self.send(&creator, ServerMessage::YouAreCreator);
        }
        self.handle_departure(player);
        Ok(())
    }

    /// Called when a player toggles whether they are ready to start.
    pub fn toggle_ready(&mut self, player: &SessionId) -> Result<(), GameError> {
        if self.started() {
            return Err(GameError::InvalidAction);
        }
        let ready = self.players.toggle_ready(player)?;
        log::info!(
            "{} is now {}",
            self.players.nickname(player),
            if ready { "ready" } else { "not ready" }
        );
        if self.players.all_ready() {
            if let Some(creator) = self.players.creator().cloned() {
                self.send(&creator, ServerMessage::AllPlayersReady);
            }
        }
        Ok(())
    }

    /// Called when the creator starts the game.
    pub fn start_game(&mut self, player: &SessionId) -> Result<(), GameError> {
        if self.started() {
            return Err(GameError::InvalidAction);
        }
        if !self.players.is_creator(player) {
            return Err(GameError::NotCreator);
        }
        if self.num_players() < MIN_PLAYERS {
            return Err(GameError::TooFewPlayers);
        }
        if self.num_players() > MAX_PLAYERS {
            return Err(GameError::TooManyPlayers);
        }
        if !self.players.everyone_ready() {
            return Err(GameError::PlayersNotReady);
        }

        log::info!("Game started by creator with {} players", self.num_players());
        self.state = GameState::Setup;
        self.broadcast(ServerMessage::GameStarted);
        self.schedule(Timer::AssignRoles);
        Ok(())
    }

    /// Deals roles, fixes the seating order and shuffles the policy deck.
    pub(super) fn deal_roles(&mut self) -> Result<(), GameError> {
        let roles = match assign_roles(self.num_players(), &mut self.rng) {
            Ok(roles) => roles,
            Err(err) => {
                // Players left between starting the game and dealing roles
                log::warn!("Returning to the lobby: {}", err);
                self.state = GameState::Lobby;
                for player in self.players.ids() {
                    self.send_room_joined(&player);
                }
                return Err(err);
            }
        };
        self.players.assign_roles(roles);

        for player in self.players.ids() {
            let Some(role) = self.players.get(&player).and_then(|p| p.role) else {
                continue;
            };
            log::debug!("Sending role {} to {}", role, player);
            self.send(&player, ServerMessage::YourRole { role });
        }

        self.succession = Succession::new(self.players.ids());
        self.deck = Deck::new(&mut self.rng);
        log::info!("Roles assigned; policy deck initialised with {} policies", self.deck.count());

        self.next_round();
        Ok(())
    }

    /// Sends a reconnecting player their seat, their role and any decision that is waiting on them.
    fn resync(&mut self, player: &SessionId) {
        self.send_room_joined(player);
        if let Some(role) = self.players.get(player).and_then(|p| p.role) {
            self.send(player, ServerMessage::YourRole { role });
        }

        let prompt = match &self.state {
            GameState::Voting { president, chancellor, votes }
                if !votes.has_cast(player) && self.players.is_active(player) =>
            {
                Some(ServerMessage::StartVote {
                    president_candidate_id: president.clone(),
                    president_candidate_nickname: self.players.nickname(president).to_owned(),
                    chancellor_candidate_id: chancellor.clone(),
                    chancellor_candidate_nickname: self.players.nickname(chancellor).to_owned(),
                })
            }
            GameState::SelectingChancellor { president } if president == player => Some(ServerMessage::SelectChancellor {
                players: self.choices_for(player),
            }),
            GameState::LegislativeSession { president, chancellor, turn } => match turn {
                LegislativeSessionTurn::President { cards } if president == player => {
                    Some(ServerMessage::PresidentDrawPolicies { policies: cards.to_vec() })
                }
                LegislativeSessionTurn::Chancellor { cards } if chancellor == player => {
                    Some(ServerMessage::ChancellorSelectPolicy { policies: cards.to_vec() })
                }
                _ => None,
            },
            GameState::Assassination { president } if president == player => Some(ServerMessage::StartAssassination {
                targets: self.choices_for(player),
            }),
            _ => None,
        };
        if let Some(prompt) = prompt {
            self.send(player, prompt);
        }
    }

    fn send_room_joined(&mut self, player: &SessionId) {
        let message = ServerMessage::RoomJoined {
            is_creator: self.players.is_creator(player),
            game_started: self.started(),
        };
        self.send(player, message);
    }

    /// Keeps the game moving after a player has been permanently removed.
    fn handle_departure(&mut self, player: &SessionId) {
        let waiting_on_player = match &self.state {
            GameState::SelectingChancellor { president } => president == player,
            // A candidate on the ballot cannot take office
            GameState::Voting { president, chancellor, .. } => president == player || chancellor == player,
            GameState::LegislativeSession { president, chancellor, turn } => match turn {
                LegislativeSessionTurn::President { .. } => president == player,
                LegislativeSessionTurn::Chancellor { .. } => chancellor == player,
            },
            GameState::Assassination { president } => president == player,
            _ => false,
        };
        if waiting_on_player {
            self.abandon_round();
        } else {
            // The departed player no longer counts towards the electorate
            self.end_voting_if_complete();
        }
    }

    /// Gives up on the current round, returning any cards in hand to the discard pile.
    fn abandon_round(&mut self) {
        log::warn!("Abandoning the round; the player it was waiting on has left");
        if let GameState::LegislativeSession { turn, .. } = &self.state {
            let cards = turn.cards().to_vec();
            self.deck.discard(cards);
        }
        self.next_round();
    }
}
