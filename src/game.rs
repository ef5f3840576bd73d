use self::board::Board;
use self::deck::Deck;
use self::government::Government;
use self::legislative::LegislativeSessionTurn;
pub use self::message::{ClientMessage, Envelope, PlayerChoice, Recipient, ServerMessage, Vote};
pub use self::party::Party;
pub use self::player::{Role, SessionId, MAX_PLAYERS, MIN_PLAYERS};
use self::registry::PlayerRegistry;
pub use self::snapshot::{PublicPlayer, Snapshot};
use self::succession::Succession;
use self::victory::WinCondition;
use self::votes::Votes;
use crate::error::GameError;
use rand::SeedableRng;
use serde::Serialize;

mod board;
mod deck;
mod election;
mod executive;
mod government;
mod legislative;
mod lobby;
mod message;
mod party;
mod player;
mod registry;
mod snapshot;
mod succession;
mod test;
mod victory;
mod votes;

/// A single match of Secret Hitler, from the lobby through to game over.
///
/// The game never blocks and never reads a clock. Anything it wants to tell clients is queued as
/// an [Envelope], and any transition that should happen after a delay is requested as a
/// [Scheduled] timer; both are collected with [Game::take_effects].
#[derive(Clone, Debug)]
pub struct Game {
    players: PlayerRegistry,
    succession: Succession,
    board: Board,
    deck: Deck,
    state: GameState,
    president_candidate: Option<SessionId>,
    last_government: Option<Government>,
    pending_timer: Option<Scheduled>,
    next_timer_id: u64,
    outbox: Vec<Envelope>,
    scheduled: Vec<Scheduled>,
    rng: rand_chacha::ChaCha8Rng,
}

/// Represents the current phase in the game loop.
#[derive(Clone, Debug)]
enum GameState {
    Lobby,
    /// The game has started; roles are about to be dealt.
    Setup,
    /// Waiting to announce the next presidential candidate.
    Election,
    SelectingChancellor {
        president: SessionId,
    },
    Voting {
        president: SessionId,
        chancellor: SessionId,
        votes: Votes,
    },
    VotingResults {
        passed: bool,
    },
    LegislativeSession {
        president: SessionId,
        chancellor: SessionId,
        turn: LegislativeSessionTurn,
    },
    Assassination {
        president: SessionId,
    },
    /// The match is over; `None` if it ended without a winner.
    GameOver(Option<WinCondition>),
}

/// The externally visible phase of the game.
#[derive(Clone, Copy, Serialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Lobby,
    Setup,
    Election,
    SelectingChancellor,
    Voting,
    VotingResults,
    PresidentPolicy,
    ChancellorPolicy,
    Assassination,
    GameOver,
}

/// A delayed transition requested by the game.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Timer {
    /// Deal roles once clients have seen that the game started.
    AssignRoles,
    /// Announce the next presidential candidate.
    NextPresident,
    /// Deal policies to a newly elected government.
    LegislativeSession,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TimerId(u64);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Scheduled {
    pub id: TimerId,
    pub timer: Timer,
}

/// Everything the game has asked for since the effects were last taken.
#[derive(Debug, Default)]
pub struct Effects {
    pub messages: Vec<Envelope>,
    pub timers: Vec<Scheduled>,
}

impl Game {
    /// Creates a new, empty lobby.
    pub fn new(seed: u64) -> Self {
        Self {
            players: PlayerRegistry::default(),
            succession: Succession::default(),
            board: Board::new(),
            deck: Deck::default(),
            state: GameState::Lobby,
            president_candidate: None,
            last_government: None,
            pending_timer: None,
            next_timer_id: 0,
            outbox: vec![],
            scheduled: vec![],
            rng: rand_chacha::ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Performs an action on behalf of a player.
    pub fn handle_message(&mut self, player: &SessionId, message: ClientMessage) -> Result<(), GameError> {
        match message {
            ClientMessage::ToggleReady => self.toggle_ready(player),
            ClientMessage::StartGame => self.start_game(player),
            ClientMessage::ChancellorSelected { chancellor_id } => self.choose_chancellor(player, &chancellor_id),
            ClientMessage::CastVote { vote } => self.cast_vote(player, vote),
            ClientMessage::PresidentDiscardPolicy { policy } => self.discard_policy(player, policy),
            ClientMessage::ChancellorPlayPolicy { policy } => self.play_policy(player, policy),
            ClientMessage::PresidentAssassinatePlayer { target_id } => self.assassinate_player(player, &target_id),
        }
    }

    /// Called when a previously scheduled timer elapses.
    ///
    /// Timers that have been superseded, or that fire after the game is over, are ignored.
    pub fn fire(&mut self, id: TimerId) -> Result<(), GameError> {
        match self.pending_timer {
            Some(pending) if pending.id == id && !self.game_over() => {
                self.pending_timer = None;
                match pending.timer {
                    Timer::AssignRoles => self.deal_roles(),
                    Timer::NextPresident => self.start_election(),
                    Timer::LegislativeSession => self.start_legislative_session(),
                }
            }
            _ => Ok(()),
        }
    }

    /// Takes the messages and timers queued since the last call.
    pub fn take_effects(&mut self) -> Effects {
        Effects {
            messages: std::mem::take(&mut self.outbox),
            timers: std::mem::take(&mut self.scheduled),
        }
    }

    /// The timer the game is currently waiting on, if any.
    pub fn pending_timer(&self) -> Option<Scheduled> {
        self.pending_timer
    }

    /// Gets the current phase of the game.
    pub fn phase(&self) -> Phase {
        use LegislativeSessionTurn::*;
        match &self.state {
            GameState::Lobby => Phase::Lobby,
            GameState::Setup => Phase::Setup,
            GameState::Election => Phase::Election,
            GameState::SelectingChancellor { .. } => Phase::SelectingChancellor,
            GameState::Voting { .. } => Phase::Voting,
            GameState::VotingResults { .. } => Phase::VotingResults,
            GameState::LegislativeSession { turn: President { .. }, .. } => Phase::PresidentPolicy,
            GameState::LegislativeSession { turn: Chancellor { .. }, .. } => Phase::ChancellorPolicy,
            GameState::Assassination { .. } => Phase::Assassination,
            GameState::GameOver(_) => Phase::GameOver,
        }
    }

    /// Returns true if the game is over.
    pub fn game_over(&self) -> bool {
        matches!(self.state, GameState::GameOver(_))
    }

    /// The party that won, once the game is over.
    pub fn winner(&self) -> Option<Party> {
        match self.state {
            GameState::GameOver(Some(outcome)) => Some(outcome.winner()),
            _ => None,
        }
    }

    /// Whether the game has left the lobby.
    pub fn started(&self) -> bool {
        !matches!(self.state, GameState::Lobby)
    }

    /// Gets the number of players in the game.
    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    pub fn is_connected(&self, player: &SessionId) -> bool {
        self.players.get(player).is_some_and(|p| p.connected)
    }

    pub fn contains_player(&self, player: &SessionId) -> bool {
        self.players.contains(player)
    }

    /// The current presidential candidate.
    #[cfg(test)]
    pub fn president_candidate(&self) -> Option<&SessionId> {
        self.president_candidate.as_ref()
    }

    /// Queues a message for every client.
    fn broadcast(&mut self, message: ServerMessage) {
        self.outbox.push(Envelope { to: Recipient::All, message });
    }

    /// Queues a message for a single client.
    fn send(&mut self, player: &SessionId, message: ServerMessage) {
        self.outbox.push(Envelope {
            to: Recipient::Player(player.clone()),
            message,
        });
    }

    /// Requests a delayed transition, superseding any timer already pending.
    fn schedule(&mut self, timer: Timer) {
        let scheduled = Scheduled {
            id: TimerId(self.next_timer_id),
            timer,
        };
        self.next_timer_id += 1;
        self.pending_timer = Some(scheduled);
        self.scheduled.push(scheduled);
    }

    /// Moves the presidential candidacy to the next eligible seat and schedules the next election.
    fn next_round(&mut self) {
        self.state = GameState::Election;
        match self.next_president() {
            Some(candidate) => {
                log::info!("Next president candidate: {}", self.players.nickname(&candidate));
                self.president_candidate = Some(candidate);
                self.schedule(Timer::NextPresident);
            }
            None => self.abort(GameError::NoEligiblePresident),
        }
    }

    /// Finds the next eligible president after the current candidate.
    fn next_president(&self) -> Option<SessionId> {
        self.succession
            .select_next(self.president_candidate.as_ref(), |id| self.players.is_active(id))
            .cloned()
    }

    /// Players eligible to be chosen by `chooser`: everyone still in the game except themselves.
    fn choices_for(&self, chooser: &SessionId) -> Vec<PlayerChoice> {
        self.players
            .active()
            .filter(|p| &p.id != chooser)
            .map(|p| PlayerChoice {
                session_id: p.id.clone(),
                nickname: p.nickname.clone(),
            })
            .collect()
    }

    /// Ends the match without a winner after reaching a state the rules cannot continue from.
    fn abort(&mut self, reason: GameError) {
        log::error!("Ending game without a winner: {}", reason);
        self.state = GameState::GameOver(None);
        self.pending_timer = None;
    }

    /// Counts every policy card: draw pile, discard pile, board and hands.
    #[cfg(test)]
    fn card_total(&self) -> usize {
        let in_hand = match &self.state {
            GameState::LegislativeSession { turn, .. } => turn.cards().len(),
            _ => 0,
        };
        self.deck.count() + self.deck.discard_count() + self.board.enacted() + in_hand
    }
}
