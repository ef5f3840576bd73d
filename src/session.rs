use crate::config::Timings;
use crate::error::GameError;
use crate::game::{ClientMessage, Game, Recipient, Scheduled, ServerMessage, SessionId, Snapshot, TimerId};
use dashmap::{mapref::entry::Entry, DashMap};
use rand::distributions::Alphanumeric;
use rand::{Rng, RngCore};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Manages all the game sessions running on the server.
pub struct SessionManager {
    sessions: Arc<Rooms>,
    timings: Timings,
}

/// A single match, together with the clients connected to it and its outstanding timers.
pub struct Session {
    /// The room ID.
    id: String,
    game: Game,
    /// Outbound channels, one per connected player.
    clients: HashMap<SessionId, ClientSender>,
    timings: Timings,
    /// Tasks waiting to fire a scheduled game timer.
    timers: Vec<JoinHandle<()>>,
    /// Tasks waiting to remove a disconnected player.
    grace: HashMap<SessionId, JoinHandle<()>>,
    this: Weak<Mutex<Session>>,
    /// The rooms this session is listed in, so it can dispose of itself once abandoned.
    rooms: Weak<Rooms>,
}

pub type SessionHandle = Arc<Mutex<Session>>;

type Rooms = DashMap<String, SessionHandle>;

pub type ClientSender = mpsc::UnboundedSender<ServerMessage>;

impl SessionManager {
    pub fn new(timings: Timings) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            timings,
        }
    }

    /// Creates a new, empty room under a fresh room ID.
    pub fn create_game(&self) -> SessionHandle {
        loop {
            let id = Self::random_id();
            let entry = self.sessions.entry(id);
            if let Entry::Occupied(_) = entry {
                continue;
            }
            let session = Session::new(entry.key().clone(), self.timings, Arc::downgrade(&self.sessions));
            entry.or_insert(session.clone());
            log::info!("Created room {}", lock(&session).id());
            break session;
        }
    }

    pub fn find_game(&self, game_id: &str) -> Result<SessionHandle, GameError> {
        self.sessions
            .get(game_id)
            .map(|session| session.clone())
            .ok_or(GameError::GameNotFound)
    }

    pub fn num_games(&self) -> usize {
        self.sessions.len()
    }

    /// Disposes of rooms that have emptied or whose game has ended with nobody left connected.
    pub fn purge_games(&self) {
        self.sessions.retain(|id, session| {
            let session = lock(session);
            let keep = !session.is_abandoned();
            if !keep {
                log::info!("Disposing of room {}", id);
            }
            keep
        });
    }

    fn random_id() -> String {
        let mut rng = rand::thread_rng();
        (0..4)
            .map(|_| match rng.gen_range('A'..='Z') {
                // Avoid U and V because the "hitler font" can't distinguish them
                'U' => 'A',
                'V' => 'B',
                other => other,
            })
            .collect()
    }
}

/// Removes a room from the server if nobody is left to play in it.
fn dispose_if_abandoned(rooms: &Weak<Rooms>, id: &str) {
    let Some(rooms) = rooms.upgrade() else {
        return;
    };
    if rooms.remove_if(id, |_, session| lock(session).is_abandoned()).is_some() {
        log::info!("Disposing of room {}", id);
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(Timings::default())
    }
}

/// Locks a session, recovering it if a previous holder panicked.
pub fn lock(session: &SessionHandle) -> MutexGuard<'_, Session> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Session {
    fn new(id: String, timings: Timings, rooms: Weak<Rooms>) -> SessionHandle {
        let seed = rand::thread_rng().next_u64();
        Arc::new_cyclic(|this| {
            Mutex::new(Self {
                id,
                game: Game::new(seed),
                clients: HashMap::new(),
                timings,
                timers: vec![],
                grace: HashMap::new(),
                this: this.clone(),
                rooms,
            })
        })
    }

    /// Gets the unique room ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Seats a client in the room, or restores their seat if they are reconnecting.
    ///
    /// A `session_id` belonging to a disconnected player reconnects that player; any other value
    /// is ignored and a fresh session key is issued.
    pub fn join(
        &mut self,
        session_id: Option<SessionId>,
        nickname: Option<&str>,
        client: ClientSender,
    ) -> Result<SessionId, GameError> {
        if let Some(player) = session_id.filter(|id| self.game.contains_player(id)) {
            if self.game.is_connected(&player) {
                return Err(GameError::PlayerAlreadyJoined);
            }
            if let Some(task) = self.grace.remove(&player) {
                task.abort();
            }
            self.game.reconnect(&player)?;
            self.clients.insert(player.clone(), client);
            self.flush();
            return Ok(player);
        }

        let player = random_session_id();
        self.game.join(player.clone(), nickname)?;
        self.clients.insert(player.clone(), client);
        self.flush();
        Ok(player)
    }

    /// Performs an action on behalf of a player. Rejected actions are logged and otherwise ignored.
    pub fn handle_message(&mut self, player: &SessionId, message: ClientMessage) -> Result<(), GameError> {
        let result = self.game.handle_message(player, message);
        if let Err(err) = &result {
            log::warn!("Rejected message from {} in room {}: {}", player, self.id, err);
        }
        self.flush();
        result
    }

    /// Called when a player's connection ends.
    ///
    /// A consented leave frees the seat at once. Otherwise the seat is held for the reconnection
    /// grace period before the player is removed.
    pub fn leave(&mut self, player: &SessionId, consented: bool) -> Result<(), GameError> {
        self.clients.remove(player);
        if consented {
            if let Some(task) = self.grace.remove(player) {
                task.abort();
            }
            self.game.remove_player(player)?;
        } else {
            self.game.leave(player, false)?;
            self.start_grace_period(player.clone());
        }
        self.flush();
        Ok(())
    }

    /// The public view of the match.
    pub fn snapshot(&self) -> Snapshot {
        self.game.snapshot()
    }

    /// Whether nobody is left to play in this room.
    fn is_abandoned(&self) -> bool {
        self.game.num_players() == 0 || (self.game.game_over() && self.clients.is_empty())
    }

    fn start_grace_period(&mut self, player: SessionId) {
        let delay = self.timings.reconnect_grace;
        let this = self.this.clone();
        let rooms = self.rooms.clone();
        let room_id = self.id.clone();
        let id = player.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(session) = this.upgrade() else {
                return;
            };
            lock(&session).end_grace_period(&id);
            dispose_if_abandoned(&rooms, &room_id);
        });
        if let Some(previous) = self.grace.insert(player, task) {
            previous.abort();
        }
    }

    fn end_grace_period(&mut self, player: &SessionId) {
        self.grace.remove(player);
        if !self.game.contains_player(player) || self.game.is_connected(player) {
            return;
        }
        log::info!("{} did not reconnect to room {} in time", player, self.id);
        if let Err(err) = self.game.remove_player(player) {
            log::warn!("Could not remove {} from room {}: {}", player, self.id, err);
        }
        self.flush();
    }

    fn fire(&mut self, id: TimerId) {
        if let Err(err) = self.game.fire(id) {
            log::error!("Timer failed in room {}: {}", self.id, err);
        }
        self.flush();
    }

    /// Delivers queued messages to the connected clients and starts any requested timers.
    fn flush(&mut self) {
        let effects = self.game.take_effects();
        for envelope in effects.messages {
            match envelope.to {
                Recipient::All => {
                    for client in self.clients.values() {
                        client.send(envelope.message.clone()).ok();
                    }
                }
                Recipient::Player(player) => {
                    if let Some(client) = self.clients.get(&player) {
                        client.send(envelope.message).ok();
                    }
                }
            }
        }

        if self.game.game_over() {
            if !self.timers.is_empty() {
                log::info!("Room {} finished; winner: {:?}", self.id, self.game.winner());
            }
            self.cancel_timers();
            return;
        }
        self.timers.retain(|task| !task.is_finished());
        for scheduled in effects.timers {
            self.schedule(scheduled);
        }
    }

    fn schedule(&mut self, scheduled: Scheduled) {
        let delay = self.timings.delay(scheduled.timer);
        let this = self.this.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(session) = this.upgrade() else {
                return;
            };
            lock(&session).fire(scheduled.id);
        });
        self.timers.push(task);
    }

    fn cancel_timers(&mut self) {
        for task in self.timers.drain(..) {
            task.abort();
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.cancel_timers();
        for (_, task) in self.grace.drain() {
            task.abort();
        }
    }
}

fn random_session_id() -> SessionId {
    let id = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(12)
        .map(char::from)
        .collect::<String>();
    SessionId::new(id)
}
