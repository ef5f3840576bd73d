use crate::{
    error::GameError,
    game::{ClientMessage, ServerMessage, SessionId, Snapshot},
    session::{lock, SessionHandle, SessionManager},
};
use tokio::sync::mpsc;

/// A single websocket client, seated as one player in one room.
pub struct Client<'a> {
    manager: &'a SessionManager,
    session: Option<SessionHandle>,
    player: Option<SessionId>,
    sender: mpsc::UnboundedSender<ServerMessage>,
    updates: mpsc::UnboundedReceiver<ServerMessage>,
}

impl<'a> Client<'a> {
    /// Creates a new game client.
    pub fn new(manager: &'a SessionManager) -> Self {
        let (sender, updates) = mpsc::unbounded_channel();
        Self {
            manager,
            session: None,
            player: None,
            sender,
            updates,
        }
    }

    /// Joins a room, creating it first if no room ID is given.
    /// Returns the room ID and the session key the client should use to reconnect.
    pub fn join(
        &mut self,
        room_id: Option<&str>,
        session_id: Option<&str>,
        nickname: Option<&str>,
    ) -> Result<(String, SessionId), GameError> {
        if self.session.is_some() {
            return Err(GameError::PlayerAlreadyJoined);
        }
        let session = match room_id {
            Some(room_id) => self.manager.find_game(room_id)?,
            None => self.manager.create_game(),
        };
        let (room_id, player) = {
            let mut session = lock(&session);
            let player = session.join(session_id.map(SessionId::from), nickname, self.sender.clone())?;
            (session.id().to_owned(), player)
        };
        self.player = Some(player.clone());
        self.session = Some(session);
        Ok((room_id, player))
    }

    /// Forwards a game message from this client's player.
    pub fn handle_message(&mut self, message: ClientMessage) -> Result<(), GameError> {
        let (Some(session), Some(player)) = (&self.session, &self.player) else {
            return Err(GameError::PlayerNotFound);
        };
        lock(session).handle_message(player, message)
    }

    /// Gets the public state of the room.
    pub fn get_state(&self) -> Result<Snapshot, GameError> {
        let session = self.session.as_ref().ok_or(GameError::GameNotFound)?;
        Ok(lock(session).snapshot())
    }

    /// Gives up the client's seat, or starts the grace period if the leave was not intended.
    pub fn leave(&mut self, consented: bool) {
        let (Some(session), Some(player)) = (self.session.take(), self.player.take()) else {
            return;
        };
        let result = lock(&session).leave(&player, consented);
        if let Err(err) = result {
            log::warn!("Could not remove {} from the game: {}", player, err);
        }
    }

    /// Waits for the next message addressed to this client.
    pub async fn next_message(&mut self) -> Option<ServerMessage> {
        self.updates.recv().await
    }
}
