use super::player::{Player, Role, SessionId, MAX_PLAYERS};
use crate::error::GameError;

pub const MAX_NICKNAME_LEN: usize = 20;

/// The players seated in a match, in the order they joined.
///
/// The first player to join a match becomes its creator, the only player allowed to start the
/// game. If the creator leaves, the earliest-joined remaining player takes over.
#[derive(Clone, Debug, Default)]
pub struct PlayerRegistry {
    players: Vec<Player>,
    creator: Option<SessionId>,
}

impl PlayerRegistry {
    /// Seats a new player, designating them creator if the room was empty.
    pub fn add(&mut self, id: SessionId, nickname: Option<&str>) -> Result<&Player, GameError> {
        if self.contains(&id) {
            return Err(GameError::PlayerAlreadyJoined);
        }
        if self.players.len() == MAX_PLAYERS {
            return Err(GameError::TooManyPlayers);
        }
        if self.players.is_empty() {
            self.creator = Some(id.clone());
        }
        let nickname = sanitise_nickname(&id, nickname);
        self.players.push(Player::new(id, nickname));
        Ok(&self.players[self.players.len() - 1])
    }

    /// Removes a player. Returns the new creator if the creator role changed hands.
    pub fn remove(&mut self, id: &SessionId) -> Result<Option<SessionId>, GameError> {
        let idx = self.position(id).ok_or(GameError::PlayerNotFound)?;
        self.players.remove(idx);
        if self.creator.as_ref() != Some(id) {
            return Ok(None);
        }
        self.creator = self.players.first().map(|p| p.id.clone());
        Ok(self.creator.clone())
    }

    pub fn get(&self, id: &SessionId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    pub fn get_mut(&mut self, id: &SessionId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| &p.id == id)
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.position(id).is_some()
    }

    pub fn creator(&self) -> Option<&SessionId> {
        self.creator.as_ref()
    }

    pub fn is_creator(&self, id: &SessionId) -> bool {
        self.creator.as_ref() == Some(id)
    }

    /// Flips the ready flag of a player, returning the new value.
    pub fn toggle_ready(&mut self, id: &SessionId) -> Result<bool, GameError> {
        let player = self.get_mut(id).ok_or(GameError::PlayerNotFound)?;
        player.ready = !player.ready;
        Ok(player.ready)
    }

    #[cfg(test)]
    pub fn set_ready(&mut self, id: &SessionId, ready: bool) -> Result<(), GameError> {
        self.get_mut(id).ok_or(GameError::PlayerNotFound)?.ready = ready;
        Ok(())
    }

    pub fn set_connected(&mut self, id: &SessionId, connected: bool) -> Result<(), GameError> {
        self.get_mut(id).ok_or(GameError::PlayerNotFound)?.connected = connected;
        Ok(())
    }

    /// Returns `true` iff there is at least one connected, active player and all of them are ready.
    pub fn all_ready(&self) -> bool {
        let mut present = self.players.iter().filter(|p| p.connected && p.is_active()).peekable();
        present.peek().is_some() && present.all(|p| p.ready)
    }

    /// Returns `true` iff every seated player is both connected and ready.
    pub fn everyone_ready(&self) -> bool {
        self.players.iter().all(|p| p.connected && p.ready)
    }

    pub fn assign_roles(&mut self, roles: Vec<Role>) {
        for (player, role) in self.players.iter_mut().zip(roles) {
            player.role = Some(role);
        }
    }

    /// Marks a player as eliminated. Elimination is permanent.
    pub fn eliminate(&mut self, id: &SessionId) -> Result<(), GameError> {
        match self.get_mut(id) {
            Some(player) if player.is_active() => {
                player.eliminated = true;
                Ok(())
            }
            _ => Err(GameError::InvalidPlayerChoice),
        }
    }

    /// Whether the given player is seated and not eliminated.
    pub fn is_active(&self, id: &SessionId) -> bool {
        self.get(id).is_some_and(Player::is_active)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'_ Player> {
        self.players.iter()
    }

    /// Seated players that have not been eliminated.
    pub fn active(&self) -> impl Iterator<Item = &'_ Player> {
        self.players.iter().filter(|p| p.is_active())
    }

    pub fn ids(&self) -> Vec<SessionId> {
        self.players.iter().map(|p| p.id.clone()).collect()
    }

    pub fn hitler(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.role == Some(Role::Hitler))
    }

    pub fn nickname(&self, id: &SessionId) -> &str {
        self.get(id).map(|p| &p.nickname[..]).unwrap_or("Unknown")
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    fn position(&self, id: &SessionId) -> Option<usize> {
        self.players.iter().position(|p| &p.id == id)
    }
}

fn sanitise_nickname(id: &SessionId, nickname: Option<&str>) -> String {
    let nickname = nickname.map(str::trim).unwrap_or("");
    if nickname.is_empty() {
        let prefix = id.as_str().chars().take(4).collect::<String>();
        return format!("Player_{}", prefix);
    }
    nickname.chars().take(MAX_NICKNAME_LEN).collect()
}
