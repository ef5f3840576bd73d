use super::player::SessionId;

/// The most recently elected president and chancellor.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Government {
    pub president: SessionId,
    pub chancellor: SessionId,
}
