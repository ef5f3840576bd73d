use super::player::SessionId;

/// The fixed seating order used to rotate the presidency.
///
/// Seats are never removed once the game has started; players who are eliminated or who leave
/// keep their seat but are skipped when the presidency moves on.
#[derive(Clone, Debug, Default)]
pub struct Succession {
    order: Vec<SessionId>,
}

impl Succession {
    pub fn new(order: Vec<SessionId>) -> Self {
        Self { order }
    }

    /// Finds the first eligible player seated after `current`, wrapping around the table.
    /// With no current candidate the search starts at the first seat.
    pub fn select_next<F>(&self, current: Option<&SessionId>, eligible: F) -> Option<&SessionId>
    where
        F: Fn(&SessionId) -> bool,
    {
        let start = current
            .and_then(|current| self.order.iter().position(|id| id == current))
            .map_or(0, |idx| idx + 1);
        let n = self.order.len();
        (0..n).map(|offset| &self.order[(start + offset) % n]).find(|id| eligible(*id))
    }
}
