use thiserror::Error;

/// The result of attempting to perform an invalid operation on a [Game] or [Session].
///
/// A returned error always means the game state was left untouched.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GameError {
    #[error("game does not exist")]
    GameNotFound,
    #[error("too few players in the game")]
    TooFewPlayers,
    #[error("too many players in the game")]
    TooManyPlayers,
    #[error("not every player is connected and ready")]
    PlayersNotReady,
    #[error("no player exists with the given session")]
    PlayerNotFound,
    #[error("a player with this session has already joined")]
    PlayerAlreadyJoined,
    #[error("cannot join a game in progress")]
    CannotJoinStartedGame,
    #[error("only the room creator can do this")]
    NotCreator,
    #[error("only the president can do this")]
    NotPresident,
    #[error("only the chancellor can do this")]
    NotChancellor,
    #[error("eliminated players cannot act")]
    PlayerEliminated,
    #[error("this player has already voted")]
    AlreadyVoted,
    #[error("this player cannot be chosen for this action")]
    InvalidPlayerChoice,
    #[error("this action cannot be performed during this phase of the game")]
    InvalidAction,
    #[error("an invalid card was chosen")]
    InvalidCard,
    #[error("the policy deck ran out of cards")]
    DeckExhausted,
    #[error("no player is eligible to be president")]
    NoEligiblePresident,
}
