//! Test utilities and helper functions for game testing

use super::super::deck::Deck;
use super::super::player::Role;
use super::super::{Effects, Envelope, Game, GameState, Party, Recipient, ServerMessage, SessionId, Vote};

/// The session ids `p0..pN`, in seating order.
pub fn ids(num_players: usize) -> Vec<SessionId> {
    (0..num_players).map(|i| SessionId::new(format!("p{}", i))).collect()
}

pub fn id(seat: usize) -> SessionId {
    SessionId::new(format!("p{}", seat))
}

/// A lobby with every player joined and ready. Effects are discarded.
pub fn lobby_game(num_players: usize) -> Game {
    let mut game = Game::new(42);
    for (i, player) in ids(num_players).into_iter().enumerate() {
        let nickname = format!("Player{}", i);
        game.join(player, Some(nickname.as_str())).unwrap();
    }
    for player in ids(num_players) {
        game.toggle_ready(&player).unwrap();
    }
    game.take_effects();
    game
}

/// A started game where roles have been dealt and the first president is choosing a chancellor.
pub fn started_game(num_players: usize) -> Game {
    let mut game = lobby_game(num_players);
    game.start_game(&id(0)).unwrap();
    fire_pending(&mut game);
    fire_pending(&mut game);
    game.take_effects();
    game
}

/// Overrides the dealt roles, seat by seat.
pub fn set_roles(game: &mut Game, roles: &[Role]) {
    for (seat, role) in roles.iter().enumerate() {
        game.players.get_mut(&id(seat)).unwrap().role = Some(*role);
    }
}

/// A 5-player game with known roles: seat 3 is the fascist and seat 4 is Hitler.
pub fn standard_5_player_game() -> Game {
    let mut game = started_game(5);
    set_roles(
        &mut game,
        &[Role::Liberal, Role::Liberal, Role::Liberal, Role::Fascist, Role::Hitler],
    );
    game
}

/// Fires whatever timer the game is waiting on.
pub fn fire_pending(game: &mut Game) {
    let pending = game.pending_timer().expect("a timer should be pending");
    game.fire(pending.id).unwrap();
}

/// The player currently choosing a chancellor.
pub fn president(game: &Game) -> SessionId {
    match &game.state {
        GameState::SelectingChancellor { president } => president.clone(),
        _ => panic!("not selecting a chancellor"),
    }
}

/// Nominates `chancellor` and has every active player vote the same way.
pub fn nominate_and_vote(game: &mut Game, chancellor: &SessionId, vote: Vote) {
    let president = president(game);
    game.choose_chancellor(&president, chancellor).unwrap();
    let voters = game.players.active().map(|p| p.id.clone()).collect::<Vec<_>>();
    for voter in voters {
        game.cast_vote(&voter, vote).unwrap();
    }
}

/// Elects a government and deals the president their policies.
pub fn elect_government(game: &mut Game, chancellor: &SessionId) -> SessionId {
    let president = president(game);
    nominate_and_vote(game, chancellor, Vote::For);
    fire_pending(game);
    president
}

/// Elects a government that is guaranteed to enact `policy`.
/// Returns the president of that government.
pub fn pass_policy(game: &mut Game, chancellor: &SessionId, policy: Party) -> SessionId {
    game.deck = Deck::stacked(vec![policy; 3]);
    let president = elect_government(game, chancellor);
    game.discard_policy(&president, policy).unwrap();
    game.play_policy(chancellor, policy).unwrap();
    president
}

/// Messages that reach `player`, whether broadcast or private.
pub fn received_by<'a>(effects: &'a Effects, player: &SessionId) -> Vec<&'a ServerMessage> {
    effects
        .messages
        .iter()
        .filter(|envelope| match &envelope.to {
            Recipient::All => true,
            Recipient::Player(to) => to == player,
        })
        .map(|envelope| &envelope.message)
        .collect()
}

/// Messages addressed only to `player`.
pub fn private_to<'a>(effects: &'a Effects, player: &SessionId) -> Vec<&'a ServerMessage> {
    effects
        .messages
        .iter()
        .filter(|envelope| envelope.to == Recipient::Player(player.clone()))
        .map(|envelope| &envelope.message)
        .collect()
}

pub fn broadcasts(effects: &Effects) -> Vec<&ServerMessage> {
    effects
        .messages
        .iter()
        .filter(|envelope| envelope.to == Recipient::All)
        .map(|envelope| &envelope.message)
        .collect()
}

pub fn count_game_over(messages: &[Envelope]) -> usize {
    messages
        .iter()
        .filter(|envelope| matches!(envelope.message, ServerMessage::GameOver { .. }))
        .count()
}
