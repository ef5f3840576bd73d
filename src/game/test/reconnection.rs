//! Disconnects, reconnects and players leaving mid-game

use super::super::deck::Deck;
use super::super::Party::*;
use super::super::{Phase, ServerMessage, Vote};
use super::test_utils::*;
use crate::error::GameError;

#[test]
fn test_reconnect_restores_seat_and_role() {
    let mut game = standard_5_player_game();
    game.leave(&id(3), false).unwrap();
    assert!(!game.is_connected(&id(3)));
    game.take_effects();

    game.reconnect(&id(3)).unwrap();
    let effects = game.take_effects();
    assert!(game.is_connected(&id(3)));
    assert_eq!(
        private_to(&effects, &id(3)),
        vec![
            &ServerMessage::RoomJoined { is_creator: false, game_started: true },
            &ServerMessage::YourRole { role: super::super::Role::Fascist },
        ]
    );
}

#[test]
fn test_reconnecting_president_is_prompted_again() {
    let mut game = started_game(5);
    game.leave(&id(0), false).unwrap();
    game.reconnect(&id(0)).unwrap();
    let effects = game.take_effects();

    assert!(private_to(&effects, &id(0))
        .iter()
        .any(|m| matches!(m, ServerMessage::SelectChancellor { players } if players.len() == 4)));
}

#[test]
fn test_reconnecting_chancellor_sees_their_hand() {
    let mut game = standard_5_player_game();
    game.deck = Deck::stacked(vec![Liberal, Fascist, Fascist]);
    elect_government(&mut game, &id(1));
    game.discard_policy(&id(0), Liberal).unwrap();
    game.leave(&id(1), false).unwrap();
    game.take_effects();

    game.reconnect(&id(1)).unwrap();
    let effects = game.take_effects();
    assert!(private_to(&effects, &id(1)).contains(&&ServerMessage::ChancellorSelectPolicy {
        policies: vec![Fascist, Fascist]
    }));
    game.play_policy(&id(1), Fascist).unwrap();
    assert_eq!(game.board.fascist_cards, 1);
}

#[test]
fn test_president_leaving_abandons_nomination() {
    let mut game = started_game(5);
    game.remove_player(&id(0)).unwrap();
    let effects = game.take_effects();

    assert_eq!(game.phase(), Phase::Election);
    assert_eq!(private_to(&effects, &id(1)), vec![&ServerMessage::YouAreCreator]);
    fire_pending(&mut game);
    assert_eq!(president(&game), id(1));
}

#[test]
fn test_chancellor_leaving_returns_hand_to_discard() {
    let mut game = standard_5_player_game();
    game.deck = Deck::stacked(vec![Liberal, Fascist, Fascist, Liberal]);
    elect_government(&mut game, &id(1));
    game.discard_policy(&id(0), Liberal).unwrap();

    game.remove_player(&id(1)).unwrap();
    assert_eq!(game.phase(), Phase::Election);
    assert_eq!(game.deck.discard_count(), 3);
    assert_eq!(game.card_total(), 4);
    fire_pending(&mut game);
    assert_eq!(president(&game), id(2));
}

#[test]
fn test_departed_voter_no_longer_awaited() {
    let mut game = started_game(5);
    game.choose_chancellor(&id(0), &id(1)).unwrap();
    for seat in 0..4 {
        game.cast_vote(&id(seat), Vote::For).unwrap();
    }
    assert_eq!(game.phase(), Phase::Voting);

    game.remove_player(&id(4)).unwrap();
    assert_eq!(game.phase(), Phase::VotingResults);
    assert!(game.last_government.is_some());
}

#[test]
fn test_departed_voter_ballot_discounted() {
    let mut game = started_game(5);
    game.choose_chancellor(&id(0), &id(1)).unwrap();
    game.cast_vote(&id(4), Vote::For).unwrap();
    game.remove_player(&id(4)).unwrap();
    for seat in 0..2 {
        game.cast_vote(&id(seat), Vote::For).unwrap();
    }
    for seat in 2..4 {
        game.cast_vote(&id(seat), Vote::Against).unwrap();
    }

    // Two of four remaining players is not a majority
    assert_eq!(game.phase(), Phase::VotingResults);
    assert!(game.last_government.is_none());
}

#[test]
fn test_disconnected_player_still_awaited() {
    let mut game = started_game(5);
    game.choose_chancellor(&id(0), &id(1)).unwrap();
    game.leave(&id(4), false).unwrap();
    for seat in 0..4 {
        game.cast_vote(&id(seat), Vote::For).unwrap();
    }
    assert_eq!(game.phase(), Phase::Voting);
}

#[test]
fn test_chancellor_candidate_leaving_abandons_vote() {
    let mut game = started_game(5);
    game.choose_chancellor(&id(0), &id(1)).unwrap();
    for seat in [0, 2, 3] {
        game.cast_vote(&id(seat), Vote::For).unwrap();
    }
    game.take_effects();

    game.remove_player(&id(1)).unwrap();
    let effects = game.take_effects();
    assert_eq!(game.phase(), Phase::Election);
    assert!(game.last_government.is_none());
    assert!(!broadcasts(&effects)
        .iter()
        .any(|m| matches!(m, ServerMessage::VotingResults { .. })));

    assert_eq!(game.cast_vote(&id(4), Vote::For), Err(GameError::InvalidAction));
    fire_pending(&mut game);
    assert_eq!(president(&game), id(2));
}

#[test]
fn test_reconnecting_voter_gets_ballot_again() {
    let mut game = started_game(5);
    game.choose_chancellor(&id(0), &id(1)).unwrap();
    game.cast_vote(&id(2), Vote::For).unwrap();
    game.leave(&id(2), false).unwrap();
    game.leave(&id(3), false).unwrap();
    game.take_effects();

    game.reconnect(&id(3)).unwrap();
    let effects = game.take_effects();
    assert!(private_to(&effects, &id(3)).contains(&&ServerMessage::StartVote {
        president_candidate_id: id(0),
        president_candidate_nickname: "Player0".to_string(),
        chancellor_candidate_id: id(1),
        chancellor_candidate_nickname: "Player1".to_string(),
    }));

    // Players who already voted are not asked again
    game.reconnect(&id(2)).unwrap();
    let effects = game.take_effects();
    assert!(!private_to(&effects, &id(2))
        .iter()
        .any(|m| matches!(m, ServerMessage::StartVote { .. })));
}
