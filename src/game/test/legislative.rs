//! Legislative session tests

use super::super::deck::Deck;
use super::super::Party::*;
use super::super::{Phase, ServerMessage};
use super::test_utils::*;
use crate::error::GameError;

#[test]
fn test_president_draws_three_policies_privately() {
    let mut game = standard_5_player_game();
    game.deck = Deck::stacked(vec![Liberal, Fascist, Fascist, Liberal]);
    nominate_and_vote(&mut game, &id(1), super::super::Vote::For);
    game.take_effects();
    fire_pending(&mut game);
    let effects = game.take_effects();

    assert_eq!(game.phase(), Phase::PresidentPolicy);
    assert_eq!(
        private_to(&effects, &id(0)),
        vec![&ServerMessage::PresidentDrawPolicies { policies: vec![Liberal, Fascist, Fascist] }]
    );
    assert!(broadcasts(&effects).is_empty());
    assert_eq!(game.deck.count(), 1);
}

#[test]
fn test_president_discard_passes_two_to_chancellor() {
    let mut game = standard_5_player_game();
    game.deck = Deck::stacked(vec![Liberal, Fascist, Fascist]);
    elect_government(&mut game, &id(1));
    game.take_effects();

    game.discard_policy(&id(0), Fascist).unwrap();
    let effects = game.take_effects();
    assert_eq!(game.phase(), Phase::ChancellorPolicy);
    assert_eq!(
        private_to(&effects, &id(1)),
        vec![&ServerMessage::ChancellorSelectPolicy { policies: vec![Liberal, Fascist] }]
    );
    assert_eq!(game.deck.discard_count(), 1);
    assert_eq!(game.card_total(), 3);
}

#[test]
fn test_chancellor_enacts_and_policy_is_announced() {
    let mut game = standard_5_player_game();
    game.deck = Deck::stacked(vec![Liberal, Fascist, Fascist]);
    elect_government(&mut game, &id(1));
    game.discard_policy(&id(0), Fascist).unwrap();
    game.take_effects();

    game.play_policy(&id(1), Liberal).unwrap();
    let effects = game.take_effects();
    assert_eq!(
        broadcasts(&effects),
        vec![&ServerMessage::PolicyPlayed {
            policy_type: Liberal,
            liberal_policies: 1,
            fascist_policies: 0,
        }]
    );
    assert_eq!(game.board.liberal_cards, 1);
    assert_eq!(game.deck.discard_count(), 2);
    assert_eq!(game.phase(), Phase::Election);
    assert_eq!(game.president_candidate(), Some(&id(1)));
}

#[test]
fn test_only_government_may_handle_policies() {
    let mut game = standard_5_player_game();
    game.deck = Deck::stacked(vec![Liberal, Fascist, Fascist]);
    elect_government(&mut game, &id(1));

    assert_eq!(game.discard_policy(&id(1), Fascist), Err(GameError::NotPresident));
    assert_eq!(game.play_policy(&id(1), Liberal), Err(GameError::InvalidAction));

    game.discard_policy(&id(0), Fascist).unwrap();
    assert_eq!(game.discard_policy(&id(0), Fascist), Err(GameError::InvalidAction));
    assert_eq!(game.play_policy(&id(0), Liberal), Err(GameError::NotChancellor));
}

#[test]
fn test_policy_must_be_in_hand() {
    let mut game = standard_5_player_game();
    game.deck = Deck::stacked(vec![Fascist, Fascist, Fascist]);
    elect_government(&mut game, &id(1));

    assert_eq!(game.discard_policy(&id(0), Liberal), Err(GameError::InvalidCard));
    assert_eq!(game.phase(), Phase::PresidentPolicy);

    game.discard_policy(&id(0), Fascist).unwrap();
    assert_eq!(game.play_policy(&id(1), Liberal), Err(GameError::InvalidCard));
    assert_eq!(game.phase(), Phase::ChancellorPolicy);
}

#[test]
fn test_policies_outside_session_rejected() {
    let mut game = started_game(5);
    assert_eq!(game.discard_policy(&id(0), Liberal), Err(GameError::InvalidAction));
    assert_eq!(game.play_policy(&id(0), Liberal), Err(GameError::InvalidAction));
}

#[test]
fn test_discard_pile_reshuffled_under_draw_pile() {
    let mut game = standard_5_player_game();
    game.deck = Deck::stacked(vec![Liberal]);
    game.deck.discard([Fascist, Fascist, Fascist, Liberal]);
    elect_government(&mut game, &id(1));

    assert_eq!(game.phase(), Phase::PresidentPolicy);
    assert_eq!(game.deck.discard_count(), 0);
    assert_eq!(game.deck.count(), 2);
    assert_eq!(game.card_total(), 5);
}

#[test]
fn test_running_out_of_policies_ends_without_winner() {
    let mut game = standard_5_player_game();
    game.deck = Deck::stacked(vec![Liberal, Liberal]);
    nominate_and_vote(&mut game, &id(1), super::super::Vote::For);

    let pending = game.pending_timer().unwrap();
    assert_eq!(game.fire(pending.id), Err(GameError::DeckExhausted));
    assert!(game.game_over());
    assert_eq!(game.winner(), None);
}
