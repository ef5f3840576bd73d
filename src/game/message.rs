use super::party::Party;
use super::player::{Role, SessionId};
use serde::{Deserialize, Serialize};

/// A named message sent by a player's client.
#[derive(Clone, Deserialize, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMessage {
    ToggleReady,
    StartGame,
    #[serde(rename_all = "camelCase")]
    ChancellorSelected { chancellor_id: SessionId },
    CastVote { vote: Vote },
    PresidentDiscardPolicy { policy: Party },
    ChancellorPlayPolicy { policy: Party },
    #[serde(rename_all = "camelCase")]
    PresidentAssassinatePlayer { target_id: SessionId },
}

#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    For,
    Against,
}

/// A player as presented in a list of choices.
#[derive(Clone, Serialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PlayerChoice {
    pub session_id: SessionId,
    pub nickname: String,
}

/// A named message sent by the server to one or all clients.
#[derive(Clone, Serialize, PartialEq, Eq, Debug)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMessage {
    #[serde(rename_all = "camelCase")]
    RoomJoined { is_creator: bool, game_started: bool },
    YouAreCreator,
    AllPlayersReady,
    GameStarted,
    YourRole { role: Role },
    #[serde(rename_all = "camelCase")]
    PresidentCandidateInfo {
        president_candidate_id: SessionId,
        president_candidate_nickname: String,
    },
    SelectChancellor { players: Vec<PlayerChoice> },
    #[serde(rename_all = "camelCase")]
    StartVote {
        president_candidate_id: SessionId,
        president_candidate_nickname: String,
        chancellor_candidate_id: SessionId,
        chancellor_candidate_nickname: String,
    },
    #[serde(rename_all = "camelCase")]
    VotingResults {
        president_candidate_id: SessionId,
        president_candidate_nickname: String,
        chancellor_candidate_id: SessionId,
        chancellor_candidate_nickname: String,
        vote_passed: bool,
        votes_for: usize,
        votes_against: usize,
        message: String,
    },
    PresidentDrawPolicies { policies: Vec<Party> },
    ChancellorSelectPolicy { policies: Vec<Party> },
    #[serde(rename_all = "camelCase")]
    PolicyPlayed {
        policy_type: Party,
        liberal_policies: usize,
        fascist_policies: usize,
    },
    StartAssassination { targets: Vec<PlayerChoice> },
    #[serde(rename_all = "camelCase")]
    PlayerEliminated {
        eliminated_player_id: SessionId,
        message: String,
    },
    GameOver { winner: Party, message: String },
}

/// Who an outbound message is addressed to.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Recipient {
    All,
    Player(SessionId),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Envelope {
    pub to: Recipient,
    pub message: ServerMessage,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_named_client_messages() {
        let parse = |value| serde_json::from_value::<ClientMessage>(value).ok();
        assert_eq!(parse(json!({ "type": "toggle-ready" })), Some(ClientMessage::ToggleReady));
        assert_eq!(
            parse(json!({ "type": "chancellor-selected", "chancellorId": "abc" })),
            Some(ClientMessage::ChancellorSelected { chancellor_id: "abc".into() })
        );
        assert_eq!(
            parse(json!({ "type": "cast-vote", "vote": "against" })),
            Some(ClientMessage::CastVote { vote: Vote::Against })
        );
        assert_eq!(
            parse(json!({ "type": "chancellor-play-policy", "policy": "fascist" })),
            Some(ClientMessage::ChancellorPlayPolicy { policy: Party::Fascist })
        );
    }

    #[test]
    fn rejects_out_of_range_payloads() {
        let parse = |value| serde_json::from_value::<ClientMessage>(value).ok();
        assert_eq!(parse(json!({ "type": "cast-vote", "vote": "maybe" })), None);
        assert_eq!(parse(json!({ "type": "president-discard-policy", "policy": "communist" })), None);
        assert_eq!(parse(json!({ "type": "president-assassinate-player" })), None);
        assert_eq!(parse(json!({ "type": "move", "left": true })), None);
    }

    #[test]
    fn server_messages_use_wire_names() {
        let msg = ServerMessage::PolicyPlayed {
            policy_type: Party::Liberal,
            liberal_policies: 2,
            fascist_policies: 1,
        };
        assert_eq!(
            serde_json::to_value(msg).unwrap(),
            json!({ "type": "policy-played", "policyType": "liberal", "liberalPolicies": 2, "fascistPolicies": 1 })
        );
        assert_eq!(serde_json::to_value(ServerMessage::YouAreCreator).unwrap(), json!({ "type": "you-are-creator" }));
        let joined = ServerMessage::RoomJoined { is_creator: true, game_started: false };
        assert_eq!(
            serde_json::to_value(joined).unwrap(),
            json!({ "type": "room-joined", "isCreator": true, "gameStarted": false })
        );
    }
}
