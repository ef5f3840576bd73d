use super::government::Government;
use super::player::SessionId;
use super::votes::Votes;
use super::{Game, GameState, ServerMessage, Timer, Vote};
use crate::error::GameError;

impl Game {
    /// Announces the current presidential candidate and asks them to nominate a chancellor.
    pub(super) fn start_election(&mut self) -> Result<(), GameError> {
        let president = match self.president_candidate.clone() {
            Some(candidate) if self.players.is_active(&candidate) => candidate,
            // The candidate left while the announcement was pending
            _ => match self.next_president() {
                Some(candidate) => candidate,
                None => {
                    self.abort(GameError::NoEligiblePresident);
                    return Err(GameError::NoEligiblePresident);
                }
            },
        };
        self.president_candidate = Some(president.clone());

        let nickname = self.players.nickname(&president).to_owned();
        log::info!("President candidate selected: {} ({})", nickname, president);
        self.broadcast(ServerMessage::PresidentCandidateInfo {
            president_candidate_id: president.clone(),
            president_candidate_nickname: nickname,
        });
        let players = self.choices_for(&president);
        self.send(&president, ServerMessage::SelectChancellor { players });
        self.state = GameState::SelectingChancellor { president };
        Ok(())
    }

    /// Called when the presidential candidate nominates a chancellor.
    pub fn choose_chancellor(&mut self, player: &SessionId, chancellor: &SessionId) -> Result<(), GameError> {
        let GameState::SelectingChancellor { president } = &self.state else {
            return Err(GameError::InvalidAction);
        };
        if president != player {
            return Err(GameError::NotPresident);
        }
        if chancellor == president || !self.players.is_active(chancellor) {
            return Err(GameError::InvalidPlayerChoice);
        }

        let president = president.clone();
        log::info!(
            "President candidate {} nominated {} as chancellor",
            self.players.nickname(&president),
            self.players.nickname(chancellor)
        );
        self.broadcast(ServerMessage::StartVote {
            president_candidate_id: president.clone(),
            president_candidate_nickname: self.players.nickname(&president).to_owned(),
            chancellor_candidate_id: chancellor.clone(),
            chancellor_candidate_nickname: self.players.nickname(chancellor).to_owned(),
        });
        self.state = GameState::Voting {
            president,
            chancellor: chancellor.clone(),
            votes: Votes::default(),
        };
        Ok(())
    }

    /// Called when a player casts their vote.
    pub fn cast_vote(&mut self, player: &SessionId, vote: Vote) -> Result<(), GameError> {
        let GameState::Voting { votes, .. } = &self.state else {
            return Err(GameError::InvalidAction);
        };
        let voter = self.players.get(player).ok_or(GameError::PlayerNotFound)?;
        if voter.eliminated {
            return Err(GameError::PlayerEliminated);
        }
        if votes.has_cast(player) {
            return Err(GameError::AlreadyVoted);
        }

        if let GameState::Voting { votes, .. } = &mut self.state {
            votes.vote(player.clone(), vote == Vote::For)?;
        }
        log::info!("{} voted {:?}", self.players.nickname(player), vote);
        self.end_voting_if_complete();
        Ok(())
    }

    /// Resolves the election once every player still in the game has voted.
    pub(super) fn end_voting_if_complete(&mut self) {
        let GameState::Voting { president, chancellor, votes } = &self.state else {
            return;
        };
        let electorate = self.players.active().map(|p| p.id.clone()).collect::<Vec<_>>();
        let Some(tally) = votes.outcome(&electorate) else {
            return;
        };
        let (president, chancellor) = (president.clone(), chancellor.clone());
        let president_nickname = self.players.nickname(&president).to_owned();
        let chancellor_nickname = self.players.nickname(&chancellor).to_owned();

        let message = if tally.passed {
            format!(
                "Vote PASSED! {} is President and {} is Chancellor.",
                president_nickname, chancellor_nickname
            )
        } else {
            "Vote FAILED! New president will be selected.".to_string()
        };
        log::info!("{} ({} for, {} against)", message, tally.votes_for, tally.votes_against);
        self.broadcast(ServerMessage::VotingResults {
            president_candidate_id: president.clone(),
            president_candidate_nickname: president_nickname,
            chancellor_candidate_id: chancellor.clone(),
            chancellor_candidate_nickname: chancellor_nickname,
            vote_passed: tally.passed,
            votes_for: tally.votes_for,
            votes_against: tally.votes_against,
            message,
        });

        if tally.passed {
            self.last_government = Some(Government { president, chancellor });
            self.state = GameState::VotingResults { passed: true };
            self.schedule(Timer::LegislativeSession);
        } else {
            self.next_round();
            if !self.game_over() {
                self.state = GameState::VotingResults { passed: false };
            }
        }
    }
}
