//! Single-elimination bracket engine.
//!
//! Every transition takes the current state by reference and returns a new
//! state, leaving the input untouched when validation fails. The engine never
//! advances on its own: callers run [`TournamentEngine::try_advance_round`]
//! after a score decides a match.

use super::{
    errors::{TournamentError, TournamentResult},
    models::{EntrantCount, Match, Player, Side, TARGET_SCORE, TournamentState},
    seeding::BracketSeeder,
};
use log::{debug, info};

/// Tournament engine
pub struct TournamentEngine {
    seeder: BracketSeeder,
}

impl TournamentEngine {
    /// Create an engine with an entropy-seeded bracket draw
    pub fn new() -> Self {
        Self {
            seeder: BracketSeeder::new(),
        }
    }

    /// Create an engine with a custom seeder
    pub fn with_seeder(seeder: BracketSeeder) -> Self {
        Self { seeder }
    }

    /// Empty tournament of the given size
    ///
    /// # Errors
    ///
    /// `InvalidSize` unless `entrant_count` is 4 or 8
    pub fn create_roster(&self, entrant_count: u8) -> TournamentResult<TournamentState> {
        let entrant_count = EntrantCount::try_from(entrant_count)?;
        Ok(TournamentState::new(entrant_count))
    }

    /// Add a player to the roster
    ///
    /// # Errors
    ///
    /// * `InvalidName` - Blank name
    /// * `RosterFull` - Roster already has `entrant_count` players
    /// * `AlreadyStarted` - Bracket already drawn
    pub fn add_player(
        &self,
        state: &TournamentState,
        name: &str,
    ) -> TournamentResult<TournamentState> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::InvalidName);
        }
        if state.is_started() {
            return Err(TournamentError::AlreadyStarted);
        }
        if state.is_roster_full() {
            return Err(TournamentError::RosterFull {
                capacity: state.entrant_count.get(),
            });
        }

        let mut next = state.clone();
        next.roster.push(Player::new(name));
        debug!(
            "Added player {} ({}/{})",
            name,
            next.roster.len(),
            next.entrant_count
        );
        Ok(next)
    }

    /// Shuffle the roster and draw round 0
    ///
    /// # Errors
    ///
    /// * `IncompleteRoster` - Roster not full
    /// * `AlreadyStarted` - Bracket already drawn
    pub fn start_tournament(
        &mut self,
        state: &TournamentState,
    ) -> TournamentResult<TournamentState> {
        if state.is_started() {
            return Err(TournamentError::AlreadyStarted);
        }
        if !state.is_roster_full() {
            return Err(TournamentError::IncompleteRoster {
                needed: state.entrant_count.get(),
                current: state.roster.len(),
            });
        }

        let seeded = self.seeder.seed(&state.roster);
        let mut next = state.clone();
        next.bracket = pair_players(0, seeded);
        next.current_round = 0;
        next.active = true;
        next.champion = None;

        info!(
            "Started {}-player bags tournament with {} opening matches",
            next.entrant_count,
            next.bracket.len()
        );
        Ok(next)
    }

    /// Add `delta` points to one side of a current-round match
    ///
    /// Scores are clamped to `[0, 21]`. Reaching 21 decides the match and
    /// freezes it.
    ///
    /// # Errors
    ///
    /// * `MatchNotFound` - No such match in the current round
    /// * `MatchAlreadyDecided` - Match already has a winner
    pub fn record_score(
        &self,
        state: &TournamentState,
        match_id: &str,
        side: Side,
        delta: i32,
    ) -> TournamentResult<TournamentState> {
        let mut next = state.clone();
        let current_round = next.current_round;
        let game = next
            .bracket
            .iter_mut()
            .find(|m| m.round == current_round && m.id == match_id)
            .ok_or_else(|| TournamentError::MatchNotFound(match_id.to_string()))?;

        if game.is_decided() {
            return Err(TournamentError::MatchAlreadyDecided(match_id.to_string()));
        }

        if game.score.apply(side, delta) == TARGET_SCORE {
            game.winner = Some(side);
            info!(
                "Match {} won by {} ({}-{})",
                game.id,
                game.player(side).name,
                game.score.player1,
                game.score.player2
            );
        }
        Ok(next)
    }

    /// Move to the next round once the current one is fully decided
    ///
    /// A no-op while any current match is undecided or the tournament is not
    /// active. When the current round is the final, the winner becomes
    /// champion and the tournament stops; the bracket is kept.
    pub fn try_advance_round(&self, state: &TournamentState) -> TournamentState {
        if !state.active || !state.is_current_round_decided() {
            return state.clone();
        }

        let winners: Vec<Player> = state
            .current_matches()
            .filter_map(Match::winning_player)
            .cloned()
            .collect();

        let mut next = state.clone();
        if winners.len() == 1 {
            next.champion = winners.into_iter().next();
            next.active = false;
            if let Some(champion) = &next.champion {
                info!("Bags tournament champion: {}", champion.name);
            }
            return next;
        }

        next.current_round += 1;
        let round = next.current_round;
        next.bracket.extend(pair_players(round, winners));
        info!("Advanced to round {}", round + 1);
        next
    }

    /// Discard everything and start over with an empty roster
    ///
    /// # Errors
    ///
    /// `InvalidSize` unless `entrant_count` is 4 or 8
    pub fn reset(&self, entrant_count: u8) -> TournamentResult<TournamentState> {
        self.create_roster(entrant_count)
    }
}

impl Default for TournamentEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Pair consecutive players into matches for `round`
fn pair_players(round: usize, players: Vec<Player>) -> Vec<Match> {
    let mut matches = Vec::with_capacity(players.len() / 2);
    let mut players = players.into_iter();
    while let (Some(player1), Some(player2)) = (players.next(), players.next()) {
        matches.push(Match::new(round, matches.len(), player1, player2));
    }
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> TournamentEngine {
        TournamentEngine::with_seeder(BracketSeeder::from_seed(1))
    }

    fn full_roster(engine: &TournamentEngine, size: u8) -> TournamentState {
        let mut state = engine.create_roster(size).unwrap();
        for i in 0..size {
            state = engine.add_player(&state, &format!("Player {i}")).unwrap();
        }
        state
    }

    fn decide(
        engine: &TournamentEngine,
        state: &TournamentState,
        match_id: &str,
        side: Side,
    ) -> TournamentState {
        engine.record_score(state, match_id, side, 21).unwrap()
    }

    #[test]
    fn test_create_roster_rejects_bad_size() {
        let engine = engine();
        assert_eq!(
            engine.create_roster(5),
            Err(TournamentError::InvalidSize(5))
        );
        assert_eq!(engine.reset(0), Err(TournamentError::InvalidSize(0)));
        assert!(engine.create_roster(8).is_ok());
    }

    #[test]
    fn test_add_player_validation() {
        let engine = engine();
        let state = engine.create_roster(4).unwrap();
        assert_eq!(
            engine.add_player(&state, "   "),
            Err(TournamentError::InvalidName)
        );

        let full = full_roster(&engine, 4);
        assert_eq!(
            engine.add_player(&full, "Extra"),
            Err(TournamentError::RosterFull { capacity: 4 })
        );
    }

    #[test]
    fn test_add_player_trims_name() {
        let engine = engine();
        let state = engine.create_roster(4).unwrap();
        let state = engine.add_player(&state, "  Ann ").unwrap();
        assert_eq!(state.roster[0].name, "Ann");
    }

    #[test]
    fn test_start_requires_full_roster() {
        let mut engine = engine();
        let state = engine.create_roster(4).unwrap();
        let state = engine.add_player(&state, "Ann").unwrap();
        assert_eq!(
            engine.start_tournament(&state),
            Err(TournamentError::IncompleteRoster {
                needed: 4,
                current: 1
            })
        );
    }

    #[test]
    fn test_start_twice_rejected() {
        let mut engine = engine();
        let state = full_roster(&engine, 4);
        let started = engine.start_tournament(&state).unwrap();
        assert_eq!(
            engine.start_tournament(&started),
            Err(TournamentError::AlreadyStarted)
        );
        assert_eq!(
            engine.add_player(&started, "Late"),
            Err(TournamentError::AlreadyStarted)
        );
    }

    #[test]
    fn test_record_score_unknown_match() {
        let mut engine = engine();
        let state = engine.start_tournament(&full_roster(&engine, 4)).unwrap();
        assert_eq!(
            engine.record_score(&state, "r1-m0", Side::Player1, 3),
            Err(TournamentError::MatchNotFound("r1-m0".to_string()))
        );
    }

    #[test]
    fn test_record_score_decides_at_21() {
        let mut engine = engine();
        let state = engine.start_tournament(&full_roster(&engine, 4)).unwrap();

        let state = engine.record_score(&state, "r0-m0", Side::Player2, 20).unwrap();
        assert!(state.bracket[0].winner.is_none());

        let state = engine.record_score(&state, "r0-m0", Side::Player2, 5).unwrap();
        assert_eq!(state.bracket[0].winner, Some(Side::Player2));
        assert_eq!(state.bracket[0].score.player2, 21);

        assert_eq!(
            engine.record_score(&state, "r0-m0", Side::Player1, 1),
            Err(TournamentError::MatchAlreadyDecided("r0-m0".to_string()))
        );
    }

    #[test]
    fn test_failed_transition_leaves_input_untouched() {
        let mut engine = engine();
        let state = engine.start_tournament(&full_roster(&engine, 4)).unwrap();
        let before = state.clone();
        let _ = engine.record_score(&state, "missing", Side::Player1, 5);
        assert_eq!(state, before);
    }

    #[test]
    fn test_advance_is_noop_until_round_decided() {
        let mut engine = engine();
        let state = engine.start_tournament(&full_roster(&engine, 4)).unwrap();
        let state = decide(&engine, &state, "r0-m0", Side::Player1);

        let advanced = engine.try_advance_round(&state);
        assert_eq!(advanced, state);
    }

    #[test]
    fn test_advance_is_noop_before_start() {
        let engine = engine();
        let state = full_roster(&engine, 4);
        assert_eq!(engine.try_advance_round(&state), state);
    }

    #[test]
    fn test_advance_pairs_winners_in_order() {
        let mut engine = engine();
        let state = engine.start_tournament(&full_roster(&engine, 8)).unwrap();
        let state = decide(&engine, &state, "r0-m0", Side::Player1);
        let state = decide(&engine, &state, "r0-m1", Side::Player2);
        let state = decide(&engine, &state, "r0-m2", Side::Player2);
        let state = decide(&engine, &state, "r0-m3", Side::Player1);

        let next = engine.try_advance_round(&state);
        assert_eq!(next.current_round, 1);

        let round1: Vec<&Match> = next.round(1).collect();
        assert_eq!(round1.len(), 2);
        assert_eq!(round1[0].player1, state.bracket[0].player1);
        assert_eq!(round1[0].player2, state.bracket[1].player2);
        assert_eq!(round1[1].player1, state.bracket[2].player2);
        assert_eq!(round1[1].player2, state.bracket[3].player1);
    }

    #[test]
    fn test_final_sets_champion() {
        let mut engine = engine();
        let state = engine.start_tournament(&full_roster(&engine, 4)).unwrap();
        let state = decide(&engine, &state, "r0-m0", Side::Player1);
        let state = decide(&engine, &state, "r0-m1", Side::Player1);
        let state = engine.try_advance_round(&state);
        let state = decide(&engine, &state, "r1-m0", Side::Player2);
        let done = engine.try_advance_round(&state);

        assert!(!done.active);
        assert_eq!(done.current_round, 1);
        assert_eq!(done.bracket.len(), 3);
        assert_eq!(done.champion.as_ref(), Some(&state.bracket[2].player2));

        // Finished tournaments stay put
        assert_eq!(engine.try_advance_round(&done), done);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut engine = engine();
        let state = engine.start_tournament(&full_roster(&engine, 4)).unwrap();
        assert!(state.active);
        let fresh = engine.reset(8).unwrap();
        assert!(fresh.roster.is_empty());
        assert!(fresh.bracket.is_empty());
        assert_eq!(fresh.entrant_count, EntrantCount::Eight);
    }
}
