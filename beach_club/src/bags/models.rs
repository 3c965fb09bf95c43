//! Bags tournament data models.

use super::errors::TournamentError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Score a side must reach to win a match
pub const TARGET_SCORE: u8 = 21;

/// Tournament participant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Opaque unique id
    pub id: String,
    /// Display name
    pub name: String,
}

impl Player {
    /// Create a player with a freshly generated id
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
        }
    }
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Player {}

/// One side of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player1,
    Player2,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Player1 => write!(f, "player1"),
            Side::Player2 => write!(f, "player2"),
        }
    }
}

impl std::str::FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "player1" | "p1" | "1" => Ok(Side::Player1),
            "player2" | "p2" | "2" => Ok(Side::Player2),
            other => Err(format!("unknown side: {other}")),
        }
    }
}

/// Running score of a match
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player1: u8,
    pub player2: u8,
}

impl Score {
    /// Points for one side
    pub fn get(&self, side: Side) -> u8 {
        match side {
            Side::Player1 => self.player1,
            Side::Player2 => self.player2,
        }
    }

    /// Apply `delta` to one side, clamped to `[0, TARGET_SCORE]`
    ///
    /// Returns the new value for that side.
    pub fn apply(&mut self, side: Side, delta: i32) -> u8 {
        let slot = match side {
            Side::Player1 => &mut self.player1,
            Side::Player2 => &mut self.player2,
        };
        let next = (i32::from(*slot) + delta).clamp(0, i32::from(TARGET_SCORE));
        // Safe: clamped into u8 range above
        *slot = next as u8;
        *slot
    }
}

/// A single bracket match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: String,
    /// 0-indexed round
    pub round: usize,
    pub player1: Player,
    pub player2: Player,
    pub winner: Option<Side>,
    pub score: Score,
}

impl Match {
    /// Create an undecided match at 0-0
    pub fn new(round: usize, index: usize, player1: Player, player2: Player) -> Self {
        Self {
            id: format!("r{round}-m{index}"),
            round,
            player1,
            player2,
            winner: None,
            score: Score::default(),
        }
    }

    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }

    /// The player on the given side
    pub fn player(&self, side: Side) -> &Player {
        match side {
            Side::Player1 => &self.player1,
            Side::Player2 => &self.player2,
        }
    }

    /// The winning player, if decided
    pub fn winning_player(&self) -> Option<&Player> {
        self.winner.map(|side| self.player(side))
    }
}

/// Allowed bracket sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum EntrantCount {
    Four,
    Eight,
}

impl EntrantCount {
    pub fn get(self) -> usize {
        match self {
            EntrantCount::Four => 4,
            EntrantCount::Eight => 8,
        }
    }

    /// Number of rounds needed to produce a champion
    pub fn rounds(self) -> usize {
        match self {
            EntrantCount::Four => 2,
            EntrantCount::Eight => 3,
        }
    }
}

impl TryFrom<u8> for EntrantCount {
    type Error = TournamentError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(EntrantCount::Four),
            8 => Ok(EntrantCount::Eight),
            other => Err(TournamentError::InvalidSize(other)),
        }
    }
}

impl From<EntrantCount> for u8 {
    fn from(value: EntrantCount) -> Self {
        match value {
            EntrantCount::Four => 4,
            EntrantCount::Eight => 8,
        }
    }
}

impl std::fmt::Display for EntrantCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Complete tournament state
///
/// Lifecycle: empty roster, roster filled, started (`active`), advanced
/// round by round, finished (`champion` set, `active` false).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentState {
    pub active: bool,
    pub entrant_count: EntrantCount,
    pub roster: Vec<Player>,
    /// Every match played so far, in round then bracket order
    pub bracket: Vec<Match>,
    pub current_round: usize,
    pub champion: Option<Player>,
}

impl TournamentState {
    /// Empty state for the given size
    pub fn new(entrant_count: EntrantCount) -> Self {
        Self {
            active: false,
            entrant_count,
            roster: Vec::new(),
            bracket: Vec::new(),
            current_round: 0,
            champion: None,
        }
    }

    pub fn is_roster_full(&self) -> bool {
        self.roster.len() >= self.entrant_count.get()
    }

    /// Whether a bracket has been drawn
    pub fn is_started(&self) -> bool {
        !self.bracket.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.champion.is_some()
    }

    /// Matches of one round, in bracket order
    pub fn round(&self, round: usize) -> impl Iterator<Item = &Match> {
        self.bracket.iter().filter(move |m| m.round == round)
    }

    pub fn current_matches(&self) -> impl Iterator<Item = &Match> {
        self.round(self.current_round)
    }

    /// Number of rounds drawn so far
    pub fn round_count(&self) -> usize {
        self.bracket.iter().map(|m| m.round + 1).max().unwrap_or(0)
    }

    /// Look up a match anywhere in the bracket
    pub fn find_match(&self, match_id: &str) -> Option<&Match> {
        self.bracket.iter().find(|m| m.id == match_id)
    }

    /// Whether every match of the current round has a winner
    pub fn is_current_round_decided(&self) -> bool {
        let mut matches = self.current_matches().peekable();
        matches.peek().is_some() && matches.all(Match::is_decided)
    }

    /// Whether the bracket has a shape the engine can produce
    ///
    /// Each round halves the field, rounds before the current one are
    /// fully decided, and a champion only follows a decided final.
    pub fn is_consistent(&self) -> bool {
        let capacity = self.entrant_count.get();
        if self.roster.len() > capacity {
            return false;
        }
        if self.bracket.is_empty() {
            return self.current_round == 0 && !self.active && self.champion.is_none();
        }
        if self.roster.len() != capacity
            || self.current_round >= self.entrant_count.rounds()
            || self.round_count() != self.current_round + 1
            || self.active == self.champion.is_some()
        {
            return false;
        }

        let shaped = (0..=self.current_round).all(|r| {
            let mut count = 0;
            let ids_match = self.round(r).enumerate().all(|(i, m)| {
                count += 1;
                m.id == format!("r{r}-m{i}")
            });
            ids_match && count == capacity >> (r + 1)
        });
        let settled = (0..self.current_round).all(|r| self.round(r).all(Match::is_decided));
        let crowned = self.champion.is_none()
            || (self.current_round + 1 == self.entrant_count.rounds()
                && self.is_current_round_decided());
        shaped && settled && crowned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_clamps_low_and_high() {
        let mut score = Score::default();
        assert_eq!(score.apply(Side::Player1, -3), 0);
        assert_eq!(score.apply(Side::Player1, 30), 21);
        assert_eq!(score.apply(Side::Player2, 7), 7);
        assert_eq!(score, Score { player1: 21, player2: 7 });
    }

    #[test]
    fn test_entrant_count_conversion() {
        assert_eq!(EntrantCount::try_from(4), Ok(EntrantCount::Four));
        assert_eq!(EntrantCount::try_from(8), Ok(EntrantCount::Eight));
        assert_eq!(
            EntrantCount::try_from(6),
            Err(TournamentError::InvalidSize(6))
        );
        assert_eq!(u8::from(EntrantCount::Eight), 8);
    }

    #[test]
    fn test_entrant_count_serializes_as_number() {
        let json = serde_json::to_string(&EntrantCount::Four).unwrap();
        assert_eq!(json, "4");
        let parsed: Result<EntrantCount, _> = serde_json::from_str("5");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_player_equality_by_id() {
        let a = Player::new("Ann");
        let mut renamed = a.clone();
        renamed.name = "Annie".to_string();
        assert_eq!(a, renamed);
        assert_ne!(a, Player::new("Ann"));
    }

    #[test]
    fn test_side_parsing() {
        assert_eq!("player1".parse::<Side>(), Ok(Side::Player1));
        assert_eq!("P2".parse::<Side>(), Ok(Side::Player2));
        assert!("left".parse::<Side>().is_err());
        assert_eq!(serde_json::to_string(&Side::Player2).unwrap(), "\"player2\"");
    }

    #[test]
    fn test_winning_player() {
        let mut m = Match::new(0, 0, Player::new("Ann"), Player::new("Bea"));
        assert!(m.winning_player().is_none());
        m.winner = Some(Side::Player2);
        assert_eq!(m.winning_player().map(|p| p.name.as_str()), Some("Bea"));
    }

    fn started_four() -> TournamentState {
        let roster: Vec<Player> = ["Ann", "Bea", "Cid", "Dee"].map(Player::new).into();
        let mut state = TournamentState::new(EntrantCount::Four);
        state.bracket = vec![
            Match::new(0, 0, roster[0].clone(), roster[1].clone()),
            Match::new(0, 1, roster[2].clone(), roster[3].clone()),
        ];
        state.roster = roster;
        state.active = true;
        state
    }

    #[test]
    fn test_consistent_brackets() {
        assert!(TournamentState::new(EntrantCount::Eight).is_consistent());

        let mut state = started_four();
        assert!(state.is_consistent());

        for m in &mut state.bracket {
            m.winner = Some(Side::Player1);
        }
        let finalists = (state.bracket[0].player1.clone(), state.bracket[1].player1.clone());
        state.bracket.push(Match::new(1, 0, finalists.0, finalists.1));
        state.current_round = 1;
        assert!(state.is_consistent());

        state.bracket[2].winner = Some(Side::Player2);
        state.champion = state.bracket[2].winning_player().cloned();
        state.active = false;
        assert!(state.is_consistent());
    }

    #[test]
    fn test_inconsistent_brackets() {
        let mut past_final = started_four();
        past_final.current_round = 5;
        assert!(!past_final.is_consistent());

        let mut missing_match = started_four();
        missing_match.bracket.pop();
        assert!(!missing_match.is_consistent());

        let mut early_champion = started_four();
        early_champion.champion = Some(early_champion.roster[0].clone());
        early_champion.active = false;
        assert!(!early_champion.is_consistent());

        let mut open_earlier_round = started_four();
        let extra = open_earlier_round.bracket[0].clone();
        open_earlier_round.bracket.push(Match::new(1, 0, extra.player1, extra.player2));
        open_earlier_round.current_round = 1;
        assert!(!open_earlier_round.is_consistent());

        let mut active_without_bracket = TournamentState::new(EntrantCount::Four);
        active_without_bracket.active = true;
        assert!(!active_without_bracket.is_consistent());
    }

    #[test]
    fn test_empty_round_is_not_decided() {
        let state = TournamentState::new(EntrantCount::Four);
        assert!(!state.is_current_round_decided());
        assert_eq!(state.round_count(), 0);
    }
}
