//! Tournament state machine
//!
//! Unstarted -> Active -> (pair, play, re-rank)* -> Ended
//!
//! Players can only be registered while the tournament is not active.
//! Each call to `generate_pairings` closes the previous round, re-ranks the
//! field and pairs the next round. When no new pairing exists (or the round
//! cap is reached) the tournament ends by itself: the final standings go to
//! the presenter and the roster becomes mutable again.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::TournamentConfig;
use crate::error::{Result, TournamentError};
use crate::matchup::Match;
use crate::pairing::pair_round;
use crate::player::{Player, PlayerId};
use crate::presenter::StandingsPresenter;
use crate::result::GameResult;
use crate::roster::Roster;
use crate::standings::{self, Standing};

/// Lifecycle state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TournamentState {
    /// Accepting players, not yet started
    Unstarted,
    /// Roster frozen, rounds being played
    Active,
    /// Pairings exhausted; roster mutable again
    Ended,
}

/// A finished round
#[derive(Clone, Debug)]
pub struct RoundRecord {
    pub number: usize,
    pub matches: Vec<Match>,
    pub byes: Vec<PlayerId>,
}

/// A single Swiss tournament
pub struct Tournament {
    config: TournamentConfig,
    players: Vec<Player>,
    /// Player ids in the order of the last ranking
    standings: Vec<PlayerId>,
    /// Boards of the current round
    pairings: Vec<Match>,
    byes: Vec<PlayerId>,
    state: TournamentState,
    round: usize,
    rounds: Vec<RoundRecord>,
    final_standings: Option<Vec<Standing>>,
    rng: ChaCha8Rng,
    presenter: Option<Box<dyn StandingsPresenter>>,
}

impl Default for Tournament {
    fn default() -> Self {
        Self::new(TournamentConfig::default())
    }
}

impl Tournament {
    pub fn new(config: TournamentConfig) -> Self {
        let rng = create_rng(config.seed);
        Self {
            config,
            players: Vec::new(),
            standings: Vec::new(),
            pairings: Vec::new(),
            byes: Vec::new(),
            state: TournamentState::Unstarted,
            round: 0,
            rounds: Vec::new(),
            final_standings: None,
            rng,
            presenter: None,
        }
    }

    /// Attach the collaborator that displays the final standings
    pub fn with_presenter(mut self, presenter: impl StandingsPresenter + 'static) -> Self {
        self.presenter = Some(Box::new(presenter));
        self
    }

    // ========================================================================
    // Roster
    // ========================================================================

    /// Register a player. Names must be unique; the roster is frozen while
    /// the tournament is active.
    pub fn add_player(&mut self, name: impl Into<String>, rating: i32) -> Result<PlayerId> {
        if self.state == TournamentState::Active {
            return Err(TournamentError::AlreadyStarted);
        }

        let name = name.into();
        if self.player_by_name(&name).is_some() {
            return Err(TournamentError::DuplicatePlayer(name));
        }

        let id = PlayerId(self.players.len() as u32);
        tracing::debug!("Registered {} ({}) as {}", name, rating, id);
        self.players.push(Player::new(id, name, rating));
        Ok(id)
    }

    /// Register every roster entry in order. The roster name is used when
    /// the config does not already name the tournament.
    pub fn add_roster(&mut self, roster: &Roster) -> Result<Vec<PlayerId>> {
        if self.config.name.is_none() {
            self.config.name = roster.name.clone();
        }
        roster
            .players
            .iter()
            .map(|entry| self.add_player(entry.name.clone(), entry.rating))
            .collect()
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Freeze the roster and seed the standings by rating
    pub fn start(&mut self) -> Result<()> {
        if self.state == TournamentState::Active {
            return Err(TournamentError::AlreadyStarted);
        }

        self.state = TournamentState::Active;
        self.final_standings = None;
        self.standings = standings::rank_by_rating(&self.players)
            .iter()
            .map(|p| p.id)
            .collect();

        tracing::info!(
            "Tournament{} started with {} players",
            self.title_suffix(),
            self.players.len()
        );
        Ok(())
    }

    /// Pair the next round using the tournament's own RNG for colours.
    ///
    /// Returns the new boards. An empty slice means the tournament has
    /// ended.
    pub fn generate_pairings(&mut self) -> Result<&[Match]> {
        let mut rng = self.rng.clone();
        let outcome = self.next_round(&mut rng);
        self.rng = rng;
        outcome?;
        Ok(&self.pairings)
    }

    /// Same as `generate_pairings` with a caller-supplied colour source
    pub fn generate_pairings_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&[Match]> {
        self.next_round(rng)?;
        Ok(&self.pairings)
    }

    /// Record the result of a board in the current round and apply it to
    /// both players
    pub fn record_result(&mut self, board: usize, result: GameResult) -> Result<()> {
        if self.state != TournamentState::Active {
            return Err(TournamentError::NotStarted);
        }

        let game = self
            .pairings
            .iter_mut()
            .find(|m| m.board == board)
            .ok_or(TournamentError::NoSuchBoard(board))?;
        game.resolve(result, &mut self.players)?;

        tracing::debug!("Round {} board {}: {}", self.round, board, game);
        Ok(())
    }

    /// `record_result` from a score-sheet literal ("1-0", "0-1", "1/2-1/2")
    pub fn record_result_str(&mut self, board: usize, result: &str) -> Result<()> {
        let result: GameResult = result.parse()?;
        self.record_result(board, result)
    }

    /// Close the tournament: archive the last round, publish the final
    /// standings and reopen the roster
    pub fn end(&mut self) -> Result<()> {
        if self.state != TournamentState::Active {
            return Err(TournamentError::NotStarted);
        }

        self.archive_round();
        let table = self.rerank();

        if let Some(presenter) = self.presenter.as_mut() {
            presenter.present(self.config.name.as_deref(), &table);
        }
        if let Some(winner) = table.first() {
            tracing::info!(
                "Tournament{} ended after {} rounds; winner {} with {} points",
                self.title_suffix(),
                self.round,
                winner.name,
                winner.points
            );
        }

        self.final_standings = Some(table);
        self.state = TournamentState::Ended;
        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn name(&self) -> Option<&str> {
        self.config.name.as_deref()
    }

    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    pub fn state(&self) -> TournamentState {
        self.state
    }

    pub fn is_started(&self) -> bool {
        self.state == TournamentState::Active
    }

    /// Number of rounds paired so far
    pub fn round(&self) -> usize {
        self.round
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_by_name(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    /// Boards of the current round
    pub fn pairings(&self) -> &[Match] {
        &self.pairings
    }

    /// Players without an opponent in the current round
    pub fn byes(&self) -> &[PlayerId] {
        &self.byes
    }

    /// Boards of the current round still waiting for a result
    pub fn pending(&self) -> usize {
        self.pairings.iter().filter(|m| !m.is_committed()).count()
    }

    /// Player ids in the order of the last ranking
    pub fn ranked_ids(&self) -> &[PlayerId] {
        &self.standings
    }

    /// Standings computed from the current player state
    pub fn standings(&self) -> Vec<Standing> {
        standings::table(&self.players)
    }

    /// Table published when the tournament last ended
    pub fn final_standings(&self) -> Option<&[Standing]> {
        self.final_standings.as_deref()
    }

    /// Completed rounds, oldest first
    pub fn rounds(&self) -> &[RoundRecord] {
        &self.rounds
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn next_round<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        if self.state != TournamentState::Active {
            return Err(TournamentError::NotStarted);
        }
        let pending = self.pending();
        if pending > 0 {
            return Err(TournamentError::RoundInProgress { pending });
        }

        self.archive_round();

        if let Some(max) = self.config.max_rounds {
            if self.round >= max {
                tracing::info!("Round limit of {} reached", max);
                return self.end();
            }
        }

        self.rerank();
        let round = {
            let ranked: Vec<&Player> = self
                .standings
                .iter()
                .filter_map(|&id| self.players.iter().find(|p| p.id == id))
                .collect();
            pair_round(&ranked, rng)
        };

        if round.is_exhausted() {
            tracing::info!("No new pairings possible after round {}", self.round);
            return self.end();
        }

        self.round += 1;
        let mut boards = Vec::with_capacity(round.pairings.len());
        for (i, pairing) in round.pairings.iter().enumerate() {
            let white = self
                .player(pairing.white)
                .ok_or(TournamentError::UnknownPlayer(pairing.white))?;
            let black = self
                .player(pairing.black)
                .ok_or(TournamentError::UnknownPlayer(pairing.black))?;
            boards.push(Match::new(i + 1, white, black));
        }

        tracing::info!(
            "Round {}: {} boards, {} without opponent",
            self.round,
            boards.len(),
            round.byes.len()
        );
        self.pairings = boards;
        self.byes = round.byes;
        Ok(())
    }

    /// Recompute the ranking from player state and return it as rows
    fn rerank(&mut self) -> Vec<Standing> {
        let table = standings::table(&self.players);
        self.standings = table.iter().map(|row| row.id).collect();
        table
    }

    /// Move the current round into the archive
    fn archive_round(&mut self) {
        if self.pairings.is_empty() && self.byes.is_empty() {
            return;
        }
        self.rounds.push(RoundRecord {
            number: self.round,
            matches: std::mem::take(&mut self.pairings),
            byes: std::mem::take(&mut self.byes),
        });
    }

    fn title_suffix(&self) -> String {
        match &self.config.name {
            Some(name) => format!(" '{}'", name),
            None => String::new(),
        }
    }
}

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use std::cell::RefCell;
    use std::rc::Rc;

    const RATINGS: [i32; 8] = [1900, 1600, 1300, 1000, 700, 400, 100, 1];

    fn eight_players() -> Tournament {
        let mut t = Tournament::new(TournamentConfig::default().with_seed(42));
        for (i, &rating) in RATINGS.iter().enumerate() {
            t.add_player(format!("John{}", i + 1), rating).unwrap();
        }
        t
    }

    fn board_names(t: &Tournament) -> Vec<(String, String)> {
        t.pairings()
            .iter()
            .map(|m| (m.white_name.clone(), m.black_name.clone()))
            .collect()
    }

    fn ratings_of(t: &Tournament, ids: &[PlayerId]) -> Vec<i32> {
        ids.iter().map(|&id| t.player(id).unwrap().rating).collect()
    }

    #[derive(Clone, Default)]
    struct SharedPresenter(Rc<RefCell<Vec<(Option<String>, Vec<Standing>)>>>);

    impl StandingsPresenter for SharedPresenter {
        fn present(&mut self, name: Option<&str>, standings: &[Standing]) {
            self.0
                .borrow_mut()
                .push((name.map(str::to_string), standings.to_vec()));
        }
    }

    #[test]
    fn test_add_player_after_start_rejected() {
        let mut t = eight_players();
        t.start().unwrap();
        assert_eq!(t.add_player("late", 1500), Err(TournamentError::AlreadyStarted));
        assert_eq!(t.start(), Err(TournamentError::AlreadyStarted));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut t = Tournament::default();
        t.add_player("a", 1000).unwrap();
        assert_eq!(
            t.add_player("a", 1200),
            Err(TournamentError::DuplicatePlayer("a".to_string()))
        );
    }

    #[test]
    fn test_generate_before_start_rejected() {
        let mut t = eight_players();
        assert_eq!(t.generate_pairings().err(), Some(TournamentError::NotStarted));
        assert_eq!(t.end(), Err(TournamentError::NotStarted));
        assert_eq!(
            t.record_result(1, GameResult::Draw),
            Err(TournamentError::NotStarted)
        );
    }

    #[test]
    fn test_start_orders_by_rating() {
        let mut t = Tournament::default();
        t.add_player("low", 100).unwrap();
        t.add_player("high", 1900).unwrap();
        t.add_player("mid", 1000).unwrap();
        t.start().unwrap();

        assert!(t.is_started());
        assert_eq!(ratings_of(&t, t.ranked_ids()), vec![1900, 1000, 100]);
    }

    #[test]
    fn test_first_round_adjacent_pairs() {
        let mut t = eight_players();
        t.start().unwrap();
        assert_eq!(ratings_of(&t, t.ranked_ids()), RATINGS.to_vec());

        let boards = t.generate_pairings_with(&mut StepRng::new(0, 0)).unwrap();
        assert_eq!(boards.len(), 4);
        assert_eq!(t.round(), 1);
        assert_eq!(
            board_names(&t),
            vec![
                ("John1".to_string(), "John2".to_string()),
                ("John3".to_string(), "John4".to_string()),
                ("John5".to_string(), "John6".to_string()),
                ("John7".to_string(), "John8".to_string()),
            ]
        );
        assert!(t.pairings().iter().all(|m| m.status() == "Ongoing"));
    }

    #[test]
    fn test_second_round_after_results() {
        let mut t = eight_players();
        t.start().unwrap();
        t.generate_pairings_with(&mut StepRng::new(0, 0)).unwrap();
        for (board, result) in ["1-0", "0-1", "1/2-1/2", "1-0"].iter().enumerate() {
            t.record_result_str(board + 1, result).unwrap();
        }

        let points: Vec<f32> = t.players().iter().map(|p| p.points()).collect();
        assert_eq!(points, vec![1.0, 0.0, 0.0, 1.0, 0.5, 0.5, 1.0, 0.0]);

        let round1: Vec<_> = t.pairings().iter().map(Match::pair).collect();
        t.generate_pairings_with(&mut StepRng::new(0, 0)).unwrap();

        // Re-ranked: 1900, 1000, 100 on 1; 700, 400 on 0.5; 1600, 1300, 1 on 0
        assert_eq!(
            ratings_of(&t, t.ranked_ids()),
            vec![1900, 1000, 100, 700, 400, 1600, 1300, 1]
        );
        assert_eq!(
            board_names(&t),
            vec![
                ("John1".to_string(), "John4".to_string()),
                ("John7".to_string(), "John6".to_string()),
                ("John5".to_string(), "John3".to_string()),
                ("John2".to_string(), "John8".to_string()),
            ]
        );
        for game in t.pairings() {
            assert!(!round1.contains(&game.pair()));
        }
        assert_eq!(t.rounds().len(), 1);
        assert_eq!(t.rounds()[0].matches.len(), 4);
    }

    #[test]
    fn test_round_in_progress() {
        let mut t = eight_players();
        t.start().unwrap();
        t.generate_pairings().unwrap();
        t.record_result(1, GameResult::Draw).unwrap();
        assert_eq!(
            t.generate_pairings().err(),
            Some(TournamentError::RoundInProgress { pending: 3 })
        );
    }

    #[test]
    fn test_result_errors() {
        let mut t = eight_players();
        t.start().unwrap();
        t.generate_pairings().unwrap();

        assert_eq!(t.record_result(9, GameResult::Draw), Err(TournamentError::NoSuchBoard(9)));
        assert_eq!(
            t.record_result_str(1, "2-0"),
            Err(TournamentError::InvalidResult("2-0".to_string()))
        );
        t.record_result(1, GameResult::WhiteWins).unwrap();
        assert_eq!(
            t.record_result(1, GameResult::BlackWins),
            Err(TournamentError::MatchAlreadyResolved)
        );
        assert_eq!(t.pairings()[0].result(), Some(GameResult::WhiteWins));
    }

    #[test]
    fn test_plays_to_exhaustion_and_ends() {
        let presenter = SharedPresenter::default();
        let mut t = Tournament::new(TournamentConfig::default().named("Club").with_seed(7))
            .with_presenter(presenter.clone());
        for (i, &rating) in [1500, 1400, 1300, 1200].iter().enumerate() {
            t.add_player(format!("P{}", i), rating).unwrap();
        }
        t.start().unwrap();

        let mut rounds = 0;
        loop {
            let boards = t.generate_pairings().unwrap().len();
            if boards == 0 {
                break;
            }
            rounds += 1;
            for board in 1..=boards {
                t.record_result(board, GameResult::Draw).unwrap();
            }
            assert!(rounds <= 6, "more rounds than distinct pairs");
        }

        assert_eq!(t.state(), TournamentState::Ended);
        assert!(!t.is_started());
        for p in t.players() {
            assert_eq!(p.points(), p.score_from_history());
        }

        let shown = presenter.0.borrow();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].0.as_deref(), Some("Club"));
        assert_eq!(shown[0].1.len(), 4);
        assert_eq!(t.final_standings().map(|s| s.len()), Some(4));
    }

    #[test]
    fn test_round_limit() {
        let mut t = Tournament::new(TournamentConfig::default().with_rounds(1).with_seed(1));
        for (i, &rating) in RATINGS.iter().enumerate() {
            t.add_player(format!("P{}", i), rating).unwrap();
        }
        t.start().unwrap();
        let boards = t.generate_pairings().unwrap().len();
        for board in 1..=boards {
            t.record_result(board, GameResult::BlackWins).unwrap();
        }
        assert!(t.generate_pairings().unwrap().is_empty());
        assert_eq!(t.state(), TournamentState::Ended);
        assert_eq!(t.round(), 1);
    }

    #[test]
    fn test_roster_reopens_after_end() {
        let mut t = Tournament::default();
        t.add_player("a", 1000).unwrap();
        t.add_player("b", 900).unwrap();
        t.start().unwrap();
        t.generate_pairings().unwrap();
        t.record_result(1, GameResult::Draw).unwrap();
        assert!(t.generate_pairings().unwrap().is_empty());

        assert_eq!(t.state(), TournamentState::Ended);
        t.add_player("c", 800).unwrap();
        t.start().unwrap();
        let boards = t.generate_pairings().unwrap();
        assert_eq!(boards.len(), 1);
        assert!(!boards[0].involves(PlayerId(0)) || !boards[0].involves(PlayerId(1)));
    }

    #[test]
    fn test_odd_field_reports_bye() {
        let mut t = Tournament::default();
        for (name, rating) in [("a", 1500), ("b", 1400), ("c", 1300)] {
            t.add_player(name, rating).unwrap();
        }
        t.start().unwrap();
        t.generate_pairings().unwrap();
        assert_eq!(t.byes(), &[PlayerId(2)]);
        assert_eq!(t.player(PlayerId(2)).unwrap().points(), 0.0);
    }

    #[test]
    fn test_add_roster() {
        let roster = Roster::from_json(
            r#"{"name": "Open", "players": [{"name": "x", "rating": 10}, {"name": "y", "rating": 20}]}"#,
        )
        .unwrap();
        let mut t = Tournament::default();
        let ids = t.add_roster(&roster).unwrap();
        assert_eq!(ids, vec![PlayerId(0), PlayerId(1)]);
        assert_eq!(t.name(), Some("Open"));
    }
}
