//! Run command - simulate a whole tournament
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run(), demo() - orchestration
//! - Level 2: build_tournament(), play_tournament()
//! - Level 3: simulate::play_out()
//! - Level 4: roster and RNG utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use swiss_core::{Roster, RosterEntry, StandingsPresenter, Tournament, TournamentConfig};

use crate::render::{self, JsonPresenter, TextPresenter};
use crate::simulate;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct RunArgs {
    /// Roster JSON file
    #[arg(long, value_name = "FILE")]
    pub roster: PathBuf,

    /// Stop after this many rounds (default: until no pairing remains)
    #[arg(long)]
    pub rounds: Option<usize>,

    /// Output final standings as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct DemoArgs {
    /// Stop after this many rounds (default: until no pairing remains)
    #[arg(long)]
    pub rounds: Option<usize>,

    /// Output final standings as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run a simulated tournament from a roster file
pub fn run(args: RunArgs, seed: Option<u64>) -> Result<()> {
    let roster = Roster::load(&args.roster)?;
    let tournament = build_tournament(&roster, args.rounds, seed, args.json)?;
    play_tournament(tournament, seed, args.json)
}

/// Run the built-in eight-player tournament
pub fn demo(args: DemoArgs, seed: Option<u64>) -> Result<()> {
    let roster = demo_roster();
    let tournament = build_tournament(&roster, args.rounds, seed, args.json)?;
    play_tournament(tournament, seed, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Register the roster and start the tournament
fn build_tournament(
    roster: &Roster,
    rounds: Option<usize>,
    seed: Option<u64>,
    json: bool,
) -> Result<Tournament> {
    let config = TournamentConfig {
        name: roster.name.clone(),
        max_rounds: rounds,
        seed,
    };

    let presenter: Box<dyn StandingsPresenter> = if json {
        Box::new(JsonPresenter)
    } else {
        Box::new(TextPresenter)
    };
    let mut tournament = Tournament::new(config).with_presenter(presenter);

    tournament
        .add_roster(roster)
        .context("Failed to register roster")?;
    tournament.start().context("Failed to start tournament")?;
    Ok(tournament)
}

/// Pair and simulate rounds until the tournament ends by itself
fn play_tournament(mut tournament: Tournament, seed: Option<u64>, json: bool) -> Result<()> {
    let mut rng = create_rng(seed.map(|s| s.wrapping_add(1)));

    let rounds = simulate::play_out(&mut tournament, &mut rng, |round, boards| {
        if !json {
            print!("{}", render::format_round(round, boards));
        }
    })
    .context("Tournament simulation failed")?;

    tracing::info!("Played {} rounds", rounds);
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Eight players spread 300 rating points apart
pub fn demo_roster() -> Roster {
    let ratings = [1900, 1600, 1300, 1000, 700, 400, 100, 1];
    Roster {
        name: Some("Demo Swiss".to_string()),
        players: ratings
            .iter()
            .enumerate()
            .map(|(i, &rating)| RosterEntry {
                name: format!("John{}", i + 1),
                rating,
            })
            .collect(),
    }
}

/// Create RNG from seed or random
pub fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
