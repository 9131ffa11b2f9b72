//! Pair command - show the first round for a roster without playing it

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use swiss_core::{Roster, Tournament, TournamentConfig};

use crate::render;

#[derive(Args)]
pub struct PairArgs {
    /// Roster JSON file
    #[arg(long, value_name = "FILE")]
    pub roster: PathBuf,

    /// Output pairings as JSON
    #[arg(long)]
    pub json: bool,
}

/// Print round-one pairings
pub fn run(args: PairArgs, seed: Option<u64>) -> Result<()> {
    let roster = Roster::load(&args.roster)?;
    let config = TournamentConfig {
        seed,
        ..Default::default()
    };
    let mut tournament = Tournament::new(config);
    tournament.add_roster(&roster).context("Failed to register roster")?;
    tournament.start().context("Failed to start tournament")?;
    tournament
        .generate_pairings()
        .context("Failed to generate pairings")?;

    if args.json {
        print_json(&tournament)?;
    } else {
        print!("{}", render::format_round(tournament.round(), tournament.pairings()));
        for &id in tournament.byes() {
            if let Some(player) = tournament.player(id) {
                println!("  No opponent: {}", player.name);
            }
        }
    }
    Ok(())
}

fn print_json(tournament: &Tournament) -> Result<()> {
    #[derive(Serialize)]
    struct JsonBoard<'a> {
        board: usize,
        white: &'a str,
        black: &'a str,
    }

    #[derive(Serialize)]
    struct JsonRound<'a> {
        round: usize,
        boards: Vec<JsonBoard<'a>>,
        byes: Vec<&'a str>,
    }

    let output = JsonRound {
        round: tournament.round(),
        boards: tournament
            .pairings()
            .iter()
            .map(|m| JsonBoard {
                board: m.board,
                white: &m.white_name,
                black: &m.black_name,
            })
            .collect(),
        byes: tournament
            .byes()
            .iter()
            .filter_map(|&id| tournament.player(id))
            .map(|p| p.name.as_str())
            .collect(),
    };

    let json = serde_json::to_string_pretty(&output).context("Failed to serialize pairings")?;
    println!("{}", json);
    Ok(())
}
