//! Standings presentation - text table and JSON
//!
//! Both presenters write to stdout; the table builder is separate so it can
//! be tested.

use serde::Serialize;
use swiss_core::{Match, Standing, StandingsPresenter};

/// Prints an aligned text table
pub struct TextPresenter;

/// Prints the standings as pretty JSON
pub struct JsonPresenter;

impl StandingsPresenter for TextPresenter {
    fn present(&mut self, name: Option<&str>, standings: &[Standing]) {
        print!("{}", format_table(name, standings));
    }
}

impl StandingsPresenter for JsonPresenter {
    fn present(&mut self, name: Option<&str>, standings: &[Standing]) {
        match standings_json(name, standings) {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::warn!("Failed to serialize standings: {}", e),
        }
    }
}

/// Standings as a fixed-width table
pub fn format_table(name: Option<&str>, standings: &[Standing]) -> String {
    let mut out = String::new();
    match name {
        Some(name) => out.push_str(&format!("\n=== Final Standings: {} ===\n", name)),
        None => out.push_str("\n=== Final Standings ===\n"),
    }
    out.push_str(&format!(
        "{:>4}  {:<24} {:>6} {:>7} {:>6}\n",
        "Rank", "Name", "Points", "Rating", "Games"
    ));
    out.push_str(&"-".repeat(51));
    out.push('\n');

    for row in standings {
        out.push_str(&format!(
            "{:>4}  {:<24} {:>6} {:>7} {:>6}\n",
            row.rank,
            row.name,
            format_points(row.points),
            row.rating,
            row.games_played
        ));
    }
    out
}

/// Standings as JSON, titled with the tournament name if there is one
pub fn standings_json(name: Option<&str>, standings: &[Standing]) -> serde_json::Result<String> {
    #[derive(Serialize)]
    struct JsonStandings<'a> {
        name: Option<&'a str>,
        standings: &'a [Standing],
    }

    serde_json::to_string_pretty(&JsonStandings { name, standings })
}

/// One line per board of a round
pub fn format_round(round: usize, boards: &[Match]) -> String {
    let mut out = format!("\nRound {}\n", round);
    for game in boards {
        out.push_str(&format!("  Board {}: {}\n", game.board, game));
    }
    out
}

/// "1", "0.5", "2.5": half points only ever need one decimal
fn format_points(points: f32) -> String {
    if points.fract() == 0.0 {
        format!("{}", points as i64)
    } else {
        format!("{:.1}", points)
    }
}
