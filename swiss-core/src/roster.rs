//! Roster - list of entrants loaded from JSON

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// A single entrant before registration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub rating: i32,
}

/// Entrants for one tournament
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub name: Option<String>,
    pub players: Vec<RosterEntry>,
}

impl Roster {
    pub fn new(players: Vec<RosterEntry>) -> Self {
        Self { name: None, players }
    }

    /// Load from a JSON file. Accepts either `{"name": .., "players": [..]}`
    /// or a bare array of entries.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read roster: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Failed to parse roster: {}", path.display()))
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        if let Ok(roster) = serde_json::from_str::<Roster>(content) {
            roster.validate()?;
            return Ok(roster);
        }

        let players: Vec<RosterEntry> = serde_json::from_str(content)?;
        let roster = Roster::new(players);
        roster.validate()?;
        Ok(roster)
    }

    /// Save as pretty JSON
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write roster: {}", path.display()))?;
        Ok(())
    }

    fn validate(&self) -> anyhow::Result<()> {
        let mut seen = HashSet::new();
        for entry in &self.players {
            if entry.name.trim().is_empty() {
                anyhow::bail!("Roster contains a player with an empty name");
            }
            if !seen.insert(entry.name.as_str()) {
                anyhow::bail!("Duplicate player in roster: {}", entry.name);
            }
        }
        Ok(())
    }
}
