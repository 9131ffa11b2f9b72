//! Configuration types for a tournament

use serde::{Deserialize, Serialize};

/// Tournament configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentConfig {
    /// Display name passed to the standings presenter
    #[serde(default)]
    pub name: Option<String>,
    /// Stop after this many rounds even if pairings remain (None = play until
    /// no new pairing exists)
    #[serde(default)]
    pub max_rounds: Option<usize>,
    /// Seed for colour assignment (None = random)
    #[serde(default)]
    pub seed: Option<u64>,
}

impl TournamentConfig {
    /// Set the tournament name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Cap the number of rounds
    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.max_rounds = Some(rounds);
        self
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = TournamentConfig::default();
        assert_eq!(config.name, None);
        assert_eq!(config.max_rounds, None);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_config_builders() {
        let config = TournamentConfig::default().named("Club Open").with_rounds(5).with_seed(42);
        assert_eq!(config.name.as_deref(), Some("Club Open"));
        assert_eq!(config.max_rounds, Some(5));
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_config_from_partial_json() {
        let config: TournamentConfig = serde_json::from_str(r#"{"max_rounds": 3}"#).unwrap();
        assert_eq!(config.max_rounds, Some(3));
        assert_eq!(config.name, None);
    }
}
