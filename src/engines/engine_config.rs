//! Runtime configuration of the minimax engine.

use serde::{Deserialize, Serialize};

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::search::board_scoring::EvaluationWeights;

pub const DEFAULT_SEARCH_DEPTH: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub depth: u8,
    pub weights: EvaluationWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_SEARCH_DEPTH,
            weights: EvaluationWeights::default(),
        }
    }
}

impl EngineConfig {
    /// Apply a string-keyed option. Names are matched case-insensitively.
    pub fn set_option(&mut self, name: &str, value: &str) -> ChessResult<()> {
        let invalid = || ChessErrors::InvalidOption {
            name: name.to_owned(),
            value: value.to_owned(),
        };
        let as_weight = || -> ChessResult<f64> {
            value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(invalid)
        };

        match name.trim().to_ascii_lowercase().as_str() {
            "depth" => {
                let depth = value.trim().parse::<u8>().map_err(|_| invalid())?;
                if depth == 0 {
                    return Err(invalid());
                }
                self.depth = depth;
            }
            "mobility" => self.weights.mobility = as_weight()?,
            "attackpotential" => self.weights.attack_potential = as_weight()?,
            "kingsafety" => self.weights.king_safety = as_weight()?,
            "pawnchain" => self.weights.pawn_chain = as_weight()?,
            "isolatedpawn" => self.weights.isolated_pawn = as_weight()?,
            "connectivity" => self.weights.connectivity = as_weight()?,
            _ => return Err(invalid()),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::EngineConfig;
    use crate::chess_errors::ChessErrors;

    #[test]
    fn options_update_depth_and_weights() {
        let mut config = EngineConfig::default();
        assert_eq!(config.depth, 3);

        config.set_option("Depth", "4").expect("depth is valid");
        config.set_option("Mobility", "0.25").expect("weight is valid");
        config.set_option("isolatedpawn", "-0.5").expect("weight is valid");
        assert_eq!(config.depth, 4);
        assert_eq!(config.weights.mobility, 0.25);
        assert_eq!(config.weights.isolated_pawn, -0.5);
    }

    #[test]
    fn bad_options_are_rejected_unchanged() {
        let mut config = EngineConfig::default();
        for (name, value) in [("Depth", "0"), ("Depth", "deep"), ("Mobility", "NaN"), ("Hash", "64")] {
            assert_eq!(
                config.set_option(name, value),
                Err(ChessErrors::InvalidOption {
                    name: name.to_owned(),
                    value: value.to_owned(),
                })
            );
        }
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn config_round_trips_through_json() {
        let mut config = EngineConfig::default();
        config.set_option("KingSafety", "3").expect("weight is valid");
        let json = serde_json::to_string(&config).expect("config serializes");
        let back: EngineConfig = serde_json::from_str(&json).expect("config deserializes");
        assert_eq!(back, config);
    }
}
