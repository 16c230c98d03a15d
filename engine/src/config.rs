use serde::{Deserialize, Serialize};

use crate::{DEFAULT_SEED, OIL_IGNITE_CHANCE, TORCH_RADIUS};

/// Tunable game parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Field of view radius around the player.
    pub torch_radius: i32,
    /// Per turn chance for a fire effect to ignite the oil below it.
    pub oil_ignite_chance: f64,
    /// Seed for the game's random number generator.
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            torch_radius: TORCH_RADIUS,
            oil_ignite_chance: OIL_IGNITE_CHANCE,
            seed: DEFAULT_SEED,
        }
    }
}
