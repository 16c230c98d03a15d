//! Game logic layer machinery.

/// How far can the player see by default.
pub const TORCH_RADIUS: i32 = 12;

/// Default chance per turn for a fire to ignite the oil it's burning on.
pub const OIL_IGNITE_CHANCE: f64 = 0.2;

/// Default seed for the game rng.
pub const DEFAULT_SEED: u64 = 0xdeadbeef;

mod action;

mod ai;

mod config;
pub use config::Config;

mod data;
pub use data::LEVELS;

mod dungeon;

mod effect;
pub use effect::{Effect, EffectId, EffectKind, Effects};

mod item;
pub use item::{Item, ItemId, ItemKind, Trap};

mod level;
pub use level::{Cell, Level};

mod location;
pub use location::Location;

mod los;
pub use los::{Clearance, LineMode};

mod mob;
pub use mob::{
    Buff, BuffId, BuffKind, Monster, MonsterId, PlayerStats, Ranged, Species,
};

mod msg;
pub use msg::Msg;

pub mod prelude;

mod registry;
pub use registry::Registry;

mod runtime;
pub use runtime::Runtime;

mod tile;
pub use tile::{Orientation, Tile};

mod turn;

mod vision;

pub type Result<T> = anyhow::Result<T>;
