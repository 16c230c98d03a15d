pub(crate) use crate::msg::msg;
pub use crate::{
    Cell, Config, Effect, EffectKind, Item, ItemId, ItemKind, Level, LineMode,
    Location, Monster, MonsterId, Msg, Runtime, Species, Tile,
};
pub use glam::{ivec2, IVec2};
pub use util::{HashSet, RngExt, VecExt, DIR_4, DIR_8};
