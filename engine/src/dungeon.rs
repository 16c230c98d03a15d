//! Building the dungeon from ASCII level maps.

use anyhow::{bail, Context};
use rand::Rng;
use util::{AsciiMap, Dice};

use crate::{item::TRAP_DAMAGE, prelude::*, Orientation, Result, Trap};

/// Thing placed on the map by a legend character.
#[derive(Clone, PartialEq, Debug)]
pub(crate) enum Spawn {
    Mob(Species),
    Item(ItemKind),
}

/// Parsed dungeon before it's turned into a runtime.
#[derive(Clone, Debug)]
pub(crate) struct Dungeon {
    pub levels: Vec<Level>,
    /// Creatures and items in map scan order.
    pub spawns: Vec<(Location, Spawn)>,
}

impl Dungeon {
    pub fn parse(maps: &[&str], rng: &mut impl Rng) -> Result<Dungeon> {
        let trap_damage: Dice =
            TRAP_DAMAGE.parse().context("invalid trap damage")?;

        let mut levels = Vec::new();
        let mut spawns = Vec::new();

        for (z, text) in maps.iter().enumerate() {
            let z = z as i32;
            let map = AsciiMap::new(text);
            if map.is_empty() {
                bail!("level {z} is empty");
            }

            if map.rows().any(|(_, row)| row.len() as i32 != map.width()) {
                log::warn!("level {z} has ragged rows, padding with wall");
            }
            let mut level = Level::new(map.width(), map.height(), Tile::Wall);
            for (pos, c) in map.iter() {
                let loc = Location::new(pos.x, pos.y, z);
                let tile = if let Some(tile) = Tile::from_glyph(c) {
                    tile
                } else if let Some(species) = Species::from_glyph(c) {
                    spawns.push((loc, Spawn::Mob(species)));
                    Tile::Floor
                } else if let Some(kind) = item_from_glyph(c, trap_damage, rng)
                {
                    spawns.push((loc, Spawn::Item(kind)));
                    Tile::Floor
                } else {
                    bail!("unknown map character {c:?} at {loc}");
                };
                level.set_tile(pos, tile);
            }

            for pos in level.find(|t| matches!(t, Tile::Door { .. })) {
                let walls =
                    DIR_4.map(|d| level.tile(pos + d) == Some(Tile::Wall));
                level.set_tile(pos, Tile::door(Orientation::from_walls(walls)));
            }

            levels.push(level);
        }

        match spawns
            .iter()
            .filter(|(_, s)| *s == Spawn::Mob(Species::Player))
            .count()
        {
            0 => bail!("dungeon has no player start"),
            1 => {}
            n => bail!("dungeon has {n} player starts"),
        }

        Ok(Dungeon { levels, spawns })
    }
}

fn item_from_glyph(
    c: char,
    trap_damage: Dice,
    rng: &mut impl Rng,
) -> Option<ItemKind> {
    match c {
        '$' => Some(ItemKind::coin(rng)),
        'k' => Some(ItemKind::Key),
        'f' => Some(ItemKind::food(rng)),
        'a' => Some(ItemKind::Arrow),
        'T' => Some(ItemKind::Trap(Trap::new(trap_damage))),
        '=' => Some(ItemKind::Download),
        _ => None,
    }
}
