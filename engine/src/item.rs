//! Entity logic for items.

use derive_more::{Display, From};
use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;
use util::Dice;

use crate::prelude::*;

/// Damage dice for traps placed from the map legend.
pub const TRAP_DAMAGE: &str = "1d6";

#[derive(
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    Ord,
    PartialOrd,
    Debug,
    Display,
    From,
    Serialize,
    Deserialize,
)]
pub struct ItemId(pub u32);

#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Trap {
    pub damage: Dice,
    pub detected: bool,
    pub disarmed: bool,
    pub chance_to_detect: f64,
    pub chance_to_destroy: f64,
}

impl Trap {
    pub fn new(damage: Dice) -> Self {
        Trap {
            damage,
            detected: false,
            disarmed: false,
            chance_to_detect: 0.3,
            chance_to_destroy: 0.5,
        }
    }

    /// Trap can still go off.
    pub fn is_armed(&self) -> bool {
        !self.disarmed
    }
}

#[derive(
    Copy, Clone, PartialEq, Debug, Serialize, Deserialize, IntoStaticStr,
)]
pub enum ItemKind {
    Coin { value: i32 },
    Key,
    Food { nutrition: i32 },
    Arrow,
    Trap(Trap),
    Download,
}

impl ItemKind {
    /// Randomly valued coin.
    pub fn coin(rng: &mut impl Rng) -> Self {
        const VALUES: [i32; 15] =
            [1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 5, 5, 10];
        ItemKind::Coin {
            value: VALUES.choose(rng).copied().unwrap_or(1),
        }
    }

    /// Randomly nourishing food.
    pub fn food(rng: &mut impl Rng) -> Self {
        ItemKind::Food {
            nutrition: rng.gen_range(1..=3),
        }
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn glyph(&self) -> char {
        match self {
            ItemKind::Coin { .. } => '$',
            ItemKind::Key => 'k',
            ItemKind::Food { .. } => 'f',
            ItemKind::Arrow => 'a',
            ItemKind::Trap(_) => 'T',
            ItemKind::Download => '=',
        }
    }

    /// Message shown when the player picks up the item.
    pub fn pickup_text(&self) -> String {
        match self {
            ItemKind::Coin { value } => format!("You found {value} gold."),
            ItemKind::Key => "A key. It opens locked doors.".into(),
            ItemKind::Food { nutrition } => {
                format!("This is {} food.", food_quality(*nutrition))
            }
            ItemKind::Arrow => "An arrow. You can shoot it now.".into(),
            ItemKind::Trap(_) => "You pocket a disarmed trap.".into(),
            ItemKind::Download => {
                "You download a data file from the terminal.".into()
            }
        }
    }
}

/// Description word for how good food is.
pub fn food_quality(nutrition: i32) -> &'static str {
    match nutrition {
        i32::MIN..=1 => "edible",
        2 => "good",
        _ => "fantastic",
    }
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Item {
    pub kind: ItemKind,
    pub loc: Location,
    /// Item is carried by the player and no longer on the map.
    pub backpack: bool,
}

impl Item {
    pub fn new(kind: ItemKind, loc: Location) -> Self {
        Item {
            kind,
            loc,
            backpack: false,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Item lies on the map at the given location.
    pub fn is_at(&self, loc: Location) -> bool {
        !self.backpack && self.loc == loc
    }
}
