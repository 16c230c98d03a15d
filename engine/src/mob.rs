//! Entity logic for active creatures.
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoStaticStr};

use crate::{prelude::*, EffectKind};

/// Monster identifier, assigned by the monster registry.
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
pub struct MonsterId(pub u32);

/// Buff identifier, unique over the whole game.
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
pub struct BuffId(pub u32);

/// Ranged attack capability of a species.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Ranged {
    pub effect: EffectKind,
    /// Chance per turn to use the attack.
    pub chance: f64,
    /// How many points of the line towards the target get the effect.
    pub reach: usize,
    pub max_age: i32,
}

#[derive(
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    Debug,
    Serialize,
    Deserialize,
    EnumIter,
    IntoStaticStr,
)]
pub enum Species {
    Player,
    Monster,
    Dragon,
    SkyDragon,
    Waterguy,
}

use Species::*;

impl Species {
    pub fn from_glyph(c: char) -> Option<Species> {
        match c {
            '@' => Some(Player),
            'M' => Some(Monster),
            'D' => Some(Dragon),
            'S' => Some(SkyDragon),
            'W' => Some(Waterguy),
            _ => None,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Player => '@',
            Monster => 'M',
            Dragon => 'D',
            SkyDragon => 'S',
            Waterguy => 'W',
        }
    }

    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn max_hp(self) -> i32 {
        match self {
            Player => 50,
            Monster => 10,
            Dragon => 50,
            SkyDragon => 50,
            Waterguy => 25,
        }
    }

    pub fn is_friendly(self) -> bool {
        self == Player
    }

    /// Per axis step choices for random walkers, empty for stationary
    /// species.
    pub fn walk_choices(self) -> &'static [i32] {
        match self {
            Monster | Dragon | SkyDragon => &[0, 0, 0, 1, -1],
            Waterguy => &[0, 0, 0, 0, 0, 0, 1, -1],
            _ => &[],
        }
    }

    pub fn ranged(self) -> Option<Ranged> {
        match self {
            Dragon => Some(Ranged {
                effect: EffectKind::Fire,
                chance: 0.2,
                reach: 6,
                max_age: 3,
            }),
            SkyDragon => Some(Ranged {
                effect: EffectKind::Flash,
                chance: 0.1,
                reach: 10,
                max_age: 1,
            }),
            Waterguy => Some(Ranged {
                effect: EffectKind::Water,
                chance: 0.5,
                reach: 6,
                max_age: 3,
            }),
            _ => None,
        }
    }
}

/// Stats only the player has.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct PlayerStats {
    pub mana: i32,
    pub max_mana: i32,
    pub stamina: i32,
    pub max_stamina: i32,
    pub level: i32,
    pub xp: i32,
    pub shield: bool,
}

impl Default for PlayerStats {
    fn default() -> Self {
        PlayerStats {
            mana: 20,
            max_mana: 20,
            stamina: 20,
            max_stamina: 20,
            level: 1,
            xp: 0,
            shield: false,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub enum BuffKind {
    Shield,
    Regeneration,
}

/// Timed status modifier on a creature.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Buff {
    pub id: BuffId,
    pub owner: MonsterId,
    pub kind: BuffKind,
    pub age: i32,
    pub max_age: i32,
    pub hp_change: i32,
    pub mana_upkeep: i32,
    /// Only one buff of this kind can be on a creature at a time.
    pub unique: bool,
    pub active: bool,
}

impl Buff {
    pub fn new(id: BuffId, owner: MonsterId, kind: BuffKind) -> Self {
        let (max_age, hp_change, mana_upkeep) = match kind {
            BuffKind::Shield => (20, 0, 1),
            BuffKind::Regeneration => (5, 1, 0),
        };
        Buff {
            id,
            owner,
            kind,
            age: 0,
            max_age,
            hp_change,
            mana_upkeep,
            unique: true,
            active: true,
        }
    }
}

/// A creature, the player included.
#[derive(Clone, PartialEq, Debug)]
pub struct Monster {
    pub species: Species,
    pub loc: Location,
    pub hp: i32,
    pub max_hp: i32,
    pub friendly: bool,
    pub buffs: Vec<Buff>,
    /// Present only on the player.
    pub stats: Option<PlayerStats>,
}

impl Monster {
    pub fn new(species: Species, loc: Location) -> Self {
        Monster {
            species,
            loc,
            hp: species.max_hp(),
            max_hp: species.max_hp(),
            friendly: species.is_friendly(),
            buffs: Default::default(),
            stats: (species == Player).then(PlayerStats::default),
        }
    }

    pub fn name(&self) -> &'static str {
        self.species.name()
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn is_hostile_to(&self, other: &Monster) -> bool {
        self.friendly != other.friendly
    }

    pub fn has_buff(&self, kind: BuffKind) -> bool {
        self.buffs.iter().any(|b| b.active && b.kind == kind)
    }

    /// Heal up to max hp, return how much was actually healed.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let old = self.hp;
        self.hp = (self.hp + amount.max(0)).min(self.max_hp).max(old);
        self.hp - old
    }

    /// Run one turn of the creature's buffs and drop the ones that ran out.
    ///
    /// Returns the kinds of buffs that ended.
    pub(crate) fn tick_buffs(&mut self) -> Vec<BuffKind> {
        let mut buffs = std::mem::take(&mut self.buffs);
        for b in buffs.iter_mut() {
            if !b.active {
                continue;
            }

            if b.mana_upkeep > 0 {
                match self.stats.as_mut() {
                    Some(s) if s.mana >= b.mana_upkeep => {
                        s.mana -= b.mana_upkeep
                    }
                    _ => {
                        b.active = false;
                        continue;
                    }
                }
            }

            if b.hp_change > 0 {
                self.heal(b.hp_change);
            } else {
                self.hp += b.hp_change;
            }

            b.age += 1;
            if b.age >= b.max_age {
                b.active = false;
            }
        }

        let ended = buffs
            .iter()
            .filter_map(|b| (!b.active).then_some(b.kind))
            .collect();
        buffs.retain(|b| b.active);
        self.buffs = buffs;

        if let Some(s) = self.stats.as_mut() {
            s.shield = self.buffs.iter().any(|b| b.kind == BuffKind::Shield);
        }
        ended
    }
}

impl MonsterId {
    pub fn is_player(&self, r: &impl AsRef<Runtime>) -> bool {
        r.as_ref().player() == *self
    }

    pub fn is_alive(&self, r: &impl AsRef<Runtime>) -> bool {
        r.as_ref().mob(*self).map_or(false, |m| m.is_alive())
    }

    pub fn name(&self, r: &impl AsRef<Runtime>) -> &'static str {
        r.as_ref().mob(*self).map_or("nothing", |m| m.name())
    }
}
