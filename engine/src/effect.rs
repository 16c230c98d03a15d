//! Short-lived hazards on the map.
use derive_more::{Deref, Display, From};
use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::{prelude::*, Registry};

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
pub struct EffectId(pub u32);

#[derive(
    Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize, IntoStaticStr,
)]
pub enum EffectKind {
    Fire,
    Water,
    Flash,
}

impl EffectKind {
    /// Damage dealt to the player standing in the effect.
    pub fn damage(self) -> i32 {
        match self {
            EffectKind::Fire => 4,
            EffectKind::Water => 3,
            EffectKind::Flash => 2,
        }
    }

    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn glyph(self) -> char {
        match self {
            EffectKind::Fire => '*',
            EffectKind::Water => '~',
            EffectKind::Flash => '!',
        }
    }
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Effect {
    pub kind: EffectKind,
    pub pos: IVec2,
    pub velocity: IVec2,
    pub age: i32,
    /// Effect lives forever when unset.
    pub max_age: Option<i32>,
    pub destroy: bool,
}

impl Effect {
    pub fn new(kind: EffectKind, pos: IVec2, max_age: Option<i32>) -> Self {
        Effect {
            kind,
            pos,
            velocity: IVec2::ZERO,
            age: 0,
            max_age,
            destroy: false,
        }
    }

    pub fn with_velocity(mut self, velocity: IVec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn damage(&self) -> i32 {
        self.kind.damage()
    }
}

/// Registry of effects on the player's current level.
#[derive(Clone, Default, Debug, Deref)]
pub struct Effects(Registry<EffectId, Effect>);

impl Effects {
    pub fn spawn(&mut self, effect: Effect) -> EffectId {
        self.0.insert(effect)
    }

    /// Effects at a position that aren't marked for destruction.
    pub fn at(&self, pos: IVec2) -> impl Iterator<Item = &Effect> + '_ {
        self.0
            .values()
            .filter(move |e| e.pos == pos && !e.destroy)
    }

    /// Mark every effect of the given kind at position for destruction.
    pub fn destroy_at(&mut self, pos: IVec2, kind: EffectKind) {
        for (_, e) in self.0.iter_mut() {
            if e.pos == pos && e.kind == kind {
                e.destroy = true;
            }
        }
    }

    /// Age, move and expire every effect, then drop the destroyed ones.
    pub fn advance_one_turn(&mut self, level: &Level) {
        for (_, e) in self.0.iter_mut() {
            e.age += 1;
            if e.max_age.map_or(false, |max| e.age > max) {
                e.destroy = true;
            }

            e.pos += e.velocity;
            match level.tile(e.pos) {
                None | Some(Tile::Wall) => e.destroy = true,
                _ => {}
            }
        }
        self.compact();
    }

    /// Drop effects marked for destruction.
    pub fn compact(&mut self) {
        self.0.remove_where(|e| e.destroy);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}
