//! Monster behavior.

use rand::seq::SliceRandom;

use crate::{prelude::*, Ranged};

impl Runtime {
    /// Let every monster on the player's level act once.
    pub(crate) fn step_monsters(&mut self) {
        let z = self.player_loc().z;
        let player = self.player;

        for id in self.mobs.ids_where(|m| m.loc.z == z) {
            if id == player || !id.is_alive(self) {
                continue;
            }

            let dir = self.decide(id);
            if dir != IVec2::ZERO {
                self.move_mob(id, dir);
            }
        }
    }

    /// Run the species behavior for a monster and return where it wants to
    /// step.
    fn decide(&mut self, id: MonsterId) -> IVec2 {
        let Some(mob) = self.mob(id) else {
            return IVec2::ZERO;
        };
        let (species, loc) = (mob.species, mob.loc);

        if let Some(ranged) = species.ranged() {
            self.breathe(loc, ranged);
        }

        let choices = species.walk_choices();
        match (choices.choose(&mut self.rng), choices.choose(&mut self.rng)) {
            (Some(&dx), Some(&dy)) => ivec2(dx, dy),
            _ => IVec2::ZERO,
        }
    }

    /// Maybe cover the start of the line towards the player with the
    /// species' effect.
    fn breathe(&mut self, from: Location, ranged: Ranged) {
        if !self.rng.chance(ranged.chance) {
            return;
        }

        let target = self.player_loc();
        if !self.line_of_effect(from, target, LineMode::Shoot) {
            return;
        }

        for p in fov::line(from.pos().into(), target.pos().into())
            .into_iter()
            .take(ranged.reach)
        {
            self.effects.spawn(Effect::new(
                ranged.effect,
                p.into(),
                Some(ranged.max_age),
            ));
        }
        log::debug!("{} breathed from {from}", ranged.effect.name());
        self.send(Msg::EffectSpawned(ranged.effect, from));
    }
}
