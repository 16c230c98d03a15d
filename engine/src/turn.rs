//! Stages of a player turn that aren't anyone's action.

use crate::{mob::BuffKind, prelude::*, Trap};

impl Runtime {
    /// Run buffs of every living creature on the player's level.
    pub(crate) fn tick_buffs(&mut self) {
        let z = self.player_loc().z;
        for id in self.mobs.ids_where(|m| m.is_alive() && m.loc.z == z) {
            let Some(mob) = self.mobs.get_mut(id) else {
                continue;
            };
            let ended = mob.tick_buffs();
            if id != self.player {
                continue;
            }
            for kind in ended {
                match kind {
                    BuffKind::Shield => msg!(self, "Your magic shield fades."),
                    BuffKind::Regeneration => {
                        msg!(self, "The warm glow fades away.")
                    }
                }
            }
        }
    }

    /// Tell the player about interesting things around them.
    pub(crate) fn environment_feedback(&mut self) {
        let loc = self.player_loc();

        match self.tile(loc) {
            Some(Tile::StairDown) => msg!(
                self,
                "You found a stair down. Use the down command to descend."
            ),
            Some(Tile::StairUp) => msg!(
                self,
                "You found a stair up. Use the up command to ascend."
            ),
            _ => {}
        }

        if loc
            .neighbors_8()
            .any(|n| self.tile(n).map_or(false, Tile::is_open_door))
        {
            msg!(
                self,
                "You found an open door. Stand next to it and use the close \
                 command to close it."
            );
        }

        let hidden = self.items.ids_where(|i| {
            !i.backpack
                && i.loc.same_level(&loc)
                && (i.loc.pos() - loc.pos()).is_neighbor()
                && matches!(i.kind, ItemKind::Trap(t) if !t.detected)
        });
        for id in hidden {
            let Some(ItemKind::Trap(trap)) = self.item(id).map(|i| i.kind)
            else {
                continue;
            };
            if !self.rng.chance(trap.chance_to_detect) {
                continue;
            }
            let Some(item) = self.items.get_mut(id) else {
                continue;
            };
            if let ItemKind::Trap(t) = &mut item.kind {
                t.detected = true;
            }
            let trap_loc = item.loc;
            self.send(Msg::TrapDetected(trap_loc));
            msg!(self, "You detect a trap nearby!");
        }

        if self.tile(loc + ivec2(0, -1)) == Some(Tile::Terminal) {
            msg!(self, "You stand in front of a computer terminal.");
        }
    }

    /// Trigger traps and pick up everything else on the player's tile.
    pub(crate) fn interact_with_items(&mut self) {
        let loc = self.player_loc();
        for id in self.items.ids_where(|i| i.is_at(loc)) {
            let Some(kind) = self.item(id).map(|i| i.kind) else {
                continue;
            };

            match kind {
                ItemKind::Trap(trap) if trap.is_armed() => {
                    self.trigger_trap(id, trap)
                }
                kind => {
                    if let Some(item) = self.items.get_mut(id) {
                        item.backpack = true;
                    }
                    self.send(Msg::PickedUp(id));
                    msg!(self, "You pick up: {}", kind.name());
                    msg!(self, "{}", kind.pickup_text());
                }
            }
        }
    }

    fn trigger_trap(&mut self, id: ItemId, trap: Trap) {
        let loc = self.player_loc();
        let damage = trap.damage.roll(&mut self.rng).max(0);

        self.wound(self.player, damage);
        self.send(Msg::TrapTriggered(loc));
        msg!(self, "You step on a trap and take {damage} damage!");

        if let Some(ItemKind::Trap(t)) =
            self.items.get_mut(id).map(|i| &mut i.kind)
        {
            t.detected = true;
        }

        if self.rng.chance(trap.chance_to_destroy) {
            self.items.remove(id);
            msg!(self, "The trap is destroyed.");
        } else {
            msg!(self, "The trap is still active. Watch your step!");
        }
    }

    /// Effects on the player's tile hurt the player.
    pub(crate) fn effect_damage(&mut self) {
        let loc = self.player_loc();
        let shield = self.player_stats().shield;
        let hits: Vec<EffectKind> =
            self.effects.at(loc.pos()).map(|e| e.kind).collect();

        for kind in hits {
            let mut damage = kind.damage();
            if shield {
                damage /= 2;
            }
            self.wound(self.player, damage);

            let name = kind.name();
            if shield {
                msg!(
                    self,
                    "Your shield softens the {name}. You take {damage} damage."
                );
            } else {
                msg!(self, "You are hurt by {name} for {damage} damage.");
            }
        }
    }

    /// Remove dead creatures.
    ///
    /// Returns true if the player is among the dead and the game is over.
    pub(crate) fn cleanup_dead(&mut self) -> bool {
        for id in self.mobs.ids_where(|m| !m.is_alive()) {
            if id == self.player {
                let loc = self.player_loc();
                self.game_over = true;
                self.send(Msg::Death(loc));
                msg!(self, "You are dead.");
                log::info!("player died on turn {}", self.turn());
                return true;
            }

            if let Some(mob) = self.mobs.remove(id) {
                log::debug!("{} died at {}", mob.name(), mob.loc);
                self.send(Msg::Death(mob.loc));
            }
        }
        false
    }

    /// Spread and quench fires on the player's level.
    pub(crate) fn propagate_environment(&mut self) {
        let z = self.player_loc().z;
        let at = |pos: IVec2| Location::new(pos.x, pos.y, z);

        // Water puts out burning oil, water and fire on the same spot cancel
        // each other out.
        let water: Vec<IVec2> = self
            .effects
            .values()
            .filter(|e| e.kind == EffectKind::Water && !e.destroy)
            .map(|e| e.pos)
            .collect();
        for pos in water {
            if self.effects.at(pos).any(|e| e.kind == EffectKind::Fire) {
                self.effects.destroy_at(pos, EffectKind::Fire);
                self.effects.destroy_at(pos, EffectKind::Water);
            }
            if self.tile(at(pos)).map_or(false, Tile::is_burning) {
                self.set_tile(at(pos), Tile::Oil { burning: false });
            }
        }

        // One ring of neighbors catches fire per turn.
        let burning = self
            .level(z)
            .map(|l| l.find(Tile::is_burning))
            .unwrap_or_default();
        for &pos in &burning {
            self.effects
                .spawn(Effect::new(EffectKind::Fire, pos, Some(1)));
            for d in DIR_8 {
                if self.tile(at(pos + d)) == Some(Tile::Oil { burning: false })
                {
                    self.set_tile(at(pos + d), Tile::Oil { burning: true });
                }
            }
        }

        let chance = self.config().oil_ignite_chance;
        let fires: Vec<IVec2> = self
            .effects
            .values()
            .filter(|e| e.kind == EffectKind::Fire && !e.destroy)
            .map(|e| e.pos)
            .collect();
        for pos in fires {
            if self.tile(at(pos)) == Some(Tile::Oil { burning: false })
                && self.rng.chance(chance)
            {
                log::debug!("oil at {} catches fire", at(pos));
                self.set_tile(at(pos), Tile::Oil { burning: true });
            }
        }

        self.effects.compact();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::runtime::tests::runtime;

    const BURNING: Tile = Tile::Oil { burning: true };

    #[test]
    fn wall_bump_is_one_whole_turn() {
        let mut r = runtime("#@.#");
        let (turn, fovs) = (r.turn(), r.fov_count());
        r.effects.spawn(Effect::new(EffectKind::Flash, ivec2(2, 0), Some(5)));

        let log = r.player_turn(-1, 0);
        assert!(log.iter().any(|l| l.contains("illegal move")));
        assert_eq!(r.player_loc(), Location::new(1, 0, 0));
        assert_eq!(r.turn(), turn + 1);
        assert_eq!(r.fov_count(), fovs + 1);
        // Effects advanced exactly once.
        let ages: Vec<i32> = r.effects().values().map(|e| e.age).collect();
        assert_eq!(ages, [1]);
    }

    #[test]
    fn corridor_walk() {
        let mut r = runtime("#@.#");
        assert!(r.player_turn(1, 0).is_empty());
        assert_eq!(r.player_loc(), Location::new(2, 0, 0));
        assert!(r.cell(Location::new(3, 0, 0)).map_or(false, |c| c.in_fov));

        let log = r.player_turn(1, 0);
        assert_eq!(log, vec!["Ouch! That is an illegal move."]);
        assert_eq!(r.player_loc(), Location::new(2, 0, 0));
        assert_eq!(r.turn(), 2);
    }

    #[test]
    fn diagonal_input_waits() {
        let mut r = runtime("#@..#\n#...#");
        let log = r.player_turn(1, 1);
        assert!(log[0].contains("north, east, south or west"));
        assert_eq!(r.player_loc(), Location::new(1, 0, 0));
        assert_eq!(r.turn(), 1);
    }

    #[test]
    fn trap_until_destroyed() {
        let mut r = runtime("#@..#");
        let loc = Location::new(2, 0, 0);
        let mut trap = Trap::new("1d6".parse().unwrap());
        trap.chance_to_destroy = 1.0;
        let id = r.spawn_item(ItemKind::Trap(trap), loc);

        let log = r.player_turn(1, 0);
        assert!(log.iter().any(|l| l.starts_with("You step on a trap")));
        assert!(log.contains(&"The trap is destroyed.".to_string()));
        assert!(r.item(id).is_none());
        let hp = r.player_mob().map_or(0, |m| m.hp);
        assert!((44..50).contains(&hp));
        assert!(r.drain_events().any(|e| e == Msg::TrapTriggered(loc)));

        // Walking back and forth doesn't trigger anything.
        r.player_turn(-1, 0);
        let log = r.player_turn(1, 0);
        assert!(log.iter().all(|l| !l.contains("trap")));
        assert_eq!(r.player_mob().map_or(0, |m| m.hp), hp);
    }

    #[test]
    fn sturdy_trap_stays_armed() {
        let mut r = runtime("#@..#");
        let loc = Location::new(2, 0, 0);
        let mut trap = Trap::new("1d1-1".parse().unwrap());
        trap.chance_to_destroy = 0.0;
        let id = r.spawn_item(ItemKind::Trap(trap), loc);

        for _ in 0..3 {
            let log = r.player_turn(1, 0);
            assert_eq!(log[0], "You step on a trap and take 0 damage!");
            assert!(log.iter().any(|l| l.contains("still active")));
            r.player_turn(-1, 0);
        }
        assert!(matches!(
            r.item(id).map(|i| i.kind),
            Some(ItemKind::Trap(Trap { detected: true, .. }))
        ));
    }

    #[test]
    fn disarmed_trap_gets_picked_up() {
        let mut r = runtime("#@..#");
        let mut trap = Trap::new("1d6".parse().unwrap());
        trap.disarmed = true;
        let id = r.spawn_item(ItemKind::Trap(trap), Location::new(2, 0, 0));
        let log = r.player_turn(1, 0);
        assert_eq!(log[0], "You pick up: Trap");
        assert!(r.item(id).map_or(false, |i| i.backpack));
    }

    #[test]
    fn trap_detection() {
        let mut r = runtime("#@..#");
        let mut trap = Trap::new("1d6".parse().unwrap());
        trap.chance_to_detect = 1.0;
        let loc = Location::new(3, 0, 0);
        r.spawn_item(ItemKind::Trap(trap), loc);

        let log = r.player_turn(1, 0);
        assert_eq!(log, vec!["You detect a trap nearby!"]);
        assert!(r.drain_events().any(|e| e == Msg::TrapDetected(loc)));
        // Only detected once.
        assert!(r.player_turn(0, 0).is_empty());
    }

    #[test]
    fn picking_up() {
        let mut r = runtime("#@k$#");
        r.player_turn(1, 0);
        r.player_turn(1, 0);
        let names: Vec<_> = r.backpack().map(|(_, i)| i.name()).collect();
        assert_eq!(names, vec!["Key", "Coin"]);
        assert!(r.gold() > 0);
        assert!(r.items_at(Location::new(2, 0, 0)).next().is_none());
    }

    #[test]
    fn hints() {
        let mut r = Runtime::new(&["#@>.#", "#<.#"], Default::default())
            .unwrap();
        let log = r.player_turn(1, 0);
        assert!(log[0].starts_with("You found a stair down"));

        let mut r = runtime("#t#\n#.#\n#@#");
        let log = r.player_turn(0, -1);
        assert_eq!(log, vec!["You stand in front of a computer terminal."]);
    }

    #[test]
    fn shield_halves_effect_damage() {
        let mut r = runtime("#@.#");
        r.toggle_shield();
        r.effects.spawn(Effect::new(EffectKind::Fire, ivec2(1, 0), None));
        let log = r.player_turn(0, 0);
        assert!(log.iter().any(|l| l.contains("You take 2 damage")));
        assert_eq!(r.player_mob().map(|m| m.hp), Some(48));
        // Shield upkeep was paid, resting gave one back.
        assert_eq!(r.player_stats().mana, 20);
    }

    #[test]
    fn player_death_ends_the_game() {
        let mut r = runtime("#@.#");
        if let Some(p) = r.mobs.get_mut(r.player) {
            p.hp = 3;
        }
        r.effects.spawn(Effect::new(EffectKind::Fire, ivec2(1, 0), None));
        let fovs = r.fov_count();
        let log = r.player_turn(0, 0);
        assert_eq!(log.last().map(String::as_str), Some("You are dead."));
        assert!(r.is_game_over());
        assert_eq!(r.fov_count(), fovs);
        let over = vec!["You are dead. The game is over.".to_string()];
        assert_eq!(r.player_turn(1, 0), over);
        assert_eq!(r.eat(), over);
        assert!(r.player_mob().is_some());
    }

    #[test]
    fn fire_spreads_through_oil() {
        let mut r = runtime("#@..:::.#");
        r.set_tile(Location::new(4, 0, 0), BURNING);

        r.player_turn(0, 0);
        assert_eq!(r.tile(Location::new(5, 0, 0)), Some(BURNING));
        assert_eq!(
            r.tile(Location::new(6, 0, 0)),
            Some(Tile::Oil { burning: false })
        );
        assert!(r.effects_at(Location::new(4, 0, 0)).count() > 0);

        r.player_turn(0, 0);
        assert_eq!(r.tile(Location::new(6, 0, 0)), Some(BURNING));
        assert_eq!(r.tile(Location::new(7, 0, 0)), Some(Tile::Floor));
    }

    #[test]
    fn fire_ignites_oil() {
        let mut config = Config::default();
        config.oil_ignite_chance = 1.0;
        let mut r = Runtime::new(&["#@.:#"], config).unwrap();
        r.effects.spawn(Effect::new(EffectKind::Fire, ivec2(3, 0), None));
        r.player_turn(0, 0);
        assert_eq!(r.tile(Location::new(3, 0, 0)), Some(BURNING));
    }

    #[test]
    fn water_quenches_fire() {
        let mut r = runtime("#@.:.#");
        r.set_tile(Location::new(3, 0, 0), BURNING);
        r.effects.spawn(Effect::new(EffectKind::Water, ivec2(3, 0), None));
        r.effects.spawn(Effect::new(EffectKind::Fire, ivec2(4, 0), None));
        r.effects.spawn(Effect::new(EffectKind::Water, ivec2(4, 0), None));

        r.player_turn(0, 0);
        assert_eq!(
            r.tile(Location::new(3, 0, 0)),
            Some(Tile::Oil { burning: false })
        );
        assert_eq!(r.effects_at(Location::new(4, 0, 0)).count(), 0);
    }
}
