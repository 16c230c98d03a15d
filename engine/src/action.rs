//! Things creatures do on their turn.

use rand::Rng;

use crate::{item::food_quality, mob::BuffKind, prelude::*};

impl Runtime {
    /// Resolve a step by a creature.
    ///
    /// A closed door stops the step, the player gets to open it. A hostile
    /// creature at the target gets attacked. Otherwise the creature moves if
    /// the target is walkable.
    pub(crate) fn move_mob(&mut self, id: MonsterId, dir: IVec2) {
        let Some(mob) = self.mob(id) else {
            return;
        };
        let is_player = id == self.player;
        let target = mob.loc + dir;

        match self.tile(target) {
            Some(Tile::Door {
                closed: true,
                locked,
                ..
            }) => {
                if is_player {
                    self.open_door(target, locked);
                }
                return;
            }
            Some(t) if t.is_walkable() => {}
            _ => {
                if is_player {
                    msg!(self, "Ouch! That is an illegal move.");
                }
                return;
            }
        }

        if let Some(enemy) = self.hostile_at(id, target) {
            self.fight(id, enemy);
            return;
        }

        if let Some(mob) = self.mobs.get_mut(id) {
            mob.loc = target;
        }
    }

    /// First living creature at location that is hostile to `id`.
    pub(crate) fn hostile_at(
        &self,
        id: MonsterId,
        loc: Location,
    ) -> Option<MonsterId> {
        let me = self.mob(id)?;
        self.monsters_at(loc)
            .find(|(other, m)| *other != id && m.is_hostile_to(me))
            .map(|(other, _)| other)
    }

    fn open_door(&mut self, loc: Location, locked: bool) {
        if locked {
            let key = self
                .backpack()
                .find(|(_, i)| i.kind == ItemKind::Key)
                .map(|(id, _)| id);
            let Some(key) = key else {
                msg!(self, "The door is locked. You need a key to open it.");
                return;
            };
            self.items.remove(key);
            msg!(self, "You unlock the door. The key is used up.");
        } else {
            msg!(self, "You open the door.");
        }

        if let Some(Tile::Door { orientation, .. }) = self.tile(loc) {
            self.set_tile(
                loc,
                Tile::Door {
                    closed: false,
                    locked: false,
                    orientation,
                },
            );
        }
    }

    /// One exchange of blows, the attacker hits for 1 to 6 damage.
    fn fight(&mut self, attacker: MonsterId, defender: MonsterId) {
        let damage = self.rng.gen_range(1..=6);
        let killed = self.wound(defender, damage);

        let (a, d) = (attacker.name(self), defender.name(self));
        if attacker == self.player {
            msg!(self, "Strike! You hit the {d} for {damage} damage.");
            if killed {
                self.player_kill(defender);
            }
        } else if defender == self.player {
            msg!(self, "Strike! The {a} hits you for {damage} damage.");
        }
    }

    /// Take hit points away from a creature, return whether this killed it.
    pub(crate) fn wound(&mut self, id: MonsterId, damage: i32) -> bool {
        let Some(mob) = self.mobs.get_mut(id) else {
            return false;
        };
        let was_alive = mob.is_alive();
        mob.hp -= damage;
        let killed = was_alive && !mob.is_alive();
        self.send(Msg::Hurt(id, damage));
        killed
    }

    fn player_kill(&mut self, victim: MonsterId) {
        let Some(mob) = self.mob(victim) else {
            return;
        };
        let (name, max_hp) = (mob.name(), mob.max_hp);
        msg!(self, "The {name} dies.");
        self.award_xp((max_hp / 5).max(1));
    }

    fn award_xp(&mut self, amount: i32) {
        let player = self.player;
        let Some(mob) = self.mobs.get_mut(player) else {
            return;
        };
        let Some(stats) = mob.stats.as_mut() else {
            return;
        };

        stats.xp += amount;
        let mut gained_levels = 0;
        while stats.xp >= 10 * stats.level {
            stats.xp -= 10 * stats.level;
            stats.level += 1;
            gained_levels += 1;
        }
        let level = stats.level;
        mob.max_hp += 5 * gained_levels;
        mob.hp += 5 * gained_levels;

        msg!(self, "You gain {amount} experience.");
        if gained_levels > 0 {
            log::info!("player reached level {level}");
            msg!(self, "You reach experience level {level}!");
        }
    }

    /// Waiting catches your breath.
    pub(crate) fn rest(&mut self) {
        if let Some(s) = self.player_stats_mut() {
            s.stamina = (s.stamina + 1).min(s.max_stamina);
            s.mana = (s.mana + 1).min(s.max_mana);
        }
    }

    pub(crate) fn close_adjacent_door(&mut self) {
        let loc = self.player_loc();
        let door = loc
            .neighbors_4()
            .find(|&n| self.tile(n).map_or(false, Tile::is_open_door));
        let Some(door) = door else {
            msg!(
                self,
                "You need to stand next to an open door (north, east, south \
                 or west) to close it."
            );
            return;
        };

        if self.monsters_at(door).next().is_some() {
            msg!(self, "Something is standing in the doorway.");
            return;
        }

        if let Some(Tile::Door { orientation, .. }) = self.tile(door) {
            self.set_tile(door, Tile::door(orientation));
        }
        msg!(self, "You close the door. It locks with a click.");
    }

    pub(crate) fn climb(&mut self, up: bool) {
        let loc = self.player_loc();
        let (stair, arrival, dz, word) = if up {
            (Tile::StairUp, Tile::StairDown, -1, "up")
        } else {
            (Tile::StairDown, Tile::StairUp, 1, "down")
        };

        if self.tile(loc) != Some(stair) {
            msg!(self, "You must stand on a stair {word} to climb {word}.");
            return;
        }

        let z = loc.z + dz;
        let Some(level) = self.level(z) else {
            msg!(self, "The stairs lead nowhere.");
            return;
        };

        // Keep x and y when there's room, otherwise arrive at the closest
        // matching stair.
        let dest = if level.tile(loc.pos()).map_or(false, Tile::is_walkable) {
            loc.pos()
        } else {
            level
                .find(|t| t == arrival)
                .into_iter()
                .min_by_key(|p| (*p - loc.pos()).taxi_len())
                .unwrap_or(loc.pos())
        };

        if let Some(old) = self.level_mut(loc.z) {
            old.clear_fov();
        }
        self.effects.clear();
        if let Some(mob) = self.mobs.get_mut(self.player) {
            mob.loc = Location::new(dest.x, dest.y, z);
        }

        log::info!("player climbs {word} to level {z}");
        msg!(self, "You climb one level {word}.");
    }

    pub(crate) fn eat_food(&mut self) {
        let food = self.backpack().find_map(|(id, i)| match i.kind {
            ItemKind::Food { nutrition } => Some((id, nutrition)),
            _ => None,
        });
        let Some((id, nutrition)) = food else {
            msg!(self, "You have no food.");
            return;
        };

        self.items.remove(id);
        let player = self.player;
        let healed = self
            .mobs
            .get_mut(player)
            .map_or(0, |m| m.heal(nutrition));
        msg!(
            self,
            "You eat the {} food and regain {healed} hp.",
            food_quality(nutrition)
        );

        if nutrition >= 3 {
            self.add_buff(player, BuffKind::Regeneration);
            msg!(self, "You feel a warm glow spreading through your body.");
        }
    }

    pub(crate) fn shoot(&mut self, target: IVec2) {
        let from = self.player_loc();
        let to = from.with_pos(target);

        let arrow = self
            .backpack()
            .find(|(_, i)| i.kind == ItemKind::Arrow)
            .map(|(id, _)| id);
        let Some(arrow) = arrow else {
            msg!(self, "You have no arrows.");
            return;
        };

        if to == from {
            msg!(self, "You won't shoot yourself.");
            return;
        }

        let in_range = (target - from.pos()).euclidean_len()
            <= self.config().torch_radius as f32
            && self.level(from.z).map_or(false, |l| l.contains(target));
        if !in_range {
            msg!(self, "That target is out of range.");
            return;
        }

        if !self.line_of_effect(from, to, LineMode::Shoot) {
            msg!(self, "You have no clear line of fire to there.");
            return;
        }

        if self.player_stats().stamina < 1 {
            msg!(self, "You are too exhausted to draw your bow.");
            return;
        }

        self.items.remove(arrow);
        if let Some(s) = self.player_stats_mut() {
            s.stamina -= 1;
        }
        self.send(Msg::ArrowFired(from, to));

        let player = self.player;
        let hit = fov::line(from.pos().into(), target.into())
            .into_iter()
            .skip(1)
            .find_map(|p| self.hostile_at(player, from.with_pos(p.into())));
        let Some(enemy) = hit else {
            msg!(self, "The arrow flies off and is lost.");
            return;
        };

        let damage = self.rng.gen_range(1..=6);
        let killed = self.wound(enemy, damage);
        let name = enemy.name(self);
        msg!(self, "Your arrow hits the {name} for {damage} damage.");
        if killed {
            self.player_kill(enemy);
        }
        self.cleanup_dead();
    }

    pub(crate) fn switch_shield(&mut self) {
        let player = self.player;
        let Some(mob) = self.mobs.get_mut(player) else {
            return;
        };

        if mob.has_buff(BuffKind::Shield) {
            mob.buffs.retain(|b| b.kind != BuffKind::Shield);
            if let Some(s) = mob.stats.as_mut() {
                s.shield = false;
            }
            msg!(self, "You lower your magic shield.");
        } else if self.player_stats().mana < 1 {
            msg!(self, "You don't have the mana to raise a shield.");
        } else {
            self.add_buff(player, BuffKind::Shield);
            msg!(self, "You raise a magic shield.");
        }
    }
}
