use anyhow::bail;
use rand::SeedableRng;
use util::GameRng;

use crate::{
    dungeon::{Dungeon, Spawn},
    mob::{Buff, BuffId, BuffKind, PlayerStats},
    prelude::*,
    Effects, Registry, Result, LEVELS,
};

/// Reply to any command once the player is dead.
const GAME_OVER: &str = "You are dead. The game is over.";

/// Main data container for game engine runtime.
pub struct Runtime {
    config: Config,
    turn: u64,
    /// How many times the field of view has been computed.
    pub(crate) fov_count: u64,
    pub(crate) game_over: bool,
    pub(crate) levels: Vec<Level>,
    pub(crate) mobs: Registry<MonsterId, Monster>,
    pub(crate) items: Registry<ItemId, Item>,
    pub(crate) effects: Effects,
    pub(crate) player: MonsterId,
    next_buff_id: u32,
    pub(crate) rng: GameRng,
    log: Vec<String>,
    events: Vec<Msg>,
}

impl AsRef<Runtime> for Runtime {
    fn as_ref(&self) -> &Runtime {
        self
    }
}

impl AsMut<Runtime> for Runtime {
    fn as_mut(&mut self) -> &mut Runtime {
        self
    }
}

impl Runtime {
    /// Build a new game from ASCII level maps, topmost level first.
    pub fn new(levels: &[&str], config: Config) -> Result<Self> {
        let mut rng = GameRng::seed_from_u64(config.seed);
        let Dungeon { levels, spawns } = Dungeon::parse(levels, &mut rng)?;

        let mut mobs = Registry::default();
        let mut items = Registry::default();
        let mut player = None;
        for (loc, spawn) in spawns {
            match spawn {
                Spawn::Mob(species) => {
                    let id = mobs.insert(Monster::new(species, loc));
                    if species == Species::Player {
                        player = Some(id);
                    }
                }
                Spawn::Item(kind) => {
                    items.insert(Item::new(kind, loc));
                }
            }
        }
        let Some(player) = player else {
            bail!("dungeon has no player start");
        };

        log::info!(
            "dungeon with {} levels, {} creatures and {} items",
            levels.len(),
            mobs.len(),
            items.len()
        );

        let mut ret = Runtime {
            config,
            turn: 0,
            fov_count: 0,
            game_over: false,
            levels,
            mobs,
            items,
            effects: Default::default(),
            player,
            next_buff_id: 0,
            rng,
            log: Default::default(),
            events: Default::default(),
        };
        ret.calculate_fov();
        Ok(ret)
    }

    /// Start a game in the built-in dungeon.
    pub fn with_default_dungeon(config: Config) -> Result<Self> {
        Runtime::new(&LEVELS, config)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of turns taken so far.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn fov_count(&self) -> u64 {
        self.fov_count
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn player(&self) -> MonsterId {
        self.player
    }

    pub fn player_mob(&self) -> Option<&Monster> {
        self.mobs.get(self.player)
    }

    pub fn player_loc(&self) -> Location {
        self.player_mob().map(|m| m.loc).unwrap_or_default()
    }

    pub fn player_stats(&self) -> PlayerStats {
        self.player_mob().and_then(|m| m.stats).unwrap_or_default()
    }

    pub(crate) fn player_stats_mut(&mut self) -> Option<&mut PlayerStats> {
        self.mobs
            .get_mut(self.player)
            .and_then(|m| m.stats.as_mut())
    }

    pub fn mob(&self, id: MonsterId) -> Option<&Monster> {
        self.mobs.get(id)
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn level(&self, z: i32) -> Option<&Level> {
        self.levels.get(usize::try_from(z).ok()?)
    }

    pub(crate) fn level_mut(&mut self, z: i32) -> Option<&mut Level> {
        self.levels.get_mut(usize::try_from(z).ok()?)
    }

    pub fn cell(&self, loc: Location) -> Option<&Cell> {
        self.level(loc.z)?.get(loc.pos())
    }

    pub fn tile(&self, loc: Location) -> Option<Tile> {
        self.cell(loc).map(|c| c.tile)
    }

    pub(crate) fn set_tile(&mut self, loc: Location, tile: Tile) {
        if let Some(level) = self.level_mut(loc.z) {
            level.set_tile(loc.pos(), tile);
        }
    }

    /// All creatures in registry order.
    pub fn monsters(&self) -> impl Iterator<Item = (MonsterId, &Monster)> {
        self.mobs.iter()
    }

    /// Living creatures at location.
    pub fn monsters_at(
        &self,
        loc: Location,
    ) -> impl Iterator<Item = (MonsterId, &Monster)> {
        self.mobs
            .iter()
            .filter(move |(_, m)| m.loc == loc && m.is_alive())
    }

    /// All items in registry order, carried ones included.
    pub fn items(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.items.iter()
    }

    /// Items lying on the map at location.
    pub fn items_at(
        &self,
        loc: Location,
    ) -> impl Iterator<Item = (ItemId, &Item)> {
        self.items.iter().filter(move |(_, i)| i.is_at(loc))
    }

    /// Items carried by the player.
    pub fn backpack(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.items.iter().filter(|(_, i)| i.backpack)
    }

    /// Total value of coins carried by the player.
    pub fn gold(&self) -> i32 {
        self.backpack()
            .map(|(_, i)| match i.kind {
                ItemKind::Coin { value } => value,
                _ => 0,
            })
            .sum()
    }

    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    /// Effects at location, only the player's level has any.
    pub fn effects_at(
        &self,
        loc: Location,
    ) -> impl Iterator<Item = &Effect> {
        let on_level = loc.same_level(&self.player_loc());
        self.effects.at(loc.pos()).filter(move |_| on_level)
    }

    /// Whether a line between two locations on the same level is clear for
    /// the given mode.
    pub fn line_of_effect(
        &self,
        a: Location,
        b: Location,
        mode: LineMode,
    ) -> bool {
        if !a.same_level(&b) {
            return false;
        }
        self.level(a.z)
            .map_or(false, |l| l.line_is_clear(a.pos(), b.pos(), mode))
    }

    pub fn spawn_monster(
        &mut self,
        species: Species,
        loc: Location,
    ) -> MonsterId {
        self.mobs.insert(Monster::new(species, loc))
    }

    pub fn spawn_item(&mut self, kind: ItemKind, loc: Location) -> ItemId {
        self.items.insert(Item::new(kind, loc))
    }

    /// Take presentation events generated since the last call.
    pub fn drain_events(&mut self) -> impl Iterator<Item = Msg> + '_ {
        self.events.drain(..)
    }

    pub(crate) fn send(&mut self, msg: Msg) {
        self.events.push(msg);
    }

    pub(crate) fn log_line(&mut self, line: String) {
        log::debug!("log: {line}");
        self.log.push(line);
    }

    pub(crate) fn add_buff(&mut self, owner: MonsterId, kind: BuffKind) {
        let id = BuffId(self.next_buff_id);
        self.next_buff_id += 1;

        let Some(mob) = self.mobs.get_mut(owner) else {
            return;
        };
        let buff = Buff::new(id, owner, kind);
        if buff.unique {
            mob.buffs.retain(|b| b.kind != kind);
        }
        mob.buffs.push(buff);
        if let (BuffKind::Shield, Some(stats)) = (kind, mob.stats.as_mut()) {
            stats.shield = true;
        }
    }

    /// Run a standalone command as one turn and return its log.
    fn command(&mut self, f: impl FnOnce(&mut Runtime)) -> Vec<String> {
        if self.game_over {
            return vec![GAME_OVER.into()];
        }
        self.turn += 1;
        f(self);
        self.calculate_fov();
        std::mem::take(&mut self.log)
    }

    /// Run a full turn where the player moves or attacks towards `(dx, dy)`.
    ///
    /// `(0, 0)` waits in place. Diagonal steps aren't allowed and are
    /// treated as waiting.
    pub fn player_turn(&mut self, dx: i32, dy: i32) -> Vec<String> {
        if self.game_over {
            return vec![GAME_OVER.into()];
        }

        let mut dir = ivec2(dx, dy);
        if dir.taxi_len() > 1 {
            msg!(self, "You can only move north, east, south or west.");
            dir = IVec2::ZERO;
        }

        self.turn += 1;
        log::debug!("turn {}: player step {dir}", self.turn);

        self.tick_buffs();
        if dir == IVec2::ZERO {
            self.rest();
        } else {
            self.move_mob(self.player, dir);
        }
        self.environment_feedback();
        self.interact_with_items();
        self.step_monsters();
        self.effect_damage();
        if self.cleanup_dead() {
            return std::mem::take(&mut self.log);
        }
        self.propagate_environment();
        self.calculate_fov();

        std::mem::take(&mut self.log)
    }

    /// Close an open door next to the player.
    pub fn close_door(&mut self) -> Vec<String> {
        self.command(|r| r.close_adjacent_door())
    }

    pub fn climb_up(&mut self) -> Vec<String> {
        self.command(|r| r.climb(true))
    }

    pub fn climb_down(&mut self) -> Vec<String> {
        self.command(|r| r.climb(false))
    }

    /// Eat a piece of food from the backpack.
    pub fn eat(&mut self) -> Vec<String> {
        self.command(|r| r.eat_food())
    }

    /// Shoot an arrow towards a position on the player's level.
    pub fn shoot_arrow(&mut self, x: i32, y: i32) -> Vec<String> {
        self.command(|r| r.shoot(ivec2(x, y)))
    }

    /// Raise or lower the magic shield.
    pub fn toggle_shield(&mut self) -> Vec<String> {
        self.command(|r| r.switch_shield())
    }
}
