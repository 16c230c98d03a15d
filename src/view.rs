use engine::prelude::*;

/// Draw the player's current level as text.
///
/// Unexplored cells are blank. Explored cells out of view show only the
/// terrain, creatures and effects are drawn only when in view.
pub fn render(r: &Runtime) -> String {
    let z = r.player_loc().z;
    let Some(level) = r.level(z) else {
        return String::new();
    };

    let (w, h) = (level.width(), level.height());
    let mut grid: Vec<Vec<char>> = (0..h)
        .map(|y| {
            (0..w)
                .map(|x| match level.get([x, y]) {
                    Some(c) if c.explored => c.tile.glyph(),
                    _ => ' ',
                })
                .collect()
        })
        .collect();

    let visible = |loc: Location| {
        loc.z == z && r.cell(loc).map_or(false, |c| c.in_fov)
    };
    let mut put = |loc: Location, c: char| {
        if let (Ok(x), Ok(y)) = (usize::try_from(loc.x), usize::try_from(loc.y))
        {
            if let Some(slot) = grid.get_mut(y).and_then(|row| row.get_mut(x)) {
                *slot = c;
            }
        }
    };

    for (_, item) in r.items() {
        let hidden = matches!(item.kind, ItemKind::Trap(t) if !t.detected);
        if !item.backpack && !hidden && visible(item.loc) {
            put(item.loc, item.kind.glyph());
        }
    }

    for e in r.effects().values().filter(|e| !e.destroy) {
        let loc = Location::new(e.pos.x, e.pos.y, z);
        if visible(loc) {
            put(loc, e.kind.glyph());
        }
    }

    for (_, mob) in r.monsters() {
        if mob.is_alive() && visible(mob.loc) {
            put(mob.loc, mob.species.glyph());
        }
    }

    let mut ret = String::new();
    for row in grid {
        let line: String = row.into_iter().collect();
        ret.push_str(line.trim_end());
        ret.push('\n');
    }
    ret
}

/// One line summary of the player's condition.
pub fn status(r: &Runtime) -> String {
    let (hp, max_hp) = r.player_mob().map_or((0, 0), |m| (m.hp, m.max_hp));
    let s = r.player_stats();
    let mut ret = format!(
        "HP {hp}/{max_hp}  MP {}/{}  SP {}/{}  Lvl {} ({} xp)  Gold {}  \
         Depth {}  Turn {}",
        s.mana,
        s.max_mana,
        s.stamina,
        s.max_stamina,
        s.level,
        s.xp,
        r.gold(),
        r.player_loc().z + 1,
        r.turn()
    );
    if s.shield {
        ret.push_str("  [shield]");
    }
    ret
}
