use crate::prelude::*;

impl Runtime {
    /// Advance effects by one turn and recompute what the player sees.
    pub(crate) fn calculate_fov(&mut self) {
        let loc = self.player_loc();
        let radius = self.config().torch_radius;
        let Some(level) = loc.level().and_then(|z| self.levels.get_mut(z))
        else {
            return;
        };

        self.effects.advance_one_turn(level);

        let fov = fov::Fov::new(&*level, loc.pos().into(), radius);
        level.clear_fov();
        for (pos, shade) in fov.iter() {
            if let Some(cell) = level.get_mut(pos) {
                cell.in_fov = true;
                cell.explored = true;
                cell.shade = shade;
            }
        }

        self.fov_count += 1;
        log::debug!("fov from {loc}: {} cells in view", fov.len());
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::tests::runtime;

    use super::*;

    #[test]
    fn explored_stays_explored() {
        let mut r = runtime(
            "\
#########
#..@d...#
#########",
        );
        let behind = Location::new(6, 1, 0);
        assert!(!r.cell(behind).map_or(true, |c| c.explored));

        // No key for the locked door, open it by hand.
        r.set_tile(
            Location::new(4, 1, 0),
            Tile::Door {
                closed: false,
                locked: false,
                orientation: Default::default(),
            },
        );
        r.player_turn(0, 0);
        let cell = r.cell(behind).copied().unwrap_or_default();
        assert!(cell.in_fov && cell.explored);

        r.close_door();
        let cell = r.cell(behind).copied().unwrap_or_default();
        assert!(!cell.in_fov);
        assert!(cell.explored);
    }

    #[test]
    fn own_tile_is_brightest() {
        let r = runtime("#@....#");
        let own = r.cell(r.player_loc()).copied().unwrap_or_default();
        assert!(own.in_fov && own.explored);
        assert_eq!(own.shade, 255);
        let far = r.cell(Location::new(5, 0, 0)).copied().unwrap_or_default();
        assert!(far.shade < 255);
    }
}
