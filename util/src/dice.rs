use std::{fmt, str::FromStr};

use anyhow::{bail, Context};
use rand::Rng;
use serde_with::{DeserializeFromStr, SerializeDisplay};

/// Most dice a parsed expression may throw.
const MAX_DICE_COUNT: u32 = 1000;

/// Most sides a parsed die may have.
const MAX_DICE_SIDES: u32 = 10_000;

/// Dice expression, written like `2d6+1`.
///
/// A lowercase `d` rolls plain dice. An uppercase `D` rolls exploding dice,
/// where rolling the highest face counts as one less than the face and rolls
/// the die again.
///
/// ```
/// # use util::Dice;
/// let dice: Dice = "1D20+1".parse().unwrap();
/// assert_eq!(dice, Dice::new(1, true, 20, 1));
/// assert_eq!(dice.to_string(), "1D20+1");
/// ```
#[derive(
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    Debug,
    SerializeDisplay,
    DeserializeFromStr,
)]
pub struct Dice {
    pub count: u32,
    pub reroll: bool,
    pub sides: u32,
    pub correction: i32,
}

impl Dice {
    pub const fn new(
        count: u32,
        reroll: bool,
        sides: u32,
        correction: i32,
    ) -> Self {
        Dice {
            count,
            reroll,
            sides,
            correction,
        }
    }

    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> i32 {
        throw_dice(rng, self.count, self.reroll, self.sides, self.correction)
    }

    /// Smallest possible result.
    pub fn min(&self) -> i32 {
        clamp_i32(self.count).saturating_add(self.correction)
    }

    /// Largest possible result, `None` for exploding dice.
    pub fn max(&self) -> Option<i32> {
        (!self.reroll).then(|| {
            clamp_i32(self.count)
                .saturating_mul(clamp_i32(self.sides))
                .saturating_add(self.correction)
        })
    }
}

fn clamp_i32(n: u32) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

/// Sum `count` rolls of a die with `sides` faces and add `correction`.
///
/// With `reroll` set, a roll of the highest face adds `sides - 1` and rolls
/// again until some other face comes up.
pub fn throw_dice<R: Rng + ?Sized>(
    rng: &mut R,
    count: u32,
    reroll: bool,
    sides: u32,
    correction: i32,
) -> i32 {
    if sides == 0 {
        return correction;
    }

    let sides = clamp_i32(sides);
    let mut total: i32 = 0;
    for _ in 0..count {
        loop {
            let face = rng.gen_range(1..=sides);
            if reroll && sides > 1 && face == sides {
                total = total.saturating_add(sides - 1);
            } else {
                total = total.saturating_add(face);
                break;
            }
        }
    }
    total.saturating_add(correction)
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = if self.reroll { 'D' } else { 'd' };
        write!(f, "{}{d}{}{:+}", self.count, self.sides, self.correction)
    }
}

impl FromStr for Dice {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let is_d = |c: char| c == 'd' || c == 'D';

        if s.chars().filter(|&c| is_d(c)).count() != 1 {
            bail!("dice expression {s:?} must have exactly one 'd' or 'D'");
        }

        let Some((count, rest)) = s.split_once(is_d) else {
            bail!("dice expression {s:?} must have exactly one 'd' or 'D'");
        };
        let reroll = s.contains('D');

        let (sides, correction) = match rest.find(['+', '-']) {
            Some(i) => rest.split_at(i),
            None => (rest, "+0"),
        };

        let count: u32 = count
            .parse()
            .with_context(|| format!("bad dice count in {s:?}"))?;
        let sides: u32 = sides
            .parse()
            .with_context(|| format!("bad dice sides in {s:?}"))?;
        let correction: i32 = correction
            .parse()
            .with_context(|| format!("bad dice correction in {s:?}"))?;

        if sides == 0 {
            bail!("dice {s:?} has no sides");
        }
        if count > MAX_DICE_COUNT {
            bail!("dice {s:?} throws more than {MAX_DICE_COUNT} dice");
        }
        if sides > MAX_DICE_SIDES {
            bail!("dice {s:?} has more than {MAX_DICE_SIDES} sides");
        }
        if reroll && sides < 2 {
            bail!("exploding dice {s:?} need at least two sides");
        }

        Ok(Dice::new(count, reroll, sides, correction))
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;
    use crate::srng;

    #[test]
    fn parse() {
        let parse = |s: &str| s.parse::<Dice>().unwrap();
        assert_eq!(parse("2d6+0"), Dice::new(2, false, 6, 0));
        assert_eq!(parse("1D20+1"), Dice::new(1, true, 20, 1));
        assert_eq!(parse("3d4-2"), Dice::new(3, false, 4, -2));
        assert_eq!(parse("1d6"), Dice::new(1, false, 6, 0));

        for bad in ["abc", "2d6d3", "2D6d3", "", "d6", "2d", "xd6", "2d6+x"] {
            assert!(bad.parse::<Dice>().is_err(), "{bad:?} parsed");
        }
        assert!("2d0".parse::<Dice>().is_err());
        assert!("2D1".parse::<Dice>().is_err());

        for huge in ["1d3000000000", "4294967295d6", "1001d6", "1d10001"] {
            assert!(huge.parse::<Dice>().is_err(), "{huge:?} parsed");
        }
        let big = parse("1000d10000+5");
        assert_eq!(big.max(), Some(10_000_005));
    }

    #[test]
    fn oversized_dice_do_not_panic() {
        let mut rng = srng("huge");
        let n = throw_dice(&mut rng, 2, false, u32::MAX, i32::MAX);
        assert_eq!(n, i32::MAX);
        let huge = Dice::new(u32::MAX, false, u32::MAX, 0);
        assert_eq!(huge.max(), Some(i32::MAX));
    }

    #[test]
    fn display() {
        assert_eq!(Dice::new(2, false, 6, 0).to_string(), "2d6+0");
        assert_eq!(Dice::new(1, true, 8, -3).to_string(), "1D8-3");
    }

    #[test]
    fn bounds() {
        let dice = Dice::new(2, false, 6, 0);
        assert_eq!(dice.min(), 2);
        assert_eq!(dice.max(), Some(12));
        assert_eq!(Dice::new(1, true, 6, 0).max(), None);
    }

    #[test]
    fn exploding_dice_go_past_max() {
        let mut rng = srng("explode");
        let rolls: Vec<i32> =
            (0..1000).map(|_| throw_dice(&mut rng, 1, true, 6, 0)).collect();
        assert!(rolls.iter().all(|&n| n >= 1));
        assert!(rolls.iter().any(|&n| n > 6));
    }

    #[quickcheck]
    fn plain_roll_in_range(seed: u64) -> bool {
        let mut rng = srng(&seed);
        (0..20).all(|_| {
            (2..=12).contains(&throw_dice(&mut rng, 2, false, 6, 0))
        })
    }
}
