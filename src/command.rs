use std::str::FromStr;

use anyhow::bail;

/// A line of player input.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Command {
    Step(i32, i32),
    Wait,
    Close,
    Up,
    Down,
    Eat,
    Shoot(i32, i32),
    Shield,
    Look,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use Command::*;

        let mut words = s.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(Look);
        };

        let ret = match head.to_lowercase().as_str() {
            "w" | "n" | "north" => Step(0, -1),
            "d" | "e" | "east" => Step(1, 0),
            "s" | "south" => Step(0, 1),
            "a" | "west" => Step(-1, 0),
            "." | "wait" | "rest" => Wait,
            "c" | "close" => Close,
            "<" | "up" => Up,
            ">" | "down" => Down,
            "eat" => Eat,
            "shield" => Shield,
            "l" | "look" => Look,
            "?" | "help" => Help,
            "q" | "quit" => Quit,
            "f" | "shoot" => {
                let (Some(x), Some(y)) = (words.next(), words.next()) else {
                    bail!("usage: shoot <x> <y>");
                };
                Shoot(x.parse()?, y.parse()?)
            }
            other => bail!("unknown command {other:?}, try help"),
        };

        if words.next().is_some() {
            bail!("too many arguments for {head:?}");
        }
        Ok(ret)
    }
}

pub const HELP: &str = "\
w/a/s/d or n/e/s/west  step or attack
wait                   rest for a turn
close                  close an adjacent door
up, down               climb stairs
eat                    eat some food
shoot <x> <y>          fire an arrow at a map position
shield                 raise or lower the magic shield
look                   redraw the map
quit                   leave the game";

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_commands() {
        let parse = |s: &str| s.parse::<Command>().ok();

        assert_eq!(parse("w"), Some(Command::Step(0, -1)));
        assert_eq!(parse("  East "), Some(Command::Step(1, 0)));
        assert_eq!(parse(""), Some(Command::Look));
        assert_eq!(parse("shoot 3 -2"), Some(Command::Shoot(3, -2)));
        assert_eq!(parse("shoot 3"), None);
        assert_eq!(parse("shoot x y"), None);
        assert_eq!(parse("wait now"), None);
        assert_eq!(parse("dance"), None);
    }
}
