//! Built-in dungeon levels.
//!
//! Legend:
//!
//! ```notrust
//! #  wall           .  floor          d  door (starts locked)
//! <  stair up       >  stair down     g  glass
//! :  oil            t  terminal       @  player
//! M  monster        D  dragon         S  sky dragon
//! W  waterguy       $  coin           k  key
//! f  food           a  arrow          T  trap
//! =  download
//! ```

/// Levels of the default dungeon, topmost first.
pub const LEVELS: [&str; 2] = [
    "
######################################
#@#...#.k.d....#............$.....M..#
#>...#....#..a.....#..###...#...#....#
##.#.#ff..####.#...####....###.......#
#.$$.M..T....#.#....#...ff..#...$....#
#..::::.......g.....#.ttt.......a....#
#..:::..D.....g..T..d...=.....::::...#
######################################",
    "
#################################################################
#..<............................................................#
#.........a.....................................................#
#...............................................:::::...........#
#.......T.......................................:::::...........#
#...............##d###..........................................#
#.....W.........#....#.........gggg.............................#
#...............#..S.d..........................................#
#...............#....##............D..................D.........#
#...............#.....#.........................................#
#.kk.k.k........d.....##...........T............................#
#...............###d####........................................#
#.....$.........................................................#
#..........................a.....................f..............#
#...............................................................#
#################################################################",
];
