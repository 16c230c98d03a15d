/// Bresenham line from `start` to `end`, endpoints included.
///
/// The line is always plotted from its lower end along the major axis and
/// reversed afterwards if needed, so `line(b, a)` is exactly `line(a, b)`
/// backwards.
///
/// ```
/// assert_eq!(
///     fov::line([0, 0], [3, 4]),
///     vec![[0, 0], [1, 1], [1, 2], [2, 3], [3, 4]]
/// );
/// assert_eq!(
///     fov::line([3, 4], [0, 0]),
///     vec![[3, 4], [2, 3], [1, 2], [1, 1], [0, 0]]
/// );
/// assert_eq!(fov::line([5, 5], [5, 5]), vec![[5, 5]]);
/// ```
pub fn line(start: [i32; 2], end: [i32; 2]) -> Vec<[i32; 2]> {
    let [mut x1, mut y1] = start;
    let [mut x2, mut y2] = end;

    let is_steep = (y2 - y1).abs() > (x2 - x1).abs();
    if is_steep {
        std::mem::swap(&mut x1, &mut y1);
        std::mem::swap(&mut x2, &mut y2);
    }

    let swapped = x1 > x2;
    if swapped {
        std::mem::swap(&mut x1, &mut x2);
        std::mem::swap(&mut y1, &mut y2);
    }

    let dx = x2 - x1;
    let dy = (y2 - y1).abs();
    let y_step = if y1 < y2 { 1 } else { -1 };

    let mut error = dx / 2;
    let mut y = y1;
    let mut ret = Vec::with_capacity(dx as usize + 1);
    for x in x1..=x2 {
        ret.push(if is_steep { [y, x] } else { [x, y] });
        error -= dy;
        if error < 0 {
            y += y_step;
            error += dx;
        }
    }

    if swapped {
        ret.reverse();
    }
    ret
}
