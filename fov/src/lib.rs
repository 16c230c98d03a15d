//! Generic field-of-view computation.
//!
//! Light is cast from the origin along Bresenham lines to every cell on the
//! perimeter of a square torch area, clipped to a circular radius. A second
//! pass reveals dark cells that sit right behind lit floor, which the ray
//! casting misses around diagonal wall corners.

mod fov;
pub use crate::fov::{Fov, Opacity, Terrain};

mod line;
pub use line::line;

mod square;
pub use square::{perimeter, Quadrant, QUADRANTS};
