use crate::arena::types::{Coord, Level};

#[must_use]
pub const fn manhattan_distance(a: Coord, b: Coord) -> i64 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// A..Z, then AA..ZZ, then AAA..ZZZ and so on.
#[must_use]
pub fn level_label(level: Level) -> String {
    let base = level % 26;
    let reps = level / 26 + 1;
    // base < 26, so this is always an ascii capital
    let letter = char::from(b'A' + base as u8);
    std::iter::repeat(letter).take(reps as usize).collect()
}
