use std::{fmt, slice::Iter};

use serde::{Deserialize, Serialize};

pub type Level = u32;

/// Swipes shorter than this many pixels on both axes are ignored.
pub const MIN_SWIPE_DISTANCE: f64 = 24.0;

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn iter() -> Iter<'static, Self> {
        static DIRECTIONS: [Direction; 4] = [
            Direction::Left,
            Direction::Right,
            Direction::Up,
            Direction::Down,
        ];
        DIRECTIONS.iter()
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    /// Counter-clockwise as seen on screen.
    #[must_use]
    pub const fn turn_left(self) -> Self {
        match self {
            Self::Left => Self::Down,
            Self::Right => Self::Up,
            Self::Up => Self::Left,
            Self::Down => Self::Right,
        }
    }

    #[must_use]
    pub const fn turn_right(self) -> Self {
        self.turn_left().opposite()
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "w" | "W" => Some(Self::Up),
            "ArrowDown" | "s" | "S" => Some(Self::Down),
            "ArrowLeft" | "a" | "A" => Some(Self::Left),
            "ArrowRight" | "d" | "D" => Some(Self::Right),
            _ => None,
        }
    }

    /// Maps a touch gesture to its dominant axis. Ties go to the vertical
    /// axis.
    #[must_use]
    pub fn from_swipe(dx: f64, dy: f64) -> Option<Self> {
        let (adx, ady) = (dx.abs(), dy.abs());
        if adx.max(ady) < MIN_SWIPE_DISTANCE {
            return None;
        }

        if adx > ady {
            Some(if dx > 0.0 { Self::Right } else { Self::Left })
        } else {
            Some(if dy > 0.0 { Self::Down } else { Self::Up })
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Left => "Left",
                Self::Right => "Right",
                Self::Up => "Up",
                Self::Down => "Down",
            }
        )
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Coord {
    pub x: i64,
    pub y: i64,
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Coord {
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// y grows downwards, so `Up` decrements it.
    #[must_use]
    pub const fn neighbour(self, direction: Direction) -> Self {
        match direction {
            Direction::Right => Self::new(self.x + 1, self.y),
            Direction::Left => Self::new(self.x - 1, self.y),
            Direction::Up => Self::new(self.x, self.y - 1),
            Direction::Down => Self::new(self.x, self.y + 1),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Player,
    Bot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turns_are_never_reversals() {
        for &d in Direction::iter() {
            assert_ne!(d.turn_left(), d.opposite());
            assert_ne!(d.turn_right(), d.opposite());
            assert_ne!(d.turn_left(), d.turn_right());
            assert_eq!(d.turn_left().turn_right(), d);
        }
    }

    #[test]
    fn left_of_right_is_up_on_screen() {
        assert_eq!(Direction::Right.turn_left(), Direction::Up);
        assert_eq!(Direction::Right.turn_right(), Direction::Down);
        assert_eq!(Coord::new(3, 3).neighbour(Direction::Up), Coord::new(3, 2));
    }

    #[test]
    fn keys_map_to_directions() {
        assert_eq!(Direction::from_key("ArrowUp"), Some(Direction::Up));
        assert_eq!(Direction::from_key("S"), Some(Direction::Down));
        assert_eq!(Direction::from_key("a"), Some(Direction::Left));
        assert_eq!(Direction::from_key("d"), Some(Direction::Right));
        assert_eq!(Direction::from_key("Enter"), None);
    }

    #[test]
    fn swipes_use_the_dominant_axis() {
        assert_eq!(Direction::from_swipe(40.0, 3.0), Some(Direction::Right));
        assert_eq!(Direction::from_swipe(-40.0, 30.0), Some(Direction::Left));
        assert_eq!(Direction::from_swipe(5.0, -30.0), Some(Direction::Up));
        assert_eq!(Direction::from_swipe(30.0, 30.0), Some(Direction::Down));
        assert_eq!(Direction::from_swipe(10.0, -12.0), None);
    }
}
