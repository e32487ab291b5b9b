use itertools::Itertools;
use rand::Rng;

use super::{food::Food, snake::Snake, SnakeID};
use crate::arena::{
    types::{Coord, Level},
    utils::manhattan_distance,
};

/// Random probes before falling back to a full scan.
const EMPTY_CELL_ATTEMPTS: usize = 4000;

#[derive(Clone, Debug)]
pub struct Board {
    pub size: i64,
}

impl Board {
    #[must_use]
    pub const fn contains(&self, coord: Coord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && coord.x < self.size
            && coord.y < self.size
    }

    pub fn cells(&self) -> impl Iterator<Item = Coord> {
        (0..self.size)
            .cartesian_product(0..self.size)
            .map(|(y, x)| Coord::new(x, y))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupant {
    pub snake: SnakeID,
    pub index: usize,
}

/// Everything that takes up space on the board. Occupancy isn't stored
/// anywhere, it's worked out by scanning the live snakes and the food list.
#[derive(Clone, Debug)]
pub struct World {
    pub board:  Board,
    pub snakes: Vec<Snake>,
    pub food:   Vec<Food>,
}

impl World {
    #[must_use]
    pub fn occupant_at(&self, coord: Coord) -> Option<Occupant> {
        self.snakes
            .iter()
            .filter(|snake| snake.alive)
            .find_map(|snake| {
                snake.body.iter().position(|c| *c == coord).map(|index| {
                    Occupant {
                        snake: snake.id,
                        index,
                    }
                })
            })
    }

    #[must_use]
    pub fn level_at(&self, occupant: Occupant) -> Level {
        self.snakes[occupant.snake].levels[occupant.index]
    }

    #[must_use]
    pub fn food_at(&self, coord: Coord) -> Option<&Food> {
        self.food.iter().find(|food| food.coord == coord)
    }

    /// Removes the food at `coord`, if any, and returns its level.
    pub fn take_food_at(&mut self, coord: Coord) -> Option<Level> {
        let index = self.food.iter().position(|food| food.coord == coord)?;
        Some(self.food.remove(index).level)
    }

    #[must_use]
    pub fn closest_food(&self, from: Coord) -> Option<i64> {
        self.food
            .iter()
            .map(|food| manhattan_distance(food.coord, from))
            .min()
    }

    #[must_use]
    pub fn is_empty_cell(&self, coord: Coord) -> bool {
        self.occupant_at(coord).is_none() && self.food_at(coord).is_none()
    }

    /// Finds a cell with neither snake nor food on it. On a completely full
    /// board this gives up and returns the origin, so callers must put up
    /// with the overlap.
    pub fn find_empty_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Coord {
        let size = self.board.size;

        for _ in 0..EMPTY_CELL_ATTEMPTS {
            let coord =
                Coord::new(rng.gen_range(0..size), rng.gen_range(0..size));
            if self.is_empty_cell(coord) {
                return coord;
            }
        }

        self.board
            .cells()
            .find(|coord| self.is_empty_cell(*coord))
            .unwrap_or(Coord::new(0, 0))
    }
}
