use log::trace;
use rand::{
    distributions::{Distribution, WeightedIndex},
    Rng,
};

use super::{board::World, PLAYER};
use crate::arena::types::{Coord, Level};

/// Chance that a new food matches the player's head so there's always an
/// upgrade available.
pub const MATCH_HEAD_CHANCE: f64 = 0.20;
/// Highest level the spawner picks on its own (A..G).
pub const MAX_RANDOM_LEVEL: Level = 6;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Food {
    pub coord: Coord,
    pub level: Level,
}

/// Relative odds of spawning a food of `level`: 24, 12, 8, 6, 5, 4, 3, ...
/// never below 1.
#[must_use]
pub fn food_level_weight(level: Level) -> u32 {
    let weight = (24.0 / f64::from(level + 1)).round() as u32;
    weight.max(1)
}

pub fn pick_food_level<R: Rng + ?Sized>(
    head_level: Level,
    rng: &mut R,
) -> Level {
    if rng.gen_bool(MATCH_HEAD_CHANCE) {
        return head_level;
    }

    let max_level = head_level.min(MAX_RANDOM_LEVEL);
    let weights: Vec<_> = (0..=max_level).map(food_level_weight).collect();

    // weights are never empty and never zero
    WeightedIndex::new(&weights)
        .map(|table| table.sample(rng) as Level)
        .unwrap_or(0)
}

impl World {
    fn player_head_level(&self) -> Level {
        self.snakes
            .get(PLAYER)
            .map_or(0, super::snake::Snake::head_level)
    }

    pub fn spawn_one<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let coord = self.find_empty_cell(rng);
        let level = pick_food_level(self.player_head_level(), rng);
        trace!("spawning food level {level} at {coord}");
        self.food.push(Food { coord, level });
    }

    pub fn refill_to<R: Rng + ?Sized>(&mut self, target: usize, rng: &mut R) {
        while self.food.len() < target {
            self.spawn_one(rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{
        arena::types::{Direction, Kind},
        sim::{board::Board, snake::Snake},
    };

    fn world_with_player(head_level: Level) -> World {
        let mut player = Snake::new(
            PLAYER,
            Kind::Player,
            "You".to_owned(),
            190,
            Coord::new(5, 5),
            Direction::Right,
            0.1,
        );
        player.set_head_level(head_level);
        World {
            board:  Board { size: 12 },
            snakes: vec![player],
            food:   Vec::new(),
        }
    }

    #[test]
    fn weights_decay_with_a_floor() {
        let weights: Vec<_> = (0..=6).map(food_level_weight).collect();
        assert_eq!(weights, vec![24, 12, 8, 6, 5, 4, 3]);
        assert_eq!(food_level_weight(100), 1);
    }

    #[test]
    fn level_zero_head_only_spawns_a() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!((0..500).all(|_| pick_food_level(0, &mut rng) == 0));
    }

    #[test]
    fn spawned_levels_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..2000 {
            let level = pick_food_level(12, &mut rng);
            assert!(level <= MAX_RANDOM_LEVEL || level == 12, "got {level}");
        }
    }

    #[test]
    fn low_levels_dominate() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut counts = [0usize; 7];
        for _ in 0..5000 {
            let level = pick_food_level(6, &mut rng);
            counts[level as usize] += 1;
        }
        assert!(counts[0] > counts[1]);
        assert!(counts[1] > counts[3]);
    }

    #[test]
    fn refill_places_unique_free_cells() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut world = world_with_player(2);
        world.refill_to(30, &mut rng);

        assert_eq!(world.food.len(), 30);
        let cells: HashSet<_> = world.food.iter().map(|f| f.coord).collect();
        assert_eq!(cells.len(), 30);
        assert!(!cells.contains(&Coord::new(5, 5)));

        // already at target, nothing happens
        world.refill_to(10, &mut rng);
        assert_eq!(world.food.len(), 30);
    }
}
