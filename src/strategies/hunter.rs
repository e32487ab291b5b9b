use log::trace;
use rand::{Rng, RngCore};

use super::{
    score_factors::{Enemy, ScoreFactors},
    Strategy,
};
use crate::{
    arena::types::Direction,
    sim::{board::World, SnakeID},
};

/// Greedy one-step bot: heads for the nearest food, bites smaller segments
/// it can reach and steers clear of anything it can't beat.
pub struct Hunter;

impl Strategy for Hunter {
    fn get_movement(
        &self,
        world: &World,
        snake_id: SnakeID,
        rng: &mut dyn RngCore,
    ) -> Direction {
        let snake = &world.snakes[snake_id];
        let head = snake.head();
        let head_level = snake.head_level();

        let mut best: Option<ScoreFactors> = None;
        let mut best_score = f64::NEG_INFINITY;

        for direction in snake.candidate_directions() {
            let target = head.neighbour(direction);
            if !world.board.contains(target) {
                continue;
            }

            let occupant = world.occupant_at(target);
            if occupant.is_some_and(|o| o.snake == snake_id) {
                continue;
            }

            let enemy = occupant.map(|o| {
                let level = world.level_at(o);
                if head_level > level {
                    Enemy::Prey(level)
                } else {
                    Enemy::Predator(level)
                }
            });

            let noise =
                rng.gen_range(-ScoreFactors::NOISE..=ScoreFactors::NOISE);
            let factors = ScoreFactors {
                direction,
                closest_food: world.closest_food(target),
                food_level: world.food_at(target).map(|food| food.level),
                enemy,
                noise,
            };
            let score = factors.calculate();

            trace!("{} considers {factors}", snake.name);

            // strictly greater, so ties go to the first option seen
            if score > best_score {
                best_score = score;
                best = Some(factors);
            }
        }

        best.map_or(snake.direction, |factors| factors.direction)
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{
        arena::types::{Coord, Kind, Level},
        sim::{board::Board, food::Food, snake::Snake},
    };

    fn snake(id: SnakeID, cells: &[(i64, i64)], levels: &[Level]) -> Snake {
        let mut snake = Snake::new(
            id,
            Kind::Bot,
            format!("Bot {id}"),
            0,
            Coord::new(cells[0].0, cells[0].1),
            Direction::Right,
            0.5,
        );
        snake.body = cells.iter().map(|&(x, y)| Coord::new(x, y)).collect();
        snake.levels = levels.iter().copied().collect();
        snake
    }

    fn world(snakes: Vec<Snake>, food: Vec<Food>) -> World {
        World {
            board: Board { size: 10 },
            snakes,
            food,
        }
    }

    fn decide(world: &World, seed: u64) -> Direction {
        let mut rng = StdRng::seed_from_u64(seed);
        Hunter.get_movement(world, 0, &mut rng)
    }

    #[test]
    fn heads_for_adjacent_food() {
        let world = world(
            vec![snake(0, &[(5, 5)], &[0])],
            vec![Food {
                coord: Coord::new(5, 4),
                level: 0,
            }],
        );
        for seed in 0..20 {
            assert_eq!(decide(&world, seed), Direction::Up);
        }
    }

    #[test]
    fn never_picks_the_wall() {
        // heading right along the right edge, only up or down are legal
        let world = world(vec![snake(0, &[(9, 5)], &[0])], Vec::new());
        for seed in 0..20 {
            let direction = decide(&world, seed);
            assert!(matches!(direction, Direction::Up | Direction::Down));
        }
    }

    #[test]
    fn keeps_heading_when_boxed_in() {
        // top right corner, facing right, own body below
        let world = world(
            vec![snake(0, &[(9, 0), (9, 1), (8, 1)], &[3, 1, 0])],
            Vec::new(),
        );
        assert_eq!(decide(&world, 1), Direction::Right);
    }

    #[test]
    fn bites_smaller_and_avoids_bigger() {
        let world = world(
            vec![
                snake(0, &[(5, 5)], &[3]),
                snake(1, &[(6, 5)], &[1]),
                snake(2, &[(5, 4)], &[7]),
            ],
            vec![Food {
                coord: Coord::new(5, 6),
                level: 0,
            }],
        );
        for seed in 0..20 {
            assert_eq!(decide(&world, seed), Direction::Right);
        }
    }
}
