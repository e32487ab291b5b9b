use std::collections::VecDeque;

use log::debug;

use super::SnakeID;
use crate::arena::types::{Coord, Direction, Kind, Level};

#[derive(Clone, Debug)]
pub struct Snake {
    pub id:             SnakeID,
    pub kind:           Kind,
    pub name:           String,
    pub hue:            u16,
    pub body:           VecDeque<Coord>,
    pub levels:         VecDeque<Level>,
    pub direction:      Direction,
    pub next_direction: Direction,
    pub alive:          bool,
    pub score:          u64,
    pub max_level:      Level,
    pub speed:          f64,
    /// bumped on every death so queued respawns can tell if they're stale.
    pub generation:     u64,
    pub(crate) move_acc: f64,
}

impl Snake {
    #[must_use]
    pub fn new(
        id: SnakeID,
        kind: Kind,
        name: String,
        hue: u16,
        at: Coord,
        direction: Direction,
        speed: f64,
    ) -> Self {
        Self {
            id,
            kind,
            name,
            hue,
            body: VecDeque::from([at]),
            levels: VecDeque::from([0]),
            direction,
            next_direction: direction,
            alive: true,
            score: 0,
            max_level: 0,
            speed,
            generation: 0,
            move_acc: 0.0,
        }
    }

    /// Only valid while the snake has a body; every live snake does.
    #[must_use]
    pub fn head(&self) -> Coord {
        self.body[0]
    }

    #[must_use]
    pub fn head_level(&self) -> Level {
        self.levels.front().copied().unwrap_or(0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    #[must_use]
    pub fn is_player(&self) -> bool {
        self.kind == Kind::Player
    }

    /// Seconds between two steps at the given global tick rate.
    #[must_use]
    pub fn interval(&self, max_tick_rate: f64) -> f64 {
        1.0 / (max_tick_rate.max(1.0) * self.speed)
    }

    /// Straight ahead first, then the clockwise turn, then the
    /// counter-clockwise one. Ties between scores keep this order. Reversing
    /// is never an option.
    #[must_use]
    pub fn candidate_directions(&self) -> [Direction; 3] {
        [
            self.direction,
            self.direction.turn_right(),
            self.direction.turn_left(),
        ]
    }

    /// Buffers a direction for the next step. Returns false if it would
    /// reverse the snake onto its own neck.
    pub fn turn_toward(&mut self, direction: Direction) -> bool {
        if direction == self.direction.opposite() {
            return false;
        }
        self.next_direction = direction;
        true
    }

    pub fn apply_next_direction(&mut self) {
        if self.next_direction != self.direction.opposite() {
            self.direction = self.next_direction;
        }
    }

    /// Moves the head onto `target` and drops the tail cell, which is
    /// returned. Levels slide back along the body by one segment and the
    /// head keeps its own level.
    pub fn advance(&mut self, target: Coord) -> Coord {
        let head_level = self.head_level();
        self.body.push_front(target);
        self.levels.push_front(head_level);
        self.levels.pop_back();
        self.body.pop_back().unwrap_or(target)
    }

    pub fn grow_at_tail(&mut self, at: Coord, level: Level) {
        self.body.push_back(at);
        self.levels.push_back(level);
    }

    /// Removes one segment and returns its level.
    pub fn shrink_at(&mut self, index: usize) -> Option<Level> {
        self.body.remove(index)?;
        self.levels.remove(index)
    }

    pub fn set_head_level(&mut self, level: Level) {
        if let Some(head) = self.levels.front_mut() {
            *head = level;
        }
        self.max_level = self.max_level.max(level);
    }

    /// Collapses adjacent equal segments into the one nearer the head, one
    /// level higher, until no equal neighbours remain. Returns the number of
    /// merges.
    pub fn merge_tail(&mut self) -> usize {
        let mut merges = 0;

        while let Some(index) = (1..self.levels.len())
            .rev()
            .find(|&i| self.levels[i] == self.levels[i - 1])
        {
            let merged = self.levels[index - 1] + 1;
            self.levels[index - 1] = merged;
            self.levels.remove(index);
            self.body.remove(index);

            self.score += u64::from(merged);
            self.max_level = self.max_level.max(merged);
            merges += 1;
        }

        if merges > 0 {
            debug!(
                "{} merged {merges} time(s), head now {}",
                self.name,
                self.head_level()
            );
        }

        merges
    }

    pub fn kill(&mut self, generation: u64) {
        self.alive = false;
        self.generation = generation;
    }

    /// Brings a dead bot back as a fresh single level-0 segment.
    pub fn respawn(&mut self, at: Coord, direction: Direction) {
        self.body = VecDeque::from([at]);
        self.levels = VecDeque::from([0]);
        self.direction = direction;
        self.next_direction = direction;
        self.alive = true;
        self.score = 0;
        self.max_level = 0;
        self.move_acc = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake_with(levels: &[Level]) -> Snake {
        let mut snake = Snake::new(
            0,
            Kind::Player,
            "test".to_owned(),
            0,
            Coord::new(10, 5),
            Direction::Right,
            0.5,
        );
        snake.levels = levels.iter().copied().collect();
        snake.body = (0..levels.len() as i64)
            .map(|i| Coord::new(10 - i, 5))
            .collect();
        snake
    }

    #[test]
    fn merges_cascade_towards_the_head() {
        let mut snake = snake_with(&[3, 2, 1, 1]);
        let merges = snake.merge_tail();

        // 1+1 -> 2, 2+2 -> 3, 3+3 -> 4
        assert_eq!(merges, 3);
        assert_eq!(snake.levels, VecDeque::from([4]));
        assert_eq!(snake.body, VecDeque::from([Coord::new(10, 5)]));
        assert_eq!(snake.score, 2 + 3 + 4);
        assert_eq!(snake.max_level, 4);
    }

    #[test]
    fn merge_tail_is_idempotent() {
        let mut snake = snake_with(&[5, 2, 2, 0, 1, 1]);
        snake.merge_tail();
        let levels = snake.levels.clone();
        let body = snake.body.clone();
        let score = snake.score;

        assert_eq!(snake.merge_tail(), 0);
        assert_eq!(snake.levels, levels);
        assert_eq!(snake.body, body);
        assert_eq!(snake.score, score);
    }

    #[test]
    fn merge_leaves_non_adjacent_equals_alone() {
        let mut snake = snake_with(&[4, 1, 2, 1]);
        assert_eq!(snake.merge_tail(), 0);
        assert_eq!(snake.levels, VecDeque::from([4, 1, 2, 1]));
    }

    #[test]
    fn advance_slides_levels_back() {
        let mut snake = snake_with(&[3, 1, 0]);
        let vacated = snake.advance(Coord::new(11, 5));

        assert_eq!(vacated, Coord::new(8, 5));
        assert_eq!(
            snake.body,
            VecDeque::from([
                Coord::new(11, 5),
                Coord::new(10, 5),
                Coord::new(9, 5)
            ])
        );
        assert_eq!(snake.levels, VecDeque::from([3, 3, 1]));
        assert_eq!(snake.body.len(), snake.levels.len());
    }

    #[test]
    fn single_segment_advance_returns_old_head() {
        let mut snake = snake_with(&[2]);
        let vacated = snake.advance(Coord::new(11, 5));
        assert_eq!(vacated, Coord::new(10, 5));
        assert_eq!(snake.levels, VecDeque::from([2]));
    }

    #[test]
    fn candidates_go_straight_then_clockwise() {
        let mut snake = snake_with(&[0]);
        assert_eq!(
            snake.candidate_directions(),
            [Direction::Right, Direction::Down, Direction::Up]
        );

        snake.direction = Direction::Up;
        assert_eq!(
            snake.candidate_directions(),
            [Direction::Up, Direction::Right, Direction::Left]
        );
    }

    #[test]
    fn reversal_is_never_buffered() {
        let mut snake = snake_with(&[0]);
        assert!(!snake.turn_toward(Direction::Left));
        assert_eq!(snake.next_direction, Direction::Right);

        assert!(snake.turn_toward(Direction::Up));
        snake.apply_next_direction();
        assert_eq!(snake.direction, Direction::Up);
    }

    #[test]
    fn shrink_and_grow_keep_lengths_in_step() {
        let mut snake = snake_with(&[3, 2, 1]);
        assert_eq!(snake.shrink_at(1), Some(2));
        snake.grow_at_tail(Coord::new(0, 0), 0);
        assert_eq!(snake.body.len(), snake.levels.len());
        assert_eq!(snake.levels, VecDeque::from([3, 1, 0]));
        assert_eq!(snake.shrink_at(9), None);
    }

    #[test]
    fn respawn_resets_progress() {
        let mut snake = snake_with(&[6, 2]);
        snake.score = 40;
        snake.kill(3);
        snake.respawn(Coord::new(1, 1), Direction::Down);

        assert!(snake.alive);
        assert_eq!(snake.generation, 3);
        assert_eq!(snake.levels, VecDeque::from([0]));
        assert_eq!(snake.score, 0);
        assert_eq!(snake.max_level, 0);
    }
}
