use std::{cmp::Ordering, fmt};

use itertools::Itertools;
use log::{debug, info, trace};
use rand::{rngs::StdRng, seq::SliceRandom, Rng};

use super::{
    board::{Board, Occupant, World},
    schedule::{Respawn, Schedule},
    snake::Snake,
    SnakeID,
    PLAYER,
};
use crate::{
    arena::{
        models::Config,
        types::{Coord, Direction, Kind, Level},
        utils::level_label,
    },
    strategies::{Hunter, Strategy},
};

/// Upper bound on steps a single snake may catch up on in one tick.
pub const MAX_STEPS_PER_TICK: usize = 3;
/// Seconds of simulation time a dead bot waits before coming back.
pub const RESPAWN_DELAY: f64 = 0.45;

pub const PLAYER_HUE: u16 = 190;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    Wall,
    OwnBody,
    BiggerSnake,
    Eaten,
    BiggerFood,
}

impl fmt::Display for DeathCause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Wall => "You hit the wall.",
                Self::OwnBody => "You ran into yourself.",
                Self::BiggerSnake => "You ran into a bigger number.",
                Self::Eaten => "A bot ate you.",
                Self::BiggerFood => "You ate a bigger letter.",
            }
        )
    }
}

fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Direction {
    Direction::iter()
        .copied()
        .collect_vec()
        .choose(rng)
        .copied()
        .unwrap_or(Direction::Right)
}

pub struct Game {
    pub config:     Config,
    pub world:      World,
    pub clock:      f64,
    pub tick_count: u64,
    pub outcome:    Option<DeathCause>,
    respawns:       Schedule,
    deaths:         u64,
    strategy:       Box<dyn Strategy + Send>,
    rng:            StdRng,
}

impl Game {
    #[must_use]
    pub fn new(config: Config, rng: StdRng) -> Self {
        let mut game = Self {
            world: World {
                board:  Board {
                    size: config.grid_size,
                },
                snakes: Vec::new(),
                food:   Vec::new(),
            },
            config,
            clock: 0.0,
            tick_count: 0,
            outcome: None,
            respawns: Schedule::default(),
            deaths: 0,
            strategy: Box::new(Hunter),
            rng,
        };
        game.populate();
        game
    }

    /// Starts a fresh run on `config`. Respawns queued by the previous run
    /// are dropped, and since `deaths` keeps counting they could never match
    /// a new snake anyway.
    pub fn reset(&mut self, config: Config) {
        self.world = World {
            board:  Board {
                size: config.grid_size,
            },
            snakes: Vec::new(),
            food:   Vec::new(),
        };
        self.config = config;
        self.clock = 0.0;
        self.tick_count = 0;
        self.outcome = None;
        self.respawns.clear();
        self.populate();
    }

    fn populate(&mut self) {
        let size = self.config.grid_size;
        self.world.snakes.push(Snake::new(
            PLAYER,
            Kind::Player,
            "You".to_owned(),
            PLAYER_HUE,
            Coord::new(size / 2 - 1, size / 2),
            Direction::Right,
            self.config.player_speed,
        ));

        for (i, &speed) in self.config.bot_speeds.iter().enumerate() {
            let at = self.world.find_empty_cell(&mut self.rng);
            let direction = random_direction(&mut self.rng);
            let hue = ((40 + i * 42) % 360) as u16;
            self.world.snakes.push(Snake::new(
                self.world.snakes.len(),
                Kind::Bot,
                format!("Bot {}", i + 1),
                hue,
                at,
                direction,
                speed,
            ));
        }

        self.world.refill_to(self.config.food_target, &mut self.rng);

        info!(
            "new arena: {0}x{0}, {1} bots, {2} food",
            size,
            self.config.bot_speeds.len(),
            self.world.food.len()
        );
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    #[must_use]
    pub fn player(&self) -> &Snake {
        &self.world.snakes[PLAYER]
    }

    #[must_use]
    pub fn bots_alive(&self) -> usize {
        self.world
            .snakes
            .iter()
            .filter(|snake| snake.kind == Kind::Bot && snake.alive)
            .count()
    }

    #[must_use]
    pub fn pending_respawns(&self) -> usize {
        self.respawns.len()
    }

    /// Buffers a direction for the player. Ignored once the player is dead
    /// or if it would reverse the current heading.
    pub fn apply_input(&mut self, direction: Direction) -> bool {
        let player = &mut self.world.snakes[PLAYER];
        if !player.alive {
            return false;
        }
        player.turn_toward(direction)
    }

    /// Advances the arena by `dt` seconds. Each live snake banks the time
    /// and steps whenever it has saved up a full interval, at most
    /// [`MAX_STEPS_PER_TICK`] times.
    pub fn step(&mut self, dt: f64) {
        if self.is_over() {
            return;
        }

        self.clock += dt;
        self.tick_count += 1;
        self.process_respawns();

        let mut order = (0..self.world.snakes.len()).collect_vec();
        order.shuffle(&mut self.rng);

        for id in order {
            if !self.world.snakes[id].alive {
                continue;
            }

            let interval =
                self.world.snakes[id].interval(self.config.max_tick_rate);
            self.world.snakes[id].move_acc += dt;

            let mut steps = 0;
            while self.world.snakes[id].move_acc >= interval
                && steps < MAX_STEPS_PER_TICK
            {
                self.snake_step(id);
                self.world.snakes[id].move_acc -= interval;
                steps += 1;

                if self.is_over() {
                    return;
                }
                if !self.world.snakes[id].alive {
                    break;
                }
            }
        }
    }

    /// Runs one step for one snake: steer, move, then resolve whatever is on
    /// the target cell.
    pub fn snake_step(&mut self, id: SnakeID) {
        if !self.world.snakes[id].alive {
            return;
        }

        if self.world.snakes[id].kind == Kind::Bot {
            let direction =
                self.strategy.get_movement(&self.world, id, &mut self.rng);
            self.world.snakes[id].next_direction = direction;
        }

        let snake = &mut self.world.snakes[id];
        snake.apply_next_direction();
        let target = snake.head().neighbour(snake.direction);

        trace!("{} moving {} to {target}", snake.name, snake.direction);

        if !self.world.board.contains(target) {
            self.kill(id, DeathCause::Wall);
            return;
        }

        if let Some(occupant) = self.world.occupant_at(target) {
            if occupant.snake == id {
                self.kill(id, DeathCause::OwnBody);
            } else {
                self.fight(id, occupant, target);
            }
            return;
        }

        let vacated = self.world.snakes[id].advance(target);

        if let Some(level) = self.world.take_food_at(target) {
            self.feed(id, level, vacated);
        }
    }

    fn fight(&mut self, attacker: SnakeID, victim: Occupant, target: Coord) {
        let attacker_level = self.world.snakes[attacker].head_level();
        let victim_level = self.world.level_at(victim);

        if attacker_level <= victim_level {
            self.kill(attacker, DeathCause::BiggerSnake);
            return;
        }

        debug!(
            "{} ({}) bites {} ({}) at segment {}",
            self.world.snakes[attacker].name,
            level_label(attacker_level),
            self.world.snakes[victim.snake].name,
            level_label(victim_level),
            victim.index
        );

        let prey = &mut self.world.snakes[victim.snake];
        prey.shrink_at(victim.index);
        if victim.index == 0 || prey.is_empty() {
            self.kill(victim.snake, DeathCause::Eaten);
        }

        let snake = &mut self.world.snakes[attacker];
        let vacated = snake.advance(target);
        snake.grow_at_tail(vacated, victim_level);
        snake.score += u64::from(victim_level) + 1;
        snake.max_level = snake.max_level.max(attacker_level);
        snake.merge_tail();
    }

    fn feed(&mut self, id: SnakeID, food_level: Level, vacated: Coord) {
        let snake = &mut self.world.snakes[id];
        let head_level = snake.head_level();

        match food_level.cmp(&head_level) {
            Ordering::Equal => {
                let level = head_level + 1;
                snake.set_head_level(level);
                snake.score += 5 * (u64::from(level) + 1);
            }
            Ordering::Less => {
                snake.grow_at_tail(vacated, food_level);
                snake.score += u64::from(food_level) + 1;
                snake.merge_tail();
            }
            Ordering::Greater => {
                self.kill(id, DeathCause::BiggerFood);
                return;
            }
        }

        self.world.refill_to(self.config.food_target, &mut self.rng);
    }

    fn kill(&mut self, id: SnakeID, cause: DeathCause) {
        self.deaths += 1;
        let snake = &mut self.world.snakes[id];
        snake.kill(self.deaths);

        if snake.is_player() {
            info!(
                "game over after {:.1}s: {cause} (score {}, max {})",
                self.clock,
                snake.score,
                level_label(snake.max_level)
            );
            self.outcome = Some(cause);
        } else {
            debug!("{} died ({cause:?}), respawning soon", snake.name);
            self.respawns.push(Respawn {
                due:        self.clock + RESPAWN_DELAY,
                snake:      id,
                generation: self.deaths,
            });
        }
    }

    fn process_respawns(&mut self) {
        for respawn in self.respawns.due(self.clock) {
            let stale = self.world.snakes.get(respawn.snake).map_or(true, |s| {
                s.alive || s.generation != respawn.generation
            });
            if stale {
                trace!("dropping stale respawn for snake #{}", respawn.snake);
                continue;
            }

            let at = self.world.find_empty_cell(&mut self.rng);
            let direction = random_direction(&mut self.rng);
            let snake = &mut self.world.snakes[respawn.snake];
            snake.respawn(at, direction);
            debug!("{} respawned at {at}", snake.name);
        }
    }
}

impl fmt::Display for Game {
    /// Snake segments show their letter in upper case, food in lower case.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.world.board.size;
        for y in 0..size {
            let row = (0..size)
                .map(|x| {
                    let coord = Coord::new(x, y);
                    if let Some(occupant) = self.world.occupant_at(coord) {
                        letter(self.world.level_at(occupant))
                    } else if let Some(food) = self.world.food_at(coord) {
                        letter(food.level).to_ascii_lowercase()
                    } else {
                        '.'
                    }
                })
                .join(" ");
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

fn letter(level: Level) -> char {
    level_label(level).chars().next().unwrap_or('?')
}
