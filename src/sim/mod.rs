pub mod board;
pub mod food;
pub mod game;
pub mod schedule;
pub mod snake;

use rand::{rngs::StdRng, SeedableRng};

pub use self::game::{DeathCause, Game};
use crate::arena::{
    models::{
        clamp_tick_rate,
        Config,
        FoodView,
        SegmentView,
        SnakeView,
        Snapshot,
        Stats,
    },
    types::Direction,
    utils::level_label,
};

pub type SnakeID = usize;

/// The player is always the first snake.
pub const PLAYER: SnakeID = 0;

/// Fixed simulation sub-step, independent of the display refresh rate.
pub const SIM_TICK: f64 = 1.0 / 60.0;
/// Longer frames are cut down to this, so a backgrounded tab doesn't come
/// back to a burst of catch-up steps.
pub const MAX_FRAME_DT: f64 = 0.05;

/// Owns a [`Game`] and feeds it fixed-size ticks from variable-length
/// frames.
pub struct Simulation {
    game:        Game,
    accumulator: f64,
}

impl Simulation {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::from_game(Game::new(config, StdRng::from_entropy()))
    }

    #[must_use]
    pub fn with_seed(config: Config, seed: u64) -> Self {
        Self::from_game(Game::new(config, StdRng::seed_from_u64(seed)))
    }

    #[must_use]
    pub fn from_game(game: Game) -> Self {
        Self {
            game,
            accumulator: 0.0,
        }
    }

    #[must_use]
    pub const fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    /// Feeds `frame_dt` seconds of real time into the simulation and returns
    /// how many ticks ran.
    pub fn advance(&mut self, frame_dt: f64) -> usize {
        let dt = if frame_dt.is_nan() {
            0.0
        } else {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        };
        self.accumulator += dt;

        let mut ticks = 0;
        while self.accumulator >= SIM_TICK {
            self.game.step(SIM_TICK);
            self.accumulator -= SIM_TICK;
            ticks += 1;
        }
        ticks
    }

    pub fn apply_input(&mut self, direction: Direction) -> bool {
        self.game.apply_input(direction)
    }

    pub fn reset(&mut self, config: Config) {
        self.accumulator = 0.0;
        self.game.reset(config);
    }

    /// Changes the arena speed mid-run. Bodies, scores and banked move time
    /// are left alone; the new step intervals apply from the next tick.
    /// Returns the rate actually in use after clamping.
    pub fn set_max_tick_rate(&mut self, rate: f64) -> f64 {
        let rate = clamp_tick_rate(rate);
        self.game.config.max_tick_rate = rate;
        rate
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let world = &self.game.world;
        let player = self.game.player();

        Snapshot {
            grid_size: world.board.size,
            snakes:    world
                .snakes
                .iter()
                .filter(|snake| snake.alive)
                .map(|snake| SnakeView {
                    id:       snake.id,
                    kind:     snake.kind,
                    name:     snake.name.clone(),
                    hue:      snake.hue,
                    facing:   snake.direction,
                    segments: snake
                        .body
                        .iter()
                        .zip(&snake.levels)
                        .map(|(coord, level)| SegmentView {
                            x:     coord.x,
                            y:     coord.y,
                            label: level_label(*level),
                        })
                        .collect(),
                })
                .collect(),
            food:      world
                .food
                .iter()
                .map(|food| FoodView {
                    x:     food.coord.x,
                    y:     food.coord.y,
                    label: level_label(food.level),
                })
                .collect(),
            stats:     Stats {
                score:     player.score,
                max_level: level_label(player.max_level),
                length:    player.len(),
                bots:      self.game.bots_alive(),
            },
            game_over: self.game.outcome.map(|cause| cause.to_string()),
        }
    }
}
