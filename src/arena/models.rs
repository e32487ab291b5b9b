use serde::{Deserialize, Serialize};

use crate::arena::types::{Direction, Kind};

pub const DEFAULT_GRID_SIZE: i64 = 26;
pub const MIN_GRID_SIZE: i64 = 10;
pub const MAX_GRID_SIZE: i64 = 60;

pub const DEFAULT_MAX_TICK_RATE: f64 = 20.0;
pub const MIN_TICK_RATE: f64 = 2.0;
pub const MAX_TICK_RATE: f64 = 60.0;

pub const MIN_SPEED_FACTOR: f64 = 0.05;
pub const MAX_SPEED_FACTOR: f64 = 1.0;
pub const DEFAULT_PLAYER_SPEED: f64 = 0.10;
pub const DEFAULT_BOT_SPEEDS: [f64; 5] = [0.10, 0.20, 0.30, 0.40, 0.50];

pub const DEFAULT_FOOD_TARGET: usize = 18;

#[derive(Serialize, Debug)]
pub struct Status {
    pub author:     String,
    pub version:    String,
    pub player_hue: u16,
}

/// Externally supplied configuration. Every field is optional and anything
/// out of range is clamped when converted into a [`Config`].
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Settings {
    pub grid_size:     Option<i64>,
    pub max_tick_rate: Option<f64>,
    pub player_speed:  Option<f64>,
    pub bot_speeds:    Option<Vec<f64>>,
    pub food_target:   Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub grid_size:     i64,
    pub max_tick_rate: f64,
    pub player_speed:  f64,
    pub bot_speeds:    Vec<f64>,
    pub food_target:   usize,
}

/// Live change of the arena's tick rate, applied without a reset.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct SpeedChange {
    pub max_tick_rate: f64,
}

/// Falls back to the default for NaN.
#[must_use]
pub fn clamp_tick_rate(rate: f64) -> f64 {
    if rate.is_nan() {
        return DEFAULT_MAX_TICK_RATE;
    }
    rate.clamp(MIN_TICK_RATE, MAX_TICK_RATE)
}

fn clamp_speed(speed: f64) -> f64 {
    if speed.is_nan() {
        return MIN_SPEED_FACTOR;
    }
    speed.clamp(MIN_SPEED_FACTOR, MAX_SPEED_FACTOR)
}

impl Default for Config {
    fn default() -> Self {
        Self::from(Settings::default())
    }
}

impl From<Settings> for Config {
    fn from(settings: Settings) -> Self {
        let grid_size = settings
            .grid_size
            .unwrap_or(DEFAULT_GRID_SIZE)
            .clamp(MIN_GRID_SIZE, MAX_GRID_SIZE);

        let max_tick_rate = clamp_tick_rate(
            settings.max_tick_rate.unwrap_or(DEFAULT_MAX_TICK_RATE),
        );

        // keep at least half the board free so the spawner has room
        let max_food = (grid_size * grid_size / 2) as usize;

        Self {
            grid_size,
            max_tick_rate,
            player_speed: clamp_speed(
                settings.player_speed.unwrap_or(DEFAULT_PLAYER_SPEED),
            ),
            bot_speeds: settings
                .bot_speeds
                .unwrap_or_else(|| DEFAULT_BOT_SPEEDS.to_vec())
                .into_iter()
                .map(clamp_speed)
                .collect(),
            food_target: settings
                .food_target
                .unwrap_or(DEFAULT_FOOD_TARGET)
                .min(max_food),
        }
    }
}

/// Direction change requests coming from the render side.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum InputEvent {
    Direction(Direction),
    Key(String),
    Swipe { dx: f64, dy: f64 },
}

impl InputEvent {
    /// Unknown keys and short swipes resolve to nothing.
    #[must_use]
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Self::Direction(direction) => Some(*direction),
            Self::Key(key) => Direction::from_key(key),
            Self::Swipe { dx, dy } => Direction::from_swipe(*dx, *dy),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SegmentView {
    pub x:     i64,
    pub y:     i64,
    pub label: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SnakeView {
    pub id:       usize,
    pub kind:     Kind,
    pub name:     String,
    pub hue:      u16,
    pub facing:   Direction,
    pub segments: Vec<SegmentView>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FoodView {
    pub x:     i64,
    pub y:     i64,
    pub label: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Stats {
    pub score:     u64,
    pub max_level: String,
    pub length:    usize,
    pub bots:      usize,
}

/// Read-only view of the arena handed to the render side once per frame.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub grid_size: i64,
    pub snakes:    Vec<SnakeView>,
    pub food:      Vec<FoodView>,
    pub stats:     Stats,
    pub game_over: Option<String>,
}
