pub mod hunter;
pub mod score_factors;

pub use hunter::Hunter;
use rand::RngCore;

use crate::{
    arena::types::Direction,
    sim::{board::World, SnakeID},
};

pub trait Strategy {
    /// Picks the direction `snake` should take on its next step. Strategies
    /// only read the world; `rng` is there for tie breaking.
    fn get_movement(
        &self,
        world: &World,
        snake: SnakeID,
        rng: &mut dyn RngCore,
    ) -> Direction;
}
