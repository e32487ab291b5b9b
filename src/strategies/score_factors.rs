use std::fmt;

use crate::arena::types::{Direction, Level};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enemy {
    /// smaller segment we can bite
    Prey(Level),
    /// equal or larger segment that would kill us
    Predator(Level),
}

#[derive(Debug, Clone, Copy)]
pub struct ScoreFactors {
    pub direction:    Direction,
    pub closest_food: Option<i64>,
    pub food_level:   Option<Level>,
    pub enemy:        Option<Enemy>,
    pub noise:        f64,
}

impl ScoreFactors {
    const CLOSEST_FOOD_WEIGHT: f64 = -2.0;
    const FOOD_BONUS: f64 = 28.0;
    const FOOD_LEVEL_WEIGHT: f64 = 2.0;
    pub const NOISE: f64 = 1.5;
    const PREDATOR_PENALTY: f64 = -200.0;
    const PREY_BONUS: f64 = 70.0;
    const PREY_LEVEL_WEIGHT: f64 = 2.0;

    #[must_use]
    pub fn calculate(&self) -> f64 {
        let food_distance = self.closest_food.map_or(0.0, |distance| {
            distance as f64 * Self::CLOSEST_FOOD_WEIGHT
        });

        let food = self.food_level.map_or(0.0, |level| {
            Self::FOOD_BONUS + f64::from(level) * Self::FOOD_LEVEL_WEIGHT
        });

        let enemy = match self.enemy {
            Some(Enemy::Prey(level)) => {
                Self::PREY_BONUS + f64::from(level) * Self::PREY_LEVEL_WEIGHT
            }
            Some(Enemy::Predator(_)) => Self::PREDATOR_PENALTY,
            None => 0.0,
        };

        food_distance + food + enemy + self.noise
    }
}

impl fmt::Display for ScoreFactors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} scores {:.2} (food {:?} away, food here: {:?}, enemy: {:?})",
            self.direction,
            self.calculate(),
            self.closest_food,
            self.food_level,
            self.enemy,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factors() -> ScoreFactors {
        ScoreFactors {
            direction:    Direction::Up,
            closest_food: None,
            food_level:   None,
            enemy:        None,
            noise:        0.0,
        }
    }

    #[test]
    fn closer_food_scores_higher() {
        let near = ScoreFactors {
            closest_food: Some(1),
            ..factors()
        };
        let far = ScoreFactors {
            closest_food: Some(6),
            ..factors()
        };
        assert!((near.calculate() - -2.0).abs() < 1e-9);
        assert!(near.calculate() > far.calculate());
    }

    #[test]
    fn food_and_prey_bonuses() {
        let food = ScoreFactors {
            closest_food: Some(0),
            food_level: Some(3),
            ..factors()
        };
        assert!((food.calculate() - 34.0).abs() < 1e-9);

        let prey = ScoreFactors {
            enemy: Some(Enemy::Prey(2)),
            ..factors()
        };
        assert!((prey.calculate() - 74.0).abs() < 1e-9);

        let predator = ScoreFactors {
            enemy: Some(Enemy::Predator(9)),
            ..factors()
        };
        assert!((predator.calculate() - -200.0).abs() < 1e-9);
    }
}
