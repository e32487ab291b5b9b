use std::collections::VecDeque;

use super::SnakeID;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Respawn {
    pub due:        f64,
    pub snake:      SnakeID,
    pub generation: u64,
}

/// Pending bot respawns in simulation time. Every entry uses the same delay,
/// so pushing in order keeps the queue sorted by due time.
#[derive(Debug, Default, Clone)]
pub struct Schedule {
    pending: VecDeque<Respawn>,
}

impl Schedule {
    pub fn push(&mut self, respawn: Respawn) {
        self.pending.push_back(respawn);
    }

    /// Pops every respawn that is due at `now`.
    pub fn due(&mut self, now: f64) -> Vec<Respawn> {
        let mut due = Vec::new();
        while self.pending.front().is_some_and(|r| r.due <= now) {
            due.extend(self.pending.pop_front());
        }
        due
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_due_entries_are_released() {
        let mut schedule = Schedule::default();
        schedule.push(Respawn {
            due:        1.0,
            snake:      1,
            generation: 1,
        });
        schedule.push(Respawn {
            due:        2.0,
            snake:      2,
            generation: 2,
        });

        assert!(schedule.due(0.5).is_empty());
        let released = schedule.due(1.0);
        assert_eq!(released.len(), 1);
        assert_eq!(released[0].snake, 1);
        assert_eq!(schedule.len(), 1);

        schedule.clear();
        assert!(schedule.is_empty());
    }
}
