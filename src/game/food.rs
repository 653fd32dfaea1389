use super::state::{Position, Snake};
use rand::Rng;
use rand::seq::IteratorRandom;

/// Places food on cells the snake does not occupy.
///
/// Random sampling is tried first; once the retry budget is spent the
/// spawner scans the grid for free cells, so a nearly full board still
/// gets food and a full one yields `None` instead of spinning.
pub struct FoodSpawner<R = rand::rngs::ThreadRng> {
    rng: R,
    max_attempts: usize,
}

impl FoodSpawner<rand::rngs::ThreadRng> {
    pub fn new() -> Self {
        Self::with_rng(rand::thread_rng())
    }
}

impl Default for FoodSpawner<rand::rngs::ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> FoodSpawner<R> {
    pub const DEFAULT_ATTEMPTS: usize = 64;

    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            max_attempts: Self::DEFAULT_ATTEMPTS,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Pick a free cell in `[0, width) x [0, height)`, or `None` if the snake fills the grid
    pub fn spawn(&mut self, width: usize, height: usize, snake: &Snake) -> Option<Position> {
        if width == 0 || height == 0 {
            return None;
        }

        for _ in 0..self.max_attempts {
            let pos = Position::new(
                self.rng.gen_range(0..width) as i32,
                self.rng.gen_range(0..height) as i32,
            );

            if !snake.occupies(pos) {
                return Some(pos);
            }
        }

        log::debug!(
            "No free cell after {} samples, scanning the grid",
            self.max_attempts
        );
        (0..height as i32)
            .flat_map(|y| (0..width as i32).map(move |x| Position::new(x, y)))
            .filter(|pos| !snake.occupies(*pos))
            .choose(&mut self.rng)
    }
}
