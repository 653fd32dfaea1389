use super::{
    action::{Action, Direction},
    config::GameConfig,
    food::FoodSpawner,
    state::{EndReason, Position, Snake, SnakeState, StepResult},
};
use anyhow::{Context, Result};
use rand::Rng;

/// The game engine that handles all game logic
pub struct GameEngine<R = rand::rngs::ThreadRng> {
    config: GameConfig,
    spawner: FoodSpawner<R>,
}

impl GameEngine<rand::rngs::ThreadRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_spawner(config, FoodSpawner::new())
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_spawner(config: GameConfig, spawner: FoodSpawner<R>) -> Self {
        Self { config, spawner }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a new game: centred snake heading right, zero score, fresh food
    pub fn reset(&mut self) -> Result<SnakeState> {
        let center_x = (self.config.grid_width / 2) as i32;
        let center_y = (self.config.grid_height / 2) as i32;

        let snake = Snake::new(
            Position::new(center_x, center_y),
            Direction::Right,
            self.config.initial_snake_length,
        );

        let food = self
            .spawner
            .spawn(self.config.grid_width, self.config.grid_height, &snake)
            .context("No free cell left for the first food")?;

        Ok(
            SnakeState::new(snake, food, self.config.grid_width, self.config.grid_height)
                .with_max_length(self.config.max_snake_length)
                .with_food_score(self.config.food_score),
        )
    }

    /// Execute one tick of the game
    pub fn step(&mut self, state: &mut SnakeState, action: Action) -> StepResult {
        if action == Action::Quit {
            state.finish(EndReason::Quit);
            return StepResult {
                status: state.status(),
                ate_food: false,
                score: state.score,
                collision: None,
            };
        }

        let result = state.step(action.requested_direction());

        if result.ate_food {
            match self
                .spawner
                .spawn(state.grid_width, state.grid_height, &state.snake)
            {
                Some(food) => state.food = food,
                None => {
                    state.finish(EndReason::BoardFull);
                    return StepResult {
                        status: state.status(),
                        ..result
                    };
                }
            }
        }

        result
    }
}
