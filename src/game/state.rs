use super::action::Direction;
use std::collections::VecDeque;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at the front
    body: VecDeque<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.delta();
        let body = (0..length.max(1) as i32)
            .map(|i| head.moved_by(-dx * i, -dy * i))
            .collect();

        Self { body, direction }
    }

    /// Build a snake from explicit segments, head first
    #[cfg(test)]
    pub(crate) fn from_segments(segments: impl IntoIterator<Item = Position>, direction: Direction) -> Self {
        let body: VecDeque<Position> = segments.into_iter().collect();
        assert!(!body.is_empty(), "a snake needs at least one segment");
        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    #[cfg(test)]
    pub(crate) fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// All segments, head first
    pub fn segments(&self) -> impl Iterator<Item = &Position> + '_ {
        self.body.iter()
    }

    /// Check if position is any segment of the snake, tail included
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Push a new head. The tail is dropped unless `grow` is set.
    fn advance_to(&mut self, new_head: Position, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Whether the game still accepts moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Over,
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Collision(CollisionType),
    /// The player pressed the quit key
    Quit,
    /// No free cell was left for food
    BoardFull,
}

impl EndReason {
    pub fn describe(&self) -> &'static str {
        match self {
            EndReason::Collision(CollisionType::Wall) => "Hit the wall",
            EndReason::Collision(CollisionType::SelfCollision) => "Bit your own tail",
            EndReason::Quit => "Quit",
            EndReason::BoardFull => "The board is full",
        }
    }
}

/// Result of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    pub status: GameStatus,
    /// Whether the head landed on the food this step
    pub ate_food: bool,
    /// Score after the step
    pub score: u32,
    /// Type of collision if one occurred this step
    pub collision: Option<CollisionType>,
}

impl StepResult {
    pub fn is_over(&self) -> bool {
        self.status == GameStatus::Over
    }
}

/// Complete state of one game: snake, food, score and status
#[derive(Debug, Clone, PartialEq)]
pub struct SnakeState {
    pub snake: Snake,
    pub food: Position,
    pub grid_width: usize,
    pub grid_height: usize,
    pub max_length: usize,
    pub food_score: u32,
    pub score: u32,
    pub steps: u32,
    status: GameStatus,
    end_reason: Option<EndReason>,
}

impl SnakeState {
    /// Create a new game state with a zero score
    pub fn new(snake: Snake, food: Position, grid_width: usize, grid_height: usize) -> Self {
        Self {
            snake,
            food,
            grid_width,
            grid_height,
            max_length: usize::MAX,
            food_score: 10,
            score: 0,
            steps: 0,
            status: GameStatus::Running,
            end_reason: None,
        }
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn with_food_score(mut self, food_score: u32) -> Self {
        self.food_score = food_score;
        self
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }

    /// Advance the snake by one cell.
    ///
    /// A requested direction that reverses the current heading is ignored.
    /// Collisions are checked against the body before it moves, so the
    /// current tail counts as occupied. On collision the body is left as is.
    pub fn step(&mut self, requested: Option<Direction>) -> StepResult {
        if !self.is_running() {
            return self.result(false, None);
        }

        if let Some(direction) = requested {
            if !self.snake.direction.is_opposite(direction) {
                self.snake.direction = direction;
            }
        }

        let new_head = self.snake.head().moved_in_direction(self.snake.direction);

        if let Some(collision) = self.check_collision(new_head) {
            self.steps += 1;
            self.finish(EndReason::Collision(collision));
            return self.result(false, Some(collision));
        }

        let ate_food = new_head == self.food;
        // At the cap the snake keeps its length, but the food still counts.
        let grow = ate_food && self.snake.len() < self.max_length;
        self.snake.advance_to(new_head, grow);

        if ate_food {
            self.score = self.score.saturating_add(self.food_score);
        }
        self.steps += 1;

        self.result(ate_food, None)
    }

    /// End the game without moving. Score and body stay as they are.
    pub fn finish(&mut self, reason: EndReason) {
        if self.is_running() {
            self.status = GameStatus::Over;
            self.end_reason = Some(reason);
        }
    }

    fn check_collision(&self, pos: Position) -> Option<CollisionType> {
        if !self.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if self.snake.occupies(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    fn result(&self, ate_food: bool, collision: Option<CollisionType>) -> StepResult {
        StepResult {
            status: self.status,
            ate_food,
            score: self.score,
            collision,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_of(state: &SnakeState) -> Vec<Position> {
        state.snake.segments().copied().collect()
    }

    fn state_with(snake: Snake, food: Position) -> SnakeState {
        SnakeState::new(snake, food, 40, 20)
    }

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(5, 6));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(snake.tail(), Position::new(3, 5));
        assert!(snake.occupies(Position::new(4, 5)));
        assert!(!snake.occupies(Position::new(6, 5)));
    }

    #[test]
    fn test_normal_move_keeps_length() {
        let mut state = state_with(
            Snake::new(Position::new(20, 10), Direction::Right, 3),
            Position::new(0, 0),
        );

        for _ in 0..5 {
            let before = state.snake.head();
            let result = state.step(None);
            assert!(!result.is_over());
            assert!(!result.ate_food);
            assert_eq!(state.snake.len(), 3);
            assert_eq!(state.snake.head(), before.moved_by(1, 0));
        }
    }

    #[test]
    fn test_three_ticks_right_from_centre() {
        let mut state = state_with(
            Snake::new(Position::new(20, 10), Direction::Right, 3),
            Position::new(5, 5),
        );

        for _ in 0..3 {
            state.step(None);
        }

        assert_eq!(state.snake.head(), Position::new(23, 10));
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let mut state = state_with(
            Snake::new(Position::new(5, 5), Direction::Right, 3),
            Position::new(6, 5),
        );

        let result = state.step(None);

        assert!(result.ate_food);
        assert_eq!(result.score, 10);
        assert_eq!(state.snake.len(), 4);
        assert_eq!(state.snake.head(), Position::new(6, 5));
        assert_eq!(state.snake.tail(), Position::new(3, 5));
    }

    #[test]
    fn test_growth_stops_at_cap_but_score_counts() {
        let mut state = state_with(
            Snake::new(Position::new(5, 5), Direction::Right, 3),
            Position::new(6, 5),
        )
        .with_max_length(4);

        state.step(None);
        assert_eq!(state.snake.len(), 4);

        state.food = Position::new(7, 5);
        let result = state.step(None);
        assert!(result.ate_food);
        assert_eq!(result.score, 20);
        assert_eq!(state.snake.len(), 4);
        assert_eq!(state.snake.head(), Position::new(7, 5));
    }

    #[test]
    fn test_score_saturates_instead_of_overflowing() {
        let mut state = state_with(
            Snake::new(Position::new(5, 5), Direction::Right, 3),
            Position::new(6, 5),
        )
        .with_food_score(u32::MAX);

        let first = state.step(None);
        assert_eq!(first.score, u32::MAX);

        state.food = Position::new(7, 5);
        let second = state.step(None);
        assert!(second.ate_food);
        assert_eq!(second.score, u32::MAX);
        assert_eq!(state.score, u32::MAX);
    }

    #[test]
    fn test_wall_collision_leaves_body() {
        let snake = Snake::new(Position::new(0, 5), Direction::Left, 3);
        let mut state = SnakeState::new(snake, Position::new(5, 5), 10, 10);
        let before = body_of(&state);

        let result = state.step(None);

        assert!(result.is_over());
        assert_eq!(result.collision, Some(CollisionType::Wall));
        assert_eq!(body_of(&state), before);
        assert_eq!(
            state.end_reason(),
            Some(EndReason::Collision(CollisionType::Wall))
        );
    }

    #[test]
    fn test_every_edge_is_a_wall() {
        let cases = [
            (Position::new(0, 5), Direction::Up, Direction::Left),
            (Position::new(9, 5), Direction::Down, Direction::Right),
            (Position::new(5, 0), Direction::Left, Direction::Up),
            (Position::new(5, 9), Direction::Right, Direction::Down),
        ];

        for (head, heading, turn) in cases {
            let mut state =
                SnakeState::new(Snake::new(head, heading, 1), Position::new(3, 3), 10, 10);
            let result = state.step(Some(turn));
            assert_eq!(result.collision, Some(CollisionType::Wall), "{:?}", turn);
        }
    }

    #[test]
    fn test_self_collision() {
        // Head at (5,5) going Right, body: (5,5), (4,5), (3,5), (2,5), (1,5)
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 5);
        let mut state = SnakeState::new(snake, Position::new(8, 8), 10, 10);

        state.step(None); // (6,5)
        state.step(Some(Direction::Down)); // (6,6)
        state.step(Some(Direction::Left)); // (5,6)
        let before = body_of(&state);
        let result = state.step(Some(Direction::Up)); // (5,5) is still body

        assert!(result.is_over());
        assert_eq!(result.collision, Some(CollisionType::SelfCollision));
        assert_eq!(body_of(&state), before);
    }

    #[test]
    fn test_tail_counts_as_occupied() {
        // A 2x2 loop: moving into the tail cell ends the game.
        let snake = Snake::from_segments(
            [
                Position::new(1, 2),
                Position::new(2, 2),
                Position::new(2, 1),
                Position::new(1, 1),
            ],
            Direction::Left,
        );
        let mut state = SnakeState::new(snake, Position::new(8, 8), 10, 10);

        let result = state.step(Some(Direction::Up));

        assert_eq!(result.collision, Some(CollisionType::SelfCollision));
    }

    #[test]
    fn test_reversal_is_ignored() {
        let mut state = state_with(
            Snake::new(Position::new(20, 10), Direction::Right, 3),
            Position::new(0, 0),
        );

        let result = state.step(Some(Direction::Left));
        assert!(!result.is_over());
        assert_eq!(state.snake.direction, Direction::Right);
        assert_eq!(state.snake.head(), Position::new(21, 10));

        let result = state.step(Some(Direction::Up));
        assert!(!result.is_over());
        assert_eq!(state.snake.head(), Position::new(21, 9));
    }

    #[test]
    fn test_over_is_terminal() {
        let snake = Snake::new(Position::new(0, 5), Direction::Left, 3);
        let mut state = SnakeState::new(snake, Position::new(5, 5), 10, 10);
        state.step(None);
        let frozen = state.clone();

        let result = state.step(Some(Direction::Up));

        assert!(result.is_over());
        assert_eq!(result.collision, None);
        assert_eq!(state, frozen);
    }

    #[test]
    fn test_finish_keeps_score_and_body() {
        let mut state = state_with(
            Snake::new(Position::new(5, 5), Direction::Right, 3),
            Position::new(6, 5),
        );
        state.step(None);
        let body = body_of(&state);

        state.finish(EndReason::Quit);

        assert_eq!(state.status(), GameStatus::Over);
        assert_eq!(state.score, 10);
        assert_eq!(body_of(&state), body);
        assert_eq!(state.end_reason(), Some(EndReason::Quit));

        // The first reason sticks
        state.finish(EndReason::BoardFull);
        assert_eq!(state.end_reason(), Some(EndReason::Quit));
    }

    #[test]
    fn test_bounds_checking() {
        let state = SnakeState::new(
            Snake::new(Position::new(5, 5), Direction::Right, 3),
            Position::new(10, 10),
            40,
            20,
        );

        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(39, 19)));
        assert!(!state.is_in_bounds(Position::new(-1, 0)));
        assert!(!state.is_in_bounds(Position::new(40, 0)));
        assert!(!state.is_in_bounds(Position::new(0, 20)));
    }
}
