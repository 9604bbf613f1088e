mod board;
mod direction;
mod food;
mod mode;
mod scheduler;
mod snake;
pub(crate) use self::board::{is_self_collision, Board, Position};
pub(crate) use self::direction::Direction;
pub(crate) use self::mode::{Mode, ParseModeError};
pub(crate) use self::scheduler::FrameScheduler;
use self::food::place_food;
use self::snake::Snake;
use crate::consts;
use crate::highscore::HighScore;
use rand::Rng;
use std::collections::VecDeque;

/// The Snake engine: snake, food, score, and the rules tying them together
#[derive(Clone, Debug)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    rng: R,
    board: Board,
    mode: Mode,
    snake: Snake,
    direction: Direction,
    food: Option<Position>,
    score: u32,
    status: Status,
    high_score: HighScore,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum Status {
    /// The snake is waiting for its first directional input
    #[default]
    NotStarted,
    Running,
    Paused,
    /// The snake ran into a wall or itself
    GameOver,
}

/// What happened on a call to [`Game::advance()`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Advance {
    /// The game isn't running, so nothing moved
    Idle,
    Moved,
    Ate {
        /// Whether the new score beat the high score
        record: bool,
    },
    Collided,
}

impl<R: Rng> Game<R> {
    pub(crate) fn new(mode: Mode, board: Board, high_score: HighScore, rng: R) -> Game<R> {
        let mut game = Game {
            rng,
            board,
            mode,
            snake: Snake::new(Position::ORIGIN),
            direction: Direction::Stationary,
            food: None,
            score: consts::INITIAL_SCORE,
            status: Status::NotStarted,
            high_score,
        };
        game.place_food();
        game
    }

    /// Move the snake one cell onwards
    pub(crate) fn advance(&mut self) -> Advance {
        if self.status != Status::Running || !self.direction.is_moving() {
            return Advance::Idle;
        }
        let candidate = self.direction.step(self.snake.head(), self.board.cell_size());
        if self.board.is_out_of_bounds(candidate)
            || is_self_collision(self.snake.body(), candidate)
        {
            log::debug!(
                "Snake collided at ({}, {}) with score {}",
                candidate.x,
                candidate.y,
                self.score
            );
            self.status = Status::GameOver;
            return Advance::Collided;
        }
        self.snake.push_head(candidate);
        if self.food == Some(candidate) {
            let growth = self.mode.growth();
            let gain = u32::try_from(growth).unwrap_or(u32::MAX).saturating_add(1);
            self.score = self.score.saturating_add(gain);
            self.snake.extend_tail(growth);
            self.place_food();
            let record = self.high_score.offer(self.score);
            if record {
                log::info!("New high score: {}", self.score);
            }
            Advance::Ate { record }
        } else {
            self.snake.pop_tail();
            Advance::Moved
        }
    }

    /// Start a new game after a game over.  Does nothing in any other state.
    pub(crate) fn restart(&mut self) {
        if self.status == Status::GameOver {
            self.reset();
        }
    }

    /// Switch to `mode` and start a new game in it
    pub(crate) fn select_mode(&mut self, mode: Mode) {
        log::debug!("Switching to {mode} mode");
        self.mode = mode;
        self.reset();
    }

    fn reset(&mut self) {
        self.snake = Snake::new(Position::ORIGIN);
        self.direction = Direction::Stationary;
        self.score = consts::INITIAL_SCORE;
        self.status = Status::NotStarted;
        self.place_food();
    }

    fn place_food(&mut self) {
        self.food = place_food(self.board, &self.snake, &mut self.rng);
        if self.food.is_none() {
            log::debug!("No room left on the board for food");
        }
    }
}

impl<R> Game<R> {
    /// Point the snake in `direction`.  Reversals and repeats of the current
    /// direction are ignored, as is any input while the game isn't accepting
    /// movement.
    pub(crate) fn turn(&mut self, direction: Direction) {
        if !matches!(self.status, Status::NotStarted | Status::Running)
            || !self.direction.accepts(direction)
        {
            return;
        }
        self.direction = direction;
        self.status = Status::Running;
    }

    pub(crate) fn toggle_pause(&mut self) {
        self.status = match self.status {
            Status::Running => Status::Paused,
            Status::Paused => Status::Running,
            other => other,
        };
    }

    pub(crate) fn status(&self) -> Status {
        self.status
    }

    pub(crate) fn mode(&self) -> Mode {
        self.mode
    }

    pub(crate) fn board(&self) -> Board {
        self.board
    }

    pub(crate) fn high_score(&self) -> &HighScore {
        &self.high_score
    }

    pub(crate) fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            body: self.snake.body(),
            food: self.food,
            direction: self.direction,
            score: self.score,
            high_score: self.high_score.get(),
            status: self.status,
            mode: self.mode,
        }
    }
}

/// A read-only view of the game for drawing
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Snapshot<'a> {
    /// The snake, head first
    pub(crate) body: &'a VecDeque<Position>,
    pub(crate) food: Option<Position>,
    pub(crate) direction: Direction,
    pub(crate) score: u32,
    pub(crate) high_score: u32,
    pub(crate) status: Status,
    pub(crate) mode: Mode,
}
