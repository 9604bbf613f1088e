use super::{Advance, Game, Status};
use rand::Rng;
use std::time::Instant;

/// Decides, once per display frame, whether the game is due to advance.
///
/// The scheduler is driven from outside: the caller invokes
/// [`FrameScheduler::on_frame()`] at its display rate and the scheduler
/// commits at most one [`Game::advance()`] per call, at no more than the
/// game mode's tick rate.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct FrameScheduler {
    /// When the game last advanced (or was last held still while paused)
    last_advance: Option<Instant>,
}

impl FrameScheduler {
    pub(crate) fn new() -> FrameScheduler {
        FrameScheduler::default()
    }

    /// Forget the timing reference, so that the next frame starts a fresh
    /// tick period
    pub(crate) fn reset(&mut self) {
        self.last_advance = None;
    }

    pub(crate) fn on_frame<R: Rng>(&mut self, now: Instant, game: &mut Game<R>) -> Advance {
        if matches!(game.status(), Status::Paused | Status::GameOver) {
            // Keep the clock current so that unpausing doesn't cause an
            // immediate move
            self.last_advance = Some(now);
            return Advance::Idle;
        }
        let Some(period) = game.mode().tick_period() else {
            return Advance::Idle;
        };
        let Some(last) = self.last_advance else {
            self.last_advance = Some(now);
            return Advance::Idle;
        };
        if now.saturating_duration_since(last) < period {
            return Advance::Idle;
        }
        self.last_advance = Some(now);
        game.advance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts;
    use crate::game::{Board, Direction, Mode, Position};
    use crate::highscore::HighScore;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use std::time::Duration;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn new_game(mode: Mode) -> Game<ChaCha12Rng> {
        let mut game = Game::new(
            mode,
            Board::new(40, 20, consts::CELL_SIZE),
            HighScore::in_memory(1),
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        );
        game.food = Some(Position::new(200, 200));
        game
    }

    /// Run frames `FRAME_PERIOD` apart for the given span of time, returning
    /// the number of times the game advanced
    fn run_frames(
        sched: &mut FrameScheduler,
        game: &mut Game<ChaCha12Rng>,
        start: Instant,
        frames: u32,
    ) -> usize {
        (1..=frames)
            .map(|i| sched.on_frame(start + consts::FRAME_PERIOD * i, game))
            .filter(|&a| a != Advance::Idle)
            .count()
    }

    #[test]
    fn advances_at_tick_rate() {
        let mut game = new_game(Mode::Easy);
        game.turn(Direction::Down);
        let mut sched = FrameScheduler::new();
        let start = Instant::now();
        assert_eq!(sched.on_frame(start, &mut game), Advance::Idle);
        // 60 frames is one second; easy mode moves 8 times a second, but each
        // move has to wait for the first frame at least 125ms after the
        // previous one
        let moves = run_frames(&mut sched, &mut game, start, 60);
        assert_eq!(moves, 7);
        assert_eq!(game.snapshot().body.front(), Some(&Position::new(0, 140)));
    }

    #[test]
    fn one_advance_per_frame() {
        let mut game = new_game(Mode::Slow);
        game.turn(Direction::Right);
        let mut sched = FrameScheduler::new();
        let start = Instant::now();
        assert_eq!(sched.on_frame(start, &mut game), Advance::Idle);
        // A long stall still only produces a single move
        assert_eq!(
            sched.on_frame(start + Duration::from_secs(10), &mut game),
            Advance::Moved
        );
        assert_eq!(
            sched.on_frame(start + Duration::from_millis(10_500), &mut game),
            Advance::Idle
        );
    }

    #[test]
    fn not_started_never_moves() {
        let mut game = new_game(Mode::Impossible);
        let mut sched = FrameScheduler::new();
        let start = Instant::now();
        assert_eq!(run_frames(&mut sched, &mut game, start, 120), 0);
        assert_eq!(game.snapshot().body.front(), Some(&Position::ORIGIN));
    }

    #[test]
    fn zero_tick_rate_never_advances() {
        let mut game = new_game(Mode::Still);
        game.turn(Direction::Right);
        let mut sched = FrameScheduler::new();
        let start = Instant::now();
        assert_eq!(run_frames(&mut sched, &mut game, start, 600), 0);
        assert_eq!(
            sched.on_frame(start + Duration::from_secs(3600), &mut game),
            Advance::Idle
        );
        assert_eq!(game.snapshot().body.front(), Some(&Position::ORIGIN));
        assert_eq!(game.status(), Status::Running);
    }

    #[test]
    fn no_burst_after_unpausing() {
        let mut game = new_game(Mode::Normal);
        game.turn(Direction::Down);
        let mut sched = FrameScheduler::new();
        let start = Instant::now();
        assert_eq!(sched.on_frame(start, &mut game), Advance::Idle);
        game.toggle_pause();
        for secs in 1..=5 {
            assert_eq!(
                sched.on_frame(start + Duration::from_secs(secs), &mut game),
                Advance::Idle
            );
        }
        game.toggle_pause();
        let resumed = start + Duration::from_secs(5);
        assert_eq!(
            sched.on_frame(resumed + consts::FRAME_PERIOD, &mut game),
            Advance::Idle
        );
        assert_eq!(
            sched.on_frame(resumed + Duration::from_millis(72), &mut game),
            Advance::Moved
        );
        assert_eq!(game.snapshot().body.front(), Some(&Position::new(0, 20)));
    }

    #[test]
    fn game_over_holds() {
        let mut game = new_game(Mode::Impossible);
        game.turn(Direction::Up);
        let mut sched = FrameScheduler::new();
        let start = Instant::now();
        assert_eq!(sched.on_frame(start, &mut game), Advance::Idle);
        assert_eq!(
            sched.on_frame(start + Duration::from_millis(20), &mut game),
            Advance::Collided
        );
        assert_eq!(run_frames(&mut sched, &mut game, start, 60), 0);
        assert_eq!(game.status(), Status::GameOver);
    }
}
