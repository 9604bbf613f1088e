mod paused;
use self::paused::{PauseOpt, Paused};
use crate::app::{Globals, Screen};
use crate::command::Command;
use crate::config::Config;
use crate::consts;
use crate::game::{Advance, Board, Direction, FrameScheduler, Game, Mode, Position, Status};
use crate::menu::MainMenu;
use crate::util::{center_rect, get_display_area};
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
    Frame,
};
use std::time::Instant;

/// The screen on which the game is played
#[derive(Clone, Debug)]
pub(crate) struct PlayScreen<R = rand::rngs::ThreadRng> {
    game: Game<R>,
    scheduler: FrameScheduler,
    pause_menu: Paused,
    config: Config,
    next_frame: Option<Instant>,
}

impl PlayScreen<rand::rngs::ThreadRng> {
    pub(crate) fn new(globals: Globals, mode: Mode) -> Self {
        PlayScreen::new_with_rng(globals, mode, rand::rng())
    }
}

impl<R: Rng> PlayScreen<R> {
    pub(crate) fn new_with_rng(globals: Globals, mode: Mode, rng: R) -> PlayScreen<R> {
        let Globals { config, high_score } = globals;
        let game = Game::new(mode, board_for(consts::DISPLAY_SIZE), high_score, rng);
        PlayScreen {
            game,
            scheduler: FrameScheduler::new(),
            pause_menu: Paused::new(),
            config,
            next_frame: None,
        }
    }

    /// Wait for either an input event or the next display frame, whichever
    /// comes first, and handle it
    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        let now = Instant::now();
        let deadline = *self.next_frame.get_or_insert(now + consts::FRAME_PERIOD);
        let wait = deadline.saturating_duration_since(now);
        if wait.is_zero() || !poll(wait)? {
            self.next_frame = None;
            self.on_frame(Instant::now());
            Ok(None)
        } else {
            Ok(self.handle_event(read()?))
        }
    }

    fn on_frame(&mut self, now: Instant) {
        match self.scheduler.on_frame(now, &mut self.game) {
            Advance::Collided => {
                log::info!(
                    "Game over in {} mode with score {}",
                    self.game.mode(),
                    self.game.snapshot().score
                );
            }
            Advance::Ate { record: true } => {
                log::debug!("Score {} is a new record", self.game.snapshot().score);
            }
            Advance::Idle | Advance::Moved | Advance::Ate { record: false } => (),
        }
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        if event == Event::FocusLost {
            if self.game.status() == Status::Running {
                self.pause();
            }
            return None;
        }
        let cmd = Command::from_key_event(event.as_key_press_event()?)?;
        match (self.game.status(), cmd) {
            (_, Command::Quit) => return Some(Screen::Quit),
            (_, Command::Digit(i)) => {
                if let Some(mode) = Mode::nth(i) {
                    self.select_mode(mode);
                }
            }
            (Status::NotStarted | Status::Running, Command::Up) => self.game.turn(Direction::Up),
            (Status::NotStarted | Status::Running, Command::Down) => {
                self.game.turn(Direction::Down);
            }
            (Status::NotStarted | Status::Running, Command::Left) => {
                self.game.turn(Direction::Left);
            }
            (Status::NotStarted | Status::Running, Command::Right) => {
                self.game.turn(Direction::Right);
            }
            (Status::NotStarted, Command::Esc | Command::M) => {
                return Some(self.main_menu());
            }
            (Status::Running, Command::Pause | Command::P | Command::Esc) => self.pause(),
            (Status::Paused, cmd) => match self.pause_menu.handle_command(cmd)? {
                PauseOpt::Resume => self.game.toggle_pause(),
                PauseOpt::MainMenu => return Some(self.main_menu()),
                PauseOpt::Quit => return Some(Screen::Quit),
            },
            (Status::GameOver, Command::R) => {
                self.game.restart();
                self.scheduler.reset();
            }
            (Status::GameOver, Command::M) => return Some(self.main_menu()),
            (Status::GameOver, Command::Q) => return Some(Screen::Quit),
            _ => (),
        }
        None
    }

    fn select_mode(&mut self, mode: Mode) {
        self.game.select_mode(mode);
        self.scheduler.reset();
    }
}

impl<R> PlayScreen<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    #[cfg(test)]
    pub(crate) fn mode(&self) -> Mode {
        self.game.mode()
    }

    fn pause(&mut self) {
        self.game.toggle_pause();
        self.pause_menu = Paused::new();
    }

    fn main_menu(&self) -> Screen {
        let globals = Globals {
            config: self.config.clone(),
            high_score: self.game.high_score().clone(),
        };
        Screen::Main(MainMenu::new(globals, self.game.mode()))
    }
}

/// Work out the board for a game drawn in a display area of the given size:
/// one row for the score bar, two rows for messages, and a border around the
/// board itself
fn board_for(display: Size) -> Board {
    let columns = display.width.saturating_sub(2);
    let rows = display.height.saturating_sub(5);
    let cell = u32::from(consts::CELL_SIZE);
    Board::fit(
        u32::from(columns) * cell / u32::from(consts::CELL_COLUMNS),
        u32::from(rows) * cell,
        consts::CELL_SIZE,
    )
}

impl<R> Widget for &PlayScreen<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [score_area, block_area, msg1_area, msg2_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(display);
        let snap = self.game.snapshot();
        Line::styled(
            format!(
                " Score: {}   High Score: {}   Mode: {}",
                snap.score, snap.high_score, snap.mode
            ),
            consts::SCORE_BAR_STYLE,
        )
        .render(score_area, buf);

        let board = self.game.board();
        let block_size = Size {
            width: board
                .width()
                .saturating_mul(consts::CELL_COLUMNS)
                .saturating_add(2),
            height: board.height().saturating_add(2),
        };
        let block_area = center_rect(block_area, block_size);
        Block::bordered().render(block_area, buf);

        let mut canvas = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            board,
            buf,
        };
        for &p in snap.body.iter().skip(1) {
            canvas.draw_cell(p, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE);
        }
        if let Some(food) = snap.food {
            canvas.draw_cell(food, consts::FOOD_SYMBOL, consts::FOOD_STYLE);
        }
        // Draw the head last so that it's on top of any tail segments that
        // haven't unfolded yet
        let head = snap.body.front().copied().unwrap_or(Position::ORIGIN);
        if snap.status == Status::GameOver {
            canvas.draw_cell(head, consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
        } else {
            canvas.draw_cell(head, head_symbol(snap.direction), consts::SNAKE_STYLE);
        }

        match snap.status {
            Status::NotStarted => {
                Line::from_iter([
                    Span::raw(" Press an arrow key to start — Modes: "),
                    Span::styled("1", consts::KEY_STYLE),
                    Span::raw("–"),
                    Span::styled("6", consts::KEY_STYLE),
                    Span::raw(" — Main Menu ("),
                    Span::styled("m", consts::KEY_STYLE),
                    Span::raw(")"),
                ])
                .render(msg1_area, buf);
            }
            Status::Running => {
                Line::from_iter([
                    Span::raw(" Pause ("),
                    Span::styled("p", consts::KEY_STYLE),
                    Span::raw(")"),
                ])
                .render(msg1_area, buf);
            }
            Status::Paused => {
                let pause_area = center_rect(
                    display,
                    Size {
                        width: Paused::WIDTH,
                        height: Paused::HEIGHT,
                    },
                );
                self.pause_menu.render(pause_area, buf);
            }
            Status::GameOver => {
                Span::from(" — GAME OVER —").render(msg1_area, buf);
                Line::from_iter([
                    Span::raw(" Choose One: Restart ("),
                    Span::styled("r", consts::KEY_STYLE),
                    Span::raw(") — Main Menu ("),
                    Span::styled("m", consts::KEY_STYLE),
                    Span::raw(") — Quit ("),
                    Span::styled("q", consts::KEY_STYLE),
                    Span::raw(")"),
                ])
                .render(msg2_area, buf);
            }
        }
    }
}

fn head_symbol(direction: Direction) -> &'static str {
    match direction {
        Direction::Stationary => consts::SNAKE_HEAD_STILL_SYMBOL,
        Direction::Up => consts::SNAKE_HEAD_UP_SYMBOL,
        Direction::Down => consts::SNAKE_HEAD_DOWN_SYMBOL,
        Direction::Left => consts::SNAKE_HEAD_LEFT_SYMBOL,
        Direction::Right => consts::SNAKE_HEAD_RIGHT_SYMBOL,
    }
}

/// Draws board cells onto the region of a buffer inside the board's border
#[derive(Debug)]
struct Canvas<'a> {
    area: Rect,
    board: Board,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: Position, symbol: &str, style: Style) {
        let Some((cx, cy)) = self.board.cell_of(pos) else {
            return;
        };
        let Some(x) = cx
            .checked_mul(consts::CELL_COLUMNS)
            .and_then(|x| self.area.x.checked_add(x))
        else {
            return;
        };
        let Some(y) = self.area.y.checked_add(cy) else {
            return;
        };
        for (x, ch) in (x..).zip(symbol.chars()) {
            if let Some(cell) = self.buf.cell_mut((x, y)) {
                cell.set_char(ch);
                cell.set_style(Style::reset().patch(style));
            }
        }
    }
}
