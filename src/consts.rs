//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Time between two display frames.  The game's own tick rate is set by its
/// mode; frames only decide how often we check whether a tick is due.
pub(crate) const FRAME_PERIOD: Duration = Duration::from_micros(16_667);

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Side length of a board cell in board units
pub(crate) const CELL_SIZE: u16 = 20;

/// Number of terminal columns used to draw one board cell, so that cells come
/// out roughly square
pub(crate) const CELL_COLUMNS: u16 = 2;

/// Score at the start of a game, and the high score when none is stored
pub(crate) const INITIAL_SCORE: u32 = 1;

/// Number of random cells to try when placing food before falling back to
/// choosing from a list of all free cells
pub(crate) const FOOD_PLACEMENT_ATTEMPTS: usize = 64;

/// Key under which the high score is stored
pub(crate) const HIGH_SCORE_KEY: &str = "high-score";

/// Glyph for the snake's head when it is moving up
pub(crate) const SNAKE_HEAD_UP_SYMBOL: &str = "▲▲";

/// Glyph for the snake's head when it is moving down
pub(crate) const SNAKE_HEAD_DOWN_SYMBOL: &str = "▼▼";

/// Glyph for the snake's head when it is moving left
pub(crate) const SNAKE_HEAD_LEFT_SYMBOL: &str = "◀◀";

/// Glyph for the snake's head when it is moving right
pub(crate) const SNAKE_HEAD_RIGHT_SYMBOL: &str = "▶▶";

/// Glyph for the snake's head before it has started moving
pub(crate) const SNAKE_HEAD_STILL_SYMBOL: &str = "◆◆";

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: &str = "██";

/// Glyph for the food
pub(crate) const FOOD_SYMBOL: &str = "()";

/// Glyph for the snake's head when it's collided with a wall or itself
pub(crate) const COLLISION_SYMBOL: &str = "××";

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for the food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the currently-selected menu item
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);
