use super::board::{Board, Position};
use super::snake::Snake;
use crate::consts;
use rand::{seq::IteratorRandom, Rng};

/// Pick a random free cell for the next food item.
///
/// Food is only placed strictly inside a one-cell border around the edge of
/// the board.  Cells are drawn at random until one not covered by the snake
/// turns up; after [`FOOD_PLACEMENT_ATTEMPTS`][consts::FOOD_PLACEMENT_ATTEMPTS]
/// misses, a cell is instead chosen from the full list of free cells.
/// Returns `None` if there are no free cells inside the border.
pub(crate) fn place_food<R: Rng>(board: Board, snake: &Snake, rng: &mut R) -> Option<Position> {
    let (xs, ys) = inset(board)?;
    for _ in 0..consts::FOOD_PLACEMENT_ATTEMPTS {
        let pos = board.position_of(rng.random_range(xs.clone()), rng.random_range(ys.clone()));
        if !snake.contains(pos) {
            return Some(pos);
        }
    }
    log::debug!("Random food placement kept hitting the snake; scanning free cells");
    ys.flat_map(|y| xs.clone().map(move |x| (x, y)))
        .map(|(x, y)| board.position_of(x, y))
        .filter(|&pos| !snake.contains(pos))
        .choose(rng)
}

/// The columns & rows in which food may be placed
fn inset(board: Board) -> Option<(std::ops::RangeInclusive<u16>, std::ops::RangeInclusive<u16>)> {
    let max_x = board.width().checked_sub(2)?;
    let max_y = board.height().checked_sub(2)?;
    (max_x >= 1 && max_y >= 1).then_some((1..=max_x, 1..=max_y))
}
