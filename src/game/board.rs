use std::ops::Add;

/// A point on the board, measured in board units.  Positions occupied by the
/// game are always whole multiples of the board's cell size.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) struct Position {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Position {
    pub(crate) const ORIGIN: Position = Position { x: 0, y: 0 };

    pub(crate) const fn new(x: i32, y: i32) -> Position {
        Position { x, y }
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position {
            x: self.x.saturating_add(rhs.x),
            y: self.y.saturating_add(rhs.y),
        }
    }
}

/// The play field: a grid of `width` × `height` square cells, each
/// `cell_size` units on a side, with the origin cell in the top-left corner
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Board {
    width: u16,
    height: u16,
    cell_size: u16,
}

impl Board {
    pub(crate) fn new(width: u16, height: u16, cell_size: u16) -> Board {
        Board {
            width,
            height,
            cell_size: cell_size.max(1),
        }
    }

    /// Fit as many whole cells as possible into an area of the given
    /// dimensions (in board units)
    pub(crate) fn fit(available_width: u32, available_height: u32, cell_size: u16) -> Board {
        let cell_size = cell_size.max(1);
        let cells = |span: u32| u16::try_from(span / u32::from(cell_size)).unwrap_or(u16::MAX);
        Board::new(cells(available_width), cells(available_height), cell_size)
    }

    pub(crate) fn width(self) -> u16 {
        self.width
    }

    pub(crate) fn height(self) -> u16 {
        self.height
    }

    pub(crate) fn cell_size(self) -> u16 {
        self.cell_size
    }

    /// The position of the top-left corner of the cell in column `x` and row
    /// `y`
    pub(crate) fn position_of(self, x: u16, y: u16) -> Position {
        Position::new(self.scale(i64::from(x)), self.scale(i64::from(y)))
    }

    /// The column & row of the cell at `pos`, or `None` if `pos` is off the
    /// board
    pub(crate) fn cell_of(self, pos: Position) -> Option<(u16, u16)> {
        if self.is_out_of_bounds(pos) {
            return None;
        }
        let size = i32::from(self.cell_size);
        let x = u16::try_from(pos.x / size).ok()?;
        let y = u16::try_from(pos.y / size).ok()?;
        Some((x, y))
    }

    /// Test whether `pos` lies outside of the playing field
    pub(crate) fn is_out_of_bounds(self, pos: Position) -> bool {
        pos.x < 0 || pos.x > self.max_x() || pos.y < 0 || pos.y > self.max_y()
    }

    fn max_x(self) -> i32 {
        self.scale(i64::from(self.width) - 1)
    }

    fn max_y(self) -> i32 {
        self.scale(i64::from(self.height) - 1)
    }

    /// Convert a count of cells to board units, saturating at the limits of
    /// `i32`
    fn scale(self, cells: i64) -> i32 {
        let units = cells.saturating_mul(i64::from(self.cell_size));
        i32::try_from(units).unwrap_or(if units < 0 { i32::MIN } else { i32::MAX })
    }
}

/// Test whether moving the head of `body` to `candidate` would run the snake
/// into itself.  `body` is the snake as it is before the move, head first;
/// the current head is not considered.
pub(crate) fn is_self_collision<'a, I>(body: I, candidate: Position) -> bool
where
    I: IntoIterator<Item = &'a Position>,
{
    body.into_iter().skip(1).any(|&p| p == candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const BOARD: Board = Board {
        width: 10,
        height: 15,
        cell_size: 20,
    };

    #[rstest]
    #[case(Position::new(0, 0), false)]
    #[case(Position::new(180, 0), false)]
    #[case(Position::new(0, 280), false)]
    #[case(Position::new(180, 280), false)]
    #[case(Position::new(-20, 0), true)]
    #[case(Position::new(0, -20), true)]
    #[case(Position::new(200, 0), true)]
    #[case(Position::new(0, 300), true)]
    #[case(Position::new(181, 100), true)]
    fn out_of_bounds(#[case] pos: Position, #[case] oob: bool) {
        assert_eq!(BOARD.is_out_of_bounds(pos), oob);
    }

    #[test]
    fn fit_floors_to_whole_cells() {
        let board = Board::fit(399, 241, 20);
        assert_eq!(board.width(), 19);
        assert_eq!(board.height(), 12);
        assert_eq!(board.cell_size(), 20);
    }

    #[test]
    fn fit_zero_cell_size() {
        let board = Board::fit(30, 40, 0);
        assert_eq!((board.width(), board.height(), board.cell_size()), (30, 40, 1));
    }

    #[rstest]
    #[case(Position::new(40, 60), Some((2, 3)))]
    #[case(Position::new(0, 0), Some((0, 0)))]
    #[case(Position::new(-20, 60), None)]
    #[case(Position::new(200, 60), None)]
    fn cell_of(#[case] pos: Position, #[case] cell: Option<(u16, u16)>) {
        assert_eq!(BOARD.cell_of(pos), cell);
    }

    #[test]
    fn oversized_board_saturates() {
        let board = Board::fit(u32::MAX, 100, u16::MAX);
        assert_eq!(board.width(), u16::MAX);
        assert_eq!(board.height(), 0);
        assert!(board.is_out_of_bounds(Position::ORIGIN));
        assert_eq!(board.cell_of(Position::ORIGIN), None);

        let board = Board::new(u16::MAX, u16::MAX, u16::MAX);
        assert!(!board.is_out_of_bounds(Position::ORIGIN));
        assert!(!board.is_out_of_bounds(Position::new(i32::MAX, i32::MAX)));
        assert_eq!(
            board.position_of(u16::MAX, 1),
            Position::new(i32::MAX, i32::from(u16::MAX))
        );
    }

    #[test]
    fn position_of() {
        assert_eq!(BOARD.position_of(3, 7), Position::new(60, 140));
    }

    #[test]
    fn self_collision_ignores_head() {
        let body = [Position::new(20, 0), Position::new(0, 0)];
        assert!(!is_self_collision(&body, Position::new(20, 0)));
        assert!(is_self_collision(&body, Position::new(0, 0)));
        assert!(!is_self_collision(&body, Position::new(40, 0)));
    }

    #[test]
    fn self_collision_with_tail() {
        let body = [
            Position::new(20, 20),
            Position::new(20, 0),
            Position::new(0, 0),
            Position::new(0, 20),
        ];
        assert!(is_self_collision(&body, Position::new(0, 20)));
    }
}
