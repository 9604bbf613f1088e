use super::board::Position;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum Direction {
    /// The snake has not been told to move yet
    #[default]
    Stationary,
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Axis {
    Horizontal,
    Vertical,
}

impl Direction {
    /// The unit displacement for one step in this direction
    pub(crate) fn vector(self) -> Position {
        match self {
            Direction::Stationary => Position::new(0, 0),
            Direction::Up => Position::new(0, -1),
            Direction::Down => Position::new(0, 1),
            Direction::Left => Position::new(-1, 0),
            Direction::Right => Position::new(1, 0),
        }
    }

    pub(crate) fn axis(self) -> Option<Axis> {
        match self {
            Direction::Stationary => None,
            Direction::Up | Direction::Down => Some(Axis::Vertical),
            Direction::Left | Direction::Right => Some(Axis::Horizontal),
        }
    }

    pub(crate) fn is_moving(self) -> bool {
        self != Direction::Stationary
    }

    /// Whether a snake travelling in this direction may turn to `new`.  Only
    /// perpendicular turns are allowed; a stationary snake may start moving
    /// along either axis.
    pub(crate) fn accepts(self, new: Direction) -> bool {
        match (self.axis(), new.axis()) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(current), Some(requested)) => current != requested,
        }
    }

    /// Return the position one cell of `cell_size` units away from `pos` in
    /// this direction
    pub(crate) fn step(self, pos: Position, cell_size: u16) -> Position {
        let Position { x, y } = self.vector();
        let size = i32::from(cell_size);
        pos + Position::new(x * size, y * size)
    }
}
