use super::board::Position;
use std::collections::VecDeque;

/// The snake's body as a run of occupied positions.
///
/// The body is stored head first; the last element is the tail.  A snake is
/// never empty.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Create a one-segment snake at `head`
    pub(crate) fn new(head: Position) -> Snake {
        Snake {
            body: VecDeque::from([head]),
        }
    }

    pub(crate) fn head(&self) -> Position {
        self.body.front().copied().unwrap_or(Position::ORIGIN)
    }

    pub(crate) fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub(crate) fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Move the head to `pos`, keeping the rest of the body in place
    pub(crate) fn push_head(&mut self, pos: Position) {
        self.body.push_front(pos);
    }

    /// Drop the last segment, unless it is the only one left
    pub(crate) fn pop_tail(&mut self) {
        if self.body.len() > 1 {
            let _ = self.body.pop_back();
        }
    }

    /// Lengthen the snake by `n` segments stacked on its current tail.  They
    /// unfold one at a time as the snake moves on.
    pub(crate) fn extend_tail(&mut self, n: usize) {
        if let Some(&tail) = self.body.back() {
            self.body.extend(std::iter::repeat_n(tail, n));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_snake() {
        let snake = Snake::new(Position::ORIGIN);
        assert_eq!(snake.body().len(), 1);
        assert_eq!(snake.head(), Position::ORIGIN);
    }

    #[test]
    fn move_and_grow() {
        let mut snake = Snake::new(Position::new(20, 0));
        snake.push_head(Position::new(40, 0));
        snake.extend_tail(2);
        assert_eq!(
            snake.body(),
            &VecDeque::from([
                Position::new(40, 0),
                Position::new(20, 0),
                Position::new(20, 0),
                Position::new(20, 0),
            ])
        );
        snake.push_head(Position::new(60, 0));
        snake.pop_tail();
        assert_eq!(snake.body().len(), 4);
        assert_eq!(snake.head(), Position::new(60, 0));
    }

    #[test]
    fn pop_keeps_last_segment() {
        let mut snake = Snake::new(Position::ORIGIN);
        snake.pop_tail();
        assert_eq!(snake.body().len(), 1);
    }
}
