use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::grid::Position;
use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Unit step as `(dx, dy)`, with `y` growing downwards.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

/// The snake's segments, stored in a fixed ring of `capacity` slots.
///
/// `head` and `tail` are logical cursors that only ever move forward; the
/// physical slot of logical index `i` is `i & mask`. Both cursors advance with
/// wrapping arithmetic, which keeps the masking exact because the capacity is
/// a power of two and therefore divides the counter's range.
#[derive(Debug, Clone)]
pub struct Body {
    slots: Box<[Position]>,
    mask: usize,
    head: usize,
    tail: usize,
    direction: Direction,
}

impl Body {
    /// Seeds the ring with `initial`, ordered tail first, in the lowest slots.
    pub fn new(capacity: usize, initial: &[Position], direction: Direction) -> Result<Self, SimError> {
        if !capacity.is_power_of_two() {
            return Err(SimError::CapacityNotPowerOfTwo(capacity));
        }
        if initial.is_empty() {
            return Err(SimError::EmptyBody);
        }
        if initial.len() > capacity {
            return Err(SimError::BodyExceedsCapacity { len: initial.len(), capacity });
        }

        let mut slots = vec![Position::default(); capacity].into_boxed_slice();
        slots[..initial.len()].copy_from_slice(initial);

        Ok(Body {
            slots,
            mask: capacity - 1,
            head: initial.len() - 1,
            tail: 0,
            direction,
        })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn length(&self) -> usize {
        self.head.wrapping_sub(self.tail).wrapping_add(1)
    }

    pub fn head_cursor(&self) -> usize {
        self.head
    }

    pub fn tail_cursor(&self) -> usize {
        self.tail
    }

    pub fn head_position(&self) -> Position {
        self.slots[self.head & self.mask]
    }

    pub fn tail_position(&self) -> Position {
        self.slots[self.tail & self.mask]
    }

    pub fn push_head(&mut self, pos: Position) -> Result<(), SimError> {
        if self.length() == self.capacity() {
            return Err(SimError::RingOverflow { capacity: self.capacity() });
        }

        let next = self.head.wrapping_add(1);
        self.slots[next & self.mask] = pos;
        self.head = next;
        Ok(())
    }

    /// Removes the tail segment and returns the cell it vacated. Every pop is
    /// paired with a push in the same tick, so a single-segment body may pop
    /// first and push right after.
    pub fn pop_tail(&mut self) -> Position {
        let old_tail = self.slots[self.tail & self.mask];
        self.tail = self.tail.wrapping_add(1);
        old_tail
    }

    /// Segments from tail to head.
    pub fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.length()).map(move |i| self.slots[self.tail.wrapping_add(i) & self.mask])
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.segments().any(|segment| segment == pos)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Adopts `intent` unless it would reverse the snake onto itself.
    /// Returns whether the direction was accepted.
    pub fn steer(&mut self, intent: Direction) -> bool {
        if intent.is_opposite(self.direction) {
            return false;
        }
        self.direction = intent;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(xs: std::ops::Range<usize>, y: usize) -> Vec<Position> {
        xs.map(|x| Position::new(x, y)).collect()
    }

    #[test]
    fn test_new_body_seeds_lowest_slots() {
        let body = Body::new(16, &row(2..6, 4), Right).unwrap();
        assert_eq!(body.tail_cursor(), 0);
        assert_eq!(body.head_cursor(), 3);
        assert_eq!(body.length(), 4);
        assert_eq!(body.tail_position(), Position::new(2, 4));
        assert_eq!(body.head_position(), Position::new(5, 4));
    }

    #[test]
    fn test_new_body_validation() {
        assert_eq!(
            Body::new(12, &row(0..2, 0), Right).unwrap_err(),
            SimError::CapacityNotPowerOfTwo(12)
        );
        assert_eq!(Body::new(8, &[], Right).unwrap_err(), SimError::EmptyBody);
        assert_eq!(
            Body::new(4, &row(0..5, 0), Right).unwrap_err(),
            SimError::BodyExceedsCapacity { len: 5, capacity: 4 }
        );
    }

    #[test]
    fn test_push_and_pop_keep_length() {
        let mut body = Body::new(8, &row(0..3, 0), Right).unwrap();
        body.push_head(Position::new(3, 0)).unwrap();
        assert_eq!(body.pop_tail(), Position::new(0, 0));
        assert_eq!(body.length(), 3);
        assert_eq!(body.head_position(), Position::new(3, 0));
        assert_eq!(body.tail_position(), Position::new(1, 0));
    }

    #[test]
    fn test_push_without_pop_grows() {
        let mut body = Body::new(8, &row(0..3, 0), Right).unwrap();
        body.push_head(Position::new(3, 0)).unwrap();
        assert_eq!(body.length(), 4);
        assert_eq!(body.tail_position(), Position::new(0, 0));
    }

    #[test]
    fn test_ring_wraps_past_capacity() {
        let mut body = Body::new(4, &row(0..2, 0), Right).unwrap();
        for x in 2..11 {
            body.push_head(Position::new(x, 0)).unwrap();
            assert_eq!(body.pop_tail(), Position::new(x - 2, 0));
        }
        assert_eq!(body.head_cursor(), 10);
        assert_eq!(body.tail_cursor(), 9);
        assert_eq!(body.segments().collect::<Vec<_>>(), row(9..11, 0));
    }

    #[test]
    fn test_cursors_survive_counter_wraparound() {
        let mut body = Body::new(4, &row(0..2, 0), Right).unwrap();
        body.head = usize::MAX;
        body.tail = usize::MAX - 1;
        body.slots[body.tail & body.mask] = Position::new(0, 0);
        body.slots[body.head & body.mask] = Position::new(1, 0);

        body.push_head(Position::new(2, 0)).unwrap();
        assert_eq!(body.head_cursor(), 0);
        assert_eq!(body.length(), 3);
        assert_eq!(body.pop_tail(), Position::new(0, 0));
        assert_eq!(body.segments().collect::<Vec<_>>(), row(1..3, 0));
    }

    #[test]
    fn test_push_into_full_ring_overflows() {
        let mut body = Body::new(4, &row(0..4, 0), Right).unwrap();
        assert_eq!(
            body.push_head(Position::new(4, 0)),
            Err(SimError::RingOverflow { capacity: 4 })
        );
        assert_eq!(body.head_position(), Position::new(3, 0));
    }

    #[test]
    fn test_steer_rejects_reversal() {
        let mut body = Body::new(8, &row(0..3, 0), Right).unwrap();
        assert!(!body.steer(Left));
        assert_eq!(body.direction(), Right);
        assert!(body.steer(Right));
        assert!(body.steer(Up));
        assert_eq!(body.direction(), Up);
        assert!(!body.steer(Down));
        assert_eq!(body.direction(), Up);
    }

    #[test]
    fn test_contains() {
        let body = Body::new(8, &row(0..3, 0), Right).unwrap();
        assert!(body.contains(Position::new(1, 0)));
        assert!(!body.contains(Position::new(3, 0)));
    }
}
