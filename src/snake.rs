use crate::point::Point;
use Facing::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Facing {
    North,
    East,
    South,
    West,
}

impl Facing {
    pub fn delta(self) -> (i32, i32) {
        match self {
            North => (0, -1),
            East => (1, 0),
            South => (0, 1),
            West => (-1, 0),
        }
    }

    pub fn is_opposite(self, other: Facing) -> bool {
        matches!(
            (self, other),
            (North, South) | (South, North) | (East, West) | (West, East)
        )
    }

    pub fn head_char(self) -> char {
        match self {
            North => '^',
            East => '>',
            South => 'v',
            West => '<',
        }
    }
}

/// The snake's body, head first. Never empty.
pub struct Snake {
    segments: Vec<Point>,
    facing: Facing,
}

impl Snake {
    pub fn new(head: Point, facing: Facing) -> Self {
        Snake { segments: vec![head], facing }
    }

    pub fn segments(&self) -> &[Point] {
        &self.segments
    }

    pub fn head(&self) -> Point {
        self.segments[0]
    }

    pub fn tail(&self) -> Point {
        self.segments[self.segments.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// Turns the snake unless that would send the head straight back into its neck.
    /// Returns whether the facing was accepted.
    pub fn set_facing(&mut self, new_facing: Facing) -> bool {
        if self.facing.is_opposite(new_facing) {
            return false;
        }

        self.facing = new_facing;
        true
    }

    /// Every segment takes its parent's old cell, then the head moves one cell.
    /// The new head is returned unwrapped.
    pub fn advance(&mut self) -> Point {
        for i in (1..self.segments.len()).rev() {
            self.segments[i] = self.segments[i - 1];
        }

        self.segments[0] = self.segments[0].step(self.facing);
        self.segments[0]
    }

    /// Stacks `count` segments on the tail. They spread out over the next moves.
    pub fn grow(&mut self, count: usize) {
        let tail = self.tail();
        self.segments.extend(std::iter::repeat(tail).take(count));
    }

    pub fn wrap_head(&mut self, width: i32, height: i32) {
        self.segments[0] = self.segments[0].wrapped(width, height);
    }

    /// Whether any segment other than the head sits on `pos`.
    pub fn body_contains(&self, pos: Point) -> bool {
        self.segments[1..].contains(&pos)
    }

    pub fn contains(&self, pos: Point) -> bool {
        self.segments.contains(&pos)
    }
}
