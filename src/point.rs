use crate::snake::Facing;

/// A cell on the board. `x` grows to the right, `y` grows downwards.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    pub fn step(self, facing: Facing) -> Self {
        let (dx, dy) = facing.delta();
        Point { x: self.x + dx, y: self.y + dy }
    }

    /// Brings a point that left the board by one cell back in from the opposite edge.
    pub fn wrapped(self, width: i32, height: i32) -> Self {
        let x = if self.x < 0 {
            width - 1
        } else if self.x >= width {
            0
        } else {
            self.x
        };

        let y = if self.y < 0 {
            height - 1
        } else if self.y >= height {
            0
        } else {
            self.y
        };

        Point { x, y }
    }

    pub fn is_within(self, width: i32, height: i32) -> bool {
        self.x >= 0 && self.x < width && self.y >= 0 && self.y < height
    }
}
