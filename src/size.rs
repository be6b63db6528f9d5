//! Terminal geometry.

use std::fmt::{self, Display, Formatter};

/// Size of the terminal in _rows_ and _columns_.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Size {
    pub rows: u32,
    pub cols: u32,
}

impl Size {
    pub const fn new(rows: u32, cols: u32) -> Size {
        Size { rows, cols }
    }
}

impl Display for Size {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// A `0`-based screen position, used when placing the terminal cursor.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Point {
    pub row: u32,
    pub col: u32,
}

impl Point {
    pub const fn new(row: u32, col: u32) -> Point {
        Point { row, col }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_display() {
        assert_eq!(Size::new(24, 80).to_string(), "24x80");
    }
}
