//! Grid cells, color modes and RGB colors.

use std::fmt;

/// A grid coordinate. `x` is the column, `y` is the row.
///
/// Cells are plain values: two cells are equal when their coordinates are
/// equal. A `Cell` is not tied to any particular [`Grid`](crate::Grid);
/// bounds are checked by whoever consumes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Cell {
    /// Create a cell at column `x`, row `y`.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell displaced by `(dx, dy)`. Wrapping arithmetic: an overflowed
    /// coordinate lands far outside any grid and is filtered by bounds checks.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.wrapping_add(dx),
            y: self.y.wrapping_add(dy),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// An opaque 24-bit color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Pure black, the color of an unpainted pixel.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as an `[r, g, b]` array.
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// The palette a colony paints with.
///
/// The cell intensity drives the lit channels; the rest stay at zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorMode {
    /// `(v, 0, 0)`.
    Red,
    /// `(0, v, 0)`.
    Green,
    /// `(0, 0, v)`.
    Blue,
    /// `(v, v, 0)`.
    Yellow,
}

impl ColorMode {
    /// Every color mode, in declaration order.
    pub const ALL: [ColorMode; 4] = [
        ColorMode::Red,
        ColorMode::Green,
        ColorMode::Blue,
        ColorMode::Yellow,
    ];

    /// The color painted for a cell of intensity `v`.
    pub const fn paint(self, v: u8) -> Rgb {
        match self {
            Self::Red => Rgb::new(v, 0, 0),
            Self::Green => Rgb::new(0, v, 0),
            Self::Blue => Rgb::new(0, 0, v),
            Self::Yellow => Rgb::new(v, v, 0),
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Yellow => "yellow",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_table() {
        assert_eq!(ColorMode::Red.paint(200), Rgb::new(200, 0, 0));
        assert_eq!(ColorMode::Green.paint(200), Rgb::new(0, 200, 0));
        assert_eq!(ColorMode::Blue.paint(200), Rgb::new(0, 0, 200));
        assert_eq!(ColorMode::Yellow.paint(200), Rgb::new(200, 200, 0));
    }

    #[test]
    fn paint_zero_is_black() {
        for mode in ColorMode::ALL {
            assert_eq!(mode.paint(0), Rgb::BLACK);
        }
    }

    #[test]
    fn offset_overflow_wraps_instead_of_panicking() {
        let c = Cell::new(i32::MAX, 0).offset(1, -1);
        assert_eq!(c, Cell::new(i32::MIN, -1));
    }

    #[test]
    fn display_formats() {
        assert_eq!(Cell::new(3, -4).to_string(), "(3, -4)");
        assert_eq!(ColorMode::Yellow.to_string(), "yellow");
    }
}
