//! Coordinates, grid kinds and aggregation modes.

use std::fmt;
use std::str::FromStr;

/// Integer address of one cell (triangle or square) of the infinite grid.
///
/// Ordered by `x`, then `y`, which is also the iteration order of [`super::Grid`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    pub x: i64,
    pub y: i64,
}

impl Coord {
    #[inline]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Cell where an unfolded strip begins: row 1 when the strip starts flipped.
    #[inline]
    pub const fn start(flipped: bool) -> Self {
        Self::new(0, if flipped { 1 } else { 0 })
    }

    /// Triangle orientation: `(y odd) XOR (x odd)`.
    ///
    /// Parity is taken on the two's-complement low bit, so `-1` counts as odd.
    #[inline]
    pub const fn is_upside_down(self) -> bool {
        ((self.x & 1) == 1) != ((self.y & 1) == 1)
    }

    #[inline]
    pub const fn offset(self, dx: i64, dy: i64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(i64, i64)> for Coord {
    fn from((x, y): (i64, i64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Which tiling the strip is folded onto.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GridKind {
    #[default]
    Triangle,
    Square,
}

impl GridKind {
    pub const fn name(self) -> &'static str {
        match self {
            GridKind::Triangle => "triangle",
            GridKind::Square => "square",
        }
    }
}

impl fmt::Display for GridKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GridKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "triangle" | "tri" => Ok(GridKind::Triangle),
            "square" | "sq" => Ok(GridKind::Square),
            other => Err(format!("unknown grid kind `{other}` (expected triangle|square)")),
        }
    }
}

/// How scores aggregate over the bit-strings landing on a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Fewest folds among all landing bit-strings.
    #[default]
    Min,
    /// Number of landing bit-strings.
    Count,
}

impl Mode {
    pub const fn name(self) -> &'static str {
        match self {
            Mode::Min => "min",
            Mode::Count => "count",
        }
    }

    /// Score a freshly added cell starts from, given the folds of its first visitor.
    #[inline]
    pub const fn seed_score(self, folds: u32) -> u32 {
        match self {
            Mode::Min => folds,
            Mode::Count => 0,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "min" => Ok(Mode::Min),
            "count" => Ok(Mode::Count),
            other => Err(format!("unknown mode `{other}` (expected min|count)")),
        }
    }
}

/// Axis-aligned extent of the populated cells, inclusive on both ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: i64,
    pub min_y: i64,
    pub max_x: i64,
    pub max_y: i64,
}

impl Bounds {
    /// Inverted box reported for a grid without cells.
    pub const EMPTY: Bounds = Bounds {
        min_x: 1,
        min_y: 1,
        max_x: 0,
        max_y: 0,
    };

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    #[inline]
    pub fn as_tuple(&self) -> (i64, i64, i64, i64) {
        (self.min_x, self.min_y, self.max_x, self.max_y)
    }

    pub(crate) fn include(&mut self, c: Coord) {
        if self.is_empty() {
            *self = Bounds {
                min_x: c.x,
                min_y: c.y,
                max_x: c.x,
                max_y: c.y,
            };
            return;
        }
        self.min_x = self.min_x.min(c.x);
        self.min_y = self.min_y.min(c.y);
        self.max_x = self.max_x.max(c.x);
        self.max_y = self.max_y.max(c.y);
    }
}
