use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display};
use std::ops::{Add, Sub};

/// Index of a single cell in a two-dimensional grid.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: usize,
    pub y: usize,
}

impl Point2 {
    #[inline(always)]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns the point `[0, 0]`
    #[inline(always)]
    pub const fn zeros() -> Self {
        Self::new(0, 0)
    }

    /// Returns the `[row, column]` index used by row-major arrays.
    #[inline(always)]
    pub fn to_row_major(self) -> [usize; 2] {
        [self.y, self.x]
    }

    pub fn element_min(self, rhs: Self) -> Self {
        Self::new(self.x.min(rhs.x), self.y.min(rhs.y))
    }

    pub fn element_max(self, rhs: Self) -> Self {
        Self::new(self.x.max(rhs.x), self.y.max(rhs.y))
    }
}

impl Add<Dim2> for Point2 {
    type Output = Point2;

    #[inline(always)]
    fn add(self, rhs: Dim2) -> Point2 {
        Point2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub<Point2> for Point2 {
    type Output = Dim2;

    /// Distance between two points.
    ///
    /// # Panics
    /// Panics (in debug builds) if `rhs` lies past `self` along any axis.
    #[inline(always)]
    fn sub(self, rhs: Point2) -> Dim2 {
        Dim2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Debug for Point2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

/// Size of a region along each axis (width, height).
///
/// The difference with [`Point2`] is that a [`Dim2`] represents the extent of some region
/// rather than a location within it. It is used both for grid shapes and for halo widths.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Dim2 {
    pub x: usize,
    pub y: usize,
}

impl Dim2 {
    #[inline(always)]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns the extent `[v, v]`
    #[inline(always)]
    pub const fn repeat(v: usize) -> Self {
        Self::new(v, v)
    }

    /// Number of cells covered by this extent (width x height).
    #[inline(always)]
    pub fn volume(self) -> usize {
        self.x * self.y
    }

    /// Returns true if this extent covers no cells.
    #[inline(always)]
    pub fn is_empty(self) -> bool {
        self.x == 0 || self.y == 0
    }

    /// Returns the extent grown by `halo` on both sides of each axis.
    #[inline(always)]
    pub fn padded(self, halo: Dim2) -> Self {
        Self::new(self.x + 2 * halo.x, self.y + 2 * halo.y)
    }

    /// Returns the `[rows, columns]` shape used by row-major arrays.
    #[inline(always)]
    pub fn to_row_major(self) -> [usize; 2] {
        [self.y, self.x]
    }

    #[inline(always)]
    pub fn to_point(self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

impl Debug for Dim2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.x, self.y)
    }
}

impl Display for Dim2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(self, f)
    }
}
