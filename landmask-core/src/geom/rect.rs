use super::point::{Dim2, Point2};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::ops::Range;

/// Axis aligned window over a two-dimensional grid.
///
/// The window is defined by a lower bound `lo` (inclusive) and an upper bound `hi` (exclusive)
/// along each axis, so an empty window has the lower bound equal to the upper bound along some
/// axis.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Rect2 {
    pub lo: Point2,
    pub hi: Point2,
}

impl Rect2 {
    /// Returns a window having lower bounds `offset` and upper bounds `offset + extents`.
    #[inline(always)]
    pub fn new(offset: Point2, extents: Dim2) -> Self {
        Self::from_bounds(offset, offset + extents)
    }

    /// Returns a window having lower bounds `lo` and upper bounds `hi`.
    ///
    /// # Panics
    /// Panics if `lo` lies past `hi` along any axis.
    pub fn from_bounds(lo: Point2, hi: Point2) -> Self {
        assert!(lo.x <= hi.x && lo.y <= hi.y, "invalid bounds {:?}..{:?}", lo, hi);
        Self { lo, hi }
    }

    /// The size along each axis.
    #[inline(always)]
    pub fn extents(self) -> Dim2 {
        self.hi - self.lo
    }

    /// Column range covered by this window.
    #[inline(always)]
    pub fn x_range(self) -> Range<usize> {
        self.lo.x..self.hi.x
    }

    /// Row range covered by this window.
    #[inline(always)]
    pub fn y_range(self) -> Range<usize> {
        self.lo.y..self.hi.y
    }

    /// Returns true if this window contains no cells.
    #[inline(always)]
    pub fn is_empty(self) -> bool {
        self.lo.x == self.hi.x || self.lo.y == self.hi.y
    }

    /// Returns the cells shared by both windows, or `None` if they do not overlap.
    pub fn intersection(self, other: Rect2) -> Option<Rect2> {
        let lo = self.lo.element_max(other.lo);
        let hi = self.hi.element_min(other.hi);

        if lo.x < hi.x && lo.y < hi.y {
            Some(Rect2 { lo, hi })
        } else {
            None
        }
    }
}

impl From<(Range<usize>, Range<usize>)> for Rect2 {
    /// Build a window from a column range and a row range.
    fn from((x, y): (Range<usize>, Range<usize>)) -> Self {
        Rect2::from_bounds(Point2::new(x.start, y.start), Point2::new(x.end, y.end))
    }
}

impl From<Dim2> for Rect2 {
    fn from(extents: Dim2) -> Self {
        Rect2::new(Point2::zeros(), extents)
    }
}

impl Debug for Rect2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Rect2")
            .field(&self.x_range())
            .field(&self.y_range())
            .finish()
    }
}
