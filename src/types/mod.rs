//! Common types used throughout the mask table generator.
mod config;

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

pub use self::config::*;
pub use landmask_core::{Dim2, Point2, Rect2};

/// Number of partitions along each axis of the grid. `idiv` counts partitions along `x`
/// (columns) and `jdiv` along `y` (rows).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub struct Layout {
    pub idiv: usize,
    pub jdiv: usize,
}

impl Layout {
    pub const fn new(idiv: usize, jdiv: usize) -> Self {
        Self { idiv, jdiv }
    }

    /// The division count `p = idiv * jdiv`.
    pub fn count(self) -> usize {
        self.idiv * self.jdiv
    }

    /// Ratio `idiv / jdiv` of the partition counts.
    pub fn ratio(self) -> f64 {
        self.idiv as f64 / self.jdiv as f64
    }

    /// Width over height of a single block when this layout is applied to a grid of `shape`.
    pub fn block_aspect_ratio(self, shape: Dim2) -> f64 {
        (shape.x as f64 / self.idiv as f64) / (shape.y as f64 / self.jdiv as f64)
    }

    /// Returns `true` if every block of this layout over `shape` covers at least one cell.
    pub fn fits(self, shape: Dim2) -> bool {
        self.idiv >= 1 && self.jdiv >= 1 && self.idiv <= shape.x && self.jdiv <= shape.y
    }

    pub fn contains(self, block: BlockId) -> bool {
        (1..=self.idiv).contains(&block.i) && (1..=self.jdiv).contains(&block.j)
    }

    /// All blocks of this layout, `i`-major and `j`-minor.
    pub fn blocks(self) -> impl Iterator<Item = BlockId> {
        let jdiv = self.jdiv;
        (1..=self.idiv).flat_map(move |i| (1..=jdiv).map(move |j| BlockId::new(i, j)))
    }
}

impl Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.idiv, self.jdiv)
    }
}

/// Decomposition of the I/O tasks over a compute [`Layout`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub struct IoLayout {
    pub idiv: usize,
    pub jdiv: usize,
}

impl IoLayout {
    pub const fn new(idiv: usize, jdiv: usize) -> Self {
        Self { idiv, jdiv }
    }

    pub fn count(self) -> usize {
        self.idiv * self.jdiv
    }

    pub fn ratio(self) -> f64 {
        self.idiv as f64 / self.jdiv as f64
    }

    /// Returns `true` if this I/O layout splits `layout` into equally sized groups of blocks.
    pub fn tiles(self, layout: Layout) -> bool {
        layout.idiv % self.idiv == 0 && layout.jdiv % self.jdiv == 0
    }

    /// Width over height, counted in compute blocks, of the group of blocks handled by one
    /// I/O task.
    pub fn group_aspect_ratio(self, layout: Layout) -> f64 {
        (layout.idiv as f64 / self.idiv as f64) / (layout.jdiv as f64 / self.jdiv as f64)
    }
}

impl Display for IoLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.idiv, self.jdiv)
    }
}

/// One-based coordinates of a block within a [`Layout`].
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Debug)]
pub struct BlockId {
    pub i: usize,
    pub j: usize,
}

impl BlockId {
    pub const fn new(i: usize, j: usize) -> Self {
        Self { i, j }
    }
}

impl Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.i, self.j)
    }
}
