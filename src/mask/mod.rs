//! Cell activity grids: loading the raw field and building the halo-padded grid tested by the
//! planner.
mod builder;
mod input;

use ndarray::{s, Array2, ArrayView2};

use crate::types::{Dim2, Rect2};

pub use self::builder::{build_cell_grid, MaskError};
pub use self::input::{load_topography, parse_topography, InputError, Topography};

/// State of a single grid cell.
///
/// `Active` cells (ocean) must be covered by some task, so a block whose test window contains an
/// `Active` cell cannot be eliminated.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Activity {
    Inactive,
    Active,
}

impl Default for Activity {
    fn default() -> Self {
        Activity::Inactive
    }
}

impl Activity {
    #[inline(always)]
    pub fn is_active(self) -> bool {
        self == Activity::Active
    }
}

/// Halo-padded grid of [`Activity`] values.
///
/// The grid stores `(ny + 2*jbuf)` rows of `(nx + 2*ibuf)` cells, where `(nx, ny)` is the
/// [interior shape](CellGrid::shape) and `(ibuf, jbuf)` the [halo widths](CellGrid::halo).
/// The interior occupies rows `jbuf..jbuf+ny` and columns `ibuf..ibuf+nx`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CellGrid {
    cells: Array2<Activity>,
    shape: Dim2,
    halo: Dim2,
}

impl CellGrid {
    pub(crate) fn from_parts(cells: Array2<Activity>, shape: Dim2, halo: Dim2) -> Self {
        debug_assert_eq!(cells.dim(), {
            let [rows, cols] = shape.padded(halo).to_row_major();
            (rows, cols)
        });

        Self { cells, shape, halo }
    }

    /// Number of interior cells along each axis.
    pub fn shape(&self) -> Dim2 {
        self.shape
    }

    pub fn halo(&self) -> Dim2 {
        self.halo
    }

    pub fn padded_shape(&self) -> Dim2 {
        self.shape.padded(self.halo)
    }

    /// Row-major view of all padded cells.
    pub fn cells(&self) -> ArrayView2<'_, Activity> {
        self.cells.view()
    }

    /// Window of the padded grid covered by the interior.
    pub fn interior(&self) -> Rect2 {
        Rect2::new(self.halo.to_point(), self.shape)
    }

    /// Returns `true` if any cell inside `window` is active. The window is clipped to the padded
    /// grid.
    pub fn any_active(&self, window: Rect2) -> bool {
        let window = match Rect2::from(self.padded_shape()).intersection(window) {
            Some(w) => w,
            None => return false,
        };

        self.cells
            .slice(s![window.y_range(), window.x_range()])
            .iter()
            .any(|c| c.is_active())
    }

    /// Fraction of interior cells which are active.
    pub fn active_fraction(&self) -> f64 {
        let interior = self.interior();
        let active = self
            .cells
            .slice(s![interior.y_range(), interior.x_range()])
            .iter()
            .filter(|c| c.is_active())
            .count();

        active as f64 / self.shape.volume() as f64
    }
}

#[cfg(test)]
impl CellGrid {
    /// The cell at `p`, in padded coordinates.
    pub(crate) fn get(&self, p: crate::types::Point2) -> Activity {
        self.cells[p.to_row_major()]
    }
}
