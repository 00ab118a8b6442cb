use ndarray::{s, Array2, ArrayView2};

use super::{Activity, CellGrid};
use crate::prelude::*;
use crate::types::{BoundaryConfig, Dim2};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MaskError {
    #[error("topography grid is empty")]
    EmptyGrid,

    #[error("periodic {axis} axis has {len} cells, which is fewer than its halo width {halo}")]
    PeriodicAxisTooNarrow { axis: char, len: usize, halo: usize },
}

/// Embed `raw` (`ny` rows of `nx` cells) into a halo-padded [`CellGrid`] and fill the halos
/// according to `boundary`.
///
/// Halos start out inactive. Periodic `x` halos are filled first, then periodic `y` halos
/// (copying whole padded rows, so the corners wrap as well). A tripolar fold then overwrites
/// the northern halo rows with the northernmost interior rows mirrored along both axes, and
/// finally marks the northernmost interior row, which lies on the fold seam, as fully active.
/// Blocks touching the seam can thus never be eliminated: their partners across the fold would
/// otherwise be left without valid halo metrics.
pub fn build_cell_grid(
    raw: ArrayView2<'_, Activity>,
    halo: Dim2,
    boundary: BoundaryConfig,
) -> Result<CellGrid, MaskError> {
    let (ny, nx) = raw.dim();
    let (ibuf, jbuf) = (halo.x, halo.y);

    if nx == 0 || ny == 0 {
        return Err(MaskError::EmptyGrid);
    }

    if boundary.reentrant_x && nx < ibuf {
        return Err(MaskError::PeriodicAxisTooNarrow {
            axis: 'x',
            len: nx,
            halo: ibuf,
        });
    }

    if (boundary.reentrant_y || boundary.tripolar_n) && ny < jbuf {
        return Err(MaskError::PeriodicAxisTooNarrow {
            axis: 'y',
            len: ny,
            halo: jbuf,
        });
    }

    let mut cells = Array2::from_elem((ny + 2 * jbuf, nx + 2 * ibuf), Activity::Inactive);
    cells
        .slice_mut(s![jbuf..jbuf + ny, ibuf..ibuf + nx])
        .assign(&raw);

    if boundary.reentrant_x {
        let east = cells.slice(s![.., nx..nx + ibuf]).to_owned();
        cells.slice_mut(s![.., ..ibuf]).assign(&east);

        let west = cells.slice(s![.., ibuf..2 * ibuf]).to_owned();
        cells.slice_mut(s![.., ibuf + nx..]).assign(&west);
    }

    if boundary.reentrant_y {
        let north = cells.slice(s![ny..ny + jbuf, ..]).to_owned();
        cells.slice_mut(s![..jbuf, ..]).assign(&north);

        let south = cells.slice(s![jbuf..2 * jbuf, ..]).to_owned();
        cells.slice_mut(s![jbuf + ny.., ..]).assign(&south);
    }

    if boundary.tripolar_n {
        for j in 0..jbuf {
            let mirrored = cells.slice(s![jbuf + ny - 1 - j, ..;-1]).to_owned();
            cells.row_mut(jbuf + ny + j).assign(&mirrored);
        }

        cells.row_mut(jbuf + ny - 1).fill(Activity::Active);
    }

    Ok(CellGrid::from_parts(cells, Dim2::new(nx, ny), halo))
}
