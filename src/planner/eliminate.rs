//! Classifying the blocks of a layout as eliminable or not.
use super::{ExtentError, Partitioner};
use crate::mask::CellGrid;
use crate::types::{BlockId, Dim2, Layout, Rect2};

/// Window of the padded grid that must be free of active cells for a block to be eliminated.
///
/// `x` and `y` are the one-based inclusive interior extents of the block. In padded coordinates
/// the interior of the block starts at `begin - 1 + halo`, so the window extends the block by
/// the full halo width on both sides of each axis: a block may only be dropped if every cell it
/// would exchange halos with is inactive as well.
pub fn test_window(x: (usize, usize), y: (usize, usize), halo: Dim2) -> Rect2 {
    let (ib, ie) = x;
    let (jb, je) = y;

    Rect2::from((ib - 1..ie + 2 * halo.x, jb - 1..je + 2 * halo.y))
}

/// Returns the blocks of `layout` whose [test window](test_window) contains no active cell,
/// ordered `i`-major and `j`-minor.
pub fn find_eliminable_blocks(
    grid: &CellGrid,
    layout: Layout,
    partitioner: &dyn Partitioner,
) -> Result<Vec<BlockId>, ExtentError> {
    let shape = grid.shape();
    let halo = grid.halo();

    let xs = partitioner.compute_extent(1, shape.x, layout.idiv)?;
    let ys = partitioner.compute_extent(1, shape.y, layout.jdiv)?;

    let mut blocks = vec![];

    for (i, x) in xs.iter().enumerate() {
        for (j, y) in ys.iter().enumerate() {
            if !grid.any_active(test_window(x, y, halo)) {
                blocks.push(BlockId::new(i + 1, j + 1));
            }
        }
    }

    Ok(blocks)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mask::{build_cell_grid, Activity};
    use crate::planner::SymmetricPartitioner;
    use crate::prelude::default;
    use crate::types::BoundaryConfig;
    use ndarray::Array2;

    fn grid_with(
        nx: usize,
        ny: usize,
        halo: usize,
        boundary: BoundaryConfig,
        active: impl Fn(usize, usize) -> bool,
    ) -> CellGrid {
        let raw = Array2::from_shape_fn((ny, nx), |(y, x)| {
            if active(x, y) {
                Activity::Active
            } else {
                Activity::Inactive
            }
        });

        build_cell_grid(raw.view(), Dim2::repeat(halo), boundary).unwrap()
    }

    fn eliminable(grid: &CellGrid, idiv: usize, jdiv: usize) -> Vec<BlockId> {
        find_eliminable_blocks(grid, Layout::new(idiv, jdiv), &SymmetricPartitioner).unwrap()
    }

    #[test]
    fn test_window_bounds() {
        let window = test_window((1, 4), (3, 5), Dim2::new(2, 1));
        assert_eq!(window, Rect2::from((0..8, 2..7)));
        assert_eq!(window.extents(), Dim2::new(4 + 4, 3 + 2));
    }

    #[test]
    fn test_inactive_grid_eliminates_everything() {
        let grid = grid_with(12, 10, 2, BoundaryConfig::default(), |_, _| false);

        for &(idiv, jdiv) in &[(1, 1), (3, 2), (4, 5), (12, 10)] {
            let blocks = eliminable(&grid, idiv, jdiv);
            assert_eq!(blocks.len(), idiv * jdiv);
            assert_eq!(blocks, Layout::new(idiv, jdiv).blocks().collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_active_grid_eliminates_nothing() {
        let grid = grid_with(12, 10, 2, BoundaryConfig::default(), |_, _| true);

        for &(idiv, jdiv) in &[(1, 1), (3, 2), (4, 5), (12, 10)] {
            assert!(eliminable(&grid, idiv, jdiv).is_empty());
        }
    }

    #[test]
    fn test_halo_blocks_neighbours() {
        // ocean only in columns 6 and 7 of an 8x4 grid
        let grid = grid_with(8, 4, 1, BoundaryConfig::default(), |x, _| x >= 6);

        // x extents are 1-2, 3-4, 5-6, 7-8. The window of the second block reaches interior
        // column 5 (zero-based 4) which is still land.
        assert_eq!(
            eliminable(&grid, 4, 2),
            vec![
                BlockId::new(1, 1),
                BlockId::new(1, 2),
                BlockId::new(2, 1),
                BlockId::new(2, 2)
            ]
        );

        // x extents 1-4, 5-8: the first window reaches zero-based column 4, still land
        assert_eq!(eliminable(&grid, 2, 1), vec![BlockId::new(1, 1)]);

        // a wider halo makes the first block touch the ocean
        let wide = grid_with(8, 4, 3, BoundaryConfig::default(), |x, _| x >= 6);
        assert!(eliminable(&wide, 2, 1).is_empty());
    }

    #[test]
    fn test_reentrant_x_wraps_ocean_into_halo() {
        // ocean only in the easternmost column
        let closed = grid_with(8, 4, 1, BoundaryConfig::default(), |x, _| x == 7);
        assert_eq!(
            eliminable(&closed, 4, 1),
            vec![BlockId::new(1, 1), BlockId::new(2, 1), BlockId::new(3, 1)]
        );

        let periodic = BoundaryConfig {
            reentrant_x: true,
            ..default()
        };
        let wrapped = grid_with(8, 4, 1, periodic, |x, _| x == 7);
        assert_eq!(
            eliminable(&wrapped, 4, 1),
            vec![BlockId::new(2, 1), BlockId::new(3, 1)]
        );
    }

    #[test]
    fn test_tripolar_seam_is_never_eliminated() {
        let tripolar = BoundaryConfig {
            tripolar_n: true,
            ..default()
        };
        let grid = grid_with(8, 8, 2, tripolar, |_, _| false);

        // jdiv = 4 gives rows 1-2, 3-4, 5-6, 7-8; the seam is interior row 8 which lies in the
        // window of the two northernmost block rows.
        let blocks = eliminable(&grid, 2, 4);
        assert_eq!(blocks.len(), 4);
        assert!(blocks.iter().all(|b| b.j <= 2));
    }
}
