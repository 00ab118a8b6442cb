//! The outer search over I/O task counts and division counts.
use super::{
    find_eliminable_blocks, match_io_layout, ExtentError, Partitioner, SymmetricPartitioner,
};
use crate::mask::CellGrid;
use crate::prelude::*;
use crate::types::{BlockId, IoLayout, Layout, SearchConfig};
use landmask_core::util::ratio_within;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SearchError {
    #[error(
        "couldn't auto-eliminate any land blocks for {npes} tasks; \
         try to increase the number of tasks"
    )]
    InfeasibleDecomposition { npes: usize },

    #[error(
        "land blocks can be eliminated for {npes} tasks, but no layout is compatible with \
         {target_io_pes} or fewer I/O tasks"
    )]
    IncompatibleIoLayout { npes: usize, target_io_pes: usize },

    #[error(
        "{npes} tasks cover all {cells} cells of the grid, there is nothing left to eliminate"
    )]
    TooManyTasks { npes: usize, cells: usize },

    #[error(transparent)]
    Extent(#[from] ExtentError),
}

/// Bookkeeping of a single search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchState {
    /// First division count found for which enough blocks could be eliminated, `0` if none.
    pub max_feasible_p: usize,
    pub found_feasible_layout: bool,
    /// Eliminable blocks of the last evaluated layout.
    pub num_masked_blocks: usize,
}

/// Accepted layout together with its eliminable blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    pub layout: Layout,
    pub io_layout: IoLayout,
    /// Number of I/O tasks `io_layout` was chosen for.
    pub io_pes: usize,
    pub npes: usize,
    /// Every eliminable block of `layout`, `i`-major.
    pub eliminable: Vec<BlockId>,
    pub state: SearchState,
}

impl Decomposition {
    /// Number of blocks that must be dropped so that exactly `npes` tasks remain.
    pub fn num_masked(&self) -> usize {
        self.layout.count() - self.npes
    }

    /// The blocks to drop: the first [`num_masked`](Self::num_masked) eliminable blocks.
    pub fn masked_blocks(&self) -> &[BlockId] {
        &self.eliminable[..self.num_masked()]
    }
}

/// Returns `true` while division count `p` is still close enough to the first feasible count to
/// keep searching at the current I/O task count, i.e. `p > max_feasible_p * (1 - pfrac)`.
/// Always `true` as long as nothing feasible has been found (`max_feasible_p == 0`).
pub fn is_within_tolerance(p: usize, max_feasible_p: usize, pfrac: f64) -> bool {
    p as f64 > max_feasible_p as f64 * (1.0 - pfrac)
}

/// Searches for the largest division count whose land blocks can be eliminated to reach a
/// target number of tasks, while keeping a compatible I/O decomposition.
pub struct DecompositionSearch<'a> {
    grid: &'a CellGrid,
    config: SearchConfig,
    partitioner: &'a dyn Partitioner,
}

impl<'a> DecompositionSearch<'a> {
    pub fn new(grid: &'a CellGrid, config: SearchConfig) -> Self {
        Self::with_partitioner(grid, config, &SymmetricPartitioner)
    }

    pub fn with_partitioner(
        grid: &'a CellGrid,
        config: SearchConfig,
        partitioner: &'a dyn Partitioner,
    ) -> Self {
        Self {
            grid,
            config,
            partitioner,
        }
    }

    /// Division count to start from before anything feasible is known: the count at which
    /// `npes` tasks would be left if exactly the land fraction of blocks could be dropped. It
    /// never exceeds the number of cells, which also covers grids without any active cell.
    pub fn initial_upper_bound(&self, npes: usize) -> usize {
        let cells = self.grid.shape().volume();
        let fraction = self.grid.active_fraction();

        if fraction > 0.0 {
            min((npes as f64 / fraction).ceil() as usize, cells)
        } else {
            cells
        }
    }

    /// Run the search for `npes` compute tasks and at most `target_io_pes` I/O tasks.
    ///
    /// The I/O task count is lowered from `target_io_pes` towards `1`. For each I/O count the
    /// division count `p` is lowered from an upper bound towards `npes + 1`. A division count is
    /// feasible if its layout has more than `npes` blocks and eliminating blocks leaves at most
    /// `npes` of them; the first feasible count becomes the upper bound for all following I/O
    /// counts. A feasible layout is accepted if the I/O count divides its number of blocks and
    /// the resulting I/O layout has a sane aspect ratio. Once `p`
    /// drops more than the tolerance below the first feasible count, the next I/O count is
    /// tried.
    pub fn run(&self, npes: usize, target_io_pes: usize) -> Result<Decomposition, SearchError> {
        let shape = self.grid.shape();
        let limit = self.config.aspect_limit;
        let mut state = SearchState::default();
        let mut accepted = None;

        if npes >= shape.volume() {
            return Err(SearchError::TooManyTasks {
                npes,
                cells: shape.volume(),
            });
        }

        'io: for io_pes in (1..=target_io_pes).rev() {
            let p_up = if state.max_feasible_p == 0 {
                self.initial_upper_bound(npes)
            } else {
                state.max_feasible_p
            };

            debug!(
                "trying {} I/O tasks with division counts {} down to {}",
                io_pes,
                p_up,
                npes + 1
            );

            for p in ((npes + 1)..=p_up).rev() {
                let layout = self.partitioner.propose_layout(shape, p);

                if !layout.fits(shape) {
                    trace!("ndivs: {}, layout {} exceeds grid {}", p, layout, shape);
                    continue;
                }

                if !ratio_within(layout.block_aspect_ratio(shape), limit) {
                    trace!("ndivs: {}, layout {} has an extreme aspect ratio", p, layout);
                    continue;
                }

                let masked = find_eliminable_blocks(self.grid, layout, self.partitioner)?;
                state.num_masked_blocks = masked.len();

                // the partitioner may return a layout whose count differs from `p`
                let count = layout.count();
                if count > npes && count - masked.len() <= npes {
                    info!(
                        "ndivs: {}, masked blocks: {}, layout: {}",
                        p,
                        masked.len(),
                        layout
                    );

                    if state.max_feasible_p == 0 {
                        info!("first feasible layout at {} divisions", p);
                        state.max_feasible_p = p;
                    }

                    if count % io_pes == 0 {
                        let io_layout = match_io_layout(layout, io_pes);

                        if !io_layout.tiles(layout)
                            || !ratio_within(io_layout.group_aspect_ratio(layout), limit)
                        {
                            debug!("rejecting I/O layout {} for {}", io_layout, layout);
                            continue;
                        }

                        info!("IO layout: {}", io_layout);
                        state.found_feasible_layout = true;
                        accepted = Some((layout, io_layout, io_pes));
                        break 'io;
                    }
                }

                if !is_within_tolerance(p, state.max_feasible_p, self.config.tolerance) {
                    break;
                }
            }
        }

        let (layout, io_layout, io_pes) = match accepted {
            Some(v) => v,
            None if state.max_feasible_p == 0 => {
                return Err(SearchError::InfeasibleDecomposition { npes })
            }
            None => {
                return Err(SearchError::IncompatibleIoLayout {
                    npes,
                    target_io_pes,
                })
            }
        };

        info!("found the optimum layout for auto-masking: {}", layout);

        let eliminable = find_eliminable_blocks(self.grid, layout, self.partitioner)?;
        state.num_masked_blocks = eliminable.len();

        Ok(Decomposition {
            layout,
            io_layout,
            io_pes,
            npes,
            eliminable,
            state,
        })
    }
}
