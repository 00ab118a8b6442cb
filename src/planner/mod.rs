//! Planning a land-block eliminating decomposition.

pub mod eliminate;
pub mod extent;
pub mod io_layout;
pub mod layout;
pub mod search;

use crate::types::{Dim2, Layout};

#[doc(inline)]
pub use eliminate::{find_eliminable_blocks, test_window};
#[doc(inline)]
pub use extent::{compute_extent, ExtentError, Extents};
#[doc(inline)]
pub use io_layout::match_io_layout;
#[doc(inline)]
pub use layout::propose_layout;
#[doc(inline)]
pub use search::{is_within_tolerance, Decomposition, DecompositionSearch, SearchError, SearchState};

/// Decides how a grid is cut into blocks: which layout to try for a division count, and where
/// the partition boundaries fall along each axis.
pub trait Partitioner {
    fn propose_layout(&self, shape: Dim2, ndivs: usize) -> Layout;

    fn compute_extent(
        &self,
        start: usize,
        length: usize,
        divisions: usize,
    ) -> Result<Extents, ExtentError>;
}

/// The [`Partitioner`] of the ocean model: nearly square blocks and mirror-symmetric extents.
#[derive(Debug, Copy, Clone, Default)]
pub struct SymmetricPartitioner;

impl Partitioner for SymmetricPartitioner {
    fn propose_layout(&self, shape: Dim2, ndivs: usize) -> Layout {
        layout::propose_layout(shape, ndivs)
    }

    fn compute_extent(
        &self,
        start: usize,
        length: usize,
        divisions: usize,
    ) -> Result<Extents, ExtentError> {
        extent::compute_extent(start, length, divisions)
    }
}
