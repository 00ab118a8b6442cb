//! Running the whole pipeline: topography in, mask table out.
mod table;

use std::path::{Path, PathBuf};

use crate::mask::{build_cell_grid, load_topography};
use crate::planner::{Decomposition, DecompositionSearch};
use crate::prelude::*;
use crate::types::Config;

pub use self::table::{MaskTable, TableError, DEFAULT_TABLE_NAME};

/// Result of a successful [`generate_mask_table`] run.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub decomposition: Decomposition,
    pub table: MaskTable,
    /// Location the table was written to.
    pub path: PathBuf,
}

/// Read the topography at `input`, search for a decomposition according to `config` and write
/// the mask table as `file_name` into `output_dir`.
///
/// Nothing is written if the search fails.
pub fn generate_mask_table(
    input: &Path,
    config: &Config,
    output_dir: &Path,
    file_name: &str,
) -> Result<Outcome> {
    config.validate()?;

    let topography = load_topography(input, config.convention)
        .with_context(|| format!("while reading topography {:?}", input))?;

    let grid = build_cell_grid(
        topography.cells.view(),
        config.search.halo,
        config.boundary,
    )
    .context("while building the cell grid")?;

    info!(
        "grid {} with halo {}, {:.1}% active cells",
        grid.shape(),
        grid.halo(),
        100.0 * grid.active_fraction()
    );

    let decomposition = DecompositionSearch::new(&grid, config.search)
        .run(config.npes, config.target_io_pes)
        .with_context(|| {
            format!(
                "while searching a decomposition of {} for {} tasks",
                grid.shape(),
                config.npes
            )
        })?;

    let table = MaskTable::new(
        decomposition.layout,
        config.npes,
        &decomposition.eliminable,
    )?;

    let path = output_dir.join(file_name);
    table.save(&path)?;

    Ok(Outcome {
        decomposition,
        table,
        path,
    })
}
