use ndarray::Array2;
use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use super::Activity;
use crate::prelude::*;
use crate::types::{Dim2, MaskConvention};

#[derive(Error, Debug)]
pub enum InputError {
    #[error("failed to read topography: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse topography: {0}")]
    Json(#[from] serde_json::Error),

    #[error("topography contains neither a `mask` nor a `wet` field")]
    MissingField,

    #[error("field `{0}` is empty")]
    Empty(&'static str),

    #[error("field `{field}` row {row} has {len} values, expected {expected}")]
    Ragged {
        field: &'static str,
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("field `{field}` has value {value} at row {row}, column {col}; expected 0 or 1")]
    InvalidValue {
        field: &'static str,
        row: usize,
        col: usize,
        value: f64,
    },
}

#[derive(Deserialize, Debug)]
struct TopographyDocument {
    #[serde(default)]
    mask: Option<Vec<Vec<f64>>>,
    #[serde(default)]
    wet: Option<Vec<Vec<f64>>>,
}

/// Activity field read from a topography file, `ny` rows of `nx` cells.
#[derive(Debug, Clone)]
pub struct Topography {
    /// Name of the field the activity was read from (`mask` or `wet`).
    pub field: &'static str,
    pub cells: Array2<Activity>,
}

impl Topography {
    /// Number of cells along each axis.
    pub fn shape(&self) -> Dim2 {
        let (ny, nx) = self.cells.dim();
        Dim2::new(nx, ny)
    }
}

/// Read a topography JSON document from `path`, see [`parse_topography`].
pub fn load_topography(
    path: impl AsRef<Path>,
    convention: MaskConvention,
) -> Result<Topography, InputError> {
    let path = path.as_ref();
    debug!("reading topography from {:?}", path);

    let file = File::open(path)?;
    parse_topography(BufReader::new(file), convention)
}

/// Parse a JSON document holding a two-dimensional `mask` or `wet` field (`mask` wins when both
/// are present). Raw values are mapped to [`Activity`] through `convention`.
pub fn parse_topography(
    reader: impl Read,
    convention: MaskConvention,
) -> Result<Topography, InputError> {
    let doc: TopographyDocument = serde_json::from_reader(reader)?;

    let (field, rows) = match (doc.mask, doc.wet) {
        (Some(rows), _) => ("mask", rows),
        (None, Some(rows)) => ("wet", rows),
        (None, None) => return Err(InputError::MissingField),
    };

    let cells = convert_rows(field, &rows, convention)?;
    info!(
        "read field `{}` with {} rows of {} cells",
        field,
        cells.nrows(),
        cells.ncols()
    );

    Ok(Topography { field, cells })
}

fn convert_rows(
    field: &'static str,
    rows: &[Vec<f64>],
    convention: MaskConvention,
) -> Result<Array2<Activity>, InputError> {
    let ny = rows.len();
    let nx = rows.first().map_or(0, |r| r.len());

    if nx == 0 {
        return Err(InputError::Empty(field));
    }

    let mut cells = Vec::with_capacity(nx * ny);

    for (row, values) in enumerate(rows) {
        if values.len() != nx {
            return Err(InputError::Ragged {
                field,
                row,
                len: values.len(),
                expected: nx,
            });
        }

        for (col, &value) in enumerate(values) {
            let activity = convention
                .classify(value)
                .ok_or(InputError::InvalidValue {
                    field,
                    row,
                    col,
                    value,
                })?;

            cells.push(activity);
        }
    }

    // Lengths were checked above.
    Ok(Array2::from_shape_vec((ny, nx), cells).expect("row lengths are uniform"))
}
