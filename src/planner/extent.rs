//! Splitting a single axis into contiguous partitions.
use crate::prelude::*;
use landmask_core::util::{div_ceil, is_even};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtentError {
    #[error("cannot split an axis into zero partitions")]
    ZeroDivisions,

    #[error("cannot split an empty axis")]
    EmptyAxis,

    #[error("partition {index} of {divisions} over {length} cells is empty")]
    EmptyPartition {
        index: usize,
        divisions: usize,
        length: usize,
    },

    #[error("{divisions} partitions do not cover all {length} cells")]
    Incomplete { divisions: usize, length: usize },
}

/// One-based inclusive `begin..=end` index ranges of the partitions of an axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extents {
    pub begin: Vec<usize>,
    pub end: Vec<usize>,
}

impl Extents {
    pub fn len(&self) -> usize {
        self.begin.len()
    }

    pub fn is_empty(&self) -> bool {
        self.begin.is_empty()
    }

    /// Iterates over the `(begin, end)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        zip(self.begin.iter().copied(), self.end.iter().copied())
    }

    /// Number of cells in each partition.
    pub fn sizes(&self) -> Vec<usize> {
        self.iter().map(|(b, e)| e + 1 - b).collect()
    }
}

/// Split the `length` cells starting at index `start` into `divisions` contiguous partitions.
///
/// Partitions in the lower half are sized by dividing the remaining cells over the remaining
/// partitions, rounding up. Whenever the cell count and the partition count allow it, the upper
/// half mirrors the lower half so that the decomposition is symmetric around the midpoint (e.g.
/// 10 cells over 4 partitions gives `3,2,2,3` rather than `3,3,2,2`). An odd cell count cannot be
/// split symmetrically over an even number of partitions, in which case the upper half keeps
/// dividing the remainder.
pub fn compute_extent(
    start: usize,
    length: usize,
    divisions: usize,
) -> Result<Extents, ExtentError> {
    if divisions == 0 {
        return Err(ExtentError::ZeroDivisions);
    }

    if length == 0 {
        return Err(ExtentError::EmptyAxis);
    }

    let isg = start as isize;
    let ieg = (start + length - 1) as isize;
    let ndivs = divisions;

    let symmetrize = (is_even(ndivs) && is_even(length))
        || (!is_even(ndivs) && !is_even(length))
        || (!is_even(ndivs) && is_even(length) && 2 * ndivs < length);

    // partitions sized from the remaining cells, rounding up
    let next_end = |is: isize, imax: isize, remaining_divs: usize| -> isize {
        let cells = imax - is + 1;
        if cells <= 0 {
            is - 1
        } else {
            is + div_ceil(cells as usize, remaining_divs) as isize - 1
        }
    };

    let mut begin = vec![0isize; ndivs];
    let mut end = vec![0isize; ndivs];
    let mut is = isg;
    let mut imax = ieg;
    let mut ndmax = ndivs;

    for ndiv in 0..ndivs {
        let ie;

        if ndiv < (ndivs - 1) / 2 + 1 {
            ie = next_end(is, imax, ndmax - ndiv);

            let mirror = ndivs - 1 - ndiv;
            if mirror > ndiv && symmetrize {
                // the max() keeps the mirrored partition from overlapping this one
                begin[mirror] = max(isg + ieg - ie, ie + 1);
                end[mirror] = max(isg + ieg - is, ie + 1);
                imax = begin[mirror] - 1;
                ndmax -= 1;
            }
        } else if symmetrize {
            is = begin[ndiv];
            ie = end[ndiv];
        } else {
            ie = next_end(is, imax, ndmax - ndiv);
        }

        if ie < is {
            return Err(ExtentError::EmptyPartition {
                index: ndiv,
                divisions,
                length,
            });
        }

        begin[ndiv] = is;
        end[ndiv] = ie;
        is = ie + 1;
    }

    if end[ndivs - 1] != ieg {
        return Err(ExtentError::Incomplete { divisions, length });
    }

    Ok(Extents {
        begin: begin.into_iter().map(|v| v as usize).collect(),
        end: end.into_iter().map(|v| v as usize).collect(),
    })
}

#[cfg(test)]
mod test {
    use super::*;

    fn sizes(length: usize, divisions: usize) -> Vec<usize> {
        compute_extent(1, length, divisions).unwrap().sizes()
    }

    #[test]
    fn test_even_split() {
        let extents = compute_extent(1, 12, 3).unwrap();
        assert_eq!(extents.begin, vec![1, 5, 9]);
        assert_eq!(extents.end, vec![4, 8, 12]);
        assert_eq!(extents.len(), 3);
    }

    #[test]
    fn test_symmetric() {
        assert_eq!(sizes(10, 4), vec![3, 2, 2, 3]);
        assert_eq!(sizes(18, 4), vec![5, 4, 4, 5]);
        assert_eq!(sizes(8, 3), vec![3, 2, 3]);
        assert_eq!(sizes(9, 5), vec![2, 2, 1, 2, 2]);
    }

    #[test]
    fn test_odd_cells_even_divisions() {
        // cannot be symmetric, keeps dividing the remainder
        assert_eq!(sizes(9, 2), vec![5, 4]);
        assert_eq!(sizes(11, 4), vec![3, 3, 3, 2]);
    }

    #[test]
    fn test_single_cell_partitions() {
        assert_eq!(sizes(10, 10), vec![1; 10]);
        assert_eq!(sizes(7, 1), vec![7]);
    }

    #[test]
    fn test_offset_start() {
        let extents = compute_extent(5, 4, 2).unwrap();
        assert_eq!(extents.iter().collect::<Vec<_>>(), vec![(5, 6), (7, 8)]);
    }

    #[test]
    fn test_partitions_cover_axis() {
        for length in 1..40 {
            for divisions in 1..=length {
                let extents = match compute_extent(1, length, divisions) {
                    Ok(e) => e,
                    Err(_) => continue,
                };

                assert_eq!(extents.begin[0], 1);
                assert_eq!(extents.end[divisions - 1], length);
                for i in 1..divisions {
                    assert_eq!(extents.begin[i], extents.end[i - 1] + 1);
                }
            }
        }
    }

    #[test]
    fn test_errors() {
        assert_eq!(compute_extent(1, 5, 0), Err(ExtentError::ZeroDivisions));
        assert_eq!(compute_extent(1, 0, 3), Err(ExtentError::EmptyAxis));
        assert!(matches!(
            compute_extent(1, 3, 5),
            Err(ExtentError::EmptyPartition { .. })
        ));
    }
}
