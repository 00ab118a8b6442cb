//! Proposing a two-dimensional layout for a given division count.
use crate::types::{Dim2, Layout};

/// Factor `ndivs` into a [`Layout`] whose blocks are as close to square as possible over a grid
/// of `shape`.
///
/// The ideal number of partitions along `x` is `sqrt(ndivs * nx / ny)`, rounded to the nearest
/// integer. It is then lowered until it divides `ndivs`, which terminates at `1` at the latest.
///
/// # Panics
/// Panics if `ndivs` is zero or `shape` is empty.
pub fn propose_layout(shape: Dim2, ndivs: usize) -> Layout {
    assert!(ndivs > 0, "division count must be positive");
    assert!(!shape.is_empty(), "cannot decompose an empty grid");

    let ideal = ((ndivs * shape.x) as f64 / shape.y as f64).sqrt().round() as usize;
    let mut idiv = ideal.max(1);

    while ndivs % idiv != 0 {
        idiv -= 1;
    }

    Layout::new(idiv, ndivs / idiv)
}
