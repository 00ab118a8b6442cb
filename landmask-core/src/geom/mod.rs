//! Two-dimensional index geometry for padded cell grids.
//!
//! All coordinates are zero-based and ordered `(x, y)`, where `x` runs along the columns of a
//! grid and `y` along its rows. Arrays stored in row-major order are therefore indexed as
//! `[y, x]`, see [`Point2::to_row_major`].
mod point;
mod rect;

pub use point::{Dim2, Point2};
pub use rect::Rect2;
