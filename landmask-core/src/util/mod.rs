//! Collection of integer helpers shared by the planner.

/// Divide `x` by `y` and round up towards infinity. For example, `21/5 =  4.2` thus
/// `div_ceil(21,5) == 5`.
///
/// # Panics
/// Panics if `y == 0`.
#[inline]
pub fn div_ceil(x: usize, y: usize) -> usize {
    let (q, r) = (x / y, x % y);
    if r != 0 {
        q + 1
    } else {
        q
    }
}

#[inline]
pub fn is_even(x: usize) -> bool {
    x % 2 == 0
}

/// Returns all divisors of `n` in increasing order. Returns an empty list for `n == 0`.
pub fn divisors(n: usize) -> Vec<usize> {
    (1..=n).filter(|f| n % f == 0).collect()
}

/// Returns `true` if `ratio` lies within `[1/limit, limit]`.
#[inline]
pub fn ratio_within(ratio: f64, limit: f64) -> bool {
    !(ratio * limit < 1.0 || limit < ratio)
}
