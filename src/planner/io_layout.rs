use crate::prelude::*;
use crate::types::{IoLayout, Layout};
use landmask_core::util::divisors;

/// Find the decomposition of `nio` I/O tasks over `layout`.
///
/// Every factor pair `(f, nio / f)` is considered in increasing order of `f`. Only pairs that
/// split the compute layout into equal groups of blocks qualify, and among those the pair whose
/// ratio is closest to the ratio of `layout` wins. Ties go to the smallest `f`.
///
/// If no pair qualifies, `(1, nio)` is returned. Callers must check [`IoLayout::tiles`] and the
/// resulting aspect ratio themselves.
pub fn match_io_layout(layout: Layout, nio: usize) -> IoLayout {
    let target = layout.ratio();
    let mut best = IoLayout::new(1, nio);
    let mut best_diff = f64::INFINITY;

    for f in divisors(nio) {
        let candidate = IoLayout::new(f, nio / f);

        if !candidate.tiles(layout) {
            continue;
        }

        let diff = (candidate.ratio() - target).abs();
        if diff < best_diff {
            best = candidate;
            best_diff = diff;
        }
    }

    trace!("I/O layout for {} tasks over {}: {}", nio, layout, best);
    best
}
