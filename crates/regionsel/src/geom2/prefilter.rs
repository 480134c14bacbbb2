//! Bounding-box prefilter in front of the exact predicates.
//!
//! `prefiltered_test` only evaluates `exact` on inputs accepted by `coarse` and
//! reports `false` for the rest. The coarse test must be conservative
//! (`exact(x) ⇒ coarse(x)`), so the result equals running `exact` on all inputs.

use super::types::{Bounds2, Point2, Segment2};

/// Run `exact` on the subset of `inputs` that passes `coarse`; others are `false`.
pub fn prefiltered_test<T, C, E>(inputs: &[T], coarse: C, exact: E) -> Vec<bool>
where
    C: Fn(&T) -> bool,
    E: Fn(&T) -> bool,
{
    let candidates: Vec<usize> = (0..inputs.len()).filter(|&i| coarse(&inputs[i])).collect();
    let mut mask = vec![false; inputs.len()];
    for i in candidates {
        mask[i] = exact(&inputs[i]);
    }
    mask
}

/// Same as `prefiltered_test` over an index subset of `inputs`; entries outside
/// `subset` stay `false`.
pub fn prefiltered_subset<T, C, E>(inputs: &[T], subset: &[bool], coarse: C, exact: E) -> Vec<bool>
where
    C: Fn(&T) -> bool,
    E: Fn(&T) -> bool,
{
    debug_assert_eq!(inputs.len(), subset.len());
    let mut mask = vec![false; inputs.len()];
    for (i, x) in inputs.iter().enumerate() {
        if subset[i] && coarse(x) {
            mask[i] = exact(x);
        }
    }
    mask
}

/// Coarse point test: inside the closed bounds.
#[inline]
pub fn point_in_bounds(b: &Bounds2) -> impl Fn(&Point2) -> bool + '_ {
    move |p| b.contains(*p)
}

/// Coarse segment test: not both endpoints beyond the same side of the bounds.
#[inline]
pub fn segment_near_bounds(b: &Bounds2) -> impl Fn(&Segment2) -> bool + '_ {
    move |s| b.may_touch_segment(*s)
}
