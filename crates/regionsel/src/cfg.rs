//! Numeric defaults (internal).
//!
//! Policy
//! - Fixed constants; per-invocation behavior lives in `SelectCfg`, not here.

/// Clip-space `w` at or below which a point counts as behind the eye
/// (perspective views only).
pub(crate) const BEHIND_EYE_W_EPS: f32 = 1e-5;

/// Face candidates from touching edges: use edge→face adjacency when
/// `faces / touching_edges` exceeds this ratio, otherwise scan face loops.
/// Only affects speed; both strategies return the same set.
pub(crate) const FACE_LOOKUP_ADJACENCY_RATIO: f32 = 4.5;
