//! Element masks and the selection-mode combinator.
//!
//! A mask is a dense `[bool]` parallel to one element array (vertices, edges or
//! faces). `SelectionMode::combine` folds a freshly computed "inside" mask into
//! the current selection without touching either input.

use serde::{Deserialize, Serialize};

/// How a new "inside" mask is folded into the existing selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    #[default]
    Set,
    Add,
    Subtract,
    Xor,
    Intersect,
}

impl SelectionMode {
    #[inline]
    pub fn combine_one(self, current: bool, inside: bool) -> bool {
        match self {
            SelectionMode::Set => inside,
            SelectionMode::Add => current || inside,
            SelectionMode::Subtract => current && !inside,
            SelectionMode::Xor => current ^ inside,
            SelectionMode::Intersect => current && inside,
        }
    }

    /// New selection mask; inputs must have equal length.
    pub fn combine(self, current: &[bool], inside: &[bool]) -> Vec<bool> {
        debug_assert_eq!(current.len(), inside.len(), "mask length mismatch");
        current
            .iter()
            .zip(inside)
            .map(|(&c, &i)| self.combine_one(c, i))
            .collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionMode::Set => "set",
            SelectionMode::Add => "add",
            SelectionMode::Subtract => "subtract",
            SelectionMode::Xor => "xor",
            SelectionMode::Intersect => "intersect",
        }
    }
}

#[inline]
pub fn count(mask: &[bool]) -> usize {
    mask.iter().filter(|&&b| b).count()
}

#[inline]
pub fn any(mask: &[bool]) -> bool {
    mask.iter().any(|&b| b)
}

#[inline]
pub fn and(a: &[bool], b: &[bool]) -> Vec<bool> {
    a.iter().zip(b).map(|(&x, &y)| x && y).collect()
}

#[inline]
pub fn or(a: &[bool], b: &[bool]) -> Vec<bool> {
    a.iter().zip(b).map(|(&x, &y)| x || y).collect()
}

#[inline]
pub fn and_not(a: &[bool], b: &[bool]) -> Vec<bool> {
    a.iter().zip(b).map(|(&x, &y)| x && !y).collect()
}

#[inline]
pub fn not(a: &[bool]) -> Vec<bool> {
    a.iter().map(|&x| !x).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: bool = true;
    const F: bool = false;

    #[test]
    fn four_vertex_table() {
        let current = [T, F, F, T];
        let inside = [F, T, F, T];
        assert_eq!(SelectionMode::Add.combine(&current, &inside), vec![T, T, F, T]);
        assert_eq!(SelectionMode::Subtract.combine(&current, &inside), vec![T, F, F, F]);
        assert_eq!(SelectionMode::Xor.combine(&current, &inside), vec![T, T, F, F]);
        assert_eq!(SelectionMode::Intersect.combine(&current, &inside), vec![F, F, F, T]);
        assert_eq!(SelectionMode::Set.combine(&current, &inside), vec![F, T, F, T]);
    }

    #[test]
    fn empty_masks() {
        assert!(SelectionMode::Add.combine(&[], &[]).is_empty());
        assert_eq!(count(&[]), 0);
        assert!(!any(&[]));
    }

    #[test]
    fn helpers() {
        let a = [T, T, F, F];
        let b = [T, F, T, F];
        assert_eq!(and(&a, &b), vec![T, F, F, F]);
        assert_eq!(or(&a, &b), vec![T, T, T, F]);
        assert_eq!(and_not(&a, &b), vec![F, T, F, F]);
        assert_eq!(not(&a), vec![F, F, T, T]);
        assert_eq!(count(&a), 2);
    }
}
