//! Policy and result types for mesh region selection.

use serde::{Deserialize, Serialize};

/// Which element types the host currently selects (any combination).
///
/// Fields missing from serialized input are `false`; `Default` is vertex mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementModes {
    #[serde(default)]
    pub vertex: bool,
    #[serde(default)]
    pub edge: bool,
    #[serde(default)]
    pub face: bool,
}

impl Default for ElementModes {
    fn default() -> Self {
        Self {
            vertex: true,
            edge: false,
            face: false,
        }
    }
}

impl ElementModes {
    pub const VERTEX: Self = Self {
        vertex: true,
        edge: false,
        face: false,
    };
    pub const EDGE: Self = Self {
        vertex: false,
        edge: true,
        face: false,
    };
    pub const FACE: Self = Self {
        vertex: false,
        edge: false,
        face: true,
    };
}

/// Per-invocation selection policy. No field is read from global state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectCfg {
    pub modes: ElementModes,
    /// Select edges that merely touch the region instead of requiring both
    /// vertices inside.
    pub select_all_edges: bool,
    /// Select faces touched by the region instead of testing face centers.
    pub select_all_faces: bool,
    /// Keep elements facing away from the viewer eligible.
    pub select_backfacing: bool,
}

impl SelectCfg {
    pub fn vertices() -> Self {
        Self {
            modes: ElementModes::VERTEX,
            ..Default::default()
        }
    }
    pub fn edges() -> Self {
        Self {
            modes: ElementModes::EDGE,
            ..Default::default()
        }
    }
    pub fn faces() -> Self {
        Self {
            modes: ElementModes::FACE,
            ..Default::default()
        }
    }

    #[inline]
    pub(crate) fn needs_vertex_pass(&self) -> bool {
        self.modes.vertex || self.needs_edge_pass()
    }
    #[inline]
    pub(crate) fn needs_edge_pass(&self) -> bool {
        self.modes.edge || self.needs_face_candidates()
    }
    /// Face pass derives candidates from touching edges.
    #[inline]
    pub(crate) fn needs_face_candidates(&self) -> bool {
        self.modes.face && self.select_all_faces
    }
}

/// How faces linked to a set of edges are found. Results are identical.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaceLookup {
    /// Walk edge→face links of each marked edge.
    Adjacency,
    /// Scan every face loop for consecutive vertex pairs of marked edges.
    LoopScan,
}

/// Element counts of one `select_in_region` call.
///
/// `*_inside` are the region hits (before combining); `*_selected` are the
/// selection totals after write-back and propagation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SelectionSummary {
    pub vertices_inside: usize,
    pub edges_inside: usize,
    pub faces_inside: usize,
    pub vertices_selected: usize,
    pub edges_selected: usize,
    pub faces_selected: usize,
}
