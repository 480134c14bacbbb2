//! Mesh element selection (vertices, edges, faces) by screen region.
//!
//! Purpose
//! - `select_in_region`: one region gesture step over one mesh, honoring the
//!   host's element modes and the edge/face/backfacing policies in `SelectCfg`.
//! - `MeshSource`: what the pipeline reads from and writes to a host mesh;
//!   `MeshData` is the in-memory implementation.
//!
//! Conventions
//! - Masks are recomputed per call; nothing persists between calls.
//! - Not safe to run concurrently on the same mesh without external locking.

mod data;
mod pipeline;
mod source;
mod types;

pub use data::MeshData;
pub use pipeline::{
    choose_face_lookup, faces_containing_point, faces_linked_to_edges, select_in_region,
};
pub(crate) use pipeline::validate;
pub use source::MeshSource;
pub use types::{ElementModes, FaceLookup, SelectCfg, SelectionSummary};
