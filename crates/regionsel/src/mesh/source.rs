//! The mesh collaborator: topology, visibility and selection state.
//!
//! Attributes are exposed as struct-of-arrays slices in the host's stable
//! element order. Face loops use the flattened layout
//! `loop_vertices[face_loop_start[f] .. + face_loop_total[f]]`.
//!
//! Implementations are not expected to be `Sync`; concurrent selection calls on
//! one mesh need external synchronization.

use nalgebra::{Matrix4, Vector3};

use super::types::ElementModes;

pub trait MeshSource {
    fn local_to_world(&self) -> Matrix4<f32>;

    fn vertex_coords(&self) -> &[Vector3<f32>];
    fn vertex_normals(&self) -> &[Vector3<f32>];
    fn vertex_hidden(&self) -> &[bool];
    fn vertex_selected(&self) -> &[bool];

    fn edge_vertices(&self) -> &[[u32; 2]];
    fn edge_hidden(&self) -> &[bool];
    fn edge_selected(&self) -> &[bool];
    /// Faces using `edge` (usually one or two).
    fn edge_faces(&self, edge: usize) -> &[u32];

    fn face_loop_start(&self) -> &[u32];
    fn face_loop_total(&self) -> &[u32];
    fn loop_vertices(&self) -> &[u32];
    fn face_centers(&self) -> &[Vector3<f32>];
    fn face_normals(&self) -> &[Vector3<f32>];
    fn face_hidden(&self) -> &[bool];
    fn face_selected(&self) -> &[bool];

    fn set_vertex_selection(&mut self, mask: &[bool]);
    fn set_edge_selection(&mut self, mask: &[bool]);
    fn set_face_selection(&mut self, mask: &[bool]);

    /// Make selection consistent across element types after all passes ran.
    fn propagate_selection(&mut self, modes: ElementModes);

    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertex_coords().len()
    }
    #[inline]
    fn edge_count(&self) -> usize {
        self.edge_vertices().len()
    }
    #[inline]
    fn face_count(&self) -> usize {
        self.face_loop_start().len()
    }
    /// Ordered vertex loop of `face`.
    #[inline]
    fn face_vertices(&self, face: usize) -> &[u32] {
        let start = self.face_loop_start()[face] as usize;
        let total = self.face_loop_total()[face] as usize;
        &self.loop_vertices()[start..start + total]
    }
}
