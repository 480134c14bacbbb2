//! In-memory polygon mesh implementing `MeshSource`.
//!
//! Built from vertex coordinates plus face loops (and optional loose edges).
//! Edges, edge→face links, face centers and normals are derived once at
//! construction; selection and hidden flags are plain `Vec<bool>`.

use std::collections::HashMap;

use nalgebra::{Matrix4, Vector3};

use super::source::MeshSource;
use super::types::ElementModes;
use crate::error::{RegionError, RegionResult};

#[derive(Clone, Debug)]
pub struct MeshData {
    matrix: Matrix4<f32>,

    coords: Vec<Vector3<f32>>,
    vertex_normals: Vec<Vector3<f32>>,
    vertex_hidden: Vec<bool>,
    vertex_selected: Vec<bool>,

    edges: Vec<[u32; 2]>,
    edge_hidden: Vec<bool>,
    edge_selected: Vec<bool>,
    // CSR: faces of edge e are edge_face_links[edge_face_offsets[e]..edge_face_offsets[e+1]]
    edge_face_offsets: Vec<u32>,
    edge_face_links: Vec<u32>,

    face_loop_start: Vec<u32>,
    face_loop_total: Vec<u32>,
    loop_vertices: Vec<u32>,
    // edge between loop corner i and the next corner of the same face
    loop_edges: Vec<u32>,
    face_centers: Vec<Vector3<f32>>,
    face_normals: Vec<Vector3<f32>>,
    face_hidden: Vec<bool>,
    face_selected: Vec<bool>,
}

#[inline]
fn edge_key(a: u32, b: u32) -> (u32, u32) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Newell's method; zero for degenerate loops.
fn newell_normal(coords: &[Vector3<f32>], face: &[u32]) -> Vector3<f32> {
    let mut n = Vector3::zeros();
    for (i, &a) in face.iter().enumerate() {
        let p = coords[a as usize];
        let q = coords[face[(i + 1) % face.len()] as usize];
        n.x += (p.y - q.y) * (p.z + q.z);
        n.y += (p.z - q.z) * (p.x + q.x);
        n.z += (p.x - q.x) * (p.y + q.y);
    }
    n.try_normalize(0.0).unwrap_or_else(Vector3::zeros)
}

impl MeshData {
    /// Mesh from polygon loops; edges are derived from the loops.
    pub fn from_polygons(coords: Vec<Vector3<f32>>, faces: &[Vec<u32>]) -> RegionResult<Self> {
        Self::new(coords, &[], faces)
    }

    /// Mesh from loose edges plus polygon loops.
    ///
    /// Face edges come first in order of first appearance; loose edges that
    /// duplicate a face edge are merged.
    pub fn new(
        coords: Vec<Vector3<f32>>,
        loose_edges: &[[u32; 2]],
        faces: &[Vec<u32>],
    ) -> RegionResult<Self> {
        let nv = coords.len() as u32;
        let check = |v: u32| -> RegionResult<()> {
            if v < nv {
                Ok(())
            } else {
                Err(RegionError::topology(format!(
                    "vertex index {v} out of range ({nv} vertices)"
                )))
            }
        };

        let mut edges: Vec<[u32; 2]> = Vec::new();
        let mut lookup: HashMap<(u32, u32), u32> = HashMap::new();
        let mut links: Vec<Vec<u32>> = Vec::new();
        let mut face_loop_start = Vec::with_capacity(faces.len());
        let mut face_loop_total = Vec::with_capacity(faces.len());
        let mut loop_vertices = Vec::new();
        let mut loop_edges = Vec::new();

        for (f, face) in faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(RegionError::topology(format!(
                    "face {f} has {} vertices (needs >= 3)",
                    face.len()
                )));
            }
            face_loop_start.push(loop_vertices.len() as u32);
            face_loop_total.push(face.len() as u32);
            for (i, &a) in face.iter().enumerate() {
                let b = face[(i + 1) % face.len()];
                check(a)?;
                check(b)?;
                if a == b {
                    return Err(RegionError::topology(format!(
                        "face {f} repeats vertex {a} consecutively"
                    )));
                }
                let e = *lookup.entry(edge_key(a, b)).or_insert_with(|| {
                    edges.push([a, b]);
                    links.push(Vec::new());
                    (edges.len() - 1) as u32
                });
                if !links[e as usize].contains(&(f as u32)) {
                    links[e as usize].push(f as u32);
                }
                loop_vertices.push(a);
                loop_edges.push(e);
            }
        }
        for &[a, b] in loose_edges {
            check(a)?;
            check(b)?;
            if a == b {
                return Err(RegionError::topology(format!("loose edge joins vertex {a} to itself")));
            }
            lookup.entry(edge_key(a, b)).or_insert_with(|| {
                edges.push([a, b]);
                links.push(Vec::new());
                (edges.len() - 1) as u32
            });
        }

        let mut edge_face_offsets = Vec::with_capacity(edges.len() + 1);
        let mut edge_face_links = Vec::new();
        edge_face_offsets.push(0);
        for l in &links {
            edge_face_links.extend_from_slice(l);
            edge_face_offsets.push(edge_face_links.len() as u32);
        }

        let face_normals: Vec<Vector3<f32>> =
            faces.iter().map(|f| newell_normal(&coords, f)).collect();
        let face_centers: Vec<Vector3<f32>> = faces
            .iter()
            .map(|f| {
                let sum = f
                    .iter()
                    .fold(Vector3::zeros(), |acc, &v| acc + coords[v as usize]);
                sum / f.len() as f32
            })
            .collect();

        let mut vertex_normals = vec![Vector3::zeros(); coords.len()];
        for (f, face) in faces.iter().enumerate() {
            for &v in face {
                vertex_normals[v as usize] += face_normals[f];
            }
        }
        for (n, co) in vertex_normals.iter_mut().zip(&coords) {
            // loose vertices point away from the origin
            *n = n
                .try_normalize(1e-12)
                .or_else(|| co.try_normalize(1e-12))
                .unwrap_or_else(Vector3::z);
        }

        let (nv, ne, nf) = (coords.len(), edges.len(), faces.len());
        Ok(Self {
            matrix: Matrix4::identity(),
            coords,
            vertex_normals,
            vertex_hidden: vec![false; nv],
            vertex_selected: vec![false; nv],
            edges,
            edge_hidden: vec![false; ne],
            edge_selected: vec![false; ne],
            edge_face_offsets,
            edge_face_links,
            face_loop_start,
            face_loop_total,
            loop_vertices,
            loop_edges,
            face_centers,
            face_normals,
            face_hidden: vec![false; nf],
            face_selected: vec![false; nf],
        })
    }

    /// `cols × rows` quads in the z=0 plane, `spacing` apart, facing +z.
    ///
    /// Vertex `(i, j)` has index `j * (cols + 1) + i`; face `(i, j)` has index
    /// `j * cols + i`.
    pub fn grid(cols: usize, rows: usize, spacing: f32) -> RegionResult<Self> {
        let stride = cols + 1;
        let mut coords = Vec::with_capacity(stride * (rows + 1));
        for j in 0..=rows {
            for i in 0..=cols {
                coords.push(Vector3::new(i as f32 * spacing, j as f32 * spacing, 0.0));
            }
        }
        let v = |i: usize, j: usize| (j * stride + i) as u32;
        let mut faces = Vec::with_capacity(cols * rows);
        for j in 0..rows {
            for i in 0..cols {
                faces.push(vec![v(i, j), v(i + 1, j), v(i + 1, j + 1), v(i, j + 1)]);
            }
        }
        Self::from_polygons(coords, &faces)
    }

    pub fn with_matrix(mut self, local_to_world: Matrix4<f32>) -> Self {
        self.matrix = local_to_world;
        self
    }

    pub fn set_matrix(&mut self, local_to_world: Matrix4<f32>) {
        self.matrix = local_to_world;
    }

    /// Edge index joining `a` and `b`, in either order.
    pub fn find_edge(&self, a: u32, b: u32) -> Option<usize> {
        let key = edge_key(a, b);
        self.edges.iter().position(|&[x, y]| edge_key(x, y) == key)
    }

    pub fn set_vertex_hidden(&mut self, vertex: usize, hidden: bool) {
        self.vertex_hidden[vertex] = hidden;
        if hidden {
            self.vertex_selected[vertex] = false;
        }
    }

    pub fn set_edge_hidden(&mut self, edge: usize, hidden: bool) {
        self.edge_hidden[edge] = hidden;
        if hidden {
            self.edge_selected[edge] = false;
        }
    }

    pub fn set_face_hidden(&mut self, face: usize, hidden: bool) {
        self.face_hidden[face] = hidden;
        if hidden {
            self.face_selected[face] = false;
        }
    }

    /// Hide a face together with its loop vertices and edges.
    pub fn hide_face_with_boundary(&mut self, face: usize) {
        self.set_face_hidden(face, true);
        let start = self.face_loop_start[face] as usize;
        let end = start + self.face_loop_total[face] as usize;
        for l in start..end {
            let v = self.loop_vertices[l] as usize;
            let e = self.loop_edges[l] as usize;
            self.set_vertex_hidden(v, true);
            self.set_edge_hidden(e, true);
        }
    }

    pub fn deselect_all(&mut self) {
        self.vertex_selected.fill(false);
        self.edge_selected.fill(false);
        self.face_selected.fill(false);
    }

    fn face_loop_range(&self, face: usize) -> std::ops::Range<usize> {
        let start = self.face_loop_start[face] as usize;
        start..start + self.face_loop_total[face] as usize
    }

    /// Vertices: edges/faces follow their vertices.
    fn flush_from_vertices(&mut self) {
        for (e, &[a, b]) in self.edges.iter().enumerate() {
            self.edge_selected[e] = !self.edge_hidden[e]
                && self.vertex_selected[a as usize]
                && self.vertex_selected[b as usize];
        }
        for f in 0..self.face_loop_start.len() {
            let all = self
                .face_loop_range(f)
                .all(|l| self.vertex_selected[self.loop_vertices[l] as usize]);
            self.face_selected[f] = !self.face_hidden[f] && all;
        }
    }

    /// Edges: vertices of selected edges, faces whose edges are all selected.
    fn flush_from_edges(&mut self) {
        self.vertex_selected.fill(false);
        for (e, &[a, b]) in self.edges.iter().enumerate() {
            if self.edge_selected[e] {
                self.vertex_selected[a as usize] = true;
                self.vertex_selected[b as usize] = true;
            }
        }
        for f in 0..self.face_loop_start.len() {
            let all = self
                .face_loop_range(f)
                .all(|l| self.edge_selected[self.loop_edges[l] as usize]);
            self.face_selected[f] = !self.face_hidden[f] && all;
        }
    }

    /// Faces: vertices and edges used by a selected face.
    fn flush_from_faces(&mut self) {
        self.vertex_selected.fill(false);
        self.edge_selected.fill(false);
        for f in 0..self.face_loop_start.len() {
            if !self.face_selected[f] {
                continue;
            }
            for l in self.face_loop_range(f) {
                self.vertex_selected[self.loop_vertices[l] as usize] = true;
                self.edge_selected[self.loop_edges[l] as usize] = true;
            }
        }
    }
}

impl MeshSource for MeshData {
    fn local_to_world(&self) -> Matrix4<f32> {
        self.matrix
    }
    fn vertex_coords(&self) -> &[Vector3<f32>] {
        &self.coords
    }
    fn vertex_normals(&self) -> &[Vector3<f32>] {
        &self.vertex_normals
    }
    fn vertex_hidden(&self) -> &[bool] {
        &self.vertex_hidden
    }
    fn vertex_selected(&self) -> &[bool] {
        &self.vertex_selected
    }
    fn edge_vertices(&self) -> &[[u32; 2]] {
        &self.edges
    }
    fn edge_hidden(&self) -> &[bool] {
        &self.edge_hidden
    }
    fn edge_selected(&self) -> &[bool] {
        &self.edge_selected
    }
    fn edge_faces(&self, edge: usize) -> &[u32] {
        let lo = self.edge_face_offsets[edge] as usize;
        let hi = self.edge_face_offsets[edge + 1] as usize;
        &self.edge_face_links[lo..hi]
    }
    fn face_loop_start(&self) -> &[u32] {
        &self.face_loop_start
    }
    fn face_loop_total(&self) -> &[u32] {
        &self.face_loop_total
    }
    fn loop_vertices(&self) -> &[u32] {
        &self.loop_vertices
    }
    fn face_centers(&self) -> &[Vector3<f32>] {
        &self.face_centers
    }
    fn face_normals(&self) -> &[Vector3<f32>] {
        &self.face_normals
    }
    fn face_hidden(&self) -> &[bool] {
        &self.face_hidden
    }
    fn face_selected(&self) -> &[bool] {
        &self.face_selected
    }

    fn set_vertex_selection(&mut self, mask: &[bool]) {
        for (s, (&m, &h)) in self
            .vertex_selected
            .iter_mut()
            .zip(mask.iter().zip(&self.vertex_hidden))
        {
            *s = m && !h;
        }
    }
    fn set_edge_selection(&mut self, mask: &[bool]) {
        for (s, (&m, &h)) in self
            .edge_selected
            .iter_mut()
            .zip(mask.iter().zip(&self.edge_hidden))
        {
            *s = m && !h;
        }
    }
    fn set_face_selection(&mut self, mask: &[bool]) {
        for (s, (&m, &h)) in self
            .face_selected
            .iter_mut()
            .zip(mask.iter().zip(&self.face_hidden))
        {
            *s = m && !h;
        }
    }

    fn propagate_selection(&mut self, modes: ElementModes) {
        if modes.vertex {
            self.flush_from_vertices();
        } else if modes.edge {
            self.flush_from_edges();
        } else if modes.face {
            self.flush_from_faces();
        }
    }
}
