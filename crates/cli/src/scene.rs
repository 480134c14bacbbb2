//! JSON scene files: camera, region, policy and geometry.
//!
//! Matrices are row-major `[[f32; 4]; 4]`; vectors are plain arrays. Element
//! flags (`hidden_*`, `selected_*`) are index lists; edges are named by their
//! vertex pairs since edge order is derived from the faces.

use anyhow::{ensure, Context, Result};
use nalgebra::{Matrix4, Point3, Vector2, Vector3};
use serde::{Deserialize, Serialize};
use std::path::Path;

use regionsel::api::{
    Camera, MeshData, MeshSource, ObjectBehavior, ObjectSelectionMode, PlanarProjector, Point2,
    Projector, Region, ScreenProjection, SelectCfg, SelectionMode,
};
use regionsel::view::Eye;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CameraDto {
    /// `(x, y, z) ↦ (x, y)` in world units.
    #[default]
    Planar,
    Perspective {
        eye: [f32; 3],
        target: [f32; 3],
        #[serde(default = "default_up")]
        up: [f32; 3],
        /// Vertical field of view in radians.
        fovy: f32,
        viewport: [f32; 2],
    },
    Orthographic {
        eye: [f32; 3],
        target: [f32; 3],
        #[serde(default = "default_up")]
        up: [f32; 3],
        half_height: f32,
        viewport: [f32; 2],
    },
}

fn default_up() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}

/// Projector chosen by the scene file.
pub enum SceneProjector {
    Planar(PlanarProjector),
    Camera(Camera),
}

impl Projector for SceneProjector {
    fn world_to_screen(&self, m: &Matrix4<f32>, coords: &[Vector3<f32>]) -> ScreenProjection {
        match self {
            SceneProjector::Planar(p) => p.world_to_screen(m, coords),
            SceneProjector::Camera(c) => c.world_to_screen(m, coords),
        }
    }

    fn local_eye(&self, m: &Matrix4<f32>) -> Option<Eye> {
        match self {
            SceneProjector::Planar(p) => p.local_eye(m),
            SceneProjector::Camera(c) => c.local_eye(m),
        }
    }
}

impl CameraDto {
    pub fn build(&self) -> SceneProjector {
        let p3 = |v: &[f32; 3]| Point3::new(v[0], v[1], v[2]);
        let v3 = |v: &[f32; 3]| Vector3::new(v[0], v[1], v[2]);
        let v2 = |v: &[f32; 2]| Vector2::new(v[0], v[1]);
        match self {
            CameraDto::Planar => SceneProjector::Planar(PlanarProjector),
            CameraDto::Perspective {
                eye,
                target,
                up,
                fovy,
                viewport,
            } => SceneProjector::Camera(Camera::perspective(
                p3(eye),
                p3(target),
                v3(up),
                *fovy,
                v2(viewport),
            )),
            CameraDto::Orthographic {
                eye,
                target,
                up,
                half_height,
                viewport,
            } => SceneProjector::Camera(Camera::orthographic(
                p3(eye),
                p3(target),
                v3(up),
                *half_height,
                v2(viewport),
            )),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionDto {
    Rect {
        xmin: f32,
        xmax: f32,
        ymin: f32,
        ymax: f32,
    },
    Circle {
        center: [f32; 2],
        radius: f32,
    },
    Polygon(Vec<[f32; 2]>),
}

impl RegionDto {
    pub fn build(&self) -> Result<Region> {
        let region = match self {
            RegionDto::Rect {
                xmin,
                xmax,
                ymin,
                ymax,
            } => Region::rect(*xmin, *xmax, *ymin, *ymax),
            RegionDto::Circle { center, radius } => {
                Region::circle(Vector2::new(center[0], center[1]), *radius)
            }
            RegionDto::Polygon(points) => Region::polygon(
                points
                    .iter()
                    .map(|p| Vector2::new(p[0], p[1]))
                    .collect::<Vec<Point2>>(),
            ),
        };
        region.context("invalid region")
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshDto {
    pub matrix: Option<[[f32; 4]; 4]>,
    pub coords: Vec<[f32; 3]>,
    pub faces: Vec<Vec<u32>>,
    /// Wire edges not part of any face.
    pub edges: Vec<[u32; 2]>,
    pub hidden_vertices: Vec<usize>,
    pub hidden_edges: Vec<[u32; 2]>,
    pub hidden_faces: Vec<usize>,
    pub selected_vertices: Vec<usize>,
    pub selected_edges: Vec<[u32; 2]>,
    pub selected_faces: Vec<usize>,
}

pub fn matrix_from_rows(rows: &Option<[[f32; 4]; 4]>) -> Matrix4<f32> {
    match rows {
        Some(r) => Matrix4::from_row_slice(&r.concat()),
        None => Matrix4::identity(),
    }
}

fn edge_indices(what: &str, mesh: &MeshData, pairs: &[[u32; 2]]) -> Result<Vec<usize>> {
    pairs
        .iter()
        .map(|&[a, b]| {
            mesh.find_edge(a, b)
                .with_context(|| format!("{what}: no edge joins vertices {a} and {b}"))
        })
        .collect()
}

fn index_mask(what: &str, indices: &[usize], len: usize) -> Result<Vec<bool>> {
    let mut mask = vec![false; len];
    for &i in indices {
        ensure!(i < len, "{what}: index {i} out of range ({len} elements)");
        mask[i] = true;
    }
    Ok(mask)
}

impl MeshDto {
    pub fn build(&self) -> Result<MeshData> {
        let coords = self
            .coords
            .iter()
            .map(|c| Vector3::new(c[0], c[1], c[2]))
            .collect();
        let mut mesh = MeshData::new(coords, &self.edges, &self.faces)
            .context("invalid mesh topology")?
            .with_matrix(matrix_from_rows(&self.matrix));

        index_mask("hidden_vertices", &self.hidden_vertices, mesh.vertex_count())?;
        index_mask("hidden_faces", &self.hidden_faces, mesh.face_count())?;
        for &v in &self.hidden_vertices {
            mesh.set_vertex_hidden(v, true);
        }
        for e in edge_indices("hidden_edges", &mesh, &self.hidden_edges)? {
            mesh.set_edge_hidden(e, true);
        }
        for &f in &self.hidden_faces {
            mesh.hide_face_with_boundary(f);
        }
        let sel_v = index_mask("selected_vertices", &self.selected_vertices, mesh.vertex_count())?;
        let sel_e = index_mask(
            "selected_edges",
            &edge_indices("selected_edges", &mesh, &self.selected_edges)?,
            mesh.edge_count(),
        )?;
        let sel_f = index_mask("selected_faces", &self.selected_faces, mesh.face_count())?;
        mesh.set_vertex_selection(&sel_v);
        if !self.selected_edges.is_empty() {
            mesh.set_edge_selection(&sel_e);
        }
        if !self.selected_faces.is_empty() {
            mesh.set_face_selection(&sel_f);
        }
        Ok(mesh)
    }
}

/// Input of `regionsel mesh`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MeshScene {
    #[serde(default)]
    pub camera: CameraDto,
    pub region: RegionDto,
    #[serde(default)]
    pub mode: SelectionMode,
    #[serde(default)]
    pub cfg: SelectCfg,
    pub mesh: MeshDto,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ObjectDto {
    pub name: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub selected: bool,
    /// Objects without a mesh are tested by origin only.
    #[serde(default)]
    pub mesh: Option<MeshDto>,
    #[serde(default)]
    pub matrix: Option<[[f32; 4]; 4]>,
}

/// Input of `regionsel objects`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ObjectScene {
    #[serde(default)]
    pub camera: CameraDto,
    pub region: RegionDto,
    #[serde(default)]
    pub mode: ObjectSelectionMode,
    #[serde(default)]
    pub behavior: ObjectBehavior,
    pub objects: Vec<ObjectDto>,
}

pub fn load<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use regionsel::api::ElementModes;
    use serde_json::json;

    #[test]
    fn parses_minimal_mesh_scene() {
        let scene: MeshScene = serde_json::from_value(json!({
            "region": {"rect": {"xmin": 0.0, "xmax": 1.0, "ymin": 0.0, "ymax": 1.0}},
            "mesh": {"coords": [[0.5, 0.5, 0.0]]}
        }))
        .unwrap();
        assert_eq!(scene.mode, SelectionMode::Set);
        assert_eq!(scene.cfg, SelectCfg::default());
        assert!(matches!(scene.camera, CameraDto::Planar));
        let mesh = scene.mesh.build().unwrap();
        assert_eq!(mesh.vertex_count(), 1);
    }

    #[test]
    fn rejects_bad_regions_and_indices() {
        let poly: RegionDto = serde_json::from_value(json!({"polygon": [[0.0, 0.0], [1.0, 0.0]]})).unwrap();
        assert!(poly.build().is_err());
        let mesh = MeshDto {
            coords: vec![[0.0; 3]],
            hidden_vertices: vec![3],
            ..Default::default()
        };
        let err = mesh.build().unwrap_err();
        assert!(err.to_string().contains("hidden_vertices"));
    }

    #[test]
    fn modes_missing_from_input_are_off() {
        let cfg: SelectCfg = serde_json::from_value(json!({
            "modes": {"face": true},
            "select_all_faces": true
        }))
        .unwrap();
        assert_eq!(cfg.modes, ElementModes::FACE);
        assert!(cfg.select_all_faces);
        // no "modes" key at all keeps the vertex-mode default
        let cfg: SelectCfg = serde_json::from_value(json!({})).unwrap();
        assert_eq!(cfg.modes, ElementModes::VERTEX);
    }

    #[test]
    fn edge_flags_by_vertex_pair() {
        let dto = MeshDto {
            coords: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
            faces: vec![vec![0, 1, 2, 3]],
            hidden_edges: vec![[2, 1]],
            selected_edges: vec![[3, 2], [1, 2]],
            ..Default::default()
        };
        let mesh = dto.build().unwrap();
        let e12 = mesh.find_edge(1, 2).unwrap();
        let e23 = mesh.find_edge(2, 3).unwrap();
        assert!(mesh.edge_hidden()[e12]);
        // hidden edges never start selected
        assert!(!mesh.edge_selected()[e12]);
        assert!(mesh.edge_selected()[e23]);

        let missing = MeshDto {
            selected_edges: vec![[0, 2]],
            ..dto
        };
        let err = missing.build().unwrap_err();
        assert!(err.to_string().contains("selected_edges"));
    }

    #[test]
    fn matrix_rows_are_row_major() {
        let m = matrix_from_rows(&Some([
            [1.0, 0.0, 0.0, 5.0],
            [0.0, 1.0, 0.0, 6.0],
            [0.0, 0.0, 1.0, 7.0],
            [0.0, 0.0, 0.0, 1.0],
        ]));
        assert_eq!((m[(0, 3)], m[(1, 3)], m[(2, 3)]), (5.0, 6.0, 7.0));
    }
}
