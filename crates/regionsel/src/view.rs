//! Projection collaborator: local 3D → screen 2D, plus the facing test.
//!
//! `Projector` is what the pipelines need from a viewport. `Camera` is a plain
//! nalgebra implementation (view-projection matrix + viewport size) for hosts
//! that do not bring their own and for tests.

use nalgebra::{Isometry3, Matrix4, Orthographic3, Perspective3, Point3, Vector2, Vector3, Vector4};

use crate::cfg::BEHIND_EYE_W_EPS;
use crate::geom2::{invalid_point, Point2};

/// Batch projection result; `behind_eye[i]` implies `coords[i]` is NaN.
#[derive(Clone, Debug, Default)]
pub struct ScreenProjection {
    pub coords: Vec<Point2>,
    pub behind_eye: Vec<bool>,
}

/// Viewer position in an object's local space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Eye {
    /// Perspective: eye location.
    Point(Vector3<f32>),
    /// Orthographic: direction pointing towards the viewer.
    Direction(Vector3<f32>),
}

impl Eye {
    /// True when `normal` at `co` points towards the viewer.
    #[inline]
    pub fn is_facing(&self, co: &Vector3<f32>, normal: &Vector3<f32>) -> bool {
        match self {
            Eye::Point(eye) => normal.dot(&(eye - co)) > 0.0,
            Eye::Direction(dir) => normal.dot(dir) > 0.0,
        }
    }

    pub fn facing_mask(&self, coords: &[Vector3<f32>], normals: &[Vector3<f32>]) -> Vec<bool> {
        coords
            .iter()
            .zip(normals)
            .map(|(co, n)| self.is_facing(co, n))
            .collect()
    }
}

/// Maps object-local coordinates to screen pixels.
pub trait Projector {
    /// Project a batch; points behind the eye come back as NaN and flagged.
    fn world_to_screen(
        &self,
        local_to_world: &Matrix4<f32>,
        coords: &[Vector3<f32>],
    ) -> ScreenProjection;

    /// Eye in the object's local space; `None` if the transform is singular.
    fn local_eye(&self, local_to_world: &Matrix4<f32>) -> Option<Eye>;
}

/// Pinhole or orthographic camera over a pixel viewport (origin bottom-left).
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    /// `projection * view`.
    pub view_proj: Matrix4<f32>,
    /// Camera-to-world transform.
    pub view_inv: Matrix4<f32>,
    /// Viewport size in pixels.
    pub viewport: Vector2<f32>,
    pub perspective: bool,
}

impl Camera {
    pub fn perspective(
        eye: Point3<f32>,
        target: Point3<f32>,
        up: Vector3<f32>,
        fovy: f32,
        viewport: Vector2<f32>,
    ) -> Self {
        let view = Isometry3::look_at_rh(&eye, &target, &up);
        let proj = Perspective3::new(viewport.x / viewport.y, fovy, 0.01, 1000.0);
        Self {
            view_proj: proj.to_homogeneous() * view.to_homogeneous(),
            view_inv: view.inverse().to_homogeneous(),
            viewport,
            perspective: true,
        }
    }

    /// Orthographic view showing `half_height` world units above and below the center.
    pub fn orthographic(
        eye: Point3<f32>,
        target: Point3<f32>,
        up: Vector3<f32>,
        half_height: f32,
        viewport: Vector2<f32>,
    ) -> Self {
        let view = Isometry3::look_at_rh(&eye, &target, &up);
        let half_width = half_height * viewport.x / viewport.y;
        let proj = Orthographic3::new(
            -half_width,
            half_width,
            -half_height,
            half_height,
            -1000.0,
            1000.0,
        );
        Self {
            view_proj: proj.to_homogeneous() * view.to_homogeneous(),
            view_inv: view.inverse().to_homogeneous(),
            viewport,
            perspective: false,
        }
    }

    #[inline]
    fn project_one(&self, m: &Matrix4<f32>, co: &Vector3<f32>) -> Option<Point2> {
        let clip = m * Vector4::new(co.x, co.y, co.z, 1.0);
        if self.perspective && clip.w <= BEHIND_EYE_W_EPS {
            return None;
        }
        let ndc = Vector2::new(clip.x / clip.w, clip.y / clip.w);
        Some(Vector2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.x,
            (ndc.y + 1.0) * 0.5 * self.viewport.y,
        ))
    }
}

impl Projector for Camera {
    fn world_to_screen(
        &self,
        local_to_world: &Matrix4<f32>,
        coords: &[Vector3<f32>],
    ) -> ScreenProjection {
        let m = self.view_proj * local_to_world;
        let mut out = ScreenProjection {
            coords: Vec::with_capacity(coords.len()),
            behind_eye: Vec::with_capacity(coords.len()),
        };
        for co in coords {
            match self.project_one(&m, co) {
                Some(p) => {
                    out.coords.push(p);
                    out.behind_eye.push(false);
                }
                None => {
                    out.coords.push(invalid_point());
                    out.behind_eye.push(true);
                }
            }
        }
        out
    }

    fn local_eye(&self, local_to_world: &Matrix4<f32>) -> Option<Eye> {
        let world_to_local = local_to_world.try_inverse()?;
        if self.perspective {
            let eye = self.view_inv.column(3).into_owned();
            let local = world_to_local * eye;
            Some(Eye::Point(local.xyz() / local.w))
        } else {
            // camera +Z points back towards the viewer in a right-handed look-at
            let dir = self.view_inv.fixed_view::<3, 1>(0, 2).into_owned();
            let local = world_to_local.fixed_view::<3, 3>(0, 0) * dir;
            Some(Eye::Direction(local))
        }
    }
}

/// Top-down orthographic view with world units as pixels: `(x, y, z) ↦ (x, y)`,
/// viewer looking down −z. Nothing is ever behind the eye.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlanarProjector;

impl Projector for PlanarProjector {
    fn world_to_screen(
        &self,
        local_to_world: &Matrix4<f32>,
        coords: &[Vector3<f32>],
    ) -> ScreenProjection {
        let coords: Vec<Point2> = coords
            .iter()
            .map(|co| {
                let p = local_to_world.transform_point(&Point3::from(*co));
                Vector2::new(p.x, p.y)
            })
            .collect();
        let behind_eye = vec![false; coords.len()];
        ScreenProjection { coords, behind_eye }
    }

    fn local_eye(&self, local_to_world: &Matrix4<f32>) -> Option<Eye> {
        let world_to_local = local_to_world.try_inverse()?;
        let dir = world_to_local.fixed_view::<3, 3>(0, 0) * Vector3::z();
        Some(Eye::Direction(dir))
    }
}
