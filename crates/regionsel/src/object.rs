//! Whole-object region selection.
//!
//! Purpose
//! - Classify scene objects against a region by origin, by full containment,
//!   or by any overlap, and fold the result into each object's selected flag.
//!
//! Design
//! - Capability is resolved once per object: `ObjectGeometry::Mesh` objects can
//!   be tested element by element, `OriginOnly` objects (and meshes without
//!   vertices) always use the origin test.
//! - The projected local bounding box settles the easy cases; only ambiguous
//!   objects pay for per-vertex/edge/face tests.
//! - Hidden objects are skipped and keep their selection.

use nalgebra::{Matrix4, Vector3};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geom2::{is_valid, Bounds2, Point2, Region, Segment2};
use crate::mask::{self, SelectionMode};
use crate::error::RegionResult;
use crate::mesh::{faces_containing_point, validate, MeshSource};
use crate::view::Projector;

/// What part of an object must fall inside the region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectBehavior {
    #[default]
    Origin,
    Contain,
    Overlap,
}

/// Object-level modes (no xor/intersect).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectSelectionMode {
    #[default]
    Set,
    Add,
    Subtract,
}

impl From<ObjectSelectionMode> for SelectionMode {
    fn from(m: ObjectSelectionMode) -> Self {
        match m {
            ObjectSelectionMode::Set => SelectionMode::Set,
            ObjectSelectionMode::Add => SelectionMode::Add,
            ObjectSelectionMode::Subtract => SelectionMode::Subtract,
        }
    }
}

/// Geometry an object exposes to the region tests.
#[derive(Clone, Copy)]
pub enum ObjectGeometry<'a> {
    /// Mesh geometry; the mesh carries the object transform.
    Mesh(&'a dyn MeshSource),
    /// Curves, empties, lights and anything else tested by origin only.
    OriginOnly { local_to_world: Matrix4<f32> },
}

impl ObjectGeometry<'_> {
    pub fn local_to_world(&self) -> Matrix4<f32> {
        match self {
            ObjectGeometry::Mesh(mesh) => mesh.local_to_world(),
            ObjectGeometry::OriginOnly { local_to_world } => *local_to_world,
        }
    }
}

impl std::fmt::Debug for ObjectGeometry<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectGeometry::Mesh(mesh) => write!(f, "Mesh({} vertices)", mesh.vertex_count()),
            ObjectGeometry::OriginOnly { .. } => write!(f, "OriginOnly"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SceneObject<'a> {
    pub name: String,
    pub geometry: ObjectGeometry<'a>,
    pub hidden: bool,
    pub selected: bool,
}

impl<'a> SceneObject<'a> {
    pub fn new(name: impl Into<String>, geometry: ObjectGeometry<'a>) -> Self {
        Self {
            name: name.into(),
            geometry,
            hidden: false,
            selected: false,
        }
    }
}

/// The 12 edges of a box given by corner indices `(x | y<<1 | z<<2)`.
const BOX_EDGES: [[usize; 2]; 12] = [
    [0, 1],
    [2, 3],
    [4, 5],
    [6, 7],
    [0, 2],
    [1, 3],
    [4, 6],
    [5, 7],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
];

fn local_box_corners(coords: &[Vector3<f32>]) -> Option<[Vector3<f32>; 8]> {
    let (first, rest) = coords.split_first()?;
    let (mut lo, mut hi) = (*first, *first);
    for c in rest {
        lo = lo.inf(c);
        hi = hi.sup(c);
    }
    Some(std::array::from_fn(|i| {
        Vector3::new(
            if i & 1 == 0 { lo.x } else { hi.x },
            if i & 2 == 0 { lo.y } else { hi.y },
            if i & 4 == 0 { lo.z } else { hi.z },
        )
    }))
}

fn box_segments(corners: &[Point2]) -> Vec<Segment2> {
    BOX_EDGES
        .iter()
        .map(|&[a, b]| (corners[a], corners[b]))
        .collect()
}

fn origin_inside<P: Projector + ?Sized>(m: &Matrix4<f32>, projector: &P, region: &Region) -> bool {
    let proj = projector.world_to_screen(m, &[Vector3::zeros()]);
    proj.coords.first().is_some_and(|&p| region.contains_point(p))
}

fn mesh_contained<P: Projector + ?Sized>(
    mesh: &dyn MeshSource,
    m: &Matrix4<f32>,
    corners: &[Point2],
    projector: &P,
    region: &Region,
) -> bool {
    let corners_in = corners.iter().all(|&c| region.contains_point(c));
    let box_clear = match region {
        // convex regions: corners inside means the projected box is inside
        Region::Rect(_) | Region::Circle(_) => true,
        Region::Polygon(_) => !mask::any(&region.intersects_segments(&box_segments(corners))),
    };
    if corners_in && box_clear {
        return true;
    }
    let screen = projector.world_to_screen(m, mesh.vertex_coords()).coords;
    region.contains_points(&screen).iter().all(|&b| b)
}

fn mesh_overlaps<P: Projector + ?Sized>(
    mesh: &dyn MeshSource,
    m: &Matrix4<f32>,
    corners: &[Point2],
    projector: &P,
    region: &Region,
) -> bool {
    let reference = region.reference_point();
    if corners.iter().all(|&c| is_valid(c)) {
        let maybe = corners.iter().any(|&c| region.contains_point(c))
            || mask::any(&region.intersects_segments(&box_segments(corners)))
            || Bounds2::from_points(corners).is_some_and(|b| b.contains(reference));
        if !maybe {
            return false;
        }
    }
    let screen = projector.world_to_screen(m, mesh.vertex_coords()).coords;
    if mask::any(&region.contains_points(&screen)) {
        return true;
    }
    let segs: Vec<Segment2> = mesh
        .edge_vertices()
        .iter()
        .map(|&[a, b]| (screen[a as usize], screen[b as usize]))
        .collect();
    if mask::any(&region.intersects_segments(&segs)) {
        return true;
    }
    let all_faces = vec![true; mesh.face_count()];
    mask::any(&faces_containing_point(mesh, &screen, reference, &all_faces))
}

/// Region test for one object (ignores `hidden` and `selected`).
///
/// Mesh geometry is checked like `select_in_region` does before any element
/// is indexed.
pub fn object_in_region<P: Projector + ?Sized>(
    object: &SceneObject<'_>,
    projector: &P,
    region: &Region,
    behavior: ObjectBehavior,
) -> RegionResult<bool> {
    let m = object.geometry.local_to_world();
    let mesh = match object.geometry {
        ObjectGeometry::Mesh(mesh) if mesh.vertex_count() > 0 => mesh,
        _ => return Ok(origin_inside(&m, projector, region)),
    };
    validate(mesh)?;
    let Some(local) = local_box_corners(mesh.vertex_coords()) else {
        return Ok(origin_inside(&m, projector, region));
    };
    let corners = || projector.world_to_screen(&m, &local).coords;
    Ok(match behavior {
        ObjectBehavior::Origin => origin_inside(&m, projector, region),
        ObjectBehavior::Contain => mesh_contained(mesh, &m, &corners(), projector, region),
        ObjectBehavior::Overlap => mesh_overlaps(mesh, &m, &corners(), projector, region),
    })
}

/// Fold the region test of every visible object into its selected flag.
///
/// Returns how many objects matched the region. A malformed mesh object
/// fails the whole call before any selection flag changes.
pub fn select_objects_in_region<P: Projector + ?Sized>(
    objects: &mut [SceneObject<'_>],
    projector: &P,
    region: &Region,
    mode: ObjectSelectionMode,
    behavior: ObjectBehavior,
) -> RegionResult<usize> {
    let inside = objects
        .iter()
        .map(|o| Ok(!o.hidden && object_in_region(o, projector, region, behavior)?))
        .collect::<RegionResult<Vec<bool>>>()?;
    let current: Vec<bool> = objects.iter().map(|o| o.selected).collect();
    let next = SelectionMode::from(mode).combine(&current, &inside);
    for (o, s) in objects.iter_mut().zip(next) {
        if !o.hidden {
            o.selected = s;
        }
    }
    let hits = mask::count(&inside);
    debug!(
        objects = objects.len(),
        hits,
        behavior = ?behavior,
        "object region selection"
    );
    Ok(hits)
}
