//! Three-pass region selection over one mesh (vertices → edges → faces).
//!
//! Ordering
//! - The edge pass reads the vertex pass's inside mask; the face pass (when
//!   `select_all_faces`) reads the edge pass's touching mask.
//! - All inside masks are computed before any selection flag is written.
//!
//! Per-element failures (hidden, backfacing, behind the eye) are plain `false`.

use std::collections::HashSet;

use nalgebra::Matrix4;
use tracing::{debug, info, trace};

use super::source::MeshSource;
use super::types::{FaceLookup, SelectCfg, SelectionSummary};
use crate::cfg::FACE_LOOKUP_ADJACENCY_RATIO;
use crate::error::{RegionError, RegionResult};
use crate::geom2::predicates::point_inside_polygon;
use crate::geom2::{Bounds2, Point2, Region, Segment2};
use crate::mask::{self, SelectionMode};
use crate::view::{Eye, Projector};

/// Vertex pass output, shared with the later passes.
struct VertexPass {
    screen: Vec<Point2>,
    /// `None` when backfacing elements stay eligible.
    facing: Option<Vec<bool>>,
    inside: Vec<bool>,
}

struct EdgePass {
    /// Mask folded into the edge selection.
    inside: Vec<bool>,
    /// Edges with an endpoint inside or crossing the region; present when the
    /// strict rule fell back or faces need it.
    touching: Option<Vec<bool>>,
}

fn check_len(what: &'static str, expected: usize, actual: usize) -> RegionResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(RegionError::MaskLengthMismatch {
            what,
            expected,
            actual,
        })
    }
}

/// Reject sources whose attribute arrays disagree with their element counts.
pub(crate) fn validate<M: MeshSource + ?Sized>(mesh: &M) -> RegionResult<()> {
    let nv = mesh.vertex_count();
    check_len("vertex normals", nv, mesh.vertex_normals().len())?;
    check_len("vertex hidden", nv, mesh.vertex_hidden().len())?;
    check_len("vertex selected", nv, mesh.vertex_selected().len())?;
    let ne = mesh.edge_count();
    check_len("edge hidden", ne, mesh.edge_hidden().len())?;
    check_len("edge selected", ne, mesh.edge_selected().len())?;
    let nf = mesh.face_count();
    check_len("face loop totals", nf, mesh.face_loop_total().len())?;
    check_len("face centers", nf, mesh.face_centers().len())?;
    check_len("face normals", nf, mesh.face_normals().len())?;
    check_len("face hidden", nf, mesh.face_hidden().len())?;
    check_len("face selected", nf, mesh.face_selected().len())?;
    if mesh
        .edge_vertices()
        .iter()
        .any(|&[a, b]| a as usize >= nv || b as usize >= nv)
    {
        return Err(RegionError::topology("edge refers to a missing vertex"));
    }
    let nl = mesh.loop_vertices().len();
    for (&start, &total) in mesh.face_loop_start().iter().zip(mesh.face_loop_total()) {
        if start as usize + total as usize > nl {
            return Err(RegionError::topology("face loop exceeds loop array"));
        }
    }
    if mesh.loop_vertices().iter().any(|&v| v as usize >= nv) {
        return Err(RegionError::topology("face loop refers to a missing vertex"));
    }
    Ok(())
}

/// Update the selection of `mesh` for one region gesture step.
///
/// Runs the vertex, edge and face passes required by `cfg`, folds each pass's
/// inside mask into the current selection with `mode`, writes the results back
/// and finally asks the mesh to propagate selection across element types.
pub fn select_in_region<M, P>(
    mesh: &mut M,
    projector: &P,
    region: &Region,
    mode: SelectionMode,
    cfg: &SelectCfg,
) -> RegionResult<SelectionSummary>
where
    M: MeshSource + ?Sized,
    P: Projector + ?Sized,
{
    let src: &M = mesh;
    validate(src)?;
    let matrix = src.local_to_world();
    let eye = if cfg.select_backfacing {
        None
    } else {
        projector.local_eye(&matrix)
    };

    let verts = cfg
        .needs_vertex_pass()
        .then(|| vertex_pass(src, projector, region, &matrix, eye.as_ref()));
    let edges = match (&verts, cfg.needs_edge_pass()) {
        (Some(v), true) => Some(edge_pass(src, region, cfg, v)),
        _ => None,
    };
    let faces = if cfg.modes.face {
        Some(face_pass(
            src,
            projector,
            region,
            cfg,
            &matrix,
            eye.as_ref(),
            verts.as_ref(),
            edges.as_ref(),
        ))
    } else {
        None
    };

    let mut summary = SelectionSummary::default();
    let new_verts = match (&verts, cfg.modes.vertex) {
        (Some(v), true) => {
            summary.vertices_inside = mask::count(&v.inside);
            Some(mode.combine(mesh.vertex_selected(), &v.inside))
        }
        _ => None,
    };
    let new_edges = match (&edges, cfg.modes.edge) {
        (Some(e), true) => {
            summary.edges_inside = mask::count(&e.inside);
            Some(mode.combine(mesh.edge_selected(), &e.inside))
        }
        _ => None,
    };
    let new_faces = faces.map(|inside| {
        summary.faces_inside = mask::count(&inside);
        mode.combine(mesh.face_selected(), &inside)
    });

    if let Some(sel) = new_verts {
        mesh.set_vertex_selection(&sel);
    }
    if let Some(sel) = new_edges {
        mesh.set_edge_selection(&sel);
    }
    if let Some(sel) = new_faces {
        mesh.set_face_selection(&sel);
    }
    mesh.propagate_selection(cfg.modes);

    summary.vertices_selected = mask::count(mesh.vertex_selected());
    summary.edges_selected = mask::count(mesh.edge_selected());
    summary.faces_selected = mask::count(mesh.face_selected());
    info!(
        region = region.kind().as_str(),
        mode = mode.as_str(),
        vertices = summary.vertices_selected,
        edges = summary.edges_selected,
        faces = summary.faces_selected,
        "region selection applied"
    );
    Ok(summary)
}

fn vertex_pass<M, P>(
    mesh: &M,
    projector: &P,
    region: &Region,
    matrix: &Matrix4<f32>,
    eye: Option<&Eye>,
) -> VertexPass
where
    M: MeshSource + ?Sized,
    P: Projector + ?Sized,
{
    let n = mesh.vertex_count();
    if n == 0 {
        return VertexPass {
            screen: Vec::new(),
            facing: eye.map(|_| Vec::new()),
            inside: Vec::new(),
        };
    }
    let mut eligible = mask::not(mesh.vertex_hidden());
    let facing = eye.map(|eye| eye.facing_mask(mesh.vertex_coords(), mesh.vertex_normals()));
    if let Some(f) = &facing {
        eligible = mask::and(&eligible, f);
    }
    let screen = projector.world_to_screen(matrix, mesh.vertex_coords()).coords;
    let inside = region.contains_points_subset(&screen, &eligible);
    debug!(
        vertices = n,
        eligible = mask::count(&eligible),
        inside = mask::count(&inside),
        "vertex pass"
    );
    VertexPass {
        screen,
        facing,
        inside,
    }
}

fn edge_pass<M>(mesh: &M, region: &Region, cfg: &SelectCfg, verts: &VertexPass) -> EdgePass
where
    M: MeshSource + ?Sized,
{
    let ev = mesh.edge_vertices();
    if ev.is_empty() {
        return EdgePass {
            inside: Vec::new(),
            touching: Some(Vec::new()),
        };
    }
    let hidden = mesh.edge_hidden();
    let vin = &verts.inside;
    let mut eligible = Vec::with_capacity(ev.len());
    let mut both = Vec::with_capacity(ev.len());
    let mut either = Vec::with_capacity(ev.len());
    for (i, &[a, b]) in ev.iter().enumerate() {
        let (a, b) = (a as usize, b as usize);
        let front = match &verts.facing {
            Some(f) => f[a] || f[b],
            None => true,
        };
        let ok = !hidden[i] && front;
        eligible.push(ok);
        both.push(ok && vin[a] && vin[b]);
        either.push(ok && (vin[a] || vin[b]));
    }

    let strict_hit = mask::any(&both);
    let need_touching = cfg.select_all_edges || !strict_hit || cfg.needs_face_candidates();
    let touching = need_touching.then(|| {
        // only edges with no endpoint inside need the segment test
        let neither = mask::and_not(&eligible, &either);
        let segs: Vec<Segment2> = ev
            .iter()
            .map(|&[a, b]| (verts.screen[a as usize], verts.screen[b as usize]))
            .collect();
        let crossing = region.intersects_segments_subset(&segs, &neither);
        mask::or(&either, &crossing)
    });
    let inside = match &touching {
        Some(t) if cfg.select_all_edges || !strict_hit => t.clone(),
        _ => both,
    };
    debug!(
        edges = ev.len(),
        eligible = mask::count(&eligible),
        inside = mask::count(&inside),
        strict = !cfg.select_all_edges && strict_hit,
        "edge pass"
    );
    EdgePass { inside, touching }
}

#[allow(clippy::too_many_arguments)]
fn face_pass<M, P>(
    mesh: &M,
    projector: &P,
    region: &Region,
    cfg: &SelectCfg,
    matrix: &Matrix4<f32>,
    eye: Option<&Eye>,
    verts: Option<&VertexPass>,
    edges: Option<&EdgePass>,
) -> Vec<bool>
where
    M: MeshSource + ?Sized,
    P: Projector + ?Sized,
{
    let nf = mesh.face_count();
    if nf == 0 {
        return Vec::new();
    }
    let mut eligible = mask::not(mesh.face_hidden());
    if let Some(eye) = eye {
        let facing = eye.facing_mask(mesh.face_centers(), mesh.face_normals());
        eligible = mask::and(&eligible, &facing);
    }

    let touching = edges.and_then(|e| e.touching.as_ref());
    let inside = match (cfg.select_all_faces, verts, touching) {
        (true, Some(v), Some(t)) => {
            let lookup = choose_face_lookup(nf, mask::count(t));
            trace!(?lookup, "face lookup strategy");
            let linked = faces_linked_to_edges(mesh, t, lookup);
            let mut inside = mask::and(&linked, &eligible);
            let pending = mask::and_not(&eligible, &inside);
            let enclosing = faces_containing_point(mesh, &v.screen, region.reference_point(), &pending);
            for (i, e) in inside.iter_mut().zip(enclosing) {
                *i |= e;
            }
            inside
        }
        _ => {
            let centers = projector.world_to_screen(matrix, mesh.face_centers()).coords;
            region.contains_points_subset(&centers, &eligible)
        }
    };
    debug!(
        faces = nf,
        eligible = mask::count(&eligible),
        inside = mask::count(&inside),
        "face pass"
    );
    inside
}

/// Pick the cheaper lookup for `touching` marked edges among `faces` faces.
pub fn choose_face_lookup(faces: usize, touching: usize) -> FaceLookup {
    if touching == 0 || faces as f32 / touching as f32 > FACE_LOOKUP_ADJACENCY_RATIO {
        FaceLookup::Adjacency
    } else {
        FaceLookup::LoopScan
    }
}

/// Faces sharing at least one edge marked in `edge_mask`.
pub fn faces_linked_to_edges<M>(mesh: &M, edge_mask: &[bool], lookup: FaceLookup) -> Vec<bool>
where
    M: MeshSource + ?Sized,
{
    let nf = mesh.face_count();
    let mut linked = vec![false; nf];
    match lookup {
        FaceLookup::Adjacency => {
            for e in (0..edge_mask.len()).filter(|&e| edge_mask[e]) {
                for &f in mesh.edge_faces(e) {
                    linked[f as usize] = true;
                }
            }
        }
        FaceLookup::LoopScan => {
            let keys: HashSet<(u32, u32)> = mesh
                .edge_vertices()
                .iter()
                .zip(edge_mask)
                .filter(|&(_, &m)| m)
                .map(|(&[a, b], _)| (a.min(b), a.max(b)))
                .collect();
            if keys.is_empty() {
                return linked;
            }
            for (f, l) in linked.iter_mut().enumerate() {
                let vs = mesh.face_vertices(f);
                *l = (0..vs.len()).any(|i| {
                    let (a, b) = (vs[i], vs[(i + 1) % vs.len()]);
                    keys.contains(&(a.min(b), a.max(b)))
                });
            }
        }
    }
    linked
}

/// Faces (restricted to `candidates`) whose projected polygon contains `point`.
///
/// Faces with an unprojectable vertex are skipped; the face's screen bounds
/// are checked before the polygon test.
pub fn faces_containing_point<M>(
    mesh: &M,
    screen: &[Point2],
    point: Point2,
    candidates: &[bool],
) -> Vec<bool>
where
    M: MeshSource + ?Sized,
{
    let mut out = vec![false; mesh.face_count()];
    let mut poly: Vec<Point2> = Vec::new();
    for (f, hit) in out.iter_mut().enumerate() {
        if !candidates[f] {
            continue;
        }
        poly.clear();
        poly.extend(mesh.face_vertices(f).iter().map(|&v| screen[v as usize]));
        let Some(bounds) = Bounds2::from_points(&poly) else {
            continue;
        };
        *hit = bounds.contains(point) && point_inside_polygon(point, &poly);
    }
    out
}
