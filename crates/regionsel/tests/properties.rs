//! Property-based tests for region predicates, the mask combinator and the
//! mesh pipeline.
//!
//! Run with: cargo test -p regionsel --test properties

use nalgebra::{vector, Matrix4};
use proptest::prelude::*;
use regionsel::api::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_point() -> impl Strategy<Value = Point2> {
    (-50.0f32..50.0, -50.0f32..50.0).prop_map(|(x, y)| vector![x, y])
}

fn arb_segment() -> impl Strategy<Value = Segment2> {
    (arb_point(), arb_point())
}

fn arb_region() -> impl Strategy<Value = Region> {
    prop_oneof![
        (arb_point(), arb_point()).prop_map(|(a, b)| Region::rect_from_corners(a, b).unwrap()),
        (arb_point(), 0.0f32..30.0).prop_map(|(c, r)| Region::circle(c, r).unwrap()),
        prop::collection::vec(arb_point(), 3..12).prop_map(|v| Region::polygon(v).unwrap()),
    ]
}

fn arb_mask(len: usize) -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), len)
}

fn arb_mode() -> impl Strategy<Value = SelectionMode> {
    prop_oneof![
        Just(SelectionMode::Set),
        Just(SelectionMode::Add),
        Just(SelectionMode::Subtract),
        Just(SelectionMode::Xor),
        Just(SelectionMode::Intersect),
    ]
}

fn arb_cfg() -> impl Strategy<Value = SelectCfg> {
    (any::<[bool; 3]>(), any::<bool>(), any::<bool>()).prop_map(|([v, e, f], all_e, all_f)| {
        SelectCfg {
            modes: ElementModes {
                vertex: v || !(e || f),
                edge: e,
                face: f,
            },
            select_all_edges: all_e,
            select_all_faces: all_f,
            select_backfacing: false,
        }
    })
}

// =============================================================================
// Predicates and prefilter
// =============================================================================

proptest! {
    #[test]
    fn prefilter_matches_exact_points(
        region in arb_region(),
        points in prop::collection::vec(arb_point(), 0..64),
    ) {
        prop_assert_eq!(region.contains_points(&points), region.contains_points_exact(&points));
    }

    #[test]
    fn prefilter_matches_exact_segments(
        region in arb_region(),
        segs in prop::collection::vec(arb_segment(), 0..64),
    ) {
        prop_assert_eq!(region.intersects_segments(&segs), region.intersects_segments_exact(&segs));
    }

    #[test]
    fn nan_never_inside_or_intersecting(region in arb_region(), p in arb_point()) {
        let nan = invalid_point();
        prop_assert!(!region.contains_point(nan));
        prop_assert!(!region.intersects_segment((nan, p)));
        prop_assert!(!region.intersects_segment((p, nan)));
        prop_assert_eq!(region.contains_points(&[nan, nan]), vec![false, false]);
    }

    #[test]
    fn inside_point_implies_touching_segment(region in arb_region(), p in arb_point(), q in arb_point()) {
        // lasso segment tests only report boundary crossings
        prop_assume!(region.kind() != RegionKind::Polygon);
        if region.contains_point(p) {
            prop_assert!(region.intersects_segment((p, q)));
        }
    }

    #[test]
    fn lasso_winding_does_not_matter(
        vertices in prop::collection::vec(arb_point(), 3..12),
        points in prop::collection::vec(arb_point(), 1..32),
    ) {
        let mut reversed = vertices.clone();
        reversed.reverse();
        let fwd = Region::polygon(vertices).unwrap();
        let rev = Region::polygon(reversed).unwrap();
        prop_assert_eq!(fwd.contains_points(&points), rev.contains_points(&points));
    }
}

// =============================================================================
// Mask combinator
// =============================================================================

proptest! {
    #[test]
    fn combinator_algebra((current, inside) in (1usize..32).prop_flat_map(|n| (arb_mask(n), arb_mask(n)))) {
        let set = SelectionMode::Set.combine(&current, &inside);
        prop_assert_eq!(&set, &inside);

        let add = SelectionMode::Add.combine(&current, &inside);
        let sub = SelectionMode::Subtract.combine(&current, &inside);
        let and = SelectionMode::Intersect.combine(&current, &inside);
        for i in 0..current.len() {
            prop_assert!(!current[i] || add[i]);
            prop_assert!(!(sub[i] && inside[i]));
            prop_assert!(!and[i] || (current[i] && inside[i]));
        }

        let xor = SelectionMode::Xor.combine(&current, &inside);
        prop_assert_eq!(SelectionMode::Xor.combine(&xor, &inside), current);
    }
}

// =============================================================================
// Mesh pipeline
// =============================================================================

fn grid() -> MeshData {
    MeshData::grid(4, 3, 1.0)
        .unwrap()
        .with_matrix(Matrix4::new_translation(&vector![-2.0, -1.5, 0.0]))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn set_is_idempotent(region in arb_region(), cfg in arb_cfg()) {
        let mut once = grid();
        select_in_region(&mut once, &PlanarProjector, &region, SelectionMode::Set, &cfg).unwrap();
        let mut twice = once.clone();
        select_in_region(&mut twice, &PlanarProjector, &region, SelectionMode::Set, &cfg).unwrap();
        prop_assert_eq!(once.vertex_selected(), twice.vertex_selected());
        prop_assert_eq!(once.edge_selected(), twice.edge_selected());
        prop_assert_eq!(once.face_selected(), twice.face_selected());
    }

    #[test]
    fn hidden_vertices_stay_unselected(region in arb_region(), mode in arb_mode(), hide in 0usize..20) {
        let mut mesh = grid();
        mesh.set_vertex_hidden(hide, true);
        select_in_region(&mut mesh, &PlanarProjector, &region, mode, &SelectCfg::vertices()).unwrap();
        prop_assert!(!mesh.vertex_selected()[hide]);
    }

    #[test]
    fn face_lookups_agree(edges in arb_mask(31)) {
        let mesh = grid();
        prop_assume!(edges.len() == mesh.edge_count());
        let a = faces_linked_to_edges(&mesh, &edges, FaceLookup::Adjacency);
        let b = faces_linked_to_edges(&mesh, &edges, FaceLookup::LoopScan);
        prop_assert_eq!(a, b);
    }
}
