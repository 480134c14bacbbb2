//! Criterion benches for the mesh and object pipelines (group "pipeline").
//!
//! A 200×200 grid (40k faces) under a planar projection, selected with a
//! lasso covering roughly a quarter of it. Each iteration starts from a fresh
//! clone so Set/Add runs are comparable.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use nalgebra::{vector, Matrix4};
use regionsel::api::*;

fn grid() -> MeshData {
    MeshData::grid(200, 200, 1.0).unwrap()
}

fn lasso() -> Region {
    Region::polygon(vec![
        vector![10.0, 10.0],
        vector![110.0, 20.0],
        vector![90.0, 60.0],
        vector![115.0, 105.0],
        vector![15.0, 95.0],
    ])
    .unwrap()
}

fn bench_mesh(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let mesh = grid();
    let region = lasso();
    let cfgs = [
        ("vertex", SelectCfg::vertices()),
        ("edge_all", SelectCfg { select_all_edges: true, ..SelectCfg::edges() }),
        ("face_center", SelectCfg::faces()),
        ("face_all", SelectCfg { select_all_faces: true, ..SelectCfg::faces() }),
    ];
    for (name, cfg) in cfgs {
        group.bench_function(BenchmarkId::new("select_in_region", name), |b| {
            b.iter_batched(
                || mesh.clone(),
                |mut m| select_in_region(&mut m, &PlanarProjector, &region, SelectionMode::Set, &cfg),
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_face_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let mesh = grid();
    let sparse: Vec<bool> = (0..mesh.edge_count()).map(|e| e % 97 == 0).collect();
    for lookup in [FaceLookup::Adjacency, FaceLookup::LoopScan] {
        group.bench_function(BenchmarkId::new("faces_linked_to_edges", format!("{lookup:?}")), |b| {
            b.iter(|| faces_linked_to_edges(&mesh, &sparse, lookup))
        });
    }
    group.finish();
}

fn bench_objects(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let meshes: Vec<MeshData> = (0..64)
        .map(|i| {
            let at = vector![(i % 8) as f32 * 20.0, (i / 8) as f32 * 20.0, 0.0];
            MeshData::grid(10, 10, 1.0)
                .unwrap()
                .with_matrix(Matrix4::new_translation(&at))
        })
        .collect();
    let region = lasso();
    for behavior in [ObjectBehavior::Origin, ObjectBehavior::Contain, ObjectBehavior::Overlap] {
        group.bench_function(BenchmarkId::new("select_objects", format!("{behavior:?}")), |b| {
            b.iter_batched(
                || {
                    meshes
                        .iter()
                        .enumerate()
                        .map(|(i, m)| SceneObject::new(format!("obj{i}"), ObjectGeometry::Mesh(m)))
                        .collect::<Vec<_>>()
                },
                |mut objs| {
                    select_objects_in_region(
                        &mut objs,
                        &PlanarProjector,
                        &region,
                        ObjectSelectionMode::Set,
                        behavior,
                    )
                    .unwrap()
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_mesh, bench_face_lookup, bench_objects);
criterion_main!(benches);
