use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use regionsel::api::{
    select_in_region, select_objects_in_region, MeshData, MeshSource, ObjectGeometry,
    SceneObject, SelectionSummary,
};

mod provenance;
mod scene;

use provenance::Payload;
use scene::{matrix_from_rows, MeshScene, ObjectScene};

#[derive(Parser)]
#[command(name = "regionsel")]
#[command(about = "Screen-space region selection over JSON scenes", version)]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Select mesh elements inside a region and write the new selection
    Mesh {
        #[arg(long)]
        scene: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Select whole objects inside a region and write the new selection
    Objects {
        #[arg(long)]
        scene: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print version and provenance JSON
    Report,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Mesh { scene, out } => run_mesh(&scene, &out),
        Action::Objects { scene, out } => run_objects(&scene, &out),
        Action::Report => report(),
    }
}

fn indices(mask: &[bool]) -> Vec<usize> {
    mask.iter()
        .enumerate()
        .filter_map(|(i, &b)| b.then_some(i))
        .collect()
}

fn write_json(out: &Path, value: &serde_json::Value) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    std::fs::write(out, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", out.display()))
}

fn mesh_output(mesh: &MeshData, summary: &SelectionSummary) -> serde_json::Value {
    let edges: Vec<[u32; 2]> = indices(mesh.edge_selected())
        .into_iter()
        .map(|e| mesh.edge_vertices()[e])
        .collect();
    json!({
        "summary": summary,
        "selected_vertices": indices(mesh.vertex_selected()),
        "selected_edges": edges,
        "selected_faces": indices(mesh.face_selected()),
    })
}

fn run_mesh(scene_path: &Path, out: &Path) -> Result<()> {
    let scene: MeshScene = scene::load(scene_path)?;
    let projector = scene.camera.build();
    let region = scene.region.build()?;
    let mut mesh = scene.mesh.build()?;
    tracing::info!(
        scene = %scene_path.display(),
        region = region.kind().as_str(),
        mode = scene.mode.as_str(),
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "mesh"
    );
    let summary = select_in_region(&mut mesh, &projector, &region, scene.mode, &scene.cfg)
        .context("mesh selection failed")?;
    write_json(out, &mesh_output(&mesh, &summary))?;
    provenance::write_sidecar(
        out,
        Payload::new(
            "mesh",
            json!({
                "scene": scene_path.to_string_lossy(),
                "region": region.kind().as_str(),
                "mode": scene.mode,
                "cfg": scene.cfg,
            }),
        ),
    )?;
    Ok(())
}

fn run_objects(scene_path: &Path, out: &Path) -> Result<()> {
    let scene: ObjectScene = scene::load(scene_path)?;
    let projector = scene.camera.build();
    let region = scene.region.build()?;
    let meshes = scene
        .objects
        .iter()
        .map(|o| {
            let Some(dto) = &o.mesh else {
                return Ok(None);
            };
            let mut mesh = dto
                .build()
                .with_context(|| format!("object {}", o.name))?;
            if o.matrix.is_some() {
                mesh.set_matrix(matrix_from_rows(&o.matrix));
            }
            Ok(Some(mesh))
        })
        .collect::<Result<Vec<Option<MeshData>>>>()?;
    let mut objects: Vec<SceneObject<'_>> = scene
        .objects
        .iter()
        .zip(&meshes)
        .map(|(o, mesh)| {
            let geometry = match mesh {
                Some(m) => ObjectGeometry::Mesh(m),
                None => ObjectGeometry::OriginOnly {
                    local_to_world: matrix_from_rows(&o.matrix),
                },
            };
            SceneObject {
                name: o.name.clone(),
                geometry,
                hidden: o.hidden,
                selected: o.selected,
            }
        })
        .collect();
    tracing::info!(
        scene = %scene_path.display(),
        region = region.kind().as_str(),
        objects = objects.len(),
        behavior = ?scene.behavior,
        "objects"
    );
    let hits = select_objects_in_region(
        &mut objects,
        &projector,
        &region,
        scene.mode,
        scene.behavior,
    )
    .context("object selection failed")?;
    let selected: Vec<&str> = objects
        .iter()
        .filter(|o| o.selected)
        .map(|o| o.name.as_str())
        .collect();
    write_json(out, &json!({ "hits": hits, "selected": selected }))?;
    provenance::write_sidecar(
        out,
        Payload::new(
            "objects",
            json!({
                "scene": scene_path.to_string_lossy(),
                "region": region.kind().as_str(),
                "mode": scene.mode,
                "behavior": scene.behavior,
            }),
        ),
    )?;
    Ok(())
}

fn report() -> Result<()> {
    let doc = provenance::document(&Payload::new("report", json!({})), &[]);
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::tempdir;

    fn read(path: &Path) -> Value {
        serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap()
    }

    #[test]
    fn mesh_command_writes_selection_and_sidecar() {
        let dir = tempdir().unwrap();
        let scene = dir.path().join("scene.json");
        let out = dir.path().join("out").join("sel.json");
        let doc = json!({
            "region": {"rect": {"xmin": -0.5, "xmax": 1.5, "ymin": -0.5, "ymax": 0.5}},
            "mode": "set",
            "cfg": {"modes": {"vertex": true}},
            "mesh": {
                "coords": [[0, 0, 0], [1, 0, 0], [2, 0, 0], [0, 1, 0], [1, 1, 0], [2, 1, 0]],
                "faces": [[0, 1, 4, 3], [1, 2, 5, 4]]
            }
        });
        std::fs::write(&scene, serde_json::to_vec(&doc).unwrap()).unwrap();
        run_mesh(&scene, &out).unwrap();

        let result = read(&out);
        assert_eq!(result["selected_vertices"], json!([0, 1]));
        assert_eq!(result["selected_edges"], json!([[0, 1]]));
        assert_eq!(result["selected_faces"], json!([]));
        assert_eq!(result["summary"]["vertices_inside"], 2);

        let prov = read(&dir.path().join("out").join("sel.provenance.json"));
        assert_eq!(prov["command"], "mesh");
        assert_eq!(prov["params"]["region"], "rect");
    }

    fn run_scene(dir: &Path, doc: &Value) -> Value {
        let scene = dir.join("scene.json");
        let out = dir.join("sel.json");
        std::fs::write(&scene, serde_json::to_vec(doc).unwrap()).unwrap();
        run_mesh(&scene, &out).unwrap();
        read(&out)
    }

    #[test]
    fn face_only_lasso_inside_single_quad() {
        let dir = tempdir().unwrap();
        let result = run_scene(
            dir.path(),
            &json!({
                "region": {"polygon": [[4.0, 4.0], [6.0, 4.0], [5.0, 6.0]]},
                "cfg": {"modes": {"face": true}, "select_all_faces": true},
                "mesh": {
                    "coords": [[0, 0, 0], [10, 0, 0], [10, 10, 0], [0, 10, 0]],
                    "faces": [[0, 1, 2, 3]]
                }
            }),
        );
        assert_eq!(result["summary"]["vertices_inside"], 0);
        assert_eq!(result["summary"]["faces_inside"], 1);
        assert_eq!(result["selected_faces"], json!([0]));
        assert_eq!(result["selected_vertices"], json!([0, 1, 2, 3]));
    }

    #[test]
    fn edge_mode_add_keeps_existing_edges() {
        let dir = tempdir().unwrap();
        let result = run_scene(
            dir.path(),
            &json!({
                "region": {"rect": {"xmin": -0.5, "xmax": 1.5, "ymin": -0.5, "ymax": 0.5}},
                "mode": "add",
                "cfg": {"modes": {"edge": true}},
                "mesh": {
                    "coords": [[0, 0, 0], [1, 0, 0], [2, 0, 0], [0, 1, 0], [1, 1, 0], [2, 1, 0]],
                    "faces": [[0, 1, 4, 3], [1, 2, 5, 4]],
                    "selected_edges": [[5, 2]]
                }
            }),
        );
        assert_eq!(result["selected_edges"], json!([[0, 1], [2, 5]]));
        assert_eq!(result["selected_vertices"], json!([0, 1, 2, 5]));
        assert_eq!(result["selected_faces"], json!([]));
    }

    #[test]
    fn objects_command_mixes_mesh_and_origin_only() {
        let dir = tempdir().unwrap();
        let scene = dir.path().join("scene.json");
        let out = dir.path().join("objs.json");
        let translate = |x: f32, y: f32| {
            json!([[1, 0, 0, x], [0, 1, 0, y], [0, 0, 1, 0], [0, 0, 0, 1]])
        };
        let doc = json!({
            "region": {"circle": {"center": [0.0, 0.0], "radius": 3.0}},
            "mode": "add",
            "behavior": "overlap",
            "objects": [
                {
                    "name": "quad",
                    "matrix": translate(2.5, -0.5),
                    "mesh": {
                        "coords": [[0, 0, 0], [1, 0, 0], [1, 1, 0], [0, 1, 0]],
                        "faces": [[0, 1, 2, 3]]
                    }
                },
                {"name": "lamp", "matrix": translate(10.0, 0.0)},
                {"name": "kept", "matrix": translate(10.0, 0.0), "selected": true},
                {"name": "ghost", "matrix": translate(0.0, 0.0), "hidden": true}
            ]
        });
        std::fs::write(&scene, serde_json::to_vec(&doc).unwrap()).unwrap();
        run_objects(&scene, &out).unwrap();

        let result = read(&out);
        assert_eq!(result["hits"], 1);
        assert_eq!(result["selected"], json!(["quad", "kept"]));
        assert!(dir.path().join("objs.provenance.json").exists());
    }

    #[test]
    fn missing_scene_reports_path() {
        let dir = tempdir().unwrap();
        let err = run_mesh(&dir.path().join("nope.json"), &dir.path().join("o.json")).unwrap_err();
        assert!(format!("{err:#}").contains("nope.json"));
    }
}
