/// JSON scene documents.
///
/// Two shapes are accepted:
///
/// ```json
/// { "name": "cube", "points": [ { "x": 0, "y": 0, "z": 0 } ] }
/// ```
///
/// and the structured mesh form keyed by `modelName`, with polygons made of
/// lines of fully coloured points.
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::LoadError;
use crate::geometry::{Line, Mesh, Model, PointCloud, Polygon, Rgb, ScenePoint};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SceneDocument {
    Mesh(MeshDocument),
    PointCloud(PointCloudDocument),
}

#[derive(Debug, Deserialize)]
struct PointCloudDocument {
    name: String,
    points: Vec<FlatPoint>,
}

#[derive(Debug, Deserialize)]
struct FlatPoint {
    x: f32,
    y: f32,
    z: f32,
    #[serde(default)]
    r: Option<u8>,
    #[serde(default)]
    g: Option<u8>,
    #[serde(default)]
    b: Option<u8>,
    #[serde(default = "one")]
    opacity: f32,
    #[serde(default = "one", rename = "lightIntensity")]
    light_intensity: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MeshDocument {
    model_name: String,
    cast_shadow: bool,
    polygons: Vec<PolygonDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PolygonDocument {
    roughness: f32,
    metallic: f32,
    light_target: String,
    light_type: String,
    lines: Vec<LineDocument>,
}

#[derive(Debug, Deserialize)]
struct LineDocument {
    points: Vec<MeshPoint>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MeshPoint {
    x: f32,
    y: f32,
    z: f32,
    r: u8,
    g: u8,
    b: u8,
    opacity: f32,
    light_intensity: f32,
}

fn one() -> f32 {
    1.0
}

impl From<FlatPoint> for ScenePoint {
    fn from(p: FlatPoint) -> Self {
        let color = match (p.r, p.g, p.b) {
            (None, None, None) => None,
            (r, g, b) => Some(Rgb::new(r.unwrap_or(0), g.unwrap_or(0), b.unwrap_or(0))),
        };
        ScenePoint {
            position: [p.x, p.y, p.z].into(),
            color,
            opacity: p.opacity.clamp(0.0, 1.0),
            light_intensity: p.light_intensity.clamp(0.0, 1.0),
        }
    }
}

impl From<MeshPoint> for ScenePoint {
    fn from(p: MeshPoint) -> Self {
        ScenePoint {
            position: [p.x, p.y, p.z].into(),
            color: Some(Rgb::new(p.r, p.g, p.b)),
            opacity: p.opacity.clamp(0.0, 1.0),
            light_intensity: p.light_intensity.clamp(0.0, 1.0),
        }
    }
}

impl From<PolygonDocument> for Polygon {
    fn from(doc: PolygonDocument) -> Self {
        Polygon {
            roughness: doc.roughness,
            metallic: doc.metallic,
            light_target: doc.light_target,
            light_type: doc.light_type,
            lines: doc
                .lines
                .into_iter()
                .map(|line| Line {
                    points: line.points.into_iter().map(ScenePoint::from).collect(),
                })
                .collect(),
        }
    }
}

/// Parse a scene document, returning the model and its registry name
pub fn load_model_str(json: &str) -> Result<(String, Model), LoadError> {
    let (name, model) = match serde_json::from_str::<SceneDocument>(json)? {
        SceneDocument::PointCloud(doc) => {
            let points = doc.points.into_iter().map(ScenePoint::from).collect();
            (doc.name, Model::PointCloud(PointCloud::new(points)))
        }
        SceneDocument::Mesh(doc) => {
            let mesh = Mesh {
                cast_shadow: doc.cast_shadow,
                polygons: doc.polygons.into_iter().map(Polygon::from).collect(),
            };
            (doc.model_name, Model::Mesh(mesh))
        }
    };

    if name.trim().is_empty() {
        return Err(LoadError::EmptyName);
    }
    log_summary(&name, &model);
    Ok((name, model))
}

/// Read and parse a scene file
pub fn load_model_file(path: impl AsRef<Path>) -> Result<(String, Model), LoadError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("loading scene file {}", path.display());
    load_model_str(&json)
}

fn log_summary(name: &str, model: &Model) {
    match model {
        Model::PointCloud(cloud) => {
            log::info!("model loaded: {name} ({} points)", cloud.points.len());
        }
        Model::Mesh(mesh) => {
            log::info!(
                "model loaded: {name}, shadows {}, {} polygons",
                if mesh.cast_shadow { "enabled" } else { "disabled" },
                mesh.polygons.len()
            );
            for (i, polygon) in mesh.polygons.iter().enumerate() {
                log::debug!(
                    "  polygon {i}: lines = {}, roughness = {}, metallic = {}, lightType = {}",
                    polygon.lines.len(),
                    polygon.roughness,
                    polygon.metallic,
                    polygon.light_type
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLAT: &str = r#"{
        "name": "tri",
        "points": [
            { "x": 0, "y": 0, "z": 10 },
            { "x": 1.5, "y": -2, "z": 10, "r": 255, "g": 128, "b": 0 }
        ]
    }"#;

    const MESH: &str = r#"{
        "modelName": "panel",
        "castShadow": true,
        "polygons": [{
            "roughness": 0.4,
            "metallic": 0.9,
            "lightTarget": "self",
            "lightType": "spot",
            "lines": [{
                "points": [
                    { "x": 0, "y": 0, "z": 5, "r": 1, "g": 2, "b": 3, "opacity": 0.5, "lightIntensity": 2.0 },
                    { "x": 1, "y": 0, "z": 5, "r": 1, "g": 2, "b": 3, "opacity": 1, "lightIntensity": 1 }
                ]
            }]
        }]
    }"#;

    #[test]
    fn test_flat_point_cloud() {
        let (name, model) = load_model_str(FLAT).unwrap();
        assert_eq!(name, "tri");
        let Model::PointCloud(cloud) = model else {
            panic!("expected a point cloud");
        };
        assert_eq!(cloud.points.len(), 2);
        assert_eq!(cloud.points[0].color, None);
        assert_eq!(cloud.points[1].color, Some(Rgb::new(255, 128, 0)));
        assert_eq!(cloud.points[1].position.x, 1.5);
        assert!(cloud.rotation.is_zero());
    }

    #[test]
    fn test_structured_mesh() {
        let (name, model) = load_model_str(MESH).unwrap();
        assert_eq!(name, "panel");
        let Model::Mesh(mesh) = model else {
            panic!("expected a mesh");
        };
        assert!(mesh.cast_shadow);
        assert_eq!(mesh.polygons[0].light_type, "spot");
        let first = mesh.points().next().unwrap();
        assert_eq!(first.color, Some(Rgb::new(1, 2, 3)));
        assert_eq!(first.opacity, 0.5);
        assert_eq!(first.light_intensity, 1.0);
    }

    #[test]
    fn test_malformed_documents() {
        assert!(matches!(load_model_str("{"), Err(LoadError::Parse(_))));
        assert!(matches!(load_model_str(r#"{ "name": "x" }"#), Err(LoadError::Parse(_))));
        assert!(matches!(load_model_str(r#"{ "name": " ", "points": [] }"#), Err(LoadError::EmptyName)));
    }

    #[test]
    fn test_missing_file() {
        let missing = std::env::temp_dir().join("wire3d-no-such-scene.json");
        assert!(matches!(load_model_file(&missing), Err(LoadError::Open { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("wire3d-loader-{}.json", std::process::id()));
        fs::write(&path, FLAT).unwrap();
        let loaded = load_model_file(&path);
        let _ = fs::remove_file(&path);
        assert_eq!(loaded.unwrap().0, "tri");
    }
}
