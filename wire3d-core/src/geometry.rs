/// Scene geometry: points, point clouds and structured meshes
use nalgebra::{Point3, Vector3};

use crate::transform::RotationState;

/// 24-bit colour carried by a point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A world-space point with optional colour and material data.
///
/// `opacity` and `light_intensity` are carried for completeness; nothing
/// in the projection pipeline evaluates them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenePoint {
    pub position: Point3<f32>,
    pub color: Option<Rgb>,
    pub opacity: f32,
    pub light_intensity: f32,
}

impl ScenePoint {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
            color: None,
            opacity: 1.0,
            light_intensity: 1.0,
        }
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }
}

/// Flat point cloud with its accumulated rotation.
///
/// The rotation is applied at projection time and never baked into the
/// stored points.
#[derive(Debug, Clone, Default)]
pub struct PointCloud {
    pub points: Vec<ScenePoint>,
    pub rotation: RotationState,
}

impl PointCloud {
    pub fn new(points: Vec<ScenePoint>) -> Self {
        Self {
            points,
            rotation: RotationState::zero(),
        }
    }

    /// Wireframe cube centred on the origin: corners plus evenly spaced
    /// samples along each of the twelve edges.
    pub fn cube(size: f32) -> Self {
        const SAMPLES_PER_EDGE: usize = 8;

        let half = size / 2.0;
        let corners = [
            Point3::new(-half, -half, -half),
            Point3::new(half, -half, -half),
            Point3::new(half, half, -half),
            Point3::new(-half, half, -half),
            Point3::new(-half, -half, half),
            Point3::new(half, -half, half),
            Point3::new(half, half, half),
            Point3::new(-half, half, half),
        ];
        let edges = [
            // Back face
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 0),
            // Front face
            (4, 5),
            (5, 6),
            (6, 7),
            (7, 4),
            // Connecting edges
            (0, 4),
            (1, 5),
            (2, 6),
            (3, 7),
        ];

        let mut points: Vec<ScenePoint> = corners
            .iter()
            .map(|c| ScenePoint::new(c.x, c.y, c.z))
            .collect();

        for (a, b) in edges {
            let start = corners[a];
            let step = (corners[b] - start) / (SAMPLES_PER_EDGE + 1) as f32;
            for i in 1..=SAMPLES_PER_EDGE {
                let p = start + step * i as f32;
                points.push(ScenePoint::new(p.x, p.y, p.z));
            }
        }

        Self::new(points)
    }
}

/// A polyline of coloured points
#[derive(Debug, Clone, Default)]
pub struct Line {
    pub points: Vec<ScenePoint>,
}

/// A polygon outline with (unevaluated) material parameters
#[derive(Debug, Clone, Default)]
pub struct Polygon {
    pub roughness: f32,
    pub metallic: f32,
    pub light_target: String,
    pub light_type: String,
    pub lines: Vec<Line>,
}

/// Structured mesh as produced by the scene loader
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub cast_shadow: bool,
    pub polygons: Vec<Polygon>,
}

impl Mesh {
    pub fn points(&self) -> impl Iterator<Item = &ScenePoint> {
        self.polygons
            .iter()
            .flat_map(|polygon| polygon.lines.iter())
            .flat_map(|line| line.points.iter())
    }

    fn points_mut(&mut self) -> impl Iterator<Item = &mut ScenePoint> {
        self.polygons
            .iter_mut()
            .flat_map(|polygon| polygon.lines.iter_mut())
            .flat_map(|line| line.points.iter_mut())
    }
}

/// The two model shapes sharing the scene registry
#[derive(Debug, Clone)]
pub enum Model {
    PointCloud(PointCloud),
    Mesh(Mesh),
}

impl Model {
    pub fn point_count(&self) -> usize {
        match self {
            Model::PointCloud(cloud) => cloud.points.len(),
            Model::Mesh(mesh) => mesh.points().count(),
        }
    }

    /// Accumulated rotation. Meshes are never rotated and report zero.
    pub fn rotation(&self) -> RotationState {
        match self {
            Model::PointCloud(cloud) => cloud.rotation,
            Model::Mesh(_) => RotationState::zero(),
        }
    }

    /// Move every point by `delta`, permanently
    pub fn translate(&mut self, delta: Vector3<f32>) {
        match self {
            Model::PointCloud(cloud) => {
                for point in &mut cloud.points {
                    point.position += delta;
                }
            }
            Model::Mesh(mesh) => {
                for point in mesh.points_mut() {
                    point.position += delta;
                }
            }
        }
    }

    /// Stored points in insertion order, before rotation
    pub fn points(&self) -> Box<dyn Iterator<Item = &ScenePoint> + '_> {
        match self {
            Model::PointCloud(cloud) => Box::new(cloud.points.iter()),
            Model::Mesh(mesh) => Box::new(mesh.points()),
        }
    }
}

impl From<PointCloud> for Model {
    fn from(cloud: PointCloud) -> Self {
        Model::PointCloud(cloud)
    }
}

impl From<Mesh> for Model {
    fn from(mesh: Mesh) -> Self {
        Model::Mesh(mesh)
    }
}
