/// Name-keyed registry of models, owned by the update loop
use std::collections::HashMap;

use nalgebra::{Point3, Vector3};

use crate::error::SceneError;
use crate::geometry::{Model, Rgb};

#[derive(Debug, Default)]
pub struct SceneRegistry {
    models: HashMap<String, Model>,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a model, replacing (and returning) any model of the same name
    pub fn insert(&mut self, name: impl Into<String>, model: Model) -> Option<Model> {
        let name = name.into();
        log::info!("model `{}` registered ({} points)", name, model.point_count());
        let replaced = self.models.insert(name.clone(), model);
        if replaced.is_some() {
            log::info!("model `{name}` replaced an earlier model of the same name");
        }
        replaced
    }

    pub fn get(&self, name: &str) -> Option<&Model> {
        self.models.get(name)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.models.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Call `f` with every point of `name`, rotated by the model's
    /// accumulated rotation, in stored order. Returns false if the model
    /// is absent.
    pub fn for_each_point<F>(&self, name: &str, mut f: F) -> bool
    where
        F: FnMut(&Point3<f32>, Option<Rgb>),
    {
        let Some(model) = self.models.get(name) else {
            return false;
        };

        let rotation = model.rotation();
        if rotation.is_zero() {
            for point in model.points() {
                f(&point.position, point.color);
            }
        } else {
            let matrix = rotation.matrix();
            for point in model.points() {
                f(&(matrix * point.position), point.color);
            }
        }
        true
    }

    /// Add deltas to a point cloud's accumulated angles
    pub fn rotate(&mut self, name: &str, dx: f32, dy: f32, dz: f32) -> Result<(), SceneError> {
        match self.models.get_mut(name) {
            Some(Model::PointCloud(cloud)) => {
                cloud.rotation.rotate(dx, dy, dz);
                Ok(())
            }
            Some(Model::Mesh(_)) => Err(SceneError::NotRotatable(name.to_string())),
            None => Err(SceneError::NotFound(name.to_string())),
        }
    }

    /// Move every point of the model in place
    pub fn translate(&mut self, name: &str, dx: f32, dy: f32, dz: f32) -> Result<(), SceneError> {
        let model = self
            .models
            .get_mut(name)
            .ok_or_else(|| SceneError::NotFound(name.to_string()))?;
        model.translate(Vector3::new(dx, dy, dz));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Mesh, PointCloud, ScenePoint};
    use std::f32::consts::FRAC_PI_2;

    fn registry() -> SceneRegistry {
        let mut registry = SceneRegistry::new();
        registry.insert(
            "line",
            PointCloud::new(vec![ScenePoint::new(1.0, 0.0, 0.0), ScenePoint::new(2.0, 0.0, 0.0)]).into(),
        );
        registry.insert("mesh", Mesh::default().into());
        registry
    }

    fn collect(registry: &SceneRegistry, name: &str) -> Vec<Point3<f32>> {
        let mut points = Vec::new();
        registry.for_each_point(name, |p, _| points.push(*p));
        points
    }

    #[test]
    fn test_insert_replaces() {
        let mut registry = registry();
        assert_eq!(registry.names(), vec!["line", "mesh"]);

        let replaced = registry.insert("line", PointCloud::default().into());
        assert_eq!(replaced.map(|m| m.point_count()), Some(2));
        assert_eq!(registry.len(), 2);
        assert!(collect(&registry, "line").is_empty());
    }

    #[test]
    fn test_for_each_point_applies_rotation() {
        let mut registry = registry();
        assert_eq!(collect(&registry, "line"), vec![Point3::new(1.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0)]);

        registry.rotate("line", 0.0, 0.0, FRAC_PI_2).unwrap();
        let rotated = collect(&registry, "line");
        assert!((rotated[1].y - 2.0).abs() < 1e-6);
        assert!(rotated[1].x.abs() < 1e-6);

        // Stored points are untouched.
        let stored: Vec<_> = registry.get("line").unwrap().points().map(|p| p.position).collect();
        assert_eq!(stored[1], Point3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_rotate_then_inverse_restores_angles() {
        let mut registry = registry();
        registry.rotate("line", 0.4, -1.2, 3.0).unwrap();
        registry.rotate("line", -0.4, 1.2, -3.0).unwrap();
        let rotation = registry.get("line").unwrap().rotation();
        assert!(rotation.x.abs() < 1e-6 && rotation.y.abs() < 1e-6 && rotation.z.abs() < 1e-6);
    }

    #[test]
    fn test_unknown_names_are_no_ops() {
        let mut registry = registry();
        assert_eq!(registry.rotate("ghost", 1.0, 0.0, 0.0), Err(SceneError::NotFound("ghost".into())));
        assert_eq!(registry.translate("ghost", 1.0, 0.0, 0.0), Err(SceneError::NotFound("ghost".into())));
        assert!(!registry.for_each_point("ghost", |_, _| unreachable!()));
        assert_eq!(registry.len(), 2);
        assert!(registry.get("line").unwrap().rotation().is_zero());
    }

    #[test]
    fn test_meshes_translate_but_do_not_rotate() {
        let mut registry = registry();
        assert_eq!(registry.rotate("mesh", 1.0, 0.0, 0.0), Err(SceneError::NotRotatable("mesh".into())));
        assert_eq!(registry.translate("mesh", 1.0, 0.0, 0.0), Ok(()));
    }

    #[test]
    fn test_translate_accumulates() {
        let mut registry = registry();
        registry.translate("line", 1.0, 2.0, 3.0).unwrap();
        registry.translate("line", 1.0, 2.0, 3.0).unwrap();
        assert_eq!(collect(&registry, "line")[0], Point3::new(3.0, 4.0, 6.0));
    }
}
