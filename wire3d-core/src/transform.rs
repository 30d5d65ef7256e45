/// Accumulated model rotation and its composition order
use nalgebra::{Point3, Rotation3, Vector3};

/// Rotation state around three axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Rotate by delta amounts (in radians). Deltas accumulate; repeating a
    /// rotation n times yields n times the angle.
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }

    /// Rotation matrix `Rx * Ry * Rz`: applied to a point, Z acts first,
    /// then Y, then X.
    pub fn matrix(&self) -> Rotation3<f32> {
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), self.x);
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), self.y);
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), self.z);

        rx * ry * rz
    }

    /// Rotate a point about the model-space origin
    pub fn apply(&self, point: &Point3<f32>) -> Point3<f32> {
        self.matrix() * point
    }
}
