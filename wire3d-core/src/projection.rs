/// Perspective projection from world space to pixel coordinates
use nalgebra::{Point3, Vector3};

use crate::camera::Camera;
use crate::transform::RotationState;

/// Default minimum camera-space depth, in scene units
pub const DEFAULT_EPSILON: f32 = 0.01;

/// What to do with points at or behind the near epsilon
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DepthPolicy {
    /// Declare the point not visible
    Skip { epsilon: f32 },
    /// Project the point as if its depth were `epsilon`
    Clamp { epsilon: f32 },
}

impl DepthPolicy {
    pub fn epsilon(&self) -> f32 {
        match *self {
            DepthPolicy::Skip { epsilon } | DepthPolicy::Clamp { epsilon } => epsilon,
        }
    }
}

impl Default for DepthPolicy {
    fn default() -> Self {
        DepthPolicy::Skip {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

/// Drawable area, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, pixel: PixelCoord) -> bool {
        pixel.x >= 0 && pixel.y >= 0 && (pixel.x as u32) < self.width && (pixel.y as u32) < self.height
    }
}

/// Point on the image plane, in millimetres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePoint {
    pub x_mm: f32,
    pub y_mm: f32,
}

/// Integer pixel position; rows grow downwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelCoord {
    pub x: i32,
    pub y: i32,
}

/// Stateless projection pipeline parameterized by a depth policy.
///
/// world point -> model rotation -> camera-relative offset -> camera
/// inverse orientation -> depth policy -> perspective division -> pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Projector {
    pub depth: DepthPolicy,
}

impl Projector {
    pub fn new(depth: DepthPolicy) -> Self {
        let epsilon = depth.epsilon();
        if !(0.01..=0.1).contains(&epsilon) {
            log::warn!("depth epsilon {epsilon} is outside the usual 0.01..=0.1 range");
        }
        Self { depth }
    }

    /// Model rotation then view transform
    pub fn camera_space(
        &self,
        point: &Point3<f32>,
        rotation: &RotationState,
        camera: &Camera,
    ) -> Vector3<f32> {
        camera.to_camera_space(&rotation.apply(point))
    }

    /// Perspective division onto the image plane, or `None` when the
    /// point is not visible under the depth policy
    pub fn image_plane(&self, camera_point: &Vector3<f32>, camera: &Camera) -> Option<ImagePoint> {
        let (x, y, z) = self.divide(camera_point)?;
        let f = camera.focal_length_mm;
        Some(ImagePoint {
            x_mm: f * x / z,
            y_mm: f * y / z,
        })
    }

    /// Map an image-plane point to pixels, centred on the viewport
    pub fn to_pixel(&self, image: ImagePoint, camera: &Camera, viewport: Viewport) -> Option<PixelCoord> {
        let ppmm = camera.pixels_per_mm();
        Self::center(image.x_mm * ppmm, -image.y_mm * ppmm, viewport)
    }

    /// Full pipeline for a point stored in model space
    pub fn project(
        &self,
        point: &Point3<f32>,
        rotation: &RotationState,
        camera: &Camera,
        viewport: Viewport,
    ) -> Option<PixelCoord> {
        self.project_world(&rotation.apply(point), camera, viewport)
    }

    /// Pipeline for a point whose model rotation is already applied
    pub fn project_world(&self, point: &Point3<f32>, camera: &Camera, viewport: Viewport) -> Option<PixelCoord> {
        let (x, y, z) = self.divide(&camera.to_camera_space(point))?;
        let scale = camera.scale();
        Self::center(x / z * scale, -y / z * scale, viewport)
    }

    /// Camera-space components with the depth policy applied
    fn divide(&self, p: &Vector3<f32>) -> Option<(f32, f32, f32)> {
        if !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()) {
            return None;
        }
        let z = match self.depth {
            DepthPolicy::Skip { epsilon } if p.z <= epsilon => return None,
            DepthPolicy::Clamp { epsilon } if p.z <= epsilon => epsilon,
            _ => p.z,
        };
        if z <= 0.0 {
            return None;
        }
        Some((p.x, p.y, z))
    }

    /// Offsets beyond the `i32` pixel range are not visible
    fn center(dx: f32, dy: f32, viewport: Viewport) -> Option<PixelCoord> {
        Some(PixelCoord {
            x: Self::offset(dx, viewport.width)?,
            y: Self::offset(dy, viewport.height)?,
        })
    }

    fn offset(delta: f32, extent: u32) -> Option<i32> {
        let delta = delta.round();
        if !delta.is_finite() || delta.abs() > i32::MAX as f32 {
            return None;
        }
        i32::try_from(delta as i64 + i64::from(extent / 2)).ok()
    }
}
