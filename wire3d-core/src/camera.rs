/// Camera and lens model
use nalgebra::{Point3, Rotation3, Vector3};

/// Millimetres per inch, for converting screen DPI to pixels per millimetre
pub const MM_PER_INCH: f32 = 25.4;

/// Physical sensor size in millimetres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorSize {
    pub width_mm: f32,
    pub height_mm: f32,
}

impl SensorSize {
    /// 35mm full-frame sensor
    pub const FULL_FRAME: SensorSize = SensorSize {
        width_mm: 36.0,
        height_mm: 24.0,
    };
}

/// Camera configuration for wireframe projection.
///
/// The camera looks down its local +Z axis with +Y up. Orientation is
/// yaw about +Y followed by pitch about +X; `roll` is stored for
/// completeness but does not take part in projection.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
    pub focal_length_mm: f32,
    pub sensor: Option<SensorSize>,
    pub dpi: f32,
}

impl Camera {
    pub fn new(position: Point3<f32>) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
            focal_length_mm: 50.0, // Roughly the human eye
            sensor: None,
            dpi: 96.0,
        }
    }

    pub fn with_focal_length(mut self, focal_length_mm: f32) -> Self {
        self.focal_length_mm = focal_length_mm;
        self
    }

    pub fn with_dpi(mut self, dpi: f32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_orientation(mut self, yaw: f32, pitch: f32) -> Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self
    }

    pub fn with_sensor(mut self, sensor: SensorSize) -> Self {
        self.sensor = Some(sensor);
        self
    }

    pub fn pixels_per_mm(&self) -> f32 {
        self.dpi / MM_PER_INCH
    }

    /// Pixels per unit of normalized image-plane coordinate (`x / z`).
    pub fn scale(&self) -> f32 {
        self.pixels_per_mm() * self.focal_length_mm
    }

    /// Apply a display DPI change. Returns false, leaving the camera
    /// untouched, for a non-positive or non-finite value.
    pub fn set_dpi(&mut self, dpi: f32) -> bool {
        if !dpi.is_finite() || dpi <= 0.0 {
            log::warn!("ignoring invalid DPI {dpi}");
            return false;
        }
        log::debug!("DPI {} -> {}, scale {:.3}", self.dpi, dpi, dpi / MM_PER_INCH * self.focal_length_mm);
        self.dpi = dpi;
        true
    }

    /// Horizontal and vertical field of view in degrees, if a sensor size
    /// is configured
    pub fn field_of_view_degrees(&self) -> Option<(f32, f32)> {
        let sensor = self.sensor?;
        let fov = |extent: f32| (2.0 * (extent / (2.0 * self.focal_length_mm)).atan()).to_degrees();
        Some((fov(sensor.width_mm), fov(sensor.height_mm)))
    }

    /// Camera orientation in world space
    pub fn orientation(&self) -> Rotation3<f32> {
        let yaw = Rotation3::from_axis_angle(&Vector3::y_axis(), self.yaw);
        let pitch = Rotation3::from_axis_angle(&Vector3::x_axis(), self.pitch);
        yaw * pitch
    }

    /// Rotation taking world-space offsets into camera space
    pub fn view_rotation(&self) -> Rotation3<f32> {
        self.orientation().inverse()
    }

    /// Offset of `point` from the camera, expressed in camera space
    pub fn to_camera_space(&self, point: &Point3<f32>) -> Vector3<f32> {
        self.view_rotation() * (point - self.position)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Point3::origin())
    }
}

/// Horizontal/vertical viewing angles in degrees, the alternative camera
/// convention accepted at configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LegacyAngles {
    pub horizontal_deg: f32,
    pub vertical_deg: f32,
}

impl LegacyAngles {
    /// `(yaw, pitch)` in radians
    pub fn to_yaw_pitch(self) -> (f32, f32) {
        (self.horizontal_deg.to_radians(), self.vertical_deg.to_radians())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::default();
        assert_eq!(camera.position, Point3::origin());
        assert_eq!(camera.focal_length_mm, 50.0);
        assert_eq!(camera.dpi, 96.0);
        assert!(camera.field_of_view_degrees().is_none());
    }

    #[test]
    fn test_scale_formula() {
        let camera = Camera::default();
        let expected = 96.0 / 25.4 * 50.0;
        assert!((camera.scale() - expected).abs() < 1e-4);
        // dpi / 2.54 * f / 10 is the same number
        assert!((camera.scale() - 96.0 / 2.54 * 50.0 / 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_set_dpi() {
        let mut camera = Camera::default();
        assert!(camera.set_dpi(144.0));
        assert_eq!(camera.dpi, 144.0);
        assert!(!camera.set_dpi(0.0));
        assert!(!camera.set_dpi(f32::NAN));
        assert_eq!(camera.dpi, 144.0);
    }

    #[test]
    fn test_field_of_view_from_sensor() {
        let camera = Camera::default().with_sensor(SensorSize::FULL_FRAME);
        let (h, v) = camera.field_of_view_degrees().unwrap_or_default();
        assert!((h - 39.5978).abs() < 1e-2);
        assert!((v - 26.9915).abs() < 1e-2);
    }

    #[test]
    fn test_view_rotation_undoes_yaw() {
        let (yaw, pitch) = LegacyAngles {
            horizontal_deg: 90.0,
            vertical_deg: 0.0,
        }
        .to_yaw_pitch();
        let camera = Camera::default().with_orientation(yaw, pitch);

        // Yawed a quarter turn, the camera looks down world +X.
        let ahead = camera.to_camera_space(&Point3::new(10.0, 0.0, 0.0));
        assert!(ahead.x.abs() < 1e-4);
        assert!((ahead.z - 10.0).abs() < 1e-4);
    }
}
