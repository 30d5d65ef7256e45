use clap::{Parser, ValueEnum};
use nalgebra::Point3;
use std::path::PathBuf;
use std::time::Duration;
use wire3d_core::{Camera, DepthPolicy, LegacyAngles, LoopConfig, Viewport};

/// Where frames are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SinkKind {
    /// Character cells of the current terminal
    Terminal,
    /// One text line per plotted pixel on stdout
    Text,
}

/// Handling of points at or behind the camera's near epsilon
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DepthMode {
    Skip,
    Clamp,
}

/// `wire3d` - wireframe projection of 3D point models, driven by typed
/// commands.
///
/// Commands, one per line on stdin:
///   rotate <model> [rx ry rz]      add to the model's rotation (radians)
///   translate <model> [dx dy dz]   move every point (`draw` is an alias)
///   quit
#[derive(Parser, Debug)]
#[command(version, about, long_about, verbatim_doc_comment)]
pub struct Config {
    /// JSON scene files to load at startup.
    pub scenes: Vec<PathBuf>,

    /// Register a demo point-cloud cube named `cube`.
    #[arg(long)]
    pub demo_cube: bool,

    #[arg(long, value_enum, default_value_t = SinkKind::Terminal)]
    pub sink: SinkKind,

    /// Viewport width for the text sink, in pixels.
    #[arg(long, default_value_t = 640)]
    pub width: u32,

    /// Viewport height for the text sink, in pixels.
    #[arg(long, default_value_t = 480)]
    pub height: u32,

    /// Minimum interval between update ticks, in milliseconds.
    #[arg(long, default_value_t = 500)]
    pub tick_ms: u64,

    /// Lens focal length in millimetres.
    #[arg(long, default_value_t = 50.0)]
    pub focal_length: f32,

    /// Display resolution in dots per inch.
    #[arg(long, default_value_t = 96.0)]
    pub dpi: f32,

    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub camera_x: f32,

    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub camera_y: f32,

    #[arg(long, default_value_t = -300.0, allow_negative_numbers = true)]
    pub camera_z: f32,

    /// Horizontal viewing angle in degrees.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub yaw_deg: f32,

    /// Vertical viewing angle in degrees.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub pitch_deg: f32,

    #[arg(long, value_enum, default_value_t = DepthMode::Skip)]
    pub depth_policy: DepthMode,

    /// Minimum camera-space depth, in scene units.
    #[arg(long, default_value_t = wire3d_core::projection::DEFAULT_EPSILON)]
    pub epsilon: f32,
}

impl Config {
    pub fn loop_config(&self) -> LoopConfig {
        let (yaw, pitch) = LegacyAngles {
            horizontal_deg: self.yaw_deg,
            vertical_deg: self.pitch_deg,
        }
        .to_yaw_pitch();

        let camera = Camera::new(Point3::new(self.camera_x, self.camera_y, self.camera_z))
            .with_focal_length(self.focal_length)
            .with_dpi(self.dpi)
            .with_orientation(yaw, pitch);

        let depth = match self.depth_policy {
            DepthMode::Skip => DepthPolicy::Skip { epsilon: self.epsilon },
            DepthMode::Clamp => DepthPolicy::Clamp { epsilon: self.epsilon },
        };

        LoopConfig {
            tick_interval: Duration::from_millis(self.tick_ms),
            depth,
            camera,
        }
    }

    pub fn text_viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }
}
