/// wire3d core library - camera projection and the scene update loop
///
/// Everything here is platform independent: pixels leave through the
/// `DrawSink` trait, commands arrive through a `CommandMailbox`.

pub mod camera;
pub mod command;
pub mod config;
pub mod error;
pub mod geometry;
pub mod loader;
pub mod mailbox;
pub mod projection;
pub mod scene;
pub mod sink;
pub mod transform;
pub mod update;

// Re-export commonly used types
pub use camera::{Camera, LegacyAngles, SensorSize};
pub use command::{parse_line, Command, Input, Verb};
pub use config::LoopConfig;
pub use error::{CommandError, LoadError, MailboxError, SceneError, SinkError};
pub use geometry::{Mesh, Model, PointCloud, Rgb, ScenePoint};
pub use mailbox::{CommandMailbox, Mailbox};
pub use projection::{DepthPolicy, PixelCoord, Projector, Viewport};
pub use scene::SceneRegistry;
pub use sink::{DrawSink, RecordingSink};
pub use transform::RotationState;
pub use update::{LoopState, TickOutcome, UpdateLoop};
