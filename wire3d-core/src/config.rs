/// Update-loop configuration
use std::time::Duration;

use crate::camera::Camera;
use crate::projection::DepthPolicy;

/// Default minimum interval between ticks
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq)]
pub struct LoopConfig {
    /// Minimum time between the start of two ticks
    pub tick_interval: Duration,
    pub depth: DepthPolicy,
    pub camera: Camera,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            depth: DepthPolicy::default(),
            camera: Camera::default(),
        }
    }
}
