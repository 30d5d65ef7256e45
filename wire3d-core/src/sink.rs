/// Draw sink capability implemented by each platform layer.
use crate::error::SinkError;
use crate::geometry::Rgb;
use crate::projection::{PixelCoord, Viewport};

/// A pixel surface the update loop renders into.
///
/// A frame is `begin_frame`, any number of `plot_pixel` calls, then
/// `end_frame`. The sink clips coordinates outside its surface.
///
/// When `plot_pixel` fails the caller abandons the frame and never calls
/// `end_frame` for it. The next `begin_frame` must start clean and discard
/// whatever the abandoned frame plotted.
pub trait DrawSink {
    /// Clear the surface and report its current size.
    fn begin_frame(&mut self) -> Result<Viewport, SinkError>;

    fn plot_pixel(&mut self, x: i32, y: i32, color: Option<Rgb>) -> Result<(), SinkError>;

    /// Present the frame.
    fn end_frame(&mut self) -> Result<(), SinkError>;

    /// Release platform drawing resources at shutdown.
    fn release(&mut self) {}
}

/// A plotted pixel as seen by a sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plot {
    pub pixel: PixelCoord,
    pub color: Option<Rgb>,
}

/// In-memory sink that records every completed frame.
///
/// Can be told to fail after a number of plots to simulate losing the
/// drawing surface mid-frame.
#[derive(Debug)]
pub struct RecordingSink {
    pub viewport: Viewport,
    pub frames: Vec<Vec<Plot>>,
    pub released: bool,
    current: Option<Vec<Plot>>,
    fail_after: Option<usize>,
}

impl RecordingSink {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            frames: Vec::new(),
            released: false,
            current: None,
            fail_after: None,
        }
    }

    /// Fail the plot call after `plots` successful plots in a frame
    pub fn fail_after(mut self, plots: usize) -> Self {
        self.fail_after = Some(plots);
        self
    }

    pub fn last_frame(&self) -> Option<&[Plot]> {
        self.frames.last().map(Vec::as_slice)
    }

    /// True while a frame has begun but not ended
    pub fn frame_open(&self) -> bool {
        self.current.is_some()
    }
}

impl DrawSink for RecordingSink {
    fn begin_frame(&mut self) -> Result<Viewport, SinkError> {
        if self.current.is_some() {
            log::debug!("discarding a frame that was never ended");
        }
        self.current = Some(Vec::new());
        Ok(self.viewport)
    }

    fn plot_pixel(&mut self, x: i32, y: i32, color: Option<Rgb>) -> Result<(), SinkError> {
        let frame = self
            .current
            .as_mut()
            .ok_or_else(|| SinkError::Lost("plot outside of a frame".into()))?;
        if self.fail_after.is_some_and(|limit| frame.len() >= limit) {
            return Err(SinkError::Lost("simulated surface loss".into()));
        }
        frame.push(Plot {
            pixel: PixelCoord { x, y },
            color,
        });
        Ok(())
    }

    fn end_frame(&mut self) -> Result<(), SinkError> {
        let frame = self
            .current
            .take()
            .ok_or_else(|| SinkError::Lost("frame was never begun".into()))?;
        self.frames.push(frame);
        Ok(())
    }

    fn release(&mut self) {
        self.released = true;
    }
}
