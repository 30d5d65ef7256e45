/// Headless draw sink writing one line per plotted pixel
use std::io::Write;
use wire3d_core::{DrawSink, Rgb, SinkError, Viewport};

/// Output format:
///
/// ```text
/// frame 1 640x480
/// 320 240
/// 367 240 255 0 0
/// end
/// ```
pub struct TextSink<W: Write> {
    out: W,
    viewport: Viewport,
    frame: u64,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W, viewport: Viewport) -> Self {
        Self {
            out,
            viewport,
            frame: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DrawSink for TextSink<W> {
    fn begin_frame(&mut self) -> Result<Viewport, SinkError> {
        self.frame += 1;
        writeln!(self.out, "frame {} {}x{}", self.frame, self.viewport.width, self.viewport.height)?;
        Ok(self.viewport)
    }

    fn plot_pixel(&mut self, x: i32, y: i32, color: Option<Rgb>) -> Result<(), SinkError> {
        match color {
            Some(Rgb { r, g, b }) => writeln!(self.out, "{x} {y} {r} {g} {b}")?,
            None => writeln!(self.out, "{x} {y}")?,
        }
        Ok(())
    }

    fn end_frame(&mut self) -> Result<(), SinkError> {
        writeln!(self.out, "end")?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_output() {
        let mut sink = TextSink::new(Vec::new(), Viewport::new(64, 48));
        assert_eq!(sink.begin_frame().unwrap(), Viewport::new(64, 48));
        sink.plot_pixel(1, 2, None).unwrap();
        sink.plot_pixel(-3, 4, Some(Rgb::new(255, 0, 7))).unwrap();
        sink.end_frame().unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(text, "frame 1 64x48\n1 2\n-3 4 255 0 7\nend\n");
    }
}
