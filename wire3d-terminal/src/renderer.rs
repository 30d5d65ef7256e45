/// Character-cell draw sink for terminal rendering
use crossterm::{
    cursor, execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use std::io::{self, Write};
use wire3d_core::{DrawSink, PixelCoord, Rgb, SinkError, Viewport};

/// Glyphs by how many points landed in a cell (fewest to most)
const DENSITY_RAMP: &[char] = &['.', ':', '+', '*', '#', '%', '@'];

/// Colour for points that carry none
const DEFAULT_COLOR: Color = Color::Cyan;

/// The bottom row is left free for the command prompt.
const PROMPT_ROWS: u16 = 1;

#[derive(Debug, Clone, Copy)]
enum SizeSource {
    Live,
    Fixed { cols: u16, rows: u16 },
}

#[derive(Debug, Clone, Copy, Default)]
struct Cell {
    hits: usize,
    color: Option<Rgb>,
}

/// Draw sink where each terminal cell is one pixel.
///
/// The terminal stays in line mode so the operator can type commands on
/// the prompt row beneath the picture.
pub struct TerminalSink<W: Write> {
    out: W,
    size: SizeSource,
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    entered: bool,
}

impl TerminalSink<io::Stdout> {
    /// Take over the real terminal, using its live size every frame
    pub fn stdout() -> io::Result<Self> {
        let mut sink = Self::new(io::stdout(), SizeSource::Live);
        execute!(sink.out, terminal::EnterAlternateScreen, Clear(ClearType::All))?;
        sink.entered = true;
        Ok(sink)
    }
}

impl<W: Write> TerminalSink<W> {
    /// Sink over any writer with a fixed character grid
    pub fn with_size(out: W, cols: u16, rows: u16) -> Self {
        Self::new(out, SizeSource::Fixed { cols, rows })
    }

    fn new(out: W, size: SizeSource) -> Self {
        Self {
            out,
            size,
            width: 0,
            height: 0,
            cells: Vec::new(),
            entered: false,
        }
    }

    /// Change the grid of a fixed-size sink; picked up at the next frame.
    /// Live sinks follow the terminal and ignore this.
    pub fn set_size(&mut self, cols: u16, rows: u16) {
        if let SizeSource::Fixed { .. } = self.size {
            self.size = SizeSource::Fixed { cols, rows };
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Glyph that cell (x, y) will show, if anything landed there
    pub fn glyph(&self, x: usize, y: usize) -> Option<char> {
        if x >= self.width || y >= self.height {
            return None;
        }
        glyph_for(self.cells[y * self.width + x].hits)
    }

    fn viewport(&self) -> Viewport {
        Viewport::new(self.width as u32, self.height as u32)
    }

    fn resize(&mut self) -> io::Result<()> {
        let (cols, rows) = match self.size {
            SizeSource::Live => terminal::size()?,
            SizeSource::Fixed { cols, rows } => (cols, rows),
        };
        self.width = cols as usize;
        self.height = rows.saturating_sub(PROMPT_ROWS) as usize;
        self.cells.clear();
        self.cells.resize(self.width * self.height, Cell::default());
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        for y in 0..self.height {
            queue!(self.out, cursor::MoveTo(0, y as u16))?;
            for x in 0..self.width {
                let cell = self.cells[y * self.width + x];
                match glyph_for(cell.hits) {
                    Some(c) => {
                        let color = cell
                            .color
                            .map(|Rgb { r, g, b }| Color::Rgb { r, g, b })
                            .unwrap_or(DEFAULT_COLOR);
                        queue!(self.out, SetForegroundColor(color), Print(c))?;
                    }
                    None => queue!(self.out, Print(' '))?,
                }
            }
        }
        queue!(
            self.out,
            ResetColor,
            cursor::MoveTo(0, self.height as u16),
            Clear(ClearType::CurrentLine),
            Print("> ")
        )?;
        self.out.flush()
    }
}

fn glyph_for(hits: usize) -> Option<char> {
    match hits {
        0 => None,
        n => Some(DENSITY_RAMP[(n - 1).min(DENSITY_RAMP.len() - 1)]),
    }
}

impl<W: Write> DrawSink for TerminalSink<W> {
    fn begin_frame(&mut self) -> Result<Viewport, SinkError> {
        self.resize()?;
        Ok(self.viewport())
    }

    fn plot_pixel(&mut self, x: i32, y: i32, color: Option<Rgb>) -> Result<(), SinkError> {
        if !self.viewport().contains(PixelCoord { x, y }) {
            return Ok(());
        }
        let cell = &mut self.cells[y as usize * self.width + x as usize];
        cell.hits += 1;
        if color.is_some() {
            cell.color = color;
        }
        Ok(())
    }

    fn end_frame(&mut self) -> Result<(), SinkError> {
        Ok(self.present()?)
    }

    fn release(&mut self) {
        if !self.entered {
            return;
        }
        self.entered = false;
        if let Err(e) = execute!(self.out, ResetColor, cursor::Show, terminal::LeaveAlternateScreen) {
            log::error!("failed to restore the terminal: {e}");
        }
    }
}
