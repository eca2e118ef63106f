//! Terminal renderer used by `algoviz-vis replay`.

use std::io::{self, Write};

use crate::render::{GridFrame, GridRenderer, SequenceFrame, SortRenderer};
use crate::theme::{hex_to_rgb, Palette, Theme};

/// Writes one text block per frame.
///
/// Sequences print as a row of values: `[v]` for highlighted positions,
/// `(v)` for sorted ones. Grids print one character per cell:
///
/// | Glyph | Cell |
/// |-------|------|
/// | `S` / `E` | start / end |
/// | `#` | wall |
/// | `@` | current |
/// | `o` | path |
/// | `.` | visited |
/// | `·` | empty |
///
/// With color enabled the glyphs are painted with the theme's palette using
/// 24-bit ANSI escapes.
pub struct ConsoleRenderer<W: Write> {
    out: W,
    color: bool,
}

impl ConsoleRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, color: false }
    }

    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, text: &str, hex: &str) -> String {
        match (self.color, hex_to_rgb(hex)) {
            (true, Some((r, g, b))) => format!("\x1b[38;2;{r};{g};{b}m{text}\x1b[0m"),
            _ => text.to_owned(),
        }
    }

    fn write_sequence(&mut self, frame: &SequenceFrame<'_>, palette: &Palette) -> io::Result<()> {
        let mut line = String::new();
        for (i, value) in frame.values.iter().enumerate() {
            let token = if frame.highlighted.contains(&i) {
                self.paint(&format!("[{value}]"), palette.active)
            } else if frame.sorted.contains(&i) {
                self.paint(&format!("({value})"), palette.sorted)
            } else if frame.partition_ranges.iter().any(|r| r.contains(i)) {
                self.paint(&format!(" {value} "), palette.partitioned)
            } else {
                self.paint(&format!(" {value} "), palette.unsorted)
            };
            line.push_str(&token);
        }
        writeln!(self.out, "{}", frame.message)?;
        writeln!(self.out, "{line}")?;
        self.out.flush()
    }

    fn write_grid(&mut self, frame: &GridFrame<'_>, palette: &Palette) -> io::Result<()> {
        writeln!(self.out, "{}", frame.message)?;
        let grid = frame.grid;
        let current = frame.current.map(|r| r.coord);
        for y in 0..grid.height() {
            let mut row = String::new();
            for x in 0..grid.width() {
                let coord = algoviz_model::Coord::new(x, y);
                let Some(cell) = grid.cell(coord) else {
                    continue;
                };
                let (glyph, color) = if cell.is_start {
                    ("S", palette.start)
                } else if cell.is_end {
                    ("E", palette.end)
                } else if cell.is_wall {
                    ("#", palette.wall)
                } else if current == Some(coord) {
                    ("@", palette.current)
                } else if cell.is_path {
                    ("o", palette.path)
                } else if cell.is_visited {
                    (".", palette.visited)
                } else {
                    ("·", palette.foreground)
                };
                row.push_str(&self.paint(glyph, color));
            }
            writeln!(self.out, "{row}")?;
        }
        self.out.flush()
    }
}

impl<W: Write> SortRenderer for ConsoleRenderer<W> {
    fn render_sequence(&mut self, frame: &SequenceFrame<'_>, theme: Theme) {
        if let Err(e) = self.write_sequence(frame, &theme.palette()) {
            tracing::warn!("Failed to write frame: {}", e);
        }
    }
}

impl<W: Write> GridRenderer for ConsoleRenderer<W> {
    fn render_grid(&mut self, frame: &GridFrame<'_>, theme: Theme) {
        if let Err(e) = self.write_grid(frame, &theme.palette()) {
            tracing::warn!("Failed to write frame: {}", e);
        }
    }
}
