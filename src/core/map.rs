//! Grid map loading and lookup.
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail, ensure};

/// Cell code for open space. Anything else is a wall material id.
pub const OPEN: u8 = 0;
/// Wall variant rendered like any other wall but told apart by its id.
pub const FLAG_WALL: u8 = 5;

/// Row-major grid of cell codes. Cell (col, row) covers `[col, col+1) x [row, row+1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct GridMap {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl GridMap {
    /// Builds a map and checks that the outer border is solid.
    pub fn new(width: usize, height: usize, cells: Vec<u8>) -> Result<Self> {
        ensure!(width >= 3 && height >= 3, "map must be at least 3x3, got {width}x{height}");
        ensure!(
            cells.len() == width * height,
            "map has {} cells, expected {width}x{height}",
            cells.len()
        );
        let map = Self { width, height, cells };
        for col in 0..width {
            for row in [0, height - 1] {
                if map.cell_at(row, col) == OPEN {
                    bail!("map border is open at row {row}, col {col}");
                }
            }
        }
        for row in 0..height {
            for col in [0, width - 1] {
                if map.cell_at(row, col) == OPEN {
                    bail!("map border is open at row {row}, col {col}");
                }
            }
        }
        Ok(map)
    }

    /// Parses one row per non-empty line; cells split on whitespace or commas, `#` comments.
    pub fn parse(text: &str) -> Result<Self> {
        let mut rows: Vec<Vec<u8>> = Vec::new();
        for (lineno, line) in text.lines().enumerate() {
            let line = line.split('#').next().unwrap_or("");
            let mut row = Vec::new();
            for tok in line.split(|c: char| c == ',' || c.is_whitespace()) {
                if tok.is_empty() {
                    continue;
                }
                let code: u8 = tok
                    .parse()
                    .with_context(|| format!("line {}: bad cell code {tok:?}", lineno + 1))?;
                row.push(code);
            }
            if !row.is_empty() {
                rows.push(row);
            }
        }
        ensure!(!rows.is_empty(), "map is empty");
        let width = rows[0].len();
        if let Some((i, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            bail!("row {i} has {} cells, expected {width}", r.len());
        }
        let height = rows.len();
        Self::new(width, height, rows.concat())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading map {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing map {}", path.display()))
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Length of the map diagonal, the longest distance a ray can travel.
    pub fn diagonal(&self) -> f32 {
        ((self.width * self.width + self.height * self.height) as f32).sqrt()
    }

    /// Cell code at (row, col). Callers stay inside the grid.
    #[inline]
    pub fn cell_at(&self, row: usize, col: usize) -> u8 {
        self.cells[row * self.width + col]
    }

    /// Cell code under a continuous position, `None` outside the grid.
    #[inline]
    pub fn code_at(&self, x: f32, y: f32) -> Option<u8> {
        if !(x >= 0.0 && y >= 0.0) {
            return None;
        }
        let (col, row) = (x as usize, y as usize);
        if col >= self.width || row >= self.height {
            return None;
        }
        Some(self.cell_at(row, col))
    }

    /// Outside the grid counts as solid.
    #[inline]
    pub fn is_solid(&self, x: f32, y: f32) -> bool {
        self.code_at(x, y).is_none_or(|c| c != OPEN)
    }

    /// True when the point lies strictly inside the map rectangle.
    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x > 0.0 && y > 0.0 && x < self.width as f32 && y < self.height as f32
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks(self.width)
    }
}
