//! The datacenter floor: which rooms are usable and where the duct starts and ends.
//!
//! # Layout
//!
//! A `width x height` grid is stored inside a permanently blocked border, so
//! that every usable cell has four in-range neighbor slots and walking off the
//! edge is just another blocked-cell check:
//!
//! ```text
//! # # # # #      row 0             (border)
//! . . . . #      row 1 = user row 0
//! . . . . #      row 2 = user row 1
//! # # # # #      row height + 1    (border)
//! ```
//!
//! The stride is `width + 1`. The extra column is the right border of its own
//! row and, one index later, the left border of the next row. User
//! coordinates `(row, col)` map to the raw index `(row + 1) * stride + col`;
//! every [`Cell`] handed out by this module is such a padded index.

use std::fmt;

use crate::bits::BitSet;
use crate::error::{Endpoint, Error};

/// Padded linear index of a grid cell.
pub type Cell = usize;

#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    stride: usize,
    blocked: BitSet,
    start: Cell,
    end: Cell,
    target_length: usize,
}

impl Grid {
    pub fn builder(width: usize, height: usize) -> GridBuilder {
        GridBuilder {
            width,
            height,
            blocked: Vec::new(),
            start: None,
            end: None,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Size of the padded index space.
    pub fn padded_len(&self) -> usize {
        self.blocked.len()
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn end(&self) -> Cell {
        self.end
    }

    /// Number of cells a complete path visits: every usable cell.
    pub fn target_length(&self) -> usize {
        self.target_length
    }

    /// Raw index of user coordinates. Does not bounds-check.
    #[inline(always)]
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        (row + 1) * self.stride + col
    }

    /// User coordinates of a raw index, or `None` for border cells.
    pub fn coords(&self, cell: Cell) -> Option<(usize, usize)> {
        let (row, col) = (cell / self.stride, cell % self.stride);
        if row == 0 || row > self.height || col >= self.width {
            None
        } else {
            Some((row - 1, col))
        }
    }

    #[inline(always)]
    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.blocked.get(cell)
    }

    /// The blocked set, border included.
    pub fn blocked(&self) -> &BitSet {
        &self.blocked
    }

    /// Up, right, down and left neighbors of a non-border cell.
    ///
    /// Neighbors past the edge of the floor are border cells and therefore
    /// blocked.
    #[inline(always)]
    pub fn neighbors(&self, cell: Cell) -> [Cell; 4] {
        debug_assert!(self.coords(cell).is_some(), "border cell {}", cell);
        [cell - self.stride, cell + 1, cell + self.stride, cell - 1]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.width {
                let cell = self.cell(row, col);
                let c = if cell == self.start {
                    'S'
                } else if cell == self.end {
                    'E'
                } else if self.is_blocked(cell) {
                    '#'
                } else {
                    '.'
                };
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

/// Collects blocked cells and endpoints in user coordinates, then validates
/// them into a [`Grid`].
#[derive(Debug, Clone)]
pub struct GridBuilder {
    width: usize,
    height: usize,
    blocked: Vec<(usize, usize)>,
    start: Option<(usize, usize)>,
    end: Option<(usize, usize)>,
}

impl GridBuilder {
    pub fn block(&mut self, row: usize, col: usize) -> &mut Self {
        self.blocked.push((row, col));
        self
    }

    pub fn start(&mut self, row: usize, col: usize) -> &mut Self {
        self.start = Some((row, col));
        self
    }

    pub fn end(&mut self, row: usize, col: usize) -> &mut Self {
        self.end = Some((row, col));
        self
    }

    pub fn build(&self) -> Result<Grid, Error> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::EmptyGrid);
        }
        let start = self.start.ok_or(Error::MissingEndpoint(Endpoint::Start))?;
        let end = self.end.ok_or(Error::MissingEndpoint(Endpoint::End))?;
        for &(row, col) in self.blocked.iter().chain([&start, &end]) {
            if row >= self.height || col >= self.width {
                return Err(Error::OutOfBounds {
                    row,
                    col,
                    width: self.width,
                    height: self.height,
                });
            }
        }

        let exhausted = || {
            Error::ResourceExhausted(format!(
                "{}x{} grid exceeds the index space",
                self.width, self.height
            ))
        };
        let stride = self.width.checked_add(1).ok_or_else(exhausted)?;
        let len = self
            .height
            .checked_add(2)
            .and_then(|rows| rows.checked_mul(stride))
            .ok_or_else(exhausted)?;

        let mut grid = Grid {
            width: self.width,
            height: self.height,
            stride,
            blocked: BitSet::try_new(len)?,
            start: 0,
            end: 0,
            target_length: 0,
        };
        for cell in 0..len {
            if grid.coords(cell).is_none() {
                grid.blocked.set(cell);
            }
        }
        for &(row, col) in &self.blocked {
            let cell = grid.cell(row, col);
            grid.blocked.set(cell);
        }

        grid.start = grid.cell(start.0, start.1);
        grid.end = grid.cell(end.0, end.1);
        if grid.is_blocked(grid.start) {
            return Err(Error::BlockedEndpoint(Endpoint::Start));
        }
        if grid.is_blocked(grid.end) {
            return Err(Error::BlockedEndpoint(Endpoint::End));
        }

        grid.target_length = len - grid.blocked.count_ones();
        if grid.start == grid.end && grid.target_length > 1 {
            return Err(Error::CoincidentEndpoints);
        }
        Ok(grid)
    }
}
