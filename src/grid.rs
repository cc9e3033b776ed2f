//! Row-major `height x width` storage shared by the score, cost and route tables.
//!
//! All tables of one search are created from the same `Dims`, so a `Pos` that
//! is valid for one of them is valid for all of them.

use crate::error::DpmError;
use crate::types::Pos;
use std::fmt::{Debug, Display};
use std::ops::{Index, IndexMut, Range};

/// The shape of a grid: one row per pattern symbol, one column per text symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dims {
    pub height: usize,
    pub width: usize,
}

impl Dims {
    pub const fn new(height: usize, width: usize) -> Self {
        Dims { height, width }
    }

    /// Total number of cells, or `None` when it does not fit in a `usize`.
    pub fn cells(&self) -> Option<usize> {
        self.height.checked_mul(self.width)
    }

    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    /// The bottom-right cell.
    #[inline]
    pub fn last(&self) -> Pos {
        Pos::new(self.height - 1, self.width - 1)
    }

    #[inline]
    fn offset(&self, pos: Pos) -> usize {
        debug_assert!(self.contains(pos), "{pos} is outside {self:?}");
        pos.row * self.width + pos.col
    }
}

/// An owned, bounds-checked 2D table.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid<T> {
    dims: Dims,
    cells: Vec<T>,
}

impl<T: Copy> Grid<T> {
    /// Allocate a grid filled with `value`.
    ///
    /// `name` is only used to report which table could not be allocated.
    pub fn try_new(dims: Dims, value: T, name: &'static str) -> Result<Self, DpmError> {
        let len = dims.cells().ok_or(DpmError::Allocation {
            table: name,
            cells: usize::MAX,
        })?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| DpmError::Allocation {
                table: name,
                cells: len,
            })?;
        cells.resize(len, value);
        Ok(Grid { dims, cells })
    }

    /// Allocate a grid and fill it row by row using `f`.
    pub fn try_from_fn(
        dims: Dims,
        name: &'static str,
        mut f: impl FnMut(Pos) -> T,
    ) -> Result<Self, DpmError> {
        let len = dims.cells().ok_or(DpmError::Allocation {
            table: name,
            cells: usize::MAX,
        })?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| DpmError::Allocation {
                table: name,
                cells: len,
            })?;
        for row in 0..dims.height {
            cells.extend((0..dims.width).map(|col| f(Pos::new(row, col))));
        }
        Ok(Grid { dims, cells })
    }

    /// Overwrite the cells `cols` of every row with `value`.
    pub fn reset_columns(&mut self, cols: Range<usize>, value: T) {
        for row in 0..self.dims.height {
            self.row_mut(row)[cols.clone()].fill(value);
        }
    }
}

impl<T> Grid<T> {
    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    #[inline]
    pub fn get(&self, pos: Pos) -> Option<&T> {
        if self.dims.contains(pos) {
            Some(&self.cells[self.dims.offset(pos)])
        } else {
            None
        }
    }

    #[inline]
    pub fn row(&self, row: usize) -> &[T] {
        &self.cells[row * self.dims.width..(row + 1) * self.dims.width]
    }

    #[inline]
    pub fn row_mut(&mut self, row: usize) -> &mut [T] {
        &mut self.cells[row * self.dims.width..(row + 1) * self.dims.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // `chunks_exact` panics on a zero chunk size.
        self.cells.chunks_exact(self.dims.width.max(1))
    }
}

// ========== INDEXING ==========

impl<T> Index<Pos> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, pos: Pos) -> &Self::Output {
        &self.cells[self.dims.offset(pos)]
    }
}

impl<T> IndexMut<Pos> for Grid<T> {
    #[inline]
    fn index_mut(&mut self, pos: Pos) -> &mut Self::Output {
        let offset = self.dims.offset(pos);
        &mut self.cells[offset]
    }
}

// ========== PRINTING ==========

/// One line per row, each cell zero padded to three characters.
impl<T: Display> Display for Grid<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            for cell in row {
                write!(f, "{cell:03} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<T: Display> Debug for Grid<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Grid {}x{}", self.dims.height, self.dims.width)?;
        Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_major_layout() {
        let g = Grid::try_from_fn(Dims::new(2, 3), "test", |p| (p.row * 10 + p.col) as u8).unwrap();
        assert_eq!(g.row(0), &[0, 1, 2]);
        assert_eq!(g.row(1), &[10, 11, 12]);
        assert_eq!(g[Pos::new(1, 2)], 12);
        assert_eq!(g.get(Pos::new(2, 0)), None);
        assert_eq!(g.get(Pos::new(0, 3)), None);
    }

    #[test]
    fn reset_columns_only_touches_range() {
        let mut g = Grid::try_new(Dims::new(2, 4), 7u8, "test").unwrap();
        g.reset_columns(1..3, 0);
        assert_eq!(g.row(0), &[7, 0, 0, 7]);
        assert_eq!(g.row(1), &[7, 0, 0, 7]);
    }

    #[test]
    fn display_pads_cells() {
        let g = Grid::try_from_fn(Dims::new(2, 2), "test", |p| (p.row * 100 + p.col) as u8).unwrap();
        assert_eq!(g.to_string(), "000 001 \n100 101 \n");
    }

    #[test]
    fn oversized_grid_is_an_allocation_error() {
        let err = Grid::try_new(Dims::new(usize::MAX, 2), 0u8, "cost").unwrap_err();
        assert!(matches!(err, DpmError::Allocation { table: "cost", .. }));

        let err = Grid::try_new(Dims::new(usize::MAX / 2, 2), 0u8, "route").unwrap_err();
        assert!(matches!(err, DpmError::Allocation { table: "route", .. }));
    }
}
