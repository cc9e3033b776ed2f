//! Cost and route tables for a single start column.
//!
//! For start column `x`, the origin `(0, x)` costs 0. Every other cell
//! `(row, col)` with `col >= x` is reached from one of three neighbours inside
//! the band `[x, width)`:
//!
//! ```text
//!        x
//!   UP   (row-1, col)     cost + score * vertical
//!   DIAG (row-1, col-1)   cost + score * diagonal
//!   LEFT (row, col-1)     cost + score * horizontal
//! ```
//!
//! where `score` is the substitution cost of the cell being entered.
//! Costs saturate at `Cost::MAX`.

use crate::config::Weights;
use crate::error::DpmError;
use crate::grid::{Dims, Grid};
use crate::types::{Cost, Pos};
use std::cmp::min;
use std::fmt::Display;

/// The neighbour a cell's minimal cost came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Route {
    /// The origin, or a cell all of whose candidates saturated.
    #[default]
    Unknown = 0,
    FromLeft = 1,
    FromUp = 2,
    FromDiagonal = 3,
}

/// Printed as its numeric code, so that route tables line up with cost tables.
impl Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&(*self as u8), f)
    }
}

/// The cost and route table for one start column.
///
/// Both tables span the full grid, but only the band `[start, width)` is
/// written by [`TableBuilder::build`]. Cells left of the band keep whatever
/// they held before and are never read.
#[derive(Clone, Debug)]
pub struct Tables {
    pub cost: Grid<Cost>,
    pub route: Grid<Route>,
    /// The start column of the last build.
    pub start: usize,
}

impl Tables {
    pub fn try_new(dims: Dims) -> Result<Self, DpmError> {
        Ok(Tables {
            cost: Grid::try_new(dims, 0, "cost")?,
            route: Grid::try_new(dims, Route::Unknown, "route")?,
            start: 0,
        })
    }

    #[inline]
    pub fn dims(&self) -> Dims {
        self.cost.dims()
    }

    /// Clear the cells left of the band of the last build, so that printed
    /// tables only show values of the current start column.
    pub fn clear_outside_band(&mut self) {
        self.cost.reset_columns(0..self.start, 0);
        self.route.reset_columns(0..self.start, Route::Unknown);
    }
}

/// Fills [`Tables`] from a score matrix, one start column at a time.
pub struct TableBuilder<'a> {
    score: &'a Grid<Cost>,
    weights: Weights,
}

impl<'a> TableBuilder<'a> {
    pub fn new(score: &'a Grid<Cost>, weights: Weights) -> Self {
        TableBuilder { score, weights }
    }

    pub fn dims(&self) -> Dims {
        self.score.dims()
    }

    /// Allocate new tables and build them for `start`.
    pub fn build_new(&self, start: usize) -> Result<Tables, DpmError> {
        let mut tables = Tables::try_new(self.dims())?;
        self.build(start, &mut tables);
        Ok(tables)
    }

    /// Overwrite the band `[start, width)` of `tables`.
    ///
    /// Panics when `start` is not a column of the score matrix, or when the
    /// tables have a different shape than the score matrix.
    pub fn build(&self, start: usize, tables: &mut Tables) {
        let dims = self.dims();
        assert!(
            start < dims.width,
            "Start column {start} is outside a table of width {}",
            dims.width
        );
        assert_eq!(tables.dims(), dims, "Tables do not match the score matrix.");

        let origin = Pos::new(0, start);
        tables.start = start;
        tables.cost[origin] = 0;
        tables.route[origin] = Route::Unknown;

        let Weights {
            vertical,
            diagonal,
            horizontal,
        } = self.weights;
        let step = |from: Cost, score: Cost, weight: f32| -> Cost {
            min(
                (from as u32).saturating_add(Weights::apply(weight, score)),
                Cost::MAX as u32,
            ) as Cost
        };

        for row in 0..dims.height {
            for col in start..dims.width {
                let pos = Pos::new(row, col);
                if pos == origin {
                    continue;
                }
                let score = self.score[pos];
                let mut best = Cost::MAX;
                let mut route = Route::Unknown;

                // Strict comparisons: ties go to the earlier candidate.
                if row > 0 {
                    let c = step(tables.cost[Pos::new(row - 1, col)], score, vertical);
                    if c < best {
                        best = c;
                        route = Route::FromUp;
                    }
                }
                if row > 0 && col > start {
                    let c = step(tables.cost[Pos::new(row - 1, col - 1)], score, diagonal);
                    if c < best {
                        best = c;
                        route = Route::FromDiagonal;
                    }
                }
                if col > start {
                    let c = step(tables.cost[Pos::new(row, col - 1)], score, horizontal);
                    if c < best {
                        best = c;
                        route = Route::FromLeft;
                    }
                }

                tables.cost[pos] = best;
                tables.route[pos] = route;
            }
        }
    }
}
