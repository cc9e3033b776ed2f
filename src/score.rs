//! Substitution costs between two symbols, and the score matrix built from them.

use crate::error::DpmError;
use crate::grid::{Dims, Grid};
use crate::types::{Cost, Seq};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A pure function giving the cost of aligning symbol `a` of the pattern to
/// symbol `b` of the text. Identical symbols should cost 0.
pub trait ScoreFunction {
    fn score(&self, a: u8, b: u8) -> Cost;
}

impl<F: Fn(u8, u8) -> Cost> ScoreFunction for F {
    #[inline]
    fn score(&self, a: u8, b: u8) -> Cost {
        self(a, b)
    }
}

/// `|a - b|` on the byte values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsDiff;

impl ScoreFunction for AbsDiff {
    #[inline]
    fn score(&self, a: u8, b: u8) -> Cost {
        a.abs_diff(b)
    }
}

/// 0 for equal symbols, `mismatch` otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub mismatch: Cost,
}

impl Default for Unit {
    fn default() -> Self {
        Unit { mismatch: 1 }
    }
}

impl ScoreFunction for Unit {
    #[inline]
    fn score(&self, a: u8, b: u8) -> Cost {
        if a == b {
            0
        } else {
            self.mismatch
        }
    }
}

/// Folds ASCII case before delegating to the wrapped function.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseInsensitive<S>(pub S);

impl<S: ScoreFunction> ScoreFunction for CaseInsensitive<S> {
    #[inline]
    fn score(&self, a: u8, b: u8) -> Cost {
        self.0.score(a.to_ascii_uppercase(), b.to_ascii_uppercase())
    }
}

/// Selects one of the built-in score functions.
#[derive(ValueEnum, Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ScoreType {
    /// Absolute difference of the byte values.
    #[default]
    AbsDiff,
    /// 0 on equal bytes, the mismatch cost otherwise.
    Unit,
    /// As `unit`, ignoring ASCII case.
    UnitIgnoreCase,
}

impl ScoreType {
    /// `mismatch` is only used by the unit variants.
    pub fn build(&self, mismatch: Cost) -> Box<dyn ScoreFunction> {
        match self {
            ScoreType::AbsDiff => Box::new(AbsDiff),
            ScoreType::Unit => Box::new(Unit { mismatch }),
            ScoreType::UnitIgnoreCase => Box::new(CaseInsensitive(Unit { mismatch })),
        }
    }
}

/// `score[i][j] = f(pattern[i], text[j])` for all pattern rows and text columns.
pub fn score_matrix<S: ScoreFunction + ?Sized>(
    pattern: Seq,
    text: Seq,
    f: &S,
) -> Result<Grid<Cost>, DpmError> {
    Grid::try_from_fn(Dims::new(pattern.len(), text.len()), "score", |p| {
        f.score(pattern[p.row], text[p.col])
    })
}
