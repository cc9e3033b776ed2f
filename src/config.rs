//! Parameters of the search.
//!
//! The defaults reproduce the reference behaviour exactly, including the
//! exclusive upper bound on the start column and the strict span rule.

use crate::error::DpmError;
use crate::types::{Cost, MatchWindow};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::ops::Range;

fn default_gap_weight() -> f32 {
    1.5
}
fn default_diagonal_weight() -> f32 {
    1.0
}

/// Multipliers applied to the substitution cost of the cell being entered.
///
/// Weighted costs are truncated towards zero before they are added.
#[derive(Parser, Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[clap(next_help_heading = "Weights")]
#[serde(deny_unknown_fields)]
pub struct Weights {
    /// Weight of a vertical step, skipping a pattern symbol.
    #[clap(long = "vertical-weight", value_name = "W", default_value_t = 1.5, display_order = 20)]
    #[serde(default = "default_gap_weight")]
    pub vertical: f32,

    /// Weight of a diagonal step, aligning one pattern symbol to one text symbol.
    #[clap(long = "diagonal-weight", value_name = "W", default_value_t = 1.0, display_order = 20)]
    #[serde(default = "default_diagonal_weight")]
    pub diagonal: f32,

    /// Weight of a horizontal step, skipping a text symbol.
    #[clap(long = "horizontal-weight", value_name = "W", default_value_t = 1.5, display_order = 20)]
    #[serde(default = "default_gap_weight")]
    pub horizontal: f32,
}

impl Default for Weights {
    fn default() -> Self {
        Self::REFERENCE
    }
}

impl Weights {
    /// Gaps cost 1.5x, diagonal steps the plain substitution cost.
    pub const REFERENCE: Weights = Weights {
        vertical: 1.5,
        diagonal: 1.0,
        horizontal: 1.5,
    };

    pub fn new(vertical: f32, diagonal: f32, horizontal: f32) -> Self {
        Weights {
            vertical,
            diagonal,
            horizontal,
        }
    }

    pub fn validate(&self) -> Result<(), DpmError> {
        for (name, w) in [
            ("vertical", self.vertical),
            ("diagonal", self.diagonal),
            ("horizontal", self.horizontal),
        ] {
            if !w.is_finite() || w < 0.0 {
                return Err(DpmError::InvalidWeights(format!(
                    "{name} weight must be finite and non-negative, got {w}"
                )));
            }
        }
        Ok(())
    }

    /// `score * weight`, truncated.
    #[inline]
    pub(crate) fn apply(weight: f32, score: Cost) -> u32 {
        (score as f32 * weight) as u32
    }
}

/// Which start columns are tried.
#[derive(Debug, PartialEq, Eq, Default, Clone, Copy, ValueEnum, Serialize, Deserialize)]
pub enum SweepBound {
    /// Start columns `0..n-m`. The last column `n-m` is never tried.
    #[default]
    Exclusive,
    /// Start columns `0..=n-m`.
    Inclusive,
}

impl SweepBound {
    /// Start columns to try for a pattern of length `m` in a text of length `n >= m`.
    pub fn offsets(&self, m: usize, n: usize) -> Range<usize> {
        match self {
            SweepBound::Exclusive => 0..n - m,
            SweepBound::Inclusive => 0..n - m + 1,
        }
    }
}

/// When a candidate window is long enough to be accepted.
#[derive(Debug, PartialEq, Eq, Default, Clone, Copy, ValueEnum, Serialize, Deserialize)]
pub enum SpanRule {
    /// `end.col - start.col >= m`.
    #[default]
    Distance,
    /// `end.col - start.col + 1 >= m`: the window covers at least `m` columns.
    Columns,
}

impl SpanRule {
    pub fn accepts(&self, window: &MatchWindow, m: usize) -> bool {
        match self {
            SpanRule::Distance => window.span() >= m,
            SpanRule::Columns => window.span() + 1 >= m,
        }
    }
}

/// All parameters of a search.
#[derive(Parser, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[clap(next_help_heading = "Search")]
#[serde(deny_unknown_fields)]
pub struct DpmParams {
    #[clap(flatten)]
    #[serde(default)]
    pub weights: Weights,

    /// Which start columns to try.
    #[clap(long, value_enum, default_value_t, display_order = 21)]
    #[serde(default)]
    pub sweep: SweepBound,

    /// Minimal width of an accepted window.
    #[clap(long, value_enum, default_value_t, display_order = 21)]
    #[serde(default)]
    pub span: SpanRule,

    /// Record the backtraced path of the returned window.
    #[clap(long, display_order = 21)]
    #[serde(default)]
    pub trace: bool,
}

impl DpmParams {
    pub fn from_json(s: &str) -> Result<Self, DpmError> {
        let params: DpmParams = serde_json::from_str(s)?;
        params.weights.validate()?;
        Ok(params)
    }

    pub fn to_json(&self) -> String {
        // Only plain numbers, enums and bools: serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}
