//!
//! # dp-matching
//!
//! Find where a short byte pattern best matches inside a longer text, when an
//! exact substring search is too strict.
//!
//! For every candidate start column `x` of the text, a cost table over the
//! `pattern x text[x..]` band is filled by dynamic programming. Diagonal steps
//! pay the substitution cost of the cell they enter, while horizontal and
//! vertical steps (skipped symbols) pay a weighted multiple of it. The table
//! is then backtracked from the bottom-right cell to find the matched window.
//! The cheapest window over all start columns that is wide enough wins.
//!
//! ```
//! use dp_matching::{search, AbsDiff, Dpm, DpmParams, Pos, SpanRule};
//!
//! let w = search(b"2647", b"5626473", &AbsDiff).unwrap();
//! assert_eq!((w.start, w.end, w.cost), (Pos::new(0, 0), Pos::new(3, 5), 5));
//!
//! let dpm = Dpm::new(DpmParams { span: SpanRule::Columns, ..Default::default() });
//! let w = dpm.search(b"2647", b"5626473", &AbsDiff).unwrap();
//! assert_eq!((w.start, w.end, w.cost), (Pos::new(0, 2), Pos::new(3, 5), 0));
//! ```
//!
//! The stages can also be used separately: [`score::score_matrix`],
//! [`table::TableBuilder`] and [`traceback::extract`].

pub mod config;
pub mod error;
pub mod grid;
pub mod score;
pub mod search;
pub mod stats;
pub mod table;
pub mod traceback;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod generate;

pub use config::{DpmParams, SpanRule, SweepBound, Weights};
pub use error::DpmError;
pub use score::{AbsDiff, CaseInsensitive, ScoreFunction, ScoreType, Unit};
pub use search::{search, Dpm};
pub use types::{Cost, MatchWindow, Pos, Seq, Sequence};
