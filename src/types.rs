//! Basic types shared by all stages of the search.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The cost of a cell. All arithmetic on costs saturates at `Cost::MAX`.
pub type Cost = u8;

/// A borrowed byte sequence.
pub type Seq<'a> = &'a [u8];

/// An owned byte sequence.
pub type Sequence = Vec<u8>;

/// A cell in the `pattern x text` grid: `row` indexes the pattern, `col` the text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Pos { row, col }
    }
}

impl Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The matched part of the text for one start column.
///
/// `start` always lies on the first row and `end` on the last row of the grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchWindow {
    pub start: Pos,
    pub end: Pos,
    pub cost: Cost,
    /// The cells visited by the backtrace, from the origin to the bottom-right
    /// corner. Only recorded when tracing is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Pos>>,
}

impl MatchWindow {
    /// Distance between the first and last matched text column.
    pub fn span(&self) -> usize {
        self.end.col.saturating_sub(self.start.col)
    }

    /// The matched slice of the text, with both end columns included.
    pub fn text<'a>(&self, text: Seq<'a>) -> Seq<'a> {
        &text[self.start.col..=self.end.col]
    }
}

impl Display for MatchWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {} cost {}", self.start, self.end, self.cost)
    }
}

/// Render a sequence for messages, replacing non-utf8 bytes.
pub fn seq_to_string(seq: Seq) -> String {
    String::from_utf8_lossy(seq).into_owned()
}
