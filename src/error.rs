use thiserror::Error;

/// Everything that can go wrong during a single search.
///
/// `NoMatch` is an ordinary outcome: the input was fine, but no start column
/// produced a window that is wide enough.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DpmError {
    #[error("Could not allocate the {table} table ({cells} cells)")]
    Allocation { table: &'static str, cells: usize },

    #[error("No window of at least {pattern_len} columns found in a text of length {text_len}")]
    NoMatch { pattern_len: usize, text_len: usize },

    #[error("Pattern of length {pattern_len} is longer than the text of length {text_len}")]
    PatternTooLong { pattern_len: usize, text_len: usize },

    #[error("Pattern is empty")]
    EmptyPattern,

    #[error("Invalid weights: {0}")]
    InvalidWeights(String),

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),
}

impl DpmError {
    pub fn is_no_match(&self) -> bool {
        matches!(self, DpmError::NoMatch { .. })
    }
}

impl From<serde_json::Error> for DpmError {
    fn from(e: serde_json::Error) -> Self {
        DpmError::InvalidParams(e.to_string())
    }
}
