use std::{
    fmt::Display,
    sync::atomic::{AtomicBool, Ordering},
};

use derive_more::AddAssign;

use crate::types::Seq;

#[derive(Default, Clone, Copy, AddAssign, Debug)]
pub struct Timing {
    /// score matrix + sweep
    pub total: f64,
    /// building the score matrix
    pub score_matrix: f64,
    /// building and backtracking the tables of all start columns
    pub sweep: f64,
}

/// Counters for one search, or the sum over many searches.
#[derive(Default, Clone, Copy, AddAssign, Debug)]
pub struct SearchStats {
    pub len_pattern: usize,
    pub len_text: usize,
    /// Start columns for which tables were built.
    pub offsets: usize,
    /// Windows that were wide enough.
    pub accepted: usize,
    /// Windows that were too narrow.
    pub rejected: usize,
    /// Searches that returned a window.
    pub matches: usize,
    /// Sum of the costs of the returned windows.
    pub cost: usize,

    pub timing: Timing,
    pub sample_size: usize,
}

static PRINTED_HEADER: AtomicBool = AtomicBool::new(false);

impl SearchStats {
    pub fn init(pattern: Seq, text: Seq) -> Self {
        Self {
            len_pattern: pattern.len(),
            len_text: text.len(),
            sample_size: 1,
            ..Default::default()
        }
    }

    pub fn print(&self) {
        let (header, values) = self.values();
        if !PRINTED_HEADER.swap(true, Ordering::Relaxed) {
            println!("{}", header.join(" "));
        }
        println!("{}", values.join(" "));
    }

    fn format_raw<T: Display>(
        &self,
        align: char,
        width: usize,
        title: &str,
        val: T,
    ) -> (String, String) {
        if align == '<' {
            (format!("{:<width$}", title), format!("{:<width$}", val))
        } else {
            (format!("{:>width$}", title), format!("{:>width$}", val))
        }
    }

    fn format_flt<T: Display>(
        &self,
        align: char,
        mut width: usize,
        title: &str,
        val: T,
    ) -> (String, String) {
        let val = val.to_string();
        // make sure to not discard things before the decimal point.
        let point = val.find('.').unwrap_or(val.len());
        width = width.max(point);
        let mut val = val.as_str();
        if val.len() > width {
            val = &val[0..width];
        }
        self.format_raw(align, width, title, val)
    }

    fn format_avg<T: Display + num_traits::AsPrimitive<f32>>(
        &self,
        align: char,
        width: usize,
        title: &str,
        val: T,
    ) -> (String, String) {
        self.format_flt(
            align,
            width,
            title,
            val.as_() / self.sample_size.max(1) as f32,
        )
    }

    pub fn values(&self) -> (Vec<String>, Vec<String>) {
        [
            self.format_raw('>', 7, "nr", self.sample_size),
            self.format_avg('>', 8, "|p|", self.len_pattern),
            self.format_avg('>', 10, "|t|", self.len_text),
            self.format_avg('>', 9, "offsets", self.offsets),
            self.format_avg('>', 9, "accepted", self.accepted),
            self.format_avg('>', 9, "rejected", self.rejected),
            self.format_raw('>', 7, "found", self.matches),
            self.format_flt(
                '>',
                6,
                "cost",
                self.cost as f32 / self.matches.max(1) as f32,
            ),
            self.format_avg('>', 8, "t", 1000. * self.timing.total),
            self.format_avg('>', 7, "score", 1000. * self.timing.score_matrix),
            self.format_avg('>', 7, "sweep", 1000. * self.timing.sweep),
        ]
        .into_iter()
        .unzip()
    }
}
