//! The sweep over start columns that picks the cheapest admissible window.

use crate::config::DpmParams;
use crate::error::DpmError;
use crate::score::{score_matrix, ScoreFunction};
use crate::stats::SearchStats;
use crate::table::{TableBuilder, Tables};
use crate::traceback::extract;
use crate::types::{seq_to_string, MatchWindow, Seq};
use instant::Instant;
use log::{debug, log_enabled, trace, Level};

/// A reusable searcher holding the parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Dpm {
    pub params: DpmParams,
}

impl Dpm {
    pub fn new(params: DpmParams) -> Self {
        Dpm { params }
    }

    /// Find the cheapest window of `text` matching `pattern`.
    ///
    /// Tables are built for every start column given by the sweep bound.
    /// Windows narrower than the span rule allows are discarded. Of the
    /// remaining ones the first with the strictly lowest cost is returned.
    pub fn search<S: ScoreFunction + ?Sized>(
        &self,
        pattern: Seq,
        text: Seq,
        score: &S,
    ) -> Result<MatchWindow, DpmError> {
        self.search_with_stats(pattern, text, score).0
    }

    /// As [`Dpm::search`], also returning counters and timings.
    pub fn search_with_stats<S: ScoreFunction + ?Sized>(
        &self,
        pattern: Seq,
        text: Seq,
        score: &S,
    ) -> (Result<MatchWindow, DpmError>, SearchStats) {
        let mut stats = SearchStats::init(pattern, text);
        let start = Instant::now();
        let result = self.search_internal(pattern, text, score, &mut stats);
        stats.timing.total = start.elapsed().as_secs_f64();
        if let Ok(window) = &result {
            stats.matches = 1;
            stats.cost = window.cost as usize;
        }
        (result, stats)
    }

    fn search_internal<S: ScoreFunction + ?Sized>(
        &self,
        pattern: Seq,
        text: Seq,
        score: &S,
        stats: &mut SearchStats,
    ) -> Result<MatchWindow, DpmError> {
        let (m, n) = (pattern.len(), text.len());
        if m == 0 {
            return Err(DpmError::EmptyPattern);
        }
        if m > n {
            return Err(DpmError::PatternTooLong {
                pattern_len: m,
                text_len: n,
            });
        }
        self.params.weights.validate()?;

        let t = Instant::now();
        let scores = score_matrix(pattern, text, score)?;
        stats.timing.score_matrix = t.elapsed().as_secs_f64();
        if log_enabled!(Level::Trace) {
            trace!(
                "SCORE_MAP {} / {}\n{scores}",
                seq_to_string(pattern),
                seq_to_string(text)
            );
        }

        let t = Instant::now();
        let builder = TableBuilder::new(&scores, self.params.weights);
        let mut tables = Tables::try_new(scores.dims())?;
        let mut best: Option<MatchWindow> = None;
        for x in self.params.sweep.offsets(m, n) {
            builder.build(x, &mut tables);
            stats.offsets += 1;
            if log_enabled!(Level::Trace) {
                tables.clear_outside_band();
                trace!("COST_MAP {x}\n{}ROUTE_MAP {x}\n{}", tables.cost, tables.route);
            }

            let window = extract(&tables, self.params.trace);
            if !self.params.span.accepts(&window, m) {
                trace!("start {x}: rejected {window}, span {} < {m}", window.span());
                stats.rejected += 1;
                continue;
            }
            trace!("start {x}: accepted {window}");
            stats.accepted += 1;
            if best.as_ref().map_or(true, |b| window.cost < b.cost) {
                best = Some(window);
            }
        }
        stats.timing.sweep = t.elapsed().as_secs_f64();

        debug!(
            "|p|={m} |t|={n} offsets={} accepted={} rejected={} best={}",
            stats.offsets,
            stats.accepted,
            stats.rejected,
            best.as_ref()
                .map_or_else(|| "none".to_string(), |w| w.to_string())
        );
        best.ok_or(DpmError::NoMatch {
            pattern_len: m,
            text_len: n,
        })
    }
}

/// Search with the reference parameters.
pub fn search<S: ScoreFunction + ?Sized>(
    pattern: Seq,
    text: Seq,
    score: &S,
) -> Result<MatchWindow, DpmError> {
    Dpm::default().search(pattern, text, score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SpanRule, SweepBound, Weights};
    use crate::score::{AbsDiff, Unit};
    use crate::types::Pos;

    fn params(sweep: SweepBound, span: SpanRule) -> DpmParams {
        DpmParams {
            sweep,
            span,
            ..Default::default()
        }
    }

    #[test]
    fn reference_sample() {
        // Windows starting at column 2 are one column too narrow for the
        // default span rule, so the costlier window from column 0 wins.
        let w = search(b"2647", b"5626473", &AbsDiff).unwrap();
        assert_eq!(w.start, Pos::new(0, 0));
        assert_eq!(w.end, Pos::new(3, 5));
        assert_eq!(w.cost, 5);
    }

    #[test]
    fn reference_sample_counting_columns() {
        let dpm = Dpm::new(params(SweepBound::Exclusive, SpanRule::Columns));
        let (w, stats) = dpm.search_with_stats(b"2647", b"5626473", &AbsDiff);
        let w = w.unwrap();
        assert_eq!(w.start, Pos::new(0, 2));
        assert_eq!(w.end, Pos::new(3, 5));
        assert_eq!(w.cost, 0);
        assert_eq!(w.text(b"5626473"), b"2647");
        assert_eq!(stats.offsets, 3);
        assert_eq!(stats.accepted, 3);
        assert_eq!(stats.rejected, 0);
        assert_eq!(stats.matches, 1);
    }

    #[test]
    fn stats_count_rejections() {
        let (w, stats) = Dpm::default().search_with_stats(b"2647", b"5626473", &AbsDiff);
        assert!(w.is_ok());
        assert_eq!(stats.offsets, 3);
        assert_eq!(stats.accepted, 1);
        assert_eq!(stats.rejected, 2);
        assert_eq!(stats.cost, 5);
    }

    #[test]
    fn equal_lengths_try_no_offset() {
        let (w, stats) = Dpm::default().search_with_stats(b"ACGT", b"ACGT", &Unit::default());
        assert_eq!(
            w,
            Err(DpmError::NoMatch {
                pattern_len: 4,
                text_len: 4
            })
        );
        assert_eq!(stats.offsets, 0);
    }

    #[test]
    fn inclusive_bound_tries_last_offset() {
        let dpm = Dpm::new(params(SweepBound::Inclusive, SpanRule::Columns));
        let (w, stats) = dpm.search_with_stats(b"ACGT", b"ACGT", &Unit::default());
        let w = w.unwrap();
        assert_eq!(stats.offsets, 1);
        assert_eq!((w.start, w.end, w.cost), (Pos::new(0, 0), Pos::new(3, 3), 0));

        // The strict span rule can never accept a window when m == n.
        let dpm = Dpm::new(params(SweepBound::Inclusive, SpanRule::Distance));
        assert!(dpm
            .search(b"ACGT", b"ACGT", &Unit::default())
            .unwrap_err()
            .is_no_match());
    }

    #[test]
    fn invalid_inputs() {
        assert_eq!(search(b"", b"abc", &AbsDiff), Err(DpmError::EmptyPattern));
        assert_eq!(
            search(b"abcd", b"abc", &AbsDiff),
            Err(DpmError::PatternTooLong {
                pattern_len: 4,
                text_len: 3
            })
        );
        let dpm = Dpm::new(DpmParams {
            weights: Weights::new(1.5, -1.0, 1.5),
            ..Default::default()
        });
        assert!(matches!(
            dpm.search(b"ab", b"abcd", &AbsDiff),
            Err(DpmError::InvalidWeights(_))
        ));
    }

    #[test]
    fn trace_is_only_recorded_on_request() {
        let w = search(b"2647", b"5626473", &AbsDiff).unwrap();
        assert_eq!(w.path, None);

        let dpm = Dpm::new(DpmParams {
            trace: true,
            ..Default::default()
        });
        let w = dpm.search(b"2647", b"5626473", &AbsDiff).unwrap();
        let path = w.path.unwrap();
        assert_eq!(path.first(), Some(&Pos::new(0, 0)));
        assert_eq!(path.last(), Some(&Pos::new(3, 6)));
    }

    #[test]
    fn boxed_score_functions() {
        let f = crate::score::ScoreType::AbsDiff.build(1);
        let w = search(b"2647", b"5626473", &*f).unwrap();
        assert_eq!(w.cost, 5);
    }
}
