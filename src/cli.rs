use crate::{
    config::DpmParams,
    error::DpmError,
    generate::{generate_pair, GenerateArgs},
    score::ScoreType,
    types::{Cost, Seq},
};
use bio::io::fasta;
use clap::{value_parser, Parser};
use itertools::Itertools;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    ops::ControlFlow,
    path::{Path, PathBuf},
};

/// Searched when no input is given.
pub const SAMPLE_PATTERN: &[u8] = b"2647";
pub const SAMPLE_TEXT: &[u8] = b"5626473";

#[derive(Parser, Serialize, Deserialize)]
#[clap(author, about)]
pub struct Cli {
    /// A .txt file of pattern/text line pairs, a Fasta file of record pairs, or a directory of those.
    #[clap(
        short,
        long,
        value_parser = value_parser!(PathBuf),
        display_order = 1,
        conflicts_with_all = ["pattern", "length"]
    )]
    pub input: Option<PathBuf>,

    /// The pattern to search for.
    #[clap(short, long, display_order = 1, requires = "text", conflicts_with = "length")]
    pub pattern: Option<String>,

    /// The text to search in.
    #[clap(short, long, display_order = 1, requires = "pattern")]
    pub text: Option<String>,

    /// Score of each pattern/text symbol pair.
    #[clap(long, value_enum, default_value_t, display_order = 10)]
    pub score: ScoreType,

    /// Score of a mismatch for the unit score functions.
    #[clap(long, default_value_t = 1, display_order = 10)]
    pub mismatch: Cost,

    /// Read the search parameters from a JSON file instead of the flags.
    #[clap(long, value_parser = value_parser!(PathBuf), display_order = 10)]
    pub params: Option<PathBuf>,

    /// Print each result as one line of JSON.
    #[clap(long, display_order = 10)]
    pub json: bool,

    /// Print less. Pass twice for summary line only.
    ///
    /// Once: only print the found windows, without per-pair stats.
    /// Twice: only print a summary line, e.g. for benchmarking.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub silent: u8,

    #[clap(flatten)]
    pub dpm: DpmParams,

    /// Options to generate an input pair.
    #[clap(flatten, next_help_heading = "Generated input")]
    pub generate: GenerateArgs,
}

impl Cli {
    /// The search parameters: from `--params` when given, otherwise from the flags.
    pub fn dpm_params(&self) -> Result<DpmParams, DpmError> {
        match &self.params {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|e| {
                    DpmError::InvalidParams(format!("{}: {e}", path.display()))
                })?;
                DpmParams::from_json(&json)
            }
            None => Ok(self.dpm),
        }
    }

    /// Call the given function for each pair in the input.
    pub fn process_input_pairs(
        &self,
        mut run_pair: impl FnMut(Seq, Seq) -> ControlFlow<()>,
    ) -> io::Result<()> {
        if let (Some(pattern), Some(text)) = (&self.pattern, &self.text) {
            let _ = run_pair(pattern.as_bytes(), text.as_bytes());
            return Ok(());
        }

        if let Some(input) = &self.input {
            let files = if input.is_file() {
                vec![input.clone()]
            } else {
                let mut files = input
                    .read_dir()?
                    .map(|entry| entry.map(|e| e.path()))
                    .collect::<io::Result<Vec<_>>>()?;
                files.sort();
                files
            };
            for f in files {
                if process_file(&f, &mut run_pair)?.is_break() {
                    break;
                }
            }
            return Ok(());
        }

        if let Some(options) = self.generate.to_generate_options() {
            let seed = self.generate.seed.unwrap_or_else(|| {
                let seed = ChaCha8Rng::from_entropy().gen_range(0..u64::MAX);
                eprintln!("Seed: {seed}");
                seed
            });
            let rng = &mut ChaCha8Rng::seed_from_u64(seed);
            for _ in 0..self.generate.cnt {
                let (pattern, text) = generate_pair(&options, rng);
                if run_pair(&pattern, &text).is_break() {
                    break;
                }
            }
            return Ok(());
        }

        let _ = run_pair(SAMPLE_PATTERN, SAMPLE_TEXT);
        Ok(())
    }
}

fn invalid_data(e: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, e)
}

fn process_file(
    f: &Path,
    run_pair: &mut impl FnMut(Seq, Seq) -> ControlFlow<()>,
) -> io::Result<ControlFlow<()>> {
    let ext = f.extension().and_then(|e| e.to_str()).unwrap_or_default();
    match ext {
        "txt" => {
            let lines = BufReader::new(File::open(f)?)
                .lines()
                .collect::<io::Result<Vec<_>>>()?;
            for (a, b) in lines.iter().tuples() {
                if run_pair(a.as_bytes(), b.as_bytes()).is_break() {
                    return Ok(ControlFlow::Break(()));
                }
            }
        }
        "fna" | "fa" | "fasta" => {
            for (a, b) in fasta::Reader::new(BufReader::new(File::open(f)?))
                .records()
                .tuples()
            {
                let (a, b) = (a.map_err(invalid_data)?, b.map_err(invalid_data)?);
                if run_pair(a.seq(), b.seq()).is_break() {
                    return Ok(ControlFlow::Break(()));
                }
            }
        }
        ext => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "Unknown file extension {ext:?} of {}. Must be in {{txt,fna,fa,fasta}}.",
                    f.display()
                ),
            ))
        }
    }
    Ok(ControlFlow::Continue(()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SpanRule, SweepBound};

    fn pairs(args: &[&str]) -> Vec<(String, String)> {
        let cli = Cli::try_parse_from(std::iter::once("dp-matching").chain(args.iter().copied()))
            .unwrap();
        let mut pairs = vec![];
        cli.process_input_pairs(|a, b| {
            pairs.push((
                String::from_utf8_lossy(a).into_owned(),
                String::from_utf8_lossy(b).into_owned(),
            ));
            ControlFlow::Continue(())
        })
        .unwrap();
        pairs
    }

    fn temp_file(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("dp-matching-{}-{name}", std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn default_sample() {
        assert_eq!(pairs(&[]), [("2647".to_string(), "5626473".to_string())]);
    }

    #[test]
    fn literal_pair() {
        assert_eq!(
            pairs(&["-p", "hello", "-t", "xxhelloxx"]),
            [("hello".to_string(), "xxhelloxx".to_string())]
        );
    }

    #[test]
    fn pattern_requires_text() {
        assert!(Cli::try_parse_from(["dp-matching", "-p", "hello"]).is_err());
    }

    #[test]
    fn generated_lengths_require_each_other() {
        assert!(Cli::try_parse_from(["dp-matching", "-m", "4"]).is_err());
        assert!(Cli::try_parse_from(["dp-matching", "-n", "40"]).is_err());
        assert!(Cli::try_parse_from(["dp-matching", "-n", "40", "-m", "4"]).is_ok());
    }

    #[test]
    fn txt_pairs() {
        let path = temp_file("pairs.txt", "ab\nxxab\ncd\ncdcd\n");
        let p = pairs(&["-i", path.to_str().unwrap()]);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(p.len(), 2);
        assert_eq!(p[1], ("cd".to_string(), "cdcd".to_string()));
    }

    #[test]
    fn fasta_pairs() {
        let path = temp_file("pairs.fa", ">p\nACG\n>t\nTTACGTT\n");
        let p = pairs(&["-i", path.to_str().unwrap()]);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(p, [("ACG".to_string(), "TTACGTT".to_string())]);
    }

    #[test]
    fn unknown_extension() {
        let path = temp_file("pairs.csv", "a,b\n");
        let cli = Cli::try_parse_from(["dp-matching", "-i", path.to_str().unwrap()]).unwrap();
        let r = cli.process_input_pairs(|_, _| ControlFlow::Continue(()));
        std::fs::remove_file(&path).unwrap();
        assert_eq!(r.unwrap_err().kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn generated_pairs_are_reproducible() {
        let args = ["-n", "50", "-m", "10", "-x", "3", "--seed", "7"];
        let p = pairs(&args);
        assert_eq!(p.len(), 3);
        assert!(p.iter().all(|(_, t)| t.len() == 50));
        assert_eq!(p, pairs(&args));
    }

    #[test]
    fn break_stops_early() {
        let cli = Cli::try_parse_from(["dp-matching", "-n", "20", "-m", "4", "-x", "10", "--seed", "1"])
            .unwrap();
        let mut cnt = 0;
        cli.process_input_pairs(|_, _| {
            cnt += 1;
            ControlFlow::Break(())
        })
        .unwrap();
        assert_eq!(cnt, 1);
    }

    #[test]
    fn params_from_flags_and_json() {
        let cli = Cli::try_parse_from([
            "dp-matching",
            "--sweep",
            "inclusive",
            "--span",
            "columns",
            "--diagonal-weight",
            "2",
        ])
        .unwrap();
        let params = cli.dpm_params().unwrap();
        assert_eq!(params.sweep, SweepBound::Inclusive);
        assert_eq!(params.span, SpanRule::Columns);
        assert_eq!(params.weights.diagonal, 2.0);

        let path = temp_file("params.json", r#"{"span":"Columns"}"#);
        let cli = Cli::try_parse_from(["dp-matching", "--params", path.to_str().unwrap()]).unwrap();
        let params = cli.dpm_params();
        std::fs::remove_file(&path).unwrap();
        let params = params.unwrap();
        assert_eq!(params.span, SpanRule::Columns);
        assert_eq!(params.sweep, SweepBound::Exclusive);
    }
}
