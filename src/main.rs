use clap::Parser;
use dp_matching::{cli::Cli, stats::SearchStats, Dpm, MatchWindow, Seq};
use std::{ops::ControlFlow, process::ExitCode};

fn print_window(w: &MatchWindow, json: bool) {
    if json {
        match serde_json::to_string(w) {
            Ok(line) => println!("{line}"),
            Err(e) => eprintln!("Could not serialize {w}: {e}"),
        }
    } else {
        println!("start {}", w.start);
        println!("end   {}", w.end);
        println!("cost  {}", w.cost);
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Cli::parse();

    let params = match args.dpm_params() {
        Ok(params) => params,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let dpm = Dpm::new(params);
    let score = args.score.build(args.mismatch);

    let mut avg_result = SearchStats::default();
    let mut failed = 0;
    let show_stats = !args.json && args.silent == 0;

    // Process the input.
    let input = args.process_input_pairs(|a: Seq, b: Seq| {
        let (r, stats) = dpm.search_with_stats(a, b, &*score);
        match &r {
            Ok(w) if args.silent <= 1 => print_window(w, args.json),
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error: {e}");
                failed += 1;
            }
        }
        if show_stats {
            stats.print();
        }
        avg_result += stats;
        ControlFlow::Continue(())
    });

    if let Err(e) = input {
        eprintln!("Could not read input: {e}");
        return ExitCode::FAILURE;
    }

    if !args.json && (avg_result.sample_size > 1 || args.silent >= 2) {
        avg_result.print();
    }

    if failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

#[cfg(test)]
mod test {
    #[test]
    fn cli_test() {
        <super::Cli as clap::CommandFactory>::command().debug_assert();
    }
}
