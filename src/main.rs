use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;

use chronosat::heuristic::{LabelOrder, OccurrencePhase, RandomDecision};
use chronosat::{Solver, Verdict};

/// DPLL SAT solver with two-watched-literal propagation and chronological
/// backtracking.
#[derive(Parser)]
#[command(name = "chronosat", version)]
struct Cli {
    /// DIMACS CNF input file
    file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decision heuristic
    #[arg(long, value_enum, default_value = "label-order")]
    heuristic: HeuristicArg,

    /// Seed for the random heuristic
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum HeuristicArg {
    /// First unassigned variable in label order, TRUE first
    LabelOrder,
    /// Random variable and phase (deterministic per seed)
    Random,
    /// Phase from literal occurrence counts
    Occurrence,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let input = fs::read_to_string(&cli.file)
        .with_context(|| format!("cannot read {}", cli.file.display()))?;

    let mut solver = Solver::from_dimacs(&input)
        .with_context(|| format!("cannot parse {}", cli.file.display()))?;

    match cli.heuristic {
        HeuristicArg::LabelOrder => solver.set_heuristic(LabelOrder),
        HeuristicArg::Random => solver.set_heuristic(RandomDecision::new(cli.seed)),
        HeuristicArg::Occurrence => solver.set_heuristic(OccurrencePhase),
    }

    match solver.solve() {
        Verdict::Sat(model) => {
            println!("SATISFIABLE");
            let lits: Vec<String> = model.as_vec().iter().map(i32::to_string).collect();
            if lits.is_empty() {
                println!("v 0");
            } else {
                println!("v {} 0", lits.join(" "));
            }
        }
        Verdict::Unsat => {
            println!("UNSATISFIABLE");
        }
    }

    let stats = solver.stats();
    info!(
        "{} decisions, {} propagations, {} conflicts",
        stats.decisions, stats.propagations, stats.conflicts
    );

    Ok(ExitCode::SUCCESS)
}
