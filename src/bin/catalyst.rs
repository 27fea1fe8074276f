//! Catalyst CLI Binary
//!
//! Thin wrapper around the library: parses the canonical text format,
//! calls into `catalyst_solver`, and maps results onto the exit codes
//! of SPEC_FULL.md §6. All process I/O lives here; the library itself
//! never writes to stdout/stderr except through the logging facade.

use catalyst_solver::{format, schedule, solve, verify};
use catalyst_solver::{CancelToken, Error, Multiset, Options, Problem, RecipeSet};
use clap::{Parser, Subcommand, ValueEnum};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "catalyst", about = "Minimum-catalyst path solver")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// find the catalyst-minimal, step-minimal set of paths from SOURCE to TARGET
    Solve {
        source: String,
        target: String,
        #[arg(long, default_value_t = catalyst_solver::DEFAULT_MAX_CATALYST_SIZE)]
        catalyst_cap: u32,
        #[arg(long, default_value_t = catalyst_solver::DEFAULT_MAX_DEPTH)]
        depth_cap: u32,
        #[arg(long, default_value_t = catalyst_solver::DEFAULT_MAX_NODES)]
        node_cap: u64,
        #[arg(long, default_value_t = 1)]
        repetitions: u32,
        #[arg(long)]
        parallel: bool,
        #[arg(long, value_enum, default_value_t = RecipesArg::Standard)]
        recipes: RecipesArg,
    },
    /// replay a canonical path line and confirm it reaches its target
    Verify { path: String },
    /// group a canonical path line's steps into concurrency stages
    Schedule { path: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum RecipesArg {
    Standard,
    FoldingsOnly,
    InversionsOnly,
}

impl RecipesArg {
    fn build(self) -> RecipeSet {
        match self {
            RecipesArg::Standard => RecipeSet::standard(),
            RecipesArg::FoldingsOnly => RecipeSet::foldings_only(),
            RecipesArg::InversionsOnly => RecipeSet::inversions_only(),
        }
    }
}

fn main() -> ExitCode {
    catalyst_solver::init();
    let cli = Cli::parse();
    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(3)
        }
    }
}

fn run(command: Command) -> anyhow::Result<ExitCode> {
    match command {
        Command::Solve {
            source,
            target,
            catalyst_cap,
            depth_cap,
            node_cap,
            repetitions,
            parallel,
            recipes,
        } => run_solve(
            &source,
            &target,
            catalyst_cap,
            depth_cap,
            node_cap,
            repetitions,
            parallel,
            recipes.build(),
        ),
        Command::Verify { path } => run_verify(&path),
        Command::Schedule { path } => run_schedule(&path),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_solve(
    source: &str,
    target: &str,
    catalyst_cap: u32,
    depth_cap: u32,
    node_cap: u64,
    repetitions: u32,
    parallel: bool,
    recipes: RecipeSet,
) -> anyhow::Result<ExitCode> {
    let source: Multiset = source.parse()?;
    let target: Multiset = target.parse()?;
    let problem = Problem::new(source, target, recipes, repetitions)?;
    let options = Options {
        max_catalyst_size: catalyst_cap,
        max_depth: depth_cap,
        max_nodes: node_cap,
        repetitions,
        parallel,
        cancel: CancelToken::new(),
    };

    match solve(&problem, &options) {
        Ok(solution) => {
            println!(
                "minimum catalyst size {}, path length {}",
                solution.catalyst_size(),
                solution.path_length()
            );
            for (catalyst, path) in solution.paths() {
                println!(
                    "{}",
                    format::format_line(&source, &target, repetitions, catalyst, path)
                );
            }
            Ok(ExitCode::from(0))
        }
        Err(Error::NoSolution) => {
            eprintln!("no solution within the given caps");
            Ok(ExitCode::from(1))
        }
        Err(Error::Truncated { cap }) => {
            eprintln!("{cap} exceeded before search completed");
            Ok(ExitCode::from(2))
        }
        Err(err) => Err(err.into()),
    }
}

fn run_verify(path_text: &str) -> anyhow::Result<ExitCode> {
    let parsed = format::parse_line(path_text)?;
    let problem = Problem::new(
        parsed.source,
        parsed.target,
        RecipeSet::standard(),
        parsed.repetitions,
    )?;
    match verify(&problem, &parsed.catalyst, &parsed.path) {
        Ok(()) => {
            println!("valid");
            Ok(ExitCode::from(0))
        }
        Err(Error::VerifyFailure { step, reason }) => {
            eprintln!("invalid at step {step}: {reason}");
            Ok(ExitCode::from(1))
        }
        Err(err) => Err(err.into()),
    }
}

fn run_schedule(path_text: &str) -> anyhow::Result<ExitCode> {
    let parsed = format::parse_line(path_text)?;
    let problem = Problem::new(
        parsed.source,
        parsed.target,
        RecipeSet::standard(),
        parsed.repetitions,
    )?;
    match schedule(&problem, &parsed.catalyst, &parsed.path) {
        Ok(stages) => {
            print!("{stages}");
            Ok(ExitCode::from(0))
        }
        Err(Error::ScheduleFailure { step, reason }) => {
            eprintln!("unschedulable at step {step}: {reason}");
            Ok(ExitCode::from(1))
        }
        Err(err) => Err(err.into()),
    }
}
