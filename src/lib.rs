pub mod catalyst;
pub mod error;
pub mod format;
pub mod multiset;
pub mod options;
pub mod problem;
pub mod recipe;
pub mod schedule;
pub mod search;
pub mod solver;
pub mod token;
pub mod verify;

pub use error::{CapKind, Error, Result, VerifyReason};
pub use multiset::Multiset;
pub use options::{CancelToken, Options};
pub use problem::Problem;
pub use recipe::{Kind, Recipe, RecipeSet};
pub use schedule::{schedule, Stage, Stages};
pub use search::Path;
pub use solver::{solve, Solution};
pub use token::{Polarity, Token};
pub use verify::verify;

/// the BFS level cap below which the solver never needs to escalate
/// for the scenarios this crate ships tests for; callers are free to
/// pass a larger `max_depth` through `Options`.
pub const DEFAULT_MAX_DEPTH: u32 = 6;
pub const DEFAULT_MAX_NODES: u64 = 1 << 16;
pub const DEFAULT_MAX_CATALYST_SIZE: u32 = 4;

/// initialize terminal logging. mirrors the corpus's own
/// `simplelog::TermLogger` setup, minus the file sink and the
/// ctrl-c reaper: this crate is a one-shot computation, not a
/// long-running service, so there is nothing to gracefully drain.
pub fn init() {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let _ = simplelog::TermLogger::init(
        log::LevelFilter::Info,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
}
