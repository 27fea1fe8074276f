use thiserror::Error;

/// which cap tripped before a search or enumeration completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapKind {
    Depth,
    Nodes,
    CatalystSize,
}

impl std::fmt::Display for CapKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            CapKind::Depth => "max_depth",
            CapKind::Nodes => "max_nodes",
            CapKind::CatalystSize => "max_catalyst_size",
        };
        write!(f, "{s}")
    }
}

/// why a single path step failed to replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyReason {
    RecipeNotApplicable,
    IntermediateUnderflow,
    FinalStateMismatch,
}

impl std::fmt::Display for VerifyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            VerifyReason::RecipeNotApplicable => "recipe not applicable at this state",
            VerifyReason::IntermediateUnderflow => "step would underflow the running multiset",
            VerifyReason::FinalStateMismatch => "final state does not equal target + catalyst",
        };
        write!(f, "{s}")
    }
}

/// closed error taxonomy for the library surface. the CLI binary
/// wraps these in `anyhow` for its own glue but the library itself
/// never returns anything but this enum.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed input: {0}")]
    Input(String),

    #[error("no solution exists within the given caps")]
    NoSolution,

    #[error("{cap} exceeded before search completed")]
    Truncated { cap: CapKind },

    #[error("path invalid at step {step}: {reason}")]
    VerifyFailure { step: usize, reason: VerifyReason },

    #[error("path unschedulable at step {step}: {reason}")]
    ScheduleFailure { step: usize, reason: VerifyReason },

    #[error("cancelled")]
    Cancelled,

    #[error("internal invariant violated: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
