use crate::error::{Error, Result, VerifyReason};
use crate::multiset::Multiset;
use crate::problem::Problem;
use crate::search::Path;

/// stateless replay of `path` against `problem.source() + catalyst`,
/// checking containment at every step and final equality against
/// `problem.target() + catalyst`. this is the sole arbiter of path
/// validity; `schedule` defers to it before grouping anything.
pub fn verify(problem: &Problem, catalyst: &Multiset, path: &Path) -> Result<()> {
    let mut state = problem.source().add(catalyst)?;
    let target = problem.target().add(catalyst)?;

    for (index, step) in path.steps().iter().enumerate() {
        if !step.applicable_to(&state) {
            return Err(Error::VerifyFailure {
                step: index,
                reason: VerifyReason::RecipeNotApplicable,
            });
        }
        state = state
            .sub(step.inputs())
            .and_then(|s| s.add(step.outputs()))
            .map_err(|_| Error::VerifyFailure {
                step: index,
                reason: VerifyReason::IntermediateUnderflow,
            })?;
    }

    if state != target {
        return Err(Error::VerifyFailure {
            step: path.len(),
            reason: VerifyReason::FinalStateMismatch,
        });
    }
    Ok(())
}
