use crate::error::{Error, Result};
use crate::multiset::Multiset;
use crate::problem::Problem;
use crate::recipe::Recipe;
use crate::search::Path;
use crate::token::Token;
use crate::verify::verify;

/// one concurrency group within a scheduled plan: the recipes run
/// together, plus the three multisets that describe the group's
/// effect on the running state: tokens carried past this stage
/// untouched (`reserved`), tokens this stage's recipes consume
/// (`working`), and tokens this stage leaves behind that no later
/// stage's recipes need (`released`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    reserved: Multiset,
    working: Multiset,
    released: Multiset,
    recipes: Vec<Recipe>,
}

impl Stage {
    pub fn reserved(&self) -> &Multiset {
        &self.reserved
    }

    pub fn working(&self) -> &Multiset {
        &self.working
    }

    pub fn released(&self) -> &Multiset {
        &self.released
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }
}

/// an ordered list of stages, numbered from 1 when rendered (§6).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Stages(Vec<Stage>);

impl Stages {
    pub fn stages(&self) -> &[Stage] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Stages {
    type Item = &'a Stage;
    type IntoIter = std::slice::Iter<'a, Stage>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// groups `path`'s steps into the fewest concurrency stages that
/// honour data dependencies on the running multiset (§4.8).
///
/// left-to-right greedy: each stage takes the longest prefix of the
/// remaining steps whose inputs are pairwise disjoint *and* jointly
/// contained in the pending multiset. the steps themselves are never
/// reordered: `path` already carries whatever canonical ordering the
/// searcher settled on for its equivalence class, so there is no
/// further tie-break to make here; picking the longest feasible
/// prefix of a fixed sequence has only one answer.
///
/// `released` is purely informational: it reports, per stage, which
/// of that stage's resulting tokens no remaining step still needs. It
/// is never subtracted out of the multiset carried into the next
/// stage, the full post-stage state keeps flowing forward so later
/// containment checks see every token actually present, not a
/// speculative reservation.
pub fn schedule(problem: &Problem, catalyst: &Multiset, path: &Path) -> Result<Stages> {
    verify(problem, catalyst, path).map_err(|err| match err {
        Error::VerifyFailure { step, reason } => Error::ScheduleFailure { step, reason },
        other => other,
    })?;

    let steps = path.steps();
    let mut pending = problem.source().add(catalyst)?;
    let mut stages = Vec::new();
    let mut i = 0;

    while i < steps.len() {
        let mut j = i;
        let mut working = Multiset::EMPTY;
        while j < steps.len() {
            let candidate_inputs = steps[j].inputs();
            if !candidate_inputs.disjoint(&working) {
                break;
            }
            let extended = working.add(candidate_inputs)?;
            if !pending.contains(&extended) {
                break;
            }
            working = extended;
            j += 1;
        }
        debug_assert!(
            j > i,
            "verify() already confirmed steps[i] is applicable to `pending`"
        );

        let mut produced = Multiset::EMPTY;
        for step in &steps[i..j] {
            produced = produced.add(step.outputs())?;
        }
        let reserved = pending.sub(&working)?;
        let post_pending = reserved.add(&produced)?;

        let mut remaining_needs = Multiset::EMPTY;
        for step in &steps[j..] {
            remaining_needs = remaining_needs.add(step.inputs())?;
        }
        let mut released_counts = [0u8; 8];
        for (idx, slot) in released_counts.iter_mut().enumerate() {
            let token = Token::from(idx);
            if remaining_needs.get(token) == 0 {
                *slot = post_pending.get(token);
            }
        }
        let released = Multiset::from_counts(released_counts);

        stages.push(Stage {
            reserved,
            working,
            released,
            recipes: steps[i..j].to_vec(),
        });

        pending = post_pending;
        i = j;
    }

    Ok(Stages(stages))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::{Recipe, RecipeSet};

    fn problem(source: &str, target: &str) -> Problem {
        Problem::new(
            source.parse().unwrap(),
            target.parse().unwrap(),
            RecipeSet::standard(),
            1,
        )
        .unwrap()
    }

    fn recipe(inputs: &str, outputs: &str) -> Recipe {
        Recipe::new(inputs.parse().unwrap(), outputs.parse().unwrap()).unwrap()
    }

    #[test]
    fn the_ep_lx_path_splits_into_two_single_recipe_stages() {
        let p = problem("EP", "LX");
        let catalyst: Multiset = "O".parse().unwrap();
        let path = Path::new(vec![recipe("EO", "LG"), recipe("PG", "XO")]);
        let stages = schedule(&p, &catalyst, &path).unwrap();
        assert_eq!(stages.len(), 2);
        assert_eq!(stages.stages()[0].recipes().len(), 1);
        assert_eq!(stages.stages()[1].recipes().len(), 1);
    }

    #[test]
    fn the_final_stage_releases_everything_nothing_else_needs() {
        let p = problem("EP", "LX");
        let catalyst: Multiset = "O".parse().unwrap();
        let path = Path::new(vec![recipe("EO", "LG"), recipe("PG", "XO")]);
        let stages = schedule(&p, &catalyst, &path).unwrap();
        let last = &stages.stages()[1];
        let expected: Multiset = "LXO".parse().unwrap();
        assert_eq!(*last.released(), expected);
    }

    #[test]
    fn the_first_stage_does_not_release_tokens_the_second_stage_needs() {
        let p = problem("EP", "LX");
        let catalyst: Multiset = "O".parse().unwrap();
        let path = Path::new(vec![recipe("EO", "LG"), recipe("PG", "XO")]);
        let stages = schedule(&p, &catalyst, &path).unwrap();
        let first = &stages.stages()[0];
        // stage one produces L,G (plus reserved P); P and G still feed
        // stage two's PG->XO, so only L can be released here.
        let expected: Multiset = "L".parse().unwrap();
        assert_eq!(*first.released(), expected);
    }

    #[test]
    fn stages_concatenated_reproduce_the_original_path() {
        let p = problem("EP", "LX");
        let catalyst: Multiset = "O".parse().unwrap();
        let path = Path::new(vec![recipe("EO", "LG"), recipe("PG", "XO")]);
        let stages = schedule(&p, &catalyst, &path).unwrap();
        let flattened: Vec<Recipe> = stages
            .stages()
            .iter()
            .flat_map(|s| s.recipes().to_vec())
            .collect();
        assert_eq!(flattened, path.steps().to_vec());
    }

    #[test]
    fn invalid_path_reports_schedule_failure_not_verify_failure() {
        let p = problem("EP", "LX");
        let catalyst: Multiset = "O".parse().unwrap();
        let path = Path::new(vec![recipe("PG", "XO"), recipe("EO", "LG")]);
        let err = schedule(&p, &catalyst, &path).unwrap_err();
        assert!(matches!(err, Error::ScheduleFailure { step: 0, .. }));
    }

    #[test]
    fn independent_steps_group_into_a_single_stage() {
        // two folding recipes whose inputs share no token type run
        // together as one stage when both fit the pending multiset.
        let source: Multiset = "EOPG".parse().unwrap();
        let target: Multiset = "LGXO".parse().unwrap();
        let p = Problem::new(source, target, RecipeSet::standard(), 1).unwrap();
        let path = Path::new(vec![recipe("EO", "LG"), recipe("PG", "XO")]);
        let stages = schedule(&p, &Multiset::EMPTY, &path).unwrap();
        assert_eq!(stages.len(), 1);
        assert_eq!(stages.stages()[0].recipes().len(), 2);
    }
}
