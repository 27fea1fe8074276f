use crate::error::Error;
use crate::multiset::Multiset;
use crate::recipe::{Kind, RecipeSet};
use crate::token::Token;

/// an immutable `(SOURCE, TARGET, recipes, n)` tuple plus the
/// invariants the search reuses on every candidate catalyst:
/// polarity delta, minimum inversions, and a path-length lower bound.
/// constructed once per solve and never mutated; cheap to `Clone`
/// so a single `Problem` can be shared across parallel search workers.
#[derive(Debug, Clone)]
pub struct Problem {
    source: Multiset,
    target: Multiset,
    recipes: RecipeSet,
    repetitions: u32,
    polarity_delta: i32,
    min_inversions: u32,
    length_lower_bound: u32,
    feasible: bool,
}

impl Problem {
    /// `source`/`target` are the *unscaled* multisets; this scales
    /// them by `repetitions` internally, so `Problem::source()` and
    /// `Problem::target()` already return `n * SOURCE`/`n * TARGET`.
    pub fn new(
        source: Multiset,
        target: Multiset,
        recipes: RecipeSet,
        repetitions: u32,
    ) -> crate::error::Result<Self> {
        if repetitions < 1 {
            return Err(Error::Input("repetitions must be >= 1".into()));
        }
        let source = source.scale(repetitions)?;
        let target = target.scale(repetitions)?;

        let polarity_delta = target.negative_count() as i32 - source.negative_count() as i32;
        let divisible = polarity_delta % 4 == 0;
        let min_inversions = if divisible {
            polarity_delta.unsigned_abs() / 4
        } else {
            0
        };

        let (wants_neg_to_pos, wants_pos_to_neg) = match polarity_delta.signum() {
            s if s < 0 => (true, false),
            s if s > 0 => (false, true),
            _ => (false, false),
        };
        let has_direction = |want_neg_to_pos: bool| {
            recipes.recipes().iter().any(|r| {
                r.kind() == Kind::Inversion
                    && (r.inputs().negative_count() == 4) == want_neg_to_pos
            })
        };
        let inversions_available = min_inversions == 0
            || (wants_neg_to_pos && has_direction(true))
            || (wants_pos_to_neg && has_direction(false));

        let folds_lower_bound = folds_lower_bound(&source, &target, min_inversions);
        let length_lower_bound = min_inversions + folds_lower_bound;

        let feasible = divisible && source.size() == target.size() && inversions_available;

        Ok(Self {
            source,
            target,
            recipes,
            repetitions,
            polarity_delta,
            min_inversions,
            length_lower_bound,
            feasible,
        })
    }

    pub fn source(&self) -> &Multiset {
        &self.source
    }

    pub fn target(&self) -> &Multiset {
        &self.target
    }

    pub fn recipes(&self) -> &RecipeSet {
        &self.recipes
    }

    pub fn repetitions(&self) -> u32 {
        self.repetitions
    }

    pub fn polarity_delta(&self) -> i32 {
        self.polarity_delta
    }

    pub fn min_inversions(&self) -> u32 {
        self.min_inversions
    }

    pub fn length_lower_bound(&self) -> u32 {
        self.length_lower_bound
    }

    /// whether any catalyst at all could possibly bridge SOURCE to
    /// TARGET under this recipe set: sizes must match (catalyst
    /// augmentation never changes the size gap) and the polarity
    /// delta must be resolvable with the inversions this recipe set
    /// actually carries. catalyst-invariant, computed once here so
    /// the enumerator and solver both short-circuit to `NoSolution`
    /// instead of exhausting the catalyst cap on a hopeless problem.
    pub fn feasible(&self) -> bool {
        self.feasible
    }
}

/// half the sum of per-token absolute differences inversions can't
/// account for: each inversion moves a complete {E,L,P,X} <-> {G,O,T,Z}
/// set (8 tokens), each folding step moves exactly one token of each
/// polarity. this is a heuristic lower bound used only as informational
/// `Problem` metadata, never as a hard search cutoff.
fn folds_lower_bound(source: &Multiset, target: &Multiset, min_inversions: u32) -> u32 {
    let diff: u32 = Token::ALPHABET
        .iter()
        .map(|&t| (target.get(t) as i32 - source.get(t) as i32).unsigned_abs())
        .sum();
    let resolved_by_inversions = min_inversions.saturating_mul(8);
    diff.saturating_sub(resolved_by_inversions) / 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::RecipeSet;

    #[test]
    fn rejects_zero_repetitions() {
        let source: Multiset = "EP".parse().unwrap();
        let target: Multiset = "LX".parse().unwrap();
        assert!(Problem::new(source, target, RecipeSet::standard(), 0).is_err());
    }

    #[test]
    fn scales_source_and_target_by_repetitions() {
        let source: Multiset = "EP".parse().unwrap();
        let target: Multiset = "LX".parse().unwrap();
        let problem = Problem::new(source, target, RecipeSet::standard(), 2).unwrap();
        assert_eq!(problem.source().size(), 4);
        assert_eq!(problem.target().size(), 4);
    }

    #[test]
    fn identical_source_and_target_has_zero_delta() {
        let m: Multiset = "EGLO".parse().unwrap();
        let problem = Problem::new(m, m, RecipeSet::standard(), 1).unwrap();
        assert_eq!(problem.polarity_delta(), 0);
        assert_eq!(problem.min_inversions(), 0);
        assert!(problem.feasible());
    }

    #[test]
    fn infeasible_when_sizes_differ() {
        let source: Multiset = "E".parse().unwrap();
        let target: Multiset = "EE".parse().unwrap();
        let problem = Problem::new(source, target, RecipeSet::standard(), 1).unwrap();
        assert!(!problem.feasible());
    }

    #[test]
    fn infeasible_when_delta_not_divisible_by_four() {
        // GGLX: neg={L,X}=2, pos={G,G}=2; vs EP: neg={E,P}=2, pos=0.
        // sizes: GGLX=4, EP=2 -- use equal-size inputs instead.
        let source: Multiset = "EP".parse().unwrap(); // neg=2 pos=0
        let target: Multiset = "GO".parse().unwrap(); // neg=0 pos=2, delta=-2
        let problem = Problem::new(source, target, RecipeSet::standard(), 1).unwrap();
        assert!(!problem.feasible());
    }

    #[test]
    fn infeasible_without_matching_inversion_direction() {
        let source: Multiset = "ELPX".parse().unwrap(); // all negative, neg=4
        let target: Multiset = "GOTZ".parse().unwrap(); // all positive, neg=0, delta=-4
        let problem = Problem::new(source, target, RecipeSet::foldings_only(), 1).unwrap();
        assert!(!problem.feasible());
        let problem = Problem::new(source, target, RecipeSet::standard(), 1).unwrap();
        assert!(problem.feasible());
        assert_eq!(problem.min_inversions(), 1);
    }
}
