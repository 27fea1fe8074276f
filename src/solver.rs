use crate::catalyst::CatalystEnumerator;
use crate::error::{CapKind, Error, Result};
use crate::multiset::Multiset;
use crate::options::Options;
use crate::problem::Problem;
use crate::search::{self, Path};
use log::{debug, warn};
use rayon::prelude::*;

/// the library's return carrier: the minimal catalyst size, the
/// minimal path length at that size, and the deduplicated, sorted set
/// of `(Catalyst, Path)` pairs achieving both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    catalyst_size: u32,
    path_length: usize,
    paths: Vec<(Multiset, Path)>,
}

impl Solution {
    pub fn catalyst_size(&self) -> u32 {
        self.catalyst_size
    }

    pub fn path_length(&self) -> usize {
        self.path_length
    }

    pub fn paths(&self) -> &[(Multiset, Path)] {
        &self.paths
    }
}

/// drives the catalyst enumerator and path searcher: the first
/// catalyst size that yields any path becomes the floor; every
/// candidate of that same size is tried before stopping, and the
/// surviving paths are filtered down to the shortest length among
/// them (§4.6).
pub fn solve(problem: &Problem, options: &Options) -> Result<Solution> {
    if !problem.feasible() {
        debug!("problem is infeasible under this recipe set, skipping enumeration");
        return Err(Error::NoSolution);
    }

    let mut enumerator = CatalystEnumerator::new(problem, options.max_catalyst_size).peekable();

    loop {
        if options.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        let Some(first) = enumerator.next() else {
            return Err(Error::NoSolution);
        };
        let size = first.size();
        let mut batch = vec![first];
        while let Some(next) = enumerator.peek() {
            if next.size() != size {
                break;
            }
            batch.push(enumerator.next().expect("peek just confirmed Some"));
        }

        debug!("trying {} catalyst candidate(s) of size {size}", batch.len());
        let results: Vec<(Multiset, Result<Vec<Path>>)> = if options.parallel {
            debug!(
                "fanning out across up to {} worker threads",
                num_cpus::get().min(batch.len().max(1))
            );
            batch
                .into_par_iter()
                .map(|candidate| {
                    let result = search::search(problem, &candidate, options);
                    (candidate, result)
                })
                .collect()
        } else {
            batch
                .into_iter()
                .map(|candidate| {
                    let result = search::search(problem, &candidate, options);
                    (candidate, result)
                })
                .collect()
        };

        let mut oks: Vec<(Multiset, Vec<Path>)> = Vec::new();
        let mut truncation: Option<CapKind> = None;
        for (candidate, result) in results {
            match result {
                Ok(paths) => oks.push((candidate, paths)),
                Err(Error::NoSolution) => {}
                Err(Error::Truncated { cap }) => {
                    truncation.get_or_insert(cap);
                }
                Err(Error::Cancelled) => return Err(Error::Cancelled),
                Err(other) => return Err(other),
            }
        }

        if !oks.is_empty() {
            if truncation.is_some() {
                warn!(
                    "a sibling candidate at catalyst size {size} truncated; its paths \
                     are not reflected in this solution"
                );
            }
            return Ok(build_solution(size, oks));
        }

        if let Some(cap) = truncation {
            warn!("catalyst size {size} truncated ({cap}) before any candidate succeeded");
            return Err(Error::Truncated { cap });
        }
    }
}

fn build_solution(catalyst_size: u32, oks: Vec<(Multiset, Vec<Path>)>) -> Solution {
    let min_length = oks
        .iter()
        .flat_map(|(_, paths)| paths.iter().map(Path::len))
        .min()
        .expect("solve only calls build_solution with at least one non-empty path list");

    let mut paths: Vec<(Multiset, Path)> = oks
        .into_iter()
        .flat_map(|(catalyst, paths)| {
            paths
                .into_iter()
                .filter(|p| p.len() == min_length)
                .map(move |p| (catalyst, p))
        })
        .collect();

    paths.sort_by(|(ca, pa), (cb, pb)| {
        ca.canonical_bytes()
            .cmp(&cb.canonical_bytes())
            .then_with(|| pa.to_string().cmp(&pb.to_string()))
    });
    paths.dedup();

    Solution {
        catalyst_size,
        path_length: min_length,
        paths,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::RecipeSet;

    fn problem(source: &str, target: &str) -> Problem {
        Problem::new(
            source.parse().unwrap(),
            target.parse().unwrap(),
            RecipeSet::standard(),
            1,
        )
        .unwrap()
    }

    #[test]
    fn finds_the_minimal_singleton_catalyst_for_ep_lx() {
        let p = problem("EP", "LX");
        let options = Options::default();
        let solution = solve(&p, &options).unwrap();
        assert_eq!(solution.catalyst_size(), 1);
        assert_eq!(solution.path_length(), 2);
        assert!(solution
            .paths()
            .iter()
            .any(|(c, path)| c.to_string() == "O" && path.to_string() == "EO -> GL | GP -> OX"));
    }

    #[test]
    fn identical_source_and_target_needs_no_catalyst() {
        let p = problem("EG", "EG");
        let options = Options::default();
        let solution = solve(&p, &options).unwrap();
        assert_eq!(solution.catalyst_size(), 0);
        assert_eq!(solution.path_length(), 0);
        assert_eq!(
            solution.paths().to_vec(),
            vec![(Multiset::EMPTY, Path::new(Vec::new()))]
        );
    }

    #[test]
    fn infeasible_problem_yields_no_solution() {
        let p = problem("E", "EE");
        let options = Options::default();
        assert!(matches!(solve(&p, &options), Err(Error::NoSolution)));
    }

    #[test]
    fn catalyst_cap_below_true_minimum_yields_no_solution_not_truncated() {
        let p = problem("EP", "LX");
        let mut options = Options::default();
        options.max_catalyst_size = 0;
        assert!(matches!(solve(&p, &options), Err(Error::NoSolution)));
    }

    #[test]
    fn parallel_and_sequential_solves_agree() {
        let p = problem("EP", "LX");
        let mut sequential = Options::default();
        sequential.parallel = false;
        let mut parallel = Options::default();
        parallel.parallel = true;

        let a = solve(&p, &sequential).unwrap();
        let b = solve(&p, &parallel).unwrap();
        assert_eq!(a, b);
    }
}
