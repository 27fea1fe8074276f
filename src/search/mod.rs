mod frontier;
mod path;

pub use path::Path;

use crate::error::{CapKind, Error};
use crate::multiset::Multiset;
use crate::options::Options;
use crate::problem::Problem;
use frontier::Frontier;

/// breadth-first search from `SOURCE+catalyst` to `TARGET+catalyst`,
/// returning every shortest rewrite sequence tied for minimum length.
/// see `crate::search::frontier` for the level-by-level graph and the
/// equivalence-folding dedup applied during reconstruction.
pub fn search(problem: &Problem, catalyst: &Multiset, options: &Options) -> crate::error::Result<Vec<Path>> {
    let source = problem.source().add(catalyst)?;
    let target = problem.target().add(catalyst)?;
    if source == target {
        return Ok(vec![Path::new(Vec::new())]);
    }

    let recipes = problem.recipes();
    let mut frontier = Frontier::new(source);
    let mut depth = 0u32;

    loop {
        if options.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        if depth >= options.max_depth {
            return Err(Error::Truncated {
                cap: CapKind::Depth,
            });
        }

        let expanded = frontier.expand(recipes, options.max_nodes);
        depth += 1;
        if expanded.over_node_cap {
            return Err(Error::Truncated {
                cap: CapKind::Nodes,
            });
        }

        if let Some(target_node) = frontier.contains(&target) {
            let sequences = frontier.reconstruct(target_node, recipes);
            let mut paths: Vec<Path> = sequences
                .into_iter()
                .map(|sequence| {
                    Path::new(
                        sequence
                            .into_iter()
                            .map(|idx| recipes.recipes()[idx].clone())
                            .collect(),
                    )
                })
                .collect();
            if paths.is_empty() {
                return Err(Error::NoSolution);
            }
            paths.sort();
            paths.dedup();
            return Ok(paths);
        }

        if frontier.is_frontier_empty() {
            return Err(Error::NoSolution);
        }
    }
}
