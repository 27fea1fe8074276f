use crate::multiset::Multiset;
use crate::recipe::RecipeSet;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction::Incoming;
use std::collections::{HashMap, HashSet};

/// the result of expanding the frontier by one BFS level.
pub struct ExpandResult {
    pub over_node_cap: bool,
}

/// the BFS level graph: a `petgraph::DiGraph` of multiset states,
/// edges weighted by the index of the recipe (within the problem's
/// `RecipeSet`) that produced them. states are deduplicated across
/// the whole search via `visited`, so the graph is exactly the
/// cycle-free DAG of shortest distances from the root (no state is
/// ever revisited at a longer depth than its first discovery).
pub struct Frontier {
    graph: DiGraph<Multiset, usize>,
    visited: HashMap<[u8; 8], NodeIndex>,
    current_level: Vec<NodeIndex>,
}

impl Frontier {
    pub fn new(source: Multiset) -> Self {
        let mut graph = DiGraph::new();
        let root = graph.add_node(source);
        let mut visited = HashMap::new();
        visited.insert(source.canonical_bytes(), root);
        Self {
            graph,
            visited,
            current_level: vec![root],
        }
    }

    pub fn contains(&self, state: &Multiset) -> Option<NodeIndex> {
        self.visited.get(&state.canonical_bytes()).copied()
    }

    pub fn is_frontier_empty(&self) -> bool {
        self.current_level.is_empty()
    }

    /// expands every node in the current level by every applicable
    /// recipe, adding new states/edges to the graph and replacing
    /// `current_level` with the newly discovered successors.
    ///
    /// a successor already present in `visited` from a *strictly
    /// earlier* level is reachable by some shorter path than the one
    /// this edge would represent; it is skipped entirely (no edge, no
    /// re-enqueue) so the graph never grows a non-shortest incoming
    /// edge into an already-resolved node. two different nodes of the
    /// *current* level converging on the same brand-new successor is
    /// still a legitimate pair of shortest-path edges and both are
    /// kept (that is the `already_this_level` case below).
    pub fn expand(&mut self, recipes: &RecipeSet, max_nodes: u64) -> ExpandResult {
        let resolved_before: HashSet<[u8; 8]> = self.visited.keys().copied().collect();
        let mut next_level = Vec::new();
        let mut seen_this_level = HashSet::new();
        for &node in &self.current_level {
            let state = self.graph[node];
            for (idx, recipe) in recipes.recipes().iter().enumerate() {
                if !recipe.applicable_to(&state) {
                    continue;
                }
                let successor = recipe
                    .apply(&state)
                    .expect("applicable_to already checked containment");
                let key = successor.canonical_bytes();
                if resolved_before.contains(&key) {
                    continue;
                }
                let already_this_level = self.visited.contains_key(&key);
                let target = if already_this_level {
                    self.visited[&key]
                } else {
                    if self.graph.node_count() as u64 >= max_nodes {
                        return ExpandResult { over_node_cap: true };
                    }
                    let created = self.graph.add_node(successor);
                    self.visited.insert(key, created);
                    created
                };
                self.graph.add_edge(node, target, idx);
                if seen_this_level.insert(key) {
                    next_level.push(target);
                }
            }
        }
        self.current_level = next_level;
        ExpandResult {
            over_node_cap: false,
        }
    }

    /// walks every predecessor edge from `target` back to the root,
    /// emitting each distinct edge sequence in source-to-target
    /// order. sequences that are swap-equivalent to an
    /// already-canonical ordering (two adjacent, independent steps
    /// out of non-decreasing recipe order) are dropped, see
    /// `is_canonical_order`.
    pub fn reconstruct(&self, target: NodeIndex, recipes: &RecipeSet) -> Vec<Vec<usize>> {
        let mut out = Vec::new();
        let mut acc = Vec::new();
        self.walk_back(target, &mut acc, &mut out, recipes);
        out
    }

    fn walk_back(
        &self,
        node: NodeIndex,
        acc: &mut Vec<usize>,
        out: &mut Vec<Vec<usize>>,
        recipes: &RecipeSet,
    ) {
        let incoming: Vec<_> = self.graph.edges_directed(node, Incoming).collect();
        if incoming.is_empty() {
            let mut sequence = acc.clone();
            sequence.reverse();
            if is_canonical_order(&sequence, recipes) {
                out.push(sequence);
            }
            return;
        }
        for edge in incoming {
            acc.push(*edge.weight());
            self.walk_back(edge.source(), acc, out, recipes);
            acc.pop();
        }
    }
}

/// a sequence is the canonical representative of its swap-equivalence
/// class iff every pair of adjacent, input-disjoint steps appears in
/// non-decreasing recipe-index order. disjoint steps commute (neither
/// touches a token type the other needs), so any other interleaving
/// of such a pair is dropped here in favour of this one. this does
/// not change which states are reachable, only which of several
/// equal-length edge-sequences into a state gets reported.
fn is_canonical_order(sequence: &[usize], recipes: &RecipeSet) -> bool {
    for pair in sequence.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let ra = &recipes.recipes()[a];
        let rb = &recipes.recipes()[b];
        if b < a && ra.inputs().disjoint(rb.inputs()) {
            return false;
        }
    }
    true
}
