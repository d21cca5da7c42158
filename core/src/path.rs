use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use serde::Serialize;
use tracing::trace;

use crate::error::{GraphError, Result};
use crate::graph::SocialGraph;

/// Minimum-cost route between two users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeightedPath {
    /// Sum of friendship weights along `path`.
    pub cost: u64,
    /// Users from start to end, both included.
    pub path: Vec<String>,
}

impl WeightedPath {
    /// Number of friendships traversed.
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Dijkstra shortest path from `start` to `end` over friendship weights.
///
/// The frontier is ordered by accumulated cost, with the user identifier as
/// a secondary key so the heap has a total order. Equal-cost routes may come
/// back in either form; only the cost is guaranteed minimal. The route is
/// rebuilt from predecessor pointers once `end` is finalized.
pub fn shortest_path(graph: &SocialGraph, start: &str, end: &str) -> Result<WeightedPath> {
    if !graph.contains_user(start) {
        return Err(GraphError::NotFound(start.to_string()));
    }
    if !graph.contains_user(end) {
        return Err(GraphError::NotFound(end.to_string()));
    }

    if start == end {
        return Ok(WeightedPath {
            cost: 0,
            path: vec![start.to_string()],
        });
    }

    // best: user -> lowest cost seen so far
    // parent: user -> predecessor on that lowest-cost route
    let mut best: HashMap<&str, u64> = HashMap::new();
    let mut parent: HashMap<&str, &str> = HashMap::new();
    let mut finalized: HashSet<&str> = HashSet::new();
    let mut frontier: BinaryHeap<Reverse<(u64, &str)>> = BinaryHeap::new();

    best.insert(start, 0);
    frontier.push(Reverse((0, start)));

    while let Some(Reverse((cost, current))) = frontier.pop() {
        if !finalized.insert(current) {
            continue;
        }

        if current == end {
            trace!(start, end, cost, finalized = finalized.len(), "shortest path found");
            return Ok(WeightedPath {
                cost,
                path: reconstruct_path(&parent, start, end),
            });
        }

        for f in graph.friends(current)? {
            let next = f.friend.as_str();
            if finalized.contains(next) {
                continue;
            }
            let candidate = cost + u64::from(f.weight);
            if best.get(next).map_or(true, |&known| candidate < known) {
                best.insert(next, candidate);
                parent.insert(next, current);
                frontier.push(Reverse((candidate, next)));
            }
        }
    }

    trace!(start, end, finalized = finalized.len(), "no path");
    Err(GraphError::NoPath {
        start: start.to_string(),
        end: end.to_string(),
    })
}

impl SocialGraph {
    /// See [`shortest_path`].
    pub fn shortest_path(&self, start: &str, end: &str) -> Result<WeightedPath> {
        shortest_path(self, start, end)
    }
}

/// Walk predecessor pointers from `end` back to `start`.
fn reconstruct_path(parent: &HashMap<&str, &str>, start: &str, end: &str) -> Vec<String> {
    let mut path = vec![end.to_string()];
    let mut current = end;

    while current != start {
        match parent.get(current) {
            Some(&prev) => {
                path.push(prev.to_string());
                current = prev;
            }
            None => break,
        }
    }

    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(users: &[&str], edges: &[(&str, &str, u32)]) -> SocialGraph {
        let mut g = SocialGraph::new();
        for u in users {
            g.add_user(*u).unwrap();
        }
        for &(a, b, w) in edges {
            g.add_friendship(a, b, w).unwrap();
        }
        g
    }

    fn path_cost(g: &SocialGraph, path: &[String]) -> u64 {
        path.windows(2)
            .map(|w| u64::from(g.weight_between(&w[0], &w[1]).unwrap()))
            .sum()
    }

    #[test]
    fn test_chain() {
        let g = build(&["A", "B", "C"], &[("A", "B", 2), ("B", "C", 3)]);
        let result = shortest_path(&g, "A", "C").unwrap();
        assert_eq!(result.cost, 5);
        assert_eq!(result.path, vec!["A", "B", "C"]);
        assert_eq!(result.hops(), 2);
    }

    #[test]
    fn test_self() {
        let g = build(&["A", "B"], &[("A", "B", 4)]);
        let result = shortest_path(&g, "A", "A").unwrap();
        assert_eq!(result.cost, 0);
        assert_eq!(result.path, vec!["A"]);
        assert_eq!(result.hops(), 0);
    }

    #[test]
    fn test_graph_method() {
        let g = build(&["A", "B", "C"], &[("A", "B", 2), ("B", "C", 3)]);
        assert_eq!(g.shortest_path("A", "C"), shortest_path(&g, "A", "C"));
        assert!(g.shortest_path("A", "ghost").unwrap_err().is_not_found());
    }

    #[test]
    fn test_self_isolated_user() {
        let g = build(&["loner"], &[]);
        let result = shortest_path(&g, "loner", "loner").unwrap();
        assert_eq!(result.path, vec!["loner"]);
    }

    #[test]
    fn test_prefers_cheaper_longer_route() {
        // Direct A-D costs 5, detour A-B-C-D costs 3
        let g = build(
            &["A", "B", "C", "D"],
            &[("A", "D", 5), ("A", "B", 1), ("B", "C", 1), ("C", "D", 1)],
        );
        let result = shortest_path(&g, "A", "D").unwrap();
        assert_eq!(result.cost, 3);
        assert_eq!(result.path, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_fewer_hops_when_cheaper() {
        let g = build(
            &["A", "B", "C"],
            &[("A", "C", 2), ("A", "B", 2), ("B", "C", 2)],
        );
        let result = shortest_path(&g, "A", "C").unwrap();
        assert_eq!(result.cost, 2);
        assert_eq!(result.path, vec!["A", "C"]);
    }

    #[test]
    fn test_equal_cost_routes() {
        // Diamond: A-B-D and A-C-D both cost 2
        let g = build(
            &["A", "B", "C", "D"],
            &[("A", "B", 1), ("A", "C", 1), ("B", "D", 1), ("C", "D", 1)],
        );
        let result = shortest_path(&g, "A", "D").unwrap();
        assert_eq!(result.cost, 2);
        assert_eq!(result.path.len(), 3);
        assert_eq!(path_cost(&g, &result.path), result.cost);
    }

    #[test]
    fn test_undirected() {
        let g = build(&["A", "B", "C"], &[("A", "B", 2), ("B", "C", 3)]);
        let result = shortest_path(&g, "C", "A").unwrap();
        assert_eq!(result.cost, 5);
        assert_eq!(result.path, vec!["C", "B", "A"]);
    }

    #[test]
    fn test_no_path() {
        let g = build(&["A", "B", "X"], &[("A", "B", 1)]);
        assert_eq!(
            shortest_path(&g, "A", "X"),
            Err(GraphError::NoPath {
                start: "A".into(),
                end: "X".into()
            })
        );
    }

    #[test]
    fn test_missing_users() {
        let g = build(&["A"], &[]);
        assert_eq!(
            shortest_path(&g, "ghost", "A"),
            Err(GraphError::NotFound("ghost".into()))
        );
        assert_eq!(
            shortest_path(&g, "A", "ghost"),
            Err(GraphError::NotFound("ghost".into()))
        );
    }

    #[test]
    fn test_path_after_removal() {
        let mut g = build(
            &["A", "B", "C", "D"],
            &[("A", "B", 1), ("B", "D", 1), ("A", "C", 3), ("C", "D", 3)],
        );
        assert_eq!(shortest_path(&g, "A", "D").unwrap().cost, 2);

        g.remove_user("B").unwrap();
        let result = shortest_path(&g, "A", "D").unwrap();
        assert_eq!(result.cost, 6);
        assert_eq!(result.path, vec!["A", "C", "D"]);

        g.remove_friendship("C", "D").unwrap();
        assert!(matches!(
            shortest_path(&g, "A", "D"),
            Err(GraphError::NoPath { .. })
        ));
    }

    #[test]
    fn test_cost_matches_path_on_grid() {
        // 4x4 grid with varied weights
        let mut g = SocialGraph::new();
        for r in 0..4 {
            for c in 0..4 {
                g.add_user(format!("{r}{c}")).unwrap();
            }
        }
        for r in 0..4u32 {
            for c in 0..4u32 {
                let here = format!("{r}{c}");
                if c + 1 < 4 {
                    let w = (r * 3 + c) % 5 + 1;
                    g.add_friendship(&here, &format!("{r}{}", c + 1), w).unwrap();
                }
                if r + 1 < 4 {
                    let w = (c * 2 + r) % 5 + 1;
                    g.add_friendship(&here, &format!("{}{c}", r + 1), w).unwrap();
                }
            }
        }

        for target in ["33", "03", "30", "12"] {
            let result = shortest_path(&g, "00", target).unwrap();
            assert_eq!(result.path.first().map(String::as_str), Some("00"));
            assert_eq!(result.path.last().map(String::as_str), Some(target));
            assert_eq!(path_cost(&g, &result.path), result.cost);
        }
    }
}
