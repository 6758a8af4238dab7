//! Dependency graph traversals.
//!
//! The graph lives in the cells themselves (formula references one way,
//! `referenced_by` the other), so these walks take lookup closures instead of
//! the sheet. Every walk uses an explicit work list; reference chains can be
//! far longer than the call stack allows.

use std::collections::HashSet;

use gridcalc_engine::engine::Position;

/// Would giving `root` the references `candidates` close a cycle?
///
/// `references_of` returns the current references of a stored cell (empty
/// when there is no cell or it holds no formula). The existing graph is
/// acyclic, so a cycle exists exactly when `root` is reachable from the
/// candidates. A self-reference is a cycle of length one.
pub fn creates_cycle<F>(root: Position, candidates: &[Position], mut references_of: F) -> bool
where
    F: FnMut(Position) -> Vec<Position>,
{
    let mut visited = HashSet::new();
    let mut to_process: Vec<Position> = candidates.to_vec();

    while let Some(pos) = to_process.pop() {
        if pos == root {
            return true;
        }
        if !visited.insert(pos) {
            continue;
        }
        to_process.extend(references_of(pos));
    }
    false
}

/// `start` followed by every cell that transitively depends on it, each once.
pub fn dependents_closure<F>(start: Position, mut referenced_by: F) -> Vec<Position>
where
    F: FnMut(Position) -> Vec<Position>,
{
    let mut visited = HashSet::new();
    let mut order = Vec::new();
    let mut to_process = vec![start];

    while let Some(pos) = to_process.pop() {
        if !visited.insert(pos) {
            continue;
        }
        order.push(pos);
        to_process.extend(referenced_by(pos));
    }
    order
}

/// Formulas to evaluate, deepest first, before `root` can be evaluated
/// without recursion. `root` comes last.
///
/// `pending` returns `Some(references)` for a formula cell without a cached
/// value and `None` for anything that can be read directly.
pub fn evaluation_order<F>(root: Position, mut pending: F) -> Vec<Position>
where
    F: FnMut(Position) -> Option<Vec<Position>>,
{
    let mut order = Vec::new();
    let mut visited = HashSet::new();
    let mut stack: Vec<(Position, std::vec::IntoIter<Position>)> = Vec::new();

    visited.insert(root);
    if let Some(refs) = pending(root) {
        stack.push((root, refs.into_iter()));
    }

    while let Some((pos, children)) = stack.last_mut() {
        match children.next() {
            Some(child) => {
                if visited.insert(child)
                    && let Some(refs) = pending(child)
                {
                    stack.push((child, refs.into_iter()));
                }
            }
            None => {
                let pos = *pos;
                stack.pop();
                order.push(pos);
            }
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn p(row: i32, col: i32) -> Position {
        Position::new(row, col)
    }

    fn edges(list: &[(Position, &[Position])]) -> HashMap<Position, Vec<Position>> {
        list.iter().map(|(k, v)| (*k, v.to_vec())).collect()
    }

    #[test]
    fn test_self_reference_is_a_cycle() {
        assert!(creates_cycle(p(0, 0), &[p(0, 0)], |_| vec![]));
    }

    #[test]
    fn test_indirect_cycle() {
        // B1 -> C1 -> A1; giving A1 a reference to B1 closes the loop.
        let refs = edges(&[(p(0, 1), &[p(0, 2)]), (p(0, 2), &[p(0, 0)])]);
        let lookup = |pos: Position| refs.get(&pos).cloned().unwrap_or_default();
        assert!(creates_cycle(p(0, 0), &[p(0, 1)], lookup));
        assert!(!creates_cycle(p(0, 3), &[p(0, 1)], lookup));
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        // A1 -> B1, A1 -> C1, B1 -> D1, C1 -> D1
        let refs = edges(&[(p(0, 1), &[p(0, 3)]), (p(0, 2), &[p(0, 3)])]);
        let mut calls = 0;
        let found = creates_cycle(p(0, 0), &[p(0, 1), p(0, 2)], |pos| {
            calls += 1;
            refs.get(&pos).cloned().unwrap_or_default()
        });
        assert!(!found);
        // D1 is expanded once even though two paths reach it.
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_dependents_closure_visits_each_once() {
        // A1 is read by B1 and C1, both read by D1.
        let deps = edges(&[
            (p(0, 0), &[p(0, 1), p(0, 2)]),
            (p(0, 1), &[p(0, 3)]),
            (p(0, 2), &[p(0, 3)]),
        ]);
        let mut closure =
            dependents_closure(p(0, 0), |pos| deps.get(&pos).cloned().unwrap_or_default());
        assert_eq!(closure[0], p(0, 0));
        closure.sort();
        assert_eq!(closure, vec![p(0, 0), p(0, 1), p(0, 2), p(0, 3)]);
    }

    #[test]
    fn test_evaluation_order_is_post_order() {
        // C1 = B1 + A1, B1 = A1, A1 uncached formula with no refs.
        let refs = edges(&[
            (p(0, 2), &[p(0, 1), p(0, 0)]),
            (p(0, 1), &[p(0, 0)]),
            (p(0, 0), &[]),
        ]);
        let order = evaluation_order(p(0, 2), |pos| refs.get(&pos).cloned());
        assert_eq!(order, vec![p(0, 0), p(0, 1), p(0, 2)]);
    }

    #[test]
    fn test_evaluation_order_handles_long_chains() {
        // Each cell in row 0 reads the one to its left.
        let n = 100_000;
        let order = evaluation_order(p(0, n - 1), |pos| {
            Some(if pos.col > 0 {
                vec![p(0, pos.col - 1)]
            } else {
                vec![]
            })
        });
        assert_eq!(order.len(), n as usize);
        assert_eq!(order[0], p(0, 0));
    }

    #[test]
    fn test_evaluation_order_skips_ready_cells() {
        let order = evaluation_order(p(0, 0), |_| None);
        assert!(order.is_empty());
    }
}
