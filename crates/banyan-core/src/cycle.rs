//! Ancestry cycle guard.
//!
//! Run before committing a new parent-child edge. A `true` result means the edit must be
//! rejected; the guard itself never mutates anything and never errors on malformed input —
//! dangling ids are simply not traversed.

use crate::graph::FamilyGraph;
use crate::model::Person;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// Would adding `candidate_parent_id` as a parent of `child_id` create a directed cycle through
/// the parent/child relation?
///
/// True when the two ids are equal, when the candidate parent is already a descendant of the
/// child, or when the child is already an ancestor of the candidate parent.
pub fn would_create_cycle(people: &[Person], child_id: &str, candidate_parent_id: &str) -> bool {
    if child_id == candidate_parent_id {
        return true;
    }

    let graph = FamilyGraph::new(people);
    if is_descendant(&graph, child_id, candidate_parent_id) {
        return true;
    }
    if is_ancestor(&graph, candidate_parent_id, child_id) {
        return true;
    }
    false
}

/// BFS down the derived children map from `root`, looking for `target`.
fn is_descendant(graph: &FamilyGraph<'_>, root: &str, target: &str) -> bool {
    let mut visited: FxHashSet<&str> = FxHashSet::default();
    let mut queue: VecDeque<&str> = VecDeque::new();
    queue.push_back(root);
    visited.insert(root);

    while let Some(current) = queue.pop_front() {
        for &child in graph.children(current) {
            if child == target {
                return true;
            }
            if visited.insert(child) {
                queue.push_back(child);
            }
        }
    }
    false
}

/// Walk upward from `start` through `parent_ids`, looking for `target`.
fn is_ancestor(graph: &FamilyGraph<'_>, start: &str, target: &str) -> bool {
    let mut visited: FxHashSet<&str> = FxHashSet::default();
    let mut queue: VecDeque<&str> = VecDeque::new();
    queue.push_back(start);
    visited.insert(start);

    while let Some(current) = queue.pop_front() {
        for parent in graph.parents(current) {
            let pid = parent.id.as_str();
            if pid == target {
                return true;
            }
            if visited.insert(pid) {
                queue.push_back(pid);
            }
        }
    }
    false
}
