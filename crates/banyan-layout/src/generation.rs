//! Generation (depth) assignment.
//!
//! Produces an integer depth per person such that every present parent sits strictly above its
//! children and spouses share a depth. The computation is a joint fixpoint of two monotone
//! rules, so the result is order-independent: depths only ever increase.

use banyan_core::{FamilyGraph, Person};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

/// Safety valve, not a correctness requirement: an acyclic graph converges in at most one pass
/// per generation. The cap only matters for cyclic input that evaded the cycle guard.
pub const MAX_FIXPOINT_PASSES: usize = 100;

/// Assigns a generation number to every person in the snapshot.
///
/// Roots (no parent present in the set) start at 0, as does anyone in a relationship-free
/// cluster. Each pass raises a person to `max(present parent generations) + 1` and pulls spouse
/// pairs up to the larger of the two, until nothing changes.
pub fn assign_generations(people: &[Person]) -> BTreeMap<String, i32> {
    let graph = FamilyGraph::new(people);
    assign_on(&graph)
        .into_iter()
        .map(|(id, depth)| (id.to_string(), depth))
        .collect()
}

pub(crate) fn assign_on<'a>(graph: &FamilyGraph<'a>) -> FxHashMap<&'a str, i32> {
    let mut depth: FxHashMap<&'a str, i32> = graph
        .people()
        .iter()
        .map(|p| (p.id.as_str(), 0))
        .collect();

    let mut converged = false;
    for _ in 0..MAX_FIXPOINT_PASSES {
        let mut changed = false;

        for p in graph.people() {
            let id = p.id.as_str();
            let parent_max = p
                .parent_ids
                .iter()
                .filter_map(|pid| graph.get(pid))
                .filter_map(|parent| depth.get(parent.id.as_str()).copied())
                .max();
            if let Some(deepest) = parent_max {
                let current = depth.get(id).copied().unwrap_or(0);
                if deepest + 1 > current {
                    depth.insert(id, deepest + 1);
                    changed = true;
                }
            }
        }

        for p in graph.people() {
            let id = p.id.as_str();
            for spouse in graph.spouses(id) {
                let sid = spouse.id.as_str();
                let own = depth.get(id).copied().unwrap_or(0);
                let other = depth.get(sid).copied().unwrap_or(0);
                if own > other {
                    depth.insert(sid, own);
                    changed = true;
                } else if other > own {
                    depth.insert(id, other);
                    changed = true;
                }
            }
        }

        if !changed {
            converged = true;
            break;
        }
    }

    if !converged {
        tracing::warn!(
            passes = MAX_FIXPOINT_PASSES,
            "generation assignment did not converge; input likely contains an ancestry cycle"
        );
    }

    depth
}
