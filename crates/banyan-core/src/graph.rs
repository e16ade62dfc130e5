//! Read-only indexed view over a `Person` snapshot.
//!
//! Every traversal in this workspace goes through `FamilyGraph` rather than chasing raw id
//! vectors, for two reasons: dangling ids (a reference to a deleted person) must degrade to
//! "no such node" instead of erroring, and `child_ids` is never trusted literally — the
//! children map is derived from `parent_ids`, which is the authoritative direction.

use crate::model::Person;
use rustc_hash::FxHashMap;

pub struct FamilyGraph<'a> {
    people: &'a [Person],
    by_id: FxHashMap<&'a str, usize>,
    children: FxHashMap<&'a str, Vec<&'a str>>,
}

impl<'a> FamilyGraph<'a> {
    pub fn new(people: &'a [Person]) -> Self {
        let mut by_id: FxHashMap<&'a str, usize> = FxHashMap::default();
        for (ix, p) in people.iter().enumerate() {
            // First occurrence wins on duplicate ids; later duplicates are unreachable.
            by_id.entry(p.id.as_str()).or_insert(ix);
        }

        let mut children: FxHashMap<&'a str, Vec<&'a str>> = FxHashMap::default();
        for p in people {
            for parent_id in &p.parent_ids {
                children
                    .entry(parent_id.as_str())
                    .or_default()
                    .push(p.id.as_str());
            }
        }

        Self {
            people,
            by_id,
            children,
        }
    }

    pub fn people(&self) -> &'a [Person] {
        self.people
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&'a Person> {
        self.by_id.get(id).map(|&ix| &self.people[ix])
    }

    /// Parents of `id` that are present in the snapshot, in `parent_ids` order.
    pub fn parents(&self, id: &str) -> Vec<&'a Person> {
        let Some(p) = self.get(id) else {
            return Vec::new();
        };
        p.parent_ids
            .iter()
            .filter_map(|pid| self.get(pid))
            .collect()
    }

    /// Children of `id`, derived from other persons' `parent_ids` (snapshot order).
    pub fn children(&self, id: &str) -> &[&'a str] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Spouses of `id` that are present in the snapshot, in `spouse_ids` order.
    pub fn spouses(&self, id: &str) -> Vec<&'a Person> {
        let Some(p) = self.get(id) else {
            return Vec::new();
        };
        p.spouse_ids
            .iter()
            .filter_map(|sid| self.get(sid))
            .collect()
    }

    /// True when either person lists the other as a spouse. Checking both directions keeps the
    /// answer stable when the symmetry invariant has been broken upstream.
    pub fn are_spouses(&self, a: &str, b: &str) -> bool {
        if a == b {
            return false;
        }
        let forward = self.get(a).is_some_and(|p| p.lists_spouse(b));
        let backward = self.get(b).is_some_and(|p| p.lists_spouse(a));
        forward || backward
    }

    /// True when `parent` is a parent of `child`. `parent_ids` is authoritative; the parent's
    /// `child_ids` entry is accepted as a fallback for one-sided data.
    pub fn is_parent_of(&self, parent: &str, child: &str) -> bool {
        if parent == child {
            return false;
        }
        let forward = self.get(child).is_some_and(|p| p.lists_parent(parent));
        let backward = self.get(parent).is_some_and(|p| p.lists_child(child));
        forward || backward
    }

    /// True when `a` and `b` share at least one parent id. The shared parent does not have to be
    /// present in the snapshot.
    pub fn are_siblings(&self, a: &str, b: &str) -> bool {
        if a == b {
            return false;
        }
        let (Some(pa), Some(pb)) = (self.get(a), self.get(b)) else {
            return false;
        };
        pa.parent_ids
            .iter()
            .any(|pid| pb.parent_ids.iter().any(|qid| qid == pid))
    }

    /// Siblings of `id` present in the snapshot, in snapshot order.
    pub fn siblings(&self, id: &str) -> Vec<&'a Person> {
        let Some(p) = self.get(id) else {
            return Vec::new();
        };
        self.people
            .iter()
            .filter(|other| other.id != p.id && self.are_siblings(&p.id, &other.id))
            .collect()
    }
}
