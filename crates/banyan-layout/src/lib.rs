#![forbid(unsafe_code)]

//! Coordinate layout for family graphs.
//!
//! [`compute_layout`] turns a person snapshot into concrete `(x, y)` positions: generations
//! become rows (oldest at the top), full siblings stay contiguous in the deepest row, and the
//! rows above are placed bottom-up as couple/singleton units centered over their children.
//! The input is never mutated; manual position overrides are preferred over computed values
//! unless the caller forces an auto-align pass.

pub mod generation;

use banyan_core::{FamilyGraph, Person, Position};
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use std::cmp::Ordering;

pub use generation::{MAX_FIXPOINT_PASSES, assign_generations};

/// Spacing and canvas constants. Passed explicitly so the algorithm can be exercised with any
/// geometry; [`LayoutConfig::default`] carries the product values.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Horizontal distance between adjacent members of a sibling group.
    pub sibling_spacing: f64,
    /// Extra horizontal gap between distinct sibling groups, on top of `sibling_spacing`.
    pub group_gap: f64,
    /// Vertical distance between generation rows.
    pub generation_gap: f64,
    /// Horizontal distance between the two partners of a couple; each partner sits half of this
    /// from the couple's center.
    pub spouse_gap: f64,
    /// Canvas padding on each side, and the x/y of the first placed node.
    pub padding: f64,
    pub min_width: f64,
    pub min_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            sibling_spacing: 120.0,
            group_gap: 80.0,
            generation_gap: 160.0,
            spouse_gap: 100.0,
            padding: 80.0,
            min_width: 800.0,
            min_height: 600.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    /// Position per person id, in snapshot order.
    pub positions: IndexMap<String, Position>,
    pub width: f64,
    pub height: f64,
}

/// Computes positions for every person in the snapshot.
///
/// With `force_auto_align` set, manual `position` overrides are ignored for this call only;
/// the input is not mutated either way. Never fails: malformed graphs degrade, and a person
/// the placement somehow misses gets a deterministic fallback slot from its generation.
pub fn compute_layout(people: &[Person], force_auto_align: bool, config: &LayoutConfig) -> Layout {
    let graph = FamilyGraph::new(people);
    if graph.is_empty() {
        return Layout {
            positions: IndexMap::new(),
            width: config.min_width,
            height: config.min_height,
        };
    }

    let depths = generation::assign_on(&graph);
    let max_depth = depths.values().copied().max().unwrap_or(0).max(0);

    let mut rows: Vec<Vec<&Person>> = vec![Vec::new(); max_depth as usize + 1];
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for p in graph.people() {
        if seen.insert(p.id.as_str()) {
            let d = depths.get(p.id.as_str()).copied().unwrap_or(0).clamp(0, max_depth);
            rows[d as usize].push(p);
        }
    }

    let row_y = |d: i32| config.padding + f64::from(d) * config.generation_gap;

    let mut computed: FxHashMap<&str, Position> = FxHashMap::default();
    place_deepest_row(
        &graph,
        &rows[max_depth as usize],
        row_y(max_depth),
        config,
        &mut computed,
    );
    for d in (0..max_depth).rev() {
        place_unit_row(&graph, &rows[d as usize], row_y(d), config, &mut computed);
    }

    let mut positions: IndexMap<String, Position> = IndexMap::new();
    let mut max_x: f64 = 0.0;
    let mut max_y: f64 = 0.0;
    for p in graph.people() {
        if positions.contains_key(&p.id) {
            continue;
        }
        let pos = match (force_auto_align, p.position) {
            (false, Some(manual)) => manual,
            _ => computed.get(p.id.as_str()).copied().unwrap_or_else(|| {
                let d = depths.get(p.id.as_str()).copied().unwrap_or(0).max(0);
                Position {
                    x: config.padding,
                    y: row_y(d),
                }
            }),
        };
        max_x = max_x.max(pos.x);
        max_y = max_y.max(pos.y);
        positions.insert(p.id.clone(), pos);
    }

    Layout {
        positions,
        width: (max_x + config.padding).max(config.min_width),
        height: (max_y + config.padding).max(config.min_height),
    }
}

/// `compute_layout` with overrides discarded and the default geometry; returns positions only.
pub fn compute_auto_align_positions(people: &[Person]) -> IndexMap<String, Position> {
    compute_layout(people, true, &LayoutConfig::default()).positions
}

/// Sorted parent-id key; full siblings share it. Empty for unparented persons.
fn parent_pair_key(p: &Person) -> String {
    let mut ids: Vec<&str> = p.parent_ids.iter().map(String::as_str).collect();
    ids.sort_unstable();
    ids.join("|")
}

/// The deepest row has no children to center over, so it is packed left to right: sibling
/// groups in first-appearance order, spouses pulled adjacent inside their group, unparented
/// persons as a trailing group.
fn place_deepest_row<'a>(
    graph: &FamilyGraph<'a>,
    row: &[&'a Person],
    y: f64,
    config: &LayoutConfig,
    computed: &mut FxHashMap<&'a str, Position>,
) {
    let mut group_order: Vec<String> = Vec::new();
    let mut groups: FxHashMap<String, Vec<&'a Person>> = FxHashMap::default();
    for &p in row {
        let key = parent_pair_key(p);
        if !key.is_empty() && !groups.contains_key(&key) {
            group_order.push(key.clone());
        }
        groups.entry(key).or_default().push(p);
    }
    if groups.contains_key("") {
        group_order.push(String::new());
    }

    let mut x = config.padding;
    let mut previous: Option<&'a Person> = None;
    for (group_ix, key) in group_order.iter().enumerate() {
        let Some(members) = groups.get(key) else {
            continue;
        };
        for (member_ix, m) in spouses_adjacent(graph, members).into_iter().enumerate() {
            if let Some(prev) = previous {
                let mut step = if graph.are_spouses(&prev.id, &m.id) {
                    config.spouse_gap
                } else {
                    config.sibling_spacing
                };
                if member_ix == 0 && group_ix > 0 {
                    step += config.group_gap;
                }
                x += step;
            }
            computed.insert(m.id.as_str(), Position { x, y });
            previous = Some(m);
        }
    }
}

/// Stable reorder keeping each person's spouses immediately after them.
fn spouses_adjacent<'a>(graph: &FamilyGraph<'a>, members: &[&'a Person]) -> Vec<&'a Person> {
    let mut taken: FxHashSet<&str> = FxHashSet::default();
    let mut out: Vec<&'a Person> = Vec::with_capacity(members.len());
    for &m in members {
        if !taken.insert(m.id.as_str()) {
            continue;
        }
        out.push(m);
        for &other in members {
            if taken.contains(other.id.as_str()) {
                continue;
            }
            if graph.are_spouses(&m.id, &other.id) {
                taken.insert(other.id.as_str());
                out.push(other);
            }
        }
    }
    out
}

struct Unit<'a> {
    primary: &'a Person,
    spouse: Option<&'a Person>,
    /// Midpoint of the unit's children's computed x range; `None` for childless units.
    center: Option<f64>,
}

/// Rows above the deepest one are placed as units: a couple (two co-resident spouses) or a
/// singleton, centered over the unit's already-placed children. A person with several spouses
/// in the row yields one unit per marriage; ascending-center ordering keeps those side by side
/// without overlap. Childless units go to the running right edge of the row.
fn place_unit_row<'a>(
    graph: &FamilyGraph<'a>,
    row: &[&'a Person],
    y: f64,
    config: &LayoutConfig,
    computed: &mut FxHashMap<&'a str, Position>,
) {
    let row_ids: FxHashSet<&str> = row.iter().map(|p| p.id.as_str()).collect();

    let mut consumed: FxHashSet<&str> = FxHashSet::default();
    let mut units: Vec<Unit<'a>> = Vec::new();
    for &p in row {
        if !consumed.insert(p.id.as_str()) {
            continue;
        }
        let co_spouses: Vec<&'a Person> = p
            .spouse_ids
            .iter()
            .filter_map(|sid| graph.get(sid))
            .filter(|s| row_ids.contains(s.id.as_str()) && !consumed.contains(s.id.as_str()))
            .collect();
        let co_ids: FxHashSet<&str> = co_spouses.iter().map(|s| s.id.as_str()).collect();

        if co_spouses.is_empty() {
            let children = unit_children(graph, p, None, true, &co_ids);
            units.push(Unit {
                primary: p,
                spouse: None,
                center: children_center(&children, computed),
            });
        } else {
            for (ix, &s) in co_spouses.iter().enumerate() {
                consumed.insert(s.id.as_str());
                let children = unit_children(graph, p, Some(s), ix == 0, &co_ids);
                units.push(Unit {
                    primary: p,
                    spouse: Some(s),
                    center: children_center(&children, computed),
                });
            }
        }
    }

    let mut order: Vec<usize> = (0..units.len()).collect();
    order.sort_by(|&i, &j| match (units[i].center, units[j].center) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    let half = config.spouse_gap / 2.0;
    let mut right_edge: Option<f64> = None;
    for ix in order {
        let unit = &units[ix];
        match unit.center {
            Some(center) => match unit.spouse {
                Some(s) => {
                    if computed.contains_key(unit.primary.id.as_str()) {
                        // Repeated spouse: the shared partner already has a slot from an
                        // earlier marriage unit.
                        set_pos(computed, &mut right_edge, s.id.as_str(), center + half, y);
                    } else {
                        let pid = unit.primary.id.as_str();
                        set_pos(computed, &mut right_edge, pid, center - half, y);
                        set_pos(computed, &mut right_edge, s.id.as_str(), center + half, y);
                    }
                }
                None => set_pos(computed, &mut right_edge, unit.primary.id.as_str(), center, y),
            },
            None => {
                let x0 = right_edge.map_or(config.padding, |e| e + config.sibling_spacing);
                match unit.spouse {
                    Some(s) => {
                        if computed.contains_key(unit.primary.id.as_str()) {
                            set_pos(computed, &mut right_edge, s.id.as_str(), x0, y);
                        } else {
                            let pid = unit.primary.id.as_str();
                            set_pos(computed, &mut right_edge, pid, x0, y);
                            let sx = x0 + config.spouse_gap;
                            set_pos(computed, &mut right_edge, s.id.as_str(), sx, y);
                        }
                    }
                    None => set_pos(computed, &mut right_edge, unit.primary.id.as_str(), x0, y),
                }
            }
        }
    }
}

fn set_pos<'a>(
    computed: &mut FxHashMap<&'a str, Position>,
    right_edge: &mut Option<f64>,
    id: &'a str,
    x: f64,
    y: f64,
) {
    computed.insert(id, Position { x, y });
    *right_edge = Some(right_edge.map_or(x, |e| e.max(x)));
}

/// The children a unit anchors over. A child that lists another co-resident spouse of the
/// primary belongs to that spouse's unit instead; children with no co-resident co-parent are
/// attributed to the primary's first unit so they anchor something exactly once.
fn unit_children<'a>(
    graph: &FamilyGraph<'a>,
    primary: &'a Person,
    spouse: Option<&'a Person>,
    first_unit: bool,
    co_spouse_ids: &FxHashSet<&str>,
) -> Vec<&'a str> {
    let mut out: Vec<&'a str> = Vec::new();
    let mut seen: FxHashSet<&str> = FxHashSet::default();

    if let Some(s) = spouse {
        for &child in graph.children(&s.id) {
            if seen.insert(child) {
                out.push(child);
            }
        }
    }
    for &child in graph.children(&primary.id) {
        if seen.contains(child) {
            continue;
        }
        let other_marriage = graph.get(child).is_some_and(|c| {
            c.parent_ids
                .iter()
                .any(|pid| pid != &primary.id && co_spouse_ids.contains(pid.as_str()))
        });
        if other_marriage {
            continue;
        }
        if first_unit {
            seen.insert(child);
            out.push(child);
        }
    }
    out
}

fn children_center(children: &[&str], computed: &FxHashMap<&str, Position>) -> Option<f64> {
    let mut min: Option<f64> = None;
    let mut max: Option<f64> = None;
    for &child in children {
        let Some(pos) = computed.get(child) else {
            continue;
        };
        min = Some(min.map_or(pos.x, |m: f64| m.min(pos.x)));
        max = Some(max.map_or(pos.x, |m: f64| m.max(pos.x)));
    }
    match (min, max) {
        (Some(lo), Some(hi)) => Some((lo + hi) / 2.0),
        _ => None,
    }
}
