//! Relationship resolver: path search plus a rule-based kinship classifier.
//!
//! The search is an explicit work-list DFS (no recursion, so stack depth is bounded for large
//! trees). At each node it expands parent edges first, then child edges, then spouse edges, and
//! it returns the first path found — deliberately not the shortest one. The classifier then
//! labels the pair from direct structural lookups, falling back to a generation-difference
//! label derived from the path when no enumerated rule matches.
//!
//! Labels are bilingual (English + Tamil) and describe person A relative to person B: if A is
//! B's father the label is "Father". Additional locales would be more entries per rule.

use crate::graph::FamilyGraph;
use crate::model::{Gender, Person};
use rustc_hash::FxHashSet;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Relationship {
    pub english: String,
    pub tamil: String,
    /// Ordered person ids from A to B, for UI highlighting. Empty when no path exists.
    pub path: Vec<String>,
}

impl Relationship {
    fn new(english: &str, tamil: &str, path: Vec<String>) -> Self {
        Self {
            english: english.to_string(),
            tamil: tamil.to_string(),
            path,
        }
    }

    pub fn none_found() -> Self {
        Self::new(NO_RELATIONSHIP.0, NO_RELATIONSHIP.1, Vec::new())
    }
}

const NO_RELATIONSHIP: (&str, &str) = ("No direct relationship found", "நேரடி உறவு இல்லை");

/// Finds a connecting path between two persons and labels it.
///
/// Disconnected pairs (or ids missing from the snapshot) produce the explicit
/// "No direct relationship found" result with an empty path; this is a defined terminal result,
/// not an error.
pub fn find_relationship(people: &[Person], a_id: &str, b_id: &str) -> Relationship {
    if a_id == b_id {
        return Relationship::new("Same Person", "அதே நபர்", vec![a_id.to_string()]);
    }

    let graph = FamilyGraph::new(people);
    let Some(path) = find_path(&graph, a_id, b_id) else {
        tracing::debug!(a = a_id, b = b_id, "no connecting path between persons");
        return Relationship::none_found();
    };

    let (Some(a), Some(b)) = (graph.get(a_id), graph.get(b_id)) else {
        // A path implies both endpoints are present; guarded anyway.
        return Relationship::none_found();
    };

    classify(&graph, a, b, path)
}

// ---------------------------------------------------------------------------
// Path search
// ---------------------------------------------------------------------------

struct Frame<'a> {
    id: &'a str,
    neighbors: Vec<&'a str>,
    next: usize,
}

/// Parent edges first, then child, then spouse. Dangling ids are skipped at expansion time.
fn neighbors<'a>(graph: &FamilyGraph<'a>, id: &str) -> Vec<&'a str> {
    let Some(p) = graph.get(id) else {
        return Vec::new();
    };
    let mut out: Vec<&'a str> = Vec::new();
    for pid in &p.parent_ids {
        if let Some(parent) = graph.get(pid) {
            out.push(parent.id.as_str());
        }
    }
    out.extend_from_slice(graph.children(id));
    for sid in &p.spouse_ids {
        if let Some(spouse) = graph.get(sid) {
            out.push(spouse.id.as_str());
        }
    }
    out
}

/// Depth-first search where the visited set is exactly the current path, with explicit
/// backtracking, so a node can be revisited through a different branch but never re-entered
/// while it is on the path.
fn find_path<'a>(graph: &FamilyGraph<'a>, from: &str, to: &str) -> Option<Vec<String>> {
    let start = graph.get(from)?.id.as_str();
    if !graph.contains(to) {
        return None;
    }

    let mut on_path: FxHashSet<&'a str> = FxHashSet::default();
    let mut stack: Vec<Frame<'a>> = Vec::new();
    on_path.insert(start);
    stack.push(Frame {
        id: start,
        neighbors: neighbors(graph, start),
        next: 0,
    });

    while let Some(frame) = stack.last_mut() {
        if frame.next >= frame.neighbors.len() {
            on_path.remove(frame.id);
            stack.pop();
            continue;
        }
        let candidate = frame.neighbors[frame.next];
        frame.next += 1;

        if candidate == to {
            let mut path: Vec<String> = stack.iter().map(|f| f.id.to_string()).collect();
            path.push(candidate.to_string());
            return Some(path);
        }
        if on_path.contains(candidate) {
            continue;
        }
        on_path.insert(candidate);
        let expanded = neighbors(graph, candidate);
        stack.push(Frame {
            id: candidate,
            neighbors: expanded,
            next: 0,
        });
    }
    None
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

fn by_gender(
    who: Gender,
    male: (&'static str, &'static str),
    female: (&'static str, &'static str),
    neutral: (&'static str, &'static str),
) -> (&'static str, &'static str) {
    match who {
        Gender::Male => male,
        Gender::Female => female,
        Gender::Other | Gender::Unknown => neutral,
    }
}

/// First match wins. Each rule is checked against the endpoints' relationship sets (or a
/// bounded-depth structural lookup), not inferred from the path shape; the path is carried
/// through unchanged for highlighting.
fn classify(graph: &FamilyGraph<'_>, a: &Person, b: &Person, path: Vec<String>) -> Relationship {
    // Direct spouse.
    if graph.are_spouses(&a.id, &b.id) {
        let (en, ta) = by_gender(
            a.gender,
            ("Husband", "கணவர்"),
            ("Wife", "மனைவி"),
            ("Spouse", "துணைவர்"),
        );
        return Relationship::new(en, ta, path);
    }

    // Direct parent / child.
    if graph.is_parent_of(&a.id, &b.id) {
        let (en, ta) = by_gender(
            a.gender,
            ("Father", "அப்பா"),
            ("Mother", "அம்மா"),
            ("Parent", "பெற்றோர்"),
        );
        return Relationship::new(en, ta, path);
    }
    if graph.is_parent_of(&b.id, &a.id) {
        let (en, ta) = by_gender(
            a.gender,
            ("Son", "மகன்"),
            ("Daughter", "மகள்"),
            ("Child", "குழந்தை"),
        );
        return Relationship::new(en, ta, path);
    }

    // Shared-parent sibling.
    if graph.are_siblings(&a.id, &b.id) {
        let (en, ta) = by_gender(
            a.gender,
            ("Brother", "சகோதரர்"),
            ("Sister", "சகோதரி"),
            ("Sibling", "உடன்பிறப்பு"),
        );
        return Relationship::new(en, ta, path);
    }

    // Grandparent / grandchild.
    if is_grandparent(graph, &a.id, &b.id) {
        let (en, ta) = by_gender(
            a.gender,
            ("Grandfather", "தாத்தா"),
            ("Grandmother", "பாட்டி"),
            ("Grandparent", "தாத்தா/பாட்டி"),
        );
        return Relationship::new(en, ta, path);
    }
    if is_grandparent(graph, &b.id, &a.id) {
        let (en, ta) = by_gender(
            a.gender,
            ("Grandson", "பேரன்"),
            ("Granddaughter", "பேத்தி"),
            ("Grandchild", "பேரக்குழந்தை"),
        );
        return Relationship::new(en, ta, path);
    }

    // Great-grandparent / great-grandchild.
    if is_great_grandparent(graph, &a.id, &b.id) {
        let (en, ta) = by_gender(
            a.gender,
            ("Great-grandfather", "கொள்ளுத் தாத்தா"),
            ("Great-grandmother", "கொள்ளுப் பாட்டி"),
            ("Great-grandparent", "கொள்ளுத் தாத்தா/பாட்டி"),
        );
        return Relationship::new(en, ta, path);
    }
    if is_great_grandparent(graph, &b.id, &a.id) {
        let (en, ta) = by_gender(
            a.gender,
            ("Great-grandson", "கொள்ளுப் பேரன்"),
            ("Great-granddaughter", "கொள்ளுப் பேத்தி"),
            ("Great-grandchild", "கொள்ளுப் பேரக்குழந்தை"),
        );
        return Relationship::new(en, ta, path);
    }

    // Uncle / aunt, split maternal/paternal by the chaining parent's gender.
    if let Some(side) = uncle_aunt_side(graph, &a.id, &b.id) {
        let (en, ta) = match (a.gender, side) {
            (Gender::Male, Side::Paternal) => ("Paternal Uncle", "சித்தப்பா"),
            (Gender::Male, Side::Maternal) => ("Maternal Uncle", "மாமா"),
            (Gender::Male, Side::Unknown) => ("Uncle", "மாமா"),
            (Gender::Female, Side::Paternal) => ("Paternal Aunt", "அத்தை"),
            (Gender::Female, Side::Maternal) => ("Maternal Aunt", "சித்தி"),
            (Gender::Female, Side::Unknown) => ("Aunt", "அத்தை"),
            (_, _) => ("Uncle/Aunt", "மாமா/அத்தை"),
        };
        return Relationship::new(en, ta, path);
    }

    // Nephew / niece.
    if is_siblings_child(graph, &a.id, &b.id) {
        let (en, ta) = by_gender(
            a.gender,
            ("Nephew", "மருமகன்"),
            ("Niece", "மருமகள்"),
            ("Nephew/Niece", "மருமகன்/மருமகள்"),
        );
        return Relationship::new(en, ta, path);
    }

    // Cousin.
    if is_cousin(graph, &a.id, &b.id) {
        let (_, ta) = by_gender(
            a.gender,
            ("Cousin", "ஒன்றுவிட்ட சகோதரர்"),
            ("Cousin", "ஒன்றுவிட்ட சகோதரி"),
            ("Cousin", "ஒன்றுவிட்ட உறவினர்"),
        );
        return Relationship::new("Cousin", ta, path);
    }

    // In-laws.
    if is_parent_in_law(graph, &a.id, &b.id) {
        let (en, ta) = by_gender(
            a.gender,
            ("Father-in-law", "மாமனார்"),
            ("Mother-in-law", "மாமியார்"),
            ("Parent-in-law", "மாமனார்/மாமியார்"),
        );
        return Relationship::new(en, ta, path);
    }
    if is_child_in_law(graph, &a.id, &b.id) {
        let (en, ta) = by_gender(
            a.gender,
            ("Son-in-law", "மருமகன்"),
            ("Daughter-in-law", "மருமகள்"),
            ("Child-in-law", "மருமகன்/மருமகள்"),
        );
        return Relationship::new(en, ta, path);
    }
    if is_sibling_in_law(graph, &a.id, &b.id) {
        let (en, ta) = by_gender(
            a.gender,
            ("Brother-in-law", "மைத்துனர்"),
            ("Sister-in-law", "மைத்துனி"),
            ("Sibling-in-law", "மைத்துனர்/மைத்துனி"),
        );
        return Relationship::new(en, ta, path);
    }
    if is_co_sibling_in_law(graph, &a.id, &b.id) {
        let (en, ta) = by_gender(
            a.gender,
            ("Co-brother-in-law", "சகலர்"),
            ("Co-sister-in-law", "ஓரகத்தி"),
            ("Co-sibling-in-law", "சகலர்/ஓரகத்தி"),
        );
        return Relationship::new(en, ta, path);
    }

    fallback_from_path(graph, path)
}

enum Side {
    Paternal,
    Maternal,
    Unknown,
}

fn is_grandparent(graph: &FamilyGraph<'_>, a: &str, b: &str) -> bool {
    graph
        .parents(b)
        .iter()
        .any(|p| graph.is_parent_of(a, &p.id))
}

fn is_great_grandparent(graph: &FamilyGraph<'_>, a: &str, b: &str) -> bool {
    graph
        .parents(b)
        .iter()
        .any(|p| is_grandparent(graph, a, &p.id))
}

/// A is a sibling of one of B's parents, or the spouse of such a sibling. The side comes from
/// the chaining parent of B, not from A.
fn uncle_aunt_side(graph: &FamilyGraph<'_>, a: &str, b: &str) -> Option<Side> {
    for parent in graph.parents(b) {
        let linked = graph.are_siblings(a, &parent.id)
            || graph
                .siblings(&parent.id)
                .iter()
                .any(|sib| graph.are_spouses(a, &sib.id));
        if linked {
            return Some(match parent.gender {
                Gender::Male => Side::Paternal,
                Gender::Female => Side::Maternal,
                Gender::Other | Gender::Unknown => Side::Unknown,
            });
        }
    }
    None
}

fn is_siblings_child(graph: &FamilyGraph<'_>, a: &str, b: &str) -> bool {
    graph
        .parents(a)
        .iter()
        .any(|p| graph.are_siblings(&p.id, b))
}

fn is_cousin(graph: &FamilyGraph<'_>, a: &str, b: &str) -> bool {
    graph.parents(a).iter().any(|pa| {
        graph
            .parents(b)
            .iter()
            .any(|pb| graph.are_siblings(&pa.id, &pb.id))
    })
}

fn is_parent_in_law(graph: &FamilyGraph<'_>, a: &str, b: &str) -> bool {
    graph
        .spouses(b)
        .iter()
        .any(|s| graph.is_parent_of(a, &s.id))
}

fn is_child_in_law(graph: &FamilyGraph<'_>, a: &str, b: &str) -> bool {
    graph
        .children(b)
        .iter()
        .any(|&child| graph.are_spouses(a, child))
}

/// Spouse's sibling, or sibling's spouse.
fn is_sibling_in_law(graph: &FamilyGraph<'_>, a: &str, b: &str) -> bool {
    let via_spouse = graph
        .spouses(b)
        .iter()
        .any(|s| graph.are_siblings(a, &s.id));
    let via_sibling = graph
        .siblings(b)
        .iter()
        .any(|sib| graph.are_spouses(a, &sib.id));
    via_spouse || via_sibling
}

/// Spouse's sibling's spouse.
fn is_co_sibling_in_law(graph: &FamilyGraph<'_>, a: &str, b: &str) -> bool {
    graph.spouses(b).iter().any(|s| {
        graph
            .siblings(&s.id)
            .iter()
            .any(|sib| graph.are_spouses(a, &sib.id))
    })
}

// ---------------------------------------------------------------------------
// Fallback
// ---------------------------------------------------------------------------

/// Signed generation difference along the found path: +1 per child-hop, -1 per parent-hop,
/// 0 per spouse-hop. A net positive difference means A sits above B.
fn fallback_from_path(graph: &FamilyGraph<'_>, path: Vec<String>) -> Relationship {
    let mut diff: i32 = 0;
    let mut crossed_marriage = false;

    for pair in path.windows(2) {
        let (u, v) = (pair[0].as_str(), pair[1].as_str());
        if graph.is_parent_of(v, u) {
            diff -= 1;
        } else if graph.is_parent_of(u, v) {
            diff += 1;
        } else {
            crossed_marriage = true;
        }
    }

    if diff > 2 {
        let english = format!("Ancestor ({diff} generations)");
        let tamil = format!("முன்னோர் ({diff} தலைமுறை)");
        return Relationship {
            english,
            tamil,
            path,
        };
    }
    if diff < -2 {
        let n = -diff;
        let english = format!("Descendant ({n} generations)");
        let tamil = format!("வழித்தோன்றல் ({n} தலைமுறை)");
        return Relationship {
            english,
            tamil,
            path,
        };
    }
    if crossed_marriage {
        return Relationship::new("Relative by marriage", "திருமண உறவு", path);
    }
    Relationship::new("Relative", "உறவினர்", path)
}
