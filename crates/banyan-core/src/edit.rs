//! Edit operations over a person collection.
//!
//! The read-side algorithms never assume the symmetry invariants hold; this module is where
//! they are maintained. Every operation applies the edit and re-derives the inverse references
//! on the other person in the same call, so a collection that only ever goes through these
//! functions keeps `spouse_ids` symmetric and `child_ids` the inverse of `parent_ids`.

use crate::cycle::would_create_cycle;
use crate::error::{Error, Result};
use crate::model::{Marriage, Person};

/// The ≤2-parents rule from the data model. Structurally more are tolerated on read; edits
/// enforce the semantic limit.
pub const MAX_PARENTS: usize = 2;

fn index_of(people: &[Person], id: &str) -> Result<usize> {
    people
        .iter()
        .position(|p| p.id == id)
        .ok_or_else(|| Error::MissingPerson { id: id.to_string() })
}

pub fn add_person(people: &mut Vec<Person>, person: Person) -> Result<()> {
    if people.iter().any(|p| p.id == person.id) {
        return Err(Error::DuplicatePerson { id: person.id });
    }
    people.push(person);
    Ok(())
}

/// Removes a person and cascades: every reference to the removed id is dropped from the other
/// persons' parent, spouse and child sets and from their marriage records. The id is never
/// reused.
pub fn remove_person(people: &mut Vec<Person>, id: &str) -> Result<()> {
    let ix = index_of(people, id)?;
    people.remove(ix);
    for p in people.iter_mut() {
        p.parent_ids.retain(|r| r != id);
        p.spouse_ids.retain(|r| r != id);
        p.child_ids.retain(|r| r != id);
        p.marriages.retain(|m| m.spouse_id != id);
    }
    Ok(())
}

/// Adds `parent_id` as a parent of `child_id`, keeping the parent's `child_ids` in sync.
///
/// Rejected with [`Error::StructuralConflict`] when the edge would make someone their own
/// ancestor, and with [`Error::TooManyParents`] past the two-parent limit. Adding an existing
/// parent again is a no-op.
pub fn add_parent(people: &mut Vec<Person>, child_id: &str, parent_id: &str) -> Result<()> {
    let child_ix = index_of(people, child_id)?;
    let parent_ix = index_of(people, parent_id)?;

    if people[child_ix].lists_parent(parent_id) {
        return Ok(());
    }
    if people[child_ix].parent_ids.len() >= MAX_PARENTS {
        return Err(Error::TooManyParents {
            id: child_id.to_string(),
        });
    }
    if would_create_cycle(people, child_id, parent_id) {
        return Err(Error::StructuralConflict {
            child_id: child_id.to_string(),
            parent_id: parent_id.to_string(),
        });
    }

    people[child_ix].parent_ids.push(parent_id.to_string());
    if !people[parent_ix].lists_child(child_id) {
        people[parent_ix].child_ids.push(child_id.to_string());
    }
    Ok(())
}

pub fn remove_parent(people: &mut Vec<Person>, child_id: &str, parent_id: &str) -> Result<()> {
    let child_ix = index_of(people, child_id)?;
    let parent_ix = index_of(people, parent_id)?;

    people[child_ix].parent_ids.retain(|r| r != parent_id);
    people[parent_ix].child_ids.retain(|r| r != child_id);
    Ok(())
}

/// Marries two persons: both spouse sets and both marriage lists are updated together.
/// Re-marrying an existing spouse is a no-op (the original marriage record wins).
pub fn add_spouse(
    people: &mut Vec<Person>,
    a_id: &str,
    b_id: &str,
    marriage: Option<Marriage>,
) -> Result<()> {
    if a_id == b_id {
        return Err(Error::SelfReference {
            id: a_id.to_string(),
        });
    }
    let a_ix = index_of(people, a_id)?;
    let b_ix = index_of(people, b_id)?;

    if people[a_ix].lists_spouse(b_id) && people[b_ix].lists_spouse(a_id) {
        return Ok(());
    }

    let template = marriage.unwrap_or_default();

    if !people[a_ix].lists_spouse(b_id) {
        people[a_ix].spouse_ids.push(b_id.to_string());
        people[a_ix].marriages.push(Marriage {
            spouse_id: b_id.to_string(),
            ..template.clone()
        });
    }
    if !people[b_ix].lists_spouse(a_id) {
        people[b_ix].spouse_ids.push(a_id.to_string());
        people[b_ix].marriages.push(Marriage {
            spouse_id: a_id.to_string(),
            ..template
        });
    }
    Ok(())
}

pub fn remove_spouse(people: &mut Vec<Person>, a_id: &str, b_id: &str) -> Result<()> {
    let a_ix = index_of(people, a_id)?;
    let b_ix = index_of(people, b_id)?;

    people[a_ix].spouse_ids.retain(|r| r != b_id);
    people[a_ix].marriages.retain(|m| m.spouse_id != b_id);
    people[b_ix].spouse_ids.retain(|r| r != a_id);
    people[b_ix].marriages.retain(|m| m.spouse_id != a_id);
    Ok(())
}
