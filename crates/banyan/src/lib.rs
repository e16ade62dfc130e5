#![forbid(unsafe_code)]

//! `banyan` is a headless family genealogy engine.
//!
//! Three pure operations over a person snapshot:
//! - [`would_create_cycle`] — ancestry guard, run before committing a parent-child edge
//! - [`compute_layout`] — generation rows + couple-unit coordinates for rendering
//! - [`find_relationship`] — connecting path + bilingual kinship label for a queried pair
//!
//! All of them take the collection by reference and return fresh output; nothing is retained
//! between calls, so concurrent invocations over an unmutated snapshot are safe without
//! locking.

pub use banyan_core::*;
pub use banyan_layout::{
    Layout, LayoutConfig, MAX_FIXPOINT_PASSES, assign_generations, compute_auto_align_positions,
    compute_layout,
};

/// Lays out the people of a parsed document.
pub fn layout_document(doc: &FamilyDocument, force_auto_align: bool) -> Layout {
    compute_layout(&doc.people, force_auto_align, &LayoutConfig::default())
}

/// Resolves the relationship between two person ids in a parsed document.
pub fn relate_document(doc: &FamilyDocument, a_id: &str, b_id: &str) -> Relationship {
    find_relationship(&doc.people, a_id, b_id)
}
