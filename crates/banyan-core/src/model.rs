//! The `Person` entity and its relationship fields.
//!
//! Persons are plain data. The structural fields (`parent_ids`, `spouse_ids`, `child_ids`) are
//! id references into the surrounding collection; the inverse-reference invariants (spouse
//! symmetry, parent/child symmetry) are maintained by the edit layer in [`crate::edit`], never
//! assumed by read-side algorithms.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
    #[default]
    Unknown,
}

/// A manually-placed layout coordinate. When present it overrides the computed position unless
/// the caller forces an auto-align pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A dated, placed event (birth, death). `date: None` means unknown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LifeEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub place: String,
}

/// Per-spouse marriage metadata. Descriptive only; layout and relationship logic use
/// `spouse_ids`, not this list, except to group a repeated spouse into the same couple unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marriage {
    pub spouse_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub place: String,
    #[serde(default)]
    pub divorced: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Person {
    /// Opaque unique id, stable for the node's lifetime. Never reused after deletion.
    pub id: String,
    pub given_name: String,
    pub surname: String,
    pub gender: Gender,
    pub occupation: String,
    pub notes: String,
    pub birth: Option<LifeEvent>,
    pub death: Option<LifeEvent>,
    /// Semantically at most 2 conceptual parents; any count is tolerated structurally.
    pub parent_ids: Vec<String>,
    pub spouse_ids: Vec<String>,
    pub child_ids: Vec<String>,
    pub marriages: Vec<Marriage>,
    pub position: Option<Position>,
}

impl Person {
    /// Creates a person with a freshly minted v4 uuid and empty relationship sets.
    pub fn new(given_name: impl Into<String>, surname: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            given_name: given_name.into(),
            surname: surname.into(),
            ..Default::default()
        }
    }

    /// Creates a person with a caller-provided id (tests, import).
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn display_name(&self) -> String {
        let given = self.given_name.trim();
        let surname = self.surname.trim();
        match (given.is_empty(), surname.is_empty()) {
            (true, true) => self.id.clone(),
            (false, true) => given.to_string(),
            (true, false) => surname.to_string(),
            (false, false) => format!("{given} {surname}"),
        }
    }

    pub fn lists_spouse(&self, id: &str) -> bool {
        self.spouse_ids.iter().any(|s| s == id)
    }

    pub fn lists_parent(&self, id: &str) -> bool {
        self.parent_ids.iter().any(|p| p == id)
    }

    pub fn lists_child(&self, id: &str) -> bool {
        self.child_ids.iter().any(|c| c == id)
    }

    /// The marriage record for `spouse_id`, if any.
    pub fn marriage_with(&self, spouse_id: &str) -> Option<&Marriage> {
        self.marriages.iter().find(|m| m.spouse_id == spouse_id)
    }
}
