//! The `{version, people}` JSON interchange document.
//!
//! This is the minimal subset needed to move a person collection across the boundary (import,
//! export, CLI input); it is not a genealogy interchange standard. Unknown optional fields
//! default, unknown versions are rejected.

use crate::error::{Error, Result};
use crate::model::Person;
use serde::{Deserialize, Serialize};

pub const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FamilyDocument {
    pub version: u32,
    #[serde(default)]
    pub people: Vec<Person>,
}

impl FamilyDocument {
    pub fn new(people: Vec<Person>) -> Self {
        Self {
            version: CURRENT_VERSION,
            people,
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let doc: FamilyDocument = serde_json::from_str(text)?;
        if doc.version > CURRENT_VERSION {
            return Err(Error::UnsupportedVersion {
                version: doc.version,
                current: CURRENT_VERSION,
            });
        }
        Ok(doc)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
