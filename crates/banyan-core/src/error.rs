pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Adding {parent_id} as a parent of {child_id} would create an ancestry cycle")]
    StructuralConflict {
        child_id: String,
        parent_id: String,
    },

    #[error("No person with id {id}")]
    MissingPerson { id: String },

    #[error("A person with id {id} already exists")]
    DuplicatePerson { id: String },

    #[error("Person {id} already has two parents")]
    TooManyParents { id: String },

    #[error("Person {id} cannot be related to itself")]
    SelfReference { id: String },

    #[error("Unsupported document version {version} (current is {current})")]
    UnsupportedVersion { version: u32, current: u32 },

    #[error("Invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),
}
