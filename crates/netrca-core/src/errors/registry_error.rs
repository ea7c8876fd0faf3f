/// Entity registry errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("invalid entity type: {type_name}")]
    InvalidEntityType { type_name: String },

    #[error("two nodes claim the same canonical entity {entity_type}::{name}")]
    DuplicateCanonicalEntity { entity_type: String, name: String },
}
