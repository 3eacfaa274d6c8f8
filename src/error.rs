use thiserror::Error;

pub type Result<T> = std::result::Result<T, ListaError>;

#[derive(Debug, Error)]
pub enum ListaError {
    #[error("Item not found: {0}")]
    ItemNotFound(crate::domain::ItemId),

    #[error("Item text is empty")]
    EmptyText,

    #[error("Invalid item ID format: {0}")]
    InvalidItemId(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
