use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// Declared data-type tag is not one of the supported values.
    #[error("unknown data type: {0}")]
    UnknownDataType(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
