use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    /// Input text was not a well-formed JSON document.
    #[error(transparent)]
    Decode(#[from] serde_json::Error),

    #[error("document must be a single mapping, found {found}")]
    Shape { found: &'static str },

    #[error("bad template value for key '{key}': {kind} must contain integer index values only")]
    Structure { key: String, kind: &'static str },

    #[error("index {index} out of range for key '{key}' (length {len})")]
    Index { key: String, index: i64, len: usize },

    #[error("cannot resolve path '{path}': {reason}")]
    Path { path: String, reason: String },

    #[error("template nesting exceeds the maximum depth of {limit}")]
    DepthLimit { limit: usize },

    #[error("transform failed: {0}")]
    Transform(String),
}

impl FilterError {
    pub fn transform(message: impl Into<String>) -> FilterError {
        FilterError::Transform(message.into())
    }
}
