use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdeaError {
    #[error("{0}")]
    Validation(String),

    #[error("Idea not found: {0}")]
    NotFound(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A non-success status observed by the client gateway.
    #[error("HTTP error! status: {status}")]
    Transport { status: u16 },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl IdeaError {
    /// The HTTP status carried by a transport error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            IdeaError::Transport { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<confique::Error> for IdeaError {
    fn from(value: confique::Error) -> Self {
        Self::Config(value.to_string())
    }
}

pub type Result<T> = std::result::Result<T, IdeaError>;
