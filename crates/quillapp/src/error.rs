use crate::model::ResourceType;
use thiserror::Error;

/// Failures of the ID generator and the base-32 codec.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    #[error("ID bucket exhausted: more IDs requested in one millisecond than the suffix allows")]
    Overflow,

    #[error("Timestamps before the epoch cannot be encoded ({0})")]
    NegativeTimestamp(i64),

    #[error("Cannot decode an empty string")]
    Empty,

    #[error("Invalid base-32 symbol '{0}'")]
    InvalidSymbol(char),

    #[error("Value '{0}' does not fit in 64 bits")]
    OutOfRange(String),

    #[error("Malformed resource ID '{0}'")]
    Malformed(String),
}

/// Failures of the edit lock.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LockError {
    #[error("The .lock file was not found!")]
    Missing,

    #[error("The .lock file could not be read: {0}")]
    Corrupted(String),

    #[error("Data is locked! Commit or discard the current edit first.")]
    AlreadyLocked,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resources of type '{0}' do not have slugs")]
    TypeMismatch(ResourceType),

    #[error("The slug '{slug}' already exists for {kind} {existing}")]
    SlugConflict {
        kind: ResourceType,
        slug: String,
        existing: String,
    },

    #[error("Unknown resource type '{0}'")]
    UnknownType(String),

    #[error("The {0} has no slug: give it a title or set `slug:` in the front matter")]
    EmptySlug(ResourceType),
}

#[derive(Error, Debug)]
pub enum QuillError {
    #[error(transparent)]
    Id(#[from] IdError),

    #[error(transparent)]
    Lock(#[from] LockError),

    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Front matter error: {0}")]
    FrontMatter(#[from] serde_yaml::Error),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl QuillError {
    /// True when the error means "no edit in progress".
    pub fn is_missing_lock(&self) -> bool {
        matches!(self, QuillError::Lock(LockError::Missing))
    }
}

pub type Result<T> = std::result::Result<T, QuillError>;
