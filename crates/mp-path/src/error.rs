use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathError {
    #[error("path {path}: needs at least 2 nodes, got {count}")]
    TooFewNodes { path: u32, count: usize },

    #[error("path {path}: node 0 must be a stop unless the last node is a teleport")]
    FirstNodeNotStop { path: u32 },

    #[error("path {path}: invalid motion profile: {reason}")]
    InvalidProfile { path: u32, reason: String },

    #[error("path {path}: total period is zero")]
    ZeroPeriod { path: u32 },

    #[error("path parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PathResult<T> = Result<T, PathError>;
