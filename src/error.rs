use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatchsetError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not valid utf-8: {path}")]
    Decode { path: String },

    #[error("file too large: {path}")]
    TooLarge { path: String },

    #[error("unknown source: {name}")]
    UnknownSource { name: String },

    #[error("dataset not found: {path} (run `patchset transform` first)")]
    DatasetNotFound { path: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, PatchsetError>;
