use thiserror::Error;

pub type Result<T> = std::result::Result<T, FolioError>;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Store error: {0}")]
    Store(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] Box<ureq::Error>),
    #[error("HTTP status {status} for {url}")]
    Status { status: u16, url: String },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid preference: {0}")]
    InvalidPreference(String),
    #[error("Invalid GitHub username: {0:?}")]
    InvalidUsername(String),
}

// Manual From implementation for unboxed to boxed conversion
impl From<ureq::Error> for FolioError {
    fn from(err: ureq::Error) -> Self {
        FolioError::Http(Box::new(err))
    }
}
