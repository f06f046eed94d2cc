use thiserror::Error;

pub type ExtractResult<T> = Result<T, ExtractError>;

/// Failure reported by an [`OcrEngine`](crate::ocr::OcrEngine) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("ocr engine failed: {0}")]
pub struct OcrError(pub String);

impl OcrError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("image asset not found or empty: {name}")]
    ImageLoad { name: String },

    #[error(transparent)]
    Ocr(#[from] OcrError),

    #[error("JSON Parsing Error: {0}")]
    Json(String),

    #[error("an extraction is already in flight")]
    Busy,

    #[error("ocr worker did not complete: {0}")]
    WorkerJoin(String),

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ExtractError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}
