//! Error types for the advising pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// PDF extraction error
    #[error("Failed to extract PDF '{path}': {message}")]
    PdfExtract { path: String, message: String },

    /// Course graph parsing error
    #[error("Invalid course graph: {0}")]
    Graph(String),

    /// Embedding error
    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    /// Vector store error
    #[error("Vector store error: {0}")]
    VectorDb(String),

    /// LLM error
    #[error("LLM error: {0}")]
    Llm(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a PDF extraction error
    pub fn pdf_extract(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PdfExtract {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an embedding error
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding(message.into())
    }

    /// Create a vector store error
    pub fn vector_db(message: impl Into<String>) -> Self {
        Self::VectorDb(message.into())
    }

    /// Create an LLM error
    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Render the error as the student-facing answer string.
    ///
    /// Retrieval and generation failures are reported inside the normal
    /// `{answer}` response shape rather than as transport errors, so this is
    /// the only place internal errors become plain text.
    pub fn user_message(&self) -> String {
        match self {
            Error::VectorDb(_) | Error::Embedding(_) => {
                format!("DB 검색 중 오류가 발생했습니다: {}", self)
            }
            Error::Llm(_) => {
                format!("Gemini 응답 생성 중 오류가 발생했습니다: {}", self)
            }
            other => format!("요청 처리 중 오류가 발생했습니다: {}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_routing() {
        let db = Error::vector_db("connection refused");
        assert!(db.user_message().starts_with("DB 검색 중 오류가 발생했습니다"));

        let llm = Error::llm("HTTP 503");
        assert!(llm
            .user_message()
            .starts_with("Gemini 응답 생성 중 오류가 발생했습니다"));
    }
}
