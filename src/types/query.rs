//! Request/response shapes for the ask endpoint

use serde::{Deserialize, Serialize};

/// Request body for `POST /ask`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    /// Free-text question from the student
    pub query: String,
}

/// Response body for `POST /ask`.
///
/// The answer field carries either the model output or a user-facing error
/// string; the transport status is 200 in both cases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    /// Generated answer text, verbatim
    pub answer: String,
}
