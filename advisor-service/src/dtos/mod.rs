use serde::{Deserialize, Serialize};

/// Body of `POST /ask`.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

/// Successful answer envelope.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub response: String,
    pub status: String,
}

impl AskResponse {
    pub fn success(response: String) -> Self {
        Self {
            response,
            status: "success".to_string(),
        }
    }
}

/// Liveness descriptor returned by `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub provider: String,
    pub model: String,
}
