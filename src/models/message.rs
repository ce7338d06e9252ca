use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body of every `DELETE /` request.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteRequest {
    pub id: Option<String>,
}
