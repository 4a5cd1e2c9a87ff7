use serde::{Deserialize, Serialize};

/// Reply of Reddit's `/api/v1/access_token`. Failures come back as
/// `{"error": "invalid_grant"}` with a 200 status.
#[derive(Serialize, Deserialize, Debug)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub expires_in: Option<u64>,
    pub scope: Option<String>,
    pub error: Option<String>,
}
