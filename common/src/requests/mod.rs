use serde::{Deserialize, Serialize};

/// Request payload for the admin login endpoint.
#[derive(Serialize, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// Response of a successful admin login. The token goes into the
/// `Authorization: Bearer` header of upload and logout requests.
#[derive(Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}
