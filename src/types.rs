//! Wire types for the AgentAuth API.

use serde::{Deserialize, Serialize};

// ============ Request Types ============

/// Body of a registration request.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub agent_id: String,
    /// Hex encoding of a raw 32-byte Ed25519 public key.
    pub public_key_hex: String,
}

// ============ Response Types ============

/// Body of a successful token request. The shape is part of the external
/// contract; `expires_in` is the validity window in seconds, as a string.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: String,
}

/// JWT claim set for issued credentials.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Agent id the credential was issued to.
    pub sub: String,
    /// Issuance time (unix seconds).
    pub iat: i64,
    /// Expiry time (unix seconds); always `iat` + the validity window.
    pub exp: i64,
    /// Trust domain this credential is valid for.
    pub aud: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub registered_agents: usize,
    /// Hex-encoded verification key for tokens issued by this instance.
    pub verification_key_hex: String,
}

/// Standard API response wrapper for health and error bodies. Register and
/// token responses use their contract-fixed shapes instead.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}
