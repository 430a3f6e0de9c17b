//! Application state for AgentAuth.

use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::issuer::{IssueError, TokenIssuer};
use crate::registry::AgentRegistry;
use crate::types::{HealthResponse, RegisterRequest, TokenResponse};

const MAX_AGENT_ID_BYTES: usize = 256;

/// All shared service state, constructed once at startup and injected into
/// the request layer. Nothing here is reachable through globals.
pub struct AppState {
    /// Agent id -> public key store.
    pub registry: Arc<AgentRegistry>,
    /// Credential issuer; owns the process signing key.
    pub issuer: TokenIssuer,
    /// Configuration
    pub config: Config,
    /// Start time for uptime calculation
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Arc<Self>> {
        let registry = Arc::new(AgentRegistry::new());
        let issuer = TokenIssuer::new(
            Arc::clone(&registry),
            config.token_ttl,
            config.audience.clone(),
        )?;

        Ok(Arc::new(Self {
            registry,
            issuer,
            config,
            start_time: Instant::now(),
        }))
    }

    /// Register an agent identity. Returns the confirmation line sent back
    /// to the caller.
    pub fn register(&self, req: &RegisterRequest) -> ApiResult<String> {
        validate_agent_id(&req.agent_id).map_err(|e| ApiError::BadRequest(e.into()))?;

        self.registry
            .register(&req.agent_id, &req.public_key_hex)
            .map_err(|_| ApiError::BadRequest("Invalid public key".into()))?;

        tracing::info!("Registered agent: {}", req.agent_id);
        Ok(format!(
            "Agent {} registered successfully for M2M auth.\n",
            req.agent_id
        ))
    }

    /// Issue a token for a registered agent id.
    pub fn issue_token(&self, agent_id: &str) -> ApiResult<TokenResponse> {
        let token = self.issuer.issue_for(agent_id).map_err(|e| match e {
            IssueError::UnknownAgent => ApiError::Unauthorized,
            IssueError::Signing(err) => {
                tracing::error!("Token signing failed for {}: {}", agent_id, err);
                ApiError::Internal(err.to_string())
            }
        })?;

        Ok(TokenResponse {
            access_token: token.access_token,
            expires_in: token.expires_in.as_secs().to_string(),
        })
    }

    /// Get health info
    pub fn health(&self) -> HealthResponse {
        HealthResponse {
            status: "healthy".into(),
            version: self.config.version.clone(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            registered_agents: self.registry.len(),
            verification_key_hex: self.issuer.verifying_key_hex(),
        }
    }
}

/// Validate an agent id at the boundary. The registry itself accepts any
/// string; empty or oversized ids are rejected before they reach it.
pub fn validate_agent_id(id: &str) -> Result<(), &'static str> {
    if id.is_empty() {
        return Err("Agent id cannot be empty");
    }
    if id.len() > MAX_AGENT_ID_BYTES {
        return Err("Agent id too long");
    }
    Ok(())
}
