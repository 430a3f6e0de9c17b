//! Token issuer: decides whether an agent id is entitled to a credential
//! and, if so, constructs and signs it.
//!
//! The issuer owns the process signing key. The key is generated once at
//! startup, lives only in memory, and its public half is the verification
//! key for every token this instance issues. Issuance mutates nothing; a
//! token is a pure function of (registry state, clock, signing key).

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use ed25519_dalek::pkcs8::EncodePrivateKey;
use ed25519_dalek::{SigningKey, VerifyingKey};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use rand::rngs::OsRng;
use thiserror::Error;

use crate::registry::AgentRegistry;
use crate::types::Claims;

#[derive(Error, Debug)]
pub enum IssueError {
    /// Agent id not present in the registry. This is the sole authorization
    /// check: no proof of key possession is performed in this iteration.
    #[error("agent not registered")]
    UnknownAgent,

    /// Signing with an in-memory valid key is not expected to fail; treated
    /// as an internal fault, never retried.
    #[error("failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// A freshly signed credential. Ephemeral: not stored, not tracked, not
/// revocable after issuance.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_in: Duration,
}

pub struct TokenIssuer {
    registry: Arc<AgentRegistry>,
    encoding_key: EncodingKey,
    verifying_key: VerifyingKey,
    ttl: Duration,
    audience: String,
}

impl TokenIssuer {
    /// Create an issuer with a freshly generated Ed25519 signing key. The
    /// private half never leaves this struct.
    pub fn new(
        registry: Arc<AgentRegistry>,
        ttl: Duration,
        audience: impl Into<String>,
    ) -> anyhow::Result<Self> {
        let signing_key = SigningKey::generate(&mut OsRng);
        let verifying_key = signing_key.verifying_key();

        let der = signing_key
            .to_pkcs8_der()
            .map_err(|e| anyhow::anyhow!("failed to encode signing key: {e}"))?;
        let encoding_key = EncodingKey::from_ed_der(der.as_bytes());

        Ok(Self {
            registry,
            encoding_key,
            verifying_key,
            ttl,
            audience: audience.into(),
        })
    }

    /// Issue a signed, time-bounded token for `agent_id`, provided the id
    /// is registered. Expiry is always issued-at plus the configured
    /// validity window, exactly.
    pub fn issue_for(&self, agent_id: &str) -> Result<IssuedToken, IssueError> {
        if self.registry.lookup(agent_id).is_none() {
            return Err(IssueError::UnknownAgent);
        }

        // In a full implementation, a cryptographic challenge signature
        // from the agent's registered key would be verified here.

        let issued_at = Utc::now().timestamp();
        let claims = Claims {
            sub: agent_id.to_string(),
            iat: issued_at,
            exp: issued_at + self.ttl.as_secs() as i64,
            aud: self.audience.clone(),
        };

        let access_token =
            jsonwebtoken::encode(&Header::new(Algorithm::EdDSA), &claims, &self.encoding_key)?;

        Ok(IssuedToken {
            access_token,
            expires_in: self.ttl,
        })
    }

    /// Verification key for tokens issued by this instance.
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    /// Verification key as hex-encoded raw bytes.
    pub fn verifying_key_hex(&self) -> String {
        hex::encode(self.verifying_key.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{DecodingKey, Validation};

    const TTL: Duration = Duration::from_secs(300);
    const AUDIENCE: &str = "agent-infrastructure";

    fn registered_registry(ids: &[&str]) -> Arc<AgentRegistry> {
        let registry = Arc::new(AgentRegistry::new());
        for id in ids {
            let key = SigningKey::generate(&mut OsRng);
            registry
                .register(id, &hex::encode(key.verifying_key().as_bytes()))
                .unwrap();
        }
        registry
    }

    fn decode_claims(issuer: &TokenIssuer, token: &str) -> Claims {
        let key = DecodingKey::from_ed_der(issuer.verifying_key().as_bytes());
        let mut validation = Validation::new(Algorithm::EdDSA);
        validation.set_audience(&[AUDIENCE]);
        jsonwebtoken::decode::<Claims>(token, &key, &validation)
            .unwrap()
            .claims
    }

    #[test]
    fn test_unknown_agent_is_rejected() {
        let registry = registered_registry(&["drone-1", "drone-2", "drone-3"]);
        let issuer = TokenIssuer::new(registry, TTL, AUDIENCE).unwrap();

        assert!(matches!(
            issuer.issue_for("drone-8"),
            Err(IssueError::UnknownAgent)
        ));
    }

    #[test]
    fn test_issued_token_claims() {
        let registry = registered_registry(&["drone-7"]);
        let issuer = TokenIssuer::new(registry, TTL, AUDIENCE).unwrap();

        let before = Utc::now().timestamp();
        let token = issuer.issue_for("drone-7").unwrap();
        let after = Utc::now().timestamp();

        assert_eq!(token.expires_in, TTL);

        let claims = decode_claims(&issuer, &token.access_token);
        assert_eq!(claims.sub, "drone-7");
        assert_eq!(claims.aud, AUDIENCE);
        assert_eq!(claims.exp - claims.iat, 300);
        assert!(claims.iat >= before && claims.iat <= after);
    }

    #[test]
    fn test_issuance_does_not_mutate_registry() {
        let registry = registered_registry(&["drone-7"]);
        let issuer = TokenIssuer::new(Arc::clone(&registry), TTL, AUDIENCE).unwrap();

        issuer.issue_for("drone-7").unwrap();
        let _ = issuer.issue_for("drone-8");

        assert_eq!(registry.len(), 1);
        assert!(registry.lookup("drone-7").is_some());
    }

    #[test]
    fn test_tokens_verify_only_against_own_instance() {
        let registry = registered_registry(&["drone-7"]);
        let issuer_a = TokenIssuer::new(Arc::clone(&registry), TTL, AUDIENCE).unwrap();
        let issuer_b = TokenIssuer::new(registry, TTL, AUDIENCE).unwrap();

        let token = issuer_a.issue_for("drone-7").unwrap();

        let key_b = DecodingKey::from_ed_der(issuer_b.verifying_key().as_bytes());
        let mut validation = Validation::new(Algorithm::EdDSA);
        validation.set_audience(&[AUDIENCE]);
        assert!(jsonwebtoken::decode::<Claims>(&token.access_token, &key_b, &validation).is_err());
    }
}
