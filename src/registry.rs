//! Agent registry: authoritative agent id -> Ed25519 public key mapping.
//!
//! The registry is the only mutable shared state in the core. It is backed
//! by a sharded concurrent map, so lookups proceed in parallel and a
//! registration serializes only against conflicting access on the same key.
//! Insert-or-replace is atomic per id; no caller ever observes a
//! half-applied registration.

use dashmap::DashMap;
use ed25519_dalek::{VerifyingKey, PUBLIC_KEY_LENGTH};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    /// The supplied key did not hex-decode to a valid 32-byte Ed25519
    /// public key. The registry is left untouched.
    #[error("invalid public key encoding")]
    InvalidKeyEncoding,
}

/// Process-lifetime store of registered agent identities. Volatile: entries
/// live until the process exits. There is no deregistration; growth is
/// unbounded. A durable backing store would slot in behind this same
/// interface, provided lookups stay non-blocking.
#[derive(Default)]
pub struct AgentRegistry {
    agents: DashMap<String, VerifyingKey>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self {
            agents: DashMap::new(),
        }
    }

    /// Register an agent's public key, supplied as hex-encoded raw Ed25519
    /// bytes. Re-registering an existing id overwrites its key
    /// unconditionally (last-write-wins, no merge).
    pub fn register(&self, agent_id: &str, public_key_hex: &str) -> Result<(), RegistryError> {
        let bytes = hex::decode(public_key_hex).map_err(|_| RegistryError::InvalidKeyEncoding)?;

        let raw: [u8; PUBLIC_KEY_LENGTH] = bytes
            .try_into()
            .map_err(|_| RegistryError::InvalidKeyEncoding)?;

        let key =
            VerifyingKey::from_bytes(&raw).map_err(|_| RegistryError::InvalidKeyEncoding)?;

        self.agents.insert(agent_id.to_string(), key);
        Ok(())
    }

    /// Look up an agent's registered key. A miss is a valid negative
    /// result, not an error. Never mutates.
    pub fn lookup(&self, agent_id: &str) -> Option<VerifyingKey> {
        self.agents.get(agent_id).map(|r| *r.value())
    }

    /// Number of registered agents.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
