//! AgentAuth Core
//!
//! M2M trust bootstrapping for autonomous agents: an agent registers an
//! Ed25519 public key once, then trades its identity for short-lived signed
//! bearer tokens usable against the rest of the agent infrastructure.
//!
//! ## Architecture
//!
//! - **Registry**: authoritative agent id -> public key mapping, concurrent-safe
//! - **Issuer**: consults the registry and mints 5-minute EdDSA JWTs
//! - **Signing key**: generated at startup, owned by the issuer, never persisted
//!
//! Proof-of-possession (a challenge/response signature over the request
//! payload) is a deliberate gap in this iteration: a token is issued on
//! identity recognition alone. The issuer is the seam where a `Verifier`
//! capability would be injected.

pub mod api;
pub mod config;
pub mod error;
pub mod issuer;
pub mod registry;
pub mod state;
pub mod types;

pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
