use std::sync::Arc;
use std::time::Instant;

use dashmap::DashMap;
use palmares_core::{AccessGate, BallotStore};

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub store: Arc<dyn BallotStore>,
    pub access: Arc<AccessGate>,
    /// Revoked JWT token IDs (jti). Tokens in this map are rejected by the auth extractor.
    pub revoked_tokens: Arc<DashMap<String, Instant>>,
}

impl AppState {
    pub fn new(config: ServerConfig, store: Arc<dyn BallotStore>) -> Self {
        let access = AccessGate::new(config.access.clone());
        Self {
            config: Arc::new(config),
            store,
            access: Arc::new(access),
            revoked_tokens: Arc::new(DashMap::new()),
        }
    }

    /// Drops revocations older than the token lifetime; those tokens have expired anyway.
    pub fn sweep_revoked_tokens(&self) {
        let ttl = std::time::Duration::from_secs(self.config.auth.jwt_ttl_hours * 3600);
        self.revoked_tokens
            .retain(|_, revoked_at| revoked_at.elapsed() < ttl);
    }
}
