// ABOUTME: Assistant - the transport-facing facade: session-scoped queries
// ABOUTME: returning {response}, and a health report over registered tools.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::core::AgentCore;
use super::session::{MemorySessionStore, SessionStore};
use crate::config::Config;
use crate::contract::{CURRENCY_TOOL, FLIGHTS_TOOL, HOTELS_TOOL, NEWS_TOOL, WEATHER_TOOL};
use crate::error::AgentError;

/// Every capability a healthy assistant has registered.
pub const CAPABILITIES: [&str; 5] = [
    WEATHER_TOOL,
    FLIGHTS_TOOL,
    HOTELS_TOOL,
    CURRENCY_TOOL,
    NEWS_TOOL,
];

/// Reply to a query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResponse {
    pub response: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Degraded,
}

/// Liveness summary for the transport shell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    /// Capabilities that are not registered.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,
}

/// Session-aware entry point wrapping one shared [`AgentCore`].
pub struct Assistant {
    core: Arc<AgentCore>,
    sessions: Arc<dyn SessionStore>,
}

impl Assistant {
    pub fn new(core: Arc<AgentCore>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { core, sessions }
    }

    /// Build from configuration with an in-memory session store.
    pub fn from_config(config: &Config) -> Result<Self, AgentError> {
        let core = AgentCore::from_config(config)?;
        Ok(Self::new(Arc::new(core), MemorySessionStore::shared()))
    }

    pub fn core(&self) -> &AgentCore {
        &self.core
    }

    pub fn sessions(&self) -> &Arc<dyn SessionStore> {
        &self.sessions
    }

    /// Answer `text` within session `session_id`, creating the session on first use.
    ///
    /// Queries on the same session run one at a time.
    pub async fn query(&self, session_id: &str, text: &str) -> Result<QueryResponse, AgentError> {
        let session = self.sessions.open(session_id).await;
        let mut session = session.lock().await;
        let response = self.core.invoke(&mut session, text).await?;
        Ok(QueryResponse { response })
    }

    /// Report `ok` when all five capabilities are registered.
    pub fn health(&self) -> HealthReport {
        let registry = self.core.registry();
        let missing: Vec<String> = CAPABILITIES
            .iter()
            .filter(|name| !registry.contains(name))
            .map(|name| name.to_string())
            .collect();

        let status = if missing.is_empty() {
            HealthStatus::Ok
        } else {
            HealthStatus::Degraded
        };
        info!(?status, missing = missing.len(), "health check");

        HealthReport { status, missing }
    }
}
