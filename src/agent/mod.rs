// ABOUTME: Agent module - the orchestration loop, its definition and prompt,
// ABOUTME: per-invocation state, sessions, and the Assistant facade.

mod assistant;
mod core;
mod definition;
mod prompt;
mod session;
mod state;

pub use assistant::{Assistant, HealthReport, HealthStatus, QueryResponse, CAPABILITIES};
pub use core::AgentCore;
pub use definition::AgentDefinition;
pub use prompt::build_system_prompt;
pub use session::{ConversationTurn, MemorySessionStore, Session, SessionStore};
pub use state::{AttemptLedger, Attempts, ExecutionState};
