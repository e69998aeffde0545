// ABOUTME: AgentCore - the think-act loop that turns one user utterance into
// ABOUTME: tool invocations and a final answer, under hard retry bounds.

use std::sync::Arc;

use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::definition::AgentDefinition;
use super::prompt::build_system_prompt;
use super::session::Session;
use super::state::ExecutionState;
use crate::config::Config;
use crate::contract::{CURRENCY_TOOL, FLIGHTS_TOOL, HOTELS_TOOL, NEWS_TOOL, WEATHER_TOOL};
use crate::error::AgentError;
use crate::llm::{self, ContentBlock, LlmClient, Message, Request, ToolCall};
use crate::tool::{FailureKind, Registry, ToolFailure};

/// Orchestrates the reasoning engine and the tool registry.
///
/// Holds no per-query state; one core serves any number of concurrent
/// invocations on different sessions.
pub struct AgentCore {
    client: Arc<dyn LlmClient>,
    registry: Arc<Registry>,
    definition: AgentDefinition,
}

impl AgentCore {
    pub fn new(
        client: Arc<dyn LlmClient>,
        registry: Arc<Registry>,
        definition: AgentDefinition,
    ) -> Self {
        Self {
            client,
            registry,
            definition,
        }
    }

    /// Build a core with the configured engine and all five capabilities.
    pub fn from_config(config: &Config) -> Result<Self, AgentError> {
        let client = llm::client_from_config(&config.llm)?;
        let registry = crate::tools::default_registry(config)?;
        let definition = AgentDefinition::new(&config.llm.model).retry(config.retry);
        Ok(Self::new(client, Arc::new(registry), definition))
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn definition(&self) -> &AgentDefinition {
        &self.definition
    }

    /// Answer `user_text` in the context of `session`.
    ///
    /// On success the user turn and the answer are appended to the session.
    /// On error the session is left as it was.
    ///
    /// # Errors
    ///
    /// `AgentError::InvalidInput` for blank text, before the engine is
    /// contacted. `AgentError::Engine` if the reasoning engine fails.
    pub async fn invoke(&self, session: &mut Session, user_text: &str) -> Result<String, AgentError> {
        let text = user_text.trim();
        if text.is_empty() {
            return Err(AgentError::InvalidInput(
                "query must not be empty".to_string(),
            ));
        }

        let invocation_id = Uuid::new_v4().to_string();
        let span = info_span!("invoke", invocation_id = %invocation_id, session_id = %session.id());

        session.push_user(text);
        let state = ExecutionState::new(invocation_id, session.to_messages());

        match self.run(state).instrument(span).await {
            Ok(answer) => {
                session.push_assistant(&answer);
                Ok(answer)
            }
            Err(e) => {
                session.discard_pending_user_turn();
                Err(e)
            }
        }
    }

    fn system_prompt(&self) -> String {
        match &self.definition.system_prompt {
            Some(prompt) => prompt.clone(),
            None => build_system_prompt(
                &self.registry,
                &self.definition.retry,
                chrono::Utc::now().date_naive(),
            ),
        }
    }

    async fn run(&self, mut state: ExecutionState) -> Result<String, AgentError> {
        let retry = self.definition.retry;
        let system = self.system_prompt();
        let tools = self.registry.to_definitions();

        loop {
            if state.iterations >= retry.max_iterations {
                warn!(iterations = state.iterations, "iteration limit reached");
                self.replay_below_minimum(&mut state).await;
                return Ok(compose_answer(
                    &state,
                    Some("I wasn't able to finish answering within the allowed number of steps."),
                ));
            }
            state.iterations += 1;
            debug!(iteration = state.iterations, "calling reasoning engine");

            let mut request = Request::new(&self.definition.model)
                .system(&system)
                .messages(state.messages.clone())
                .tools(tools.clone())
                .max_tokens(self.definition.max_tokens);
            if let Some(temperature) = self.definition.temperature {
                request = request.temperature(temperature);
            }

            let response = self.client.create_message(&request).await?;
            state.last_text = response.text();
            let calls = response.tool_calls();

            if calls.is_empty() {
                let pending = state.ledger.needs_retry(retry.min_attempts);
                if !pending.is_empty() {
                    info!(tools = ?pending, "requesting retry before answering");
                    if !state.last_text.trim().is_empty() {
                        state.messages.push(Message::assistant(&state.last_text));
                    }
                    state.messages.push(Message::user(retry_request(&pending)));
                    for name in &pending {
                        state.ledger.mark_nudged(name);
                    }
                    continue;
                }

                if self.replay_below_minimum(&mut state).await {
                    continue;
                }

                info!(iterations = state.iterations, "final answer ready");
                return Ok(compose_answer(&state, None));
            }

            state.messages.push(Message::assistant_blocks(response.content));

            let mut results = Vec::with_capacity(calls.len());
            for call in calls {
                if !state.ledger.can_attempt(&call.name, retry.max_attempts) {
                    warn!(tool = %call.name, "attempt limit reached, call not executed");
                    results.push(ContentBlock::tool_error(
                        call.id,
                        format!(
                            "Attempt limit reached for {}. Do not call it again.",
                            call.name
                        ),
                    ));
                    continue;
                }
                results.push(self.execute(&mut state, &call).await);
            }
            state.messages.push(Message::tool_results(results));

            let exhausted = state.ledger.exhausted(retry.max_attempts);
            if !exhausted.is_empty() {
                let names: Vec<_> = exhausted.iter().map(|(name, _)| *name).collect();
                warn!(tools = ?names, "retry budget exhausted");
                return Ok(compose_answer(&state, None));
            }
        }
    }
}

impl AgentCore {
    /// Dispatch one call, record it, and return its observation block.
    async fn execute(&self, state: &mut ExecutionState, call: &ToolCall) -> ContentBlock {
        info!(
            tool = %call.name,
            attempt = state.ledger.attempts(&call.name) + 1,
            "dispatching tool"
        );
        let result = self.registry.dispatch(&call.name, &call.input).await;
        state.ledger.record(call, &result);

        let observation = result.to_observation();
        if result.is_failure() {
            debug!(tool = %call.name, %observation, "tool failed");
            ContentBlock::tool_error(call.id.clone(), observation)
        } else {
            ContentBlock::tool_result(call.id.clone(), observation)
        }
    }

    /// Re-run the last call of every failed tool that is still below the
    /// minimum attempt count after the engine declined to retry it.
    ///
    /// Returns whether anything was replayed.
    async fn replay_below_minimum(&self, state: &mut ExecutionState) -> bool {
        let replays = state.ledger.replays(self.definition.retry.min_attempts);
        if replays.is_empty() {
            return false;
        }

        let mut uses = Vec::with_capacity(replays.len() + 1);
        if !state.last_text.trim().is_empty() {
            uses.push(ContentBlock::text(&state.last_text));
        }
        let mut results = Vec::with_capacity(replays.len());
        for call in replays {
            let call = ToolCall {
                id: format!("{}-replay", call.id),
                ..call
            };
            info!(tool = %call.name, "engine declined to retry, replaying last call");
            uses.push(ContentBlock::ToolUse {
                id: call.id.clone(),
                name: call.name.clone(),
                input: call.input.clone(),
            });
            results.push(self.execute(state, &call).await);
        }
        state.messages.push(Message::assistant_blocks(uses));
        state.messages.push(Message::tool_results(results));
        true
    }
}

fn retry_request(tools: &[String]) -> String {
    format!(
        "The last call to {} failed. Read the error, correct the arguments, and call it again before answering.",
        tools.join(", ")
    )
}

/// Human name for a capability, used in prose.
fn capability_label(tool: &str) -> &str {
    match tool {
        WEATHER_TOOL => "weather forecast",
        FLIGHTS_TOOL => "flight search",
        HOTELS_TOOL => "hotel search",
        CURRENCY_TOOL => "currency conversion",
        NEWS_TOOL => "news lookup",
        other => other,
    }
}

/// One sentence explaining a failure, without internal codes.
pub(crate) fn explain_failure(tool: &str, failure: &ToolFailure) -> String {
    let label = capability_label(tool);
    match failure.kind {
        FailureKind::Unsupported => format!("I couldn't complete the {}: {}.", label, failure.detail),
        FailureKind::SchemaViolation => format!(
            "I couldn't complete the {} because the request details were invalid ({}).",
            label, failure.detail
        ),
        FailureKind::UnknownTool => format!("I don't have a tool called {} to help with that.", tool),
        FailureKind::UpstreamFormat => format!(
            "I couldn't complete the {} because the service returned data I couldn't read.",
            label
        ),
        FailureKind::UpstreamUnavailable => format!(
            "I couldn't complete the {} because the service is unavailable right now.",
            label
        ),
    }
}

/// Final answer: the engine's last text plus a sentence per outstanding failure.
fn compose_answer(state: &ExecutionState, note: Option<&str>) -> String {
    let mut parts = Vec::new();
    let text = state.last_text.trim();
    if !text.is_empty() {
        parts.push(text.to_string());
    }
    if let Some(note) = note {
        parts.push(note.to_string());
    }
    for (tool, failure) in state.ledger.outstanding() {
        parts.push(explain_failure(tool, failure));
    }
    if parts.is_empty() {
        parts.push("I'm sorry, I couldn't find an answer to that.".to_string());
    }
    parts.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explain_unsupported_currency() {
        let failure = ToolFailure::unsupported("Currency 'XYZ' not available");
        assert_eq!(
            explain_failure(CURRENCY_TOOL, &failure),
            "I couldn't complete the currency conversion: Currency 'XYZ' not available."
        );
    }

    #[test]
    fn test_explanations_have_no_codes() {
        let failures = [
            ToolFailure::invalid_field("date", "must match YYYY-MM-DD"),
            ToolFailure::unknown_tool("book_train"),
            ToolFailure::upstream_format("missing forecast"),
            ToolFailure::upstream_unavailable("Weather service returned HTTP 503"),
        ];
        for failure in &failures {
            let text = explain_failure(WEATHER_TOOL, failure);
            assert!(!text.contains(failure.kind.code()), "{}", text);
            assert!(!text.contains("503"), "{}", text);
        }
    }

    #[test]
    fn test_compose_answer_fallback() {
        let state = ExecutionState::new("id", Vec::new());
        assert_eq!(
            compose_answer(&state, None),
            "I'm sorry, I couldn't find an answer to that."
        );
    }
}
