// ABOUTME: Per-invocation execution state - the engine transcript, iteration
// ABOUTME: count and the attempt ledger that enforces per-tool retry bounds.

use std::collections::HashMap;

use crate::llm::{Message, ToolCall};
use crate::tool::{ToolFailure, ToolResult};

/// Attempts made against one tool name within a single invocation.
#[derive(Debug, Clone, Default)]
pub struct Attempts {
    pub count: u32,
    /// Failure from the most recent attempt; None if it succeeded.
    pub last_failure: Option<ToolFailure>,
    /// Whether the core already asked the engine to retry this tool.
    pub nudged: bool,
    /// The most recently executed call, replayed when the engine will not retry.
    pub last_call: Option<ToolCall>,
}

/// Attempt counters keyed by tool name, in first-use order.
#[derive(Debug, Default)]
pub struct AttemptLedger {
    entries: HashMap<String, Attempts>,
    order: Vec<String>,
}

impl AttemptLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts(&self, name: &str) -> u32 {
        self.entries.get(name).map_or(0, |a| a.count)
    }

    pub fn get(&self, name: &str) -> Option<&Attempts> {
        self.entries.get(name)
    }

    /// Whether another call to `name` may still be executed.
    pub fn can_attempt(&self, name: &str, max_attempts: u32) -> bool {
        self.attempts(name) < max_attempts
    }

    /// Record the outcome of one executed call.
    pub fn record(&mut self, call: &ToolCall, result: &ToolResult) {
        if !self.entries.contains_key(&call.name) {
            self.order.push(call.name.clone());
        }
        let entry = self.entries.entry(call.name.clone()).or_default();
        entry.count += 1;
        entry.last_failure = result.failure().cloned();
        entry.last_call = Some(call.clone());
    }

    pub fn mark_nudged(&mut self, name: &str) {
        if let Some(entry) = self.entries.get_mut(name) {
            entry.nudged = true;
        }
    }

    /// Tools whose latest attempt failed, in first-use order.
    pub fn outstanding(&self) -> Vec<(&str, &ToolFailure)> {
        self.order
            .iter()
            .filter_map(|name| {
                let entry = self.entries.get(name)?;
                entry.last_failure.as_ref().map(|f| (name.as_str(), f))
            })
            .collect()
    }

    /// Tools whose latest attempt failed with the budget used up.
    pub fn exhausted(&self, max_attempts: u32) -> Vec<(&str, &ToolFailure)> {
        self.outstanding()
            .into_iter()
            .filter(|(name, _)| self.attempts(name) >= max_attempts)
            .collect()
    }

    /// Failed tools that have not yet had `min_attempts` tries or a nudge.
    pub fn needs_retry(&self, min_attempts: u32) -> Vec<String> {
        self.outstanding()
            .into_iter()
            .filter(|(name, _)| {
                self.entries
                    .get(*name)
                    .is_some_and(|e| e.count < min_attempts && !e.nudged)
            })
            .map(|(name, _)| name.to_string())
            .collect()
    }

    /// Last calls of failed tools still below `min_attempts`.
    pub fn replays(&self, min_attempts: u32) -> Vec<ToolCall> {
        self.outstanding()
            .into_iter()
            .filter_map(|(name, _)| {
                let entry = self.entries.get(name)?;
                if entry.count < min_attempts {
                    entry.last_call.clone()
                } else {
                    None
                }
            })
            .collect()
    }
}

/// Everything one `invoke` accumulates; discarded when it returns.
#[derive(Debug)]
pub struct ExecutionState {
    pub invocation_id: String,
    pub messages: Vec<Message>,
    pub iterations: u32,
    pub ledger: AttemptLedger,
    /// Text of the engine's most recent reply, used when the loop stops early.
    pub last_text: String,
}

impl ExecutionState {
    pub fn new(invocation_id: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            invocation_id: invocation_id.into(),
            messages,
            iterations: 0,
            ledger: AttemptLedger::new(),
            last_text: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::ConvertedAmount;

    fn call(name: &str) -> ToolCall {
        ToolCall {
            id: format!("{}-1", name),
            name: name.to_string(),
            input: serde_json::json!({}),
        }
    }

    fn failed() -> ToolResult {
        ToolFailure::unsupported("Currency 'XYZ' not available").into()
    }

    #[test]
    fn test_record_counts_and_tracks_last_failure() {
        let mut ledger = AttemptLedger::new();
        ledger.record(&call("convert_currency"), &failed());
        assert_eq!(ledger.attempts("convert_currency"), 1);
        assert_eq!(ledger.outstanding().len(), 1);

        ledger.record(
            &call("convert_currency"),
            &ToolResult::success(ConvertedAmount { final_amount: 1.0 }),
        );
        assert_eq!(ledger.attempts("convert_currency"), 2);
        assert!(ledger.outstanding().is_empty());
    }

    #[test]
    fn test_can_attempt_respects_ceiling() {
        let mut ledger = AttemptLedger::new();
        for _ in 0..4 {
            assert!(ledger.can_attempt("get_news", 4));
            ledger.record(&call("get_news"), &failed());
        }
        assert!(!ledger.can_attempt("get_news", 4));
        assert_eq!(ledger.exhausted(4).len(), 1);
    }

    #[test]
    fn test_needs_retry_once_below_minimum() {
        let mut ledger = AttemptLedger::new();
        ledger.record(&call("search_flights"), &failed());
        assert_eq!(ledger.needs_retry(2), vec!["search_flights".to_string()]);

        ledger.mark_nudged("search_flights");
        assert!(ledger.needs_retry(2).is_empty());
    }

    #[test]
    fn test_no_retry_needed_at_minimum() {
        let mut ledger = AttemptLedger::new();
        ledger.record(&call("search_hotels"), &failed());
        ledger.record(&call("search_hotels"), &failed());
        assert!(ledger.needs_retry(2).is_empty());
        assert!(ledger.exhausted(4).is_empty());
    }

    #[test]
    fn test_replays_failed_calls_below_minimum() {
        let mut ledger = AttemptLedger::new();
        ledger.record(&call("convert_currency"), &failed());
        ledger.record(
            &call("get_news"),
            &ToolResult::success(Vec::<crate::contract::NewsArticle>::new()),
        );

        let replays = ledger.replays(2);
        assert_eq!(replays.len(), 1);
        assert_eq!(replays[0].name, "convert_currency");

        ledger.record(&call("convert_currency"), &failed());
        assert!(ledger.replays(2).is_empty());
    }

    #[test]
    fn test_outstanding_in_first_use_order() {
        let mut ledger = AttemptLedger::new();
        ledger.record(&call("get_weather"), &failed());
        ledger.record(&call("get_news"), &failed());
        ledger.record(&call("get_weather"), &failed());
        let names: Vec<_> = ledger.outstanding().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["get_weather", "get_news"]);
    }
}
