//! The normalised outcome of invoking one agent function.

use crate::agent::Agent;
use crate::context::ContextVariables;

/// What a single function invocation hands back to the orchestrator.
///
/// Created per call and consumed immediately; an `agent` requests a handoff,
/// and `context_variables` holds incremental updates rather than a snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FunctionResult {
    /// Text payload, empty by default
    pub value: String,

    /// Agent to hand control to
    pub agent: Option<Agent>,

    /// Updates to the shared context
    pub context_variables: ContextVariables,

    /// End the reflection loop for this step, whatever the agent's setting
    pub stop_reflection: bool,
}

impl FunctionResult {
    pub fn value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Default::default()
        }
    }

    /// A result whose only content is a new agent.
    pub fn handoff(agent: Agent) -> Self {
        Self {
            agent: Some(agent),
            ..Default::default()
        }
    }

    pub fn context(context_variables: ContextVariables) -> Self {
        Self {
            context_variables,
            ..Default::default()
        }
    }

    pub fn with_agent(mut self, agent: Agent) -> Self {
        self.agent = Some(agent);
        self
    }

    /// Set one context variable, replacing any previous value for the key.
    pub fn with_context(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.context_variables.insert(key.into(), value);
        self
    }

    pub fn with_stop_reflection(mut self) -> Self {
        self.stop_reflection = true;
        self
    }

    pub fn is_handoff(&self) -> bool {
        self.agent.is_some()
    }
}
