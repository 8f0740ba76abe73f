//! Agent functions — the capabilities an agent can invoke.
//!
//! A function takes no arguments from this layer's point of view (any
//! argument binding is the executor's business) and returns one of four
//! shapes, captured by [`FunctionOutput`]. The executor normalises every
//! shape into a single [`FunctionResult`] with [`FunctionOutput::into_result`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::agent::Agent;
use crate::context::ContextVariables;
use crate::result::FunctionResult;

/// Everything an agent function may return.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionOutput {
    /// Plain text payload.
    Value(String),
    /// Unconditional handoff to another agent.
    Agent(Agent),
    /// Structured result, used verbatim.
    Result(FunctionResult),
    /// Raw context updates.
    Context(ContextVariables),
}

impl FunctionOutput {
    /// Normalise into the canonical result of one invocation.
    pub fn into_result(self) -> FunctionResult {
        match self {
            Self::Value(value) => FunctionResult::value(value),
            Self::Agent(agent) => FunctionResult::handoff(agent),
            Self::Result(result) => result,
            Self::Context(context_variables) => FunctionResult::context(context_variables),
        }
    }
}

impl From<String> for FunctionOutput {
    fn from(value: String) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for FunctionOutput {
    fn from(value: &str) -> Self {
        Self::Value(value.to_string())
    }
}

impl From<Agent> for FunctionOutput {
    fn from(agent: Agent) -> Self {
        Self::Agent(agent)
    }
}

impl From<FunctionResult> for FunctionOutput {
    fn from(result: FunctionResult) -> Self {
        Self::Result(result)
    }
}

impl From<ContextVariables> for FunctionOutput {
    fn from(context_variables: ContextVariables) -> Self {
        Self::Context(context_variables)
    }
}

type Handler = Arc<dyn Fn() -> FunctionOutput + Send + Sync>;

/// A named, invocable capability.
///
/// Cloning shares the underlying handler; two functions are equal only when
/// they share a handler and a name.
#[derive(Clone)]
pub struct AgentFunction {
    name: String,
    description: String,
    handler: Handler,
}

impl AgentFunction {
    pub fn new<F, O>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn() -> O + Send + Sync + 'static,
        O: Into<FunctionOutput>,
    {
        Self {
            name: name.into(),
            description: String::new(),
            handler: Arc::new(move || -> FunctionOutput { handler().into() }),
        }
    }

    /// Set the description sent to the model alongside the name.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Invoke and return the raw shape.
    pub fn call(&self) -> FunctionOutput {
        (self.handler)()
    }

    /// Invoke and normalise. Exactly one result per call.
    pub fn invoke(&self) -> FunctionResult {
        let result = self.call().into_result();
        tracing::debug!(
            function = %self.name,
            handoff = result.is_handoff(),
            stop_reflection = result.stop_reflection,
            "Agent function invoked"
        );
        result
    }

    /// Describe this function for a model's tool list.
    pub fn definition(&self) -> FunctionDefinition {
        FunctionDefinition {
            name: self.name.clone(),
            description: self.description.clone(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        }
    }

    pub fn same_handler(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.handler, &other.handler)
    }
}

impl PartialEq for AgentFunction {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.same_handler(other)
    }
}

impl fmt::Debug for AgentFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentFunction")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// A function definition sent to the model so it knows what it can call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,

    pub description: String,

    /// JSON Schema describing the parameters
    pub parameters: serde_json::Value,
}

/// Named functions that agent configurations can refer to.
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, AgentFunction>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function. Replaces any existing function with the same name.
    pub fn register(&mut self, function: AgentFunction) {
        self.functions.insert(function.name().to_string(), function);
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, function: AgentFunction) -> Self {
        self.register(function);
        self
    }

    pub fn get(&self, name: &str) -> Option<&AgentFunction> {
        self.functions.get(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
