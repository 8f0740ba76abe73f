//! Agent definition, validation, and its serializable configuration form.
//!
//! An [`Agent`] can only be obtained through a validating path, and every
//! mutator that could break the reflection rule re-checks it before
//! committing. A reflective agent ends its reflection loop by calling a
//! function, so it must have at least one.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::function::{AgentFunction, FunctionDefinition, FunctionRegistry};
use crate::instructions::Instructions;
use crate::message::Message;

pub const DEFAULT_NAME: &str = "Agent";
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_INSTRUCTIONS: &str = "You are a helpful agent.";

const REFLECTION_WITHOUT_FUNCTIONS: &str = "Reflection capability is enabled (has_reflection=true), \
     but no tools/functions are provided. An agent must have at least one function to either \
     complete its task, or delegate control to another agent when reflection is active.";

fn check_reflection(name: &str, has_reflection: bool, function_count: usize) -> Result<()> {
    if has_reflection && function_count == 0 {
        tracing::warn!(agent = %name, "Rejected reflective agent without functions");
        return Err(Error::configuration(REFLECTION_WITHOUT_FUNCTIONS));
    }
    Ok(())
}

/// A configured actor: identity, model, instructions and capabilities.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    name: String,
    model: String,
    instructions: Instructions,
    functions: Vec<AgentFunction>,
    tool_choice: Option<String>,
    parallel_tool_calls: bool,
    has_reflection: bool,
}

impl Default for Agent {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            model: DEFAULT_MODEL.to_string(),
            instructions: Instructions::default(),
            functions: Vec::new(),
            tool_choice: None,
            parallel_tool_calls: true,
            has_reflection: false,
        }
    }
}

impl Agent {
    pub fn builder() -> AgentBuilder {
        AgentBuilder::default()
    }

    /// A non-reflective agent with defaults and the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Start a builder pre-filled with this agent's fields.
    pub fn to_builder(&self) -> AgentBuilder {
        AgentBuilder {
            agent: self.clone(),
        }
    }

    /// Re-check every structural rule.
    pub fn validate(&self) -> Result<()> {
        check_reflection(&self.name, self.has_reflection, self.functions.len())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn instructions(&self) -> &Instructions {
        &self.instructions
    }

    /// Functions in registration order.
    pub fn functions(&self) -> &[AgentFunction] {
        &self.functions
    }

    pub fn tool_choice(&self) -> Option<&str> {
        self.tool_choice.as_deref()
    }

    pub fn parallel_tool_calls(&self) -> bool {
        self.parallel_tool_calls
    }

    pub fn has_reflection(&self) -> bool {
        self.has_reflection
    }

    pub fn function(&self, name: &str) -> Option<&AgentFunction> {
        self.functions.iter().find(|f| f.name() == name)
    }

    pub fn function_names(&self) -> Vec<&str> {
        self.functions.iter().map(AgentFunction::name).collect()
    }

    /// Definitions for the model's tool list, in registration order.
    pub fn tool_definitions(&self) -> Vec<FunctionDefinition> {
        self.functions.iter().map(AgentFunction::definition).collect()
    }

    /// Resolve the instructions into a system message.
    pub fn system_message(&self) -> Message {
        Message::system(self.instructions.resolve())
    }

    pub fn set_instructions(&mut self, instructions: impl Into<Instructions>) {
        self.instructions = instructions.into();
    }

    pub fn set_model(&mut self, model: impl Into<String>) {
        self.model = model.into();
    }

    pub fn push_function(&mut self, function: AgentFunction) {
        self.functions.push(function);
    }

    pub fn set_has_reflection(&mut self, enabled: bool) -> Result<()> {
        check_reflection(&self.name, enabled, self.functions.len())?;
        self.has_reflection = enabled;
        Ok(())
    }

    pub fn set_functions(&mut self, functions: Vec<AgentFunction>) -> Result<()> {
        check_reflection(&self.name, self.has_reflection, functions.len())?;
        self.functions = functions;
        Ok(())
    }

    /// Remove the first function with `name`. Fails, leaving the agent
    /// unchanged, if that would strand a reflective agent.
    pub fn remove_function(&mut self, name: &str) -> Result<Option<AgentFunction>> {
        let Some(index) = self.functions.iter().position(|f| f.name() == name) else {
            return Ok(None);
        };
        check_reflection(&self.name, self.has_reflection, self.functions.len() - 1)?;
        Ok(Some(self.functions.remove(index)))
    }

    pub fn clear_functions(&mut self) -> Result<()> {
        self.set_functions(Vec::new())
    }

    /// Convert to the serializable form. Computed instructions have no
    /// textual form and are rejected.
    pub fn to_config(&self) -> Result<AgentConfig> {
        let instructions = self.instructions.as_static().ok_or_else(|| {
            Error::NotSerializable(format!("agent '{}' has computed instructions", self.name))
        })?;

        Ok(AgentConfig {
            name: self.name.clone(),
            model: Some(self.model.clone()),
            instructions: instructions.to_string(),
            functions: self.function_names().into_iter().map(String::from).collect(),
            tool_choice: self.tool_choice.clone(),
            parallel_tool_calls: self.parallel_tool_calls,
            has_reflection: self.has_reflection,
        })
    }
}

/// Builder for [`Agent`]; [`build`](Self::build) runs validation.
#[derive(Debug, Clone, Default)]
pub struct AgentBuilder {
    agent: Agent,
}

impl AgentBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.agent.name = name.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.agent.model = model.into();
        self
    }

    pub fn instructions(mut self, instructions: impl Into<Instructions>) -> Self {
        self.agent.instructions = instructions.into();
        self
    }

    /// Instructions produced on demand by `producer`.
    pub fn computed_instructions<F>(mut self, producer: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.agent.instructions = Instructions::computed(producer);
        self
    }

    /// Append one function.
    pub fn function(mut self, function: AgentFunction) -> Self {
        self.agent.functions.push(function);
        self
    }

    /// Replace the function list.
    pub fn functions(mut self, functions: impl IntoIterator<Item = AgentFunction>) -> Self {
        self.agent.functions = functions.into_iter().collect();
        self
    }

    pub fn tool_choice(mut self, tool_choice: impl Into<String>) -> Self {
        self.agent.tool_choice = Some(tool_choice.into());
        self
    }

    pub fn parallel_tool_calls(mut self, enabled: bool) -> Self {
        self.agent.parallel_tool_calls = enabled;
        self
    }

    pub fn has_reflection(mut self, enabled: bool) -> Self {
        self.agent.has_reflection = enabled;
        self
    }

    pub fn build(self) -> Result<Agent> {
        self.agent.validate()?;
        tracing::debug!(
            agent = %self.agent.name,
            model = %self.agent.model,
            functions = self.agent.functions.len(),
            has_reflection = self.agent.has_reflection,
            "Agent built"
        );
        Ok(self.agent)
    }
}

/// Serializable agent definition.
///
/// Functions are referenced by name and resolved against a
/// [`FunctionRegistry`] when the agent is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default = "default_name")]
    pub name: String,

    /// Backing model; `None` falls back to the default model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default = "default_instructions")]
    pub instructions: String,

    /// Function names, in registration order
    #[serde(default)]
    pub functions: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<String>,

    #[serde(default = "default_true")]
    pub parallel_tool_calls: bool,

    #[serde(default)]
    pub has_reflection: bool,
}

fn default_name() -> String {
    DEFAULT_NAME.into()
}
fn default_instructions() -> String {
    DEFAULT_INSTRUCTIONS.into()
}
fn default_true() -> bool {
    true
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            model: None,
            instructions: default_instructions(),
            functions: Vec::new(),
            tool_choice: None,
            parallel_tool_calls: true,
            has_reflection: false,
        }
    }
}

impl AgentConfig {
    /// Structural check that needs no function handles.
    pub fn validate(&self) -> Result<()> {
        check_reflection(&self.name, self.has_reflection, self.functions.len())
    }

    /// Resolve function names and build a validated [`Agent`].
    pub fn build(&self, registry: &FunctionRegistry) -> Result<Agent> {
        self.validate()?;

        let functions = self
            .functions
            .iter()
            .map(|name| {
                registry
                    .get(name)
                    .cloned()
                    .ok_or_else(|| Error::UnknownFunction(name.clone()))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut builder = Agent::builder()
            .name(self.name.as_str())
            .model(self.model.as_deref().unwrap_or(DEFAULT_MODEL))
            .instructions(self.instructions.as_str())
            .functions(functions)
            .parallel_tool_calls(self.parallel_tool_calls)
            .has_reflection(self.has_reflection);
        if let Some(tool_choice) = &self.tool_choice {
            builder = builder.tool_choice(tool_choice.as_str());
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::FunctionResult;

    fn delegate_fn() -> AgentFunction {
        AgentFunction::new("transfer_to_sales", || Agent::named("Sales"))
    }

    fn finish_fn() -> AgentFunction {
        AgentFunction::new("finish", || FunctionResult::value("done").with_stop_reflection())
    }

    #[test]
    fn default_agent() {
        let agent = Agent::builder().build().unwrap();
        assert_eq!(agent.name(), "Agent");
        assert_eq!(agent.model(), "gpt-4o");
        assert_eq!(agent.instructions().resolve(), "You are a helpful agent.");
        assert!(agent.functions().is_empty());
        assert!(agent.tool_choice().is_none());
        assert!(agent.parallel_tool_calls());
        assert!(!agent.has_reflection());
        assert_eq!(agent, Agent::default());
    }

    #[test]
    fn reflective_router_with_function_builds() {
        let agent = Agent::builder()
            .name("Router")
            .has_reflection(true)
            .function(delegate_fn())
            .build()
            .unwrap();
        assert!(agent.has_reflection());
        assert_eq!(agent.function_names(), vec!["transfer_to_sales"]);
    }

    #[test]
    fn reflective_router_without_functions_is_rejected() {
        let err = Agent::builder()
            .name("Router")
            .has_reflection(true)
            .build()
            .unwrap_err();
        assert!(err.is_configuration());
        let message = err.to_string();
        assert!(message.contains("Reflection capability is enabled"));
        assert!(message.contains("no tools/functions are provided"));
    }

    #[test]
    fn reflection_requires_functions_for_every_count() {
        for count in 0..4 {
            let functions: Vec<_> = (0..count)
                .map(|i| AgentFunction::new(format!("f{i}"), || "ok"))
                .collect();

            let reflective = Agent::builder()
                .has_reflection(true)
                .functions(functions.clone())
                .build();
            assert_eq!(reflective.is_ok(), count >= 1, "reflective with {count} functions");

            let plain = Agent::builder().functions(functions).build();
            assert!(plain.is_ok(), "non-reflective with {count} functions");
        }
    }

    #[test]
    fn enabling_reflection_without_functions_fails_and_keeps_value() {
        let mut agent = Agent::named("Solo");
        let err = agent.set_has_reflection(true).unwrap_err();
        assert!(err.is_configuration());
        assert!(!agent.has_reflection());

        agent.push_function(finish_fn());
        agent.set_has_reflection(true).unwrap();
        assert!(agent.has_reflection());
        agent.validate().unwrap();
    }

    #[test]
    fn clearing_functions_of_reflective_agent_fails() {
        let mut agent = Agent::builder()
            .has_reflection(true)
            .function(finish_fn())
            .build()
            .unwrap();

        assert!(agent.clear_functions().is_err());
        assert!(agent.set_functions(Vec::new()).is_err());
        assert!(agent.remove_function("finish").is_err());
        assert_eq!(agent.functions().len(), 1);

        agent.set_functions(vec![delegate_fn()]).unwrap();
        assert_eq!(agent.function_names(), vec!["transfer_to_sales"]);
    }

    #[test]
    fn remove_function_on_plain_agent() {
        let mut agent = Agent::builder()
            .functions([finish_fn(), delegate_fn()])
            .build()
            .unwrap();
        let removed = agent.remove_function("finish").unwrap();
        assert_eq!(removed.map(|f| f.name().to_string()), Some("finish".into()));
        assert!(agent.remove_function("finish").unwrap().is_none());
        agent.clear_functions().unwrap();
        assert!(agent.functions().is_empty());
    }

    #[test]
    fn to_builder_revalidates() {
        let agent = Agent::builder()
            .has_reflection(true)
            .function(finish_fn())
            .build()
            .unwrap();

        assert!(agent.to_builder().functions(Vec::new()).build().is_err());

        let renamed = agent.to_builder().name("Reviewer").build().unwrap();
        assert_eq!(renamed.name(), "Reviewer");
        assert_eq!(renamed.functions(), agent.functions());
    }

    #[test]
    fn tool_definitions_follow_registration_order() {
        let agent = Agent::builder()
            .function(finish_fn())
            .function(delegate_fn())
            .build()
            .unwrap();
        let names: Vec<_> = agent.tool_definitions().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["finish", "transfer_to_sales"]);
        assert!(agent.function("transfer_to_sales").is_some());
        assert!(agent.function("missing").is_none());
    }

    #[test]
    fn set_model_keeps_agent_valid() {
        let mut agent = Agent::builder()
            .has_reflection(true)
            .function(finish_fn())
            .build()
            .unwrap();
        agent.set_model("gpt-4o-mini");
        assert_eq!(agent.model(), "gpt-4o-mini");
        agent.validate().unwrap();
        assert_eq!(agent.to_config().unwrap().model.as_deref(), Some("gpt-4o-mini"));
    }

    #[test]
    fn system_message_uses_current_instructions() {
        let mut agent = Agent::builder()
            .computed_instructions(|| "Dynamic rules".to_string())
            .build()
            .unwrap();
        assert_eq!(agent.system_message().content, "Dynamic rules");

        agent.set_instructions("Static rules");
        assert_eq!(agent.system_message().content, "Static rules");
    }

    #[test]
    fn config_roundtrip_reconstructs_equal_agent() {
        let registry = FunctionRegistry::new().with(delegate_fn()).with(finish_fn());
        let agent = Agent::builder()
            .name("Router")
            .model("gpt-4o-mini")
            .instructions("Route every request.")
            .function(registry.get("finish").unwrap().clone())
            .function(registry.get("transfer_to_sales").unwrap().clone())
            .tool_choice("required")
            .parallel_tool_calls(false)
            .has_reflection(true)
            .build()
            .unwrap();

        let json = serde_json::to_string(&agent.to_config().unwrap()).unwrap();
        let config: AgentConfig = serde_json::from_str(&json).unwrap();
        let rebuilt = config.build(&registry).unwrap();

        assert_eq!(rebuilt, agent);
    }

    #[test]
    fn computed_instructions_are_not_serializable() {
        let agent = Agent::builder()
            .name("Clock")
            .computed_instructions(|| "It is noon.".to_string())
            .build()
            .unwrap();
        let err = agent.to_config().unwrap_err();
        assert!(matches!(err, Error::NotSerializable(_)));
        assert!(err.to_string().contains("Clock"));
    }

    #[test]
    fn config_defaults_match_agent_defaults() {
        let config: AgentConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AgentConfig::default());
        let agent = config.build(&FunctionRegistry::new()).unwrap();
        assert_eq!(agent, Agent::default());
    }

    #[test]
    fn config_rejects_reflection_before_resolving() {
        let config = AgentConfig {
            name: "Router".into(),
            has_reflection: true,
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().is_configuration());
        assert!(config.build(&FunctionRegistry::new()).unwrap_err().is_configuration());
    }

    #[test]
    fn config_with_unregistered_function_fails() {
        let config = AgentConfig {
            functions: vec!["transfer_to_sales".into()],
            ..Default::default()
        };
        let err = config.build(&FunctionRegistry::new()).unwrap_err();
        assert!(matches!(err, Error::UnknownFunction(name) if name == "transfer_to_sales"));
    }
}
