//! The outcome of a full execution round.

use crate::agent::Agent;
use crate::context::ContextVariables;
use crate::message::Message;

/// Accumulated state after one round, returned to the caller or fed into
/// the next round.
///
/// Unlike [`FunctionResult`](crate::FunctionResult), `context_variables`
/// here is the full snapshot, not an increment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    /// Messages produced during the round, in order
    pub messages: Vec<Message>,

    /// The agent that holds control after the round
    pub agent: Option<Agent>,

    pub context_variables: ContextVariables,

    /// Propagated termination signal for reflection loops
    pub stop_reflection: bool,
}

impl Response {
    pub fn new(
        messages: Vec<Message>,
        agent: Option<Agent>,
        context_variables: ContextVariables,
    ) -> Self {
        Self {
            messages,
            agent,
            context_variables,
            stop_reflection: false,
        }
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Name of the agent in control, if any.
    pub fn agent_name(&self) -> Option<&str> {
        self.agent.as_ref().map(Agent::name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        let response = Response::default();
        assert!(response.messages.is_empty());
        assert!(response.agent.is_none());
        assert!(response.context_variables.is_empty());
        assert!(!response.stop_reflection);
        assert!(response.last_message().is_none());
        assert!(response.agent_name().is_none());
    }

    #[test]
    fn new_keeps_message_order() {
        let mut context = ContextVariables::new();
        context.insert("user".into(), serde_json::json!("ada"));

        let response = Response::new(
            vec![Message::user("hi"), Message::from_agent("Greeter", "hello ada")],
            Some(Agent::named("Greeter")),
            context,
        );

        assert_eq!(response.messages.len(), 2);
        assert_eq!(response.last_message().unwrap().content, "hello ada");
        assert_eq!(response.agent_name(), Some("Greeter"));
        assert_eq!(response.context_variables["user"], "ada");
        assert!(!response.stop_reflection);
    }
}
