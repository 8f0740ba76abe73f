//! # Handoff Core
//!
//! The data model of a multi-agent runtime: agents, the results their
//! functions return, and the response of an execution round.
//! This crate holds no orchestration logic. It defines the values an
//! orchestrator reads and the one structural rule every agent obeys: a
//! reflective agent must have at least one function.
//!
//! ## Shapes
//!
//! - [`Agent`] — validated configuration of an actor
//! - [`AgentFunction`] — a capability returning a [`FunctionOutput`]
//! - [`FunctionResult`] — the normalised result of one invocation
//! - [`Response`] — messages, active agent and context after a round

pub mod error;
pub mod message;
pub mod context;
pub mod instructions;
pub mod function;
pub mod agent;
pub mod result;
pub mod response;

// Re-export key types at crate root for ergonomics
pub use error::{Error, Result};
pub use message::{Message, MessageToolCall, Role};
pub use context::ContextVariables;
pub use instructions::Instructions;
pub use function::{AgentFunction, FunctionDefinition, FunctionOutput, FunctionRegistry};
pub use agent::{Agent, AgentBuilder, AgentConfig};
pub use result::FunctionResult;
pub use response::Response;
