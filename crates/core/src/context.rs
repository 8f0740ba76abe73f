//! Shared key-value state threaded across rounds and agents.

use std::collections::HashMap;

/// Context variables carried by results and responses.
///
/// Keys are unordered. How successive updates are merged is decided by the
/// orchestrator, not by this crate.
pub type ContextVariables = HashMap<String, serde_json::Value>;
