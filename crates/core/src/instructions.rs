//! Agent instructions: literal text or a deferred producer.

use std::fmt;
use std::sync::Arc;

/// A zero-argument producer of instruction text.
pub type InstructionsFn = Arc<dyn Fn() -> String + Send + Sync>;

/// The system instructions of an agent.
///
/// `Computed` instructions are evaluated by the executor each time it needs
/// them, so they can reflect state that changes between rounds.
#[derive(Clone)]
pub enum Instructions {
    Static(String),
    Computed(InstructionsFn),
}

impl Instructions {
    pub fn computed<F>(producer: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self::Computed(Arc::new(producer))
    }

    /// Evaluate to the text handed to the model.
    pub fn resolve(&self) -> String {
        match self {
            Self::Static(text) => text.clone(),
            Self::Computed(producer) => producer(),
        }
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, Self::Computed(_))
    }

    /// The literal text, if these instructions are static.
    pub fn as_static(&self) -> Option<&str> {
        match self {
            Self::Static(text) => Some(text),
            Self::Computed(_) => None,
        }
    }
}

impl Default for Instructions {
    fn default() -> Self {
        Self::Static(crate::agent::DEFAULT_INSTRUCTIONS.to_string())
    }
}

impl From<&str> for Instructions {
    fn from(text: &str) -> Self {
        Self::Static(text.to_string())
    }
}

impl From<String> for Instructions {
    fn from(text: String) -> Self {
        Self::Static(text)
    }
}

/// Static text compares by value, producers by identity.
impl PartialEq for Instructions {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Static(a), Self::Static(b)) => a == b,
            (Self::Computed(a), Self::Computed(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Instructions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(text) => f.debug_tuple("Static").field(text).finish(),
            Self::Computed(_) => f.write_str("Computed(<fn>)"),
        }
    }
}
