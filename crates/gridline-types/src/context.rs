use crate::TerminalCapabilities;
use serde_json::Value;
use std::collections::HashMap;

/// Ambient data available to every widget during one render pass.
///
/// Immutable snapshot: the environment is captured once per invocation so
/// detection and placeholder substitution stay pure functions of it.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Session payload as a JSON value, the root of template paths.
    pub input: Value,

    pub caps: TerminalCapabilities,

    /// Process environment captured at render start.
    pub env: HashMap<String, String>,
}

impl RenderContext {
    pub fn new(input: Value, caps: TerminalCapabilities, env: HashMap<String, String>) -> Self {
        Self { input, caps, env }
    }

    /// Context with an empty payload and environment, for tests and
    /// degenerate renders.
    pub fn empty() -> Self {
        Self {
            input: Value::Null,
            caps: TerminalCapabilities::default(),
            env: HashMap::new(),
        }
    }
}
