//! Rewrite options.
//!
//! The defaults describe the canonical host contract: a single
//! `env.memory` import with one initial page and no maximum, and no
//! module-owned memories.

use serde::{Deserialize, Serialize};

use crate::Limits;

/// What to do when the memory section declares local memories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocalMemoryPolicy {
    /// Fail with [`crate::PrepareError::UnexpectedLocalMemory`].
    #[default]
    Reject,
    /// Drop the declarations and continue with the imported memory.
    Discard,
}

/// Options controlling a rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepareOptions {
    /// Module name of the injected memory import.
    pub import_module: String,
    /// Field name of the injected memory import.
    pub import_field: String,
    /// Limits of the injected memory import.
    pub memory: Limits,
    pub local_memory: LocalMemoryPolicy,
    /// Run `wasmparser` validation over the rewritten module.
    pub validate_output: bool,
}

impl Default for PrepareOptions {
    fn default() -> Self {
        Self {
            import_module: "env".to_string(),
            import_field: "memory".to_string(),
            memory: Limits::default(),
            local_memory: LocalMemoryPolicy::default(),
            validate_output: false,
        }
    }
}

impl PrepareOptions {
    /// Parse options from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    pub fn with_local_memory(mut self, policy: LocalMemoryPolicy) -> Self {
        self.local_memory = policy;
        self
    }

    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate_output = validate;
        self
    }
}
