//! Breakpoint sets loaded from configuration.

use crate::breakpoint::Breakpoint;
use crate::error::{BreakpointError, BreakpointResult};
use serde::{Deserialize, Serialize};

/// One `{ key, width }` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakpointSpec {
    pub key: String,
    pub width: f64,
}

impl BreakpointSpec {
    pub fn new(key: impl Into<String>, width: f64) -> Self {
        Self {
            key: key.into(),
            width,
        }
    }
}

/// A named set of breakpoints, e.g. parsed from a JSON settings file.
///
/// ```json
/// { "breakpoints": [ { "key": "sm", "width": 576 }, { "key": "md", "width": 768 } ] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreakpointConfig {
    #[serde(default)]
    pub breakpoints: Vec<BreakpointSpec>,
}

impl BreakpointConfig {
    /// The classic five-tier grid: xl 1200, lg 992, md 768, sm 576, xs 1.
    pub fn bootstrap() -> Self {
        Self {
            breakpoints: vec![
                BreakpointSpec::new("xl", 1200.0),
                BreakpointSpec::new("lg", 992.0),
                BreakpointSpec::new("md", 768.0),
                BreakpointSpec::new("sm", 576.0),
                BreakpointSpec::new("xs", 1.0),
            ],
        }
    }

    /// Parse and shape-check a config. Duplicate keys are left to `init`.
    pub fn from_json(json: &str) -> BreakpointResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| BreakpointError::invalid(format!("malformed breakpoint config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Config files are untrusted: keys must be non-empty, widths finite.
    pub fn validate(&self) -> BreakpointResult<()> {
        for entry in &self.breakpoints {
            if entry.key.trim().is_empty() {
                return Err(BreakpointError::invalid("breakpoint key must not be empty"));
            }
            if !entry.width.is_finite() {
                return Err(BreakpointError::invalid(format!(
                    "breakpoint '{}' has a non-finite width",
                    entry.key
                )));
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> BreakpointResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| BreakpointError::invalid(format!("unserializable breakpoint config: {e}")))
    }

    pub fn into_breakpoints(self) -> Vec<Breakpoint> {
        self.breakpoints
            .into_iter()
            .map(|entry| Breakpoint::new(entry.key, entry.width))
            .collect()
    }
}
