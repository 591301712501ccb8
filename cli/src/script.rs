//! Call scripts: an ordered list of calls, each made by a named caller.
//!
//! ```toml
//! [[call]]
//! caller = "0x0000000000000000000000000000000000000001"
//! op = "transfer"
//! to = "0x0000000000000000000000000000000000000002"
//! amount = "100"
//!
//! [[call]]
//! caller = "0x0000000000000000000000000000000000000002"
//! op = "claim"
//! at = 3600
//! ```

use crate::report::{Report, StepOutcome};
use fungible_token::{Call, TokenLedger};
use fungible_types::{AccountId, Clock, Timestamp};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("failed to read script {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid script: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Script {
    #[serde(rename = "call", default)]
    pub steps: Vec<ScriptStep>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ScriptStep {
    pub caller: AccountId,

    /// Seconds since the epoch the call is made at; the host clock if absent.
    #[serde(default)]
    pub at: Option<u64>,

    #[serde(flatten)]
    pub call: Call,
}

impl Script {
    pub fn from_toml_str(s: &str) -> Result<Self, ScriptError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ScriptError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Run every step of `script` against `ledger` in order.
///
/// A rejected call is recorded in the report and the replay moves on.
pub fn replay(ledger: &mut TokenLedger, script: &Script, clock: &dyn Clock) -> Report {
    let mut outcomes = Vec::with_capacity(script.len());
    for (index, step) in script.steps.iter().enumerate() {
        let now = step.at.map(Timestamp::new).unwrap_or_else(|| clock.now());
        let op = step.call.name();
        let outcome = match ledger.execute(step.caller, step.call.clone(), now) {
            Ok(receipt) => {
                info!(index, op, caller = %step.caller, events = receipt.events.len(), "call accepted");
                StepOutcome::accepted(index, step.caller, op, receipt.events.len())
            }
            Err(e) => {
                warn!(index, op, caller = %step.caller, error = %e, "call rejected");
                StepOutcome::rejected(index, step.caller, op, &e)
            }
        };
        outcomes.push(outcome);
    }
    Report::new(ledger, outcomes)
}
