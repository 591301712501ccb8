//! Library half of the `fungible` tool: call scripts and replay reports.

pub mod report;
pub mod script;

pub use report::{Report, StepOutcome};
pub use script::{replay, Script, ScriptError, ScriptStep};
