// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Disposal lint: fields holding a disposable resource that the containing
//! type never releases.

pub mod capability;
pub mod classify;
pub mod config;
pub mod reachability;
mod rules;
pub mod scanner;
pub mod types;
mod util;

pub use classify::{analyze_field, analyze_program, analyze_type};
pub use config::{ConfigError, DisposalConfig, LintOpts, ReachabilityDepth};
pub use types::{LeakKind, LintDiagnostic, LintLocation, LintReport, Severity};

use ward_model::ProgramModel;

/// Run the disposal rules over every source type of a program.
pub fn lint(model: &dyn ProgramModel, opts: &LintOpts) -> LintReport {
    analyze_program(model, opts)
}

/// Serialize a lint report to JSON.
pub fn lint_json(report: &LintReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}
