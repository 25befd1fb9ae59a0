// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Output types for the disposal lint.

use serde::Serialize;
use ward_model::{Span, SymbolId};

/// Complete lint report for a program.
#[derive(Debug, Serialize)]
pub struct LintReport {
    pub version: u32,
    pub success: bool,
    pub diagnostics: Vec<LintDiagnostic>,
    pub warning_count: usize,
    pub info_count: usize,
    /// Set when the pass was cancelled before every type was analyzed.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub cancelled: bool,
}

impl LintReport {
    pub(crate) fn new(diagnostics: Vec<LintDiagnostic>, cancelled: bool) -> Self {
        let warning_count = diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count();
        let info_count = diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Info)
            .count();
        Self {
            version: 1,
            success: warning_count == 0,
            diagnostics,
            warning_count,
            info_count,
            cancelled,
        }
    }
}

/// A single undisposed-field finding.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LintDiagnostic {
    pub rule: String,
    pub kind: LeakKind,
    pub severity: Severity,
    pub field_name: String,
    pub message: String,
    pub location: LintLocation,
    pub properties: DiagnosticProperties,
    /// Symbol of the reported field.
    #[serde(skip)]
    pub field: SymbolId,
}

/// Extra data a code fix can pick up.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticProperties {
    pub variable_identifier: String,
}

/// How the leaked resource got into the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LeakKind {
    /// Initialized with `new T(...)`; the type owns the instance.
    Created,
    /// Initialized from a call result; ownership is unclear.
    Returned,
}

impl LeakKind {
    pub fn rule_id(self) -> &'static str {
        match self {
            LeakKind::Created => "dispose/created",
            LeakKind::Returned => "dispose/returned",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            LeakKind::Created => Severity::Warning,
            LeakKind::Returned => Severity::Info,
        }
    }
}

/// Source location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintLocation {
    pub file: Option<String>,
    pub span: Span,
    pub line: u32,
    pub column: u32,
    pub source_line: String,
}

/// Severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Info,
}
