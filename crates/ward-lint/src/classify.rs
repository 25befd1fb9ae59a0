// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Turns undisposed resource fields into diagnostics.

use indexmap::IndexMap;
use rayon::prelude::*;
use tracing::{debug, info_span};
use ward_model::{MemberKind, ProgramModel, SymbolId, TypeDecl};

use crate::capability::{has_capability, resolve_capability_method, CapabilityMethod};
use crate::config::LintOpts;
use crate::reachability::releases_field;
use crate::rules;
use crate::scanner::{self, InitializerShape, ResourceField};
use crate::types::{DiagnosticProperties, LeakKind, LintDiagnostic, LintReport};
use crate::util;

/// What the containing type does about disposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DisposalState {
    /// The type does not have the capability: nothing gets released.
    NotImplemented,
    /// Has the capability but no implementing method could be found.
    Unresolved,
    Abstract,
    Concrete(SymbolId),
}

fn disposal_state(model: &dyn ProgramModel, decl: &TypeDecl, opts: &LintOpts) -> DisposalState {
    let capability = &opts.disposal.capability;
    if !has_capability(model, &decl.type_ref(), capability) {
        return DisposalState::NotImplemented;
    }
    match resolve_capability_method(model, decl, capability, &opts.disposal.method) {
        Some(CapabilityMethod::Concrete(symbol)) => DisposalState::Concrete(symbol),
        Some(CapabilityMethod::Abstract(_)) => DisposalState::Abstract,
        None => {
            debug!(ty = %decl.name, "disposal method not resolved, skipping type");
            DisposalState::Unresolved
        }
    }
}

fn leak_kind(shape: InitializerShape) -> Option<LeakKind> {
    match shape {
        InitializerShape::DirectConstruction => Some(LeakKind::Created),
        InitializerShape::MethodResult => Some(LeakKind::Returned),
        InitializerShape::Other | InitializerShape::None => None,
    }
}

fn classify(
    model: &dyn ProgramModel,
    candidate: &ResourceField<'_>,
    state: DisposalState,
    opts: &LintOpts,
) -> Option<LintDiagnostic> {
    let kind = leak_kind(candidate.shape)?;
    if !rules::is_enabled(kind, opts) {
        return None;
    }
    let field = candidate.member.symbol;
    let released = match state {
        DisposalState::NotImplemented => false,
        DisposalState::Unresolved | DisposalState::Abstract => true,
        DisposalState::Concrete(dispose) => releases_field(
            model,
            candidate.owner,
            dispose,
            field,
            &opts.disposal.method,
            opts.depth,
        ),
    };
    if released {
        return None;
    }

    let name = candidate.member.name.clone();
    debug!(ty = %candidate.owner.name, field = %name, rule = kind.rule_id(), "undisposed field");
    Some(LintDiagnostic {
        rule: kind.rule_id().to_string(),
        kind,
        severity: kind.severity(),
        message: format!("Field {name} should be disposed."),
        location: util::member_location(model, candidate.owner, candidate.member),
        properties: DiagnosticProperties {
            variable_identifier: name.clone(),
        },
        field_name: name,
        field,
    })
}

/// Analyze one field. `None` when the field is not a tracked resource,
/// is released, or cannot be resolved.
pub fn analyze_field(
    model: &dyn ProgramModel,
    field: SymbolId,
    opts: &LintOpts,
) -> Option<LintDiagnostic> {
    let owner = model.type_decl(model.symbol(field)?.owner?)?;
    if !scanner::is_analyzable(model, owner) {
        return None;
    }
    let member = owner.member(field)?;
    let MemberKind::Field(decl) = &member.kind else {
        return None;
    };
    if !has_capability(model, &decl.ty, &opts.disposal.capability) {
        return None;
    }
    let candidate = ResourceField {
        owner,
        member,
        field: decl,
        shape: InitializerShape::of(decl.init.as_ref()),
    };
    if !candidate.shape.is_tracked() {
        return None;
    }
    let state = disposal_state(model, owner, opts);
    classify(model, &candidate, state, opts)
}

/// Analyze every field of one type, in declaration order. Stops between
/// fields once the pass is cancelled.
pub fn analyze_type(model: &dyn ProgramModel, decl: &TypeDecl, opts: &LintOpts) -> Vec<LintDiagnostic> {
    if !scanner::is_analyzable(model, decl) {
        return Vec::new();
    }
    let candidates: Vec<_> = scanner::resource_fields(model, decl, &opts.disposal.capability)
        .into_iter()
        .filter(|c| c.shape.is_tracked())
        .collect();
    if candidates.is_empty() {
        return Vec::new();
    }
    let state = disposal_state(model, decl, opts);
    let mut out = Vec::new();
    for candidate in &candidates {
        if opts.cancel.is_cancelled() {
            break;
        }
        out.extend(classify(model, candidate, state, opts));
    }
    out
}

/// Analyze every source type in parallel and collect a sorted report.
pub fn analyze_program(model: &dyn ProgramModel, opts: &LintOpts) -> LintReport {
    let types = model.types();
    let _span = info_span!("lint", types = types.len()).entered();

    let per_type: Vec<Vec<LintDiagnostic>> = types
        .par_iter()
        .map(|decl| {
            if opts.cancel.is_cancelled() {
                return Vec::new();
            }
            analyze_type(model, decl, opts)
        })
        .collect();

    let mut by_field = IndexMap::new();
    for diagnostic in per_type.into_iter().flatten() {
        by_field.entry(diagnostic.field).or_insert(diagnostic);
    }
    let mut diagnostics: Vec<_> = by_field.into_values().collect();
    diagnostics.sort_by(|a, b| {
        (&a.location.file, a.location.span.start, &a.field_name)
            .cmp(&(&b.location.file, b.location.span.start, &b.field_name))
    });

    let cancelled = opts.cancel.is_cancelled();
    debug!(diagnostics = diagnostics.len(), cancelled, "lint finished");
    LintReport::new(diagnostics, cancelled)
}
