// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Introduce a field from a constructor parameter.
//!
//! Two phases:
//! 1. Plan: pick (or reuse) a field and the constructors that need an
//!    assignment, reading the model only.
//! 2. Apply: turn the plan into one structural edit for the host.
//!
//! New fields are inserted as the first member of the type; assignments
//! go at the end of each constructor body.

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use tracing::debug;
use ward_model::expr::Expr;
use ward_model::stmt::Stmt;
use ward_model::{
    EditOp, Member, MemberKind, ProgramModel, StructuralEdit, SymbolId, SymbolKind, TypeDecl,
    TypeId, TypeRef,
};

use crate::config::SynthesisConfig;
use crate::naming::{default_field_name, member_names, resolve_unique_name};
use crate::unbacked::{assigns_field, is_backed};

// ── Plan ────────────────────────────────────────────────────────────────

/// Where the field of a plan comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOrigin {
    /// A field of the right name and type already exists.
    Reused,
    /// The plan declares a new field.
    New,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedField {
    pub name: String,
    pub ty: TypeRef,
    pub origin: FieldOrigin,
    pub readonly: bool,
}

/// `field = parameter;` at the end of one constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub constructor: SymbolId,
    pub parameter: String,
}

/// Everything needed to back one constructor parameter with a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisPlan {
    pub ty: TypeId,
    pub field: PlannedField,
    pub assignments: Vec<Assignment>,
}

impl SynthesisPlan {
    /// Nothing to insert and nothing to assign.
    pub fn is_noop(&self) -> bool {
        self.field.origin == FieldOrigin::Reused && self.assignments.is_empty()
    }
}

/// Plan a field for one constructor parameter. `None` when the symbol is
/// not a parameter of a source constructor, or when that constructor
/// already stores it in a field.
pub fn plan_field_synthesis(
    model: &dyn ProgramModel,
    parameter: SymbolId,
    config: &SynthesisConfig,
) -> Option<SynthesisPlan> {
    let owner = model.type_decl(model.symbol(parameter)?.owner?)?;
    TypePlanner::new(model, owner, config).plan(parameter)
}

/// Plans several parameters of one type in sequence. Later plans see the
/// fields and assignments earlier plans introduced.
pub struct TypePlanner<'a> {
    model: &'a dyn ProgramModel,
    decl: &'a TypeDecl,
    config: &'a SynthesisConfig,
    /// Names taken by existing members and by fields planned so far.
    names: IndexSet<String>,
    /// Fields planned so far, keyed by parameter name and type.
    planned: IndexMap<(String, TypeRef), String>,
    /// Constructor/field pairs already given an assignment.
    assigned: HashSet<(SymbolId, String)>,
}

impl<'a> TypePlanner<'a> {
    pub fn new(model: &'a dyn ProgramModel, decl: &'a TypeDecl, config: &'a SynthesisConfig) -> Self {
        Self {
            model,
            decl,
            config,
            names: member_names(decl),
            planned: IndexMap::new(),
            assigned: HashSet::new(),
        }
    }

    pub fn plan(&mut self, parameter: SymbolId) -> Option<SynthesisPlan> {
        let info = self.model.symbol(parameter)?;
        if info.kind != SymbolKind::Parameter || info.owner != Some(self.decl.id) {
            return None;
        }
        let ctor_symbol = info.container?;
        let ctor = self.model.symbol(ctor_symbol)?;
        if ctor.kind != SymbolKind::Constructor {
            debug!(parameter = %info.name, "not a constructor parameter");
            return None;
        }
        let ctor_member = self.decl.members.iter().find(|m| m.symbol == ctor_symbol)?;
        if is_backed(self.model, self.decl, ctor_member, parameter) {
            debug!(parameter = %info.name, "parameter already backed by a field");
            return None;
        }
        let param_name = info.name.clone();
        let param_ty = info.ty.clone()?;
        let default_name = default_field_name(&param_name, &self.config.field_prefix);

        let field = match self.find_reusable(&param_name, &default_name, &param_ty) {
            Some(field) => field,
            None => {
                let name = resolve_unique_name(&default_name, &self.names);
                self.names.insert(name.clone());
                self.planned
                    .insert((param_name.clone(), param_ty.clone()), name.clone());
                PlannedField {
                    name,
                    ty: param_ty.clone(),
                    origin: FieldOrigin::New,
                    readonly: self.config.readonly,
                }
            }
        };

        let existing = self.existing_field(&field.name);
        let owner = self.decl;
        let mut assignments = Vec::new();
        for (member, decl) in owner.constructors() {
            if decl.body.is_none() {
                continue;
            }
            let takes_param = decl
                .params
                .iter()
                .any(|p| p.name == param_name && p.ty == param_ty);
            if !takes_param {
                continue;
            }
            if existing.is_some_and(|f| assigns_field(self.model, member, f)) {
                continue;
            }
            if !self.assigned.insert((member.symbol, field.name.clone())) {
                continue;
            }
            assignments.push(Assignment {
                constructor: member.symbol,
                parameter: param_name.clone(),
            });
        }

        debug!(
            ty = %self.decl.name,
            field = %field.name,
            origin = ?field.origin,
            assignments = assignments.len(),
            "planned field synthesis"
        );
        Some(SynthesisPlan {
            ty: self.decl.id,
            field,
            assignments,
        })
    }

    /// An existing field named after the parameter (or the default field
    /// name) with exactly the parameter's type, or a field planned earlier
    /// for the same parameter name and type.
    fn find_reusable(&self, param: &str, default_name: &str, ty: &TypeRef) -> Option<PlannedField> {
        let existing = self.decl.fields().find(|(member, field)| {
            (member.name == param || member.name == default_name) && field.ty == *ty
        });
        if let Some((member, field)) = existing {
            return Some(PlannedField {
                name: member.name.clone(),
                ty: field.ty.clone(),
                origin: FieldOrigin::Reused,
                readonly: field.is_readonly,
            });
        }
        let name = self.planned.get(&(param.to_string(), ty.clone()))?;
        Some(PlannedField {
            name: name.clone(),
            ty: ty.clone(),
            origin: FieldOrigin::Reused,
            readonly: self.config.readonly,
        })
    }

    fn existing_field(&self, name: &str) -> Option<SymbolId> {
        self.decl
            .members
            .iter()
            .find(|m| m.name == name && matches!(m.kind, MemberKind::Field(_)))
            .map(|m| m.symbol)
    }
}

// ── Apply ───────────────────────────────────────────────────────────────

/// Turn a plan into edits: the field declaration first (if new), then one
/// appended assignment per constructor.
pub fn apply_synthesis_plan(plan: &SynthesisPlan) -> StructuralEdit {
    let mut edit = StructuralEdit::new(plan.ty);
    if plan.field.origin == FieldOrigin::New {
        let mut member = Member::field(plan.field.name.clone(), plan.field.ty.clone(), None);
        if plan.field.readonly {
            member = member.readonly();
        }
        edit.push(EditOp::InsertMember { index: 0, member });
    }
    for assignment in &plan.assignments {
        // Without a prefix the field may share the parameter's name.
        let target = if plan.field.name == assignment.parameter {
            Expr::this_member(plan.field.name.clone())
        } else {
            Expr::ident(plan.field.name.clone())
        };
        edit.push(EditOp::AppendStatement {
            method: assignment.constructor,
            stmt: Stmt::assign(target, Expr::ident(assignment.parameter.clone())),
        });
    }
    edit
}
