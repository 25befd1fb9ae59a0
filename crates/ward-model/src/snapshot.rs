// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! In-memory program snapshot.

use std::collections::HashMap;

use tracing::debug;

use crate::binder;
use crate::decl::{Member, MemberKind, Origin, TypeDecl, TypeRef};
use crate::edit::{EditOp, StructuralEdit};
use crate::error::ModelError;
use crate::expr::Expr;
use crate::model::{ProgramModel, SourceFile};
use crate::stmt::Stmt;
use crate::symbol::{SymbolId, SymbolInfo, SymbolKind, SymbolTable};
use crate::{FileId, NodeId, TypeId};

/// A consistent, immutable-to-readers view of a program.
///
/// Readers go through [`ProgramModel`]. The only mutation is
/// [`Snapshot::apply_edit`], which replaces one type atomically and
/// re-binds names.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    types: Vec<TypeDecl>,
    by_name: HashMap<String, TypeId>,
    symbols: SymbolTable,
    resolutions: HashMap<NodeId, SymbolId>,
    files: Vec<SourceFile>,
    next_node: u32,
}

impl Snapshot {
    /// Assemble a snapshot from declarations whose names are already known
    /// to be unique.
    pub(crate) fn assemble(files: Vec<SourceFile>, decls: Vec<TypeDecl>) -> Self {
        let mut snapshot = Snapshot {
            files,
            ..Snapshot::default()
        };
        for (index, mut decl) in decls.into_iter().enumerate() {
            decl.id = TypeId(index as u32);
            decl.symbol = snapshot.symbols.insert(
                decl.name.clone(),
                SymbolKind::Type,
                Some(decl.type_ref()),
                None,
                None,
                decl.span,
                decl.origin,
            );
            snapshot.by_name.insert(decl.name.clone(), decl.id);
            snapshot.declare_members(&mut decl);
            snapshot.number_type(&mut decl);
            snapshot.types.push(decl);
        }
        snapshot.rebind();
        debug!(
            types = snapshot.types.len(),
            symbols = snapshot.symbols.len(),
            "assembled snapshot"
        );
        snapshot
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn type_named(&self, name: &str) -> Option<&TypeDecl> {
        let id = self.by_name.get(name)?;
        self.types.get(id.0 as usize)
    }

    /// First member of `ty` called `name`.
    pub fn member_named(&self, ty: &str, name: &str) -> Option<&Member> {
        self.type_named(ty)?.members.iter().find(|m| m.name == name)
    }

    /// Constructors of `ty`, in declaration order.
    pub fn constructors_of(&self, ty: &str) -> Vec<&Member> {
        self.type_named(ty)
            .map(|t| t.constructors().map(|(m, _)| m).collect())
            .unwrap_or_default()
    }

    /// Symbol of parameter `name` on a method or constructor.
    pub fn parameter(&self, method: SymbolId, name: &str) -> Option<SymbolId> {
        self.declaration_sites(method)
            .into_iter()
            .filter_map(|m| m.kind.as_method())
            .flat_map(|m| m.params.iter())
            .find(|p| p.name == name)
            .map(|p| p.symbol)
    }

    /// Apply an edit to one type. Either every operation applies or the
    /// snapshot is left untouched.
    pub fn apply_edit(&mut self, edit: &StructuralEdit) -> Result<(), ModelError> {
        let current = self
            .types
            .get(edit.ty.0 as usize)
            .ok_or_else(|| ModelError::unknown_type(edit.ty))?;
        let mut decl = current.clone();

        for op in &edit.ops {
            match op {
                EditOp::InsertMember { index, member } => {
                    if *index > decl.members.len() {
                        return Err(ModelError::insert_out_of_bounds(
                            decl.name.clone(),
                            *index,
                            decl.members.len(),
                        ));
                    }
                    decl.members.insert(*index, member.clone());
                }
                EditOp::AppendStatement { method, stmt } => {
                    let mut sites = decl
                        .members
                        .iter_mut()
                        .filter(|m| m.symbol == *method)
                        .peekable();
                    let Some(first) = sites.peek() else {
                        return Err(ModelError::unknown_method(decl.name.clone(), *method));
                    };
                    let (name, span) = (first.name.clone(), first.span);
                    let body = sites
                        .filter_map(|m| m.kind.as_method_mut())
                        .find_map(|m| m.body.as_mut())
                        .ok_or_else(|| ModelError::missing_body(name, span))?;
                    body.push(stmt.clone());
                }
            }
        }

        self.declare_members(&mut decl);
        self.number_type(&mut decl);
        debug!(ty = %decl.name, ops = edit.ops.len(), "applied structural edit");
        self.types[edit.ty.0 as usize] = decl;
        self.rebind();
        Ok(())
    }

    /// Allocate symbols for members and parameters still carrying
    /// placeholders.
    fn declare_members(&mut self, decl: &mut TypeDecl) {
        for index in 0..decl.members.len() {
            let (before, rest) = decl.members.split_at_mut(index);
            let member = &mut rest[0];
            if member.symbol == SymbolId::DUMMY {
                if let MemberKind::Constructor(_) = member.kind {
                    member.name = decl.name.clone();
                }
                let symbol = match partial_sibling(before, member) {
                    Some(shared) => shared,
                    None => self.declare_member(decl.id, decl.origin, member),
                };
                member.symbol = symbol;
            }
            let container = member.symbol;
            if let Some(method) = member.kind.as_method_mut() {
                for param in method.params.iter_mut().filter(|p| p.symbol == SymbolId::DUMMY) {
                    param.symbol = self.symbols.insert(
                        param.name.clone(),
                        SymbolKind::Parameter,
                        Some(param.ty.clone()),
                        Some(decl.id),
                        Some(container),
                        param.span,
                        decl.origin,
                    );
                }
            }
        }
    }

    fn declare_member(&mut self, owner: TypeId, origin: Origin, member: &Member) -> SymbolId {
        let (kind, ty) = match &member.kind {
            MemberKind::Field(f) => (SymbolKind::Field, Some(f.ty.clone())),
            MemberKind::Method(_) => (SymbolKind::Method, None),
            MemberKind::Constructor(_) => (SymbolKind::Constructor, None),
            MemberKind::Event(ty) => (SymbolKind::Event, Some(ty.clone())),
            MemberKind::NestedInterface
            | MemberKind::NestedDelegate
            | MemberKind::NestedEnum
            | MemberKind::NestedStruct
            | MemberKind::NestedClass => (SymbolKind::NestedType, None),
        };
        self.symbols.insert(
            member.name.clone(),
            kind,
            ty,
            Some(owner),
            None,
            member.span,
            origin,
        )
    }

    /// Hand out node ids to every expression and statement still carrying
    /// the placeholder.
    fn number_type(&mut self, decl: &mut TypeDecl) {
        for member in &mut decl.members {
            match &mut member.kind {
                MemberKind::Field(f) => {
                    if let Some(init) = &mut f.init {
                        self.number_expr(init);
                    }
                }
                MemberKind::Method(m) | MemberKind::Constructor(m) => {
                    if let Some(body) = &mut m.body {
                        self.number_block(body);
                    }
                }
                _ => {}
            }
        }
    }

    fn number_block(&mut self, stmts: &mut [Stmt]) {
        for stmt in stmts {
            if stmt.id == NodeId::DUMMY {
                stmt.id = self.fresh_node();
            }
            let (exprs, blocks) = stmt.parts_mut();
            for expr in exprs {
                self.number_expr(expr);
            }
            for block in blocks {
                self.number_block(block);
            }
        }
    }

    fn number_expr(&mut self, expr: &mut Expr) {
        if expr.id == NodeId::DUMMY {
            expr.id = self.fresh_node();
        }
        for child in expr.children_mut() {
            self.number_expr(child);
        }
    }

    fn fresh_node(&mut self) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        id
    }

    fn rebind(&mut self) {
        self.resolutions = binder::bind(&self.types, &self.by_name, &self.symbols);
    }
}

/// An earlier partial declaration of the same method, matched by name and
/// parameter types.
fn partial_sibling(before: &[Member], member: &Member) -> Option<SymbolId> {
    let MemberKind::Method(method) = &member.kind else {
        return None;
    };
    if !method.is_partial {
        return None;
    }
    let signature: Vec<&TypeRef> = method.params.iter().map(|p| &p.ty).collect();
    before
        .iter()
        .filter(|m| m.name == member.name && m.symbol != SymbolId::DUMMY)
        .find(|m| match &m.kind {
            MemberKind::Method(other) => {
                other.is_partial
                    && other.params.iter().map(|p| &p.ty).eq(signature.iter().copied())
            }
            _ => false,
        })
        .map(|m| m.symbol)
}

impl ProgramModel for Snapshot {
    fn types(&self) -> &[TypeDecl] {
        &self.types
    }

    fn type_decl(&self, id: TypeId) -> Option<&TypeDecl> {
        self.types.get(id.0 as usize)
    }

    fn lookup_type(&self, ty: &TypeRef) -> Option<&TypeDecl> {
        self.type_named(ty.as_str())
    }

    fn symbol(&self, id: SymbolId) -> Option<&SymbolInfo> {
        self.symbols.get(id)
    }

    fn resolve_symbol(&self, node: NodeId) -> Option<SymbolId> {
        self.resolutions.get(&node).copied()
    }

    fn file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.0 as usize)
    }
}
