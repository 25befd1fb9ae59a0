// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Name binding: maps identifier and member-access nodes to symbols.
//!
//! Lookup order inside a body is the lexical scope chain (parameters, then
//! locals in nested blocks), then members of the enclosing type and its
//! supertypes. Locals shadow members but have no symbol of their own, so a
//! name bound to a local resolves to nothing.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::decl::{Member, MemberKind, MethodDecl, TypeDecl, TypeRef};
use crate::expr::{Expr, ExprKind};
use crate::stmt::{Stmt, StmtKind};
use crate::symbol::{SymbolId, SymbolTable};
use crate::{NodeId, TypeId};

/// Resolve every node of every source type.
pub(crate) fn bind(
    types: &[TypeDecl],
    by_name: &HashMap<String, TypeId>,
    symbols: &SymbolTable,
) -> HashMap<NodeId, SymbolId> {
    let mut binder = Binder {
        types,
        by_name,
        symbols,
        resolutions: HashMap::new(),
    };
    for decl in types {
        binder.bind_type(decl);
    }
    binder.resolutions
}

/// Lexical scopes of one body. `None` marks a local.
#[derive(Default)]
struct Scopes {
    frames: Vec<HashMap<String, Option<SymbolId>>>,
}

impl Scopes {
    fn push(&mut self) {
        self.frames.push(HashMap::new());
    }

    fn pop(&mut self) {
        self.frames.pop();
    }

    fn define(&mut self, name: &str, symbol: Option<SymbolId>) {
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(name.to_string(), symbol);
        }
    }

    /// `Some(binding)` if the name is lexically bound.
    fn lookup(&self, name: &str) -> Option<Option<SymbolId>> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(name).copied())
    }
}

struct Binder<'a> {
    types: &'a [TypeDecl],
    by_name: &'a HashMap<String, TypeId>,
    symbols: &'a SymbolTable,
    resolutions: HashMap<NodeId, SymbolId>,
}

impl<'a> Binder<'a> {
    fn bind_type(&mut self, decl: &'a TypeDecl) {
        for member in &decl.members {
            match &member.kind {
                MemberKind::Field(field) => {
                    if let Some(init) = &field.init {
                        let mut scopes = Scopes::default();
                        self.bind_expr(decl, &mut scopes, init);
                    }
                }
                MemberKind::Method(method) | MemberKind::Constructor(method) => {
                    self.bind_method(decl, method);
                }
                _ => {}
            }
        }
    }

    fn bind_method(&mut self, decl: &'a TypeDecl, method: &'a MethodDecl) {
        let Some(body) = &method.body else { return };
        let mut scopes = Scopes::default();
        scopes.push();
        for param in &method.params {
            let symbol = (param.symbol != SymbolId::DUMMY).then_some(param.symbol);
            scopes.define(&param.name, symbol);
        }
        self.bind_block(decl, &mut scopes, body);
        scopes.pop();
    }

    fn bind_block(&mut self, decl: &'a TypeDecl, scopes: &mut Scopes, stmts: &'a [Stmt]) {
        scopes.push();
        for stmt in stmts {
            self.bind_stmt(decl, scopes, stmt);
        }
        scopes.pop();
    }

    fn bind_stmt(&mut self, decl: &'a TypeDecl, scopes: &mut Scopes, stmt: &'a Stmt) {
        for expr in stmt.exprs() {
            self.bind_expr(decl, scopes, expr);
        }
        // The statement itself resolves to what its assignment target or
        // expression resolves to.
        let head = match &stmt.kind {
            StmtKind::Expr(e) => Some(e),
            StmtKind::Assign { target, .. } => Some(target),
            _ => None,
        };
        if let Some(symbol) = head.and_then(|e| self.resolutions.get(&e.id).copied()) {
            self.record(stmt.id, symbol);
        }
        if let StmtKind::Local { name, .. } = &stmt.kind {
            scopes.define(name, None);
        }
        for block in stmt.blocks() {
            self.bind_block(decl, scopes, block);
        }
    }

    fn bind_expr(&mut self, decl: &'a TypeDecl, scopes: &mut Scopes, expr: &'a Expr) {
        for child in expr.children() {
            self.bind_expr(decl, scopes, child);
        }
        let resolved = match &expr.kind {
            ExprKind::Ident(name) => match scopes.lookup(name) {
                Some(binding) => binding,
                None => self.find_member(decl, name, None),
            },
            ExprKind::Member { object, name } => {
                let owner = self.static_type(decl, object);
                owner.and_then(|owner| self.find_member(owner, name, None))
            }
            ExprKind::Call { callee, args, .. } => self.resolve_call(decl, scopes, callee, args.len()),
            _ => None,
        };
        if let Some(symbol) = resolved {
            self.record(expr.id, symbol);
        }
    }

    /// Re-resolve the callee with arity so overloads pick the right method.
    fn resolve_call(
        &mut self,
        decl: &'a TypeDecl,
        scopes: &Scopes,
        callee: &'a Expr,
        arity: usize,
    ) -> Option<SymbolId> {
        let symbol = match &callee.kind {
            ExprKind::Ident(name) if scopes.lookup(name).is_none() => {
                self.find_member(decl, name, Some(arity))
            }
            ExprKind::Member { object, name } => {
                let owner = self.static_type(decl, object)?;
                self.find_member(owner, name, Some(arity))
            }
            _ => None,
        }?;
        self.record(callee.id, symbol);
        Some(symbol)
    }

    /// The declared type an expression evaluates to, as far as members go.
    fn static_type(&self, decl: &'a TypeDecl, expr: &Expr) -> Option<&'a TypeDecl> {
        match &expr.kind {
            ExprKind::This => Some(decl),
            ExprKind::New { ty, .. } => self.lookup(ty),
            ExprKind::Ident(_) | ExprKind::Member { .. } => {
                let symbol = self.resolutions.get(&expr.id)?;
                let ty = self.symbols.get(*symbol)?.ty.as_ref()?;
                self.lookup(ty)
            }
            _ => None,
        }
    }

    fn lookup(&self, ty: &TypeRef) -> Option<&'a TypeDecl> {
        let id = self.by_name.get(ty.as_str())?;
        self.types.get(id.0 as usize)
    }

    /// Find a named member on `decl` or its supertypes, nearest first.
    /// Constructors are never found by name.
    fn find_member(&self, decl: &'a TypeDecl, name: &str, arity: Option<usize>) -> Option<SymbolId> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([decl]);
        while let Some(current) = queue.pop_front() {
            if !visited.insert(current.id) {
                continue;
            }
            let candidates: Vec<&Member> = current
                .members
                .iter()
                .filter(|m| m.name == name && !matches!(m.kind, MemberKind::Constructor(_)))
                .collect();
            let by_arity = arity.and_then(|n| {
                candidates.iter().find(|m| {
                    m.kind
                        .as_method()
                        .is_some_and(|method| method.params.len() == n)
                })
            });
            if let Some(member) = by_arity.or(candidates.first()) {
                if member.symbol != SymbolId::DUMMY {
                    return Some(member.symbol);
                }
            }
            queue.extend(current.supertypes.iter().filter_map(|s| self.lookup(s)));
        }
        None
    }

    fn record(&mut self, node: NodeId, symbol: SymbolId) {
        if node != NodeId::DUMMY {
            self.resolutions.insert(node, symbol);
        }
    }
}
