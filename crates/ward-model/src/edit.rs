// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Structural edits handed back to the host.

use crate::decl::Member;
use crate::stmt::Stmt;
use crate::symbol::SymbolId;
use crate::TypeId;

/// An ordered list of operations against one type, applied atomically.
#[derive(Debug, Clone)]
pub struct StructuralEdit {
    pub ty: TypeId,
    pub ops: Vec<EditOp>,
}

/// A single insert/modify operation.
#[derive(Debug, Clone)]
pub enum EditOp {
    /// Insert a member so that it ends up at `index` in the member list.
    InsertMember { index: usize, member: Member },
    /// Append a statement to the end of a method or constructor body.
    AppendStatement { method: SymbolId, stmt: Stmt },
}

impl StructuralEdit {
    pub fn new(ty: TypeId) -> Self {
        Self { ty, ops: Vec::new() }
    }

    pub fn push(&mut self, op: EditOp) {
        self.ops.push(op);
    }

    pub fn extend(&mut self, other: StructuralEdit) {
        debug_assert_eq!(self.ty, other.ty);
        self.ops.extend(other.ops);
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Members this edit inserts, in operation order.
    pub fn inserted_members(&self) -> impl Iterator<Item = &Member> {
        self.ops.iter().filter_map(|op| match op {
            EditOp::InsertMember { member, .. } => Some(member),
            EditOp::AppendStatement { .. } => None,
        })
    }

    /// Statements appended to `method`, in operation order.
    pub fn appended_to(&self, method: SymbolId) -> impl Iterator<Item = &Stmt> {
        self.ops.iter().filter_map(move |op| match op {
            EditOp::AppendStatement { method: m, stmt } if *m == method => Some(stmt),
            _ => None,
        })
    }
}
