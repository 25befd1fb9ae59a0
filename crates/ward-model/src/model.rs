// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The read-only query surface a host exposes to the analyses.

use crate::decl::{Member, TypeDecl, TypeRef};
use crate::stmt::Stmt;
use crate::symbol::{SymbolId, SymbolInfo};
use crate::{FileId, LineMap, NodeId, TypeId};

/// A source file known to the host.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: String,
    pub text: String,
    pub line_map: LineMap,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let line_map = LineMap::new(&text);
        Self {
            path: path.into(),
            text,
            line_map,
        }
    }
}

/// Immutable view of a program's syntax and symbols.
///
/// Implementations must answer every query from one consistent snapshot;
/// the analyses may call them from several threads at once. Every lookup
/// returns `None` (or an empty list) when the host cannot resolve it.
pub trait ProgramModel: Sync {
    /// All declared types, source and metadata alike.
    fn types(&self) -> &[TypeDecl];

    fn type_decl(&self, id: TypeId) -> Option<&TypeDecl>;

    /// Find a type by structural name.
    fn lookup_type(&self, ty: &TypeRef) -> Option<&TypeDecl>;

    fn symbol(&self, id: SymbolId) -> Option<&SymbolInfo>;

    /// The symbol an expression or statement node binds to.
    fn resolve_symbol(&self, node: NodeId) -> Option<SymbolId>;

    fn file(&self, id: FileId) -> Option<&SourceFile>;

    /// Declared type of a field, event or parameter.
    fn type_of(&self, symbol: SymbolId) -> Option<&TypeRef> {
        self.symbol(symbol)?.ty.as_ref()
    }

    /// Members of a type in declaration order, every kind included.
    fn members_of(&self, id: TypeId) -> &[Member] {
        self.type_decl(id)
            .map(|t| t.members.as_slice())
            .unwrap_or(&[])
    }

    /// Contracts a type declares directly (base class and interfaces).
    fn capabilities_of(&self, ty: &TypeRef) -> Option<&[TypeRef]> {
        self.lookup_type(ty).map(|t| t.supertypes.as_slice())
    }

    /// Body of one method or constructor declaration, `None` when it has
    /// none (abstract, extern, defining partial part).
    fn body_of<'a>(&'a self, member: &'a Member) -> Option<&'a [Stmt]> {
        member.kind.as_method()?.body.as_deref()
    }

    /// Every syntactic declaration of a member symbol, in source order.
    fn declaration_sites(&self, symbol: SymbolId) -> Vec<&Member> {
        let Some(owner) = self.symbol(symbol).and_then(|s| s.owner) else {
            return Vec::new();
        };
        self.members_of(owner)
            .iter()
            .filter(|m| m.symbol == symbol)
            .collect()
    }
}
