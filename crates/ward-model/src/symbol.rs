// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Symbol definitions and symbol table.

use crate::decl::{Origin, TypeRef};
use crate::{Span, TypeId};

/// Unique identifier for a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub u32);

impl SymbolId {
    /// Placeholder for declarations not yet registered with a snapshot.
    pub const DUMMY: SymbolId = SymbolId(u32::MAX);
}

/// The kind of symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Type,
    Field,
    Method,
    Constructor,
    Event,
    /// Nested interface, delegate, enum, struct or class.
    NestedType,
    Parameter,
}

/// A declared symbol.
#[derive(Debug, Clone)]
pub struct SymbolInfo {
    pub id: SymbolId,
    pub name: String,
    pub kind: SymbolKind,
    /// Declared type of fields, events and parameters.
    pub ty: Option<TypeRef>,
    /// Type that declares this symbol. `None` for top-level types.
    pub owner: Option<TypeId>,
    /// Method or constructor a parameter belongs to.
    pub container: Option<SymbolId>,
    pub span: Span,
    pub origin: Origin,
}

impl SymbolInfo {
    pub fn is_method(&self) -> bool {
        self.kind == SymbolKind::Method
    }
}

/// Table of all symbols in a snapshot.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: Vec<SymbolInfo>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self { symbols: Vec::new() }
    }

    /// Insert a new symbol and return its ID.
    pub fn insert(
        &mut self,
        name: String,
        kind: SymbolKind,
        ty: Option<TypeRef>,
        owner: Option<TypeId>,
        container: Option<SymbolId>,
        span: Span,
        origin: Origin,
    ) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(SymbolInfo {
            id,
            name,
            kind,
            ty,
            owner,
            container,
            span,
            origin,
        });
        id
    }

    pub fn get(&self, id: SymbolId) -> Option<&SymbolInfo> {
        self.symbols.get(id.0 as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SymbolInfo> {
        self.symbols.iter()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
