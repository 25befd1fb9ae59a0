// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Builders for assembling a [`Snapshot`] by hand.

use std::collections::HashSet;

use crate::decl::{Member, Origin, TypeDecl, TypeKind, TypeRef};
use crate::error::ModelError;
use crate::model::SourceFile;
use crate::snapshot::Snapshot;
use crate::symbol::SymbolId;
use crate::{FileId, Span, TypeId};

/// Collects files and types, then hands out a bound [`Snapshot`].
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    files: Vec<SourceFile>,
    types: Vec<TypeDecl>,
    names: HashSet<String>,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(&mut self, path: impl Into<String>, text: impl Into<String>) -> FileId {
        let id = FileId(self.files.len() as u32);
        self.files.push(SourceFile::new(path, text));
        id
    }

    pub fn add_type(&mut self, ty: TypeBuilder) -> Result<TypeId, ModelError> {
        let decl = ty.finish();
        if !self.names.insert(decl.name.clone()) {
            return Err(ModelError::duplicate_type(decl.name, decl.span));
        }
        let id = TypeId(self.types.len() as u32);
        self.types.push(decl);
        Ok(id)
    }

    pub fn build(self) -> Snapshot {
        Snapshot::assemble(self.files, self.types)
    }
}

/// One type declaration under construction.
#[derive(Debug, Clone)]
pub struct TypeBuilder {
    name: String,
    kind: TypeKind,
    supertypes: Vec<TypeRef>,
    members: Vec<Member>,
    file: Option<FileId>,
    span: Span,
    is_generated: bool,
    origin: Origin,
}

impl TypeBuilder {
    fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            supertypes: Vec::new(),
            members: Vec::new(),
            file: None,
            span: Span::default(),
            is_generated: false,
            origin: Origin::Source,
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Class)
    }

    pub fn value_type(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Struct)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Interface)
    }

    /// Add a base class or implemented interface.
    pub fn implements(mut self, ty: impl Into<TypeRef>) -> Self {
        self.supertypes.push(ty.into());
        self
    }

    pub fn in_file(mut self, file: FileId) -> Self {
        self.file = Some(file);
        self
    }

    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Declared only in referenced metadata.
    pub fn metadata(mut self) -> Self {
        self.origin = Origin::Metadata;
        self
    }

    pub fn generated(mut self) -> Self {
        self.is_generated = true;
        self
    }

    pub fn member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    fn finish(self) -> TypeDecl {
        TypeDecl {
            id: TypeId(u32::MAX),
            symbol: SymbolId::DUMMY,
            name: self.name,
            kind: self.kind,
            supertypes: self.supertypes,
            members: self.members,
            file: self.file,
            span: self.span,
            is_generated: self.is_generated,
            origin: self.origin,
        }
    }
}
