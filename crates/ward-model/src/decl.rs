// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Type and member declarations.

use crate::expr::Expr;
use crate::stmt::Stmt;
use crate::symbol::SymbolId;
use crate::{FileId, Span, TypeId};

/// A reference to a type by its fully qualified name.
///
/// Type identity is structural: two references denote the same type when
/// their names are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TypeRef {
    pub name: String,
}

impl TypeRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl From<&str> for TypeRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TypeRef {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// What kind of type a declaration introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
}

/// Where a declaration comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Origin {
    /// Declared in analyzable source.
    #[default]
    Source,
    /// Known only through referenced metadata; no syntax is available.
    Metadata,
}

/// A declared type with its members.
#[derive(Debug, Clone)]
pub struct TypeDecl {
    pub id: TypeId,
    pub symbol: SymbolId,
    pub name: String,
    pub kind: TypeKind,
    /// Base class and implemented interfaces, as declared.
    pub supertypes: Vec<TypeRef>,
    /// Members in declaration order. Partial declarations of one method
    /// appear as several members sharing a symbol.
    pub members: Vec<Member>,
    pub file: Option<FileId>,
    pub span: Span,
    /// Marked as tool-generated by the host.
    pub is_generated: bool,
    pub origin: Origin,
}

impl TypeDecl {
    pub fn type_ref(&self) -> TypeRef {
        TypeRef::new(self.name.clone())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&Member, &FieldDecl)> {
        self.members.iter().filter_map(|m| match &m.kind {
            MemberKind::Field(f) => Some((m, f)),
            _ => None,
        })
    }

    pub fn constructors(&self) -> impl Iterator<Item = (&Member, &MethodDecl)> {
        self.members.iter().filter_map(|m| match &m.kind {
            MemberKind::Constructor(c) => Some((m, c)),
            _ => None,
        })
    }

    pub fn member(&self, symbol: SymbolId) -> Option<&Member> {
        self.members.iter().find(|m| m.symbol == symbol)
    }
}

/// A member of a type.
#[derive(Debug, Clone)]
pub struct Member {
    pub symbol: SymbolId,
    pub name: String,
    pub span: Span,
    pub kind: MemberKind,
}

/// The kind of member.
#[derive(Debug, Clone)]
pub enum MemberKind {
    Field(FieldDecl),
    Method(MethodDecl),
    /// Instance constructor. Its name is the name of the declaring type.
    Constructor(MethodDecl),
    /// Event of the given delegate type
    Event(TypeRef),
    NestedInterface,
    NestedDelegate,
    NestedEnum,
    NestedStruct,
    NestedClass,
}

impl MemberKind {
    pub fn label(&self) -> &'static str {
        match self {
            MemberKind::Field(_) => "field",
            MemberKind::Method(_) => "method",
            MemberKind::Constructor(_) => "constructor",
            MemberKind::Event(_) => "event",
            MemberKind::NestedInterface => "interface",
            MemberKind::NestedDelegate => "delegate",
            MemberKind::NestedEnum => "enum",
            MemberKind::NestedStruct => "struct",
            MemberKind::NestedClass => "class",
        }
    }

    pub fn as_field(&self) -> Option<&FieldDecl> {
        match self {
            MemberKind::Field(f) => Some(f),
            _ => None,
        }
    }

    /// Methods and constructors.
    pub fn as_method(&self) -> Option<&MethodDecl> {
        match self {
            MemberKind::Method(m) | MemberKind::Constructor(m) => Some(m),
            _ => None,
        }
    }

    pub(crate) fn as_method_mut(&mut self) -> Option<&mut MethodDecl> {
        match self {
            MemberKind::Method(m) | MemberKind::Constructor(m) => Some(m),
            _ => None,
        }
    }
}

/// A field declaration. One member per declarator.
#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub ty: TypeRef,
    pub init: Option<Expr>,
    pub is_readonly: bool,
    pub is_static: bool,
}

/// A method or constructor declaration.
#[derive(Debug, Clone)]
pub struct MethodDecl {
    pub params: Vec<Param>,
    /// `None` for abstract, extern, or body-less partial declarations.
    pub body: Option<Vec<Stmt>>,
    pub is_abstract: bool,
    pub is_static: bool,
    pub is_partial: bool,
    /// Set for explicit interface implementations (`void IFoo.Bar()`).
    pub explicit_interface: Option<TypeRef>,
}

/// A method or constructor parameter.
#[derive(Debug, Clone)]
pub struct Param {
    pub symbol: SymbolId,
    pub name: String,
    pub ty: TypeRef,
    pub span: Span,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        Self {
            symbol: SymbolId::DUMMY,
            name: name.into(),
            ty: ty.into(),
            span: Span::default(),
        }
    }
}

impl Member {
    fn new(name: impl Into<String>, kind: MemberKind) -> Self {
        Self {
            symbol: SymbolId::DUMMY,
            name: name.into(),
            span: Span::default(),
            kind,
        }
    }

    pub fn field(name: impl Into<String>, ty: impl Into<TypeRef>, init: Option<Expr>) -> Self {
        Self::new(
            name,
            MemberKind::Field(FieldDecl {
                ty: ty.into(),
                init,
                is_readonly: false,
                is_static: false,
            }),
        )
    }

    pub fn method(name: impl Into<String>, params: Vec<Param>, body: Vec<Stmt>) -> Self {
        Self::new(
            name,
            MemberKind::Method(MethodDecl {
                params,
                body: Some(body),
                is_abstract: false,
                is_static: false,
                is_partial: false,
                explicit_interface: None,
            }),
        )
    }

    /// An abstract method: no body anywhere.
    pub fn abstract_method(name: impl Into<String>, params: Vec<Param>) -> Self {
        Self::new(
            name,
            MemberKind::Method(MethodDecl {
                params,
                body: None,
                is_abstract: true,
                is_static: false,
                is_partial: false,
                explicit_interface: None,
            }),
        )
    }

    /// A constructor. The builder names it after the declaring type.
    pub fn constructor(params: Vec<Param>, body: Vec<Stmt>) -> Self {
        Self::new(
            "",
            MemberKind::Constructor(MethodDecl {
                params,
                body: Some(body),
                is_abstract: false,
                is_static: false,
                is_partial: false,
                explicit_interface: None,
            }),
        )
    }

    pub fn event(name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        Self::new(name, MemberKind::Event(ty.into()))
    }

    pub fn nested(name: impl Into<String>, kind: MemberKind) -> Self {
        Self::new(name, kind)
    }

    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn readonly(mut self) -> Self {
        if let MemberKind::Field(f) = &mut self.kind {
            f.is_readonly = true;
        }
        self
    }

    pub fn with_static(mut self) -> Self {
        match &mut self.kind {
            MemberKind::Field(f) => f.is_static = true,
            MemberKind::Method(m) => m.is_static = true,
            _ => {}
        }
        self
    }

    /// Mark a method as one part of a partial declaration. Parts with the
    /// same name and parameter types share one symbol.
    pub fn partial(mut self) -> Self {
        if let Some(m) = self.kind.as_method_mut() {
            m.is_partial = true;
        }
        self
    }

    /// Drop the body of a partial method part (the defining declaration).
    pub fn without_body(mut self) -> Self {
        if let Some(m) = self.kind.as_method_mut() {
            m.body = None;
        }
        self
    }

    pub fn explicit_impl(mut self, interface: impl Into<TypeRef>) -> Self {
        if let Some(m) = self.kind.as_method_mut() {
            m.explicit_interface = Some(interface.into());
        }
        self
    }
}
