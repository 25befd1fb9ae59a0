// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Program model consumed by the ward analyses.
//!
//! The analyses never parse anything. A host hands them a read-only view of
//! its syntax trees and symbol graph through [`ProgramModel`]. [`Snapshot`]
//! is the in-memory implementation used by tests and by hosts that build
//! their model through [`SnapshotBuilder`].

pub mod span;
pub mod expr;
pub mod stmt;
pub mod decl;
pub mod symbol;
pub mod model;
pub mod snapshot;
pub mod builder;
pub mod edit;
pub mod cancel;
mod binder;
mod error;

pub use span::{Span, LineMap};
pub use decl::{FieldDecl, Member, MemberKind, MethodDecl, Origin, Param, TypeDecl, TypeKind, TypeRef};
pub use symbol::{SymbolId, SymbolInfo, SymbolKind, SymbolTable};
pub use model::{ProgramModel, SourceFile};
pub use snapshot::Snapshot;
pub use builder::{SnapshotBuilder, TypeBuilder};
pub use edit::{EditOp, StructuralEdit};
pub use cancel::CancellationFlag;
pub use error::{ModelError, ModelErrorKind};

/// Unique identifier for syntax nodes.
///
/// The semantic model maps node ids to the symbols they resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Placeholder for nodes built outside a snapshot. Real ids are handed
    /// out when the node enters a [`Snapshot`].
    pub const DUMMY: NodeId = NodeId(u32::MAX);
}

/// Index of a declared type in its snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TypeId(pub u32);

impl std::fmt::Display for TypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Index of a source file in its snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FileId(pub u32);
