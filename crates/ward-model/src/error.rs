// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Errors raised while building or editing a snapshot.

use crate::symbol::SymbolId;
use crate::{Span, TypeId};
use thiserror::Error;

/// A snapshot building or edit application error.
#[derive(Debug, Clone, Error)]
#[error("{kind}")]
pub struct ModelError {
    pub kind: ModelErrorKind,
    pub span: Span,
}

impl ModelError {
    pub fn duplicate_type(name: String, span: Span) -> Self {
        Self {
            kind: ModelErrorKind::DuplicateType { name },
            span,
        }
    }

    pub fn unknown_type(id: TypeId) -> Self {
        Self {
            kind: ModelErrorKind::UnknownType { id },
            span: Span::default(),
        }
    }

    pub fn unknown_method(ty: String, symbol: SymbolId) -> Self {
        Self {
            kind: ModelErrorKind::UnknownMethod { ty, symbol },
            span: Span::default(),
        }
    }

    pub fn missing_body(name: String, span: Span) -> Self {
        Self {
            kind: ModelErrorKind::MissingBody { name },
            span,
        }
    }

    pub fn insert_out_of_bounds(ty: String, index: usize, len: usize) -> Self {
        Self {
            kind: ModelErrorKind::InsertOutOfBounds { ty, index, len },
            span: Span::default(),
        }
    }
}

/// The kind of model error.
#[derive(Debug, Clone, Error)]
pub enum ModelErrorKind {
    #[error("type `{name}` is declared twice")]
    DuplicateType { name: String },

    #[error("no type with id {id} in this snapshot")]
    UnknownType { id: TypeId },

    #[error("type `{ty}` has no method or constructor with symbol {}", symbol.0)]
    UnknownMethod { ty: String, symbol: SymbolId },

    #[error("`{name}` has no body to append to")]
    MissingBody { name: String },

    #[error("cannot insert member at {index} in `{ty}`, which has {len} members")]
    InsertOutOfBounds { ty: String, index: usize, len: usize },
}
