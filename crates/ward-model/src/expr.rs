// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Expression nodes.

use crate::decl::TypeRef;
use crate::{NodeId, Span};

/// An expression.
#[derive(Debug, Clone)]
pub struct Expr {
    pub id: NodeId,
    pub kind: ExprKind,
    pub span: Span,
}

/// The kind of expression.
#[derive(Debug, Clone)]
pub enum ExprKind {
    /// Integer literal
    Int(i64),
    /// String literal
    String(String),
    /// Boolean literal
    Bool(bool),
    /// `null`
    Null,
    /// Simple name
    Ident(String),
    /// `this`
    This,
    /// Object creation (`new T(args)`)
    New {
        ty: TypeRef,
        args: Vec<Expr>,
    },
    /// Invocation. The callee is usually an `Ident` or a `Member` access.
    Call {
        callee: Box<Expr>,
        type_args: Vec<TypeRef>,
        args: Vec<Expr>,
    },
    /// Member access (`object.name`)
    Member {
        object: Box<Expr>,
        name: String,
    },
    /// Binary operation
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `cond ? then_branch : else_branch`
    Conditional {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Ne,
    Lt,
    Gt,
    And,
    Or,
    /// `a ?? b`
    Coalesce,
}

impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        Self {
            id: NodeId::DUMMY,
            kind,
            span: Span::default(),
        }
    }

    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Self::new(ExprKind::Ident(name.into()))
    }

    pub fn this() -> Self {
        Self::new(ExprKind::This)
    }

    pub fn int(value: i64) -> Self {
        Self::new(ExprKind::Int(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::new(ExprKind::String(value.into()))
    }

    pub fn null() -> Self {
        Self::new(ExprKind::Null)
    }

    /// `new ty(args)`
    pub fn construct(ty: impl Into<TypeRef>, args: Vec<Expr>) -> Self {
        Self::new(ExprKind::New {
            ty: ty.into(),
            args,
        })
    }

    /// `object.name`
    pub fn member(object: Expr, name: impl Into<String>) -> Self {
        Self::new(ExprKind::Member {
            object: Box::new(object),
            name: name.into(),
        })
    }

    /// `this.name`
    pub fn this_member(name: impl Into<String>) -> Self {
        Self::member(Self::this(), name)
    }

    /// `callee(args)`
    pub fn call(callee: Expr, args: Vec<Expr>) -> Self {
        Self::new(ExprKind::Call {
            callee: Box::new(callee),
            type_args: Vec::new(),
            args,
        })
    }

    /// `name(args)`, an unqualified call.
    pub fn call_named(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::call(Self::ident(name), args)
    }

    /// `object.method(args)`
    pub fn method_call(object: Expr, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::call(Self::member(object, method), args)
    }

    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Self {
        Self::new(ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Direct sub-expressions, in source order.
    pub fn children(&self) -> Vec<&Expr> {
        match &self.kind {
            ExprKind::Int(_)
            | ExprKind::String(_)
            | ExprKind::Bool(_)
            | ExprKind::Null
            | ExprKind::Ident(_)
            | ExprKind::This => Vec::new(),
            ExprKind::New { args, .. } => args.iter().collect(),
            ExprKind::Call { callee, args, .. } => {
                std::iter::once(callee.as_ref()).chain(args.iter()).collect()
            }
            ExprKind::Member { object, .. } => vec![object.as_ref()],
            ExprKind::Binary { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            ExprKind::Conditional {
                cond,
                then_branch,
                else_branch,
            } => vec![cond.as_ref(), then_branch.as_ref(), else_branch.as_ref()],
        }
    }

    pub(crate) fn children_mut(&mut self) -> Vec<&mut Expr> {
        match &mut self.kind {
            ExprKind::Int(_)
            | ExprKind::String(_)
            | ExprKind::Bool(_)
            | ExprKind::Null
            | ExprKind::Ident(_)
            | ExprKind::This => Vec::new(),
            ExprKind::New { args, .. } => args.iter_mut().collect(),
            ExprKind::Call { callee, args, .. } => {
                std::iter::once(callee.as_mut()).chain(args.iter_mut()).collect()
            }
            ExprKind::Member { object, .. } => vec![object.as_mut()],
            ExprKind::Binary { left, right, .. } => vec![left.as_mut(), right.as_mut()],
            ExprKind::Conditional {
                cond,
                then_branch,
                else_branch,
            } => vec![cond.as_mut(), then_branch.as_mut(), else_branch.as_mut()],
        }
    }
}
