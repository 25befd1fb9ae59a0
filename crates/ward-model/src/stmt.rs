// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Statement nodes.

use crate::decl::TypeRef;
use crate::expr::Expr;
use crate::{NodeId, Span};

/// A statement.
#[derive(Debug, Clone)]
pub struct Stmt {
    pub id: NodeId,
    pub kind: StmtKind,
    pub span: Span,
}

/// The kind of statement.
#[derive(Debug, Clone)]
pub enum StmtKind {
    /// Expression statement
    Expr(Expr),
    /// Assignment (`target = value;`)
    Assign {
        target: Expr,
        value: Expr,
    },
    /// Local variable declaration
    Local {
        name: String,
        ty: Option<TypeRef>,
        init: Option<Expr>,
    },
    /// Return statement
    Return(Option<Expr>),
    /// If statement
    If {
        cond: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Option<Vec<Stmt>>,
    },
    /// While loop
    While {
        cond: Expr,
        body: Vec<Stmt>,
    },
    /// Nested block
    Block(Vec<Stmt>),
    /// `try { } finally { }`
    Try {
        body: Vec<Stmt>,
        finally: Option<Vec<Stmt>>,
    },
}

impl Stmt {
    pub fn new(kind: StmtKind) -> Self {
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

    pub fn expr(expr: Expr) -> Self {
        Self::new(StmtKind::Expr(expr))
    }

    pub fn assign(target: Expr, value: Expr) -> Self {
        Self::new(StmtKind::Assign { target, value })
    }

    pub fn local(name: impl Into<String>, init: Option<Expr>) -> Self {
        Self::new(StmtKind::Local {
            name: name.into(),
            ty: None,
            init,
        })
    }

    pub fn block(stmts: Vec<Stmt>) -> Self {
        Self::new(StmtKind::Block(stmts))
    }

    pub fn if_then(cond: Expr, then_branch: Vec<Stmt>) -> Self {
        Self::new(StmtKind::If {
            cond,
            then_branch,
            else_branch: None,
        })
    }

    /// Expressions held directly by this statement (not by nested statements).
    pub fn exprs(&self) -> Vec<&Expr> {
        match &self.kind {
            StmtKind::Expr(e) => vec![e],
            StmtKind::Assign { target, value } => vec![target, value],
            StmtKind::Local { init, .. } => init.iter().collect(),
            StmtKind::Return(value) => value.iter().collect(),
            StmtKind::If { cond, .. } | StmtKind::While { cond, .. } => vec![cond],
            StmtKind::Block(_) | StmtKind::Try { .. } => Vec::new(),
        }
    }

    /// Nested statement lists, in source order.
    pub fn blocks(&self) -> Vec<&[Stmt]> {
        match &self.kind {
            StmtKind::If {
                then_branch,
                else_branch,
                ..
            } => {
                let mut out = vec![then_branch.as_slice()];
                out.extend(else_branch.as_deref());
                out
            }
            StmtKind::While { body, .. } | StmtKind::Block(body) => vec![body.as_slice()],
            StmtKind::Try { body, finally } => {
                let mut out = vec![body.as_slice()];
                out.extend(finally.as_deref());
                out
            }
            StmtKind::Expr(_)
            | StmtKind::Assign { .. }
            | StmtKind::Local { .. }
            | StmtKind::Return(_) => Vec::new(),
        }
    }

    pub(crate) fn parts_mut(&mut self) -> (Vec<&mut Expr>, Vec<&mut Vec<Stmt>>) {
        match &mut self.kind {
            StmtKind::Expr(e) => (vec![e], Vec::new()),
            StmtKind::Assign { target, value } => (vec![target, value], Vec::new()),
            StmtKind::Local { init, .. } => (init.iter_mut().collect(), Vec::new()),
            StmtKind::Return(value) => (value.iter_mut().collect(), Vec::new()),
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                let mut blocks = vec![then_branch];
                blocks.extend(else_branch.as_mut());
                (vec![cond], blocks)
            }
            StmtKind::While { cond, body } => (vec![cond], vec![body]),
            StmtKind::Block(body) => (Vec::new(), vec![body]),
            StmtKind::Try { body, finally } => {
                let mut blocks = vec![body];
                blocks.extend(finally.as_mut());
                (Vec::new(), blocks)
            }
        }
    }
}
