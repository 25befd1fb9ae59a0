// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Shared utilities for the lint passes.

use ward_model::expr::Expr;
use ward_model::stmt::Stmt;
use ward_model::{Member, ProgramModel, TypeDecl};

use crate::types::LintLocation;

/// Build the reported location of a member: file, span and the 1-based
/// line/column of its start.
pub fn member_location(model: &dyn ProgramModel, owner: &TypeDecl, member: &Member) -> LintLocation {
    let file = owner.file.and_then(|id| model.file(id));
    let (line, column, source_line) = match file {
        Some(file) => {
            let (line, column) = file.line_map.line_col(member.span.start);
            let text = file.line_map.line_text(&file.text, line).unwrap_or("");
            (line, column, text.trim_end().to_string())
        }
        None => (0, 0, String::new()),
    };
    LintLocation {
        file: file.map(|f| f.path.clone()),
        span: member.span,
        line,
        column,
        source_line,
    }
}

/// Visit every statement, nested blocks included, in source order.
pub fn walk_stmts<'a>(stmts: &'a [Stmt], visit: &mut impl FnMut(&'a Stmt)) {
    for stmt in stmts {
        visit(stmt);
        for block in stmt.blocks() {
            walk_stmts(block, visit);
        }
    }
}

/// Visit every expression held by `stmts`, sub-expressions included.
pub fn walk_exprs<'a>(stmts: &'a [Stmt], visit: &mut impl FnMut(&'a Expr)) {
    walk_stmts(stmts, &mut |stmt| {
        for expr in stmt.exprs() {
            walk_expr(expr, visit);
        }
    });
}

fn walk_expr<'a>(expr: &'a Expr, visit: &mut impl FnMut(&'a Expr)) {
    visit(expr);
    for child in expr.children() {
        walk_expr(child, visit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ward_model::expr::ExprKind;

    #[test]
    fn walks_nested_blocks_in_order() {
        let body = vec![
            Stmt::expr(Expr::call_named("a", vec![])),
            Stmt::if_then(
                Expr::ident("flag"),
                vec![Stmt::block(vec![Stmt::expr(Expr::call_named(
                    "b",
                    vec![Expr::call_named("c", vec![])],
                ))])],
            ),
        ];
        let mut calls = Vec::new();
        walk_exprs(&body, &mut |expr| {
            if let ExprKind::Call { callee, .. } = &expr.kind {
                if let ExprKind::Ident(name) = &callee.kind {
                    calls.push(name.clone());
                }
            }
        });
        assert_eq!(calls, vec!["a", "b", "c"]);

        let mut count = 0;
        walk_stmts(&body, &mut |_| count += 1);
        assert_eq!(count, 4);
    }
}
