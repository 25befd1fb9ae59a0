// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Call-graph reachability from the disposal method.
//!
//! A field counts as released when a release call on it appears in the
//! disposal method itself or in a same-type method the disposal method
//! calls directly. Deeper chains are only followed under
//! [`ReachabilityDepth::Bounded`].

use indexmap::IndexSet;
use tracing::trace;
use ward_model::expr::{Expr, ExprKind};
use ward_model::stmt::StmtKind;
use ward_model::{Origin, ProgramModel, Span, SymbolId, SymbolKind, TypeDecl};

use crate::config::ReachabilityDepth;
use crate::util::{walk_exprs, walk_stmts};

/// A direct call from one method to a sibling method of the same type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallEdge {
    pub caller: SymbolId,
    pub callee: SymbolId,
    /// Span of the first call site.
    pub span: Span,
}

/// Same-type source methods invoked anywhere in the bodies of `method`,
/// one edge per distinct callee in first-call order.
pub fn call_edges(model: &dyn ProgramModel, owner: &TypeDecl, method: SymbolId) -> Vec<CallEdge> {
    let mut seen = IndexSet::new();
    let mut edges = Vec::new();
    for site in model.declaration_sites(method) {
        let Some(body) = model.body_of(site) else {
            continue;
        };
        walk_exprs(body, &mut |expr| {
            let ExprKind::Call { .. } = expr.kind else {
                return;
            };
            let Some(callee) = model.resolve_symbol(expr.id) else {
                return;
            };
            let Some(info) = model.symbol(callee) else {
                return;
            };
            if info.kind != SymbolKind::Method
                || info.origin != Origin::Source
                || info.owner != Some(owner.id)
            {
                return;
            }
            if seen.insert(callee) {
                trace!(caller = method.0, callee = callee.0, "call edge");
                edges.push(CallEdge {
                    caller: method,
                    callee,
                    span: expr.span,
                });
            }
        });
    }
    edges
}

/// True if some declaration of `method` contains an expression statement
/// `F.<release>()` or `this.F.<release>()` whose receiver resolves to
/// `field`. Nested blocks are searched; nested calls are not.
pub fn disposes_field(
    model: &dyn ProgramModel,
    method: SymbolId,
    field: SymbolId,
    release: &str,
) -> bool {
    model.declaration_sites(method).into_iter().any(|site| {
        let Some(body) = model.body_of(site) else {
            return false;
        };
        let mut found = false;
        walk_stmts(body, &mut |stmt| {
            if let StmtKind::Expr(expr) = &stmt.kind {
                found |= is_release_call(model, expr, field, release);
            }
        });
        found
    })
}

fn is_release_call(model: &dyn ProgramModel, expr: &Expr, field: SymbolId, release: &str) -> bool {
    let ExprKind::Call {
        callee,
        type_args,
        args,
    } = &expr.kind
    else {
        return false;
    };
    if !type_args.is_empty() || !args.is_empty() {
        return false;
    }
    let ExprKind::Member { object, name } = &callee.kind else {
        return false;
    };
    if name != release {
        return false;
    }
    let receiver_is_field_access = match &object.kind {
        ExprKind::Ident(_) => true,
        ExprKind::Member { object: inner, .. } => matches!(inner.kind, ExprKind::This),
        _ => false,
    };
    receiver_is_field_access && model.resolve_symbol(object.id) == Some(field)
}

/// True if `field` is released by `dispose` or by a method reachable from
/// it within `depth` hops.
pub fn releases_field(
    model: &dyn ProgramModel,
    owner: &TypeDecl,
    dispose: SymbolId,
    field: SymbolId,
    release: &str,
    depth: ReachabilityDepth,
) -> bool {
    let mut visited = IndexSet::from([dispose]);
    let mut frontier = vec![dispose];
    for hop in 0..=depth.hops() {
        if frontier
            .iter()
            .any(|&method| disposes_field(model, method, field, release))
        {
            trace!(field = field.0, hop, "field released");
            return true;
        }
        if hop == depth.hops() {
            break;
        }
        frontier = frontier
            .iter()
            .flat_map(|&method| call_edges(model, owner, method))
            .map(|edge| edge.callee)
            .filter(|&callee| visited.insert(callee))
            .collect();
        if frontier.is_empty() {
            break;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use ward_model::stmt::Stmt;
    use ward_model::{Member, Snapshot, SnapshotBuilder, TypeBuilder};

    fn dispose_of(name: &str) -> Stmt {
        Stmt::expr(Expr::method_call(Expr::ident(name), "Dispose", vec![]))
    }

    fn chain() -> Snapshot {
        let mut builder = SnapshotBuilder::new();
        builder
            .add_type(
                TypeBuilder::class("T")
                    .member(Member::field("a", "Res", None))
                    .member(Member::field("b", "Res", None))
                    .member(Member::field("c", "Res", None))
                    .member(Member::method(
                        "Dispose",
                        vec![],
                        vec![
                            dispose_of("a"),
                            Stmt::expr(Expr::call_named("First", vec![])),
                            Stmt::expr(Expr::call_named("First", vec![])),
                            Stmt::expr(Expr::call_named("Helper", vec![])),
                        ],
                    ))
                    .member(Member::method(
                        "First",
                        vec![],
                        vec![dispose_of("b"), Stmt::expr(Expr::call_named("Second", vec![]))],
                    ))
                    .member(Member::method("Second", vec![], vec![dispose_of("c")])),
            )
            .unwrap();
        builder
            .add_type(TypeBuilder::class("Util").member(Member::method("Helper", vec![], vec![])))
            .unwrap();
        builder.build()
    }

    fn symbol(model: &Snapshot, name: &str) -> SymbolId {
        model.member_named("T", name).unwrap().symbol
    }

    #[test]
    fn edges_are_deduplicated_and_same_type_only() {
        let model = chain();
        let owner = model.type_named("T").unwrap();
        let edges = call_edges(&model, owner, symbol(&model, "Dispose"));
        let callees: Vec<_> = edges.iter().map(|e| e.callee).collect();
        assert_eq!(callees, vec![symbol(&model, "First")]);
    }

    #[test]
    fn one_hop_stops_before_second_level() {
        let model = chain();
        let owner = model.type_named("T").unwrap();
        let dispose = symbol(&model, "Dispose");
        let released = |field: &str, depth| {
            releases_field(&model, owner, dispose, symbol(&model, field), "Dispose", depth)
        };
        assert!(released("a", ReachabilityDepth::OneHop));
        assert!(released("b", ReachabilityDepth::OneHop));
        assert!(!released("c", ReachabilityDepth::OneHop));
        assert!(released("c", ReachabilityDepth::Bounded(2)));
    }

    #[test]
    fn release_call_must_be_a_statement_without_arguments() {
        let mut builder = SnapshotBuilder::new();
        builder
            .add_type(
                TypeBuilder::class("T")
                    .member(Member::field("a", "Res", None))
                    .member(Member::method(
                        "Dispose",
                        vec![],
                        vec![
                            Stmt::expr(Expr::method_call(Expr::ident("a"), "Dispose", vec![Expr::int(1)])),
                            Stmt::local("x", Some(Expr::method_call(Expr::ident("a"), "Dispose", vec![]))),
                        ],
                    )),
            )
            .unwrap();
        let model = builder.build();
        assert!(!disposes_field(
            &model,
            symbol(&model, "Dispose"),
            symbol(&model, "a"),
            "Dispose"
        ));
    }
}
