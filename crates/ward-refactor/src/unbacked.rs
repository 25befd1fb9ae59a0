// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Constructor parameters that are not stored in any field.

use ward_model::stmt::{Stmt, StmtKind};
use ward_model::{Member, MemberKind, ProgramModel, SymbolId, SymbolKind, TypeDecl};

/// True if some statement of the constructor assigns `param` straight
/// into a field of the constructor's type (`field = param;` or
/// `this.field = param;`, whatever the field is called).
pub fn is_backed(model: &dyn ProgramModel, owner: &TypeDecl, ctor: &Member, param: SymbolId) -> bool {
    let Some(body) = model.body_of(ctor) else {
        return false;
    };
    any_stmt(body, &mut |stmt| {
        let StmtKind::Assign { target, value } = &stmt.kind else {
            return false;
        };
        if model.resolve_symbol(value.id) != Some(param) {
            return false;
        }
        model
            .resolve_symbol(target.id)
            .and_then(|s| model.symbol(s))
            .is_some_and(|info| info.kind == SymbolKind::Field && info.owner == Some(owner.id))
    })
}

/// True if the constructor already assigns to `field` anywhere.
pub fn assigns_field(model: &dyn ProgramModel, ctor: &Member, field: SymbolId) -> bool {
    let Some(body) = model.body_of(ctor) else {
        return false;
    };
    any_stmt(body, &mut |stmt| match &stmt.kind {
        StmtKind::Assign { target, .. } => model.resolve_symbol(target.id) == Some(field),
        _ => false,
    })
}

/// Parameters of every constructor of `decl` that no field backs, in
/// declaration order.
pub fn unbacked_parameters(model: &dyn ProgramModel, decl: &TypeDecl) -> Vec<SymbolId> {
    decl.members
        .iter()
        .filter_map(|m| match &m.kind {
            MemberKind::Constructor(ctor) if ctor.body.is_some() => Some((m, ctor)),
            _ => None,
        })
        .flat_map(|(member, ctor)| {
            ctor.params
                .iter()
                .filter(move |p| !is_backed(model, decl, member, p.symbol))
                .map(|p| p.symbol)
        })
        .collect()
}

fn any_stmt(stmts: &[Stmt], check: &mut impl FnMut(&Stmt) -> bool) -> bool {
    stmts.iter().any(|stmt| {
        check(stmt) || stmt.blocks().into_iter().any(|block| any_stmt(block, check))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ward_model::expr::Expr;
    use ward_model::{Param, Snapshot, SnapshotBuilder, TypeBuilder};

    fn build(ty: TypeBuilder) -> Snapshot {
        let mut builder = SnapshotBuilder::new();
        builder.add_type(ty).unwrap();
        builder.build()
    }

    fn unbacked_names(model: &Snapshot) -> Vec<String> {
        let decl = model.type_named("TypeName").unwrap();
        unbacked_parameters(model, decl)
            .into_iter()
            .map(|p| model.symbol(p).unwrap().name.clone())
            .collect()
    }

    #[test]
    fn assigned_parameters_are_backed() {
        let model = build(
            TypeBuilder::class("TypeName")
                .member(Member::field("mPar", "int", None))
                .member(Member::field("myField", "int", None))
                .member(Member::constructor(
                    vec![Param::new("par", "int")],
                    vec![Stmt::assign(Expr::ident("mPar"), Expr::ident("par"))],
                ))
                .member(Member::constructor(
                    vec![Param::new("par", "int"), Param::new("other", "int")],
                    vec![Stmt::assign(Expr::this_member("myField"), Expr::ident("par"))],
                )),
        );
        assert_eq!(unbacked_names(&model), vec!["other"]);
    }

    #[test]
    fn assigning_to_a_local_does_not_count() {
        let model = build(TypeBuilder::class("TypeName").member(Member::constructor(
            vec![Param::new("par", "int")],
            vec![
                Stmt::local("copy", None),
                Stmt::assign(Expr::ident("copy"), Expr::ident("par")),
            ],
        )));
        assert_eq!(unbacked_names(&model), vec!["par"]);
    }

    #[test]
    fn nested_assignments_count() {
        let model = build(
            TypeBuilder::class("TypeName")
                .member(Member::field("mPar", "int", None))
                .member(Member::constructor(
                    vec![Param::new("par", "int")],
                    vec![Stmt::block(vec![Stmt::assign(
                        Expr::ident("mPar"),
                        Expr::ident("par"),
                    )])],
                )),
        );
        assert!(unbacked_names(&model).is_empty());
    }
}
