// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Snapshot building, name binding and edit application.

use ward_model::expr::ExprKind;
use ward_model::stmt::{Stmt, StmtKind};
use ward_model::{
    EditOp, Member, MemberKind, ModelErrorKind, Param, ProgramModel, Snapshot, SnapshotBuilder,
    StructuralEdit, SymbolKind, TypeBuilder,
};
use ward_model::expr::Expr;

fn stream_holder() -> Snapshot {
    let mut builder = SnapshotBuilder::new();
    builder
        .add_type(
            TypeBuilder::class("System.IO.Stream")
                .metadata()
                .member(Member::abstract_method("Dispose", vec![])),
        )
        .unwrap();
    builder
        .add_type(
            TypeBuilder::class("Holder")
                .member(Member::field("stream", "System.IO.Stream", None))
                .member(Member::constructor(
                    vec![Param::new("stream", "System.IO.Stream")],
                    vec![Stmt::assign(Expr::this_member("stream"), Expr::ident("stream"))],
                ))
                .member(Member::method(
                    "Close",
                    vec![],
                    vec![
                        Stmt::local("stream", None),
                        Stmt::expr(Expr::method_call(Expr::ident("stream"), "Dispose", vec![])),
                        Stmt::expr(Expr::method_call(Expr::this_member("stream"), "Dispose", vec![])),
                    ],
                )),
        )
        .unwrap();
    builder.build()
}

fn body<'a>(snapshot: &'a Snapshot, ty: &str, member: &str) -> &'a [Stmt] {
    let member = snapshot.member_named(ty, member).unwrap();
    snapshot.body_of(member).unwrap()
}

#[test]
fn constructors_take_the_type_name() {
    let snapshot = stream_holder();
    let ctors = snapshot.constructors_of("Holder");
    assert_eq!(ctors.len(), 1);
    assert_eq!(ctors[0].name, "Holder");
    let info = snapshot.symbol(ctors[0].symbol).unwrap();
    assert_eq!(info.kind, SymbolKind::Constructor);
}

#[test]
fn parameters_shadow_fields() {
    let snapshot = stream_holder();
    let ctor = snapshot.constructors_of("Holder")[0];
    let param = snapshot.parameter(ctor.symbol, "stream").unwrap();
    let field = snapshot.member_named("Holder", "stream").unwrap().symbol;

    let StmtKind::Assign { target, value } = &snapshot.body_of(ctor).unwrap()[0].kind else {
        panic!("expected assignment");
    };
    assert_eq!(snapshot.resolve_symbol(target.id), Some(field));
    assert_eq!(snapshot.resolve_symbol(value.id), Some(param));
    assert_eq!(snapshot.symbol(param).unwrap().container, Some(ctor.symbol));
}

#[test]
fn locals_shadow_fields_without_resolving() {
    let snapshot = stream_holder();
    let field = snapshot.member_named("Holder", "stream").unwrap().symbol;
    let stmts = body(&snapshot, "Holder", "Close");

    let receiver = |stmt: &Stmt| match &stmt.kind {
        StmtKind::Expr(Expr {
            kind: ExprKind::Call { callee, .. },
            ..
        }) => match &callee.kind {
            ExprKind::Member { object, .. } => object.id,
            _ => panic!("expected member callee"),
        },
        _ => panic!("expected call statement"),
    };
    assert_eq!(snapshot.resolve_symbol(receiver(&stmts[1])), None);
    assert_eq!(snapshot.resolve_symbol(receiver(&stmts[2])), Some(field));
}

#[test]
fn calls_resolve_through_the_receiver_type() {
    let snapshot = stream_holder();
    let dispose = snapshot
        .member_named("System.IO.Stream", "Dispose")
        .unwrap()
        .symbol;
    let stmts = body(&snapshot, "Holder", "Close");
    let StmtKind::Expr(call) = &stmts[2].kind else {
        panic!("expected expression statement");
    };
    assert_eq!(snapshot.resolve_symbol(call.id), Some(dispose));
}

#[test]
fn partial_parts_share_a_symbol() {
    let mut builder = SnapshotBuilder::new();
    builder
        .add_type(
            TypeBuilder::class("P")
                .member(Member::method("Dispose", vec![], vec![]).partial().without_body())
                .member(Member::method("Dispose", vec![], vec![]).partial())
                .member(Member::method("Dispose", vec![Param::new("x", "int")], vec![])),
        )
        .unwrap();
    let snapshot = builder.build();
    let decl = snapshot.type_named("P").unwrap();
    assert_eq!(decl.members[0].symbol, decl.members[1].symbol);
    assert_ne!(decl.members[0].symbol, decl.members[2].symbol);
    assert_eq!(snapshot.declaration_sites(decl.members[0].symbol).len(), 2);
}

#[test]
fn apply_edit_inserts_and_appends() {
    let mut snapshot = stream_holder();
    let holder = snapshot.type_named("Holder").unwrap().id;
    let ctor = snapshot.constructors_of("Holder")[0].symbol;

    let mut edit = StructuralEdit::new(holder);
    edit.push(EditOp::InsertMember {
        index: 0,
        member: Member::field("mCount", "int", None).readonly(),
    });
    edit.push(EditOp::AppendStatement {
        method: ctor,
        stmt: Stmt::assign(Expr::ident("mCount"), Expr::int(0)),
    });
    snapshot.apply_edit(&edit).unwrap();

    let decl = snapshot.type_named("Holder").unwrap();
    assert_eq!(decl.members[0].name, "mCount");
    let field = decl.members[0].symbol;
    assert_eq!(snapshot.symbol(field).unwrap().kind, SymbolKind::Field);

    let ctor_member = snapshot.constructors_of("Holder")[0];
    let stmts = snapshot.body_of(ctor_member).unwrap();
    assert_eq!(stmts.len(), 2);
    let StmtKind::Assign { target, .. } = &stmts[1].kind else {
        panic!("expected assignment");
    };
    assert_eq!(snapshot.resolve_symbol(target.id), Some(field));
}

#[test]
fn failed_edit_leaves_snapshot_untouched() {
    let mut snapshot = stream_holder();
    let holder = snapshot.type_named("Holder").unwrap().id;
    let before = snapshot.type_named("Holder").unwrap().members.len();

    let mut edit = StructuralEdit::new(holder);
    edit.push(EditOp::InsertMember {
        index: 0,
        member: Member::field("mA", "int", None),
    });
    edit.push(EditOp::InsertMember {
        index: 99,
        member: Member::field("mB", "int", None),
    });
    let err = snapshot.apply_edit(&edit).unwrap_err();
    assert!(matches!(err.kind, ModelErrorKind::InsertOutOfBounds { index: 99, .. }));
    assert_eq!(snapshot.type_named("Holder").unwrap().members.len(), before);
}

#[test]
fn appending_to_a_bodiless_method_fails() {
    let mut snapshot = stream_holder();
    let stream = snapshot.type_named("System.IO.Stream").unwrap();
    let (id, dispose) = (stream.id, stream.members[0].symbol);
    assert!(matches!(stream.members[0].kind, MemberKind::Method(_)));

    let mut edit = StructuralEdit::new(id);
    edit.push(EditOp::AppendStatement {
        method: dispose,
        stmt: Stmt::expr(Expr::int(1)),
    });
    let err = snapshot.apply_edit(&edit).unwrap_err();
    assert!(matches!(err.kind, ModelErrorKind::MissingBody { .. }));
}
