// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Finds fields that hold a disposable resource.

use ward_model::expr::{Expr, ExprKind};
use ward_model::{FieldDecl, Member, Origin, ProgramModel, TypeDecl};

use crate::capability::has_capability;

/// How a field gets its initial value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitializerShape {
    /// `new T(...)`: the field owns what it holds.
    DirectConstruction,
    /// A call result: the field may or may not own it.
    MethodResult,
    Other,
    None,
}

impl InitializerShape {
    pub fn of(init: Option<&Expr>) -> Self {
        match init.map(|e| &e.kind) {
            Some(ExprKind::New { .. }) => InitializerShape::DirectConstruction,
            Some(ExprKind::Call { .. }) => InitializerShape::MethodResult,
            Some(_) => InitializerShape::Other,
            None => InitializerShape::None,
        }
    }

    /// Only fields whose initializer creates or fetches a resource are
    /// candidates for a leak report.
    pub fn is_tracked(self) -> bool {
        matches!(
            self,
            InitializerShape::DirectConstruction | InitializerShape::MethodResult
        )
    }
}

/// A field whose declared type has the disposal capability.
#[derive(Debug, Clone, Copy)]
pub struct ResourceField<'a> {
    pub owner: &'a TypeDecl,
    pub member: &'a Member,
    pub field: &'a FieldDecl,
    pub shape: InitializerShape,
}

/// File name fragments that mark tool-generated sources.
const GENERATED_MARKERS: &[&str] = &[
    ".designer.",
    ".generated.",
    ".g.",
    ".g.i.",
    "TemporaryGeneratedFile_",
];

/// True for types the host flagged as generated or that live in a file
/// named like generated output.
pub fn is_generated(model: &dyn ProgramModel, decl: &TypeDecl) -> bool {
    if decl.is_generated {
        return true;
    }
    let Some(file) = decl.file.and_then(|id| model.file(id)) else {
        return false;
    };
    let name = file
        .path
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(&file.path)
        .to_ascii_lowercase();
    GENERATED_MARKERS
        .iter()
        .any(|marker| name.contains(&marker.to_ascii_lowercase()))
}

/// Whether a type's fields are analyzed at all.
pub fn is_analyzable(model: &dyn ProgramModel, decl: &TypeDecl) -> bool {
    decl.origin == Origin::Source && !is_generated(model, decl)
}

/// Every field of `decl` whose type has `capability`, in declaration order.
pub fn resource_fields<'a>(
    model: &dyn ProgramModel,
    decl: &'a TypeDecl,
    capability: &str,
) -> Vec<ResourceField<'a>> {
    decl.fields()
        .filter(|(_, field)| has_capability(model, &field.ty, capability))
        .map(|(member, field)| ResourceField {
            owner: decl,
            member,
            field,
            shape: InitializerShape::of(field.init.as_ref()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ward_model::{SnapshotBuilder, TypeBuilder};

    #[test]
    fn classifies_initializers() {
        assert_eq!(
            InitializerShape::of(Some(&Expr::construct("S", vec![]))),
            InitializerShape::DirectConstruction
        );
        assert_eq!(
            InitializerShape::of(Some(&Expr::call_named("Open", vec![]))),
            InitializerShape::MethodResult
        );
        assert_eq!(
            InitializerShape::of(Some(&Expr::ident("shared"))),
            InitializerShape::Other
        );
        assert_eq!(InitializerShape::of(None), InitializerShape::None);
        assert!(!InitializerShape::Other.is_tracked());
    }

    #[test]
    fn generated_file_names() {
        let mut builder = SnapshotBuilder::new();
        let designer = builder.file("src/Form1.Designer.cs", "");
        let plain = builder.file("src/generated/Form1.cs", "");
        let temp = builder.file("obj/TemporaryGeneratedFile_123.cs", "");
        builder.add_type(TypeBuilder::class("A").in_file(designer)).unwrap();
        builder.add_type(TypeBuilder::class("B").in_file(plain)).unwrap();
        builder.add_type(TypeBuilder::class("C").in_file(temp)).unwrap();
        builder.add_type(TypeBuilder::class("D").generated()).unwrap();
        let model = builder.build();

        let generated = |name: &str| is_generated(&model, model.type_named(name).unwrap());
        assert!(generated("A"));
        assert!(!generated("B"));
        assert!(generated("C"));
        assert!(generated("D"));
    }
}
