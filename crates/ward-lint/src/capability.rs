// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Capability queries: does a type implement a contract, and which method
//! implements the contract's release operation.

use std::collections::{HashSet, VecDeque};

use tracing::trace;
use ward_model::{Member, MemberKind, ProgramModel, SymbolId, TypeDecl, TypeKind, TypeRef};

/// The method that implements a capability's release operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityMethod {
    /// Has (or may have) a body to inspect.
    Concrete(SymbolId),
    /// Declared abstract; derived types are trusted to release fields.
    Abstract(SymbolId),
}

impl CapabilityMethod {
    pub fn symbol(self) -> SymbolId {
        match self {
            CapabilityMethod::Concrete(s) | CapabilityMethod::Abstract(s) => s,
        }
    }
}

/// True if `ty` is the capability, or implements it through any chain of
/// declared supertypes.
pub fn has_capability(model: &dyn ProgramModel, ty: &TypeRef, capability: &str) -> bool {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::from([ty.clone()]);
    while let Some(current) = queue.pop_front() {
        if current.as_str() == capability {
            return true;
        }
        if !visited.insert(current.clone()) {
            continue;
        }
        if let Some(supertypes) = model.capabilities_of(&current) {
            queue.extend(supertypes.iter().cloned());
        }
    }
    false
}

/// Find the implementation of the zero-argument `method` of `capability`
/// for `decl`.
///
/// Looks at `decl` first, then each base class, nearest first. At every
/// level an explicit interface implementation wins over a plain method of
/// the same name. Returns `None` when nothing in the known hierarchy
/// implements it.
pub fn resolve_capability_method(
    model: &dyn ProgramModel,
    decl: &TypeDecl,
    capability: &str,
    method: &str,
) -> Option<CapabilityMethod> {
    let mut visited = HashSet::new();
    let mut current = Some(decl);
    while let Some(ty) = current {
        if !visited.insert(ty.id) {
            break;
        }
        let found = find_explicit(ty, capability, method).or_else(|| find_implicit(ty, method));
        if let Some(member) = found {
            trace!(ty = %ty.name, method, "found capability method");
            let is_abstract = model
                .declaration_sites(member.symbol)
                .iter()
                .filter_map(|m| m.kind.as_method())
                .all(|m| m.is_abstract);
            return Some(if is_abstract {
                CapabilityMethod::Abstract(member.symbol)
            } else {
                CapabilityMethod::Concrete(member.symbol)
            });
        }
        current = base_class(model, ty);
    }
    None
}

fn find_explicit<'a>(ty: &'a TypeDecl, capability: &str, method: &str) -> Option<&'a Member> {
    ty.members.iter().find(|m| {
        m.name == method
            && matches!(&m.kind, MemberKind::Method(decl)
                if decl.params.is_empty()
                    && decl.explicit_interface.as_ref().is_some_and(|i| i.as_str() == capability))
    })
}

fn find_implicit<'a>(ty: &'a TypeDecl, method: &str) -> Option<&'a Member> {
    ty.members.iter().find(|m| {
        m.name == method
            && matches!(&m.kind, MemberKind::Method(decl)
                if decl.params.is_empty() && !decl.is_static && decl.explicit_interface.is_none())
    })
}

/// The first declared supertype that is a class.
fn base_class<'a>(model: &'a dyn ProgramModel, ty: &TypeDecl) -> Option<&'a TypeDecl> {
    ty.supertypes
        .iter()
        .filter_map(|s| model.lookup_type(s))
        .find(|t| t.kind == TypeKind::Class)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ward_model::{Param, SnapshotBuilder, TypeBuilder};

    const CAP: &str = "System.IDisposable";

    fn snapshot(types: Vec<TypeBuilder>) -> ward_model::Snapshot {
        let mut builder = SnapshotBuilder::new();
        builder
            .add_type(
                TypeBuilder::interface(CAP)
                    .metadata()
                    .member(Member::abstract_method("Dispose", vec![])),
            )
            .unwrap();
        for ty in types {
            builder.add_type(ty).unwrap();
        }
        builder.build()
    }

    #[test]
    fn capability_is_transitive_and_reflexive() {
        let model = snapshot(vec![
            TypeBuilder::interface("IStream").implements(CAP),
            TypeBuilder::class("FileStream").implements("IStream"),
            TypeBuilder::class("Plain"),
        ]);
        assert!(has_capability(&model, &"FileStream".into(), CAP));
        assert!(has_capability(&model, &CAP.into(), CAP));
        assert!(!has_capability(&model, &"Plain".into(), CAP));
        assert!(!has_capability(&model, &"Unknown".into(), CAP));
    }

    #[test]
    fn cyclic_supertypes_terminate() {
        let model = snapshot(vec![
            TypeBuilder::interface("A").implements("B"),
            TypeBuilder::interface("B").implements("A"),
        ]);
        assert!(!has_capability(&model, &"A".into(), CAP));
    }

    #[test]
    fn explicit_implementation_wins() {
        let model = snapshot(vec![TypeBuilder::class("T")
            .implements(CAP)
            .member(Member::method("Dispose", vec![], vec![]))
            .member(Member::method("Dispose", vec![], vec![]).explicit_impl(CAP))]);
        let ty = model.type_named("T").unwrap();
        let found = resolve_capability_method(&model, ty, CAP, "Dispose").unwrap();
        assert_eq!(found, CapabilityMethod::Concrete(ty.members[1].symbol));
    }

    #[test]
    fn overloads_and_statics_are_ignored() {
        let model = snapshot(vec![TypeBuilder::class("T")
            .implements(CAP)
            .member(Member::method("Dispose", vec![Param::new("disposing", "bool")], vec![]))
            .member(Member::method("Dispose", vec![], vec![]).with_static())]);
        let ty = model.type_named("T").unwrap();
        assert_eq!(resolve_capability_method(&model, ty, CAP, "Dispose"), None);
    }

    #[test]
    fn falls_back_to_base_class() {
        let model = snapshot(vec![
            TypeBuilder::class("Base")
                .implements(CAP)
                .member(Member::abstract_method("Dispose", vec![])),
            TypeBuilder::class("Derived").implements("Base"),
        ]);
        let base = model.type_named("Base").unwrap();
        let derived = model.type_named("Derived").unwrap();
        assert_eq!(
            resolve_capability_method(&model, derived, CAP, "Dispose"),
            Some(CapabilityMethod::Abstract(base.members[0].symbol))
        );
    }
}
