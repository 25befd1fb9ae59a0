// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Collision-free member names.

use indexmap::IndexSet;
use ward_model::TypeDecl;

/// Every member name declared in a type, all kinds sharing one table.
pub fn member_names(decl: &TypeDecl) -> IndexSet<String> {
    decl.members.iter().map(|m| m.name.clone()).collect()
}

/// `base` if it is free, otherwise the first of `base1`, `base2`, ...
/// not in `existing`. At most `existing.len() + 1` candidates are tried,
/// so some candidate is always free.
pub fn resolve_unique_name(base: &str, existing: &IndexSet<String>) -> String {
    if !existing.contains(base) {
        return base.to_string();
    }
    (1..=existing.len() + 1)
        .map(|n| format!("{base}{n}"))
        .find(|candidate| !existing.contains(candidate))
        .unwrap_or_else(|| format!("{base}{}", existing.len() + 1))
}

/// Field name derived from a parameter: `prefix` + capitalized name, or
/// the lower-camel name when there is no prefix.
pub fn default_field_name(param: &str, prefix: &str) -> String {
    let mut chars = param.chars();
    let Some(first) = chars.next() else {
        return prefix.to_string();
    };
    let first: String = if prefix.is_empty() {
        first.to_lowercase().collect()
    } else {
        first.to_uppercase().collect()
    };
    format!("{prefix}{first}{}", chars.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> IndexSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn free_base_is_kept() {
        assert_eq!(resolve_unique_name("mPar", &names(&["mBar"])), "mPar");
    }

    #[test]
    fn numbered_suffixes() {
        assert_eq!(resolve_unique_name("mPar", &names(&["mPar"])), "mPar1");
        assert_eq!(resolve_unique_name("mPar", &names(&["mPar", "mPar1"])), "mPar2");
        assert_eq!(resolve_unique_name("mPar", &names(&["mPar", "mPar2"])), "mPar1");
    }

    #[test]
    fn default_names() {
        assert_eq!(default_field_name("par", "m"), "mPar");
        assert_eq!(default_field_name("bar", "_"), "_Bar");
        assert_eq!(default_field_name("Count", ""), "count");
        assert_eq!(default_field_name("a", "m"), "mA");
    }
}
