// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Rule registry and include/exclude filtering.

use crate::config::LintOpts;
use crate::types::LeakKind;

/// A lint rule: id and the leak kind it reports.
struct Rule {
    id: &'static str,
    kind: LeakKind,
}

/// All registered rules.
fn all_rules() -> Vec<Rule> {
    vec![
        // New disposable object stored in a field and never disposed.
        Rule {
            id: LeakKind::Created.rule_id(),
            kind: LeakKind::Created,
        },
        // Disposable returned by a call, stored and never disposed.
        Rule {
            id: LeakKind::Returned.rule_id(),
            kind: LeakKind::Returned,
        },
    ]
}

/// True if the rule reporting `kind` survives the filters in `opts`.
pub fn is_enabled(kind: LeakKind, opts: &LintOpts) -> bool {
    all_rules()
        .iter()
        .any(|rule| rule.kind == kind && should_run(rule.id, opts))
}

/// Check if a rule should run based on include/exclude filters.
fn should_run(rule_id: &str, opts: &LintOpts) -> bool {
    // Exclude takes priority
    if opts.excludes.iter().any(|p| matches_rule(rule_id, p)) {
        return false;
    }
    opts.rules.is_empty() || opts.rules.iter().any(|p| matches_rule(rule_id, p))
}

/// Match a rule ID against a pattern: exact id, or "category/*".
fn matches_rule(rule_id: &str, pattern: &str) -> bool {
    if pattern == rule_id {
        return true;
    }
    match (pattern.strip_suffix("/*"), rule_id.split_once('/')) {
        (Some(prefix), Some((category, _))) => category == prefix,
        _ => false,
    }
}
