// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Batched field synthesis across a whole program.
//!
//! Requests can arrive from any thread. Each type is planned by a single
//! writer in declaration order; distinct types are planned in parallel.

use std::collections::HashMap;

use dashmap::DashMap;
use rayon::prelude::*;
use tracing::{debug, info_span};
use ward_model::{Origin, ProgramModel, StructuralEdit, SymbolId, TypeDecl, TypeId};

use crate::config::SynthesisConfig;
use crate::synthesis::{apply_synthesis_plan, TypePlanner};
use crate::unbacked::unbacked_parameters;

/// Pending synthesis requests, grouped by containing type.
#[derive(Debug, Default)]
pub struct SynthesisQueue {
    requests: DashMap<TypeId, Vec<SymbolId>>,
}

impl SynthesisQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a constructor parameter. Returns `false` if the symbol has no
    /// containing type.
    pub fn enqueue(&self, model: &dyn ProgramModel, parameter: SymbolId) -> bool {
        let Some(owner) = model.symbol(parameter).and_then(|s| s.owner) else {
            return false;
        };
        self.requests.entry(owner).or_default().push(parameter);
        true
    }

    /// Number of queued requests.
    pub fn len(&self) -> usize {
        self.requests.iter().map(|entry| entry.value().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Plan every queued request and return one edit per changed type,
    /// ordered by type. The queue is left empty.
    pub fn drain(&self, model: &dyn ProgramModel, config: &SynthesisConfig) -> Vec<StructuralEdit> {
        let keys: Vec<TypeId> = self.requests.iter().map(|entry| *entry.key()).collect();
        let batches: Vec<(TypeId, Vec<SymbolId>)> = keys
            .into_iter()
            .filter_map(|key| self.requests.remove(&key))
            .collect();
        let _span = info_span!("synthesis", types = batches.len()).entered();

        let mut edits: Vec<StructuralEdit> = batches
            .into_par_iter()
            .filter_map(|(ty, params)| {
                let decl = model.type_decl(ty)?;
                plan_type(model, decl, params, config)
            })
            .collect();
        edits.sort_by_key(|edit| edit.ty);
        debug!(edits = edits.len(), "drained synthesis queue");
        edits
    }
}

/// Plan the requests of one type, in declaration order, into one edit.
fn plan_type(
    model: &dyn ProgramModel,
    decl: &TypeDecl,
    mut params: Vec<SymbolId>,
    config: &SynthesisConfig,
) -> Option<StructuralEdit> {
    let order: HashMap<SymbolId, usize> = decl
        .members
        .iter()
        .filter_map(|m| m.kind.as_method())
        .flat_map(|m| m.params.iter())
        .enumerate()
        .map(|(index, p)| (p.symbol, index))
        .collect();
    params.sort_by_key(|p| (order.get(p).copied().unwrap_or(usize::MAX), *p));
    params.dedup();

    let mut planner = TypePlanner::new(model, decl, config);
    let mut edit = StructuralEdit::new(decl.id);
    for param in params {
        let Some(plan) = planner.plan(param) else {
            debug!(ty = %decl.name, param = param.0, "parameter not plannable");
            continue;
        };
        if !plan.is_noop() {
            edit.extend(apply_synthesis_plan(&plan));
        }
    }
    (!edit.is_empty()).then_some(edit)
}

/// Back every unassigned constructor parameter of every source type with
/// a field.
pub fn fix_all(model: &dyn ProgramModel, config: &SynthesisConfig) -> Vec<StructuralEdit> {
    let queue = SynthesisQueue::new();
    model
        .types()
        .par_iter()
        .filter(|decl| decl.origin == Origin::Source && !decl.is_generated)
        .for_each(|decl| {
            for param in unbacked_parameters(model, decl) {
                queue.enqueue(model, param);
            }
        });
    debug!(requests = queue.len(), "queued unbacked parameters");
    queue.drain(model, config)
}
