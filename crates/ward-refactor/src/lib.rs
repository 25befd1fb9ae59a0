// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Introduce-field refactoring: back constructor parameters with fields.
//!
//! Planning only reads the [`ProgramModel`](ward_model::ProgramModel); the
//! result is a [`StructuralEdit`](ward_model::StructuralEdit) the host
//! applies as one unit.

pub mod config;
pub mod naming;
pub mod queue;
pub mod synthesis;
pub mod unbacked;

pub use config::{ConfigError, SynthesisConfig};
pub use naming::{default_field_name, resolve_unique_name};
pub use queue::{fix_all, SynthesisQueue};
pub use synthesis::{
    apply_synthesis_plan, plan_field_synthesis, Assignment, FieldOrigin, PlannedField,
    SynthesisPlan, TypePlanner,
};
pub use unbacked::unbacked_parameters;
