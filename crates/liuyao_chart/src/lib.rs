//! Liu-Yao chart orchestration.
//!
//! Aggregates the `liuyao_base` calculators behind one pure entry point,
//! [`Engine::compute_all`]. The casting moment is resolved by the caller;
//! this crate never converts calendar dates.

pub mod chart;
pub mod chart_types;

pub use chart::Engine;
pub use chart_types::{
    ChartHexagram, ChartOptions, ComputationResult, EnrichedLine, LineBranchRelations,
};

// Re-export the input and configuration types callers need.
pub use liuyao_base::{
    HiddenSpiritMode, LineSpec, LiuyaoError, Moment, Pillar, RuleSet, RuleSetRegistry,
};
