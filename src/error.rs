use thiserror::Error;

use crate::models::MealSlot;

/// Engine error taxonomy. Every variant carries enough context to name the
/// failing stage and field without re-deriving state.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid profile: {field}: {reason}")]
    InvalidProfile { field: &'static str, reason: String },

    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("feature mismatch in {stage}: expected {expected} features, got {actual}")]
    FeatureMismatch {
        stage: &'static str,
        expected: usize,
        actual: usize,
    },

    /// No catalog item satisfies the active constraints for a meal slot.
    /// Recovered inside the diet generator via the documented relaxation
    /// chain; never escapes `generate_plan`.
    #[error("no catalog item satisfies {constraint} for {slot:?}")]
    ConstraintUnsatisfiable { slot: MealSlot, constraint: String },

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
